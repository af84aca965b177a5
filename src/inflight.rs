//! Suppression of duplicate submissions
//!
//! A mutating action is keyed by the viewer, the action and its subject.
//! While a key is in flight, the same submission is refused. The key is
//! released as soon as the [InFlightTicket] is dropped.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use log::debug;

/// Identifies a submission
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ActionKey {
    viewer: String,
    action: &'static str,
    subject: String,
}

impl ActionKey {
    /// Create a new key
    pub fn new(viewer: &str, action: &'static str, subject: &str) -> Self {
        Self {
            viewer: viewer.to_string(),
            action,
            subject: subject.to_string(),
        }
    }
}

/// The set of submissions that are currently running
#[derive(Clone, Default)]
pub struct InFlight {
    keys: Arc<Mutex<HashSet<ActionKey>>>,
}

impl InFlight {
    /// Mark `key` as running.
    ///
    /// Returns [None] if the same key is already running.
    pub fn try_start(&self, key: ActionKey) -> Option<InFlightTicket> {
        let mut keys = self.keys.lock().unwrap_or_else(PoisonError::into_inner);
        if !keys.insert(key.clone()) {
            debug!("Suppressed duplicate submission {key:?}");
            return None;
        }

        Some(InFlightTicket {
            keys: self.keys.clone(),
            key,
        })
    }
}

/// Proof that a submission is running, releases its key on drop
pub struct InFlightTicket {
    keys: Arc<Mutex<HashSet<ActionKey>>>,
    key: ActionKey,
}

impl Drop for InFlightTicket {
    fn drop(&mut self) {
        self.keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}
