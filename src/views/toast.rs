//! Short lived notifications

use serde::{Deserialize, Serialize};

/// Seconds a toast stays visible
pub const TOAST_SECONDS: u32 = 3;

/// The kind of a toast
#[derive(Deserialize, Serialize, Copy, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    /// An action succeeded
    Success,
    /// An action failed
    Error,
}

/// A notification shown once on the next rendered page
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    /// The kind of the toast
    pub kind: ToastKind,
    /// The text of the toast
    pub message: String,
}

impl Toast {
    /// Create a success toast
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    /// Create an error toast
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }
}
