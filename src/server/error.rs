//! You can find the errors that can occur during server startup here

use std::fmt::{Display, Formatter};
use std::io;

/// The errors that can occur during server startup
#[derive(Debug)]
pub enum StartServerError {
    /// IO error that can occur
    IO(io::Error),
    /// The session key could not be used
    InvalidSessionKey(String),
    /// The templates could not be loaded
    Template(tera::Error),
}

impl Display for StartServerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StartServerError::IO(err) => write!(f, "{err}"),
            StartServerError::InvalidSessionKey(err) => write!(f, "Invalid session key: {err}"),
            StartServerError::Template(err) => write!(f, "Could not load templates: {err}"),
        }
    }
}

impl From<io::Error> for StartServerError {
    fn from(value: io::Error) -> Self {
        Self::IO(value)
    }
}

impl From<tera::Error> for StartServerError {
    fn from(value: tera::Error) -> Self {
        Self::Template(value)
    }
}
