//! This module holds the middleware definitions

pub(crate) use authentication_required::AuthenticationRequired;

mod authentication_required;
