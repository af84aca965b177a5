//! Pure view state, rendered by the templates
//!
//! Nothing in here talks to the backend or the session.

pub use friends::*;
pub use movies::*;
pub use toast::*;

mod friends;
mod movies;
mod toast;
