//! All records exchanged with the backend live here.

pub use account::*;
pub use friend::*;
pub use movie::*;

mod account;
mod friend;
mod movie;
