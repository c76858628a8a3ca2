//! API handlers for the Web API.

pub mod auth;
pub mod records;
pub mod status;

pub use auth::*;
pub use records::*;
pub use status::*;
