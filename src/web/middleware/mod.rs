//! Middleware for the Web API.

pub mod auth;
pub mod cors;

pub use auth::{token_auth, AuthUser};
pub use cors::create_cors_layer;
