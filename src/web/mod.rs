//! Web API module for Tradepost.
//!
//! REST surface for registration/login, document collections and
//! service diagnostics.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
