//! Tradepost - Trading Community Backend
//!
//! Account registration/login with stateless bearer tokens, plus a
//! schema-validated document store for the community's record collections.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod records;
pub mod web;

pub use auth::{
    hash_password, verify_password, AuthError, AuthService, Claims, PasswordError, TokenError,
    TokenGrant, TokenService,
};
pub use config::Config;
pub use db::{
    AccountDirectory, Database, DirectoryError, MemoryDirectory, NewUser, User, UserRepository,
};
pub use error::{Result, TradepostError};
pub use records::{DocumentStore, RecordKind, StoredDocument};
pub use web::WebServer;
