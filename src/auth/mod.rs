//! Authentication module for Tradepost.
//!
//! Password hashing, session token issuance/validation and the
//! register/login service.

mod password;
mod service;
mod token;

pub use password::{hash_password, verify_password, PasswordError};
pub use service::{
    AuthError, AuthService, TokenGrant, MAX_PASSWORD_LENGTH, MAX_USERNAME_LENGTH,
    MIN_USERNAME_LENGTH,
};
pub use token::{Claims, TokenError, TokenService};
