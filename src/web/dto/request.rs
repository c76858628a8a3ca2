//! Request DTOs for the Web API.

use serde::Deserialize;

/// Username/password credentials, used by both register and login.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
}
