//! Registration and login orchestration.

use chrono::Utc;
use thiserror::Error;
use tracing::{info, warn};

use crate::auth::password::{hash_password, verify_password};
use crate::auth::token::TokenService;
use crate::db::{AccountDirectory, DirectoryError, NewUser};

/// Minimum username length.
pub const MIN_USERNAME_LENGTH: usize = 3;

/// Maximum username length.
pub const MAX_USERNAME_LENGTH: usize = 32;

/// Maximum password length.
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// A well-formed Argon2 digest that matches no password. Verified against
/// when a login names an unknown user, so the unknown-user and
/// wrong-password paths cost about the same.
const DUMMY_DIGEST: &str = "$argon2id$v=19$m=65536,t=3,p=4$c29tZXNhbHRzb21lc2FsdA$QUFBQUFBQUFBQUFBQUFBQUFBQUFBQUFBQUFBQUFBQUE";

/// Authentication errors.
///
/// This is the full taxonomy surfaced to the web layer; no store or
/// hashing internals leak past it.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Malformed username or password shape.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Registration collision. Safe to reveal at register time since the
    /// client supplied the name.
    #[error("username already exists")]
    DuplicateUsername,

    /// Wrong username or wrong password at login. Deliberately
    /// undifferentiated to prevent username enumeration.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Backing directory unreachable.
    #[error("account store unavailable: {0}")]
    StoreUnavailable(String),

    /// Hashing or token signing failed.
    #[error("internal auth error: {0}")]
    Internal(String),
}

impl From<DirectoryError> for AuthError {
    fn from(e: DirectoryError) -> Self {
        match e {
            DirectoryError::Duplicate => AuthError::DuplicateUsername,
            DirectoryError::Unavailable(msg) => AuthError::StoreUnavailable(msg),
        }
    }
}

/// Result of a successful register or login.
#[derive(Debug, Clone)]
pub struct TokenGrant {
    /// Signed bearer token.
    pub access_token: String,
    /// Subject the token was issued for.
    pub subject: String,
    /// Role embedded in the token.
    pub role: String,
}

/// Orchestrates registration and login against an account directory.
///
/// Stateless across requests: both flows are single-pass with no retries.
pub struct AuthService<D> {
    directory: D,
    tokens: TokenService,
}

impl<D: AccountDirectory> AuthService<D> {
    /// Create a new auth service.
    pub fn new(directory: D, tokens: TokenService) -> Self {
        Self { directory, tokens }
    }

    /// The token service used for issuance.
    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Register a new user and issue a session token.
    ///
    /// Rejects malformed input, duplicate usernames (whether found by
    /// lookup or detected at insert time under a race) and store failures.
    pub async fn register(&self, username: &str, password: &str) -> Result<TokenGrant, AuthError> {
        validate_username(username)?;
        validate_password(password)?;

        if self.directory.find_by_username(username).await?.is_some() {
            return Err(AuthError::DuplicateUsername);
        }

        let password_hash =
            hash_password(password).map_err(|e| AuthError::Internal(e.to_string()))?;

        // The insert can still lose a race to a concurrent registration;
        // the directory reports that as Duplicate, never an overwrite.
        let user = self
            .directory
            .insert(&NewUser::new(username, password_hash))
            .await?;

        info!(username = %user.username, "registered new user");
        self.issue_grant(&user.username, &user.role)
    }

    /// Log a user in and issue a session token.
    ///
    /// An unknown username and a wrong password produce the same error.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenGrant, AuthError> {
        let user = self.directory.find_by_username(username).await?;

        let user = match user {
            Some(user) => user,
            None => {
                // Burn a verification anyway to keep response latency
                // comparable to the wrong-password path.
                let _ = verify_password(password, DUMMY_DIGEST);
                return Err(AuthError::InvalidCredentials);
            }
        };

        if !verify_password(password, &user.password_hash) {
            warn!(username = %user.username, "failed login attempt");
            return Err(AuthError::InvalidCredentials);
        }

        self.issue_grant(&user.username, &user.role)
    }

    fn issue_grant(&self, subject: &str, role: &str) -> Result<TokenGrant, AuthError> {
        let now = Utc::now().timestamp();
        let access_token = self
            .tokens
            .issue(subject, role, now)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(TokenGrant {
            access_token,
            subject: subject.to_string(),
            role: role.to_string(),
        })
    }
}

fn validate_username(username: &str) -> Result<(), AuthError> {
    let len = username.chars().count();
    if !(MIN_USERNAME_LENGTH..=MAX_USERNAME_LENGTH).contains(&len) {
        return Err(AuthError::InvalidInput(format!(
            "username must be {MIN_USERNAME_LENGTH}-{MAX_USERNAME_LENGTH} characters"
        )));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.is_empty() {
        return Err(AuthError::InvalidInput(
            "password cannot be empty".to_string(),
        ));
    }
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(AuthError::InvalidInput(format!(
            "password must be at most {MAX_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}
