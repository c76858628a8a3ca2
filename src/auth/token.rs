//! Session token issuance and validation.
//!
//! Tokens are compact signed JWTs carrying the username, role and an
//! absolute expiry timestamp. They are stateless bearer credentials: the
//! server keeps no session table and re-derives validity from the token's
//! own signed content.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::config::AuthConfig;
use crate::TradepostError;

/// Token validation and issuance errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Signature does not match, or the token is otherwise not decodable.
    #[error("invalid token signature")]
    InvalidSignature,

    /// Signature is valid but the token has expired.
    #[error("token expired")]
    Expired,

    /// Signing a new token failed.
    #[error("token signing failed: {0}")]
    Signing(String),
}

/// Claims embedded in a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username).
    pub sub: String,
    /// User role.
    pub role: String,
    /// Expiration timestamp (UTC epoch seconds).
    pub exp: i64,
}

/// Issues and validates signed, time-limited session tokens.
///
/// Built once at startup from process-wide configuration. Rotating the
/// secret invalidates every previously issued token; there is no key
/// versioning and no revocation path besides expiry.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validation: Validation,
    ttl_secs: i64,
}

impl TokenService {
    /// Create a token service from a secret, algorithm and TTL.
    pub fn new(secret: &str, algorithm: Algorithm, ttl_secs: i64) -> Self {
        // Expiry is checked manually against the caller-supplied clock so
        // validation stays pure; disable the library's wall-clock check.
        let mut validation = Validation::new(algorithm);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm,
            validation,
            ttl_secs,
        }
    }

    /// Build a token service from the auth configuration.
    ///
    /// Fails if the algorithm identifier is not recognized.
    pub fn from_config(config: &AuthConfig) -> Result<Self, TradepostError> {
        let algorithm = Algorithm::from_str(&config.algorithm).map_err(|_| {
            TradepostError::Config(format!("unknown token algorithm: {}", config.algorithm))
        })?;
        Ok(Self::new(
            &config.secret_key,
            algorithm,
            config.token_ttl_secs,
        ))
    }

    /// Token time-to-live in seconds.
    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    /// Issue a signed token for the given subject and role.
    ///
    /// The token expires `ttl_secs` after `now` (UTC epoch seconds).
    pub fn issue(&self, subject: &str, role: &str, now: i64) -> Result<String, TokenError> {
        let claims = Claims {
            sub: subject.to_string(),
            role: role.to_string(),
            exp: now + self.ttl_secs,
        };

        jsonwebtoken::encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Validate a token against the given clock.
    ///
    /// Signature integrity is checked first; any tampered or undecodable
    /// token yields `InvalidSignature`. A valid signature with
    /// `now >= exp` yields `Expired`. Otherwise the embedded claims are
    /// returned.
    pub fn validate(&self, token: &str, now: i64) -> Result<Claims, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| TokenError::InvalidSignature)?;

        if now >= data.claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(data.claims)
    }
}
