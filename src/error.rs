//! Error types for Tradepost.

use thiserror::Error;

/// Common error type for Tradepost.
#[derive(Error, Debug)]
pub enum TradepostError {
    /// Database error.
    ///
    /// Generic database error wrapping failures from the sqlx backend.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication error.
    #[error("authentication error: {0}")]
    Auth(String),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for TradepostError {
    fn from(e: sqlx::Error) -> Self {
        TradepostError::Database(e.to_string())
    }
}

/// Result type alias for Tradepost operations.
pub type Result<T> = std::result::Result<T, TradepostError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_display() {
        let err = TradepostError::Auth("invalid password".to_string());
        assert_eq!(err.to_string(), "authentication error: invalid password");
    }

    #[test]
    fn test_validation_error_display() {
        let err = TradepostError::Validation("username too long".to_string());
        assert_eq!(err.to_string(), "validation error: username too long");
    }

    #[test]
    fn test_not_found_error_display() {
        let err = TradepostError::NotFound("user".to_string());
        assert_eq!(err.to_string(), "user not found");
    }

    #[test]
    fn test_config_error_display() {
        let err = TradepostError::Config("secret_key is not set".to_string());
        assert_eq!(err.to_string(), "configuration error: secret_key is not set");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TradepostError = io_err.into();
        assert!(matches!(err, TradepostError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_result_alias() {
        fn sample_ok() -> Result<i32> {
            Ok(42)
        }

        fn sample_err() -> Result<i32> {
            Err(TradepostError::Auth("test".to_string()))
        }

        assert_eq!(sample_ok().unwrap(), 42);
        assert!(sample_err().is_err());
    }
}
