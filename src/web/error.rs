//! API error handling for the Tradepost web layer.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::auth::{AuthError, TokenError};
use crate::records::{RecordError, StoreError};

/// API error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Bad request (400).
    BadRequest,
    /// Unauthorized (401).
    Unauthorized,
    /// Forbidden (403).
    Forbidden,
    /// Not found (404).
    NotFound,
    /// Unprocessable entity (422).
    UnprocessableEntity,
    /// Internal server error (500).
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::UnprocessableEntity => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// API error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail.
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    /// Error code.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
}

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Create a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    /// Create an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Create a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Create an unprocessable entity error.
    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UnprocessableEntity, message)
    }

    /// Create an internal server error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status_code();
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (status, Json(body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidInput(msg) => ApiError::bad_request(msg),
            AuthError::DuplicateUsername => ApiError::bad_request("Username already exists"),
            AuthError::InvalidCredentials => ApiError::unauthorized("Invalid credentials"),
            AuthError::StoreUnavailable(msg) => {
                tracing::error!("account store unavailable: {}", msg);
                ApiError::internal("Database not available")
            }
            AuthError::Internal(msg) => {
                tracing::error!("auth internal error: {}", msg);
                ApiError::internal("An internal error occurred")
            }
        }
    }
}

impl From<TokenError> for ApiError {
    // Signature and expiry failures are deliberately not distinguished
    // to the client.
    fn from(err: TokenError) -> Self {
        tracing::debug!("token rejected: {}", err);
        ApiError::unauthorized("Invalid or expired token")
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Record(record_err) => record_err.into(),
            StoreError::Unavailable(msg) => {
                tracing::error!("document store unavailable: {}", msg);
                ApiError::internal("Database not available")
            }
        }
    }
}

impl From<RecordError> for ApiError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::UnknownKind(name) => {
                ApiError::not_found(format!("Unknown collection: {name}"))
            }
            RecordError::Shape(msg) => ApiError::unprocessable(msg),
            RecordError::Invalid(errors) => ApiError::unprocessable(errors.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_status() {
        assert_eq!(ErrorCode::BadRequest.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ErrorCode::Unauthorized.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ErrorCode::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ErrorCode::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::UnprocessableEntity.status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ErrorCode::InternalError.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_api_error_constructors() {
        assert_eq!(ApiError::bad_request("x").code, ErrorCode::BadRequest);
        assert_eq!(ApiError::unauthorized("x").code, ErrorCode::Unauthorized);
        assert_eq!(ApiError::forbidden("x").code, ErrorCode::Forbidden);
        assert_eq!(ApiError::not_found("x").code, ErrorCode::NotFound);
        assert_eq!(
            ApiError::unprocessable("x").code,
            ErrorCode::UnprocessableEntity
        );
        assert_eq!(ApiError::internal("x").code, ErrorCode::InternalError);
    }

    #[test]
    fn test_duplicate_username_maps_to_400() {
        let err: ApiError = AuthError::DuplicateUsername.into();
        assert_eq!(err.code, ErrorCode::BadRequest);
        assert_eq!(err.message, "Username already exists");
    }

    #[test]
    fn test_invalid_credentials_maps_to_401() {
        let err: ApiError = AuthError::InvalidCredentials.into();
        assert_eq!(err.code, ErrorCode::Unauthorized);
        assert_eq!(err.message, "Invalid credentials");
    }

    #[test]
    fn test_store_unavailable_hides_detail() {
        let err: ApiError = AuthError::StoreUnavailable("driver exploded".to_string()).into();
        assert_eq!(err.code, ErrorCode::InternalError);
        assert!(!err.message.contains("driver"));
    }

    #[test]
    fn test_token_errors_look_the_same() {
        let sig: ApiError = TokenError::InvalidSignature.into();
        let exp: ApiError = TokenError::Expired.into();
        assert_eq!(sig.code, exp.code);
        assert_eq!(sig.message, exp.message);
    }

    #[test]
    fn test_unknown_collection_maps_to_404() {
        let err: ApiError = RecordError::UnknownKind("bogus".to_string()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
