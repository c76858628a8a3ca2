//! Response DTOs for the Web API.

use serde::Serialize;
use serde_json::Value;

use crate::records::StoredDocument;

/// Bearer token response for register and login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    /// Signed access token.
    pub access_token: String,
    /// Always "bearer".
    pub token_type: String,
}

impl TokenResponse {
    /// Wrap an access token.
    pub fn new(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// Current user response (for /auth/me).
#[derive(Debug, Serialize)]
pub struct MeResponse {
    /// Username (token subject).
    pub username: String,
    /// Role embedded in the token.
    pub role: String,
}

/// Service banner for the root endpoint.
#[derive(Debug, Serialize)]
pub struct RootResponse {
    /// Human-readable service message.
    pub message: String,
}

/// Collection listing for /schema.
#[derive(Debug, Serialize)]
pub struct SchemaResponse {
    /// All known collection names.
    pub collections: Vec<String>,
}

/// Connectivity diagnostic for /test.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Backend status, always "running" if this handler answered.
    pub backend: String,
    /// Database status: "connected" or an error description.
    pub database: String,
    /// Collection names, when the database answered.
    pub collections: Vec<String>,
}

/// A stored document in responses.
#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    /// Document ID.
    pub id: i64,
    /// Collection name.
    pub collection: String,
    /// Validated document body.
    pub body: Value,
    /// Storage timestamp.
    pub created_at: String,
}

impl From<StoredDocument> for DocumentResponse {
    fn from(doc: StoredDocument) -> Self {
        Self {
            id: doc.id,
            collection: doc.collection,
            body: doc.body,
            created_at: doc.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_response_type_is_bearer() {
        let resp = TokenResponse::new("abc".to_string());
        assert_eq!(resp.token_type, "bearer");

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["access_token"], "abc");
        assert_eq!(json["token_type"], "bearer");
    }
}
