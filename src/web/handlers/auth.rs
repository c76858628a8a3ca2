//! Authentication handlers.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::auth::AuthService;
use crate::db::UserRepository;
use crate::records::DocumentStore;
use crate::web::dto::{CredentialsRequest, MeResponse, TokenResponse};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

/// Application state shared across handlers.
pub struct AppState {
    /// Auth service over the SQLite account directory.
    pub auth: AuthService<UserRepository>,
    /// Document store for record collections.
    pub docs: DocumentStore,
}

impl AppState {
    /// Create a new application state.
    pub fn new(auth: AuthService<UserRepository>, docs: DocumentStore) -> Self {
        Self { auth, docs }
    }
}

/// POST /auth/register - Create an account and return a bearer token.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CredentialsRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let grant = state.auth.register(&req.username, &req.password).await?;
    Ok(Json(TokenResponse::new(grant.access_token)))
}

/// POST /auth/login - Verify credentials and return a bearer token.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CredentialsRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let grant = state.auth.login(&req.username, &req.password).await?;
    Ok(Json(TokenResponse::new(grant.access_token)))
}

/// GET /auth/me - Identity carried by the presented token.
pub async fn me(AuthUser(claims): AuthUser) -> Json<MeResponse> {
    Json(MeResponse {
        username: claims.sub,
        role: claims.role,
    })
}
