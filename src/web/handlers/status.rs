//! Service status and schema handlers.

use axum::{extract::State, Json};
use std::sync::Arc;

use super::auth::AppState;
use crate::records::collection_names;
use crate::web::dto::{RootResponse, SchemaResponse, StatusResponse};

/// GET / - Service banner.
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Trading Community API running".to_string(),
    })
}

/// GET /schema - Names of all known collections, for viewer tools.
pub async fn schema() -> Json<SchemaResponse> {
    Json(SchemaResponse {
        collections: collection_names(),
    })
}

/// GET /test - Backend and database connectivity diagnostic.
pub async fn diagnostics(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (database, collections) = match state.docs.ping().await {
        Ok(()) => ("connected".to_string(), collection_names()),
        Err(e) => (format!("error: {e}"), vec![]),
    };

    Json(StatusResponse {
        backend: "running".to_string(),
        database,
        collections,
    })
}
