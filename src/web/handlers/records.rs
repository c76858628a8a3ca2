//! Document collection handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use super::auth::AppState;
use crate::records::RecordKind;
use crate::web::dto::DocumentResponse;
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

/// GET /collections/{collection} - List all documents in a collection.
pub async fn list_documents(
    State(state): State<Arc<AppState>>,
    Path(collection): Path<String>,
) -> Result<Json<Vec<DocumentResponse>>, ApiError> {
    let kind: RecordKind = collection.parse()?;

    let docs = state.docs.list(kind).await?;
    Ok(Json(docs.into_iter().map(DocumentResponse::from).collect()))
}

/// POST /collections/{collection} - Validate and store a document.
///
/// Requires a valid bearer token.
pub async fn create_document(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(collection): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<DocumentResponse>, ApiError> {
    let kind: RecordKind = collection.parse()?;

    let doc = state.docs.insert(kind, &body).await?;
    debug!(user = %claims.sub, collection = %kind, id = doc.id, "stored document");

    Ok(Json(DocumentResponse::from(doc)))
}
