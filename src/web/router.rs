//! Router configuration for the Web API.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    create_document, diagnostics, list_documents, login, me, register, root, schema, AppState,
};
use super::middleware::{create_cors_layer, token_auth};
use crate::auth::TokenService;

/// Create the main API router.
pub fn create_router(
    app_state: Arc<AppState>,
    tokens: Arc<TokenService>,
    cors_origins: &[String],
) -> Router {
    let auth_routes = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me));

    let tokens_for_middleware = tokens.clone();

    Router::new()
        .route("/", get(root))
        .route("/schema", get(schema))
        .route("/test", get(diagnostics))
        .nest("/auth", auth_routes)
        .route(
            "/collections/:collection",
            get(list_documents).post(create_document),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn(move |req, next| {
                    let tokens = tokens_for_middleware.clone();
                    token_auth(tokens, req, next)
                })),
        )
        .with_state(app_state)
}
