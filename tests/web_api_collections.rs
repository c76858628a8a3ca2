//! Web API collection tests.
//!
//! Integration tests for the service endpoints and the document
//! collection endpoints.

use axum::http::header::AUTHORIZATION;
use axum_test::TestServer;
use jsonwebtoken::Algorithm;
use serde_json::{json, Value};
use std::sync::Arc;

use tradepost::auth::{AuthService, TokenService};
use tradepost::db::UserRepository;
use tradepost::records::DocumentStore;
use tradepost::web::handlers::AppState;
use tradepost::web::router::create_router;
use tradepost::Database;

const TEST_SECRET: &str = "test-secret-key-for-testing-only";

/// Create a test server with an in-memory database.
async fn create_test_server() -> TestServer {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");

    let directory = UserRepository::new(db.pool().clone());
    let auth = AuthService::new(
        directory,
        TokenService::new(TEST_SECRET, Algorithm::HS256, 86400),
    );
    let docs = DocumentStore::new(db.pool().clone());

    let app_state = Arc::new(AppState::new(auth, docs));
    let tokens = Arc::new(TokenService::new(TEST_SECRET, Algorithm::HS256, 86400));

    let router = create_router(app_state, tokens, &[]);
    TestServer::new(router).expect("Failed to create test server")
}

/// Register a user and return their access token.
async fn register_test_user(server: &TestServer, username: &str) -> String {
    let body: Value = server
        .post("/auth/register")
        .json(&json!({"username": username, "password": "pw12345"}))
        .await
        .json();
    body["access_token"].as_str().unwrap().to_string()
}

// ============================================================================
// Service endpoints
// ============================================================================

#[tokio::test]
async fn test_root() {
    let server = create_test_server().await;

    let response = server.get("/").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["message"], "Trading Community API running");
}

#[tokio::test]
async fn test_schema_lists_all_collections() {
    let server = create_test_server().await;

    let response = server.get("/schema").await;
    response.assert_status_ok();

    let body: Value = response.json();
    let collections = body["collections"].as_array().unwrap();
    let names: Vec<&str> = collections.iter().filter_map(|v| v.as_str()).collect();

    assert_eq!(
        names,
        vec![
            "user",
            "article",
            "indicator",
            "message",
            "libraryitem",
            "calendarevent",
            "earning",
            "supportticket",
        ]
    );
}

#[tokio::test]
async fn test_diagnostics() {
    let server = create_test_server().await;

    let response = server.get("/test").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["backend"], "running");
    assert_eq!(body["database"], "connected");
    assert!(body["collections"].is_array());
}

// ============================================================================
// Listing documents
// ============================================================================

#[tokio::test]
async fn test_list_empty_collection() {
    let server = create_test_server().await;

    let response = server.get("/collections/article").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_list_unknown_collection() {
    let server = create_test_server().await;

    let response = server.get("/collections/nonsense").await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_returns_documents_in_insertion_order() {
    let server = create_test_server().await;
    let token = register_test_user(&server, "alice").await;

    for text in ["first", "second", "third"] {
        server
            .post("/collections/message")
            .add_header(AUTHORIZATION, format!("Bearer {}", token))
            .json(&json!({"user": "alice", "text": text}))
            .await
            .assert_status_ok();
    }

    let body: Value = server.get("/collections/message").await.json();
    let docs = body.as_array().unwrap();
    assert_eq!(docs.len(), 3);
    assert_eq!(docs[0]["body"]["text"], "first");
    assert_eq!(docs[1]["body"]["text"], "second");
    assert_eq!(docs[2]["body"]["text"], "third");
}

// ============================================================================
// Creating documents
// ============================================================================

#[tokio::test]
async fn test_create_document_requires_auth() {
    let server = create_test_server().await;

    let response = server
        .post("/collections/message")
        .json(&json!({"user": "alice", "text": "hello"}))
        .await;

    response.assert_status(axum::http::StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_message_fills_default_room() {
    let server = create_test_server().await;
    let token = register_test_user(&server, "alice").await;

    let response = server
        .post("/collections/message")
        .add_header(AUTHORIZATION, format!("Bearer {}", token))
        .json(&json!({"user": "alice", "text": "hello"}))
        .await;

    response.assert_status_ok();

    let body: Value = response.json();
    assert!(body["id"].as_i64().unwrap() > 0);
    assert_eq!(body["collection"], "message");
    assert_eq!(body["body"]["room"], "general");
    assert!(body["created_at"].is_string());
}

#[tokio::test]
async fn test_create_article_with_tags() {
    let server = create_test_server().await;
    let token = register_test_user(&server, "alice").await;

    let response = server
        .post("/collections/article")
        .add_header(AUTHORIZATION, format!("Bearer {}", token))
        .json(&json!({
            "title": "Fed holds rates",
            "summary": "No change this quarter",
            "tags": ["macro", "fomc"]
        }))
        .await;

    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["body"]["title"], "Fed holds rates");
    assert_eq!(body["body"]["tags"], json!(["macro", "fomc"]));
    // Omitted optional fields stored in canonical form
    assert_eq!(body["body"]["author"], Value::Null);
}

#[tokio::test]
async fn test_create_document_invalid_shape() {
    let server = create_test_server().await;
    let token = register_test_user(&server, "alice").await;

    // Message without required text field
    let response = server
        .post("/collections/message")
        .add_header(AUTHORIZATION, format!("Bearer {}", token))
        .json(&json!({"user": "alice"}))
        .await;

    response.assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_create_document_failing_field_validation() {
    let server = create_test_server().await;
    let token = register_test_user(&server, "alice").await;

    // Empty title fails validation
    let response = server
        .post("/collections/article")
        .add_header(AUTHORIZATION, format!("Bearer {}", token))
        .json(&json!({"title": ""}))
        .await;

    response.assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_create_document_unknown_collection() {
    let server = create_test_server().await;
    let token = register_test_user(&server, "alice").await;

    let response = server
        .post("/collections/nonsense")
        .add_header(AUTHORIZATION, format!("Bearer {}", token))
        .json(&json!({"anything": true}))
        .await;

    response.assert_status(axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_libraryitem_rejects_bad_url() {
    let server = create_test_server().await;
    let token = register_test_user(&server, "alice").await;

    let response = server
        .post("/collections/libraryitem")
        .add_header(AUTHORIZATION, format!("Bearer {}", token))
        .json(&json!({"title": "Guide", "type": "pdf", "url": "not a url"}))
        .await;

    response.assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_collections_are_isolated() {
    let server = create_test_server().await;
    let token = register_test_user(&server, "alice").await;

    server
        .post("/collections/message")
        .add_header(AUTHORIZATION, format!("Bearer {}", token))
        .json(&json!({"user": "alice", "text": "hello"}))
        .await
        .assert_status_ok();

    let body: Value = server.get("/collections/article").await.json();
    assert_eq!(body, json!([]));
}
