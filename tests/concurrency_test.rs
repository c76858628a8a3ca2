//! Concurrency tests for registration.
//!
//! The duplicate-username guarantee must hold under concurrent register
//! calls, not just sequential ones: the storage layer's unique index is
//! the arbiter, not the pre-insert lookup.

use jsonwebtoken::Algorithm;
use std::sync::Arc;

use tradepost::auth::{AuthError, AuthService, TokenService};
use tradepost::db::{AccountDirectory, NewUser, UserRepository};
use tradepost::Database;

const TEST_SECRET: &str = "test-secret-key-for-testing-only";

async fn create_auth_service() -> (Arc<AuthService<UserRepository>>, Database) {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");

    let auth = AuthService::new(
        UserRepository::new(db.pool().clone()),
        TokenService::new(TEST_SECRET, Algorithm::HS256, 86400),
    );

    (Arc::new(auth), db)
}

#[tokio::test]
async fn test_concurrent_registration_exactly_one_succeeds() {
    let (auth, _db) = create_auth_service().await;

    let mut handles = Vec::new();
    for _ in 0..8 {
        let auth = auth.clone();
        handles.push(tokio::spawn(async move {
            auth.register("alice", "pw12345").await
        }));
    }

    let mut successes = 0;
    let mut duplicates = 0;
    for handle in handles {
        match handle.await.expect("task panicked") {
            Ok(grant) => {
                assert_eq!(grant.subject, "alice");
                successes += 1;
            }
            Err(AuthError::DuplicateUsername) => duplicates += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(duplicates, 7);
}

#[tokio::test]
async fn test_concurrent_registration_distinct_usernames_all_succeed() {
    let (auth, _db) = create_auth_service().await;

    let mut handles = Vec::new();
    for i in 0..8 {
        let auth = auth.clone();
        handles.push(tokio::spawn(async move {
            auth.register(&format!("user{i}"), "pw12345").await
        }));
    }

    for handle in handles {
        handle
            .await
            .expect("task panicked")
            .expect("registration failed");
    }
}

#[tokio::test]
async fn test_concurrent_inserts_hit_unique_index() {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");
    let repo = UserRepository::new(db.pool().clone());

    // Bypass the service-level lookup entirely: every task goes straight
    // to the insert, so only the unique index can decide the winner.
    let mut handles = Vec::new();
    for _ in 0..8 {
        let repo = repo.clone();
        handles.push(tokio::spawn(async move {
            repo.insert(&NewUser::new("bob", "digest")).await
        }));
    }

    let mut successes = 0;
    for handle in handles {
        if handle.await.expect("task panicked").is_ok() {
            successes += 1;
        }
    }

    assert_eq!(successes, 1);

    let stored = repo.find_by_username("bob").await.unwrap().unwrap();
    assert_eq!(stored.username, "bob");
}
