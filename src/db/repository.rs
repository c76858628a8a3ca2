//! SQLite-backed account directory.

use sqlx::SqlitePool;

use super::directory::{AccountDirectory, DirectoryError};
use super::user::{NewUser, User};

/// Account directory over a SQLite connection pool.
///
/// The pool is cheaply cloneable, so the repository owns one.
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new repository over the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>, DirectoryError> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, role, is_active, created_at
             FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DirectoryError::Unavailable(e.to_string()))
    }

    /// Count all users.
    pub async fn count(&self) -> Result<i64, DirectoryError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DirectoryError::Unavailable(e.to_string()))
    }
}

impl AccountDirectory for UserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DirectoryError> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, role, is_active, created_at
             FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DirectoryError::Unavailable(e.to_string()))
    }

    async fn insert(&self, new_user: &NewUser) -> Result<User, DirectoryError> {
        // The unique index on username enforces at-most-one-success here;
        // a losing concurrent insert surfaces as a unique violation.
        let result = sqlx::query(
            "INSERT INTO users (username, password_hash, role, is_active)
             VALUES (?, ?, ?, ?)",
        )
        .bind(&new_user.username)
        .bind(&new_user.password_hash)
        .bind(&new_user.role)
        .bind(new_user.is_active)
        .execute(&self.pool)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db_err) if db_err.is_unique_violation() => DirectoryError::Duplicate,
            _ => DirectoryError::Unavailable(e.to_string()),
        })?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| DirectoryError::Unavailable("inserted row not found".to_string()))
    }
}
