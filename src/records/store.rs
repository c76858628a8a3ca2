//! Generic document store keyed by collection name.

use serde_json::Value;
use sqlx::Row;
use sqlx::SqlitePool;
use thiserror::Error;

use super::types::{RecordError, RecordKind};

/// Errors from the document store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The document failed kind validation.
    #[error(transparent)]
    Record(#[from] RecordError),

    /// The backing store is unreachable or failed.
    #[error("document store unavailable: {0}")]
    Unavailable(String),
}

/// A persisted document with its storage metadata.
#[derive(Debug, Clone)]
pub struct StoredDocument {
    /// Document ID.
    pub id: i64,
    /// Collection name.
    pub collection: String,
    /// Validated JSON body.
    pub body: Value,
    /// Storage timestamp.
    pub created_at: String,
}

/// Schema-validated document store over SQLite.
///
/// Bodies are validated against the collection's registered shape before
/// they are written, so everything read back is already canonical.
#[derive(Clone)]
pub struct DocumentStore {
    pool: SqlitePool,
}

impl DocumentStore {
    /// Create a store over the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Validate and insert a document into a collection.
    pub async fn insert(&self, kind: RecordKind, body: &Value) -> Result<StoredDocument, StoreError> {
        let canonical = kind.validate_body(body)?;
        let serialized = serde_json::to_string(&canonical)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let result = sqlx::query("INSERT INTO documents (collection, body) VALUES (?, ?)")
            .bind(kind.as_str())
            .bind(&serialized)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let id = result.last_insert_rowid();
        let row = sqlx::query("SELECT id, collection, body, created_at FROM documents WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        row_to_document(&row)
    }

    /// List all documents in a collection, oldest first.
    pub async fn list(&self, kind: RecordKind) -> Result<Vec<StoredDocument>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, collection, body, created_at FROM documents
             WHERE collection = ? ORDER BY id",
        )
        .bind(kind.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        rows.iter().map(row_to_document).collect()
    }

    /// Count documents in a collection.
    pub async fn count(&self, kind: RecordKind) -> Result<i64, StoreError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM documents WHERE collection = ?")
            .bind(kind.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }

    /// Check that the backing store answers queries.
    pub async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(())
    }
}

fn row_to_document(row: &sqlx::sqlite::SqliteRow) -> Result<StoredDocument, StoreError> {
    let body_text: String = row.get("body");
    let body = serde_json::from_str(&body_text)
        .map_err(|e| StoreError::Unavailable(format!("corrupt document body: {e}")))?;

    Ok(StoredDocument {
        id: row.get("id"),
        collection: row.get("collection"),
        body,
        created_at: row.get("created_at"),
    })
}
