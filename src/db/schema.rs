//! Database schema and migrations for Tradepost.
//!
//! Migrations are applied sequentially; the `schema_version` table tracks
//! which have run.

/// Database migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: users table for the account directory
    r#"
-- Credential records. The UNIQUE constraint on username is what closes the
-- check-then-insert race under concurrent registration: at most one insert
-- for a given username can ever succeed. Matching is case-sensitive
-- (SQLite's default BINARY collation), matching directory lookup semantics.
CREATE TABLE users (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    username      TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,           -- Argon2 PHC string
    role          TEXT NOT NULL DEFAULT 'member',
    is_active     INTEGER NOT NULL DEFAULT 1,
    created_at    TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_users_username ON users(username);
"#,
    // v2: documents table for record collections
    r#"
-- Generic document store keyed by collection name. Bodies are JSON that
-- has already been validated against the collection's registered shape.
CREATE TABLE documents (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    collection  TEXT NOT NULL,
    body        TEXT NOT NULL,
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_documents_collection ON documents(collection);
"#,
];
