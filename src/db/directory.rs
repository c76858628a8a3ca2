//! Account directory abstraction.
//!
//! The auth service only needs two operations from its backing store:
//! look up a credential record by username and atomically insert a new one.
//! The production implementation is [`UserRepository`](super::UserRepository)
//! over SQLite; [`MemoryDirectory`] is a reference implementation for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use thiserror::Error;

use super::user::{NewUser, User};

/// Errors from the account directory.
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// A record with the same username already exists.
    #[error("username already exists")]
    Duplicate,

    /// The backing store is unreachable or failed.
    #[error("account store unavailable: {0}")]
    Unavailable(String),
}

/// Key-value lookup of username to stored credential record.
///
/// Lookups are case-sensitive exact match. `insert` must provide
/// at-most-one-success semantics under concurrent inserts of the same
/// username; a check-then-insert in the caller is not enough to close
/// that race, so the uniqueness constraint lives here.
pub trait AccountDirectory: Send + Sync {
    /// Find a credential record by exact username.
    fn find_by_username(
        &self,
        username: &str,
    ) -> impl std::future::Future<Output = Result<Option<User>, DirectoryError>> + Send;

    /// Insert a new credential record.
    ///
    /// Fails with [`DirectoryError::Duplicate`] if the username is taken,
    /// including when a concurrent insert won the race. The insert is
    /// all-or-nothing.
    fn insert(
        &self,
        new_user: &NewUser,
    ) -> impl std::future::Future<Output = Result<User, DirectoryError>> + Send;
}

/// In-memory account directory.
///
/// Reference implementation used by unit tests of the auth service. The
/// map mutex makes insert atomic with respect to the duplicate check.
#[derive(Default)]
pub struct MemoryDirectory {
    users: Mutex<HashMap<String, User>>,
}

impl MemoryDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.users.lock().expect("directory lock poisoned").len()
    }

    /// Whether the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AccountDirectory for MemoryDirectory {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DirectoryError> {
        let users = self.users.lock().expect("directory lock poisoned");
        Ok(users.get(username).cloned())
    }

    async fn insert(&self, new_user: &NewUser) -> Result<User, DirectoryError> {
        let mut users = self.users.lock().expect("directory lock poisoned");

        if users.contains_key(&new_user.username) {
            return Err(DirectoryError::Duplicate);
        }

        let user = User {
            id: users.len() as i64 + 1,
            username: new_user.username.clone(),
            password_hash: new_user.password_hash.clone(),
            role: new_user.role.clone(),
            is_active: new_user.is_active,
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        users.insert(user.username.clone(), user.clone());

        Ok(user)
    }
}
