//! Credential record model for Tradepost.

/// Default role assigned at registration.
pub const ROLE_MEMBER: &str = "member";

/// Administrative role. Roles are an open set of string tags; these
/// constants cover the two the application knows about by convention.
pub const ROLE_ADMIN: &str = "admin";

/// A registered user's credential record.
///
/// `password_hash` is an opaque Argon2 digest; it is never logged and never
/// serialized into a response.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: i64,
    /// Username (unique, immutable after creation).
    pub username: String,
    /// Password digest (Argon2 PHC string).
    pub password_hash: String,
    /// Role tag (open set; defaults to "member").
    pub role: String,
    /// Whether the account is active.
    pub is_active: bool,
    /// Account creation timestamp.
    pub created_at: String,
}

/// Data for creating a new credential record.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Username.
    pub username: String,
    /// Pre-hashed password digest.
    pub password_hash: String,
    /// Role tag.
    pub role: String,
    /// Active flag.
    pub is_active: bool,
}

impl NewUser {
    /// Create a new record with the default role and active flag.
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
            role: ROLE_MEMBER.to_string(),
            is_active: true,
        }
    }

    /// Set the role.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults() {
        let user = NewUser::new("alice", "digest");

        assert_eq!(user.username, "alice");
        assert_eq!(user.password_hash, "digest");
        assert_eq!(user.role, ROLE_MEMBER);
        assert!(user.is_active);
    }

    #[test]
    fn test_new_user_with_role() {
        let user = NewUser::new("root", "digest").with_role(ROLE_ADMIN);
        assert_eq!(user.role, "admin");
    }
}
