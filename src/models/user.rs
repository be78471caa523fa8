use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered account.
///
/// Deliberately not `Serialize`: the bcrypt hash lives in a private field and
/// leaves the service layer only through [`UserResponse`].
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    /// Storage-assigned identifier. `0` until the record is persisted.
    pub id: i32,
    /// Login identifier, unique across users.
    pub email: String,
    #[sqlx(rename = "password")]
    password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates an unsaved user from an already hashed password.
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        let now = super::now();
        Self {
            id: 0,
            email: email.into(),
            password_hash: password_hash.into(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }
}

/// Outward-facing projection of a [`User`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
