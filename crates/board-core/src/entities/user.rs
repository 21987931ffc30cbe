//! User entity - a registered account identified by a unique username

use chrono::{DateTime, Utc};

/// A registered user account.
///
/// Created once at registration and read back at login; accounts are
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new user. The id and timestamp are
/// assigned by the repository.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}

impl User {
    pub fn new(id: i64, username: String, password_hash: String) -> Self {
        Self {
            id,
            username,
            password_hash,
            created_at: Utc::now(),
        }
    }
}
