//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation (PostgreSQL, or in-memory when no
//! database is configured).

use async_trait::async_trait;

use crate::entities::{Message, NewMessage, NewUser, User};
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by username
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    /// Check if a username is already taken
    async fn username_exists(&self, username: &str) -> RepoResult<bool>;

    /// Create a new user, returning the stored row
    async fn create(&self, user: NewUser) -> RepoResult<User>;
}

// ============================================================================
// Message Repository
// ============================================================================

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Record a new message, returning the stored row with its
    /// server-assigned id and timestamp
    async fn create(&self, message: NewMessage) -> RepoResult<Message>;

    /// Find a message by id
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Message>>;

    /// List all messages, newest first (created_at DESC, id DESC)
    async fn list_newest_first(&self) -> RepoResult<Vec<Message>>;
}
