//! In-memory repository implementations
//!
//! Used when no `DATABASE_URL` is configured. Rows live for the process
//! lifetime only; ids are assigned from a per-repository counter.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use board_core::{
    DomainError, Message, MessageRepository, NewMessage, NewUser, RepoResult, User, UserRepository,
};

/// In-memory implementation of UserRepository
#[derive(Debug, Default)]
pub struct MemUserRepository {
    users: RwLock<Vec<User>>,
    next_id: AtomicI64,
}

impl MemUserRepository {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl UserRepository for MemUserRepository {
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn username_exists(&self, username: &str) -> RepoResult<bool> {
        let users = self.users.read().await;
        Ok(users.iter().any(|u| u.username == username))
    }

    async fn create(&self, user: NewUser) -> RepoResult<User> {
        let mut users = self.users.write().await;
        // Uniqueness is checked under the write lock, matching the
        // database unique constraint.
        if users.iter().any(|u| u.username == user.username) {
            return Err(DomainError::UsernameTaken);
        }

        let stored = User {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            username: user.username,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        users.push(stored.clone());
        Ok(stored)
    }
}

/// In-memory implementation of MessageRepository
#[derive(Debug, Default)]
pub struct MemMessageRepository {
    messages: RwLock<Vec<Message>>,
    next_id: AtomicI64,
}

impl MemMessageRepository {
    pub fn new() -> Self {
        Self {
            messages: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl MessageRepository for MemMessageRepository {
    async fn create(&self, message: NewMessage) -> RepoResult<Message> {
        let mut messages = self.messages.write().await;
        let stored = Message {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            author: message.author,
            body: message.body,
            created_at: Utc::now(),
        };
        messages.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Message>> {
        let messages = self.messages.read().await;
        Ok(messages.iter().find(|m| m.id == id).cloned())
    }

    async fn list_newest_first(&self) -> RepoResult<Vec<Message>> {
        let messages = self.messages.read().await;
        let mut result: Vec<Message> = messages.clone();
        result.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(result)
    }
}
