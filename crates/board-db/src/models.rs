//! Database models with SQLx `FromRow` derives

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use board_core::{Author, Message, User};

/// Database model for the users table
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        Self {
            id: model.id,
            username: model.username,
            password_hash: model.password_hash,
            created_at: model.created_at,
        }
    }
}

/// Database model for the messages table.
///
/// Bot authorship is a flag rather than a foreign key; bot messages
/// have no corresponding users row.
#[derive(Debug, Clone, FromRow)]
pub struct MessageModel {
    pub id: i64,
    pub author_name: String,
    pub is_bot: bool,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl From<MessageModel> for Message {
    fn from(model: MessageModel) -> Self {
        let author = if model.is_bot {
            Author::Bot
        } else {
            Author::User(model.author_name)
        };
        Self {
            id: model.id,
            author,
            body: model.body,
            created_at: model.created_at,
        }
    }
}
