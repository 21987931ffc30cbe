//! Message entity - an immutable board entry with a resolvable author

use chrono::{DateTime, Utc};

/// Display name used for bot-authored messages.
pub const BOT_DISPLAY_NAME: &str = "bot";

/// Who wrote a message: a registered user or the built-in bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Author {
    /// A registered user, identified by username.
    User(String),
    /// The bot responder. Displays as [`BOT_DISPLAY_NAME`].
    Bot,
}

impl Author {
    /// The client-facing display name for this author.
    pub fn display_name(&self) -> &str {
        match self {
            Self::User(username) => username,
            Self::Bot => BOT_DISPLAY_NAME,
        }
    }

    #[inline]
    pub fn is_bot(&self) -> bool {
        matches!(self, Self::Bot)
    }
}

/// A stored message. Messages are append-only; listing is newest-first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: i64,
    pub author: Author,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Data required to record a new message. The id and timestamp are
/// assigned by the repository.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub author: Author,
    pub body: String,
}

impl NewMessage {
    pub fn from_user(username: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            author: Author::User(username.into()),
            body: body.into(),
        }
    }

    pub fn from_bot(body: impl Into<String>) -> Self {
        Self {
            author: Author::Bot,
            body: body.into(),
        }
    }
}
