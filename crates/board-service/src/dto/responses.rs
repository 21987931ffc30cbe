//! Response DTOs for API endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use board_core::Message;

/// Registration response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub username: String,
}

/// Login response carrying the session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
}

/// Client-facing message shape.
///
/// The stored `created_at` is surfaced as `timestamp`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub name: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl From<&Message> for MessageResponse {
    fn from(message: &Message) -> Self {
        Self {
            name: message.author.display_name().to_string(),
            message: message.body.clone(),
            timestamp: message.created_at,
        }
    }
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self::from(&message)
    }
}
