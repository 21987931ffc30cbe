//! Wire events exchanged over the WebSocket
//!
//! Events are JSON objects tagged with an `event` field and a `data`
//! payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use board_core::Message;

/// Events pushed from the server to every connected client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    /// A message was recorded; `data` is the client-facing shape.
    NewMessage(MessagePayload),
    /// Full presence snapshot; replaces any previous list.
    OnlineUsers(Vec<String>),
}

/// Client-facing message shape, shared with the listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessagePayload {
    pub name: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl From<&Message> for MessagePayload {
    fn from(message: &Message) -> Self {
        Self {
            name: message.author.display_name().to_string(),
            message: message.body.clone(),
            timestamp: message.created_at,
        }
    }
}

/// Events sent by clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    /// Names this connection for the presence list.
    Join { username: String },
}
