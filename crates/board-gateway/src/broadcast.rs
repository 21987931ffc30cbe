//! Message broadcast
//!
//! Thin fan-out facade over the presence registry, handed to the
//! service layer so it never touches connections directly. Delivery is
//! best-effort: a slow or closed connection is skipped, and history is
//! served by the listing endpoint, not replayed here.

use std::sync::Arc;

use board_core::Message;

use crate::events::{MessagePayload, ServerEvent};
use crate::registry::PresenceRegistry;

/// Broadcasts board events to every connected client.
#[derive(Clone, Debug)]
pub struct Broadcaster {
    registry: Arc<PresenceRegistry>,
}

impl Broadcaster {
    pub fn new(registry: Arc<PresenceRegistry>) -> Self {
        Self { registry }
    }

    /// Announce a durably recorded message. Returns the number of
    /// connections that accepted the event.
    pub fn message_created(&self, message: &Message) -> usize {
        let event = ServerEvent::NewMessage(MessagePayload::from(message));
        let sent = self.registry.broadcast(&event);
        tracing::debug!(message_id = message.id, sent, "message broadcast");
        sent
    }
}
