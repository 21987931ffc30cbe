//! Individual WebSocket connection
//!
//! A connection is registered as soon as the socket upgrades and stays
//! anonymous until the client sends a `join` event naming it.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::events::ServerEvent;

/// Unique id assigned to each live connection.
pub type ConnectionId = Uuid;

/// A single WebSocket connection.
pub struct Connection {
    id: ConnectionId,

    /// Display name, set by the `join` event.
    name: RwLock<Option<String>>,

    /// Channel to the connection's send task.
    sender: mpsc::Sender<ServerEvent>,
}

impl Connection {
    pub fn new(sender: mpsc::Sender<ServerEvent>) -> Arc<Self> {
        Arc::new(Self {
            id: Uuid::new_v4(),
            name: RwLock::new(None),
            sender,
        })
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Display name, if the connection has joined.
    pub fn name(&self) -> Option<String> {
        self.name.read().clone()
    }

    pub fn set_name(&self, name: String) {
        *self.name.write() = Some(name);
    }

    pub fn has_joined(&self) -> bool {
        self.name.read().is_some()
    }

    /// Best-effort send. A full or closed channel drops the event for
    /// this connection only.
    pub fn try_send(&self, event: ServerEvent) -> bool {
        self.sender.try_send(event).is_ok()
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("name", &*self.name.read())
            .finish_non_exhaustive()
    }
}
