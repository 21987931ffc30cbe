//! Presence registry
//!
//! Owns every live connection and the connection id to display name
//! mapping. After each presence mutation (join, disconnect of a joined
//! connection) the full name snapshot is broadcast as an
//! `online_users` event; clients replace their list wholesale.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::mpsc;

use crate::connection::{Connection, ConnectionId};
use crate::events::ServerEvent;

/// Registry of live WebSocket connections.
///
/// An entry never outlives its connection: the handler removes it
/// before the socket task exits.
pub struct PresenceRegistry {
    connections: DashMap<ConnectionId, Arc<Connection>>,
}

impl PresenceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
        }
    }

    /// Create a new registry wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Register a new, still-anonymous connection.
    pub fn register(&self, sender: mpsc::Sender<ServerEvent>) -> Arc<Connection> {
        let connection = Connection::new(sender);
        self.connections.insert(connection.id(), connection.clone());

        tracing::debug!(connection_id = %connection.id(), "connection registered");
        connection
    }

    /// Name a connection and broadcast the updated presence snapshot.
    ///
    /// Returns false if the connection is no longer registered.
    pub fn join(&self, id: ConnectionId, username: &str) -> bool {
        let Some(connection) = self.connections.get(&id).map(|r| r.clone()) else {
            return false;
        };
        connection.set_name(username.to_string());

        tracing::info!(connection_id = %id, username = %username, "user joined");
        self.broadcast_presence();
        true
    }

    /// Drop a connection. Broadcasts a presence snapshot only when the
    /// connection had joined; anonymous connections never appeared in
    /// the list.
    pub fn remove(&self, id: ConnectionId) {
        if let Some((_, connection)) = self.connections.remove(&id) {
            tracing::debug!(connection_id = %id, "connection removed");
            if connection.has_joined() {
                self.broadcast_presence();
            }
        }
    }

    /// Names of all joined connections, in registry order (unordered
    /// as far as clients are concerned).
    pub fn online_users(&self) -> Vec<String> {
        self.connections
            .iter()
            .filter_map(|entry| entry.name())
            .collect()
    }

    /// Send an event to every connection, best-effort.
    ///
    /// Returns how many connections accepted the event.
    pub fn broadcast(&self, event: &ServerEvent) -> usize {
        let mut sent = 0;
        for entry in self.connections.iter() {
            if entry.try_send(event.clone()) {
                sent += 1;
            }
        }
        sent
    }

    fn broadcast_presence(&self) {
        let snapshot = self.online_users();
        let sent = self.broadcast(&ServerEvent::OnlineUsers(snapshot));
        tracing::trace!(sent, "presence snapshot broadcast");
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}

impl Default for PresenceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PresenceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresenceRegistry")
            .field("connections", &self.connections.len())
            .finish()
    }
}
