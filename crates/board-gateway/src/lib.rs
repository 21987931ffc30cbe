//! # board-gateway
//!
//! Realtime layer: WebSocket handler, per-connection senders, the
//! presence registry, and event broadcast. One registry instance is
//! shared across the process; there is no cross-instance fan-out.

pub mod broadcast;
pub mod connection;
pub mod events;
pub mod handler;
pub mod registry;

// Re-export commonly used types
pub use broadcast::Broadcaster;
pub use connection::{Connection, ConnectionId};
pub use events::{ClientEvent, MessagePayload, ServerEvent};
pub use handler::ws_handler;
pub use registry::PresenceRegistry;
