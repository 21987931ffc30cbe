//! WebSocket handler
//!
//! Upgrades the socket, registers the connection, and runs paired
//! receive/send tasks until either side closes.

use axum::{
    extract::{ws::Message, ws::WebSocket, State, WebSocketUpgrade},
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::events::{ClientEvent, ServerEvent};
use crate::registry::PresenceRegistry;

/// Channel buffer size for outgoing events
const EVENT_BUFFER_SIZE: usize = 100;

/// WebSocket upgrade handler
pub async fn ws_handler(
    State(registry): State<Arc<PresenceRegistry>>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(registry, socket))
}

/// Drive an upgraded WebSocket connection
async fn handle_socket(registry: Arc<PresenceRegistry>, socket: WebSocket) {
    let (tx, mut rx) = mpsc::channel::<ServerEvent>(EVENT_BUFFER_SIZE);
    let connection = registry.register(tx);
    let connection_id = connection.id();

    tracing::info!(connection_id = %connection_id, "WebSocket connection established");

    // New clients get the current presence list right away.
    connection.try_send(ServerEvent::OnlineUsers(registry.online_users()));

    let (mut ws_sink, mut ws_stream) = socket.split();

    let registry_recv = registry.clone();
    let recv_task = tokio::spawn(async move {
        while let Some(msg) = ws_stream.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    handle_text_message(&registry_recv, connection_id, &text);
                }
                Ok(Message::Close(_)) => {
                    tracing::debug!(connection_id = %connection_id, "client closed connection");
                    return;
                }
                Ok(_) => {
                    // Binary frames and ping/pong carry no client events.
                }
                Err(e) => {
                    tracing::warn!(connection_id = %connection_id, error = %e, "WebSocket error");
                    return;
                }
            }
        }
    });

    let send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match serde_json::to_string(&event) {
                Ok(json) => {
                    if ws_sink.send(Message::Text(json)).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!(connection_id = %connection_id, error = %e, "event serialization failed");
                }
            }
        }

        let _ = ws_sink.close().await;
    });

    // Whichever task finishes first, the connection is done.
    tokio::select! {
        _ = recv_task => {}
        _ = send_task => {}
    }

    registry.remove(connection_id);
    tracing::info!(connection_id = %connection_id, "WebSocket connection closed");
}

/// Parse and apply one client event
fn handle_text_message(
    registry: &PresenceRegistry,
    connection_id: crate::connection::ConnectionId,
    text: &str,
) {
    match serde_json::from_str::<ClientEvent>(text) {
        Ok(ClientEvent::Join { username }) => {
            registry.join(connection_id, &username);
        }
        Err(e) => {
            // Unknown events are ignored rather than fatal.
            tracing::debug!(connection_id = %connection_id, error = %e, "unparseable client event");
        }
    }
}
