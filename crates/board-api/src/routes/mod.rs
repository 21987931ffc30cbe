//! Route definitions
//!
//! HTTP endpoints mounted under /api, plus /health and the WebSocket
//! upgrade at /ws.

use axum::{
    routing::{get, post},
    Router,
};
use board_gateway::ws_handler;

use crate::handlers::{auth, health, messages};
use crate::state::AppState;

/// Create the main router with all routes
pub fn create_router() -> Router<AppState> {
    Router::new()
        .nest("/api", api_routes())
        .route("/health", get(health::health_check))
        .route("/ws", get(ws_handler))
}

/// API routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/submit", post(messages::submit))
        .route("/messages", get(messages::list))
        .route("/message/:id", get(messages::get_message))
}
