//! Shared fixtures for service tests

use std::sync::Arc;
use std::time::Duration;

use board_bot::{BotResponder, RetryPolicy};
use board_common::auth::JwtService;
use board_db::{MemMessageRepository, MemUserRepository};
use board_gateway::{Broadcaster, PresenceRegistry};

use super::context::{ServiceContext, ServiceContextBuilder};

/// Context backed by in-memory repositories and a responder whose
/// upstream is unreachable (replies degrade to the fallback quickly).
pub(crate) fn test_context() -> ServiceContext {
    ServiceContextBuilder::new()
        .user_repo(Arc::new(MemUserRepository::new()))
        .message_repo(Arc::new(MemMessageRepository::new()))
        .jwt_service(Arc::new(JwtService::new(
            "test-secret-key-that-is-long-enough",
            3600,
        )))
        .broadcaster(Broadcaster::new(PresenceRegistry::new_shared()))
        .responder(Arc::new(BotResponder::new(
            "http://127.0.0.1:9/generate",
            "",
            RetryPolicy::new(1, Duration::from_millis(1)),
        )))
        .bot_trigger("@bot")
        .build()
        .expect("test context")
}
