//! Service context - dependency container for services
//!
//! Holds the repositories, JWT service, broadcaster, and bot responder
//! needed by services.

use std::sync::Arc;

use board_bot::BotResponder;
use board_common::auth::JwtService;
use board_core::{MessageRepository, UserRepository};
use board_gateway::Broadcaster;

/// Service context containing all dependencies
///
/// The repositories are trait objects: PostgreSQL-backed in normal
/// operation, in-memory when no database is configured.
#[derive(Clone)]
pub struct ServiceContext {
    user_repo: Arc<dyn UserRepository>,
    message_repo: Arc<dyn MessageRepository>,
    jwt_service: Arc<JwtService>,
    broadcaster: Broadcaster,
    responder: Arc<BotResponder>,
    bot_trigger: String,
}

impl ServiceContext {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        message_repo: Arc<dyn MessageRepository>,
        jwt_service: Arc<JwtService>,
        broadcaster: Broadcaster,
        responder: Arc<BotResponder>,
        bot_trigger: String,
    ) -> Self {
        Self {
            user_repo,
            message_repo,
            jwt_service,
            broadcaster,
            responder,
            bot_trigger,
        }
    }

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the message repository
    pub fn message_repo(&self) -> &dyn MessageRepository {
        self.message_repo.as_ref()
    }

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get the message broadcaster
    pub fn broadcaster(&self) -> &Broadcaster {
        &self.broadcaster
    }

    /// Get the bot responder
    pub fn responder(&self) -> &BotResponder {
        self.responder.as_ref()
    }

    /// Get the bot trigger prefix
    pub fn bot_trigger(&self) -> &str {
        &self.bot_trigger
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("bot_trigger", &self.bot_trigger)
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    message_repo: Option<Arc<dyn MessageRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    broadcaster: Option<Broadcaster>,
    responder: Option<Arc<BotResponder>>,
    bot_trigger: Option<String>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            user_repo: None,
            message_repo: None,
            jwt_service: None,
            broadcaster: None,
            responder: None,
            bot_trigger: None,
        }
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn message_repo(mut self, repo: Arc<dyn MessageRepository>) -> Self {
        self.message_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn broadcaster(mut self, broadcaster: Broadcaster) -> Self {
        self.broadcaster = Some(broadcaster);
        self
    }

    pub fn responder(mut self, responder: Arc<BotResponder>) -> Self {
        self.responder = Some(responder);
        self
    }

    pub fn bot_trigger(mut self, trigger: impl Into<String>) -> Self {
        self.bot_trigger = Some(trigger.into());
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.user_repo
                .ok_or_else(|| super::error::ServiceError::validation("user_repo is required"))?,
            self.message_repo
                .ok_or_else(|| super::error::ServiceError::validation("message_repo is required"))?,
            self.jwt_service
                .ok_or_else(|| super::error::ServiceError::validation("jwt_service is required"))?,
            self.broadcaster
                .ok_or_else(|| super::error::ServiceError::validation("broadcaster is required"))?,
            self.responder
                .ok_or_else(|| super::error::ServiceError::validation("responder is required"))?,
            self.bot_trigger
                .ok_or_else(|| super::error::ServiceError::validation("bot_trigger is required"))?,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
