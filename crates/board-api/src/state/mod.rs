//! Application state
//!
//! Holds the shared state for the Axum application including the
//! service context, configuration, and the presence registry.

use std::sync::Arc;

use axum::extract::FromRef;
use board_common::{AppConfig, JwtService};
use board_gateway::PresenceRegistry;
use board_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Service context containing all dependencies
    service_context: Arc<ServiceContext>,
    /// Application configuration
    config: Arc<AppConfig>,
    /// WebSocket presence registry
    registry: Arc<PresenceRegistry>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(
        service_context: ServiceContext,
        config: AppConfig,
        registry: Arc<PresenceRegistry>,
    ) -> Self {
        Self {
            service_context: Arc::new(service_context),
            config: Arc::new(config),
            registry,
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get the presence registry
    pub fn registry(&self) -> &Arc<PresenceRegistry> {
        &self.registry
    }

    /// Get the JWT service from the service context
    pub fn jwt_service(&self) -> &JwtService {
        self.service_context.jwt_service()
    }
}

// The WebSocket handler takes its state as Arc<PresenceRegistry>.
impl FromRef<AppState> for Arc<PresenceRegistry> {
    fn from_ref(state: &AppState) -> Self {
        state.registry.clone()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &self.service_context)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
