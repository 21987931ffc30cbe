//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use board_bot::{BotResponder, RetryPolicy};
use board_common::{AppConfig, AppError, JwtService};
use board_core::{MessageRepository, UserRepository};
use board_db::{
    create_pool, MemMessageRepository, MemUserRepository, PgMessageRepository, PgUserRepository,
};
use board_gateway::{Broadcaster, PresenceRegistry};
use board_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let router = create_router();
    let router = apply_middleware(router);
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    // Presence registry and broadcaster are shared between the
    // WebSocket handler and the message service.
    let registry = PresenceRegistry::new_shared();
    let broadcaster = Broadcaster::new(registry.clone());

    // Create JWT service
    let jwt_service = Arc::new(JwtService::new(&config.jwt.secret, config.jwt.token_expiry));

    // Create bot responder
    let responder = Arc::new(BotResponder::new(
        &config.bot.api_url,
        &config.bot.api_key,
        RetryPolicy::new(
            config.bot.max_attempts,
            Duration::from_millis(config.bot.initial_delay_ms),
        ),
    ));

    // Create repositories; without a database URL, fall back to
    // process-local in-memory storage.
    let (user_repo, message_repo): (Arc<dyn UserRepository>, Arc<dyn MessageRepository>) =
        match &config.database.url {
            Some(url) => {
                info!("Connecting to PostgreSQL...");
                let db_config = board_db::DatabaseConfig::new(url, config.database.max_connections);
                let pool = create_pool(&db_config)
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                info!("PostgreSQL connection established");
                (
                    Arc::new(PgUserRepository::new(pool.clone())),
                    Arc::new(PgMessageRepository::new(pool)),
                )
            }
            None => {
                warn!("DATABASE_URL not set; using in-memory storage");
                (
                    Arc::new(MemUserRepository::new()),
                    Arc::new(MemMessageRepository::new()),
                )
            }
        };

    // Build service context
    let service_context = ServiceContextBuilder::new()
        .user_repo(user_repo)
        .message_repo(message_repo)
        .jwt_service(jwt_service)
        .broadcaster(broadcaster)
        .responder(responder)
        .bot_trigger(config.bot.trigger.clone())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config, registry))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: &str) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.server.address();

    // Create app state
    let state = create_app_state(config).await?;

    // Build application
    let app = create_app(state);

    // Run server
    run_server(app, &addr).await
}
