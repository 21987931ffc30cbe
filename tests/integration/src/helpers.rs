//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers, making HTTP requests,
//! and running a mock bot upstream.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU16, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{extract::State, response::IntoResponse, routing::post, Json, Router};
use board_api::{create_app, create_app_state};
use board_common::{
    AppConfig, AppSettings, BotConfig, DatabaseConfig, Environment, JwtConfig, ServerConfig,
};
use board_service::MessageResponse;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Counter for unique test ports
static PORT_COUNTER: AtomicU16 = AtomicU16::new(19000);

/// Get a unique port for testing
pub fn get_test_port() -> u16 {
    PORT_COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a test server with in-memory storage and an unreachable
    /// bot upstream
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config()).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let port = get_test_port();
        let addr = SocketAddr::from(([127, 0, 0, 1], port));

        // Create app state
        let state = create_app_state(config).await?;

        // Build application
        let app = create_app(state);

        // Bind to port
        let listener = TcpListener::bind(addr).await?;
        let actual_addr = listener.local_addr()?;

        // Spawn server task
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        // Create HTTP client
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr: actual_addr,
            client,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).json(body).send().await?)
    }

    /// Make a POST request with auth token
    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {token}"))
            .json(body)
            .send()
            .await?)
    }
}

/// Create a test configuration
///
/// Storage is in-memory and the bot upstream points at an unreachable
/// port, so triggered replies degrade to the fallback quickly.
pub fn test_config() -> AppConfig {
    AppConfig {
        app: AppSettings {
            name: "msgboard-test".to_string(),
            env: Environment::Development,
        },
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: None,
            max_connections: 5,
        },
        jwt: JwtConfig {
            secret: "integration-test-secret-key".to_string(),
            token_expiry: 3600,
        },
        bot: BotConfig {
            api_url: "http://127.0.0.1:9/generate".to_string(),
            api_key: String::new(),
            trigger: "@bot".to_string(),
            max_attempts: 1,
            initial_delay_ms: 1,
        },
    }
}

/// Test configuration pointed at a specific bot upstream
pub fn test_config_with_bot(api_url: &str, max_attempts: u32) -> AppConfig {
    let mut config = test_config();
    config.bot.api_url = api_url.to_string();
    config.bot.max_attempts = max_attempts;
    config
}

/// Mock bot upstream that fails a fixed number of times before
/// answering with a `generateContent`-shaped body.
pub struct MockUpstream {
    pub addr: SocketAddr,
    calls: Arc<AtomicUsize>,
    _handle: JoinHandle<()>,
}

#[derive(Clone)]
struct UpstreamBehavior {
    calls: Arc<AtomicUsize>,
    failures: usize,
    failure_status: StatusCode,
    reply: String,
}

impl MockUpstream {
    /// Start the mock; the first `failures` requests get
    /// `failure_status`, later ones get a JSON body carrying `reply`.
    pub async fn start(failures: usize, failure_status: u16, reply: &str) -> Result<Self> {
        let calls = Arc::new(AtomicUsize::new(0));
        let behavior = UpstreamBehavior {
            calls: calls.clone(),
            failures,
            failure_status: StatusCode::from_u16(failure_status)?,
            reply: reply.to_string(),
        };

        let app = Router::new()
            .route("/generate", post(generate))
            .with_state(behavior);

        let port = get_test_port();
        let addr = SocketAddr::from(([127, 0, 0, 1], port));
        let listener = TcpListener::bind(addr).await?;
        let actual_addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self {
            addr: actual_addr,
            calls,
            _handle: handle,
        })
    }

    /// Endpoint URL for the generate route
    pub fn url(&self) -> String {
        format!("http://{}/generate", self.addr)
    }

    /// Number of requests received so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

async fn generate(State(behavior): State<UpstreamBehavior>) -> axum::response::Response {
    let n = behavior.calls.fetch_add(1, Ordering::SeqCst);
    if n < behavior.failures {
        behavior.failure_status.into_response()
    } else {
        Json(serde_json::json!({
            "candidates": [
                {"content": {"parts": [{"text": behavior.reply}]}}
            ]
        }))
        .into_response()
    }
}

/// Poll the listing endpoint until at least `count` messages are
/// present
pub async fn wait_for_messages(server: &TestServer, count: usize) -> Result<Vec<MessageResponse>> {
    for _ in 0..100 {
        let response = server.get("/api/messages").await?;
        let listed: Vec<MessageResponse> = response.json().await?;
        if listed.len() >= count {
            return Ok(listed);
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    anyhow::bail!("timed out waiting for {count} messages")
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}
