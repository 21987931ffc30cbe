//! Request fixtures and wire-shape types for integration tests

use std::sync::atomic::{AtomicU32, Ordering};

use anyhow::Result;
use board_service::LoginResponse;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::helpers::{assert_json, TestServer};

/// Counter for unique usernames
static USER_COUNTER: AtomicU32 = AtomicU32::new(0);

/// Password shared by all fixture users
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Registration request body
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

impl RegisterRequest {
    /// Create a request with a unique username
    pub fn unique() -> Self {
        let n = USER_COUNTER.fetch_add(1, Ordering::SeqCst);
        Self::named(&format!("user{n}"))
    }

    /// Create a request for a specific username
    pub fn named(username: &str) -> Self {
        Self {
            username: username.to_string(),
            password: TEST_PASSWORD.to_string(),
        }
    }
}

/// Login request body
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    /// Login matching a registration fixture
    pub fn from_register(request: &RegisterRequest) -> Self {
        Self {
            username: request.username.clone(),
            password: request.password.clone(),
        }
    }

    /// Login with an arbitrary username and password
    pub fn with(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }
}

/// Message submission body
#[derive(Debug, Clone, Serialize)]
pub struct SubmitRequest {
    pub message: String,
}

impl SubmitRequest {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Error response body shape
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Error detail carried under `error`
#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

/// Register a user and log in, returning the session token
pub async fn register_and_login(server: &TestServer, username: &str) -> Result<String> {
    let request = RegisterRequest::named(username);
    let response = server.post("/api/register", &request).await?;
    assert_json::<board_service::RegisterResponse>(response, StatusCode::CREATED).await?;

    let response = server
        .post("/api/login", &LoginRequest::from_register(&request))
        .await?;
    let login: LoginResponse = assert_json(response, StatusCode::OK).await?;
    Ok(login.token)
}
