//! API integration tests
//!
//! The server runs with in-memory storage, so no external services are
//! needed. Bot tests point the responder at a mock upstream.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use board_service::{LoginResponse, MessageResponse, RegisterResponse};
use integration_tests::{
    assert_json, assert_status, register_and_login, test_config_with_bot, wait_for_messages,
    ErrorBody, LoginRequest, MockUpstream, RegisterRequest, SubmitRequest, TestServer,
    TEST_PASSWORD,
};
use reqwest::StatusCode;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_user() {
    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    let response = server.post("/api/register", &request).await.unwrap();
    let registered: RegisterResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(registered.username, request.username);
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::named("alice");

    // First registration
    server.post("/api/register", &request).await.unwrap();

    // Second registration with the same username
    let response = server.post("/api/register", &request).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "USERNAME_TAKEN");
}

#[tokio::test]
async fn test_register_rejects_empty_username() {
    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::named("");

    let response = server.post("/api/register", &request).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_login() {
    let server = TestServer::start().await.expect("Failed to start server");

    // Register first
    let register_req = RegisterRequest::named("alice");
    server.post("/api/register", &register_req).await.unwrap();

    // Login
    let login_req = LoginRequest::from_register(&register_req);
    let response = server.post("/api/login", &login_req).await.unwrap();
    let login: LoginResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(login.username, "alice");
    assert!(!login.token.is_empty());
}

#[tokio::test]
async fn test_login_failures_share_one_shape() {
    let server = TestServer::start().await.expect("Failed to start server");
    server
        .post("/api/register", &RegisterRequest::named("alice"))
        .await
        .unwrap();

    // Unknown username
    let response = server
        .post("/api/login", &LoginRequest::with("mallory", TEST_PASSWORD))
        .await
        .unwrap();
    let unknown_user: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();

    // Wrong password for an existing user
    let response = server
        .post("/api/login", &LoginRequest::with("alice", "not-the-password"))
        .await
        .unwrap();
    let wrong_password: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();

    // The two failures must be indistinguishable.
    assert_eq!(unknown_user.error.code, wrong_password.error.code);
    assert_eq!(unknown_user.error.message, wrong_password.error.message);
}

// ============================================================================
// Message Tests
// ============================================================================

#[tokio::test]
async fn test_submit_requires_token() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/api/submit", &SubmitRequest::new("hello"))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    // Nothing was persisted.
    let response = server.get("/api/messages").await.unwrap();
    let listed: Vec<MessageResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn test_submit_rejects_invalid_token() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post_auth("/api/submit", "not-a-token", &SubmitRequest::new("hello"))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_submit_and_list_newest_first() {
    let server = TestServer::start().await.expect("Failed to start server");
    let token = register_and_login(&server, "alice").await.unwrap();

    let response = server
        .post_auth("/api/submit", &token, &SubmitRequest::new("m1"))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth("/api/submit", &token, &SubmitRequest::new("m2"))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server.get("/api/messages").await.unwrap();
    let listed: Vec<MessageResponse> = assert_json(response, StatusCode::OK).await.unwrap();

    let bodies: Vec<&str> = listed.iter().map(|m| m.message.as_str()).collect();
    assert_eq!(bodies, vec!["m2", "m1"]);
    assert!(listed.iter().all(|m| m.name == "alice"));
}

#[tokio::test]
async fn test_blank_message_rejected() {
    let server = TestServer::start().await.expect("Failed to start server");
    let token = register_and_login(&server, "alice").await.unwrap();

    // Empty body fails request validation.
    let response = server
        .post_auth("/api/submit", &token, &SubmitRequest::new(""))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    // Whitespace-only body fails in the service.
    let response = server
        .post_auth("/api/submit", &token, &SubmitRequest::new("   "))
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "EMPTY_MESSAGE_BODY");
}

#[tokio::test]
async fn test_get_single_message() {
    let server = TestServer::start().await.expect("Failed to start server");
    let token = register_and_login(&server, "alice").await.unwrap();

    server
        .post_auth("/api/submit", &token, &SubmitRequest::new("hello"))
        .await
        .unwrap();

    // In-memory ids start at 1 on a fresh server.
    let response = server.get("/api/message/1").await.unwrap();
    let message: MessageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(message.name, "alice");
    assert_eq!(message.message, "hello");
}

#[tokio::test]
async fn test_get_missing_message() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/message/999").await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(body.error.code, "UNKNOWN_MESSAGE");
}

// ============================================================================
// Bot Responder Tests
// ============================================================================

#[tokio::test]
async fn test_bot_reply_uses_upstream_text() {
    let upstream = MockUpstream::start(0, 500, "Hello from the model")
        .await
        .unwrap();
    let server = TestServer::start_with_config(test_config_with_bot(&upstream.url(), 3))
        .await
        .expect("Failed to start server");
    let token = register_and_login(&server, "alice").await.unwrap();

    server
        .post_auth("/api/submit", &token, &SubmitRequest::new("@bot hello"))
        .await
        .unwrap();

    let listed = wait_for_messages(&server, 2).await.unwrap();
    assert_eq!(listed[0].name, "bot");
    assert_eq!(listed[0].message, "Hello from the model");
    assert_eq!(upstream.call_count(), 1);
}

#[tokio::test]
async fn test_bot_retries_transient_failures() {
    // Two 500s, then success; well within five attempts.
    let upstream = MockUpstream::start(2, 500, "Recovered").await.unwrap();
    let server = TestServer::start_with_config(test_config_with_bot(&upstream.url(), 5))
        .await
        .expect("Failed to start server");
    let token = register_and_login(&server, "alice").await.unwrap();

    server
        .post_auth("/api/submit", &token, &SubmitRequest::new("@bot hello"))
        .await
        .unwrap();

    let listed = wait_for_messages(&server, 2).await.unwrap();
    assert_eq!(listed[0].message, "Recovered");
    assert_eq!(upstream.call_count(), 3);
}

#[tokio::test]
async fn test_bot_does_not_retry_client_errors() {
    // A 404 is not transient; a single attempt must be made.
    let upstream = MockUpstream::start(usize::MAX, 404, "unused").await.unwrap();
    let server = TestServer::start_with_config(test_config_with_bot(&upstream.url(), 5))
        .await
        .expect("Failed to start server");
    let token = register_and_login(&server, "alice").await.unwrap();

    server
        .post_auth("/api/submit", &token, &SubmitRequest::new("@bot hello"))
        .await
        .unwrap();

    let listed = wait_for_messages(&server, 2).await.unwrap();
    assert_eq!(listed[0].message, board_bot::FALLBACK_REPLY);
    assert_eq!(upstream.call_count(), 1);
}

#[tokio::test]
async fn test_bot_falls_back_when_unreachable() {
    let server = TestServer::start().await.expect("Failed to start server");
    let token = register_and_login(&server, "alice").await.unwrap();

    server
        .post_auth("/api/submit", &token, &SubmitRequest::new("@bot hello"))
        .await
        .unwrap();

    let listed = wait_for_messages(&server, 2).await.unwrap();
    assert_eq!(listed[0].name, "bot");
    assert_eq!(listed[0].message, board_bot::FALLBACK_REPLY);
}

#[tokio::test]
async fn test_untriggered_message_gets_no_bot_reply() {
    let server = TestServer::start().await.expect("Failed to start server");
    let token = register_and_login(&server, "alice").await.unwrap();

    server
        .post_auth("/api/submit", &token, &SubmitRequest::new("hello"))
        .await
        .unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    let response = server.get("/api/messages").await.unwrap();
    let listed: Vec<MessageResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(listed.len(), 1);
}
