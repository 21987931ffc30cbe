//! WebSocket gateway integration tests
//!
//! Covers the presence protocol (initial snapshot, join, disconnect)
//! and message broadcast to connected clients.
//!
//! Run with: cargo test -p integration-tests --test gateway_tests

use std::collections::BTreeSet;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use integration_tests::{register_and_login, SubmitRequest, TestServer};
use tokio::net::TcpStream;
use tokio_tungstenite::{connect_async, tungstenite::Message as WsMessage, MaybeTlsStream, WebSocketStream};

type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn connect(server: &TestServer) -> WsClient {
    let url = format!("ws://{}/ws", server.addr);
    let (socket, _) = connect_async(&url).await.expect("WebSocket connect failed");
    socket
}

/// Read the next text event, skipping control frames
async fn next_event(socket: &mut WsClient) -> serde_json::Value {
    loop {
        let msg = tokio::time::timeout(Duration::from_secs(5), socket.next())
            .await
            .expect("timed out waiting for event")
            .expect("stream ended")
            .expect("WebSocket error");
        if let WsMessage::Text(text) = msg {
            return serde_json::from_str(&text).expect("invalid event JSON");
        }
    }
}

async fn send_join(socket: &mut WsClient, username: &str) {
    let event = serde_json::json!({"event": "join", "data": {"username": username}});
    socket
        .send(WsMessage::Text(event.to_string()))
        .await
        .expect("send failed");
}

/// Presence lists are unordered; compare as sets.
fn online_users(event: &serde_json::Value) -> BTreeSet<String> {
    assert_eq!(event["event"], "online_users", "unexpected event: {event}");
    event["data"]
        .as_array()
        .expect("data is not an array")
        .iter()
        .map(|v| v.as_str().expect("non-string name").to_string())
        .collect()
}

fn names(users: &[&str]) -> BTreeSet<String> {
    users.iter().map(|u| (*u).to_string()).collect()
}

#[tokio::test]
async fn test_initial_snapshot_is_empty() {
    let server = TestServer::start().await.expect("Failed to start server");

    let mut client = connect(&server).await;
    let event = next_event(&mut client).await;
    assert_eq!(online_users(&event), BTreeSet::new());
}

#[tokio::test]
async fn test_join_broadcasts_presence() {
    let server = TestServer::start().await.expect("Failed to start server");

    let mut alice = connect(&server).await;
    next_event(&mut alice).await; // initial snapshot

    send_join(&mut alice, "alice").await;
    let event = next_event(&mut alice).await;
    assert_eq!(online_users(&event), names(&["alice"]));

    // A later connection sees the current list right away.
    let mut bob = connect(&server).await;
    let event = next_event(&mut bob).await;
    assert_eq!(online_users(&event), names(&["alice"]));

    // Bob joining updates everyone.
    send_join(&mut bob, "bob").await;
    let event = next_event(&mut alice).await;
    assert_eq!(online_users(&event), names(&["alice", "bob"]));
    let event = next_event(&mut bob).await;
    assert_eq!(online_users(&event), names(&["alice", "bob"]));
}

#[tokio::test]
async fn test_disconnect_broadcasts_remaining() {
    let server = TestServer::start().await.expect("Failed to start server");

    let mut alice = connect(&server).await;
    next_event(&mut alice).await;
    send_join(&mut alice, "alice").await;
    next_event(&mut alice).await;

    let mut bob = connect(&server).await;
    next_event(&mut bob).await;
    send_join(&mut bob, "bob").await;
    next_event(&mut alice).await;
    next_event(&mut bob).await;

    // Alice leaves; Bob gets the updated list.
    alice.close(None).await.expect("close failed");
    let event = next_event(&mut bob).await;
    assert_eq!(online_users(&event), names(&["bob"]));
}

#[tokio::test]
async fn test_anonymous_disconnect_is_silent() {
    let server = TestServer::start().await.expect("Failed to start server");
    let token = register_and_login(&server, "alice").await.unwrap();

    let mut alice = connect(&server).await;
    next_event(&mut alice).await;
    send_join(&mut alice, "alice").await;
    next_event(&mut alice).await;

    // A connection that never joined disconnects without a broadcast.
    let mut lurker = connect(&server).await;
    next_event(&mut lurker).await;
    lurker.close(None).await.expect("close failed");

    // The next event Alice sees is the message broadcast, not a
    // presence update.
    server
        .post_auth("/api/submit", &token, &SubmitRequest::new("hello"))
        .await
        .unwrap();

    let event = next_event(&mut alice).await;
    assert_eq!(event["event"], "new_message");
    assert_eq!(event["data"]["name"], "alice");
    assert_eq!(event["data"]["message"], "hello");
}

#[tokio::test]
async fn test_new_message_broadcast() {
    let server = TestServer::start().await.expect("Failed to start server");
    let token = register_and_login(&server, "alice").await.unwrap();

    // Clients receive broadcasts whether or not they joined.
    let mut client = connect(&server).await;
    next_event(&mut client).await;

    server
        .post_auth("/api/submit", &token, &SubmitRequest::new("hello everyone"))
        .await
        .unwrap();

    let event = next_event(&mut client).await;
    assert_eq!(event["event"], "new_message");
    assert_eq!(event["data"]["name"], "alice");
    assert_eq!(event["data"]["message"], "hello everyone");
    assert!(event["data"]["timestamp"].is_string());
}

#[tokio::test]
async fn test_bot_reply_is_broadcast() {
    let server = TestServer::start().await.expect("Failed to start server");
    let token = register_and_login(&server, "alice").await.unwrap();

    let mut client = connect(&server).await;
    next_event(&mut client).await;

    server
        .post_auth("/api/submit", &token, &SubmitRequest::new("@bot hi"))
        .await
        .unwrap();

    // First the user's message, then the bot's reply.
    let event = next_event(&mut client).await;
    assert_eq!(event["event"], "new_message");
    assert_eq!(event["data"]["name"], "alice");

    let event = next_event(&mut client).await;
    assert_eq!(event["event"], "new_message");
    assert_eq!(event["data"]["name"], "bot");
    assert_eq!(event["data"]["message"], board_bot::FALLBACK_REPLY);
}
