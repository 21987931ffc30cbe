//! Integration test utilities for the message board server
//!
//! This crate provides helpers for running end-to-end tests against
//! the HTTP API and the WebSocket gateway, with a mock upstream for
//! the bot responder.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
