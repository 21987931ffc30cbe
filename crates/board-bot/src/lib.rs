//! # board-bot
//!
//! Bot responder: builds a `generateContent`-shaped request for the
//! configured upstream endpoint and sends it through a bounded
//! exponential-backoff retry wrapper. The responder always yields a
//! displayable string; upstream failures degrade to a fixed apology.

pub mod responder;
pub mod retry;

pub use responder::{extract_prompt, BotResponder, FALLBACK_REPLY};
pub use retry::{send_with_retry, RetryError, RetryPolicy};
