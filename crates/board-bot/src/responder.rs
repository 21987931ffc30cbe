//! Bot responder
//!
//! Sends a single-turn prompt to the configured generateContent-style
//! endpoint and extracts the first candidate's text. Every failure mode
//! (exhausted retries, terminal status, malformed or empty response)
//! degrades to [`FALLBACK_REPLY`] so callers always have something to
//! display.

use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::{instrument, warn};

use crate::retry::{send_with_retry, RetryError, RetryPolicy};

/// Reply used when the upstream call cannot produce one.
pub const FALLBACK_REPLY: &str = "Sorry, I can't answer that right now. Please try again later.";

#[derive(Debug, Error)]
enum BotError {
    #[error(transparent)]
    Retry(#[from] RetryError),

    #[error("upstream returned status {0}")]
    UpstreamStatus(reqwest::StatusCode),

    #[error("failed to read upstream response: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream response carried no usable text")]
    EmptyReply,
}

// generateContent response shape, reduced to the fields we read.

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// `candidates[0].content.parts[0].text`, if present and non-blank.
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
            .filter(|t| !t.trim().is_empty())
    }
}

/// Client for the upstream generative endpoint.
pub struct BotResponder {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    policy: RetryPolicy,
}

impl BotResponder {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>, policy: RetryPolicy) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into(),
            api_key: api_key.into(),
            policy,
        }
    }

    /// Produce a reply for the prompt.
    ///
    /// Always returns a non-empty displayable string; upstream failures
    /// are logged and replaced with [`FALLBACK_REPLY`].
    #[instrument(skip(self, prompt))]
    pub async fn reply(&self, prompt: &str) -> String {
        match self.request_reply(prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "bot reply failed, using fallback");
                FALLBACK_REPLY.to_string()
            }
        }
    }

    async fn request_reply(&self, prompt: &str) -> Result<String, BotError> {
        let payload = json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }]
        });

        let response = send_with_retry(&self.policy, || {
            self.client
                .post(&self.api_url)
                .header("x-goog-api-key", &self.api_key)
                .json(&payload)
        })
        .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BotError::UpstreamStatus(status));
        }

        let body: GenerateContentResponse = response.json().await?;
        body.first_text().ok_or(BotError::EmptyReply)
    }
}

impl std::fmt::Debug for BotResponder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotResponder")
            .field("api_url", &self.api_url)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

/// If the body starts with the trigger prefix, return the prompt
/// remainder (trimmed). A body that is only the trigger yields nothing.
pub fn extract_prompt<'a>(trigger: &str, body: &'a str) -> Option<&'a str> {
    let rest = body.strip_prefix(trigger)?;
    let prompt = rest.trim();
    if prompt.is_empty() {
        None
    } else {
        Some(prompt)
    }
}
