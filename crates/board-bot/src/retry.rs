//! Bounded exponential-backoff retry for outbound HTTP
//!
//! A request is retried on network-level errors and on transient
//! statuses (5xx and 429). Any other status, success or not, is handed
//! back to the caller on the first attempt that produces it. The
//! backoff doubles per attempt with no jitter and no overall deadline
//! beyond the attempt budget.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;
use tracing::{debug, warn};

/// Retry schedule: `max_attempts` tries, sleeping
/// `initial_delay * 2^attempt` between them.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts,
            initial_delay,
        }
    }

    /// Delay scheduled after the given 0-based attempt.
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.initial_delay * 2u32.saturating_pow(attempt)
    }
}

/// Terminal retry failure: the attempt budget ran out.
#[derive(Debug, Error)]
pub enum RetryError {
    #[error("retry budget exhausted after {attempts} attempts (last status: {last_status:?})")]
    Exhausted {
        attempts: u32,
        /// Last transient status observed, if the final attempt got a
        /// response at all.
        last_status: Option<StatusCode>,
        #[source]
        source: Option<reqwest::Error>,
    },
}

/// Whether a status is worth retrying.
fn is_transient(status: StatusCode) -> bool {
    status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
}

/// Send a request with retries per the given policy.
///
/// `make_request` is called once per attempt to build a fresh request.
/// The first response with a non-transient status (including client
/// errors like 404) is returned as `Ok`; the caller decides what a
/// non-success status means.
///
/// # Errors
/// Returns [`RetryError::Exhausted`] when every attempt failed with a
/// network error or a transient status.
pub async fn send_with_retry<F>(
    policy: &RetryPolicy,
    mut make_request: F,
) -> Result<reqwest::Response, RetryError>
where
    F: FnMut() -> reqwest::RequestBuilder,
{
    let mut last_status: Option<StatusCode> = None;
    let mut last_error: Option<reqwest::Error> = None;

    for attempt in 0..policy.max_attempts {
        match make_request().send().await {
            Ok(response) => {
                let status = response.status();
                if !is_transient(status) {
                    return Ok(response);
                }
                debug!(attempt, %status, "transient upstream status");
                last_status = Some(status);
                last_error = None;
            }
            Err(e) => {
                debug!(attempt, error = %e, "request failed");
                last_status = None;
                last_error = Some(e);
            }
        }

        // No sleep after the final attempt.
        if attempt + 1 < policy.max_attempts {
            tokio::time::sleep(policy.delay_for(attempt)).await;
        }
    }

    warn!(
        attempts = policy.max_attempts,
        last_status = ?last_status,
        "retry budget exhausted"
    );
    Err(RetryError::Exhausted {
        attempts: policy.max_attempts,
        last_status,
        source: last_error,
    })
}
