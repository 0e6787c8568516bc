//! Retry loop: run an async request until success or the policy says stop.

use std::future::Future;

use super::error::{FetchError, TransportError};
use super::policy::{RetryDecision, RetryPolicy};
use crate::control::CancelToken;

/// Runs `attempt_fn` until it succeeds or the policy's attempt budget is spent.
///
/// Each failed attempt logs a warning; the terminal failure logs an error and
/// comes back as [`FetchError::Exhausted`] carrying the last transport error.
/// `cancel` is checked before every attempt, including after each backoff
/// sleep; once set, no further request is sent and the result is
/// [`FetchError::Cancelled`]. Nothing is kept from a failed attempt.
pub async fn run_with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    url: &str,
    cancel: &CancelToken,
    mut attempt_fn: F,
) -> Result<T, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, TransportError>>,
{
    let max_attempts = policy.attempts();
    let mut attempt = 1u32;
    loop {
        if cancel.is_cancelled() {
            let sent = attempt - 1;
            tracing::debug!(url, attempts = sent, "request cancelled");
            return Err(FetchError::Cancelled {
                url: url.to_string(),
                attempts: sent,
            });
        }
        let err = match attempt_fn().await {
            Ok(value) => return Ok(value),
            Err(e) => e,
        };
        match policy.decide(attempt) {
            RetryDecision::NoRetry => {
                tracing::warn!(url, attempt, max_attempts, error = %err, "request failed");
                tracing::error!(url, attempts = attempt, "request failed after retries");
                return Err(FetchError::Exhausted {
                    url: url.to_string(),
                    attempts: attempt,
                    last: err,
                });
            }
            RetryDecision::RetryAfter(delay) => {
                tracing::warn!(
                    url,
                    attempt,
                    max_attempts,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %err,
                    "request failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
