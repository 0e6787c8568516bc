//! Retrying HTTP GET.
//!
//! [`Fetcher`] pairs a [`Transport`] (one GET attempt) with a [`RetryPolicy`]
//! and returns either the response body or a terminal [`FetchError`]. A set
//! [`CancelToken`] stops the retries before the next attempt.

mod curl_transport;

use std::future::Future;
use std::sync::Arc;

use crate::control::CancelToken;
use crate::retry::{run_with_retry, FetchError, RetryPolicy, TransportError};

pub use curl_transport::CurlTransport;

/// One idempotent GET attempt. A non-2xx status is an error.
pub trait Transport: Send + Sync + 'static {
    fn get(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, TransportError>> + Send;
}

/// Issues GETs through a transport, retrying with exponential backoff.
#[derive(Debug)]
pub struct Fetcher<T> {
    transport: Arc<T>,
    policy: RetryPolicy,
}

impl<T> Clone for Fetcher<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            policy: self.policy,
        }
    }
}

impl<T: Transport> Fetcher<T> {
    pub fn new(transport: Arc<T>, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// GET `url`, returning the body of the first successful attempt.
    pub async fn fetch(&self, url: &str, cancel: &CancelToken) -> Result<Vec<u8>, FetchError> {
        tracing::debug!(url, "GET");
        run_with_retry(&self.policy, url, cancel, || self.transport.get(url)).await
    }
}
