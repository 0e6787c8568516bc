//! Transport and terminal fetch errors.

use thiserror::Error;

/// Failure of a single GET attempt. Always retryable.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Curl reported an error (timeout, connection, DNS, etc.).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// Response completed with a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// The blocking task running the request panicked or was cancelled.
    #[error("request task failed: {0}")]
    Task(String),
}

/// Terminal outcome of a retried GET.
///
/// Callers treat `Exhausted` as "no data for this call" and carry on.
/// `Cancelled` means the owner stopped caring; it is not reported anywhere.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Every attempt allowed by the policy failed.
    #[error("GET {url} failed after {attempts} attempt(s): {last}")]
    Exhausted {
        url: String,
        attempts: u32,
        /// Error from the final attempt.
        #[source]
        last: TransportError,
    },
    /// The cancel token was set before the next attempt could go out.
    #[error("GET {url} cancelled after {attempts} attempt(s)")]
    Cancelled { url: String, attempts: u32 },
}

impl FetchError {
    /// Requests actually sent.
    pub fn attempts(&self) -> u32 {
        match self {
            FetchError::Exhausted { attempts, .. } | FetchError::Cancelled { attempts, .. } => {
                *attempts
            }
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, FetchError::Cancelled { .. })
    }
}
