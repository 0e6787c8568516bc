//! Retry and backoff policy.
//!
//! Every transport failure (curl error or non-2xx status) is retried with
//! pure exponential backoff until the attempt budget runs out. Parse errors
//! never reach this layer: a body that arrived is a success here.

mod error;
mod policy;
mod run;

pub use error::{FetchError, TransportError};
pub use policy::{RetryDecision, RetryPolicy};
pub use run::run_with_retry;
