//! Cooperative cancellation for resolution sessions.
//!
//! A session holds one token; the orchestrator sets it when the user changes
//! and the resolution checks it between steps, as does the retry loop before
//! each attempt. An HTTP call already in flight is not interrupted; its result
//! is dropped once the token is seen.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared cancel flag. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let token = CancelToken::new();
        let seen_by_task = token.clone();
        assert!(!seen_by_task.is_cancelled());
        token.cancel();
        assert!(seen_by_task.is_cancelled());
        token.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn independent_tokens_do_not_interfere() {
        let a = CancelToken::new();
        let b = CancelToken::new();
        a.cancel();
        assert!(!b.is_cancelled());
    }
}
