use std::time::Duration;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Give up; the failure is terminal.
    NoRetry,
    /// Retry after the given delay.
    RetryAfter(Duration),
}

/// Pure exponential backoff bounded by attempt count only.
///
/// The delay before attempt `k + 1` is `initial_delay * 2^(k - 1)`. There is
/// no jitter and no cap on the delay itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first). Zero is treated as one.
    pub max_attempts: u32,
    /// Delay after the first failed attempt.
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(500),
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

    /// Effective attempt budget; at least one request is always made.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Backoff to wait after failed attempt `attempt` (1-based).
    ///
    /// Saturates at `Duration::MAX` once the doubled value no longer fits.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        if self.initial_delay.is_zero() {
            return Duration::ZERO;
        }
        1u128
            .checked_shl(attempt.saturating_sub(1))
            .and_then(|factor| self.initial_delay.as_nanos().checked_mul(factor))
            .and_then(duration_from_nanos)
            .unwrap_or(Duration::MAX)
    }

    /// Decide what to do after attempt `attempt` (1-based) failed.
    pub fn decide(&self, attempt: u32) -> RetryDecision {
        if attempt >= self.attempts() {
            return RetryDecision::NoRetry;
        }
        RetryDecision::RetryAfter(self.delay_for(attempt))
    }
}

fn duration_from_nanos(nanos: u128) -> Option<Duration> {
    let secs = u64::try_from(nanos / NANOS_PER_SEC).ok()?;
    let subsec = u32::try_from(nanos % NANOS_PER_SEC).ok()?;
    Some(Duration::new(secs, subsec))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_doubles_without_cap() {
        let p = RetryPolicy::new(40, Duration::from_millis(500));
        assert_eq!(p.delay_for(1), Duration::from_millis(500));
        assert_eq!(p.delay_for(2), Duration::from_secs(1));
        assert_eq!(p.delay_for(3), Duration::from_secs(2));
        assert_eq!(p.delay_for(11), Duration::from_millis(500 * 1024));
    }

    #[test]
    fn respects_max_attempts() {
        let p = RetryPolicy::default();
        assert_eq!(
            p.decide(1),
            RetryDecision::RetryAfter(Duration::from_millis(500))
        );
        assert_eq!(p.decide(2), RetryDecision::RetryAfter(Duration::from_secs(1)));
        assert_eq!(p.decide(3), RetryDecision::NoRetry);
    }

    #[test]
    fn zero_attempts_means_one() {
        let p = RetryPolicy::new(0, Duration::from_millis(10));
        assert_eq!(p.attempts(), 1);
        assert_eq!(p.decide(1), RetryDecision::NoRetry);
    }

    #[test]
    fn huge_attempt_saturates() {
        let p = RetryPolicy::new(u32::MAX, Duration::from_secs(1));
        assert_eq!(p.delay_for(200), Duration::MAX);
    }

    #[test]
    fn keeps_doubling_past_u32_factor() {
        let p = RetryPolicy::new(u32::MAX, Duration::from_secs(1));
        assert_eq!(p.delay_for(32), Duration::from_secs(1 << 31));
        assert_eq!(p.delay_for(33), Duration::from_secs(1 << 32));
        assert_eq!(p.delay_for(34), Duration::from_secs(1 << 33));
        assert_eq!(p.delay_for(64), Duration::from_secs(1 << 63));
        assert_eq!(p.delay_for(65), Duration::MAX);
    }

    #[test]
    fn sub_second_delay_keeps_nanos() {
        let p = RetryPolicy::new(u32::MAX, Duration::from_nanos(1_500_000_001));
        assert_eq!(p.delay_for(2), Duration::from_nanos(3_000_000_002));
        assert_eq!(
            RetryPolicy::new(3, Duration::ZERO).delay_for(500),
            Duration::ZERO
        );
    }
}
