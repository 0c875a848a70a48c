//! Retry policy: which failures are retried, and how long to wait.

use rand::Rng;
use std::time::Duration;

use crate::error::ApiError;

/// Default number of retries after the first attempt.
pub const MAX_RETRIES: u32 = 3;

/// Default base delay for exponential backoff.
pub const BASE_DELAY: Duration = Duration::from_millis(1000);

/// Upper bound on any single backoff delay.
pub const MAX_DELAY: Duration = Duration::from_millis(10_000);

/// Upper bound (exclusive) on the random jitter added to each delay.
pub const MAX_JITTER: Duration = Duration::from_millis(1000);

/// Strategy for retrying failed requests.
///
/// The delay before retry `n` (0-based) is
/// `min(base_delay * 2^n + jitter, max_delay)` with `jitter` drawn
/// uniformly from `[0, max_jitter)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries allowed after the first attempt.
    pub max_retries: u32,
    /// Base delay between retries.
    pub base_delay: Duration,
    /// Maximum delay between retries.
    pub max_delay: Duration,
    /// Maximum random jitter added to each delay.
    pub max_jitter: Duration,
}

impl RetryPolicy {
    /// Creates a policy with the given retry count and default delays.
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            base_delay: BASE_DELAY,
            max_delay: MAX_DELAY,
            max_jitter: MAX_JITTER,
        }
    }

    /// Disables retries.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            max_jitter: Duration::ZERO,
        }
    }

    /// Sets the base delay.
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Sets the delay cap.
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Sets the jitter bound. `Duration::ZERO` makes delays deterministic.
    pub fn with_jitter(mut self, jitter: Duration) -> Self {
        self.max_jitter = jitter;
        self
    }

    /// Total attempts a persistently failing request will make.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// The exponential part of the delay for `attempt`, before jitter and cap.
    pub fn backoff_for_attempt(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.base_delay.saturating_mul(factor)
    }

    /// Calculates the delay to sleep before retrying after `attempt` failed.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let jitter = if self.max_jitter.is_zero() {
            Duration::ZERO
        } else {
            let bound = u64::try_from(self.max_jitter.as_micros()).unwrap_or(u64::MAX);
            if bound == 0 {
                Duration::ZERO
            } else {
                Duration::from_micros(rand::thread_rng().gen_range(0..bound))
            }
        };

        self.backoff_for_attempt(attempt)
            .saturating_add(jitter)
            .min(self.max_delay)
    }

    /// Determines whether a failure on `attempt` (0-based) should be retried.
    pub fn should_retry(&self, error: &ApiError, attempt: u32) -> bool {
        error.is_retryable() && attempt < self.max_retries
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(MAX_RETRIES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponential_backoff() {
        let policy = RetryPolicy::default();

        assert_eq!(policy.backoff_for_attempt(0), Duration::from_secs(1));
        assert_eq!(policy.backoff_for_attempt(1), Duration::from_secs(2));
        assert_eq!(policy.backoff_for_attempt(2), Duration::from_secs(4));
        assert_eq!(policy.backoff_for_attempt(3), Duration::from_secs(8));
    }

    #[test]
    fn test_delay_bounds_hold_with_jitter() {
        let policy = RetryPolicy::default();

        for attempt in 0..8 {
            for _ in 0..200 {
                let delay = policy.delay_for_attempt(attempt);
                let floor = policy.backoff_for_attempt(attempt).min(MAX_DELAY);
                assert!(delay <= MAX_DELAY, "attempt {attempt}: {delay:?}");
                assert!(delay >= floor, "attempt {attempt}: {delay:?} < {floor:?}");
                assert!(
                    delay < policy.backoff_for_attempt(attempt) + MAX_JITTER,
                    "jitter must stay below 1s"
                );
            }
        }
    }

    #[test]
    fn test_sub_millisecond_jitter() {
        let policy = RetryPolicy::default().with_jitter(Duration::from_micros(500));

        for _ in 0..200 {
            let delay = policy.delay_for_attempt(0);
            assert!(delay >= BASE_DELAY);
            assert!(delay < BASE_DELAY + Duration::from_micros(500));
        }

        let tiny = RetryPolicy::default().with_jitter(Duration::from_nanos(10));
        assert_eq!(tiny.delay_for_attempt(0), BASE_DELAY);
    }

    #[test]
    fn test_max_delay_cap() {
        let policy = RetryPolicy::default().with_jitter(Duration::ZERO);

        assert_eq!(policy.delay_for_attempt(4), MAX_DELAY);
        assert_eq!(policy.delay_for_attempt(40), MAX_DELAY);
    }

    #[test]
    fn test_should_retry_respects_budget() {
        let policy = RetryPolicy::default();
        let err = ApiError::from_status(503, "Service Unavailable", "");

        assert!(policy.should_retry(&err, 0));
        assert!(policy.should_retry(&err, 2));
        assert!(!policy.should_retry(&err, 3));
        assert_eq!(policy.max_attempts(), 4);
    }

    #[test]
    fn test_should_not_retry_client_errors() {
        let policy = RetryPolicy::default();

        for status in [400, 401, 403, 404, 418] {
            let err = ApiError::from_status(status, "", "");
            assert!(!policy.should_retry(&err, 0), "status {status}");
        }
        let timeout = ApiError::Timeout {
            after: Duration::from_secs(10),
        };
        assert!(!policy.should_retry(&timeout, 0));
    }

    #[test]
    fn test_no_retry() {
        let policy = RetryPolicy::no_retry();
        let err = ApiError::Network {
            detail: "refused".to_string(),
        };

        assert!(!policy.should_retry(&err, 0));
        assert_eq!(policy.delay_for_attempt(0), Duration::ZERO);
    }
}
