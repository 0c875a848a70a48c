//! Client settings: deadlines, retry policy and health caching.

use std::time::Duration;

use crate::retry::RetryPolicy;

/// Production API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.felfwd.app";

/// Per-attempt request deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// How long a successful health check is trusted.
pub const HEALTH_CHECK_INTERVAL: Duration = Duration::from_secs(30);

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("feelfwd/", env!("CARGO_PKG_VERSION"));

/// Tunables for an [`ApiClient`](crate::ApiClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    /// Deadline for each individual attempt.
    pub timeout: Duration,
    /// Retry and backoff policy.
    pub retry: RetryPolicy,
    /// Freshness window for cached health.
    pub health_check_interval: Duration,
    /// User agent header.
    pub user_agent: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
            health_check_interval: HEALTH_CHECK_INTERVAL,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl ClientSettings {
    /// Sets the per-attempt timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Sets the health freshness window.
    pub fn with_health_check_interval(mut self, interval: Duration) -> Self {
        self.health_check_interval = interval;
        self
    }
}
