//! Cached API health state.

use chrono::{DateTime, Utc};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
struct HealthState {
    healthy: bool,
    last_check: Option<Instant>,
    checked_at: Option<DateTime<Utc>>,
}

/// Shared record of whether the API last looked reachable.
///
/// Written by the executor after every attempt and by the health check.
/// Starts unhealthy with no recorded check, so the first health check
/// always goes to the network.
#[derive(Debug, Default)]
pub struct HealthCache {
    state: Mutex<HealthState>,
}

impl HealthCache {
    /// Creates an unhealthy cache with no recorded check.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HealthState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Last known health.
    pub fn is_healthy(&self) -> bool {
        self.lock().healthy
    }

    /// True if the last health check happened less than `interval` ago.
    pub fn is_fresh(&self, interval: Duration) -> bool {
        self.lock()
            .last_check
            .is_some_and(|at| at.elapsed() < interval)
    }

    /// True if the API is healthy and that was confirmed within `interval`.
    pub fn is_healthy_and_fresh(&self, interval: Duration) -> bool {
        let state = self.lock();
        state.healthy && state.last_check.is_some_and(|at| at.elapsed() < interval)
    }

    /// A request succeeded.
    pub fn mark_success(&self) {
        self.lock().healthy = true;
    }

    /// A request failed at the network level.
    pub fn mark_failure(&self) {
        self.lock().healthy = false;
    }

    /// Records the outcome of a health check and stamps the check time.
    pub fn record_check(&self, healthy: bool) {
        let mut state = self.lock();
        state.healthy = healthy;
        state.last_check = Some(Instant::now());
        state.checked_at = Some(Utc::now());
    }

    /// Wall-clock time of the last health check.
    pub fn checked_at(&self) -> Option<DateTime<Utc>> {
        self.lock().checked_at
    }

    /// Last health check as epoch milliseconds, 0 if never checked.
    pub fn checked_at_epoch_ms(&self) -> i64 {
        self.checked_at().map_or(0, |t| t.timestamp_millis())
    }
}
