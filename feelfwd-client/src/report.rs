//! Failure reporting.
//!
//! The executor reports every failure, retried or final, to an
//! [`ErrorReporter`] together with an [`ErrorContext`] describing where in
//! the retry timeline it happened. Reporters are synchronous and infallible:
//! they cannot block or change a retry decision.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use tracing::warn;

use crate::endpoint::Endpoint;
use crate::error::{ApiError, ErrorKind};

/// Component name recorded for failures raised by the client.
pub const CLIENT_COMPONENT: &str = "ApiClient";

// ============================================================================
// Action
// ============================================================================

/// What happened at the point a failure was reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// 429, another attempt is scheduled.
    RateLimitRetry,
    /// 429 on the last attempt.
    RateLimitExceeded,
    /// 5xx, another attempt is scheduled.
    ServerErrorRetry,
    /// 5xx on the last attempt.
    ServerErrorFinal,
    /// Transport failure, another attempt is scheduled.
    NetworkErrorRetry,
    /// Transport failure on the last attempt.
    NetworkErrorFinal,
    /// Non-retryable HTTP status.
    ClientError,
    /// Per-attempt deadline elapsed.
    RequestTimeout,
    /// Anything else, e.g. an unparseable body.
    UnexpectedError,
    /// A caller substituted local content after a failure.
    FallbackUsed,
}

impl Action {
    /// Picks the action for a failure, given whether it will be retried.
    pub fn for_failure(error: &ApiError, retrying: bool) -> Self {
        match (error.kind(), retrying) {
            (ErrorKind::RateLimit, true) => Self::RateLimitRetry,
            (ErrorKind::RateLimit, false) => Self::RateLimitExceeded,
            (ErrorKind::Server, true) => Self::ServerErrorRetry,
            (ErrorKind::Server, false) => Self::ServerErrorFinal,
            (ErrorKind::Network, true) => Self::NetworkErrorRetry,
            (ErrorKind::Network, false) => Self::NetworkErrorFinal,
            (ErrorKind::Timeout, _) => Self::RequestTimeout,
            (ErrorKind::Generic, _) if error.status().is_none() => Self::UnexpectedError,
            _ => Self::ClientError,
        }
    }

    /// Returns the snake_case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RateLimitRetry => "rate_limit_retry",
            Self::RateLimitExceeded => "rate_limit_exceeded",
            Self::ServerErrorRetry => "server_error_retry",
            Self::ServerErrorFinal => "server_error_final",
            Self::NetworkErrorRetry => "network_error_retry",
            Self::NetworkErrorFinal => "network_error_final",
            Self::ClientError => "client_error",
            Self::RequestTimeout => "request_timeout",
            Self::UnexpectedError => "unexpected_error",
            Self::FallbackUsed => "fallback_used",
        }
    }

    /// True for actions that schedule another attempt.
    pub fn is_retry(&self) -> bool {
        matches!(
            self,
            Self::RateLimitRetry | Self::ServerErrorRetry | Self::NetworkErrorRetry
        )
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Error Context
// ============================================================================

/// Where and when a failure happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Reporting component, e.g. `ApiClient`.
    pub component: String,
    /// What happened.
    pub action: Action,
    /// Operation name, e.g. `get_factors`.
    pub operation: String,
    /// Endpoint path, e.g. `/phase0/factors`.
    pub endpoint: String,
    /// 0-based attempt number that failed.
    pub attempt: u32,
    /// Free-form extras: `delay_ms`, `next_attempt`, `final_attempt`, ...
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl ErrorContext {
    /// Context for a failure of `endpoint` on `attempt`.
    pub fn new(endpoint: Endpoint, action: Action, attempt: u32) -> Self {
        Self {
            component: CLIENT_COMPONENT.to_string(),
            action,
            operation: endpoint.operation().to_string(),
            endpoint: endpoint.path().to_string(),
            attempt,
            metadata: Map::new(),
        }
    }

    /// Overrides the component name.
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = component.into();
        self
    }

    /// Adds a metadata entry.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }
}

// ============================================================================
// Reporters
// ============================================================================

/// Receives classified failures for diagnostics.
///
/// Implementations must not panic and should return quickly.
pub trait ErrorReporter: Send + Sync {
    /// Records one failure.
    fn report(&self, error: &ApiError, context: &ErrorContext);
}

/// Reports failures as `tracing` warnings. The default reporter.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, error: &ApiError, context: &ErrorContext) {
        let metadata = Value::Object(context.metadata.clone());
        warn!(
            component = %context.component,
            action = %context.action,
            operation = %context.operation,
            endpoint = %context.endpoint,
            attempt = context.attempt,
            kind = %error.kind(),
            status = ?error.status(),
            metadata = %metadata,
            detail = %error.detail(),
            "{error}"
        );
    }
}

/// Discards every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl ErrorReporter for NoopReporter {
    fn report(&self, _error: &ApiError, _context: &ErrorContext) {}
}

/// Forwards each report to several reporters, in order.
#[derive(Clone, Default)]
pub struct ReporterChain {
    reporters: Vec<Arc<dyn ErrorReporter>>,
}

impl ReporterChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a reporter.
    pub fn with(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.reporters.push(reporter);
        self
    }

    /// Number of reporters in the chain.
    pub fn len(&self) -> usize {
        self.reporters.len()
    }

    /// Returns true if the chain has no reporters.
    pub fn is_empty(&self) -> bool {
        self.reporters.is_empty()
    }
}

impl ErrorReporter for ReporterChain {
    fn report(&self, error: &ApiError, context: &ErrorContext) {
        for reporter in &self.reporters {
            reporter.report(error, context);
        }
    }
}

impl fmt::Debug for ReporterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReporterChain")
            .field("len", &self.reporters.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct Recording(Mutex<Vec<Action>>);

    impl ErrorReporter for Recording {
        fn report(&self, _error: &ApiError, context: &ErrorContext) {
            self.0.lock().unwrap().push(context.action);
        }
    }

    #[test]
    fn test_action_for_failure() {
        let rate = ApiError::from_status(429, "", "");
        assert_eq!(Action::for_failure(&rate, true), Action::RateLimitRetry);
        assert_eq!(Action::for_failure(&rate, false), Action::RateLimitExceeded);

        let server = ApiError::from_status(502, "", "");
        assert_eq!(Action::for_failure(&server, false), Action::ServerErrorFinal);

        let timeout = ApiError::Timeout {
            after: Duration::from_secs(10),
        };
        assert_eq!(Action::for_failure(&timeout, false), Action::RequestTimeout);

        let not_found = ApiError::from_status(404, "", "");
        assert_eq!(Action::for_failure(&not_found, false), Action::ClientError);

        let teapot = ApiError::from_status(418, "", "");
        assert_eq!(Action::for_failure(&teapot, false), Action::ClientError);

        let parse = ApiError::generic("bad json");
        assert_eq!(Action::for_failure(&parse, false), Action::UnexpectedError);
    }

    #[test]
    fn test_context_metadata() {
        let ctx = ErrorContext::new(Endpoint::Factors, Action::ServerErrorRetry, 1)
            .with("delay_ms", 2300)
            .with("next_attempt", 2);

        assert_eq!(ctx.component, CLIENT_COMPONENT);
        assert_eq!(ctx.operation, "get_factors");
        assert_eq!(ctx.endpoint, "/phase0/factors");
        assert_eq!(ctx.metadata["delay_ms"], 2300);

        let json = serde_json::to_value(&ctx).unwrap();
        assert_eq!(json["action"], "server_error_retry");
    }

    #[test]
    fn test_chain_forwards_to_all() {
        let a = Arc::new(Recording::default());
        let b = Arc::new(Recording::default());
        let chain = ReporterChain::new().with(a.clone()).with(b.clone());

        let err = ApiError::generic("x");
        chain.report(&err, &ErrorContext::new(Endpoint::Summary, Action::UnexpectedError, 0));

        assert_eq!(chain.len(), 2);
        assert_eq!(a.0.lock().unwrap().len(), 1);
        assert_eq!(b.0.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_tracing_reporter_with_metadata() {
        let error = ApiError::from_status(503, "Service Unavailable", "down".to_string());
        let ctx = ErrorContext::new(Endpoint::Scenarios, Action::ServerErrorRetry, 0)
            .with("delay_ms", 1000u64)
            .with("next_attempt", 1u32);

        TracingReporter.report(&error, &ctx);
        ReporterChain::new()
            .with(Arc::new(TracingReporter))
            .report(&error, &ctx);
    }
}
