//! Request executor: one logical request, many attempts.
//!
//! Each attempt gets its own deadline. Failures are classified once into an
//! [`ApiError`], reported, and either retried after a backoff delay or
//! returned. Only the final outcome reaches the caller.

use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::endpoint::{Endpoint, Method};
use crate::error::ApiError;
use crate::health::HealthCache;
use crate::report::{Action, ErrorContext, ErrorReporter};
use crate::retry::RetryPolicy;

/// Body text used when a failed response has none.
const UNKNOWN_ERROR_BODY: &str = "Unknown error";

/// Performs requests against a fixed base URL with retry and backoff.
#[derive(Clone)]
pub struct RequestExecutor {
    http: Client,
    base_url: String,
    timeout: Duration,
    retry: RetryPolicy,
    reporter: Arc<dyn ErrorReporter>,
    health: Arc<HealthCache>,
}

impl RequestExecutor {
    /// Creates an executor. `base_url` must not end with `/`.
    pub fn new(
        http: Client,
        base_url: impl Into<String>,
        timeout: Duration,
        retry: RetryPolicy,
        reporter: Arc<dyn ErrorReporter>,
        health: Arc<HealthCache>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            timeout,
            retry,
            reporter,
            health,
        }
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Per-attempt deadline.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Retry policy in effect.
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Shared health flag.
    pub fn health(&self) -> &Arc<HealthCache> {
        &self.health
    }

    /// Full URL for an endpoint.
    pub fn url_for(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    /// Executes `endpoint` and returns the parsed JSON body.
    ///
    /// `body` is sent only for POST endpoints; a POST without a body sends
    /// `{}`. GET requests never carry a body.
    pub async fn execute(&self, endpoint: Endpoint, body: Option<&Value>) -> Result<Value, ApiError> {
        self.run(endpoint, body).await.map(|(value, _)| value)
    }

    /// The retry loop. On success, also returns the attempt that succeeded.
    async fn run(&self, endpoint: Endpoint, body: Option<&Value>) -> Result<(Value, u32), ApiError> {
        let empty = Value::Object(serde_json::Map::new());
        let body = match endpoint.method() {
            Method::Get => None,
            Method::Post => Some(body.unwrap_or(&empty)),
        };

        let mut attempt: u32 = 0;
        loop {
            debug!(
                endpoint = %endpoint,
                attempt,
                max_attempts = self.retry.max_attempts(),
                "Sending request"
            );

            let error = match self.send_once(endpoint, body).await {
                Ok(value) => {
                    self.health.mark_success();
                    debug!(endpoint = %endpoint, attempt, "Request succeeded");
                    return Ok((value, attempt));
                }
                Err(e) => e,
            };

            if matches!(error, ApiError::Network { .. }) {
                self.health.mark_failure();
            }

            if self.retry.should_retry(&error, attempt) {
                let delay = self.retry.delay_for_attempt(attempt);
                let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
                let context = ErrorContext::new(endpoint, Action::for_failure(&error, true), attempt)
                    .with("delay_ms", delay_ms)
                    .with("next_attempt", attempt + 1);
                self.reporter.report(&error, &context);

                if endpoint.is_idempotent() {
                    warn!(
                        endpoint = %endpoint,
                        kind = %error.kind(),
                        attempt,
                        delay_ms,
                        "Request failed, retrying"
                    );
                } else {
                    warn!(
                        endpoint = %endpoint,
                        kind = %error.kind(),
                        attempt,
                        delay_ms,
                        "Retrying non-idempotent request, the server may apply it twice"
                    );
                }

                tokio::time::sleep(delay).await;
                attempt += 1;
                continue;
            }

            let mut context = ErrorContext::new(endpoint, Action::for_failure(&error, false), attempt);
            if error.is_retryable() {
                context = context.with("final_attempt", true);
            }
            if let Some(status) = error.status() {
                context = context.with("status", status);
            }
            self.reporter.report(&error, &context);
            return Err(error);
        }
    }

    /// Executes `endpoint` with a typed body and decodes a typed response.
    ///
    /// A 2xx body that does not match `T` is a `generic` failure and is not
    /// retried.
    pub async fn execute_json<B, T>(&self, endpoint: Endpoint, body: Option<&B>) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = body
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| ApiError::generic(format!("Invalid request body: {e}")))?;

        let (value, attempt) = self.run(endpoint, body.as_ref()).await?;

        serde_json::from_value(value).map_err(|e| {
            let error = ApiError::generic(format!("Invalid response from {}: {e}", endpoint.path()));
            let context = ErrorContext::new(endpoint, Action::UnexpectedError, attempt);
            self.reporter.report(&error, &context);
            error
        })
    }

    /// One attempt: send, classify, parse.
    async fn send_once(&self, endpoint: Endpoint, body: Option<&Value>) -> Result<Value, ApiError> {
        let mut request = self
            .http
            .request(endpoint.method().to_reqwest(), self.url_for(endpoint))
            .timeout(self.timeout);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::from_transport(&e, self.timeout))?;

        let status = response.status();
        debug!(endpoint = %endpoint, status = %status, "Response received");

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let text = if text.is_empty() {
                UNKNOWN_ERROR_BODY.to_string()
            } else {
                text
            };
            return Err(ApiError::from_status(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
                text,
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::from_transport(&e, self.timeout))?;

        serde_json::from_slice(&bytes)
            .map_err(|e| ApiError::generic(format!("Invalid response from {}: {e}", endpoint.path())))
    }
}

impl std::fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}
