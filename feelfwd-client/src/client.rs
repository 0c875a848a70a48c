//! Typed endpoint façade.

use std::sync::Arc;
use std::time::Duration;

use feelfwd_core::{
    FactorsRequest, FactorsResponse, HealthResponse, PreferencesRequest, Reaction, SaveResponse,
    ScenariosRequest, ScenariosResponse, SummaryRequest, SummaryResponse,
};
use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use crate::endpoint::Endpoint;
use crate::error::{ApiError, ClientError};
use crate::executor::RequestExecutor;
use crate::health::HealthCache;
use crate::report::{ErrorReporter, TracingReporter};
use crate::retry::RetryPolicy;
use crate::settings::{ClientSettings, DEFAULT_BASE_URL};

// ============================================================================
// API Client
// ============================================================================

/// Client for the Feel Forward API.
///
/// One named method per backend capability. Every method except
/// [`health_check`](Self::health_check) propagates the classified
/// [`ApiError`]; the caller decides what to show instead.
///
/// Construct one per application and share it with `Arc<ApiClient>`.
/// Separate instances keep separate health caches.
pub struct ApiClient {
    executor: RequestExecutor,
    health: Arc<HealthCache>,
    health_check_interval: Duration,
}

impl ApiClient {
    /// Creates a client for `base_url` with default settings.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    /// Returns a builder.
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::new()
    }

    /// Checks whether the API is reachable.
    ///
    /// Any 2xx JSON response means online, whatever its body says. A
    /// healthy result is cached for the health check interval; while
    /// fresh, no request is made. Never fails: any error is recorded as
    /// unhealthy and reported as offline.
    #[instrument(skip(self), fields(base_url = %self.executor.base_url()))]
    pub async fn health_check(&self) -> HealthResponse {
        if self.health.is_healthy_and_fresh(self.health_check_interval) {
            debug!("Using cached health");
            return HealthResponse::online();
        }

        match self.executor.execute(Endpoint::Health, None).await {
            Ok(_) => {
                self.health.record_check(true);
                debug!("Health check completed");
                HealthResponse::online()
            }
            Err(e) => {
                self.health.record_check(false);
                debug!(kind = %e.kind(), "Health check failed");
                HealthResponse::offline()
            }
        }
    }

    /// Phase 0: suggested decision factors for a topic.
    #[instrument(skip_all, fields(topic = %request.topic))]
    pub async fn get_factors(&self, request: &FactorsRequest) -> Result<FactorsResponse, ApiError> {
        self.executor
            .execute_json(Endpoint::Factors, Some(request))
            .await
    }

    /// Phase 1: stores rated preferences.
    #[instrument(skip_all, fields(topic = %request.topic, count = request.preferences.len()))]
    pub async fn save_preferences(
        &self,
        request: &PreferencesRequest,
    ) -> Result<SaveResponse, ApiError> {
        self.executor
            .execute_json(Endpoint::Preferences, Some(request))
            .await
    }

    /// Phase 2: generates scenarios from preferences.
    #[instrument(skip_all, fields(topic = %request.topic))]
    pub async fn generate_scenarios(
        &self,
        request: &ScenariosRequest,
    ) -> Result<ScenariosResponse, ApiError> {
        self.executor
            .execute_json(Endpoint::Scenarios, Some(request))
            .await
    }

    /// Phase 3: stores one reaction to a scenario.
    #[instrument(skip_all, fields(scenario_id = %reaction.scenario_id))]
    pub async fn save_reaction(&self, reaction: &Reaction) -> Result<SaveResponse, ApiError> {
        self.executor
            .execute_json(Endpoint::Reactions, Some(reaction))
            .await
    }

    /// Phase 4: synthesizes a summary of the session.
    #[instrument(skip_all, fields(reactions = request.reactions.len()))]
    pub async fn generate_summary(
        &self,
        request: &SummaryRequest,
    ) -> Result<SummaryResponse, ApiError> {
        self.executor
            .execute_json(Endpoint::Summary, Some(request))
            .await
    }

    /// Last known health. Advisory only.
    pub fn is_api_healthy(&self) -> bool {
        self.health.is_healthy()
    }

    /// The shared health cache.
    pub fn health(&self) -> &HealthCache {
        &self.health
    }

    /// Base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.executor.base_url()
    }

    /// The underlying executor.
    pub fn executor(&self) -> &RequestExecutor {
        &self.executor
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("executor", &self.executor)
            .field("health_check_interval", &self.health_check_interval)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`ApiClient`].
pub struct ApiClientBuilder {
    base_url: String,
    settings: ClientSettings,
    reporter: Option<Arc<dyn ErrorReporter>>,
}

impl ApiClientBuilder {
    /// Creates a builder pointing at the production API.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            settings: ClientSettings::default(),
            reporter: None,
        }
    }

    /// Sets the API base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Replaces all settings.
    pub fn settings(mut self, settings: ClientSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Sets the per-attempt timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.settings.timeout = timeout;
        self
    }

    /// Sets the retry policy.
    pub fn retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.settings.retry = retry;
        self
    }

    /// Sets how long a healthy check is trusted.
    pub fn health_check_interval(mut self, interval: Duration) -> Self {
        self.settings.health_check_interval = interval;
        self
    }

    /// Sets the failure reporter. Defaults to [`TracingReporter`].
    pub fn reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    /// Sets the user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.settings.user_agent = user_agent.into();
        self
    }

    /// Validates the base URL and builds the client.
    pub fn build(self) -> Result<ApiClient, ClientError> {
        let base_url = normalize_base_url(&self.base_url)?;

        let http = Client::builder()
            .user_agent(self.settings.user_agent.as_str())
            .build()?;

        let health = Arc::new(HealthCache::new());
        let reporter = self
            .reporter
            .unwrap_or_else(|| Arc::new(TracingReporter));

        let executor = RequestExecutor::new(
            http,
            base_url,
            self.settings.timeout,
            self.settings.retry,
            reporter,
            Arc::clone(&health),
        );

        Ok(ApiClient {
            executor,
            health,
            health_check_interval: self.settings.health_check_interval,
        })
    }
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses `raw` as an http(s) URL and strips trailing slashes.
fn normalize_base_url(raw: &str) -> Result<String, ClientError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ClientError::InvalidBaseUrl("empty".to_string()));
    }

    let parsed = Url::parse(trimmed)
        .map_err(|e| ClientError::InvalidBaseUrl(format!("{trimmed}: {e}")))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ClientError::InvalidBaseUrl(format!(
            "{trimmed}: unsupported scheme '{}'",
            parsed.scheme()
        )));
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}
