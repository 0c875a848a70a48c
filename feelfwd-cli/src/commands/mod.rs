//! CLI command implementations.

pub mod config;
pub mod errors;
pub mod factors;
pub mod health;
pub mod walk;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use feelfwd_client::{ApiClient, ReporterChain, TracingReporter};
use feelfwd_store::{AppConfig, ErrorLog, default_error_log_path};
use tracing::{debug, warn};

use crate::Cli;

/// What every networked command needs: config, client and error log.
pub struct Session {
    /// Effective configuration.
    pub config: AppConfig,
    /// Shared API client.
    pub client: Arc<ApiClient>,
    /// Error log, also wired in as the client's reporter.
    pub log: Arc<ErrorLog>,
    log_path: PathBuf,
}

impl Session {
    /// Loads config and the persisted error log, then builds the client.
    pub async fn open(cli: &Cli) -> Result<Self> {
        let mut config = AppConfig::load().await.context("loading configuration")?;
        if let Some(url) = &cli.api_url {
            config.api_url.clone_from(url);
            config.validate().context("validating --api-url")?;
        }

        let log_path = default_error_log_path();
        let log = match ErrorLog::load(&log_path).await {
            Ok(log) => Arc::new(log),
            Err(e) => {
                warn!(path = %log_path.display(), error = %e, "Ignoring unreadable error log");
                Arc::new(ErrorLog::new())
            }
        };

        let reporter = ReporterChain::new()
            .with(Arc::new(TracingReporter))
            .with(log.clone());

        let client = ApiClient::builder()
            .base_url(&config.api_url)
            .reporter(Arc::new(reporter))
            .build()?;

        debug!(api_url = %client.base_url(), "Session opened");

        Ok(Self {
            config,
            client: Arc::new(client),
            log,
            log_path,
        })
    }

    /// Writes the error log back to disk. Failures are logged, not returned.
    pub async fn close(self) {
        if self.log.is_empty() {
            return;
        }
        if let Err(e) = self.log.persist(&self.log_path).await {
            warn!(path = %self.log_path.display(), error = %e, "Failed to persist error log");
        }
    }
}
