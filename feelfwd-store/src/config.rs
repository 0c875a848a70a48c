//! Application configuration.
//!
//! Read from `config.json` in the config directory, then overridden by
//! `FEELFWD_*` environment variables. Missing fields take defaults.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::StoreError;
use crate::persistence::{default_config_path, load_json, save_json};

/// Overrides `api_url`.
pub const ENV_API_URL: &str = "FEELFWD_API_URL";
/// Overrides `environment` (`development` or `production`).
pub const ENV_ENVIRONMENT: &str = "FEELFWD_ENVIRONMENT";
/// Overrides `enable_logging` (`true` enables).
pub const ENV_ENABLE_LOGGING: &str = "FEELFWD_ENABLE_LOGGING";

/// Deployment environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development.
    Development,
    /// Production.
    #[default]
    Production,
}

impl Environment {
    /// Parses `development` or `production`, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }

    /// Returns the lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// API base URL.
    pub api_url: String,
    /// Display name.
    pub app_name: String,
    /// Version string shown in diagnostics.
    pub app_version: String,
    /// Deployment environment.
    pub environment: Environment,
    /// Whether to log the effective configuration at startup.
    pub enable_logging: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: feelfwd_client::DEFAULT_BASE_URL.to_string(),
            app_name: "Feel Forward Flow".to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            environment: Environment::Production,
            enable_logging: false,
        }
    }
}

impl AppConfig {
    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        default_config_path()
    }

    /// Loads from the default path and applies environment overrides.
    pub async fn load() -> Result<Self, StoreError> {
        let mut config = Self::load_from(&Self::default_path()).await?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        if config.enable_logging {
            info!(
                api_url = %config.api_url,
                environment = %config.environment,
                version = %config.app_version,
                "Loaded configuration"
            );
        }
        Ok(config)
    }

    /// Loads from `path`, or defaults if the file does not exist.
    pub async fn load_from(path: &Path) -> Result<Self, StoreError> {
        match load_json(path).await {
            Ok(config) => {
                debug!(path = %path.display(), "Loaded config file");
                Ok(config)
            }
            Err(e) if e.is_not_found() => {
                debug!(path = %path.display(), "Config file not found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Saves to `path`.
    pub async fn save_to(&self, path: &Path) -> Result<(), StoreError> {
        save_json(path, self).await
    }

    /// Applies overrides from `lookup`, usually the process environment.
    ///
    /// Empty values are ignored. An unknown environment name is ignored
    /// with a warning.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(ENV_API_URL) {
            self.api_url = url.trim().to_string();
        }

        if let Some(env) = get(ENV_ENVIRONMENT) {
            match Environment::parse(&env) {
                Some(parsed) => self.environment = parsed,
                None => warn!(value = %env, "Ignoring unknown {ENV_ENVIRONMENT}"),
            }
        }

        if let Some(flag) = get(ENV_ENABLE_LOGGING) {
            self.enable_logging = flag.trim() == "true";
        }
    }

    /// Checks that `api_url` is a usable http(s) URL.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.api_url.trim().is_empty() {
            return Err(StoreError::Config("api_url is required".to_string()));
        }

        let url = Url::parse(self.api_url.trim())
            .map_err(|e| StoreError::Config(format!("invalid api_url '{}': {e}", self.api_url)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(StoreError::Config(format!(
                "api_url must be http or https, got '{}'",
                url.scheme()
            )));
        }
        Ok(())
    }

    /// True in development.
    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    /// True in production.
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}
