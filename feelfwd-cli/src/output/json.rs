//! JSON output formatting.

use anyhow::Result;
use feelfwd_core::{HealthResponse, HealthStatus};
use serde::Serialize;

/// JSON output for the health command.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthOutput<'a> {
    pub status: HealthStatus,
    pub healthy: bool,
    pub api_url: &'a str,
}

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats a health check result.
    pub fn format_health(&self, health: &HealthResponse, api_url: &str) -> Result<String> {
        self.format(&HealthOutput {
            status: health.status,
            healthy: health.healthy,
            api_url,
        })
    }
}
