//! API health status.
//!
//! The health check is advisory: callers use it to decide whether a network
//! round-trip is worth attempting, never as a hard dependency.

use serde::{Deserialize, Serialize};

// ============================================================================
// Health Status
// ============================================================================

/// Online/offline indicator reported by the health check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    /// The API answered the last health check.
    Online,
    /// The API could not be reached or answered with an error.
    #[default]
    Offline,
}

impl HealthStatus {
    /// Returns a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Online => "Online",
            Self::Offline => "Offline",
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// Health Response
// ============================================================================

/// Result of a health check: `{status: "online"|"offline", healthy}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status indicator.
    pub status: HealthStatus,
    /// Whether the API is considered healthy.
    pub healthy: bool,
}

impl HealthResponse {
    /// The API is reachable.
    pub fn online() -> Self {
        Self {
            status: HealthStatus::Online,
            healthy: true,
        }
    }

    /// The API is unreachable or failing.
    pub fn offline() -> Self {
        Self {
            status: HealthStatus::Offline,
            healthy: false,
        }
    }
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self::offline()
    }
}
