//! The fixed set of API endpoints.
//!
//! Paths are never built from strings at call sites; every request names an
//! [`Endpoint`], which fixes both its method and its path.

use std::fmt;

/// HTTP method used by an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Bodyless read.
    Get,
    /// JSON body required.
    Post,
}

impl Method {
    /// Returns the method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }

    /// Converts to the reqwest method.
    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A backend capability exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `GET /health`
    Health,
    /// `POST /phase0/factors`
    Factors,
    /// `POST /phase1/preferences`
    Preferences,
    /// `POST /phase2/scenarios`
    Scenarios,
    /// `POST /phase3/reactions`
    Reactions,
    /// `POST /phase4/summary`
    Summary,
}

impl Endpoint {
    /// All endpoints, in flow order.
    pub const ALL: [Endpoint; 6] = [
        Self::Health,
        Self::Factors,
        Self::Preferences,
        Self::Scenarios,
        Self::Reactions,
        Self::Summary,
    ];

    /// Path relative to the API base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Health => "/health",
            Self::Factors => "/phase0/factors",
            Self::Preferences => "/phase1/preferences",
            Self::Scenarios => "/phase2/scenarios",
            Self::Reactions => "/phase3/reactions",
            Self::Summary => "/phase4/summary",
        }
    }

    /// HTTP method. Only the health check is a GET.
    pub fn method(&self) -> Method {
        match self {
            Self::Health => Method::Get,
            _ => Method::Post,
        }
    }

    /// Operation name used in logs and error context.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Health => "health_check",
            Self::Factors => "get_factors",
            Self::Preferences => "save_preferences",
            Self::Scenarios => "generate_scenarios",
            Self::Reactions => "save_reaction",
            Self::Summary => "generate_summary",
        }
    }

    /// Whether repeating the request is free of extra side effects.
    ///
    /// The save endpoints store data server-side; a retry after a lost
    /// response can store it twice.
    pub fn is_idempotent(&self) -> bool {
        !matches!(self, Self::Preferences | Self::Reactions)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}
