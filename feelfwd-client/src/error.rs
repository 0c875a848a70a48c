//! Error taxonomy for API requests.
//!
//! Every failed request is classified exactly once, at the point it fails,
//! into an [`ApiError`]. Callers branch on [`ApiError::kind`] and show the
//! `Display` text to users; nothing downstream re-inspects status codes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Error Kind
// ============================================================================

/// Classification of a failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// No response within the per-attempt deadline.
    Timeout,
    /// The request could not reach the server at all.
    Network,
    /// HTTP 429.
    RateLimit,
    /// HTTP 5xx.
    Server,
    /// HTTP 400.
    Validation,
    /// HTTP 401.
    Authentication,
    /// HTTP 403.
    Authorization,
    /// HTTP 404.
    NotFound,
    /// Any other non-success status or unexpected failure.
    Generic,
}

impl ErrorKind {
    /// Returns the wire name, e.g. `rate_limit`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Network => "network",
            Self::RateLimit => "rate_limit",
            Self::Server => "server",
            Self::Validation => "validation",
            Self::Authentication => "authentication",
            Self::Authorization => "authorization",
            Self::NotFound => "not_found",
            Self::Generic => "generic",
        }
    }

    /// Whether failures of this kind are retried with backoff.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network | Self::RateLimit | Self::Server)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// API Error
// ============================================================================

/// A classified request failure.
///
/// The `Display` text is the user-facing message for the kind; `detail`
/// fields hold the server body or transport error for diagnostics.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// No response arrived before the deadline.
    #[error("Request timed out. Please check your connection and try again.")]
    Timeout {
        /// The per-attempt deadline that elapsed.
        after: Duration,
    },

    /// Connection refused, DNS failure, reset, and similar.
    #[error("Unable to connect to server. Please check your internet connection.")]
    Network {
        /// Underlying transport error.
        detail: String,
    },

    /// HTTP 429.
    #[error("Rate limit exceeded. Please try again in a moment.")]
    RateLimited {
        /// Response body, if any.
        detail: String,
    },

    /// HTTP 5xx.
    #[error("Server error. Please try again later.")]
    Server {
        /// Exact status code.
        status: u16,
        /// Response body, if any.
        detail: String,
    },

    /// HTTP 400.
    #[error("Invalid request. Please check your input and try again.")]
    Validation {
        /// Response body, if any.
        detail: String,
    },

    /// HTTP 401.
    #[error("Authentication required. Please sign in and try again.")]
    Authentication {
        /// Response body, if any.
        detail: String,
    },

    /// HTTP 403.
    #[error("Access denied. You don't have permission to perform this action.")]
    Authorization {
        /// Response body, if any.
        detail: String,
    },

    /// HTTP 404.
    #[error("Resource not found. The requested item may have been moved or deleted.")]
    NotFound {
        /// Response body, if any.
        detail: String,
    },

    /// Any other status, or a failure that is not an HTTP status at all.
    #[error("Request failed: {message}")]
    Generic {
        /// Status code when the failure was an HTTP response.
        status: Option<u16>,
        /// Description, e.g. `418 I'm a teapot`.
        message: String,
    },
}

impl ApiError {
    /// Classifies a non-success HTTP response.
    pub fn from_status(status: u16, status_text: &str, body: impl Into<String>) -> Self {
        let detail = body.into();
        match status {
            400 => Self::Validation { detail },
            401 => Self::Authentication { detail },
            403 => Self::Authorization { detail },
            404 => Self::NotFound { detail },
            429 => Self::RateLimited { detail },
            s if s >= 500 => Self::Server { status: s, detail },
            s => Self::Generic {
                status: Some(s),
                message: format!("{s} {status_text}").trim_end().to_string(),
            },
        }
    }

    /// Classifies a transport-level failure from reqwest.
    pub fn from_transport(err: &reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout { after: timeout }
        } else {
            Self::Network {
                detail: err.to_string(),
            }
        }
    }

    /// Creates a generic error with no HTTP status.
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            status: None,
            message: message.into(),
        }
    }

    /// Returns the classification.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::Network { .. } => ErrorKind::Network,
            Self::RateLimited { .. } => ErrorKind::RateLimit,
            Self::Server { .. } => ErrorKind::Server,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Authentication { .. } => ErrorKind::Authentication,
            Self::Authorization { .. } => ErrorKind::Authorization,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Generic { .. } => ErrorKind::Generic,
        }
    }

    /// Returns the HTTP status that caused this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Timeout { .. } | Self::Network { .. } => None,
            Self::RateLimited { .. } => Some(429),
            Self::Server { status, .. } => Some(*status),
            Self::Validation { .. } => Some(400),
            Self::Authentication { .. } => Some(401),
            Self::Authorization { .. } => Some(403),
            Self::NotFound { .. } => Some(404),
            Self::Generic { status, .. } => *status,
        }
    }

    /// Returns diagnostic detail (server body or transport error).
    pub fn detail(&self) -> String {
        match self {
            Self::Timeout { after } => format!("no response within {}ms", after.as_millis()),
            Self::Network { detail }
            | Self::RateLimited { detail }
            | Self::Server { detail, .. }
            | Self::Validation { detail }
            | Self::Authentication { detail }
            | Self::Authorization { detail }
            | Self::NotFound { detail } => detail.clone(),
            Self::Generic { message, .. } => message.clone(),
        }
    }

    /// Whether this error is retried by the executor.
    pub fn is_retryable(&self) -> bool {
        self.kind().is_retryable()
    }
}

// ============================================================================
// Client Error
// ============================================================================

/// Errors raised while constructing a client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The base URL is empty, unparseable, or not http(s).
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// The underlying HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

// ============================================================================
// Tests
// ============================================================================
