//! Core error types for Feel Forward.

use thiserror::Error;

/// Core error type for domain validation and (de)serialization.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A value is outside its allowed range or otherwise malformed.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
