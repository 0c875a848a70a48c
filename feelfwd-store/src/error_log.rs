//! Local error log.
//!
//! Keeps the most recent failures in memory and persists a shorter tail to
//! disk so `feelfwd errors` can show what went wrong in earlier runs.

use chrono::{DateTime, Utc};
use feelfwd_client::{Action, ApiError, ErrorContext, ErrorKind, ErrorReporter};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info, warn};

use crate::error::StoreError;
use crate::persistence::{load_json, save_json};

/// Entries kept in memory.
pub const MAX_QUEUE_SIZE: usize = 50;

/// Entries written to disk.
pub const MAX_PERSISTED: usize = 20;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_SUFFIX_LEN: usize = 9;

// ============================================================================
// Entry
// ============================================================================

/// How serious a logged event is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A request failed for good.
    #[default]
    Error,
    /// A failure that will be retried.
    Warning,
    /// Informational, e.g. fallback content was used.
    Info,
}

impl Severity {
    /// Severity for a reported action.
    pub fn for_action(action: Action) -> Self {
        if action.is_retry() {
            Self::Warning
        } else if action == Action::FallbackUsed {
            Self::Info
        } else {
            Self::Error
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        })
    }
}

/// One logged event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorLogEntry {
    /// `error_<epoch ms>_<9 base36 chars>`.
    pub id: String,
    /// When it was logged.
    pub timestamp: DateTime<Utc>,
    /// User-facing message.
    pub message: String,
    /// Error classification, if the event came from a request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
    /// HTTP status, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Diagnostic detail.
    #[serde(default)]
    pub detail: String,
    /// Where it happened.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<ErrorContext>,
    /// How serious it is.
    #[serde(default)]
    pub severity: Severity,
}

fn generate_id(now: DateTime<Utc>) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| char::from(ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())]))
        .collect();
    format!("error_{}_{suffix}", now.timestamp_millis())
}

// ============================================================================
// Error Log
// ============================================================================

/// Bounded in-memory log of failures. Implements [`ErrorReporter`].
#[derive(Debug, Default)]
pub struct ErrorLog {
    entries: Mutex<VecDeque<ErrorLogEntry>>,
}

impl ErrorLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<ErrorLogEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push(&self, entry: ErrorLogEntry) -> String {
        let id = entry.id.clone();
        let mut entries = self.lock();
        entries.push_back(entry);
        while entries.len() > MAX_QUEUE_SIZE {
            entries.pop_front();
        }
        id
    }

    /// Records a request failure and returns its id.
    pub fn log_api_error(&self, err: &ApiError, context: Option<&ErrorContext>) -> String {
        let now = Utc::now();
        let severity = context.map_or(Severity::Error, |ctx| Severity::for_action(ctx.action));
        self.push(ErrorLogEntry {
            id: generate_id(now),
            timestamp: now,
            message: err.to_string(),
            kind: Some(err.kind()),
            status: err.status(),
            detail: err.detail(),
            context: context.cloned(),
            severity,
        })
    }

    /// Records a free-form message and returns its id.
    pub fn log_message(
        &self,
        severity: Severity,
        message: impl Into<String>,
        context: Option<ErrorContext>,
    ) -> String {
        let now = Utc::now();
        let message = message.into();
        match severity {
            Severity::Error => error!(%message, "Logged error"),
            Severity::Warning => warn!(%message, "Logged warning"),
            Severity::Info => info!(%message, "Logged info"),
        }
        self.push(ErrorLogEntry {
            id: generate_id(now),
            timestamp: now,
            message,
            kind: None,
            status: None,
            detail: String::new(),
            context,
            severity,
        })
    }

    /// Snapshot of all entries, oldest first.
    pub fn entries(&self) -> Vec<ErrorLogEntry> {
        self.lock().iter().cloned().collect()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if nothing has been logged.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Removes all entries.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Writes the most recent entries to `path`.
    pub async fn persist(&self, path: &Path) -> Result<(), StoreError> {
        let tail: Vec<ErrorLogEntry> = {
            let entries = self.lock();
            let skip = entries.len().saturating_sub(MAX_PERSISTED);
            entries.iter().skip(skip).cloned().collect()
        };
        save_json(path, &tail).await?;
        debug!(path = %path.display(), count = tail.len(), "Persisted error log");
        Ok(())
    }

    /// Loads a log previously written by [`persist`](Self::persist).
    ///
    /// A missing file yields an empty log.
    pub async fn load(path: &Path) -> Result<Self, StoreError> {
        let entries: Vec<ErrorLogEntry> = match load_json(path).await {
            Ok(entries) => entries,
            Err(e) if e.is_not_found() => Vec::new(),
            Err(e) => return Err(e),
        };

        let log = Self::new();
        for entry in entries {
            log.push(entry);
        }
        Ok(log)
    }

    /// Deletes the persisted log at `path`, if any.
    pub async fn remove_persisted(path: &Path) -> Result<(), StoreError> {
        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl ErrorReporter for ErrorLog {
    fn report(&self, error: &ApiError, context: &ErrorContext) {
        self.log_api_error(error, Some(context));
    }
}
