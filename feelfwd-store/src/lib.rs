// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Feel Forward Store
//!
//! Local state for Feel Forward.
//!
//! This crate provides:
//!
//! - **AppConfig**: API URL and environment, from `config.json` plus
//!   `FEELFWD_*` environment overrides
//! - **ErrorLog**: bounded log of request failures; plugs into the client as
//!   an [`ErrorReporter`](feelfwd_client::ErrorReporter)
//! - **Persistence**: JSON file helpers
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use feelfwd_client::ApiClient;
//! use feelfwd_store::{AppConfig, ErrorLog};
//!
//! let config = AppConfig::load().await?;
//! let log = Arc::new(ErrorLog::new());
//!
//! let client = ApiClient::builder()
//!     .base_url(&config.api_url)
//!     .reporter(log.clone())
//!     .build()?;
//! ```

pub mod config;
pub mod error;
pub mod error_log;
pub mod persistence;

pub use config::{AppConfig, Environment};
pub use error::StoreError;
pub use error_log::{ErrorLog, ErrorLogEntry, MAX_PERSISTED, MAX_QUEUE_SIZE, Severity};
pub use persistence::{
    default_config_dir, default_config_path, default_data_dir, default_error_log_path,
    ensure_dir, load_json, load_json_or_default, save_json,
};

#[cfg(test)]
mod persistence_tests;
