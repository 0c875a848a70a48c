// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

//! # Feel Forward Client
//!
//! Resilient HTTP client for the Feel Forward API.
//!
//! ## Request Executor
//!
//! [`executor::RequestExecutor`] turns one logical request into up to four
//! attempts:
//!
//! - each attempt has a 10 second deadline
//! - 429, 5xx and transport failures are retried with exponential backoff
//!   plus jitter ([`retry::RetryPolicy`])
//! - timeouts and other statuses fail immediately
//! - every failure is classified once into an [`ApiError`] and handed to an
//!   [`ErrorReporter`]
//!
//! ## Endpoint Façade
//!
//! [`ApiClient`] exposes one method per backend capability and caches
//! health check results for 30 seconds.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use feelfwd_client::ApiClient;
//! use feelfwd_core::FactorsRequest;
//!
//! let client = Arc::new(ApiClient::new("https://api.felfwd.app")?);
//!
//! if client.health_check().await.healthy {
//!     let factors = client.get_factors(&FactorsRequest::new("new job")).await?;
//! }
//! ```

pub mod client;
pub mod endpoint;
pub mod error;
pub mod executor;
pub mod health;
pub mod report;
pub mod retry;
pub mod settings;


// Re-export key types at crate root

pub use client::{ApiClient, ApiClientBuilder};
pub use endpoint::{Endpoint, Method};
pub use error::{ApiError, ClientError, ErrorKind};
pub use executor::RequestExecutor;
pub use health::HealthCache;
pub use report::{
    Action, CLIENT_COMPONENT, ErrorContext, ErrorReporter, NoopReporter, ReporterChain,
    TracingReporter,
};
pub use retry::RetryPolicy;
pub use settings::{ClientSettings, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, HEALTH_CHECK_INTERVAL};
