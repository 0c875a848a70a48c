// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Feel Forward Core
//!
//! Domain types shared by the Feel Forward client, store, and CLI.
//!
//! The decision flow runs in five phases, each backed by one remote endpoint:
//!
//! 0. Factor discovery - [`FactorCategory`]
//! 1. Preference detailing - [`Preference`]
//! 2. Scenario generation - [`Scenario`]
//! 3. Emotional reactions - [`Reaction`]
//! 4. Summary synthesis - [`SummaryResponse`], [`Insights`]
//!
//! Request and response payloads in [`models::payloads`] serialize to exactly
//! the JSON shapes the API expects, so the client can send them as-is.

pub mod error;
pub mod insights;
pub mod models;

pub use error::CoreError;
pub use insights::Insights;
pub use models::preference::{RATING_MAX, RATING_MIN, validate_rating};

pub use models::{
    // Phase types
    FactorCategory,
    Preference,
    Reaction,
    Scenario,
    // Health
    HealthResponse,
    HealthStatus,
    // Payloads
    FactorsRequest,
    FactorsResponse,
    PreferencesRequest,
    SaveResponse,
    ScenariosRequest,
    ScenariosResponse,
    SummaryRequest,
    SummaryResponse,
};
