//! Domain models for Feel Forward.
//!
//! ## Submodules
//!
//! - [`factor`] - Factor categories discovered for a topic
//! - [`preference`] - Rated preferences and the shared rating range
//! - [`scenario`] - Generated future scenarios
//! - [`reaction`] - Emotional reactions to scenarios
//! - [`health`] - API health status
//! - [`payloads`] - Request/response bodies for each endpoint

mod factor;
mod health;
pub mod payloads;
pub mod preference;
mod reaction;
mod scenario;

pub use factor::FactorCategory;
pub use health::{HealthResponse, HealthStatus};
pub use payloads::{
    FactorsRequest, FactorsResponse, PreferencesRequest, SaveResponse, ScenariosRequest,
    ScenariosResponse, SummaryRequest, SummaryResponse,
};
pub use preference::Preference;
pub use reaction::Reaction;
pub use scenario::Scenario;
