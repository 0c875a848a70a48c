//! Request and response bodies for each API endpoint.
//!
//! | Endpoint | Request | Response |
//! |---|---|---|
//! | `POST /phase0/factors` | [`FactorsRequest`] | [`FactorsResponse`] |
//! | `POST /phase1/preferences` | [`PreferencesRequest`] | [`SaveResponse`] |
//! | `POST /phase2/scenarios` | [`ScenariosRequest`] | [`ScenariosResponse`] |
//! | `POST /phase3/reactions` | [`Reaction`] | [`SaveResponse`] |
//! | `POST /phase4/summary` | [`SummaryRequest`] | [`SummaryResponse`] |
//!
//! Response types have no `#[serde(default)]` on their required fields: a
//! body missing `factors`, `scenarios` or `summary` fails to deserialize
//! instead of being silently accepted as empty.

use serde::{Deserialize, Serialize};

use super::{FactorCategory, Preference, Reaction, Scenario};
use crate::error::CoreError;

// ============================================================================
// Phase 0: Factors
// ============================================================================

/// Body for factor discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorsRequest {
    /// Decision topic, e.g. "choosing a job".
    pub topic: String,
}

impl FactorsRequest {
    /// Creates a request for the given topic.
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
        }
    }

    /// Rejects a blank topic.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_topic(&self.topic)
    }
}

/// Factor categories for a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorsResponse {
    /// Discovered categories.
    pub factors: Vec<FactorCategory>,
}

// ============================================================================
// Phase 1 / 2: Preferences and Scenarios
// ============================================================================

/// Body for saving preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferencesRequest {
    /// Rated preferences.
    pub preferences: Vec<Preference>,
    /// Decision topic.
    pub topic: String,
}

/// Body for scenario generation. Same shape as [`PreferencesRequest`].
pub type ScenariosRequest = PreferencesRequest;

impl PreferencesRequest {
    /// Creates a request.
    pub fn new(preferences: Vec<Preference>, topic: impl Into<String>) -> Self {
        Self {
            preferences,
            topic: topic.into(),
        }
    }

    /// Validates the topic and every preference.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_topic(&self.topic)?;
        self.preferences.iter().try_for_each(Preference::validate)
    }
}

/// Acknowledgement returned by the save endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveResponse {
    /// Whether the server stored the data.
    pub success: bool,
    /// Optional server message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Generated scenarios.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenariosResponse {
    /// Scenarios, usually three.
    pub scenarios: Vec<Scenario>,
}

// ============================================================================
// Phase 4: Summary
// ============================================================================

/// Body for summary synthesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRequest {
    /// All recorded reactions.
    pub reactions: Vec<Reaction>,
    /// All rated preferences.
    pub preferences: Vec<Preference>,
}

impl SummaryRequest {
    /// Creates a request.
    pub fn new(reactions: Vec<Reaction>, preferences: Vec<Preference>) -> Self {
        Self {
            reactions,
            preferences,
        }
    }
}

/// Synthesized summary text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResponse {
    /// Summary prose.
    pub summary: String,
}

fn validate_topic(topic: &str) -> Result<(), CoreError> {
    if topic.trim().is_empty() {
        Err(CoreError::InvalidData("topic must not be empty".to_string()))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_topic_rejected() {
        assert!(FactorsRequest::new("   ").validate().is_err());
        assert!(FactorsRequest::new("choosing a job").validate().is_ok());
    }

    #[test]
    fn test_preferences_request_validates_each_preference() {
        let ok = PreferencesRequest::new(vec![Preference::new("Salary", 8)], "job");
        assert!(ok.validate().is_ok());

        let bad = PreferencesRequest::new(
            vec![Preference::new("Salary", 8), Preference::new("Commute", 0)],
            "job",
        );
        assert!(bad.validate().is_err());
    }
}
