//! Generated future scenarios.

use serde::{Deserialize, Serialize};

/// A short narrative of one possible future for the decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario identifier, referenced by reactions.
    pub id: String,
    /// Short title.
    pub title: String,
    /// Narrative text.
    pub text: String,
}

impl Scenario {
    /// Creates a new scenario.
    pub fn new(id: impl Into<String>, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            text: text.into(),
        }
    }
}
