//! Emotional reactions to scenarios.

use serde::{Deserialize, Serialize};

use super::preference::validate_rating;
use crate::error::CoreError;

/// The user's emotional response to one scenario.
///
/// Sent flat as the body of the reactions endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    /// The scenario this reaction refers to.
    pub scenario_id: String,
    /// Excitement rating (1-10).
    pub excitement: u8,
    /// Anxiety rating (1-10).
    pub anxiety: u8,
    /// Where the feeling shows up physically.
    #[serde(default)]
    pub body: String,
    /// Free-form notes.
    #[serde(default)]
    pub freeform: String,
}

impl Reaction {
    /// Creates a reaction with empty body and freeform notes.
    pub fn new(scenario_id: impl Into<String>, excitement: u8, anxiety: u8) -> Self {
        Self {
            scenario_id: scenario_id.into(),
            excitement,
            anxiety,
            body: String::new(),
            freeform: String::new(),
        }
    }

    /// Sets the body-sensation description.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets the free-form notes.
    pub fn with_freeform(mut self, freeform: impl Into<String>) -> Self {
        self.freeform = freeform.into();
        self
    }

    /// Validates both ratings and the scenario reference.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.scenario_id.is_empty() {
            return Err(CoreError::InvalidData("scenario_id must not be empty".to_string()));
        }
        validate_rating("excitement", self.excitement)?;
        validate_rating("anxiety", self.anxiety)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaction_validation() {
        assert!(Reaction::new("s1", 7, 3).validate().is_ok());
        assert!(Reaction::new("", 7, 3).validate().is_err());
        assert!(Reaction::new("s1", 11, 3).validate().is_err());
        assert!(Reaction::new("s1", 7, 0).validate().is_err());
    }
}
