//! Rated preferences and the shared 1-10 rating range.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lowest allowed rating for importance, excitement, and anxiety.
pub const RATING_MIN: u8 = 1;
/// Highest allowed rating for importance, excitement, and anxiety.
pub const RATING_MAX: u8 = 10;

/// Checks that a rating lies within `RATING_MIN..=RATING_MAX`.
pub fn validate_rating(field: &str, value: u8) -> Result<(), CoreError> {
    if (RATING_MIN..=RATING_MAX).contains(&value) {
        Ok(())
    } else {
        Err(CoreError::InvalidData(format!(
            "{field} must be between {RATING_MIN} and {RATING_MAX}, got {value}"
        )))
    }
}

/// How much a factor matters to the user, plus optional hard limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
    /// Factor name.
    pub factor: String,
    /// Importance rating (1-10).
    pub importance: u8,
    /// Whether the user has a hard limit for this factor.
    #[serde(rename = "hasLimit", default)]
    pub has_limit: bool,
    /// Description of the limit, e.g. "$80k minimum".
    #[serde(default)]
    pub limit: String,
    /// What the user would trade for this factor.
    #[serde(default)]
    pub tradeoff: String,
}

impl Preference {
    /// Creates a preference with no limit or tradeoff.
    pub fn new(factor: impl Into<String>, importance: u8) -> Self {
        Self {
            factor: factor.into(),
            importance,
            has_limit: false,
            limit: String::new(),
            tradeoff: String::new(),
        }
    }

    /// Sets a hard limit.
    pub fn with_limit(mut self, limit: impl Into<String>) -> Self {
        self.has_limit = true;
        self.limit = limit.into();
        self
    }

    /// Sets the tradeoff description.
    pub fn with_tradeoff(mut self, tradeoff: impl Into<String>) -> Self {
        self.tradeoff = tradeoff.into();
        self
    }

    /// Validates the preference.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.factor.trim().is_empty() {
            return Err(CoreError::InvalidData("factor must not be empty".to_string()));
        }
        validate_rating("importance", self.importance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        assert!(validate_rating("x", 1).is_ok());
        assert!(validate_rating("x", 10).is_ok());
        assert!(validate_rating("x", 0).is_err());
        assert!(validate_rating("x", 11).is_err());
    }

    #[test]
    fn test_preference_validation() {
        assert!(Preference::new("Salary", 8).validate().is_ok());
        assert!(Preference::new("  ", 8).validate().is_err());
        assert!(Preference::new("Salary", 0).validate().is_err());
    }

    #[test]
    fn test_with_limit_sets_flag() {
        let pref = Preference::new("Salary", 8).with_limit("$80k minimum");
        assert!(pref.has_limit);
        assert_eq!(pref.limit, "$80k minimum");
    }
}
