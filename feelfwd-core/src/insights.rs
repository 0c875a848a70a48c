//! Insight export built from a finished session.
//!
//! Mirrors what the summary screen offers for download: the summary text,
//! average excitement and anxiety across reactions, and the three most
//! important preferences.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Preference, Reaction};

/// Topic used when the session has none.
const DEFAULT_TOPIC: &str = "Decision Making";

/// Number of preferences kept in [`Insights::top_preferences`].
const TOP_PREFERENCES: usize = 3;

/// Aggregated insights for a completed decision flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insights {
    /// Decision topic.
    pub topic: String,
    /// Summary text, from the API or a local fallback.
    pub summary: String,
    /// Mean excitement across reactions, `None` if there are no reactions.
    pub avg_excitement: Option<f64>,
    /// Mean anxiety across reactions, `None` if there are no reactions.
    pub avg_anxiety: Option<f64>,
    /// Highest-importance preferences, most important first.
    pub top_preferences: Vec<Preference>,
    /// When the insights were generated.
    pub timestamp: DateTime<Utc>,
}

impl Insights {
    /// Builds insights from the session's reactions and preferences.
    pub fn from_session(
        topic: &str,
        summary: impl Into<String>,
        reactions: &[Reaction],
        preferences: &[Preference],
    ) -> Self {
        let topic = if topic.trim().is_empty() {
            DEFAULT_TOPIC.to_string()
        } else {
            topic.trim().to_string()
        };

        let mut top = preferences.to_vec();
        // Stable sort keeps input order among equal importances
        top.sort_by(|a, b| b.importance.cmp(&a.importance));
        top.truncate(TOP_PREFERENCES);

        Self {
            topic,
            summary: summary.into(),
            avg_excitement: mean(reactions.iter().map(|r| r.excitement)),
            avg_anxiety: mean(reactions.iter().map(|r| r.anxiety)),
            top_preferences: top,
            timestamp: Utc::now(),
        }
    }

    /// Returns true if excitement outweighs anxiety on average.
    pub fn leans_positive(&self) -> Option<bool> {
        match (self.avg_excitement, self.avg_anxiety) {
            (Some(e), Some(a)) => Some(e > a),
            _ => None,
        }
    }
}

fn mean(values: impl Iterator<Item = u8>) -> Option<f64> {
    let (sum, count) = values.fold((0u32, 0u32), |(s, c), v| (s + u32::from(v), c + 1));
    if count == 0 {
        None
    } else {
        Some(f64::from(sum) / f64::from(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_averages_and_top_preferences() {
        let reactions = vec![Reaction::new("s1", 8, 2), Reaction::new("s2", 4, 6)];
        let preferences = vec![
            Preference::new("Commute", 3),
            Preference::new("Salary", 9),
            Preference::new("Culture", 7),
            Preference::new("Learning", 9),
        ];

        let insights = Insights::from_session("job", "summary", &reactions, &preferences);

        assert_eq!(insights.avg_excitement, Some(6.0));
        assert_eq!(insights.avg_anxiety, Some(4.0));
        let names: Vec<_> = insights.top_preferences.iter().map(|p| p.factor.as_str()).collect();
        assert_eq!(names, vec!["Salary", "Learning", "Culture"]);
        assert_eq!(insights.leans_positive(), Some(true));
    }

    #[test]
    fn test_empty_session() {
        let insights = Insights::from_session("  ", "", &[], &[]);
        assert_eq!(insights.topic, "Decision Making");
        assert!(insights.avg_excitement.is_none());
        assert!(insights.top_preferences.is_empty());
        assert!(insights.leans_positive().is_none());
    }
}
