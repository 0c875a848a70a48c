//! Local content used when the API rejects a request.

use feelfwd_client::{Action, ApiError, Endpoint, ErrorContext, ErrorKind};
use feelfwd_core::{FactorCategory, Scenario};
use feelfwd_store::{ErrorLog, Severity};
use serde::Serialize;

/// Component name recorded when fallback content is used.
const FALLBACK_COMPONENT: &str = "feelfwd-cli";

/// Summary shown when the summary endpoint fails.
pub const FALLBACK_SUMMARY: &str = "Based on your responses, you seem to value stability and \
growth opportunities, but you're also drawn to environments where you can make a meaningful \
impact. Your emotional reactions suggest you're most energized by scenarios that offer both \
personal development and the chance to work with passionate people. Consider prioritizing \
roles that offer mentorship and clear progression paths while maintaining some flexibility in \
how you work.";

/// Which fallback scenario set a topic maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicTheme {
    /// Jobs, careers, work.
    Career,
    /// Moving, cities, locations.
    Location,
    /// Anything else.
    General,
}

impl TopicTheme {
    /// Classifies a topic by keyword. Career wins over location.
    pub fn of(topic: &str) -> Self {
        let topic = topic.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| topic.contains(w));

        if has(&["job", "career", "work"]) {
            Self::Career
        } else if has(&["move", "location", "city"]) {
            Self::Location
        } else {
            Self::General
        }
    }
}

/// The four default factor categories.
pub fn factors() -> Vec<FactorCategory> {
    vec![
        FactorCategory::new(
            "Financial",
            ["Salary", "Benefits", "Job Security", "Cost of Living", "Financial Growth"],
        ),
        FactorCategory::new(
            "Lifestyle",
            ["Work-Life Balance", "Location", "Flexibility", "Commute", "Travel Requirements"],
        ),
        FactorCategory::new(
            "Career",
            ["Growth Opportunities", "Learning", "Industry", "Company Culture", "Leadership"],
        ),
        FactorCategory::new(
            "Personal",
            ["Values Alignment", "Impact", "Relationships", "Stress Level", "Fulfillment"],
        ),
    ]
}

/// Three scenarios matched to the topic.
pub fn scenarios(topic: &str) -> Vec<Scenario> {
    let set: [(&str, &str); 3] = match TopicTheme::of(topic) {
        TopicTheme::Career => [
            (
                "The Startup Adventure",
                "You join a fast-growing startup where you wear many hats. The equity potential \
                 is exciting, but the hours are long and the stability uncertain. Your colleagues \
                 are passionate and the culture is energetic, but work-life balance can be \
                 challenging.",
            ),
            (
                "The Corporate Comfort",
                "You land a role at an established company with excellent benefits and clear \
                 career progression. The work is structured, the pay is reliable, but innovation \
                 moves slowly and bureaucracy can sometimes be frustrating.",
            ),
            (
                "The Remote Freedom",
                "You find a fully remote position that offers incredible flexibility. You can \
                 live anywhere, set your own schedule, but you miss the energy of in-person \
                 collaboration and sometimes feel isolated from your team.",
            ),
        ],
        TopicTheme::Location => [
            (
                "The Urban Opportunity",
                "You move to a vibrant city with endless opportunities and cultural diversity. \
                 The pace is fast, the networking amazing, but the cost of living is high and \
                 space is limited. Every day brings new experiences and connections.",
            ),
            (
                "The Suburban Balance",
                "You choose a suburban area that offers the best of both worlds. There's more \
                 space, better schools, and a slower pace, but you're still close enough to the \
                 city for opportunities. Community feels stronger here.",
            ),
            (
                "The Rural Retreat",
                "You embrace a quieter life in a rural setting. The cost of living is low, \
                 nature is at your doorstep, and the community is tight-knit. However, career \
                 opportunities are limited and amenities are fewer.",
            ),
        ],
        TopicTheme::General => [
            (
                "The Bold Choice",
                "You choose the path that excites you most, even though it comes with risks. \
                 This option offers the highest potential for growth and fulfillment, but \
                 requires stepping outside your comfort zone and accepting some uncertainty.",
            ),
            (
                "The Balanced Approach",
                "You find a middle ground that satisfies most of your priorities. This choice \
                 offers stability and moderate growth, without extreme risks or dramatic \
                 changes. It feels comfortable and sustainable long-term.",
            ),
            (
                "The Safe Harbor",
                "You prioritize security and stability above all else. This option minimizes \
                 risk and provides predictable outcomes, though it may limit your potential \
                 for dramatic growth or exciting new experiences.",
            ),
        ],
    };

    set.iter()
        .enumerate()
        .map(|(i, (title, text))| Scenario::new(format!("s{}", i + 1), *title, *text))
        .collect()
}

// ============================================================================
// Step Reports
// ============================================================================

/// Where a phase's content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentSource {
    /// The API answered.
    Api,
    /// Local content replaced a rejected call.
    Fallback,
}

/// Outcome of one phase.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    /// Operation name, e.g. `get_factors`.
    pub step: &'static str,
    /// Where the content came from.
    pub source: ContentSource,
    /// Why the API was not used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    /// User-facing error message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StepReport {
    /// The API call succeeded.
    pub fn api(endpoint: Endpoint) -> Self {
        Self {
            step: endpoint.operation(),
            source: ContentSource::Api,
            error_kind: None,
            message: None,
        }
    }

    /// The API call failed; `err` says why.
    pub fn fallback(endpoint: Endpoint, err: Option<&ApiError>) -> Self {
        Self {
            step: endpoint.operation(),
            source: ContentSource::Fallback,
            error_kind: err.map(ApiError::kind),
            message: err.map(ToString::to_string),
        }
    }

    /// True if local content was used.
    pub fn used_fallback(&self) -> bool {
        self.source == ContentSource::Fallback
    }
}

/// Records that `endpoint` fell back to local content.
pub fn record(log: &ErrorLog, endpoint: Endpoint, err: Option<&ApiError>, topic: &str) -> StepReport {
    let mut context = ErrorContext::new(endpoint, Action::FallbackUsed, 0)
        .with_component(FALLBACK_COMPONENT)
        .with("topic", topic)
        .with("fallback_used", true);
    if let Some(err) = err {
        context = context.with("kind", err.kind().as_str());
    }

    log.log_message(
        Severity::Info,
        format!("{} used fallback content", endpoint.operation()),
        Some(context),
    );
    StepReport::fallback(endpoint, err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_theme() {
        assert_eq!(TopicTheme::of("Should I take the new JOB?"), TopicTheme::Career);
        assert_eq!(TopicTheme::of("moving to a new city"), TopicTheme::Location);
        assert_eq!(TopicTheme::of("work in another city"), TopicTheme::Career);
        assert_eq!(TopicTheme::of("buy a house"), TopicTheme::General);
    }

    #[test]
    fn test_factors() {
        let factors = factors();
        assert_eq!(factors.len(), 4);
        assert_eq!(FactorCategory::count_items(&factors), 20);
        assert_eq!(factors[0].items[0], "Salary");
    }

    #[test]
    fn test_scenarios_are_numbered() {
        let scenarios = scenarios("relocation to a new city");
        let ids: Vec<&str> = scenarios.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["s1", "s2", "s3"]);
        assert_eq!(scenarios[0].title, "The Urban Opportunity");
        assert!(!scenarios[1].text.contains("  "));
    }

    #[test]
    fn test_record_logs_info_entry() {
        let log = ErrorLog::new();
        let err = ApiError::from_status(503, "", "");

        let report = record(&log, Endpoint::Scenarios, Some(&err), "new job");

        assert!(report.used_fallback());
        assert_eq!(report.step, "generate_scenarios");
        assert_eq!(report.error_kind, Some(ErrorKind::Server));

        let entries = log.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].severity, Severity::Info);
        let context = entries[0].context.as_ref().unwrap();
        assert_eq!(context.action, Action::FallbackUsed);
        assert_eq!(context.metadata["topic"], "new job");
    }
}
