//! CLI output formatting tests.
//!
//! These tests verify that CLI output is correctly formatted for both
//! text and JSON output modes.

#[cfg(test)]
mod text_formatter_tests {
    use super::super::text::TextFormatter;
    use crate::fallback::{self, StepReport};
    use feelfwd_client::{ApiError, Endpoint};
    use feelfwd_core::HealthResponse;

    #[test]
    fn test_rating_bar() {
        let formatter = TextFormatter::new(false);

        let cases = [
            (0.0, "░░░░░░░░░░"),
            (1.0, "█░░░░░░░░░"),
            (5.5, "██████░░░░"),
            (7.4, "███████░░░"),
            (10.0, "██████████"),
            (12.0, "██████████"),
        ];

        for (rating, expected) in cases {
            assert_eq!(formatter.rating_bar(rating), expected, "rating {rating}");
        }
    }

    #[test]
    fn test_health_without_colors() {
        let formatter = TextFormatter::new(false);

        let online = formatter.format_health(&HealthResponse::online(), "https://api.felfwd.app");
        assert_eq!(online, "● online https://api.felfwd.app");

        let offline = formatter.format_health(&HealthResponse::offline(), "http://localhost");
        assert!(offline.starts_with("● offline"));
    }

    #[test]
    fn test_health_with_colors() {
        let formatter = TextFormatter::new(true);
        let output = formatter.format_health(&HealthResponse::offline(), "x");
        assert!(output.contains("\x1b[31m"), "offline should be red");
    }

    #[test]
    fn test_factors_listing() {
        let formatter = TextFormatter::new(false);
        let output = formatter.format_factors(&fallback::factors());

        assert!(output.starts_with("Financial\n  • Salary"));
        assert!(output.contains("\n\nPersonal\n"));
        assert_eq!(output.matches("  • ").count(), 20);
    }

    #[test]
    fn test_step_lines() {
        let formatter = TextFormatter::new(false);

        let ok = formatter.format_step(&StepReport::api(Endpoint::Summary));
        assert_eq!(ok, "✓ generate_summary");

        let err = ApiError::from_status(429, "", "");
        let fell_back = formatter.format_step(&StepReport::fallback(Endpoint::Factors, Some(&err)));
        assert!(fell_back.contains("get_factors"));
        assert!(fell_back.contains("Rate limit exceeded"));

        let offline = formatter.format_step(&StepReport::fallback(Endpoint::Scenarios, None));
        assert!(offline.contains("API unavailable"));
    }

    #[test]
    fn test_empty_error_log() {
        let formatter = TextFormatter::new(false);
        assert_eq!(formatter.format_errors(&[]), "No errors logged.");
    }
}

#[cfg(test)]
mod json_formatter_tests {
    use super::super::json::JsonFormatter;
    use crate::fallback::StepReport;
    use feelfwd_client::{ApiError, Endpoint};
    use feelfwd_core::HealthResponse;

    #[test]
    fn test_health_json() {
        let formatter = JsonFormatter::new(false);
        let output = formatter
            .format_health(&HealthResponse::online(), "https://api.felfwd.app")
            .unwrap();

        assert_eq!(
            output,
            r#"{"status":"online","healthy":true,"apiUrl":"https://api.felfwd.app"}"#
        );
    }

    #[test]
    fn test_step_json_omits_empty_error() {
        let formatter = JsonFormatter::new(false);

        let ok = formatter.format(&StepReport::api(Endpoint::Factors)).unwrap();
        assert_eq!(ok, r#"{"step":"get_factors","source":"api"}"#);

        let err = ApiError::Timeout {
            after: std::time::Duration::from_secs(10),
        };
        let value: serde_json::Value = serde_json::from_str(
            &formatter
                .format(&StepReport::fallback(Endpoint::Factors, Some(&err)))
                .unwrap(),
        )
        .unwrap();
        assert_eq!(value["source"], "fallback");
        assert_eq!(value["error_kind"], "timeout");
    }

    #[test]
    fn test_pretty_output() {
        let formatter = JsonFormatter::new(true);
        let output = formatter.format(&serde_json::json!({"a": 1})).unwrap();
        assert!(output.contains('\n'));
    }
}
