//! Text output formatting with rating bars and colors.

use std::path::Path;

use chrono::Local;
use feelfwd_core::{FactorCategory, HealthResponse, RATING_MAX};
use feelfwd_store::{AppConfig, ErrorLogEntry, Severity};

use crate::commands::walk::WalkReport;
use crate::fallback::{ContentSource, StepReport};

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

const BAR_FULL: char = '█';
const BAR_EMPTY: char = '░';

/// Width of a rating bar; one cell per rating point.
const BAR_WIDTH: usize = RATING_MAX as usize;

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formats a health check result.
    pub fn format_health(&self, health: &HealthResponse, base_url: &str) -> String {
        let status = if health.healthy {
            self.green("● online")
        } else {
            self.red("● offline")
        };
        format!("{} {}", status, self.dim(base_url))
    }

    /// Formats factor categories, one per block.
    pub fn format_factors(&self, factors: &[FactorCategory]) -> String {
        factors
            .iter()
            .map(|category| {
                let mut lines = vec![self.bold(&category.category)];
                lines.extend(category.items.iter().map(|item| format!("  • {item}")));
                lines.join("\n")
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Formats one phase outcome.
    pub fn format_step(&self, step: &StepReport) -> String {
        match step.source {
            ContentSource::Api => format!("{} {}", self.green("✓"), step.step),
            ContentSource::Fallback => {
                let reason = step
                    .message
                    .as_deref()
                    .unwrap_or("API unavailable");
                format!(
                    "{} {} {}",
                    self.yellow("↺"),
                    step.step,
                    self.dim(&format!("(sample content: {reason})"))
                )
            }
        }
    }

    /// Formats the result of a full walk.
    pub fn format_walk(&self, report: &WalkReport) -> String {
        let mut lines = Vec::new();

        lines.push(self.bold(&report.topic));
        lines.push("─".repeat(40));

        for step in &report.steps {
            lines.push(self.format_step(step));
        }

        lines.push(String::new());
        lines.push(self.bold("Scenarios"));
        for scenario in &report.scenarios {
            lines.push(format!("  {} {}", self.cyan(&scenario.id), scenario.title));
        }

        let insights = &report.insights;
        lines.push(String::new());
        lines.push(self.bold("Summary"));
        lines.push(insights.summary.clone());

        lines.push(String::new());
        if let Some(excitement) = insights.avg_excitement {
            lines.push(format!("Excitement {} {excitement:.1}", self.rating_bar(excitement)));
        }
        if let Some(anxiety) = insights.avg_anxiety {
            lines.push(format!("Anxiety    {} {anxiety:.1}", self.rating_bar(anxiety)));
        }

        if !insights.top_preferences.is_empty() {
            lines.push(String::new());
            lines.push(self.bold("Top preferences"));
            for pref in &insights.top_preferences {
                lines.push(format!("  {:<24} {}", pref.factor, pref.importance));
            }
        }

        let offline = report.offline_steps();
        if offline > 0 {
            lines.push(String::new());
            lines.push(self.yellow(&format!(
                "{offline} of {} steps used sample content",
                report.steps.len()
            )));
        }

        lines.join("\n")
    }

    /// Formats error log entries, newest last.
    pub fn format_errors(&self, entries: &[ErrorLogEntry]) -> String {
        if entries.is_empty() {
            return self.dim("No errors logged.");
        }

        entries
            .iter()
            .map(|entry| {
                let when = entry
                    .timestamp
                    .with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M:%S");
                let severity = match entry.severity {
                    Severity::Error => self.red("error"),
                    Severity::Warning => self.yellow("warn "),
                    Severity::Info => self.dim("info "),
                };
                let operation = entry
                    .context
                    .as_ref()
                    .map(|ctx| format!(" [{} {}]", ctx.operation, ctx.action))
                    .unwrap_or_default();
                format!("{} {severity} {}{}", self.dim(&when.to_string()), entry.message, self.dim(&operation))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Formats the effective configuration.
    pub fn format_config(&self, config: &AppConfig, config_path: &Path, log_path: &Path) -> String {
        let lines = [
            format!("{} {}", self.bold(&config.app_name), config.app_version),
            "─".repeat(40),
            format!("API URL:      {}", self.cyan(&config.api_url)),
            format!("Environment:  {}", config.environment),
            format!("Logging:      {}", config.enable_logging),
            String::new(),
            format!("Config file:  {}", config_path.display()),
            format!("Error log:    {}", log_path.display()),
        ];
        lines.join("\n")
    }

    /// Formats a 1-10 rating as a bar.
    pub fn rating_bar(&self, rating: f64) -> String {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let filled = (rating.clamp(0.0, f64::from(RATING_MAX)).round() as usize).min(BAR_WIDTH);
        let empty = BAR_WIDTH - filled;

        format!(
            "{}{}",
            BAR_FULL.to_string().repeat(filled),
            BAR_EMPTY.to_string().repeat(empty)
        )
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }
}
