//! Walk command - every phase, no prompts.
//!
//! Each phase calls the API and, on rejection, substitutes local content so
//! the walk always reaches a summary.

use anyhow::Result;
use clap::Args;
use feelfwd_client::{ApiClient, Endpoint};
use feelfwd_core::{
    FactorCategory, FactorsRequest, Insights, Preference, PreferencesRequest, Reaction, Scenario,
    SummaryRequest, validate_rating,
};
use feelfwd_store::ErrorLog;
use serde::Serialize;
use tracing::{debug, info};

use super::Session;
use crate::fallback::{self, StepReport};
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the walk command.
#[derive(Args)]
pub struct WalkArgs {
    /// The decision to explore.
    pub topic: String,

    /// Number of factors to carry into preferences.
    #[arg(long, short = 's', default_value_t = 5)]
    pub select: usize,

    /// Importance given to every selected factor (1-10).
    #[arg(long, default_value_t = 5)]
    pub importance: u8,

    /// Excitement recorded for every scenario (1-10).
    #[arg(long, default_value_t = 5)]
    pub excitement: u8,

    /// Anxiety recorded for every scenario (1-10).
    #[arg(long, default_value_t = 5)]
    pub anxiety: u8,
}

impl WalkArgs {
    fn validate(&self) -> Result<()> {
        if self.topic.trim().is_empty() {
            anyhow::bail!("topic must not be empty");
        }
        validate_rating("importance", self.importance)?;
        validate_rating("excitement", self.excitement)?;
        validate_rating("anxiety", self.anxiety)?;
        Ok(())
    }
}

/// Everything a walk produced.
#[derive(Debug, Serialize)]
pub struct WalkReport {
    /// Decision topic.
    pub topic: String,
    /// One entry per phase, in order.
    pub steps: Vec<StepReport>,
    /// Phase 0 factors.
    pub factors: Vec<FactorCategory>,
    /// Phase 1 preferences.
    pub preferences: Vec<Preference>,
    /// Phase 2 scenarios.
    pub scenarios: Vec<Scenario>,
    /// Phase 3 reactions.
    pub reactions: Vec<Reaction>,
    /// Phase 4 summary and derived insights.
    pub insights: Insights,
}

impl WalkReport {
    /// Number of phases that used local content.
    pub fn offline_steps(&self) -> usize {
        self.steps.iter().filter(|s| s.used_fallback()).count()
    }
}

/// Runs the walk command.
pub async fn run(args: &WalkArgs, cli: &Cli) -> Result<()> {
    args.validate()?;

    let session = Session::open(cli).await?;
    let report = walk(&session.client, &session.log, args).await;

    info!(
        topic = %report.topic,
        offline_steps = report.offline_steps(),
        "Walk complete"
    );

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_walk(&report));
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format(&report)?);
        }
    }

    session.close().await;
    Ok(())
}

/// Runs all phases against `client`, falling back per phase.
pub async fn walk(client: &ApiClient, log: &ErrorLog, args: &WalkArgs) -> WalkReport {
    let topic = args.topic.trim().to_string();
    let mut steps = Vec::with_capacity(5);

    // Phase 0
    let factors = match client.get_factors(&FactorsRequest::new(&topic)).await {
        Ok(response) if !response.factors.is_empty() => {
            steps.push(StepReport::api(Endpoint::Factors));
            response.factors
        }
        Ok(_) => {
            steps.push(fallback::record(log, Endpoint::Factors, None, &topic));
            fallback::factors()
        }
        Err(e) => {
            steps.push(fallback::record(log, Endpoint::Factors, Some(&e), &topic));
            fallback::factors()
        }
    };

    // Phase 1
    let preferences: Vec<Preference> = FactorCategory::flatten(&factors)
        .into_iter()
        .take(args.select)
        .map(|factor| Preference::new(factor, args.importance))
        .collect();
    debug!(count = preferences.len(), "Selected preferences");

    let request = PreferencesRequest::new(preferences.clone(), &topic);
    match client.save_preferences(&request).await {
        Ok(_) => steps.push(StepReport::api(Endpoint::Preferences)),
        Err(e) => steps.push(fallback::record(log, Endpoint::Preferences, Some(&e), &topic)),
    }

    // Phase 2: skip the call entirely when the API looks down
    let scenarios = if client.health_check().await.healthy {
        match client.generate_scenarios(&request).await {
            Ok(response) if !response.scenarios.is_empty() => {
                steps.push(StepReport::api(Endpoint::Scenarios));
                response.scenarios
            }
            Ok(_) => {
                steps.push(fallback::record(log, Endpoint::Scenarios, None, &topic));
                fallback::scenarios(&topic)
            }
            Err(e) => {
                steps.push(fallback::record(log, Endpoint::Scenarios, Some(&e), &topic));
                fallback::scenarios(&topic)
            }
        }
    } else {
        steps.push(fallback::record(log, Endpoint::Scenarios, None, &topic));
        fallback::scenarios(&topic)
    };

    // Phase 3: reactions are kept locally even when saving fails
    let reactions: Vec<Reaction> = scenarios
        .iter()
        .map(|s| Reaction::new(&s.id, args.excitement, args.anxiety))
        .collect();

    let mut last_error = None;
    for reaction in &reactions {
        if let Err(e) = client.save_reaction(reaction).await {
            last_error = Some(e);
        }
    }
    match last_error {
        None => steps.push(StepReport::api(Endpoint::Reactions)),
        Some(e) => steps.push(fallback::record(log, Endpoint::Reactions, Some(&e), &topic)),
    }

    // Phase 4
    let request = SummaryRequest::new(reactions.clone(), preferences.clone());
    let summary = match client.generate_summary(&request).await {
        Ok(response) if !response.summary.trim().is_empty() => {
            steps.push(StepReport::api(Endpoint::Summary));
            response.summary
        }
        Ok(_) => {
            steps.push(fallback::record(log, Endpoint::Summary, None, &topic));
            fallback::FALLBACK_SUMMARY.to_string()
        }
        Err(e) => {
            steps.push(fallback::record(log, Endpoint::Summary, Some(&e), &topic));
            fallback::FALLBACK_SUMMARY.to_string()
        }
    };

    let insights = Insights::from_session(&topic, summary, &reactions, &preferences);

    WalkReport {
        topic,
        steps,
        factors,
        preferences,
        scenarios,
        reactions,
        insights,
    }
}
