//! Factors command - phase 0 on its own.

use anyhow::Result;
use clap::Args;
use feelfwd_client::Endpoint;
use feelfwd_core::FactorsRequest;

use super::Session;
use crate::fallback::{self, StepReport};
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the factors command.
#[derive(Args)]
pub struct FactorsArgs {
    /// The decision to explore, e.g. "Should I take the new job?".
    pub topic: String,
}

/// Runs the factors command.
pub async fn run(args: &FactorsArgs, cli: &Cli) -> Result<()> {
    let request = FactorsRequest::new(args.topic.trim());
    request.validate()?;

    let session = Session::open(cli).await?;

    let (factors, step) = match session.client.get_factors(&request).await {
        Ok(response) => (response.factors, StepReport::api(Endpoint::Factors)),
        Err(e) => (
            fallback::factors(),
            fallback::record(&session.log, Endpoint::Factors, Some(&e), &request.topic),
        ),
    };

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_factors(&factors));
            if step.used_fallback() && !cli.quiet {
                println!();
                println!("{}", formatter.format_step(&step));
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "topic": request.topic,
                "factors": factors,
                "step": step,
            });
            println!("{}", JsonFormatter::new(cli.pretty).format(&output)?);
        }
    }

    session.close().await;
    Ok(())
}
