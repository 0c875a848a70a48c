// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! Feel Forward CLI - explore a decision from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Is the API reachable?
//! feelfwd health
//!
//! # Suggested factors for a decision
//! feelfwd factors "Should I take the new job?"
//!
//! # Run the whole flow non-interactively
//! feelfwd walk "Should I move to Lisbon?" --select 4
//!
//! # JSON output against a local API
//! feelfwd --format json --api-url http://localhost:8000 walk "new job"
//!
//! # Inspect or clear the local error log
//! feelfwd errors
//! feelfwd errors --clear
//! ```

mod commands;
mod fallback;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{config, errors, factors, health, walk};

// ============================================================================
// CLI Definition
// ============================================================================

/// Feel Forward CLI - decision exploration.
#[derive(Parser)]
#[command(name = "feelfwd")]
#[command(about = "Explore a decision through factors, scenarios and reactions")]
#[command(long_about = r#"
Feel Forward walks a decision through five phases:

  0. factors     what matters for this decision
  1. preferences how much each factor matters
  2. scenarios   three possible futures
  3. reactions   how each future feels
  4. summary     what your reactions say

When the API is unreachable every phase falls back to local sample content,
so a walk always completes.

Examples:
  feelfwd health                       # API status
  feelfwd factors "new job"            # Phase 0 only
  feelfwd walk "new job" --select 3    # All phases
  feelfwd --format json walk "move"    # JSON output
"#)]
#[command(version)]
#[command(author = "Feel Forward Contributors")]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// API base URL, overriding config and FEELFWD_API_URL.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Check whether the API is reachable.
    #[command(visible_alias = "h")]
    Health,

    /// Suggest decision factors for a topic.
    #[command(visible_alias = "f")]
    Factors(factors::FactorsArgs),

    /// Run every phase for a topic without prompts.
    #[command(visible_alias = "w")]
    Walk(walk::WalkArgs),

    /// Show or clear the local error log.
    Errors(errors::ErrorsArgs),

    /// Show the effective configuration.
    Config,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// Invalid configuration.
    ConfigError = 2,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let filter = if verbose {
        EnvFilter::new("feelfwd=debug,info")
    } else {
        EnvFilter::new("feelfwd=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Health => health::run(&cli).await,
        Commands::Factors(args) => factors::run(args, &cli).await,
        Commands::Walk(args) => walk::run(args, &cli).await,
        Commands::Errors(args) => errors::run(args, &cli).await,
        Commands::Config => config::run(&cli).await,
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e:#}");
        }
        let code = if e.downcast_ref::<feelfwd_store::StoreError>().is_some() {
            ExitCode::ConfigError
        } else {
            ExitCode::Error
        };
        std::process::exit(code as i32);
    }

    Ok(())
}
