//! Errors command - inspect the local error log.

use anyhow::Result;
use clap::Args;
use feelfwd_store::{ErrorLog, default_error_log_path};

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the errors command.
#[derive(Args, Default)]
pub struct ErrorsArgs {
    /// Delete the log instead of showing it.
    #[arg(long)]
    pub clear: bool,

    /// Show only the most recent N entries.
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

/// Runs the errors command.
pub async fn run(args: &ErrorsArgs, cli: &Cli) -> Result<()> {
    let path = default_error_log_path();

    if args.clear {
        ErrorLog::remove_persisted(&path).await?;
        if !cli.quiet {
            println!("Error log cleared.");
        }
        return Ok(());
    }

    let log = ErrorLog::load(&path).await?;
    let mut entries = log.entries();
    if let Some(limit) = args.limit {
        let skip = entries.len().saturating_sub(limit);
        entries.drain(..skip);
    }

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_errors(&entries));
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format(&entries)?);
        }
    }

    Ok(())
}
