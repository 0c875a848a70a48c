//! Config command - show the effective configuration.

use anyhow::Result;
use feelfwd_store::{AppConfig, default_error_log_path};

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Runs the config command.
pub async fn run(cli: &Cli) -> Result<()> {
    let mut config = AppConfig::load().await?;
    if let Some(url) = &cli.api_url {
        config.api_url.clone_from(url);
    }

    let config_path = AppConfig::default_path();
    let log_path = default_error_log_path();

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_config(&config, &config_path, &log_path));
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "config": config,
                "config_file": config_path.display().to_string(),
                "error_log_file": log_path.display().to_string(),
            });
            println!("{}", JsonFormatter::new(cli.pretty).format(&output)?);
        }
    }

    Ok(())
}
