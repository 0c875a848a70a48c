//! Health command - is the API reachable?

use anyhow::Result;

use super::Session;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Runs the health command. Reports offline rather than failing.
pub async fn run(cli: &Cli) -> Result<()> {
    let session = Session::open(cli).await?;
    let response = session.client.health_check().await;

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_health(&response, session.client.base_url()));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_health(&response, session.client.base_url())?);
        }
    }

    session.close().await;
    Ok(())
}
