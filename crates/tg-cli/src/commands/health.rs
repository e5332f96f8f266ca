//! Health check command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use tg_client::AnalysisClient;

#[derive(Args)]
pub struct HealthArgs {
    /// Server URL
    #[arg(long, env = "TRUTHGUARD_URL", default_value = tg_client::client::DEFAULT_URL)]
    pub url: String,
}

pub async fn execute(args: HealthArgs) -> Result<()> {
    let client = AnalysisClient::with_url(&args.url);
    let health = client.health().await?;

    println!(
        "{} {} {}",
        "✓".green().bold(),
        health.status.green(),
        format!("({})", health.timestamp).dimmed()
    );
    Ok(())
}
