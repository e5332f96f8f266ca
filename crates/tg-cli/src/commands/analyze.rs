//! Analysis command.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tg_client::{AnalysisClient, AnalysisSession};
use tokio::io::AsyncReadExt;

use crate::output;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Text to analyze (reads stdin when omitted)
    pub text: Option<String>,

    /// Server URL
    #[arg(long, env = "TRUTHGUARD_URL", default_value = tg_client::client::DEFAULT_URL)]
    pub url: String,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

async fn read_input(text: Option<String>) -> Result<String> {
    match text {
        Some(text) => Ok(text),
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("Failed to read text from stdin")?;
            Ok(buf)
        }
    }
}

fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message("Analyzing...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub async fn execute(args: AnalyzeArgs) -> Result<()> {
    let text = read_input(args.text).await?;
    let client = AnalysisClient::with_url(&args.url);
    let mut session = AnalysisSession::new();

    let pb = (!args.json).then(spinner);
    let outcome = session.submit(&client, &text).await;
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    match outcome {
        Ok(result) if args.json => {
            println!("{}", serde_json::to_string_pretty(result)?);
        }
        Ok(result) => output::print_result(result),
        Err(e) => {
            eprintln!("{} {}", "✗".red().bold(), e.to_string().red());
            std::process::exit(1);
        }
    }

    Ok(())
}
