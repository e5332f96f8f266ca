//! Web server command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};
use tg_core::ServerConfig;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on (defaults to $PORT, then 8080)
    #[arg(long)]
    pub port: Option<u16>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Directory with the built front-end to serve
    #[arg(long)]
    pub static_dir: Option<PathBuf>,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file path (defaults to logs/truthguard.log)
    #[arg(long, requires = "log")]
    pub log_file: Option<PathBuf>,
}

/// Merge command-line flags over the loaded configuration.
fn resolve_config(args: ServeArgs, config_path: Option<&Path>) -> Result<ServerConfig> {
    let mut config = ServerConfig::load(config_path)?;
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(dir) = args.static_dir {
        config.static_dir = Some(dir);
    }
    Ok(config)
}

pub async fn execute(args: ServeArgs, config_path: Option<&Path>) -> Result<()> {
    let config = resolve_config(args, config_path)?;

    println!();
    println!("  {} {}", "TruthGuard".cyan().bold(), "Analysis Server".bold());
    println!();
    println!(
        "  {}    http://{}:{}/api/analyze",
        "Analyze".green(),
        config.host,
        config.port
    );
    println!(
        "  {}     http://{}:{}/api/health",
        "Health".green(),
        config.host,
        config.port
    );
    if let Some(dir) = &config.static_dir {
        println!("  {}     {}", "Static".green(), dir.display());
    }
    println!("  {}      {}", "Model".green(), config.model);
    if config.credential().is_err() {
        println!(
            "  {} {}",
            "⚠".yellow().bold(),
            "GEMINI_API_KEY is not set; analysis requests will fail".yellow()
        );
    }
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    tg_web::run_server(config).await?;

    Ok(())
}
