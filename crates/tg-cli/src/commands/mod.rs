//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod analyze;
pub mod health;
pub mod serve;

/// TruthGuard - AI-assisted news veracity checks
#[derive(Parser)]
#[command(name = "truthguard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true, env = "TRUTHGUARD_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the analysis server
    Serve(serve::ServeArgs),

    /// Analyze a piece of text
    Analyze(analyze::AnalyzeArgs),

    /// Check that a server is up
    Health(health::HealthArgs),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Serve(args) => serve::execute(args, self.config.as_deref()).await,
            Commands::Analyze(args) => analyze::execute(args).await,
            Commands::Health(args) => health::execute(args).await,
        }
    }
}
