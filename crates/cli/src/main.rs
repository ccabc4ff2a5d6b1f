//! # HCBravo CLI
//!
//! Command-line entry point.
//!
//! Provides:
//! - Profile directory validation
//! - Aircraft index listing
//! - A bridge session against a simulator snapshot with graceful shutdown

mod cli;
mod commands;
mod error;
mod session;

use anyhow::Result;
use clap::Parser;
use observability::ObservabilityConfig;
use tracing::info;

use cli::{Cli, Commands};
use commands::{run_info, run_session, run_validate};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_logging(&cli)?;

    info!(version = env!("CARGO_PKG_VERSION"), "HCBravo CLI starting");

    let result = match &cli.command {
        Commands::Run(args) => run_session(args).await,
        Commands::Validate(args) => run_validate(args),
        Commands::Info(args) => run_info(args),
    };

    if let Err(ref e) = result {
        tracing::error!(error = %e, "Command failed");
    }

    result
}

/// Initialize tracing (and the exporter, if requested) from CLI options
fn init_logging(cli: &Cli) -> Result<()> {
    observability::init_with_config(ObservabilityConfig {
        log_format: cli.log_format.clone().into(),
        ..ObservabilityConfig::from_verbosity(cli.verbose, cli.quiet)
            .with_metrics_port(cli.metrics_port)
    })
}
