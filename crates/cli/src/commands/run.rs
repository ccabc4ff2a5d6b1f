//! `run` command implementation.

use anyhow::{Context, Result};
use std::time::Duration;
use tracing::{info, warn};

use crate::cli::RunArgs;
use crate::error::ensure_profiles_dir;
use crate::session::{Session, SessionConfig};

/// Execute the `run` command
pub async fn run_session(args: &RunArgs) -> Result<()> {
    info!(profiles = %args.profiles.display(), "Starting bridge session");
    ensure_profiles_dir(&args.profiles)?;

    let config = SessionConfig {
        profiles: args.profiles.clone(),
        state: args.state.clone(),
        aircraft: args.aircraft.clone(),
        icao: args.icao.clone(),
        commands: args.commands.clone(),
        ticks: if args.ticks == 0 {
            None
        } else {
            Some(args.ticks)
        },
        interval: Duration::from_millis(args.interval_ms.max(1)),
        device: args.device,
    };

    let stats = Session::new(config)
        .run(shutdown_signal())
        .await
        .context("Bridge session failed")?;

    info!(
        ticks = stats.ticks.ticks,
        panel_writes = stats.ticks.writes,
        duration_secs = stats.duration.as_secs_f64(),
        tick_rate = format!("{:.2}", stats.tick_rate()),
        "Session completed"
    );
    stats.print_summary();

    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM. A handler that cannot be installed never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
