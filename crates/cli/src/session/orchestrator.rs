//! Session orchestrator - drives one bridge from load to unload.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use bridge::{Bridge, Command, CommandStatus};
use contracts::{LedDevice, SystemClock};
use led_sync::{LogDevice, SyncOutcome};
use profile::MockSim;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use super::SessionStats;
use crate::cli::DeviceKind;
use crate::error::CliError;

/// Session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Profile directory
    pub profiles: PathBuf,

    /// Simulator snapshot (None = empty simulator)
    pub state: Option<PathBuf>,

    /// Aircraft identity override; read from the simulator when both are None
    pub aircraft: Option<String>,
    pub icao: Option<String>,

    /// Commands dispatched once, before the first tick
    pub commands: Vec<Command>,

    /// Number of ticks (None = until shutdown)
    pub ticks: Option<u64>,

    /// Delay between ticks
    pub interval: Duration,

    pub device: DeviceKind,
}

/// Open the configured panel output
pub fn open_device(kind: DeviceKind) -> Result<Box<dyn LedDevice>, CliError> {
    match kind {
        DeviceKind::Log => Ok(Box::new(LogDevice::new("log"))),
        #[cfg(feature = "hid")]
        DeviceKind::Hid => led_sync::HidLedDevice::open()
            .map(|d| Box::new(d) as Box<dyn LedDevice>)
            .map_err(|e| CliError::device(e.to_string())),
        #[cfg(not(feature = "hid"))]
        DeviceKind::Hid => Err(CliError::device(
            "this build has no HID support, rebuild with `--features hid`",
        )),
    }
}

/// One bridge session
pub struct Session {
    config: SessionConfig,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }

    /// Run against the configured device until the tick budget is spent or
    /// `shutdown` completes.
    pub async fn run<F>(self, shutdown: F) -> Result<SessionStats>
    where
        F: Future<Output = ()>,
    {
        let device = open_device(self.config.device)?;
        self.run_on(device, shutdown).await
    }

    /// Run against an already opened device. The panel is always cleared
    /// before returning.
    pub async fn run_on<D, F>(self, device: D, shutdown: F) -> Result<SessionStats>
    where
        D: LedDevice,
        F: Future<Output = ()>,
    {
        let start_time = Instant::now();
        let config = self.config;

        let sim = match &config.state {
            Some(path) => {
                info!(state = %path.display(), "Loading simulator snapshot");
                MockSim::load_snapshot(path)
                    .with_context(|| format!("Failed to load snapshot {}", path.display()))?
            }
            None => MockSim::new(),
        };
        let sim = Arc::new(sim);

        let mut bridge = Bridge::new(sim.as_sim(), &config.profiles, device, SystemClock);
        let index = bridge
            .on_reload_requested()
            .with_context(|| format!("Failed to read {}", config.profiles.display()))?;
        info!(
            profiles = index.profiles().len(),
            rejected = index.rejected().len(),
            "Profiles loaded"
        );

        let active = if config.aircraft.is_some() || config.icao.is_some() {
            bridge.on_aircraft_loaded(
                config.aircraft.as_deref().unwrap_or_default(),
                config.icao.as_deref().unwrap_or_default(),
            )
        } else {
            bridge.load_current_aircraft()
        };
        if !active {
            warn!(aircraft = ?bridge.aircraft(), "No profile matches the aircraft, panel stays dark");
        }

        let mut stats = SessionStats {
            aircraft: bridge.aircraft().cloned(),
            profile: bridge.active_profile().map(|p| p.name().to_string()),
            ..SessionStats::default()
        };

        for command in &config.commands {
            match bridge.handle(*command) {
                CommandStatus::Handled => stats.commands_handled += 1,
                CommandStatus::NoOp => stats.commands_ignored += 1,
            }
            info!(command = %command, axis = %bridge.selected_axis(), "Command dispatched");
        }

        let mut interval = tokio::time::interval(config.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        loop {
            if config.ticks.is_some_and(|max| stats.ticks.ticks >= max) {
                break;
            }
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    warn!("Received shutdown signal, stopping session...");
                    break;
                }
                _ = interval.tick() => {
                    let started = Instant::now();
                    let outcome = bridge.tick();
                    stats.ticks.record(
                        started.elapsed().as_secs_f64() * 1e6,
                        outcome == SyncOutcome::Written,
                        outcome == SyncOutcome::Failed,
                    );
                }
            }
        }

        stats.last_mask = bridge.leds().last_written();
        if bridge.on_aircraft_unloaded() == SyncOutcome::Failed {
            warn!("Failed to clear the panel on exit");
        }
        stats.duration = start_time.elapsed();

        info!(
            ticks = stats.ticks.ticks,
            writes = stats.ticks.writes,
            duration_secs = stats.duration.as_secs_f64(),
            "Session finished"
        );
        Ok(stats)
    }
}
