//! CLI argument definitions using clap.

use bridge::Command as PanelCommand;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// HCBravo - Bravo throttle quadrant bridge
#[derive(Parser, Debug)]
#[command(
    name = "hcbravo",
    author,
    version,
    about = "Bravo throttle quadrant bridge for X-Plane aircraft profiles",
    long_about = "Drives the Bravo throttle quadrant lamps and autopilot knob from\n\
                  per-aircraft YAML profiles.\n\n\
                  Validates profile directories, prints the aircraft index, and runs\n\
                  the bridge against a simulator state snapshot."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "HCBRAVO_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose", env = "HCBRAVO_QUIET")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "HCBRAVO_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    /// Prometheus exporter port (0 = disabled)
    #[arg(long, default_value = "0", global = true, env = "HCBRAVO_METRICS_PORT")]
    pub metrics_port: u16,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the bridge against a simulator snapshot
    Run(RunArgs),

    /// Build every profile in a directory and report problems
    Validate(ValidateArgs),

    /// Print the aircraft index of a profile directory
    Info(InfoArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Profile directory
    #[arg(short, long, default_value = "profiles", env = "HCBRAVO_PROFILES")]
    pub profiles: PathBuf,

    /// Simulator state snapshot (YAML map of value name to value)
    #[arg(short, long, env = "HCBRAVO_STATE")]
    pub state: Option<PathBuf>,

    /// Aircraft display name (read from the snapshot when omitted)
    #[arg(long, env = "HCBRAVO_AIRCRAFT")]
    pub aircraft: Option<String>,

    /// Aircraft ICAO type code (read from the snapshot when omitted)
    #[arg(long, env = "HCBRAVO_ICAO")]
    pub icao: Option<String>,

    /// Number of ticks to run (0 = until Ctrl-C)
    #[arg(long, default_value = "1", env = "HCBRAVO_TICKS")]
    pub ticks: u64,

    /// Delay between ticks in milliseconds
    #[arg(long, default_value = "100", env = "HCBRAVO_INTERVAL_MS")]
    pub interval_ms: u64,

    /// Command path to dispatch before ticking (repeatable, e.g. HCBravo/Inc)
    #[arg(
        long = "command",
        value_name = "PATH",
        value_delimiter = ',',
        env = "HCBRAVO_COMMANDS"
    )]
    pub commands: Vec<PanelCommand>,

    /// Panel output
    #[arg(long, value_enum, default_value = "log", env = "HCBRAVO_DEVICE")]
    pub device: DeviceKind,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Profile directory to validate
    #[arg(short, long, default_value = "profiles", env = "HCBRAVO_PROFILES")]
    pub profiles: PathBuf,

    /// Output validation result as JSON
    #[arg(long, env = "HCBRAVO_JSON")]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Profile directory
    #[arg(short, long, default_value = "profiles", env = "HCBRAVO_PROFILES")]
    pub profiles: PathBuf,

    /// Output as JSON
    #[arg(long, env = "HCBRAVO_JSON")]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}

/// Panel output selection
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeviceKind {
    /// Log every report instead of touching hardware
    #[default]
    Log,
    /// The USB panel (needs the `hid` feature)
    Hid,
}
