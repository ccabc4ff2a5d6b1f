//! Bridge metrics
//!
//! Counters are emitted where the events happen (`led_sync`, `encoder`,
//! `profile`); this module names them, describes them for the exporter, and
//! aggregates per-run tick statistics.

use metrics::{describe_counter, describe_gauge, describe_histogram, histogram, Unit};

pub const LED_WRITES: &str = "hcbravo_led_writes_total";
pub const LED_WRITE_FAILURES: &str = "hcbravo_led_write_failures_total";
pub const LED_WRITES_SKIPPED: &str = "hcbravo_led_writes_skipped_total";
pub const ENCODER_COMMANDS: &str = "hcbravo_encoder_commands_total";
pub const PROFILES_LOADED: &str = "hcbravo_profiles_loaded_total";
pub const PROFILES_REJECTED: &str = "hcbravo_profiles_rejected_total";
pub const REGISTRY_CONFLICTS: &str = "hcbravo_registry_conflicts_total";
pub const ACTIVE_PROFILE: &str = "hcbravo_active_profile";
pub const TICK_DURATION: &str = "hcbravo_tick_duration_us";

/// Register descriptions with the installed recorder
pub fn describe_metrics() {
    describe_counter!(LED_WRITES, "Panel reports sent");
    describe_counter!(LED_WRITE_FAILURES, "Panel reports rejected by the device");
    describe_counter!(LED_WRITES_SKIPPED, "Ticks whose mask matched the last write");
    describe_counter!(ENCODER_COMMANDS, "Knob presses applied to a dial, by axis and direction");
    describe_counter!(PROFILES_LOADED, "Profiles built by registry reloads");
    describe_counter!(PROFILES_REJECTED, "Profile documents rejected by registry reloads");
    describe_counter!(REGISTRY_CONFLICTS, "Duplicate aircraft or ICAO keys dropped");
    describe_gauge!(ACTIVE_PROFILE, "1 while a profile is active");
    describe_histogram!(TICK_DURATION, Unit::Microseconds, "Flight loop tick duration");
}

/// Record one tick's duration
pub fn record_tick_duration_us(duration_us: f64) {
    histogram!(TICK_DURATION).record(duration_us);
}

/// Per-run tick aggregation for the end-of-run summary
#[derive(Debug, Clone, Default)]
pub struct TickStatsAggregator {
    pub ticks: u64,
    pub writes: u64,
    pub failures: u64,
    pub duration_us: RunningStats,
}

impl TickStatsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, duration_us: f64, written: bool, failed: bool) {
        self.ticks += 1;
        if written {
            self.writes += 1;
        }
        if failed {
            self.failures += 1;
        }
        self.duration_us.push(duration_us);
        record_tick_duration_us(duration_us);
    }

    pub fn summary(&self) -> TickSummary {
        TickSummary {
            ticks: self.ticks,
            writes: self.writes,
            skipped: self.ticks - self.writes - self.failures,
            failures: self.failures,
            duration_us: StatsSummary::from(&self.duration_us),
        }
    }
}

/// Snapshot of a [`TickStatsAggregator`]
#[derive(Debug, Clone, PartialEq)]
pub struct TickSummary {
    pub ticks: u64,
    pub writes: u64,
    pub skipped: u64,
    pub failures: u64,
    pub duration_us: StatsSummary,
}

impl std::fmt::Display for TickSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Ticks: {}", self.ticks)?;
        writeln!(f, "  panel writes:   {}", self.writes)?;
        writeln!(f, "  unchanged:      {}", self.skipped)?;
        writeln!(f, "  write failures: {}", self.failures)?;
        write!(f, "  tick time (us): {}", self.duration_us)
    }
}

/// Mean / spread / range of a sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsSummary {
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            mean: stats.mean(),
            std_dev: stats.std_dev(),
            min: stats.min(),
            max: stats.max(),
        }
    }
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "mean={:.1} std={:.1} min={:.1} max={:.1}",
            self.mean, self.std_dev, self.min, self.max
        )
    }
}

/// Online mean and variance (Welford)
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    pub fn push(&mut self, value: f64) {
        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
            self.m2 = 0.0;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);

            let delta = value - self.mean;
            self.mean += delta / self.count as f64;
            self.m2 += delta * (value - self.mean);
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// Sample variance
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}
