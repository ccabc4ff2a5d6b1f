//! Session statistics.

use std::time::Duration;

use bridge::AircraftIdentity;
use led_sync::LedMask;
use observability::TickStatsAggregator;

/// Statistics from one session
#[derive(Debug, Clone, Default)]
pub struct SessionStats {
    /// Aircraft the session resolved against
    pub aircraft: Option<AircraftIdentity>,

    /// Name of the profile that was active after resolution
    pub profile: Option<String>,

    /// Commands that selected an axis or moved a dial
    pub commands_handled: u64,

    /// Commands with nothing to act on
    pub commands_ignored: u64,

    /// Last mask written before the final clear
    pub last_mask: LedMask,

    /// Per-tick panel sync results
    pub ticks: TickStatsAggregator,

    /// Wall time of the session
    pub duration: Duration,
}

impl SessionStats {
    /// Ticks per second
    pub fn tick_rate(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.ticks.ticks as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Print detailed summary
    pub fn print_summary(&self) {
        println!("\n=== Session Statistics ===\n");

        match &self.aircraft {
            Some(a) => println!("Aircraft: {} ({})", a.name, a.icao),
            None => println!("Aircraft: (none)"),
        }
        println!(
            "Profile:  {}",
            self.profile.as_deref().unwrap_or("(no matching profile)")
        );
        println!("Duration: {:.2}s", self.duration.as_secs_f64());
        println!(
            "Commands: {} handled, {} ignored",
            self.commands_handled, self.commands_ignored
        );
        println!("Last panel mask: {}", self.last_mask);
        println!("\n{}", self.ticks.summary());
        println!("  tick rate:      {:.2}/s", self.tick_rate());
        println!();
    }
}
