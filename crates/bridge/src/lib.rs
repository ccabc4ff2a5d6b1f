//! # Bridge
//!
//! Ties the profile registry, the panel lamps and the autopilot knob together
//! behind the hooks a simulator host calls:
//!
//! - lifecycle: [`Bridge::on_aircraft_loaded`], [`Bridge::on_aircraft_unloaded`],
//!   [`Bridge::on_reload_requested`]
//! - flight loop: [`Bridge::tick`]
//! - commands: [`Bridge::handle`] / [`Bridge::dispatch`] for the [`Command`] catalogue

mod bridge;
mod command;
mod error;

pub use bridge::{AircraftIdentity, Bridge, CommandStatus, ACF_ICAO, ACF_NAME};
pub use command::Command;
pub use error::{BridgeError, Result};
