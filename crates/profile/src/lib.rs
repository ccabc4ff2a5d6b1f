//! # Profile
//!
//! Declarative aircraft profiles.
//!
//! Responsibilities:
//! - Typed and composite sensors that reduce simulator values to booleans
//! - Continuous dials (plus the knots/mach airspeed dial)
//! - Profile construction from a [`ConfigNode`](contracts::ConfigNode) tree
//! - The profile registry and active-plane resolution
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use profile::{MockSim, Profile};
//!
//! let sim = Arc::new(MockSim::new());
//! sim.set_int("sim/cockpit/electrical/battery_on", 1);
//!
//! let doc = serde_yaml::from_str(
//!     "name: Skyhawk\nicao_models: [C172]\nsystem: {volts: sim/cockpit/electrical/battery_on}\n",
//! )
//! .unwrap();
//! let profile = Profile::from_config(&doc, &sim.as_sim()).unwrap();
//! assert!(profile.system().volts());
//! ```

#[macro_use]
mod macros;

mod blocks;
mod composite;
mod dial;
mod error;
mod mock_sim;
mod node;
mod profile;
mod registry;
mod sensor;
mod source;

pub use blocks::{AnnunciatorBlock, AutopilotBlock, DialBlock, ModeBlock, SystemBlock};
pub use composite::CompositeSensor;
pub use dial::{AirspeedDial, AirspeedUnit, Continuous, Dial};
pub use error::{ProfileError, Result};
pub use mock_sim::{MockSim, MockValue};
pub use profile::Profile;
pub use registry::{KeyKind, ProfileRegistry, RegistryConflict, RegistryIndex, RejectedDocument};
pub use sensor::{Indicator, SensorKind, TypedSensor};
pub use source::ValueSource;
