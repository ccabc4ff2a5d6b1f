//! # Contracts
//!
//! Frozen interface contracts shared by every crate of the bridge.
//! Business crates depend on this crate only; reverse dependencies are prohibited.
//!
//! ## Boundaries
//! - [`SimAccess`]: named simulator values (lookup once, read/write many)
//! - [`LedDevice`]: the panel hardware, written with whole feature reports
//! - [`Clock`]: injectable monotonic time for the knob acceleration window
//! - [`ConfigNode`]: the parsed, format-neutral configuration tree

mod clock;
mod device;
mod error;
mod node;
mod sim;

pub use clock::{Clock, ManualClock, SystemClock};
pub use device::LedDevice;
pub use error::*;
pub use node::{node_kind, ConfigNode};
pub use sim::{SimAccess, ValueHandle};
