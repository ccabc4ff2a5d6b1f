//! # Encoder
//!
//! Autopilot rotary knob.
//!
//! One selector picks the axis ([`Axis`]); increment and decrement presses
//! step the matching dial of the active profile. Presses less than
//! [`FAST_WINDOW`] apart use the fast step. Altitude and airspeed never go
//! below zero, and airspeed steps shrink tenfold while the dial shows Mach.

mod axis;
mod controller;

pub use axis::{Axis, Direction, Step};
pub use controller::{EncoderController, KnobOutcome, FAST_WINDOW};
