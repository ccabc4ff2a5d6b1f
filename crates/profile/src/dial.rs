//! Continuous dials - float simulator values the knob reads and writes

use std::sync::Arc;

use contracts::{ConfigNode, SimAccess};

use crate::error::{ProfileError, Result};
use crate::node::{child, required};
use crate::sensor::{Indicator, SensorSpec, TypedSensor};
use crate::source::ValueSource;

/// Read/write access to a float value
pub trait Continuous {
    fn get(&self) -> f32;
    fn set(&self, value: f32);
}

/// A float simulator value. Unresolved dials read 0.0 and drop writes.
#[derive(Debug, Clone)]
pub struct Dial {
    source: ValueSource,
}

impl Dial {
    /// Build from a sensor-shaped node; only `key` and `index` are used.
    pub fn build(node: &ConfigNode, sim: &Arc<dyn SimAccess>, field: &str) -> Result<Self> {
        let spec = SensorSpec::parse(node, field)?;
        Ok(Self {
            source: ValueSource::resolve(sim, &spec.key, spec.index),
        })
    }

    pub fn source(&self) -> &ValueSource {
        &self.source
    }
}

impl Continuous for Dial {
    fn get(&self) -> f32 {
        self.source.read_float().unwrap_or(0.0)
    }

    fn set(&self, value: f32) {
        self.source.write_float(value);
    }
}

/// Unit the airspeed dial is currently displaying
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AirspeedUnit {
    Knots,
    Mach,
}

/// Airspeed dial paired with its knots/mach flag.
///
/// ```yaml
/// ias:
///   value: sim/cockpit2/autopilot/airspeed_dial_kts_mach
///   is_mach: sim/cockpit/autopilot/airspeed_is_mach
/// ```
#[derive(Debug, Clone)]
pub struct AirspeedDial {
    value: Dial,
    is_mach: TypedSensor,
}

impl AirspeedDial {
    pub fn build(node: &ConfigNode, sim: &Arc<dyn SimAccess>, field: &str) -> Result<Self> {
        if !node.is_mapping() {
            return Err(ProfileError::invalid_node(field, "map", node));
        }
        let value_field = child(field, "value");
        let mach_field = child(field, "is_mach");
        Ok(Self {
            value: Dial::build(required(node, "value", field)?, sim, &value_field)?,
            is_mach: TypedSensor::build(required(node, "is_mach", field)?, sim, &mach_field)?,
        })
    }

    pub fn unit(&self) -> AirspeedUnit {
        if self.is_mach.is_set() {
            AirspeedUnit::Mach
        } else {
            AirspeedUnit::Knots
        }
    }

    pub fn dial(&self) -> &Dial {
        &self.value
    }
}

impl Continuous for AirspeedDial {
    fn get(&self) -> f32 {
        self.value.get()
    }

    fn set(&self, value: f32) {
        self.value.set(value);
    }
}
