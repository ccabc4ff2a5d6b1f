//! Profile blocks

use std::sync::Arc;

use contracts::{ConfigNode, SimAccess};

use crate::dial::{AirspeedDial, Dial};
use crate::error::{ProfileError, Result};
use crate::node::{child, optional, required};

define_indicator_block!(
    /// Bus power and landing gear. `volts` gates the whole panel.
    SystemBlock {
        required: [volts],
        optional: [gear],
    }
);

define_indicator_block!(
    /// Autopilot mode lamps. `ap` reports whether the servos are engaged.
    ModeBlock {
        required: [ap],
        optional: [hdg, nav, apr, rev, alt, vs, ias],
    }
);

define_indicator_block!(
    /// Annunciator panel. Every lamp is optional.
    AnnunciatorBlock {
        required: [],
        optional: [
            master_warn,
            eng_fire,
            oil_low,
            fuel_low,
            anti_ice,
            starter,
            apu,
            master_caution,
            vacuum_low,
            hydro_low,
            aux_fuel,
            parking_brake,
            volt_low,
            door_open,
        ],
    }
);

/// Autopilot dials the knob can drive
#[derive(Debug, Clone, Default)]
pub struct DialBlock {
    pub course: Option<Dial>,
    pub heading: Option<Dial>,
    pub vs: Option<Dial>,
    pub alt: Option<Dial>,
    pub ias: Option<AirspeedDial>,
}

impl DialBlock {
    pub fn build(node: &ConfigNode, sim: &Arc<dyn SimAccess>, field: &str) -> Result<Self> {
        if !node.is_mapping() {
            return Err(ProfileError::invalid_node(field, "map", node));
        }

        let dial = |key: &str| -> Result<Option<Dial>> {
            optional(node, key)
                .map(|n| Dial::build(n, sim, &child(field, key)))
                .transpose()
        };

        // `airspeed` is the older spelling
        let ias = match (optional(node, "ias"), optional(node, "airspeed")) {
            (Some(n), _) => Some(AirspeedDial::build(n, sim, &child(field, "ias"))?),
            (None, Some(n)) => Some(AirspeedDial::build(n, sim, &child(field, "airspeed"))?),
            (None, None) => None,
        };

        Ok(Self {
            course: dial("course")?,
            heading: dial("heading")?,
            vs: dial("vs")?,
            alt: dial("alt")?,
            ias,
        })
    }

    pub fn configured(&self) -> usize {
        [
            self.course.is_some(),
            self.heading.is_some(),
            self.vs.is_some(),
            self.alt.is_some(),
            self.ias.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }
}

/// Autopilot modes plus the optional dial set
#[derive(Debug, Clone)]
pub struct AutopilotBlock {
    pub modes: ModeBlock,
    pub dials: Option<DialBlock>,
}

impl AutopilotBlock {
    pub fn build(node: &ConfigNode, sim: &Arc<dyn SimAccess>, field: &str) -> Result<Self> {
        if !node.is_mapping() {
            return Err(ProfileError::invalid_node(field, "map", node));
        }
        let modes_field = child(field, "modes");
        let modes = ModeBlock::build(required(node, "modes", field)?, sim, &modes_field)?;
        let dials = optional(node, "dials")
            .map(|n| DialBlock::build(n, sim, &child(field, "dials")))
            .transpose()?;
        Ok(Self { modes, dials })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MockSim;

    fn yaml(s: &str) -> ConfigNode {
        serde_yaml::from_str(s).unwrap()
    }

    #[test]
    fn test_modes_only_ap() {
        let sim = Arc::new(MockSim::new());
        sim.set_int("sim/ap/servos_on", 0);
        let modes = ModeBlock::build(&yaml("ap: sim/ap/servos_on"), &sim.as_sim(), "autopilot.modes")
            .unwrap();

        assert_eq!(modes.configured(), 1);
        assert_eq!(modes.hdg(), None);
        assert_eq!(modes.nav(), None);
        assert_eq!(modes.apr(), None);
        assert_eq!(modes.rev(), None);
        assert_eq!(modes.alt(), None);
        assert_eq!(modes.vs(), None);
        assert_eq!(modes.ias(), None);
        assert!(!modes.ap());

        sim.set_int("sim/ap/servos_on", 1);
        assert!(modes.ap());
    }

    #[test]
    fn test_modes_missing_ap() {
        let sim = Arc::new(MockSim::new());
        let err = ModeBlock::build(&yaml("hdg: sim/ap/hdg"), &sim.as_sim(), "autopilot.modes")
            .unwrap_err();
        assert!(
            matches!(err, ProfileError::MissingField { ref field } if field == "autopilot.modes.ap"),
            "got: {err}"
        );
    }

    #[test]
    fn test_system_gear_optional() {
        let sim = Arc::new(MockSim::new());
        sim.set_int("sim/volts", 1);
        let system = SystemBlock::build(&yaml("volts: sim/volts"), &sim.as_sim(), "system").unwrap();
        assert!(system.volts());
        assert_eq!(system.gear(), None);
        assert_eq!(system.configured(), 1);
    }

    #[test]
    fn test_annunciator_all_optional() {
        let sim = Arc::new(MockSim::new());
        sim.set_int("sim/door", 1);
        let block = AnnunciatorBlock::build(&yaml("door_open: sim/door"), &sim.as_sim(), "annunciator")
            .unwrap();
        assert_eq!(block.configured(), 1);
        assert_eq!(block.door_open(), Some(true));
        assert_eq!(block.master_warn(), None);

        let empty = AnnunciatorBlock::build(&yaml("{}"), &sim.as_sim(), "annunciator").unwrap();
        assert_eq!(empty.configured(), 0);
    }

    #[test]
    fn test_block_must_be_map() {
        let sim = Arc::new(MockSim::new());
        let err = SystemBlock::build(&yaml("[sim/volts]"), &sim.as_sim(), "system").unwrap_err();
        assert!(matches!(err, ProfileError::InvalidNode { ref field, .. } if field == "system"));
    }

    #[test]
    fn test_optional_indicator_error_is_fatal() {
        let sim = Arc::new(MockSim::new());
        let err = AnnunciatorBlock::build(
            &yaml("door_open: {key: sim/door, type: text}"),
            &sim.as_sim(),
            "annunciator",
        )
        .unwrap_err();
        assert!(matches!(err, ProfileError::UnknownSensorType { .. }), "got: {err}");
    }

    #[test]
    fn test_dials_with_airspeed_alias() {
        let sim = Arc::new(MockSim::new());
        sim.set_float("sim/ap/alt", 5000.0);
        sim.set_float("sim/ap/kts", 120.0);
        sim.set_int("sim/ap/is_mach", 0);

        let dials = DialBlock::build(
            &yaml("alt: sim/ap/alt\nairspeed: {value: sim/ap/kts, is_mach: sim/ap/is_mach}\n"),
            &sim.as_sim(),
            "autopilot.dials",
        )
        .unwrap();
        assert_eq!(dials.configured(), 2);
        assert!(dials.alt.is_some());
        assert!(dials.ias.is_some());
        assert!(dials.heading.is_none());
    }

    #[test]
    fn test_autopilot_dials_optional() {
        let sim = Arc::new(MockSim::new());
        let ap = AutopilotBlock::build(&yaml("modes: {ap: sim/ap}"), &sim.as_sim(), "autopilot")
            .unwrap();
        assert!(ap.dials.is_none());

        let err = AutopilotBlock::build(&yaml("dials: {alt: sim/alt}"), &sim.as_sim(), "autopilot")
            .unwrap_err();
        assert!(
            matches!(err, ProfileError::MissingField { ref field } if field == "autopilot.modes"),
            "got: {err}"
        );
    }
}
