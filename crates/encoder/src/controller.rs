//! Rotary encoder controller

use std::time::{Duration, Instant};

use contracts::Clock;
use profile::{AirspeedUnit, Continuous, Profile};
use tracing::{debug, instrument, trace};

use crate::axis::{Axis, Direction};

/// Presses closer together than this use the fast step.
pub const FAST_WINDOW: Duration = Duration::from_millis(250);

/// Mach values move in tenths of the knots step.
const MACH_SCALE: f32 = 0.1;

/// Result of one knob press
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KnobOutcome {
    /// The dial was written
    Adjusted { axis: Axis, value: f32, fast: bool },
    /// No active profile, no dials, or no dial for the selected axis
    NoDial,
}

/// Knob state: the selected axis and the time of the last applied press.
pub struct EncoderController<C: Clock> {
    clock: C,
    selected: Axis,
    last_command: Instant,
}

impl<C: Clock> EncoderController<C> {
    /// Starts on [`Axis::Altitude`]. The press clock starts at construction.
    pub fn new(clock: C) -> Self {
        let last_command = clock.now();
        Self {
            clock,
            selected: Axis::default(),
            last_command,
        }
    }

    pub fn select(&mut self, axis: Axis) {
        if self.selected != axis {
            debug!(from = %self.selected, to = %axis, "knob axis selected");
        }
        self.selected = axis;
    }

    pub fn selected(&self) -> Axis {
        self.selected
    }

    pub fn increment(&mut self, profile: Option<&Profile>) -> KnobOutcome {
        self.press(profile, Direction::Up)
    }

    pub fn decrement(&mut self, profile: Option<&Profile>) -> KnobOutcome {
        self.press(profile, Direction::Down)
    }

    #[instrument(
        name = "knob_press",
        level = "trace",
        skip(self, profile),
        fields(axis = %self.selected)
    )]
    pub fn press(&mut self, profile: Option<&Profile>, direction: Direction) -> KnobOutcome {
        let Some(dials) = profile.and_then(Profile::dials) else {
            trace!("no autopilot dials, press ignored");
            return KnobOutcome::NoDial;
        };

        let now = self.clock.now();
        let fast = now.saturating_duration_since(self.last_command) < FAST_WINDOW;
        let step = self.selected.step();
        let delta = direction.sign() * if fast { step.fast } else { step.slow };

        let value = match self.selected {
            Axis::Altitude => dials.alt.as_ref().map(|d| self.apply(d, delta)),
            Axis::VerticalSpeed => dials.vs.as_ref().map(|d| self.apply(d, delta)),
            Axis::Heading => dials.heading.as_ref().map(|d| self.apply(d, delta)),
            Axis::Course => dials.course.as_ref().map(|d| self.apply(d, delta)),
            Axis::Airspeed => dials.ias.as_ref().map(|d| {
                let delta = match d.unit() {
                    AirspeedUnit::Mach => delta * MACH_SCALE,
                    AirspeedUnit::Knots => delta,
                };
                self.apply(d, delta)
            }),
        };

        let Some(value) = value else {
            trace!("selected axis has no dial, press ignored");
            return KnobOutcome::NoDial;
        };

        self.last_command = now;
        metrics::counter!(
            "hcbravo_encoder_commands_total",
            "axis" => self.selected.as_str(),
            "direction" => direction.as_str()
        )
        .increment(1);
        debug!(axis = %self.selected, value, fast, "dial adjusted");

        KnobOutcome::Adjusted {
            axis: self.selected,
            value,
            fast,
        }
    }

    fn apply(&self, dial: &impl Continuous, delta: f32) -> f32 {
        let mut value = dial.get() + delta;
        if self.selected.clamps_at_zero() {
            value = value.max(0.0);
        }
        dial.set(value);
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::ManualClock;
    use profile::MockSim;
    use std::sync::Arc;

    const PROFILE: &str = "\
name: Test
icao_models: [TEST]
system: {volts: sim/volts}
autopilot:
  modes: {ap: sim/ap}
  dials:
    alt: sim/dial/alt
    vs: sim/dial/vs
    heading: sim/dial/hdg
    course: {key: sim/dial/crs, index: 1}
    ias: {value: sim/dial/ias, is_mach: sim/dial/is_mach}
";

    struct Fixture {
        sim: Arc<MockSim>,
        clock: ManualClock,
        profile: Profile,
        knob: EncoderController<ManualClock>,
    }

    fn fixture(doc: &str) -> Fixture {
        let sim = Arc::new(MockSim::new());
        for name in ["sim/dial/alt", "sim/dial/vs", "sim/dial/hdg", "sim/dial/ias"] {
            sim.set_float(name, 0.0);
        }
        sim.set_float_array("sim/dial/crs", &[0.0, 0.0]);
        sim.set_int("sim/dial/is_mach", 0);
        let node = serde_yaml::from_str(doc).unwrap();
        let profile = Profile::from_config(&node, &sim.as_sim()).unwrap();
        let clock = ManualClock::new();
        let knob = EncoderController::new(clock.clone());
        Fixture {
            sim,
            clock,
            profile,
            knob,
        }
    }

    #[test]
    fn test_fast_presses() {
        let mut f = fixture(PROFILE);
        f.sim.set_float("sim/dial/alt", 100.0);

        f.clock.advance_ms(50);
        let first = f.knob.increment(Some(&f.profile));
        assert_eq!(
            first,
            KnobOutcome::Adjusted {
                axis: Axis::Altitude,
                value: 1100.0,
                fast: true
            }
        );

        f.clock.advance_ms(100);
        f.knob.increment(Some(&f.profile));
        assert_eq!(f.sim.float("sim/dial/alt", None), Some(2100.0));
    }

    #[test]
    fn test_slow_presses() {
        let mut f = fixture(PROFILE);
        f.sim.set_float("sim/dial/alt", 3000.0);

        f.clock.advance_ms(250);
        f.knob.increment(Some(&f.profile));
        f.clock.advance_ms(400);
        f.knob.decrement(Some(&f.profile));
        f.clock.advance_ms(400);
        f.knob.decrement(Some(&f.profile));
        assert_eq!(f.sim.float("sim/dial/alt", None), Some(2900.0));
    }

    #[test]
    fn test_altitude_clamped_at_zero() {
        let mut f = fixture(PROFILE);
        f.clock.advance_ms(1000);
        let outcome = f.knob.decrement(Some(&f.profile));
        assert!(matches!(outcome, KnobOutcome::Adjusted { value, .. } if value == 0.0));
        assert_eq!(f.sim.float("sim/dial/alt", None), Some(0.0));
    }

    #[test]
    fn test_heading_and_vs_unclamped() {
        let mut f = fixture(PROFILE);
        f.clock.advance_ms(1000);

        f.knob.select(Axis::Heading);
        f.knob.decrement(Some(&f.profile));
        assert_eq!(f.sim.float("sim/dial/hdg", None), Some(-1.0));

        f.clock.advance_ms(1000);
        f.knob.select(Axis::VerticalSpeed);
        f.knob.decrement(Some(&f.profile));
        assert_eq!(f.sim.float("sim/dial/vs", None), Some(-100.0));
        assert_eq!(f.sim.float("sim/dial/alt", None), Some(0.0), "altitude untouched");
    }

    #[test]
    fn test_course_array_element() {
        let mut f = fixture(PROFILE);
        f.knob.select(Axis::Course);
        f.clock.advance_ms(1000);
        f.knob.increment(Some(&f.profile));
        assert_eq!(f.sim.float("sim/dial/crs", Some(0)), Some(0.0));
        assert_eq!(f.sim.float("sim/dial/crs", Some(1)), Some(1.0));
    }

    #[test]
    fn test_airspeed_mach_scaling() {
        let mut f = fixture(PROFILE);
        f.knob.select(Axis::Airspeed);
        f.sim.set_float("sim/dial/ias", 1.0);
        f.sim.set_int("sim/dial/is_mach", 1);

        f.clock.advance_ms(1000);
        f.knob.increment(Some(&f.profile));
        let value = f.sim.float("sim/dial/ias", None).unwrap();
        assert!((value - 1.1).abs() < 1e-6, "got {value}");

        f.sim.set_int("sim/dial/is_mach", 0);
        f.sim.set_float("sim/dial/ias", 250.0);
        f.clock.advance_ms(100);
        f.knob.increment(Some(&f.profile));
        assert_eq!(f.sim.float("sim/dial/ias", None), Some(252.0));
    }

    #[test]
    fn test_no_profile_is_noop_and_keeps_clock() {
        let mut f = fixture(PROFILE);
        f.clock.advance_ms(1000);
        assert_eq!(f.knob.increment(None), KnobOutcome::NoDial);

        // The ignored press did not restart the fast window.
        f.sim.set_float("sim/dial/alt", 0.0);
        f.clock.advance_ms(100);
        assert!(matches!(
            f.knob.increment(Some(&f.profile)),
            KnobOutcome::Adjusted { fast: false, .. }
        ));
    }

    #[test]
    fn test_missing_dial_is_noop() {
        let mut f = fixture(
            "name: T\nicao_models: [T]\nsystem: {volts: sim/volts}\nautopilot: {modes: {ap: sim/ap}, dials: {alt: sim/dial/alt}}\n",
        );
        f.knob.select(Axis::Heading);
        assert_eq!(f.knob.increment(Some(&f.profile)), KnobOutcome::NoDial);

        let bare = fixture("name: T\nicao_models: [T]\nsystem: {volts: sim/volts}\n");
        let mut knob = EncoderController::new(bare.clock.clone());
        assert_eq!(knob.increment(Some(&bare.profile)), KnobOutcome::NoDial);
    }

    #[test]
    fn test_select_keeps_last_axis() {
        let mut f = fixture(PROFILE);
        assert_eq!(f.knob.selected(), Axis::Altitude);
        f.knob.select(Axis::Course);
        f.knob.select(Axis::Course);
        assert_eq!(f.knob.selected(), Axis::Course);
    }
}
