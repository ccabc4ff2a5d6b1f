//! # Integration Tests
//!
//! Cross-crate scenarios: profile documents on disk, a scripted simulator,
//! a recording panel and a manual clock, driven through the bridge.

#[cfg(test)]
mod fixture {
    use std::path::Path;
    use std::sync::Arc;

    use bridge::Bridge;
    use contracts::ManualClock;
    use led_sync::MockDevice;
    use profile::MockSim;

    pub struct Rig {
        pub dir: tempfile::TempDir,
        pub sim: Arc<MockSim>,
        pub device: MockDevice,
        pub clock: ManualClock,
        pub bridge: Bridge<ManualClock, MockDevice>,
    }

    impl Rig {
        /// Write `docs` into a fresh directory and load them.
        pub fn new(sim: MockSim, docs: &[(&str, &str)]) -> Self {
            let dir = tempfile::tempdir().unwrap();
            for (file, content) in docs {
                write(dir.path(), file, content);
            }
            let sim = Arc::new(sim);
            let device = MockDevice::new();
            let clock = ManualClock::new();
            let mut bridge = Bridge::new(sim.as_sim(), dir.path(), device.clone(), clock.clone());
            bridge.on_reload_requested().unwrap();
            Self {
                dir,
                sim,
                device,
                clock,
                bridge,
            }
        }

        pub fn dial(&self, name: &str) -> f32 {
            self.sim.float(name, None).unwrap()
        }
    }

    pub fn write(dir: &Path, file: &str, content: &str) {
        std::fs::write(dir.join(file), content).unwrap();
    }
}

#[cfg(test)]
mod registry_tests {
    use super::fixture::{write, Rig};
    use profile::{KeyKind, MockSim};

    fn doc(name: &str, models: &str) -> String {
        format!("name: {name}\nicao_models: [{models}]\nsystem: {{volts: sim/volts}}\n")
    }

    #[test]
    fn test_first_registered_wins_and_reload_reorders() {
        let first = doc("First", "B738");
        let second = doc("Second", "B738, B739");
        let mut rig = Rig::new(
            MockSim::permissive(),
            &[("a.yaml", first.as_str()), ("b.yaml", second.as_str())],
        );

        let index = rig.bridge.index();
        assert_eq!(index.resolve("", "B738").unwrap().name(), "First");
        assert_eq!(index.resolve("", "B739").unwrap().name(), "Second");
        assert_eq!(index.conflicts().len(), 1);

        // Swap the documents: the new first-registered profile owns the key.
        write(rig.dir.path(), "a.yaml", &second);
        write(rig.dir.path(), "b.yaml", &first);
        let index = rig.bridge.on_reload_requested().unwrap();
        assert_eq!(index.resolve("", "B738").unwrap().name(), "Second");
        assert_eq!(index.conflicts()[0].kept, "Second");
        assert_eq!(index.conflicts()[0].dropped, "First");
    }

    #[test]
    fn test_aircraft_name_preferred_over_icao() {
        let by_name = "name: ByName\naircraft_names: [Baron 58]\nicao_models: [XXXX]\nsystem: {volts: sim/volts}\n";
        let by_model = doc("ByModel", "BE58");
        let mut rig = Rig::new(
            MockSim::permissive(),
            &[("a.yaml", by_name), ("b.yaml", by_model.as_str())],
        );

        assert!(rig.bridge.on_aircraft_loaded("Baron 58", "BE58"));
        assert_eq!(rig.bridge.active_profile().unwrap().name(), "ByName");

        assert!(rig.bridge.on_aircraft_loaded("Baron 58 Turbo", "BE58"));
        assert_eq!(rig.bridge.active_profile().unwrap().name(), "ByModel");

        assert!(!rig.bridge.on_aircraft_loaded("Baron 58 Turbo", "BE55"));
        assert!(rig.bridge.active_profile().is_none());
    }

    #[test]
    fn test_bad_documents_are_skipped() {
        let good = doc("Good", "C172");
        let rig = Rig::new(
            MockSim::permissive(),
            &[
                ("good.yaml", good.as_str()),
                ("no_system.yaml", "name: Broken\nicao_models: [PA28]\n"),
                ("empty_models.yaml", "name: Empty\nicao_models: []\nsystem: {volts: v}\n"),
                ("syntax.yaml", "name: [unterminated\n"),
                ("bad_ap.yaml", "name: NoAp\nicao_models: [SR22]\nsystem: {volts: v}\nautopilot: {modes: {hdg: h}}\n"),
            ],
        );

        let index = rig.bridge.index();
        assert_eq!(index.profiles().len(), 1);
        assert_eq!(index.rejected().len(), 4);
        assert_eq!(index.entries(KeyKind::IcaoModel), vec![("C172", "Good")]);
    }

    #[test]
    fn test_missing_directory_empties_registry() {
        let good = doc("Good", "C172");
        let mut rig = Rig::new(MockSim::permissive(), &[("good.yaml", good.as_str())]);
        rig.bridge.on_aircraft_loaded("", "C172");

        std::fs::remove_file(rig.dir.path().join("good.yaml")).unwrap();
        std::fs::remove_dir(rig.dir.path()).unwrap();

        assert!(rig.bridge.on_reload_requested().is_err());
        assert!(rig.bridge.index().is_empty());
        assert!(rig.bridge.active_profile().is_none());
    }
}

#[cfg(test)]
mod panel_tests {
    use super::fixture::Rig;
    use bridge::Command;
    use led_sync::{LedId, LedMask, SyncOutcome};
    use profile::MockSim;

    const AP_ONLY: &str = "\
name: ApOnly
icao_models: [C172]
system: {volts: sim/volts}
autopilot:
  modes: {ap: sim/ap}
";

    const FULL: &str = "\
name: Full
icao_models: [B350]
system:
  volts: sim/volts
  gear: {key: sim/gear, type: int, values: [1]}
autopilot:
  modes:
    ap: sim/ap
    hdg: {key: sim/ap/mode, type: int, values: [2]}
    alt: {key: sim/ap/mode, type: int, values: [6]}
annunciator:
  master_warn: sim/warn
  fuel_low:
    - {key: sim/fuel_low, index: 0}
    - {key: sim/fuel_low, index: 1}
  door_open: {key: sim/door, invert: true}
";

    fn sim() -> MockSim {
        let sim = MockSim::new();
        sim.set_int("sim/volts", 1);
        sim.set_int("sim/ap", 0);
        sim.set_int("sim/gear", 1);
        sim.set_int("sim/ap/mode", 0);
        sim.set_int("sim/warn", 0);
        sim.set_int_array("sim/fuel_low", &[0, 0]);
        sim.set_int("sim/door", 1);
        sim
    }

    fn mask(ids: &[LedId]) -> LedMask {
        let mut mask = LedMask::default();
        for id in ids {
            mask.update(*id, true);
        }
        mask
    }

    #[test]
    fn test_ap_only_modes() {
        let mut rig = Rig::new(sim(), &[("c172.yaml", AP_ONLY)]);
        assert!(rig.bridge.on_aircraft_loaded("", "C172"));

        let profile = rig.bridge.active_profile().unwrap().clone();
        let modes = profile.modes().unwrap();
        for mode in [modes.hdg(), modes.nav(), modes.apr(), modes.rev(), modes.alt(), modes.vs(), modes.ias()] {
            assert_eq!(mode, None, "unconfigured modes are unknown, not false");
        }
        assert!(!modes.ap());
        assert_eq!(rig.bridge.tick(), SyncOutcome::Unchanged, "panel already dark");

        rig.sim.set_int("sim/ap", 1);
        assert!(modes.ap());
        assert_eq!(rig.bridge.tick(), SyncOutcome::Written);
        assert_eq!(rig.device.last_mask(), Some(mask(&[LedId::AP])));
    }

    #[test]
    fn test_full_panel() {
        let mut rig = Rig::new(sim(), &[("b350.yaml", FULL)]);
        rig.bridge.on_aircraft_loaded("King Air 350", "B350");

        rig.sim.set_int("sim/ap/mode", 2);
        rig.sim.set_element("sim/fuel_low", 1, 1.0);
        rig.bridge.tick();
        assert_eq!(
            rig.device.last_mask(),
            Some(mask(&[
                LedId::AP_HDG,
                LedId::GEAR_LEFT_GREEN,
                LedId::GEAR_NOSE_GREEN,
                LedId::GEAR_RIGHT_GREEN,
                LedId::FUEL_LOW,
            ]))
        );

        rig.sim.set_int("sim/ap/mode", 6);
        rig.sim.set_int("sim/gear", 0);
        rig.sim.set_int_array("sim/fuel_low", &[0, 0]);
        rig.sim.set_int("sim/door", 0);
        rig.sim.set_int("sim/warn", 1);
        rig.bridge.tick();
        assert_eq!(
            rig.device.last_mask(),
            Some(mask(&[
                LedId::AP_ALT,
                LedId::GEAR_LEFT_RED,
                LedId::GEAR_NOSE_RED,
                LedId::GEAR_RIGHT_RED,
                LedId::MASTER_WARN,
                LedId::DOOR_OPEN,
            ]))
        );
        assert_eq!(rig.device.write_count(), 2);
    }

    #[test]
    fn test_volts_off_goes_dark_with_one_write() {
        let mut rig = Rig::new(sim(), &[("b350.yaml", FULL)]);
        rig.bridge.on_aircraft_loaded("", "B350");
        rig.sim.set_int("sim/ap", 1);
        rig.sim.set_int("sim/warn", 1);
        rig.bridge.tick();
        assert_eq!(rig.device.write_count(), 1);

        rig.sim.set_int("sim/volts", 0);
        assert_eq!(rig.bridge.tick(), SyncOutcome::Written);
        assert_eq!(rig.bridge.tick(), SyncOutcome::Unchanged);
        assert_eq!(rig.device.write_count(), 2, "exactly one clearing write");
        assert_eq!(rig.device.last_mask(), Some(LedMask::DARK));
    }

    #[test]
    fn test_failed_write_resyncs_on_next_change() {
        let mut rig = Rig::new(sim(), &[("c172.yaml", AP_ONLY)]);
        rig.bridge.on_aircraft_loaded("", "C172");

        rig.device.set_failing(true);
        rig.sim.set_int("sim/ap", 1);
        assert_eq!(rig.bridge.tick(), SyncOutcome::Failed);
        rig.device.set_failing(false);
        assert_eq!(rig.bridge.tick(), SyncOutcome::Unchanged, "failed write not retried");

        rig.sim.set_int("sim/ap", 0);
        assert_eq!(rig.bridge.tick(), SyncOutcome::Written);
        assert_eq!(rig.device.last_mask(), Some(LedMask::DARK));
    }

    #[test]
    fn test_unload_clears_panel_once() {
        let mut rig = Rig::new(sim(), &[("c172.yaml", AP_ONLY)]);
        rig.bridge.on_aircraft_loaded("", "C172");
        rig.sim.set_int("sim/ap", 1);
        rig.bridge.tick();

        assert_eq!(rig.bridge.on_aircraft_unloaded(), SyncOutcome::Written);
        assert_eq!(rig.device.last_mask(), Some(LedMask::DARK));

        // Nothing active: ticks and knob presses do nothing.
        assert_eq!(rig.bridge.tick(), SyncOutcome::Unchanged);
        rig.bridge.handle(Command::KnobUp);
        assert_eq!(rig.device.write_count(), 2);
    }

    #[test]
    fn test_missing_sim_values_are_fail_soft() {
        let doc = "\
name: Sparse
icao_models: [C172]
system: {volts: sim/volts}
autopilot:
  modes: {ap: sim/missing/ap}
  dials: {alt: sim/missing/alt}
annunciator: {master_warn: sim/missing/warn}
";
        let sim = MockSim::new();
        sim.set_int("sim/volts", 1);
        let mut rig = Rig::new(sim, &[("c172.yaml", doc)]);

        assert!(rig.bridge.on_aircraft_loaded("", "C172"), "lookup misses never reject a profile");
        let profile = rig.bridge.active_profile().unwrap().clone();
        assert!(!profile.modes().unwrap().ap());
        assert_eq!(profile.annunciator().unwrap().master_warn(), Some(false));
        assert_eq!(rig.bridge.tick(), SyncOutcome::Unchanged);
    }
}

#[cfg(test)]
mod knob_tests {
    use super::fixture::Rig;
    use bridge::{Command, CommandStatus};
    use encoder::Axis;
    use profile::{AirspeedUnit, Continuous, MockSim};

    const DIALS: &str = "\
name: Dials
icao_models: [TBM9]
system: {volts: sim/volts}
autopilot:
  modes: {ap: sim/ap}
  dials:
    alt: sim/dial/alt
    vs: sim/dial/vs
    heading: sim/dial/hdg
    course: {key: sim/dial/crs, index: 0}
    ias: {value: sim/dial/ias, is_mach: sim/dial/mach}
";

    fn rig() -> Rig {
        let sim = MockSim::new();
        sim.set_int("sim/volts", 1);
        sim.set_int("sim/ap", 0);
        sim.set_float("sim/dial/alt", 100.0);
        sim.set_float("sim/dial/vs", 0.0);
        sim.set_float("sim/dial/hdg", 359.0);
        sim.set_float_array("sim/dial/crs", &[90.0, 270.0]);
        sim.set_float("sim/dial/ias", 1.0);
        sim.set_int("sim/dial/mach", 1);
        let mut rig = Rig::new(sim, &[("tbm.yaml", DIALS)]);
        assert!(rig.bridge.on_aircraft_loaded("TBM 900", "TBM9"));
        rig
    }

    #[test]
    fn test_fast_altitude_presses_then_clamp() {
        let mut rig = rig();
        assert_eq!(rig.bridge.selected_axis(), Axis::Altitude);

        rig.clock.advance_ms(100);
        rig.bridge.handle(Command::KnobUp);
        assert_eq!(rig.dial("sim/dial/alt"), 1100.0);
        rig.clock.advance_ms(100);
        rig.bridge.handle(Command::KnobUp);
        assert_eq!(rig.dial("sim/dial/alt"), 2100.0);

        rig.sim.set_float("sim/dial/alt", 0.0);
        rig.clock.advance_ms(1000);
        assert_eq!(rig.bridge.handle(Command::KnobDown), CommandStatus::Handled);
        assert_eq!(rig.dial("sim/dial/alt"), 0.0, "altitude never below zero");
    }

    #[test]
    fn test_mach_increment() {
        let mut rig = rig();
        rig.bridge.dispatch("HCBravo/IAS").unwrap();
        let profile = rig.bridge.active_profile().unwrap().clone();
        let ias = profile.dials().unwrap().ias.as_ref().unwrap();
        assert_eq!(ias.unit(), AirspeedUnit::Mach);

        rig.clock.advance_ms(1000);
        rig.bridge.dispatch("HCBravo/Inc").unwrap();
        assert!((ias.get() - 1.1).abs() < 1e-6, "got {}", ias.get());
    }

    #[test]
    fn test_vertical_speed_moves_its_own_dial() {
        let mut rig = rig();
        rig.bridge.handle(Command::SelectVerticalSpeed);
        rig.clock.advance_ms(1000);
        rig.bridge.handle(Command::KnobDown);
        rig.clock.advance_ms(50);
        rig.bridge.handle(Command::KnobDown);

        assert_eq!(rig.dial("sim/dial/vs"), -200.0, "unclamped, fast step is also 100");
        assert_eq!(rig.dial("sim/dial/alt"), 100.0, "altitude untouched");
    }

    #[test]
    fn test_heading_and_course_steps() {
        let mut rig = rig();
        rig.bridge.handle(Command::SelectHeading);
        rig.clock.advance_ms(1000);
        rig.bridge.handle(Command::KnobUp);
        rig.clock.advance_ms(10);
        rig.bridge.handle(Command::KnobUp);
        assert_eq!(rig.dial("sim/dial/hdg"), 365.0, "1 slow + 5 fast, no wrap");

        rig.bridge.handle(Command::SelectCourse);
        rig.clock.advance_ms(1000);
        rig.bridge.handle(Command::KnobDown);
        assert_eq!(rig.sim.float("sim/dial/crs", Some(0)), Some(89.0));
        assert_eq!(rig.sim.float("sim/dial/crs", Some(1)), Some(270.0));
    }

    #[test]
    fn test_knob_without_dials_is_noop() {
        let doc = "name: Bare\nicao_models: [C150]\nsystem: {volts: sim/volts}\n";
        let sim = MockSim::permissive();
        let mut rig = Rig::new(sim, &[("c150.yaml", doc)]);
        rig.bridge.on_aircraft_loaded("", "C150");

        assert_eq!(rig.bridge.handle(Command::SelectAirspeed), CommandStatus::Handled);
        assert_eq!(rig.bridge.handle(Command::KnobUp), CommandStatus::NoOp);
        assert_eq!(rig.bridge.handle(Command::KnobDown), CommandStatus::NoOp);
    }
}
