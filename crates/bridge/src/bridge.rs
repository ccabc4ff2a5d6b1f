//! Bridge - the engine context the host drives

use std::path::{Path, PathBuf};
use std::sync::Arc;

use contracts::{Clock, ContractError, LedDevice, SimAccess};
use encoder::{Axis, Direction, EncoderController, KnobOutcome};
use led_sync::{build_mask, LedSynchronizer, SyncOutcome};
use profile::{Profile, ProfileRegistry, RegistryIndex};
use tracing::{debug, info, instrument};

use crate::command::Command;

/// Simulator value holding the loaded aircraft's display name
pub const ACF_NAME: &str = "sim/aircraft/view/acf_ui_name";
/// Simulator value holding the loaded aircraft's ICAO type code
pub const ACF_ICAO: &str = "sim/aircraft/view/acf_ICAO";

/// Identity of the aircraft currently loaded in the simulator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AircraftIdentity {
    pub name: String,
    pub icao: String,
}

/// What a command did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Handled,
    /// Nothing to act on (no active profile or no matching dial)
    NoOp,
}

/// Owns the registry, the active profile, the panel and the knob.
///
/// Single owner, single thread: the host's flight loop calls [`Bridge::tick`]
/// and its command dispatch calls [`Bridge::handle`] on the same instance.
pub struct Bridge<C: Clock, D: LedDevice> {
    sim: Arc<dyn SimAccess>,
    profile_dir: PathBuf,
    registry: ProfileRegistry,
    active: Option<Arc<Profile>>,
    aircraft: Option<AircraftIdentity>,
    leds: LedSynchronizer<D>,
    knob: EncoderController<C>,
}

impl<C: Clock, D: LedDevice> Bridge<C, D> {
    /// Starts with an empty registry; call [`Bridge::on_reload_requested`] to load profiles.
    pub fn new(sim: Arc<dyn SimAccess>, profile_dir: impl Into<PathBuf>, device: D, clock: C) -> Self {
        Self {
            registry: ProfileRegistry::new(Arc::clone(&sim)),
            sim,
            profile_dir: profile_dir.into(),
            active: None,
            aircraft: None,
            leds: LedSynchronizer::new(device),
            knob: EncoderController::new(clock),
        }
    }

    /// Resolve and activate the profile for a newly loaded aircraft.
    ///
    /// Returns whether a profile is now active.
    #[instrument(name = "aircraft_loaded", skip(self))]
    pub fn on_aircraft_loaded(&mut self, name: &str, icao: &str) -> bool {
        self.aircraft = Some(AircraftIdentity {
            name: name.to_string(),
            icao: icao.to_string(),
        });
        let profile = self.registry.resolve(name, icao);
        match &profile {
            Some(p) => info!(profile = %p.name(), aircraft = name, icao, "profile activated"),
            None => info!(aircraft = name, icao, "no profile for aircraft"),
        }
        self.set_active(profile)
    }

    /// Read the aircraft identity from the simulator and activate its profile.
    pub fn load_current_aircraft(&mut self) -> bool {
        let name = self.read_text(ACF_NAME);
        let icao = self.read_text(ACF_ICAO);
        self.on_aircraft_loaded(&name, &icao)
    }

    /// Drop the active profile and switch the panel dark.
    #[instrument(name = "aircraft_unloaded", skip(self))]
    pub fn on_aircraft_unloaded(&mut self) -> SyncOutcome {
        self.aircraft = None;
        self.active = None;
        metrics::gauge!("hcbravo_active_profile").set(0.0);
        info!("aircraft unloaded, panel cleared");
        self.leds.clear()
    }

    /// Rebuild the registry from the profile directory and re-resolve the
    /// loaded aircraft against the new index.
    ///
    /// On a directory error the registry is left empty, so no profile stays active.
    pub fn on_reload_requested(&mut self) -> Result<Arc<RegistryIndex>, ContractError> {
        let result = self.registry.reload(&self.profile_dir);
        let profile = self
            .aircraft
            .as_ref()
            .and_then(|a| self.registry.resolve(&a.name, &a.icao));
        if let Some(p) = &profile {
            info!(profile = %p.name(), "profile re-resolved after reload");
        }
        self.set_active(profile);
        result
    }

    /// One polling step: evaluate the active profile and sync the panel.
    #[instrument(name = "bridge_tick", level = "trace", skip(self))]
    pub fn tick(&mut self) -> SyncOutcome {
        match &self.active {
            Some(profile) => {
                let mask = build_mask(profile);
                self.leds.update(mask)
            }
            None => SyncOutcome::Unchanged,
        }
    }

    #[instrument(name = "bridge_command", level = "trace", skip(self))]
    pub fn handle(&mut self, command: Command) -> CommandStatus {
        let direction = match command {
            Command::KnobUp => Direction::Up,
            Command::KnobDown => Direction::Down,
            Command::SelectAltitude
            | Command::SelectVerticalSpeed
            | Command::SelectHeading
            | Command::SelectCourse
            | Command::SelectAirspeed => {
                if let Some(axis) = command.axis() {
                    self.knob.select(axis);
                }
                return CommandStatus::Handled;
            }
        };

        match self.knob.press(self.active.as_deref(), direction) {
            KnobOutcome::Adjusted { .. } => CommandStatus::Handled,
            KnobOutcome::NoDial => CommandStatus::NoOp,
        }
    }

    /// Dispatch by host command path
    pub fn dispatch(&mut self, path: &str) -> crate::Result<CommandStatus> {
        let command = path.parse::<Command>()?;
        Ok(self.handle(command))
    }

    pub fn active_profile(&self) -> Option<&Arc<Profile>> {
        self.active.as_ref()
    }

    pub fn aircraft(&self) -> Option<&AircraftIdentity> {
        self.aircraft.as_ref()
    }

    pub fn selected_axis(&self) -> Axis {
        self.knob.selected()
    }

    pub fn leds(&self) -> &LedSynchronizer<D> {
        &self.leds
    }

    pub fn index(&self) -> Arc<RegistryIndex> {
        self.registry.index()
    }

    pub fn profile_dir(&self) -> &Path {
        &self.profile_dir
    }

    /// Release the device
    pub fn into_device(self) -> D {
        self.leds.into_device()
    }

    fn set_active(&mut self, profile: Option<Arc<Profile>>) -> bool {
        let was_active = self.active.is_some();
        self.active = profile;
        let active = self.active.is_some();
        metrics::gauge!("hcbravo_active_profile").set(if active { 1.0 } else { 0.0 });
        if was_active && !active {
            self.leds.clear();
        }
        active
    }

    fn read_text(&self, key: &str) -> String {
        let text = self
            .sim
            .find(key)
            .and_then(|handle| self.sim.read_string(handle))
            .unwrap_or_default();
        debug!(key, value = %text, "aircraft identity read");
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::ManualClock;
    use led_sync::{LedId, LedMask, MockDevice};
    use profile::MockSim;

    const SKYHAWK: &str = "\
name: Skyhawk
aircraft_names: [Cessna 172 SP]
icao_models: [C172]
system:
  volts: sim/volts
autopilot:
  modes:
    ap: sim/ap
  dials:
    alt: sim/dial/alt
";

    struct Fixture {
        _dir: tempfile::TempDir,
        sim: Arc<MockSim>,
        device: MockDevice,
        clock: ManualClock,
        bridge: Bridge<ManualClock, MockDevice>,
    }

    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("c172.yaml"), SKYHAWK).unwrap();

        let sim = Arc::new(MockSim::new());
        sim.set_int("sim/volts", 1);
        sim.set_int("sim/ap", 0);
        sim.set_float("sim/dial/alt", 1000.0);

        let device = MockDevice::new();
        let clock = ManualClock::new();
        let mut bridge = Bridge::new(sim.as_sim(), dir.path(), device.clone(), clock.clone());
        bridge.on_reload_requested().unwrap();
        Fixture {
            _dir: dir,
            sim,
            device,
            clock,
            bridge,
        }
    }

    fn lamp(id: LedId) -> LedMask {
        let mut mask = LedMask::default();
        mask.update(id, true);
        mask
    }

    #[test]
    fn test_no_active_profile_is_inert() {
        let mut f = fixture();
        assert_eq!(f.bridge.tick(), SyncOutcome::Unchanged);
        assert_eq!(f.bridge.handle(Command::KnobUp), CommandStatus::NoOp);
        assert_eq!(f.device.write_count(), 0);
        assert_eq!(f.sim.float("sim/dial/alt", None), Some(1000.0));
    }

    #[test]
    fn test_load_tick_unload() {
        let mut f = fixture();
        assert!(f.bridge.on_aircraft_loaded("Some Cessna", "C172"));
        assert_eq!(f.bridge.active_profile().unwrap().name(), "Skyhawk");

        f.sim.set_int("sim/ap", 1);
        assert_eq!(f.bridge.tick(), SyncOutcome::Written);
        assert_eq!(f.bridge.tick(), SyncOutcome::Unchanged);
        assert_eq!(f.device.last_mask(), Some(lamp(LedId::AP)));

        assert_eq!(f.bridge.on_aircraft_unloaded(), SyncOutcome::Written);
        assert_eq!(f.device.last_mask(), Some(LedMask::DARK));
        assert!(f.bridge.active_profile().is_none());
        assert!(f.bridge.aircraft().is_none());
    }

    #[test]
    fn test_unknown_aircraft() {
        let mut f = fixture();
        assert!(!f.bridge.on_aircraft_loaded("Airbus", "A320"));
        assert_eq!(
            f.bridge.aircraft(),
            Some(&AircraftIdentity {
                name: "Airbus".into(),
                icao: "A320".into()
            })
        );
    }

    #[test]
    fn test_load_current_aircraft_from_sim() {
        let mut f = fixture();
        f.sim.set_text(ACF_NAME, "Cessna 172 SP");
        f.sim.set_text(ACF_ICAO, "XXXX");
        assert!(f.bridge.load_current_aircraft());
        assert_eq!(f.bridge.active_profile().unwrap().name(), "Skyhawk");
    }

    #[test]
    fn test_knob_commands() {
        let mut f = fixture();
        f.bridge.on_aircraft_loaded("", "C172");

        f.clock.advance_ms(1000);
        assert_eq!(f.bridge.handle(Command::KnobUp), CommandStatus::Handled);
        assert_eq!(f.sim.float("sim/dial/alt", None), Some(1100.0));

        assert_eq!(f.bridge.dispatch("HCBravo/HDG").unwrap(), CommandStatus::Handled);
        assert_eq!(f.bridge.selected_axis(), Axis::Heading);
        assert_eq!(f.bridge.dispatch("HCBravo/Dec").unwrap(), CommandStatus::NoOp);
        assert!(f.bridge.dispatch("HCBravo/Bogus").is_err());
    }

    #[test]
    fn test_selectors_pick_axis_and_knob_down_decrements() {
        let mut f = fixture();
        f.bridge.on_aircraft_loaded("", "C172");

        for command in Command::ALL {
            if let Some(axis) = command.axis() {
                assert_eq!(f.bridge.handle(command), CommandStatus::Handled);
                assert_eq!(f.bridge.selected_axis(), axis, "{command}");
            }
        }

        assert_eq!(f.bridge.handle(Command::SelectAltitude), CommandStatus::Handled);
        f.clock.advance_ms(1000);
        assert_eq!(f.bridge.handle(Command::KnobDown), CommandStatus::Handled);
        assert_eq!(f.sim.float("sim/dial/alt", None), Some(900.0));
    }

    #[test]
    fn test_reload_reresolves_current_aircraft() {
        let mut f = fixture();
        f.bridge.on_aircraft_loaded("", "C172");
        f.sim.set_int("sim/ap", 1);
        f.bridge.tick();

        std::fs::write(
            f.bridge.profile_dir().join("c172.yaml"),
            SKYHAWK.replace("name: Skyhawk", "name: Skyhawk II"),
        )
        .unwrap();
        f.bridge.on_reload_requested().unwrap();
        assert_eq!(f.bridge.active_profile().unwrap().name(), "Skyhawk II");

        std::fs::remove_file(f.bridge.profile_dir().join("c172.yaml")).unwrap();
        f.bridge.on_reload_requested().unwrap();
        assert!(f.bridge.active_profile().is_none());
        assert_eq!(f.device.last_mask(), Some(LedMask::DARK), "panel cleared");
    }
}
