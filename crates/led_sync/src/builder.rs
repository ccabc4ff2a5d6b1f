//! Profile state to lamp mask

use profile::Profile;

use crate::layout::{LedId, LedMask};

/// Evaluate every configured indicator of `profile` into a lamp mask.
///
/// An unpowered panel (`system.volts` unset) is dark no matter what the other
/// sensors say. Unconfigured indicators leave their lamp off.
pub fn build_mask(profile: &Profile) -> LedMask {
    let mut mask = LedMask::default();
    let system = profile.system();
    if !system.volts() {
        return mask;
    }

    if let Some(modes) = profile.modes() {
        mask.update_opt(LedId::AP_HDG, modes.hdg());
        mask.update_opt(LedId::AP_NAV, modes.nav());
        mask.update_opt(LedId::AP_APR, modes.apr());
        mask.update_opt(LedId::AP_REV, modes.rev());
        mask.update_opt(LedId::AP_ALT, modes.alt());
        mask.update_opt(LedId::AP_VS, modes.vs());
        mask.update_opt(LedId::AP_IAS, modes.ias());
        mask.update(LedId::AP, modes.ap());
    }

    // Exactly one lamp of each pair when the gear state is known, neither otherwise.
    if let Some(down) = system.gear() {
        for (green, red) in LedId::GEAR_PAIRS {
            mask.update(green, down);
            mask.update(red, !down);
        }
    }

    if let Some(ann) = profile.annunciator() {
        mask.update_opt(LedId::MASTER_WARN, ann.master_warn());
        mask.update_opt(LedId::ENG_FIRE, ann.eng_fire());
        mask.update_opt(LedId::OIL_LOW, ann.oil_low());
        mask.update_opt(LedId::FUEL_LOW, ann.fuel_low());
        mask.update_opt(LedId::ANTI_ICE, ann.anti_ice());
        mask.update_opt(LedId::STARTER, ann.starter());
        mask.update_opt(LedId::APU, ann.apu());
        mask.update_opt(LedId::MASTER_CAUTION, ann.master_caution());
        mask.update_opt(LedId::VACUUM_LOW, ann.vacuum_low());
        mask.update_opt(LedId::HYDRO_LOW, ann.hydro_low());
        mask.update_opt(LedId::AUX_FUEL, ann.aux_fuel());
        mask.update_opt(LedId::PARKING_BRAKE, ann.parking_brake());
        mask.update_opt(LedId::VOLT_LOW, ann.volt_low());
        mask.update_opt(LedId::DOOR_OPEN, ann.door_open());
    }

    mask
}
