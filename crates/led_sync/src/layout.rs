//! Panel lamp layout and the bit mask written to the device

use std::fmt;

/// Number of 8-bit lamp banks on the panel
pub const LED_BANKS: usize = 4;

/// Size of one feature report: report id, lamp banks, reserved padding
pub const REPORT_LEN: usize = 65;

/// Fixed (bank, bit) coordinate of one lamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LedId {
    bank: u8,
    bit: u8,
}

impl LedId {
    pub const AP_HDG: Self = Self::new(0, 0);
    pub const AP_NAV: Self = Self::new(0, 1);
    pub const AP_APR: Self = Self::new(0, 2);
    pub const AP_REV: Self = Self::new(0, 3);
    pub const AP_ALT: Self = Self::new(0, 4);
    pub const AP_VS: Self = Self::new(0, 5);
    pub const AP_IAS: Self = Self::new(0, 6);
    pub const AP: Self = Self::new(0, 7);

    pub const GEAR_LEFT_GREEN: Self = Self::new(1, 0);
    pub const GEAR_LEFT_RED: Self = Self::new(1, 1);
    pub const GEAR_NOSE_GREEN: Self = Self::new(1, 2);
    pub const GEAR_NOSE_RED: Self = Self::new(1, 3);
    pub const GEAR_RIGHT_GREEN: Self = Self::new(1, 4);
    pub const GEAR_RIGHT_RED: Self = Self::new(1, 5);

    pub const MASTER_WARN: Self = Self::new(1, 6);
    pub const ENG_FIRE: Self = Self::new(1, 7);
    pub const OIL_LOW: Self = Self::new(2, 0);
    pub const FUEL_LOW: Self = Self::new(2, 1);
    pub const ANTI_ICE: Self = Self::new(2, 2);
    pub const STARTER: Self = Self::new(2, 3);
    pub const APU: Self = Self::new(2, 4);
    pub const MASTER_CAUTION: Self = Self::new(2, 5);
    pub const VACUUM_LOW: Self = Self::new(2, 6);
    pub const HYDRO_LOW: Self = Self::new(2, 7);
    pub const AUX_FUEL: Self = Self::new(3, 0);
    pub const PARKING_BRAKE: Self = Self::new(3, 1);
    pub const VOLT_LOW: Self = Self::new(3, 2);
    pub const DOOR_OPEN: Self = Self::new(3, 3);

    /// Green/red lamp pairs, one per gear leg
    pub const GEAR_PAIRS: [(Self, Self); 3] = [
        (Self::GEAR_LEFT_GREEN, Self::GEAR_LEFT_RED),
        (Self::GEAR_NOSE_GREEN, Self::GEAR_NOSE_RED),
        (Self::GEAR_RIGHT_GREEN, Self::GEAR_RIGHT_RED),
    ];

    const fn new(bank: u8, bit: u8) -> Self {
        Self { bank, bit }
    }

    fn flag(self) -> u8 {
        1 << self.bit
    }
}

/// Lamp state for the whole panel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LedMask([u8; LED_BANKS]);

impl LedMask {
    /// Every lamp off
    pub const DARK: Self = Self([0; LED_BANKS]);

    pub fn from_banks(banks: [u8; LED_BANKS]) -> Self {
        Self(banks)
    }

    pub fn banks(&self) -> [u8; LED_BANKS] {
        self.0
    }

    /// Light or clear one lamp
    pub fn update(&mut self, id: LedId, lit: bool) {
        let bank = &mut self.0[usize::from(id.bank)];
        if lit {
            *bank |= id.flag();
        } else {
            *bank &= !id.flag();
        }
    }

    /// Like [`update`](Self::update), but an unknown state leaves the lamp untouched
    pub fn update_opt(&mut self, id: LedId, lit: Option<bool>) {
        if let Some(lit) = lit {
            self.update(id, lit);
        }
    }

    pub fn is_lit(&self, id: LedId) -> bool {
        self.0[usize::from(id.bank)] & id.flag() != 0
    }

    pub fn is_dark(&self) -> bool {
        self.0 == [0; LED_BANKS]
    }

    pub fn lit_count(&self) -> u32 {
        self.0.iter().map(|b| b.count_ones()).sum()
    }

    /// Feature report carrying this mask
    pub fn to_report(&self) -> [u8; REPORT_LEN] {
        let mut report = [0u8; REPORT_LEN];
        report[1..=LED_BANKS].copy_from_slice(&self.0);
        report
    }
}

impl fmt::Display for LedMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "{a:08b} {b:08b} {c:08b} {d:08b}")
    }
}
