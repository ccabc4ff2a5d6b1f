//! LogDevice - prints each report through tracing

use contracts::{ContractError, LedDevice};
use tracing::info;

use crate::layout::{LedMask, LED_BANKS, REPORT_LEN};

/// Device that logs lamp changes instead of driving hardware
pub struct LogDevice {
    name: String,
}

impl LogDevice {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl LedDevice for LogDevice {
    fn name(&self) -> &str {
        &self.name
    }

    fn write_feature_report(&mut self, report: &[u8]) -> Result<(), ContractError> {
        if report.len() != REPORT_LEN {
            return Err(ContractError::device(format!(
                "expected a {REPORT_LEN} byte report, got {}",
                report.len()
            )));
        }
        let mut banks = [0u8; LED_BANKS];
        banks.copy_from_slice(&report[1..=LED_BANKS]);
        let mask = LedMask::from_banks(banks);
        info!(device = %self.name, mask = %mask, lit = mask.lit_count(), "panel lamps");
        Ok(())
    }
}
