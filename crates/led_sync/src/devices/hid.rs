//! HidLedDevice - the physical throttle quadrant

use contracts::{ContractError, LedDevice};
use hidapi::{HidApi, HidDevice};
use tracing::info;

/// Honeycomb vendor id
pub const VENDOR_ID: u16 = 0x294b;
/// Bravo throttle quadrant product id
pub const PRODUCT_ID: u16 = 0x1901;

/// Panel reached through hidapi feature reports
pub struct HidLedDevice {
    name: String,
    device: HidDevice,
}

impl HidLedDevice {
    /// Open the first attached quadrant
    pub fn open() -> Result<Self, ContractError> {
        let api = HidApi::new()
            .map_err(|e| ContractError::device(format!("hidapi init failed: {e}")))?;
        let device = api.open(VENDOR_ID, PRODUCT_ID).map_err(|e| {
            ContractError::device(format!(
                "cannot open {VENDOR_ID:04x}:{PRODUCT_ID:04x}: {e}"
            ))
        })?;
        let name = device
            .get_product_string()
            .ok()
            .flatten()
            .unwrap_or_else(|| "bravo".to_string());
        info!(device = %name, "panel opened");
        Ok(Self { name, device })
    }
}

impl LedDevice for HidLedDevice {
    fn name(&self) -> &str {
        &self.name
    }

    fn write_feature_report(&mut self, report: &[u8]) -> Result<(), ContractError> {
        self.device
            .send_feature_report(report)
            .map_err(|e| ContractError::device(format!("feature report rejected: {e}")))
    }
}
