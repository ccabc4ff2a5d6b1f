//! LedDevice trait - panel hardware output interface

use crate::ContractError;

/// Panel output trait
///
/// All device adapters (HID, log, mock) implement this trait.
pub trait LedDevice: Send {
    /// Device name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Send one complete feature report.
    ///
    /// # Errors
    /// Returns a device error when the transport rejects the report.
    fn write_feature_report(&mut self, report: &[u8]) -> Result<(), ContractError>;
}

impl<D: LedDevice + ?Sized> LedDevice for Box<D> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn write_feature_report(&mut self, report: &[u8]) -> Result<(), ContractError> {
        (**self).write_feature_report(report)
    }
}
