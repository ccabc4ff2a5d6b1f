//! MockDevice - records reports for tests

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use contracts::{ContractError, LedDevice};

use crate::layout::{LedMask, LED_BANKS};

/// Recording device. Clones share the same record, so a test can keep one
/// clone while the synchronizer owns another.
#[derive(Debug, Clone, Default)]
pub struct MockDevice {
    reports: Arc<Mutex<Vec<Vec<u8>>>>,
    failing: Arc<AtomicBool>,
}

impl MockDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent writes fail (and not be recorded)
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Successful writes so far
    pub fn write_count(&self) -> usize {
        self.lock().len()
    }

    pub fn reports(&self) -> Vec<Vec<u8>> {
        self.lock().clone()
    }

    /// Mask carried by the most recent successful write
    pub fn last_mask(&self) -> Option<LedMask> {
        let reports = self.lock();
        let report = reports.last()?;
        let mut banks = [0u8; LED_BANKS];
        banks.copy_from_slice(report.get(1..=LED_BANKS)?);
        Some(LedMask::from_banks(banks))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Vec<u8>>> {
        self.reports.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LedDevice for MockDevice {
    fn name(&self) -> &str {
        "mock"
    }

    fn write_feature_report(&mut self, report: &[u8]) -> Result<(), ContractError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ContractError::device("injected failure"));
        }
        self.lock().push(report.to_vec());
        Ok(())
    }
}
