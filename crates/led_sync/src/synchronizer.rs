//! Diffed mask writes

use contracts::LedDevice;
use tracing::{debug, instrument, warn};

use crate::layout::{LedId, LedMask};

/// What one [`LedSynchronizer::update`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Mask matched the last write; the device was not touched
    Unchanged,
    /// One report was sent
    Written,
    /// The device rejected the report
    Failed,
}

/// Keeps the device in step with the latest mask.
///
/// At most one report per update, and only when the mask changed since the
/// last attempt. A failed write is not retried and still counts as the last
/// written mask; the next change triggers a fresh write.
pub struct LedSynchronizer<D: LedDevice> {
    device: D,
    last_written: LedMask,
}

impl<D: LedDevice> LedSynchronizer<D> {
    /// The panel is assumed dark on open.
    pub fn new(device: D) -> Self {
        Self {
            device,
            last_written: LedMask::DARK,
        }
    }

    #[instrument(
        name = "led_update",
        level = "trace",
        skip(self, mask),
        fields(device = %self.device.name(), mask = %mask)
    )]
    pub fn update(&mut self, mask: LedMask) -> SyncOutcome {
        if mask == self.last_written {
            metrics::counter!("hcbravo_led_writes_skipped_total").increment(1);
            return SyncOutcome::Unchanged;
        }
        self.last_written = mask;

        match self.device.write_feature_report(&mask.to_report()) {
            Ok(()) => {
                debug!(device = %self.device.name(), mask = %mask, "panel updated");
                metrics::counter!("hcbravo_led_writes_total").increment(1);
                SyncOutcome::Written
            }
            Err(e) => {
                warn!(device = %self.device.name(), error = %e, "failed to update panel lamps");
                metrics::counter!("hcbravo_led_write_failures_total").increment(1);
                SyncOutcome::Failed
            }
        }
    }

    /// Switch every lamp off
    pub fn clear(&mut self) -> SyncOutcome {
        self.update(LedMask::DARK)
    }

    /// Lamp state as of the last write attempt
    pub fn is_lit(&self, id: LedId) -> bool {
        self.last_written.is_lit(id)
    }

    pub fn last_written(&self) -> LedMask {
        self.last_written
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn into_device(self) -> D {
        self.device
    }
}
