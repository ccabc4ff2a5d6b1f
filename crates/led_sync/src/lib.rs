//! # LED Sync
//!
//! Panel lamp synchronization.
//!
//! Responsibilities:
//! - Fixed lamp layout ([`LedId`]) and the 4-bank [`LedMask`]
//! - Evaluating the active profile into a mask ([`build_mask`])
//! - Diffed writes to the panel ([`LedSynchronizer`])
//! - Device adapters: [`LogDevice`], [`MockDevice`], and `HidLedDevice` with
//!   the `hid` feature
//!
//! # Example
//!
//! ```
//! use led_sync::{LedId, LedMask, LedSynchronizer, MockDevice, SyncOutcome};
//!
//! let device = MockDevice::new();
//! let mut sync = LedSynchronizer::new(device.clone());
//!
//! let mut mask = LedMask::default();
//! mask.update(LedId::AP, true);
//! assert_eq!(sync.update(mask), SyncOutcome::Written);
//! assert_eq!(sync.update(mask), SyncOutcome::Unchanged);
//! assert_eq!(device.write_count(), 1);
//! ```

mod builder;
pub mod devices;
mod layout;
mod synchronizer;

pub use builder::build_mask;
#[cfg(feature = "hid")]
pub use devices::HidLedDevice;
pub use devices::{LogDevice, MockDevice};
pub use layout::{LedId, LedMask, LED_BANKS, REPORT_LEN};
pub use synchronizer::{LedSynchronizer, SyncOutcome};
