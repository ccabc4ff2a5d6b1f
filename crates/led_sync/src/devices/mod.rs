//! Panel device adapters

#[cfg(feature = "hid")]
mod hid;
mod log;
mod mock;

#[cfg(feature = "hid")]
pub use hid::{HidLedDevice, PRODUCT_ID, VENDOR_ID};
pub use log::LogDevice;
pub use mock::MockDevice;
