//! SimAccess trait - simulator value-access boundary
//!
//! The host simulator exposes named values ("datarefs"). A name is resolved once
//! into an opaque [`ValueHandle`]; every later read or write goes through the handle.

use crate::ContractError;

/// Opaque handle to a resolved simulator value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueHandle(u64);

impl ValueHandle {
    /// Wrap a host-specific raw handle.
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the host-specific raw handle.
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Simulator value-access trait
///
/// Implemented by the host adapter (and by `profile::MockSim` for tests and replays).
/// Reads return `None` when the host cannot produce a value (wrong type, index out of
/// range, value vanished); callers treat that as "not set" and never retry.
///
/// `index` selects exactly one element of an array value; `None` reads the scalar.
pub trait SimAccess: Send + Sync {
    /// Resolve a named value. Called once per sensor at construction time.
    fn find(&self, name: &str) -> Option<ValueHandle>;

    /// Read an integer value.
    fn read_int(&self, handle: ValueHandle, index: Option<usize>) -> Option<i32>;

    /// Read a floating-point value.
    fn read_float(&self, handle: ValueHandle, index: Option<usize>) -> Option<f32>;

    /// Write a floating-point value.
    fn write_float(
        &self,
        handle: ValueHandle,
        index: Option<usize>,
        value: f32,
    ) -> Result<(), ContractError>;

    /// Read a boolean value. Hosts without a native boolean type store flags as integers.
    fn read_bool(&self, handle: ValueHandle, index: Option<usize>) -> Option<bool> {
        self.read_int(handle, index).map(|v| v != 0)
    }

    /// Read a byte-array value as text (NUL-terminated).
    fn read_string(&self, handle: ValueHandle) -> Option<String> {
        let _ = handle;
        None
    }
}
