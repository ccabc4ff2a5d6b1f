//! ValueSource - a simulator value resolved once at construction time

use std::fmt;
use std::sync::Arc;

use contracts::{SimAccess, ValueHandle};
use tracing::{debug, warn};

/// A named simulator value, optionally narrowed to one array element.
///
/// Lookup happens exactly once in [`ValueSource::resolve`]. A failed lookup is not an
/// error: the source stays unresolved, every read yields `None` and every write is dropped.
#[derive(Clone)]
pub struct ValueSource {
    key: String,
    index: Option<usize>,
    handle: Option<ValueHandle>,
    sim: Arc<dyn SimAccess>,
}

impl ValueSource {
    /// Resolve `key` against the simulator.
    pub fn resolve(sim: &Arc<dyn SimAccess>, key: &str, index: Option<usize>) -> Self {
        let handle = sim.find(key);
        if handle.is_none() {
            warn!(key, "simulator value not found, it will read as unset");
        }
        Self {
            key: key.to_string(),
            index,
            handle,
            sim: Arc::clone(sim),
        }
    }

    /// Simulator value name
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Array element offset, if any
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Whether the lookup succeeded
    pub fn is_resolved(&self) -> bool {
        self.handle.is_some()
    }

    pub(crate) fn read_bool(&self) -> Option<bool> {
        self.sim.read_bool(self.handle?, self.index)
    }

    pub(crate) fn read_int(&self) -> Option<i32> {
        self.sim.read_int(self.handle?, self.index)
    }

    pub(crate) fn read_float(&self) -> Option<f32> {
        self.sim.read_float(self.handle?, self.index)
    }

    pub(crate) fn write_float(&self, value: f32) {
        let Some(handle) = self.handle else {
            return;
        };
        if let Err(e) = self.sim.write_float(handle, self.index, value) {
            debug!(key = %self.key, error = %e, "simulator rejected write");
        }
    }
}

impl fmt::Debug for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueSource")
            .field("key", &self.key)
            .field("index", &self.index)
            .field("resolved", &self.handle.is_some())
            .finish()
    }
}
