//! In-memory simulator
//!
//! Stands in for the host simulator in tests and in the CLI's replay mode.
//! Values can be set one by one or loaded from a YAML snapshot:
//!
//! ```yaml
//! sim/cockpit2/electrical/bus_volts: [28.0, 0.0]
//! sim/cockpit/autopilot/autopilot_mode: 2
//! sim/aircraft/view/acf_ICAO: B738
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use contracts::{ContractError, SimAccess, ValueHandle};
use serde::Deserialize;
use tracing::debug;

/// One snapshot value
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MockValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    IntArray(Vec<i64>),
    FloatArray(Vec<f64>),
    Text(String),
}

#[derive(Debug, Clone, Default)]
struct Entry {
    numbers: Vec<f64>,
    text: Option<String>,
}

impl From<MockValue> for Entry {
    fn from(value: MockValue) -> Self {
        let numbers = match &value {
            MockValue::Bool(b) => vec![f64::from(u8::from(*b))],
            MockValue::Int(i) => vec![*i as f64],
            MockValue::Float(f) => vec![*f],
            MockValue::IntArray(v) => v.iter().map(|i| *i as f64).collect(),
            MockValue::FloatArray(v) => v.clone(),
            MockValue::Text(_) => Vec::new(),
        };
        let text = match value {
            MockValue::Text(s) => Some(s),
            _ => None,
        };
        Self { numbers, text }
    }
}

#[derive(Debug, Default)]
struct Store {
    handles: HashMap<String, ValueHandle>,
    entries: Vec<Entry>,
}

impl Store {
    fn handle(&mut self, name: &str) -> ValueHandle {
        if let Some(handle) = self.handles.get(name) {
            return *handle;
        }
        let handle = ValueHandle::new(self.entries.len() as u64);
        self.entries.push(Entry::default());
        self.handles.insert(name.to_string(), handle);
        handle
    }

    fn entry(&self, handle: ValueHandle) -> Option<&Entry> {
        usize::try_from(handle.raw())
            .ok()
            .and_then(|i| self.entries.get(i))
    }

    fn entry_mut(&mut self, name: &str) -> &mut Entry {
        let handle = self.handle(name);
        // `handle` always indexes a live entry.
        &mut self.entries[handle.raw() as usize]
    }
}

/// In-memory [`SimAccess`] implementation.
///
/// A strict sim (`new`) only finds names that were defined; a permissive sim
/// defines every name it is asked for, with value 0.
#[derive(Debug, Default)]
pub struct MockSim {
    store: Mutex<Store>,
    permissive: bool,
}

impl MockSim {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sim that resolves every name
    pub fn permissive() -> Self {
        Self {
            permissive: true,
            ..Self::default()
        }
    }

    /// Build a strict sim from a YAML snapshot
    pub fn from_snapshot_str(content: &str) -> Result<Self, ContractError> {
        let sim = Self::new();
        sim.apply_snapshot_str(content)?;
        Ok(sim)
    }

    /// Build a strict sim from a YAML snapshot file
    pub fn load_snapshot(path: &Path) -> Result<Self, ContractError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_snapshot_str(&content)
    }

    /// Overwrite values from a YAML snapshot. Names not in the snapshot are kept.
    pub fn apply_snapshot_str(&self, content: &str) -> Result<usize, ContractError> {
        let values: BTreeMap<String, MockValue> =
            serde_yaml::from_str(content).map_err(|e| ContractError::ConfigParse {
                message: format!("invalid simulator snapshot: {e}"),
                source: Some(Box::new(e)),
            })?;
        let count = values.len();
        let mut store = self.lock();
        for (name, value) in values {
            *store.entry_mut(&name) = value.into();
        }
        debug!(values = count, "simulator snapshot applied");
        Ok(count)
    }

    /// Share as the trait object the builders take
    pub fn as_sim(self: &Arc<Self>) -> Arc<dyn SimAccess> {
        Arc::clone(self) as Arc<dyn SimAccess>
    }

    pub fn set_int(&self, name: &str, value: i32) {
        self.lock().entry_mut(name).numbers = vec![f64::from(value)];
    }

    pub fn set_float(&self, name: &str, value: f32) {
        self.lock().entry_mut(name).numbers = vec![f64::from(value)];
    }

    pub fn set_int_array(&self, name: &str, values: &[i32]) {
        self.lock().entry_mut(name).numbers = values.iter().map(|v| f64::from(*v)).collect();
    }

    pub fn set_float_array(&self, name: &str, values: &[f32]) {
        self.lock().entry_mut(name).numbers = values.iter().map(|v| f64::from(*v)).collect();
    }

    /// Set one array element, growing the array with zeros if needed
    pub fn set_element(&self, name: &str, index: usize, value: f32) {
        let mut store = self.lock();
        let numbers = &mut store.entry_mut(name).numbers;
        if numbers.len() <= index {
            numbers.resize(index + 1, 0.0);
        }
        numbers[index] = f64::from(value);
    }

    pub fn set_text(&self, name: &str, value: &str) {
        self.lock().entry_mut(name).text = Some(value.to_string());
    }

    /// Current value, as a sensor would read it
    pub fn float(&self, name: &str, index: Option<usize>) -> Option<f32> {
        let store = self.lock();
        let handle = *store.handles.get(name)?;
        read_number(&store, handle, index).map(|v| v as f32)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lock().handles.contains_key(name)
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn read_number(store: &Store, handle: ValueHandle, index: Option<usize>) -> Option<f64> {
    store
        .entry(handle)
        .and_then(|e| e.numbers.get(index.unwrap_or(0)))
        .copied()
}

impl SimAccess for MockSim {
    fn find(&self, name: &str) -> Option<ValueHandle> {
        let mut store = self.lock();
        match store.handles.get(name) {
            Some(handle) => Some(*handle),
            None if self.permissive => {
                let handle = store.handle(name);
                store.entry_mut(name).numbers = vec![0.0];
                Some(handle)
            }
            None => None,
        }
    }

    fn read_int(&self, handle: ValueHandle, index: Option<usize>) -> Option<i32> {
        read_number(&self.lock(), handle, index).map(|v| v as i32)
    }

    fn read_float(&self, handle: ValueHandle, index: Option<usize>) -> Option<f32> {
        read_number(&self.lock(), handle, index).map(|v| v as f32)
    }

    fn write_float(
        &self,
        handle: ValueHandle,
        index: Option<usize>,
        value: f32,
    ) -> Result<(), ContractError> {
        let mut store = self.lock();
        let entry = usize::try_from(handle.raw())
            .ok()
            .and_then(|i| store.entries.get_mut(i))
            .ok_or_else(|| ContractError::Other(format!("unknown handle {}", handle.raw())))?;

        let i = index.unwrap_or(0);
        if index.is_none() && entry.numbers.is_empty() {
            entry.numbers.push(0.0);
        }
        let slot = entry
            .numbers
            .get_mut(i)
            .ok_or_else(|| ContractError::Other(format!("index {i} out of range")))?;
        *slot = f64::from(value);
        Ok(())
    }

    fn read_string(&self, handle: ValueHandle) -> Option<String> {
        self.lock().entry(handle).and_then(|e| e.text.clone())
    }
}
