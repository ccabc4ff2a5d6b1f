//! Profile registry and active-plane resolution

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use config_loader::{ConfigLoader, ProfileDocument};
use contracts::{ContractError, SimAccess};
use tracing::{info, instrument, warn};

use crate::error::ProfileError;
use crate::profile::Profile;

/// Which index a key belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    AircraftName,
    IcaoModel,
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AircraftName => write!(f, "aircraft name"),
            Self::IcaoModel => write!(f, "ICAO model"),
        }
    }
}

/// A key declared by more than one profile. The first profile keeps it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConflict {
    pub kind: KeyKind,
    pub key: String,
    pub kept: String,
    pub dropped: String,
}

/// A document that did not produce a profile
#[derive(Debug)]
pub struct RejectedDocument {
    pub path: PathBuf,
    pub error: ProfileError,
}

/// Immutable lookup tables built by one reload
#[derive(Debug, Default)]
pub struct RegistryIndex {
    by_aircraft: HashMap<String, Arc<Profile>>,
    by_model: HashMap<String, Arc<Profile>>,
    profiles: Vec<Arc<Profile>>,
    conflicts: Vec<RegistryConflict>,
    rejected: Vec<RejectedDocument>,
}

impl RegistryIndex {
    /// Aircraft name first, then ICAO model.
    pub fn resolve(&self, aircraft_name: &str, icao_model: &str) -> Option<Arc<Profile>> {
        self.by_aircraft
            .get(aircraft_name)
            .or_else(|| self.by_model.get(icao_model))
            .cloned()
    }

    /// Profiles in registration order
    pub fn profiles(&self) -> &[Arc<Profile>] {
        &self.profiles
    }

    pub fn conflicts(&self) -> &[RegistryConflict] {
        &self.conflicts
    }

    pub fn rejected(&self) -> &[RejectedDocument] {
        &self.rejected
    }

    /// Sorted (key, profile name) pairs of one index
    pub fn entries(&self, kind: KeyKind) -> Vec<(&str, &str)> {
        let map = match kind {
            KeyKind::AircraftName => &self.by_aircraft,
            KeyKind::IcaoModel => &self.by_model,
        };
        let mut entries: Vec<_> = map
            .iter()
            .map(|(key, profile)| (key.as_str(), profile.name()))
            .collect();
        entries.sort_unstable();
        entries
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    fn register(&mut self, profile: Profile) {
        let profile = Arc::new(profile);
        let keys = profile
            .aircraft_names()
            .iter()
            .map(|k| (KeyKind::AircraftName, k))
            .chain(profile.icao_models().iter().map(|k| (KeyKind::IcaoModel, k)));

        for (kind, key) in keys {
            let map = match kind {
                KeyKind::AircraftName => &mut self.by_aircraft,
                KeyKind::IcaoModel => &mut self.by_model,
            };
            match map.entry(key.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(Arc::clone(&profile));
                }
                Entry::Occupied(existing) => {
                    warn!(
                        kind = %kind,
                        key = %key,
                        kept = %existing.get().name(),
                        dropped = %profile.name(),
                        "duplicate key, keeping first registered profile"
                    );
                    metrics::counter!("hcbravo_registry_conflicts_total").increment(1);
                    self.conflicts.push(RegistryConflict {
                        kind,
                        key: key.clone(),
                        kept: existing.get().name().to_string(),
                        dropped: profile.name().to_string(),
                    });
                }
            }
        }
        self.profiles.push(profile);
    }

    fn reject(&mut self, path: PathBuf, error: ProfileError) {
        warn!(file = %path.display(), error = %error, "profile rejected");
        metrics::counter!("hcbravo_profiles_rejected_total").increment(1);
        self.rejected.push(RejectedDocument { path, error });
    }
}

/// Owns the current [`RegistryIndex`].
///
/// Every reload builds a fresh index and swaps it in whole, so a caller
/// holding an earlier [`ProfileRegistry::index`] keeps a consistent view.
pub struct ProfileRegistry {
    sim: Arc<dyn SimAccess>,
    index: Arc<RegistryIndex>,
}

impl ProfileRegistry {
    pub fn new(sim: Arc<dyn SimAccess>) -> Self {
        Self {
            sim,
            index: Arc::new(RegistryIndex::default()),
        }
    }

    /// Rebuild the index from every document in `dir`.
    ///
    /// Bad documents are skipped and recorded. If the directory itself cannot be
    /// read, an empty index is installed and the error returned.
    #[instrument(name = "registry_reload", skip(self), fields(dir = %dir.display()))]
    pub fn reload(&mut self, dir: &Path) -> Result<Arc<RegistryIndex>, ContractError> {
        let scan = match ConfigLoader::load_dir(dir) {
            Ok(scan) => scan,
            Err(e) => {
                warn!(error = %e, "profile directory unreadable, registry is now empty");
                self.index = Arc::new(RegistryIndex::default());
                return Err(e);
            }
        };

        let mut index = self.build_index(scan.documents);
        for (path, error) in scan.failures {
            index.reject(path, error.into());
        }
        Ok(self.install(index))
    }

    /// Rebuild the index from already parsed documents, in the given order.
    pub fn load_documents(&mut self, documents: Vec<ProfileDocument>) -> Arc<RegistryIndex> {
        let index = self.build_index(documents);
        self.install(index)
    }

    pub fn resolve(&self, aircraft_name: &str, icao_model: &str) -> Option<Arc<Profile>> {
        self.index.resolve(aircraft_name, icao_model)
    }

    /// Snapshot of the current index
    pub fn index(&self) -> Arc<RegistryIndex> {
        Arc::clone(&self.index)
    }

    fn build_index(&self, documents: Vec<ProfileDocument>) -> RegistryIndex {
        let mut index = RegistryIndex::default();
        for doc in documents {
            match Profile::from_config(&doc.root, &self.sim) {
                Ok(profile) => {
                    metrics::counter!("hcbravo_profiles_loaded_total").increment(1);
                    index.register(profile.with_source(doc.path));
                }
                Err(e) => index.reject(doc.path, e),
            }
        }
        index
    }

    fn install(&mut self, index: RegistryIndex) -> Arc<RegistryIndex> {
        info!(
            profiles = index.profiles.len(),
            aircraft_names = index.by_aircraft.len(),
            icao_models = index.by_model.len(),
            conflicts = index.conflicts.len(),
            rejected = index.rejected.len(),
            "profile registry loaded"
        );
        self.index = Arc::new(index);
        Arc::clone(&self.index)
    }
}

impl fmt::Debug for ProfileRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileRegistry")
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}
