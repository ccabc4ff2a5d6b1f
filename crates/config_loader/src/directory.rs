//! Profile directory enumeration

use std::path::{Path, PathBuf};

use contracts::{ConfigNode, ContractError};
use tracing::{debug, info, warn};

use crate::{ConfigFormat, ConfigLoader};

/// One parsed document and where it came from
#[derive(Debug, Clone)]
pub struct ProfileDocument {
    pub path: PathBuf,
    pub root: ConfigNode,
}

/// Result of scanning a profile directory
#[derive(Debug, Default)]
pub struct DirectoryScan {
    /// Parsed documents, in sorted path order
    pub documents: Vec<ProfileDocument>,
    /// Files with a supported extension that could not be read or parsed
    pub failures: Vec<(PathBuf, ContractError)>,
}

pub(crate) fn scan(dir: &Path) -> Result<DirectoryScan, ContractError> {
    info!(dir = %dir.display(), "reading profile directory");

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let supported = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(ConfigFormat::from_extension)
            .is_some();
        if supported {
            paths.push(path);
        } else {
            debug!(file = %path.display(), "skipping file with unsupported extension");
        }
    }
    // First-registered-wins in the registry depends on a stable order.
    paths.sort();

    let mut scan = DirectoryScan::default();
    for path in paths {
        match ConfigLoader::load_from_path(&path) {
            Ok(root) => scan.documents.push(ProfileDocument { path, root }),
            Err(e) => {
                warn!(file = %path.display(), error = %e, "failed to load profile document");
                scan.failures.push((path, e));
            }
        }
    }

    info!(
        documents = scan.documents.len(),
        failures = scan.failures.len(),
        "profile directory read"
    );
    Ok(scan)
}
