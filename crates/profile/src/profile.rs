//! Profile - the complete sensor and dial tree for one aircraft family

use std::path::{Path, PathBuf};
use std::sync::Arc;

use contracts::{ConfigNode, SimAccess};
use tracing::{debug, instrument, warn};

use crate::blocks::{AnnunciatorBlock, AutopilotBlock, DialBlock, ModeBlock, SystemBlock};
use crate::error::{ProfileError, Result};
use crate::node::{child, element, optional, required, scalar_string, string_field};

/// Immutable aircraft profile.
///
/// Built once from a configuration document and shared read-only (behind an
/// `Arc`) by the registry, the LED synchronizer and the encoder controller.
#[derive(Debug, Clone)]
pub struct Profile {
    name: String,
    aircraft_names: Vec<String>,
    icao_models: Vec<String>,
    system: SystemBlock,
    autopilot: Option<AutopilotBlock>,
    annunciator: Option<AnnunciatorBlock>,
    source: Option<PathBuf>,
}

impl Profile {
    /// Build a profile from a document root.
    ///
    /// Checks run in order (`name`, identifiers, `system`, `autopilot`,
    /// `annunciator`) and the first failure aborts the build.
    #[instrument(name = "profile_build", skip(root, sim))]
    pub fn from_config(root: &ConfigNode, sim: &Arc<dyn SimAccess>) -> Result<Self> {
        if !root.is_mapping() {
            return Err(ProfileError::invalid_node("<root>", "map", root));
        }

        let name = string_field(required(root, "name", "")?, "name")?;

        let aircraft_names = optional(root, "aircraft_names")
            .map(|n| string_list(n, "aircraft_names"))
            .transpose()?;
        let (models_field, models) = match (optional(root, "icao_models"), optional(root, "models")) {
            (Some(n), _) => ("icao_models", Some(n)),
            (None, Some(n)) => ("models", Some(n)),
            (None, None) => ("icao_models", None),
        };
        let icao_models = match models {
            Some(n) => string_list(n, models_field)?,
            None if aircraft_names.is_none() => return Err(ProfileError::missing("icao_models")),
            None => Vec::new(),
        };
        if icao_models.is_empty() {
            return Err(ProfileError::NoModels { profile: name });
        }

        let system = SystemBlock::build(required(root, "system", "")?, sim, "system")?;
        let autopilot = optional(root, "autopilot")
            .map(|n| AutopilotBlock::build(n, sim, "autopilot"))
            .transpose()?;
        let annunciator = optional(root, "annunciator")
            .map(|n| AnnunciatorBlock::build(n, sim, "annunciator"))
            .transpose()?;

        let profile = Self {
            name,
            aircraft_names: aircraft_names.unwrap_or_default(),
            icao_models,
            system,
            autopilot,
            annunciator,
            source: None,
        };
        debug!(
            profile = %profile.name,
            aircraft_names = profile.aircraft_names.len(),
            icao_models = profile.icao_models.len(),
            "profile built"
        );
        Ok(profile)
    }

    /// Record the document this profile came from
    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aircraft_names(&self) -> &[String] {
        &self.aircraft_names
    }

    pub fn icao_models(&self) -> &[String] {
        &self.icao_models
    }

    pub fn system(&self) -> &SystemBlock {
        &self.system
    }

    pub fn autopilot(&self) -> Option<&AutopilotBlock> {
        self.autopilot.as_ref()
    }

    pub fn annunciator(&self) -> Option<&AnnunciatorBlock> {
        self.annunciator.as_ref()
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Autopilot mode lamps, if an autopilot block is configured
    pub fn modes(&self) -> Option<&ModeBlock> {
        self.autopilot.as_ref().map(|ap| &ap.modes)
    }

    /// Autopilot dials, if configured
    pub fn dials(&self) -> Option<&DialBlock> {
        self.autopilot.as_ref().and_then(|ap| ap.dials.as_ref())
    }
}

/// Collect a de-duplicated identifier list. Non-scalar entries are skipped.
fn string_list(node: &ConfigNode, field: &str) -> Result<Vec<String>> {
    let seq = node
        .as_sequence()
        .ok_or_else(|| ProfileError::invalid_node(field, "sequence", node))?;

    let mut out: Vec<String> = Vec::with_capacity(seq.len());
    for (i, item) in seq.iter().enumerate() {
        match scalar_string(item).map(|s| s.trim().to_string()) {
            Some(s) if !s.is_empty() => {
                if !out.contains(&s) {
                    out.push(s);
                }
            }
            _ => warn!(field = %element(field, i), "skipping unusable identifier"),
        }
    }
    Ok(out)
}
