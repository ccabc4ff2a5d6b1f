//! `validate` command implementation.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use profile::{MockSim, Profile, ProfileRegistry, RegistryIndex};
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;
use crate::error::{ensure_profiles_dir, CliError};

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    profiles_dir: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    profiles: Vec<ProfileSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    rejected: Vec<RejectedFile>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    conflicts: Vec<ConflictInfo>,
}

#[derive(Serialize)]
struct ProfileSummary {
    file: String,
    name: String,
    aircraft_names: Vec<String>,
    icao_models: Vec<String>,
    indicators: usize,
    dials: usize,
}

#[derive(Serialize)]
struct RejectedFile {
    file: String,
    error: String,
}

#[derive(Serialize)]
struct ConflictInfo {
    kind: String,
    key: String,
    kept: String,
    dropped: String,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(profiles = %args.profiles.display(), "Validating profiles");
    ensure_profiles_dir(&args.profiles)?;

    let result = validate_dir(&args.profiles);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        Err(CliError::profile_validation(format!(
            "{} of {} documents rejected",
            result.rejected.len(),
            result.rejected.len() + result.profiles.len()
        ))
        .into())
    }
}

/// Build every document against a simulator that knows every value name,
/// so only structural problems are reported.
fn validate_dir(dir: &Path) -> ValidationResult {
    let sim = Arc::new(MockSim::permissive());
    let mut registry = ProfileRegistry::new(sim.as_sim());

    match registry.reload(dir) {
        Ok(index) => summarize(dir, &index),
        Err(e) => ValidationResult {
            valid: false,
            profiles_dir: dir.display().to_string(),
            error: Some(e.to_string()),
            profiles: Vec::new(),
            rejected: Vec::new(),
            conflicts: Vec::new(),
        },
    }
}

fn summarize(dir: &Path, index: &RegistryIndex) -> ValidationResult {
    let profiles = index.profiles().iter().map(|p| profile_summary(p)).collect();
    let rejected: Vec<_> = index
        .rejected()
        .iter()
        .map(|r| RejectedFile {
            file: r.path.display().to_string(),
            error: r.error.to_string(),
        })
        .collect();
    let conflicts = index
        .conflicts()
        .iter()
        .map(|c| ConflictInfo {
            kind: c.kind.to_string(),
            key: c.key.clone(),
            kept: c.kept.clone(),
            dropped: c.dropped.clone(),
        })
        .collect();

    ValidationResult {
        valid: rejected.is_empty(),
        profiles_dir: dir.display().to_string(),
        error: None,
        profiles,
        rejected,
        conflicts,
    }
}

fn profile_summary(profile: &Profile) -> ProfileSummary {
    let indicators = profile.system().configured()
        + profile.modes().map_or(0, |m| m.configured())
        + profile.annunciator().map_or(0, |a| a.configured());

    ProfileSummary {
        file: profile
            .source()
            .map(|p| p.display().to_string())
            .unwrap_or_default(),
        name: profile.name().to_string(),
        aircraft_names: profile.aircraft_names().to_vec(),
        icao_models: profile.icao_models().to_vec(),
        indicators,
        dials: profile.dials().map_or(0, |d| d.configured()),
    }
}

fn print_validation_result(result: &ValidationResult) {
    if let Some(ref error) = result.error {
        println!("✗ Cannot read profile directory: {}", result.profiles_dir);
        println!("\n  Error: {}", error);
        return;
    }

    if result.valid {
        println!("✓ All profiles are valid: {}", result.profiles_dir);
    } else {
        println!("✗ Some profiles are invalid: {}", result.profiles_dir);
    }

    for profile in &result.profiles {
        println!("\n  ✓ {} ({})", profile.name, profile.file);
        println!("    Aircraft: {:?}", profile.aircraft_names);
        println!("    ICAO models: {:?}", profile.icao_models);
        println!("    Indicators: {}", profile.indicators);
        println!("    Dials: {}", profile.dials);
    }

    for rejected in &result.rejected {
        println!("\n  ✗ {}", rejected.file);
        println!("    Error: {}", rejected.error);
    }

    if !result.conflicts.is_empty() {
        println!("\n⚠ Conflicts (first registered wins):");
        for c in &result.conflicts {
            println!(
                "  - {} '{}' kept by {}, dropped from {}",
                c.kind, c.key, c.kept, c.dropped
            );
        }
    }
}
