//! `info` command implementation.

use std::sync::Arc;

use anyhow::{Context, Result};
use bridge::Command;
use profile::{KeyKind, MockSim, ProfileRegistry, RegistryIndex};
use serde::Serialize;
use tracing::info;

use crate::cli::InfoArgs;
use crate::error::ensure_profiles_dir;

/// Registry index for JSON output
#[derive(Serialize)]
struct IndexInfo {
    profiles_dir: String,
    profiles: Vec<String>,
    aircraft_names: Vec<KeyInfo>,
    icao_models: Vec<KeyInfo>,
    commands: Vec<CommandInfo>,
}

#[derive(Serialize)]
struct KeyInfo {
    key: String,
    profile: String,
}

#[derive(Serialize)]
struct CommandInfo {
    path: &'static str,
    description: &'static str,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(profiles = %args.profiles.display(), "Loading profile index");
    ensure_profiles_dir(&args.profiles)?;

    let sim = Arc::new(MockSim::permissive());
    let mut registry = ProfileRegistry::new(sim.as_sim());
    let index = registry
        .reload(&args.profiles)
        .with_context(|| format!("Failed to read {}", args.profiles.display()))?;

    let info = build_index_info(&args.profiles.display().to_string(), &index);
    if args.json {
        let json = serde_json::to_string_pretty(&info).context("Failed to serialize index")?;
        println!("{}", json);
    } else {
        print_index_info(&info, index.rejected().len());
    }

    Ok(())
}

fn build_index_info(dir: &str, index: &RegistryIndex) -> IndexInfo {
    let keys = |kind: KeyKind| -> Vec<KeyInfo> {
        index
            .entries(kind)
            .into_iter()
            .map(|(key, profile)| KeyInfo {
                key: key.to_string(),
                profile: profile.to_string(),
            })
            .collect()
    };

    IndexInfo {
        profiles_dir: dir.to_string(),
        profiles: index.profiles().iter().map(|p| p.name().to_string()).collect(),
        aircraft_names: keys(KeyKind::AircraftName),
        icao_models: keys(KeyKind::IcaoModel),
        commands: Command::ALL
            .iter()
            .map(|c| CommandInfo {
                path: c.path(),
                description: c.description(),
            })
            .collect(),
    }
}

fn print_index_info(info: &IndexInfo, rejected: usize) {
    println!("Profiles in {} ({})", info.profiles_dir, info.profiles.len());
    if rejected > 0 {
        println!("  ⚠ {} documents rejected, run `hcbravo validate` for details", rejected);
    }

    print_keys("Aircraft names", &info.aircraft_names);
    print_keys("ICAO models", &info.icao_models);

    println!("\nCommands");
    for (i, command) in info.commands.iter().enumerate() {
        let prefix = if i == info.commands.len() - 1 { "└─" } else { "├─" };
        println!("   {} {:<14} {}", prefix, command.path, command.description);
    }
    println!();
}

fn print_keys(title: &str, keys: &[KeyInfo]) {
    println!("\n{} ({})", title, keys.len());
    for (i, key) in keys.iter().enumerate() {
        let prefix = if i == keys.len() - 1 { "└─" } else { "├─" };
        println!("   {} {} → {}", prefix, key.key, key.profile);
    }
}
