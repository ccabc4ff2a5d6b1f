//! # Config Loader
//!
//! Profile document loading.
//!
//! Responsibilities:
//! - Parse YAML (primary), TOML and JSON documents into a [`ConfigNode`] tree
//! - Enumerate a profile directory in a deterministic order
//!
//! Building profiles from the parsed tree is the job of the `profile` crate.
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let scan = ConfigLoader::load_dir(Path::new("conf")).unwrap();
//! for doc in &scan.documents {
//!     println!("{}", doc.path.display());
//! }
//! ```

mod directory;
mod parser;

pub use contracts::ConfigNode;
pub use directory::{DirectoryScan, ProfileDocument};
pub use parser::ConfigFormat;

use contracts::ContractError;
use std::path::Path;

/// Configuration loader
///
/// Provides static methods to load documents from files, strings or directories.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load one document from a file path
    ///
    /// Format is detected from the file extension.
    ///
    /// # Errors
    /// - File read failure
    /// - Unsupported format
    /// - Parse failure
    pub fn load_from_path(path: &Path) -> Result<ConfigNode, ContractError> {
        let format = Self::detect_format(path)?;
        let content = Self::read_file(path)?;
        Self::load_from_str(&content, format)
    }

    /// Load one document from a string
    ///
    /// # Errors
    /// - Parse failure
    /// - Root node is not a map
    pub fn load_from_str(content: &str, format: ConfigFormat) -> Result<ConfigNode, ContractError> {
        parser::parse(content, format)
    }

    /// Load every supported document in a directory
    ///
    /// Unreadable or unparsable files are collected in [`DirectoryScan::failures`]
    /// instead of aborting the scan.
    ///
    /// # Errors
    /// - The directory itself cannot be read
    pub fn load_dir(dir: &Path) -> Result<DirectoryScan, ContractError> {
        directory::scan(dir)
    }
}

impl ConfigLoader {
    /// Infer configuration format from file extension
    fn detect_format(path: &Path) -> Result<ConfigFormat, ContractError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            ContractError::config_parse("cannot determine file format from extension")
        })?;

        ConfigFormat::from_extension(ext).ok_or_else(|| {
            ContractError::config_parse(format!("unsupported config format: .{ext}"))
        })
    }

    /// Read configuration file content
    fn read_file(path: &Path) -> Result<String, ContractError> {
        Ok(std::fs::read_to_string(path)?)
    }
}
