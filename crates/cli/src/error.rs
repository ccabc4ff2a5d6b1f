//! Error types for CLI operations.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Profile directory missing
    #[error("Profile directory not found: {}", .path.display())]
    ProfilesNotFound { path: PathBuf },

    /// Profile directory could not be read or contains rejected documents
    #[error("Profile validation failed: {message}")]
    ProfileValidation { message: String },

    /// Panel could not be opened
    #[error("Failed to open panel device: {message}")]
    Device { message: String },
}

impl CliError {
    pub fn profiles_not_found(path: &Path) -> Self {
        Self::ProfilesNotFound {
            path: path.to_path_buf(),
        }
    }

    pub fn profile_validation(message: impl Into<String>) -> Self {
        Self::ProfileValidation {
            message: message.into(),
        }
    }

    pub fn device(message: impl Into<String>) -> Self {
        Self::Device {
            message: message.into(),
        }
    }
}

/// Fail early when the profile directory does not exist
pub fn ensure_profiles_dir(path: &Path) -> Result<(), CliError> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(CliError::profiles_not_found(path))
    }
}
