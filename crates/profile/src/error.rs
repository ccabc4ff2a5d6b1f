//! Profile construction error types

use contracts::{node_kind, ConfigNode, ContractError};
use thiserror::Error;

/// Profile specific error
///
/// Every variant names the dotted path of the offending field so the first
/// failure in a document can be reported precisely.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// Required field absent (or null)
    #[error("missing required field '{field}'")]
    MissingField { field: String },

    /// Field present with the wrong node kind
    #[error("invalid node at '{field}': expected {expected}, found {found}")]
    InvalidNode {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Sensor `type` tag not one of bool / int / float
    #[error("unknown sensor type '{type_name}' at '{field}'")]
    UnknownSensorType { field: String, type_name: String },

    /// No usable ICAO model left after filtering
    #[error("profile '{profile}' declares no ICAO models")]
    NoModels { profile: String },

    /// Wrapped ContractError
    #[error(transparent)]
    Contract(#[from] ContractError),
}

impl ProfileError {
    /// Create missing field error
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create invalid node error from the node actually found
    pub fn invalid_node(field: impl Into<String>, expected: &'static str, found: &ConfigNode) -> Self {
        Self::InvalidNode {
            field: field.into(),
            expected,
            found: node_kind(found),
        }
    }
}

/// Result alias
pub type Result<T> = std::result::Result<T, ProfileError>;
