//! Document parsing
//!
//! YAML is the primary format; TOML and JSON are parsed into the same node tree.

use contracts::{node_kind, ConfigNode, ContractError};

/// Configuration document format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML (primary)
    Yaml,
    /// TOML
    Toml,
    /// JSON
    Json,
}

impl ConfigFormat {
    /// Infer format from a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Parse YAML content
pub fn parse_yaml(content: &str) -> Result<ConfigNode, ContractError> {
    serde_yaml::from_str(content).map_err(|e| ContractError::ConfigParse {
        message: format!("YAML parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse TOML content
pub fn parse_toml(content: &str) -> Result<ConfigNode, ContractError> {
    toml::from_str(content).map_err(|e| ContractError::ConfigParse {
        message: format!("TOML parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse JSON content
pub fn parse_json(content: &str) -> Result<ConfigNode, ContractError> {
    serde_json::from_str(content).map_err(|e| ContractError::ConfigParse {
        message: format!("JSON parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse content in the given format.
///
/// A profile document must be a map at the top level.
pub fn parse(content: &str, format: ConfigFormat) -> Result<ConfigNode, ContractError> {
    let root = match format {
        ConfigFormat::Yaml => parse_yaml(content)?,
        ConfigFormat::Toml => parse_toml(content)?,
        ConfigFormat::Json => parse_json(content)?,
    };

    if !root.is_mapping() {
        return Err(ContractError::config_validation(
            "<root>",
            format!("expected a map, found {}", node_kind(&root)),
        ));
    }
    Ok(root)
}
