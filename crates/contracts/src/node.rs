//! ConfigNode - format-neutral configuration tree
//!
//! Every supported document format (YAML, TOML, JSON) is parsed into the same
//! tree so profile construction only deals with one node type.

/// Parsed configuration node.
pub type ConfigNode = serde_yaml::Value;

/// Human-readable node kind, used in validation messages.
pub fn node_kind(node: &ConfigNode) -> &'static str {
    match node {
        ConfigNode::Null => "null",
        ConfigNode::Bool(_) => "bool",
        ConfigNode::Number(_) => "number",
        ConfigNode::String(_) => "string",
        ConfigNode::Sequence(_) => "sequence",
        ConfigNode::Mapping(_) => "map",
        ConfigNode::Tagged(_) => "tagged value",
    }
}
