//! Node access helpers shared by the builders.

use contracts::ConfigNode;

use crate::error::{ProfileError, Result};

/// Dotted path of a child field.
pub(crate) fn child(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

/// Path of a sequence element.
pub(crate) fn element(parent: &str, idx: usize) -> String {
    format!("{parent}[{idx}]")
}

/// Look up an optional field. A null value counts as absent.
pub(crate) fn optional<'a>(node: &'a ConfigNode, key: &str) -> Option<&'a ConfigNode> {
    node.get(key).filter(|n| !n.is_null())
}

/// Look up a required field.
pub(crate) fn required<'a>(node: &'a ConfigNode, key: &str, parent: &str) -> Result<&'a ConfigNode> {
    optional(node, key).ok_or_else(|| ProfileError::missing(child(parent, key)))
}

/// Render a scalar node as text. Non-scalar nodes yield `None`.
pub(crate) fn scalar_string(node: &ConfigNode) -> Option<String> {
    match node {
        ConfigNode::String(s) => Some(s.clone()),
        ConfigNode::Number(n) => Some(n.to_string()),
        ConfigNode::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Require a non-empty scalar string.
pub(crate) fn string_field(node: &ConfigNode, field: &str) -> Result<String> {
    match scalar_string(node) {
        Some(s) if !s.trim().is_empty() => Ok(s),
        Some(_) => Err(ProfileError::missing(field)),
        None => Err(ProfileError::invalid_node(field, "string", node)),
    }
}
