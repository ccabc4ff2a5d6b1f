//! Typed sensors - one simulator value reduced to a boolean
//!
//! A sensor node is either a bare string (the simulator value name, read as a
//! boolean) or a map:
//!
//! ```yaml
//! key: sim/cockpit2/autopilot/heading_mode   # required
//! type: int                                  # bool (default) | int | float
//! invert: false
//! index: 0                                   # read one array element
//! values: [13, 15]                           # accepted values (int / float)
//! ```

use std::sync::Arc;

use contracts::{ConfigNode, SimAccess};
use tracing::debug;

use crate::error::{ProfileError, Result};
use crate::node::{child, element, optional, required, string_field};
use crate::source::ValueSource;

/// Anything that evaluates to "lit" / "not lit".
pub trait Indicator {
    /// Current state. Pure, never fails; unresolved values read as `false`.
    fn is_set(&self) -> bool;
}

/// Leaf sensor kind with its accepted-value set.
#[derive(Debug, Clone, PartialEq)]
pub enum SensorKind {
    Bool,
    Int(Vec<i32>),
    Float(Vec<f32>),
}

impl SensorKind {
    /// Configuration tag of this kind
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
        }
    }
}

/// Shape shared by sensor and dial nodes.
#[derive(Debug)]
pub(crate) struct SensorSpec<'a> {
    pub key: String,
    pub type_name: String,
    pub invert: bool,
    pub index: Option<usize>,
    pub values: Option<&'a ConfigNode>,
}

impl<'a> SensorSpec<'a> {
    pub(crate) fn parse(node: &'a ConfigNode, field: &str) -> Result<Self> {
        match node {
            ConfigNode::String(_) => Ok(Self {
                key: string_field(node, field)?,
                type_name: "bool".to_string(),
                invert: false,
                index: None,
                values: None,
            }),
            ConfigNode::Mapping(_) => {
                let key_field = child(field, "key");
                let key = string_field(required(node, "key", field)?, &key_field)?;

                let type_name = match optional(node, "type") {
                    Some(t) => string_field(t, &child(field, "type"))?.to_lowercase(),
                    None => "bool".to_string(),
                };

                let invert = match optional(node, "invert") {
                    Some(v) => v.as_bool().ok_or_else(|| {
                        ProfileError::invalid_node(child(field, "invert"), "bool", v)
                    })?,
                    None => false,
                };

                let index = match optional(node, "index") {
                    Some(v) => Some(
                        v.as_u64()
                            .and_then(|i| usize::try_from(i).ok())
                            .ok_or_else(|| {
                                ProfileError::invalid_node(
                                    child(field, "index"),
                                    "non-negative integer",
                                    v,
                                )
                            })?,
                    ),
                    None => None,
                };

                Ok(Self {
                    key,
                    type_name,
                    invert,
                    index,
                    values: optional(node, "values"),
                })
            }
            other => Err(ProfileError::invalid_node(field, "string or map", other)),
        }
    }
}

/// One simulator value reduced to a boolean.
///
/// Truthiness: with an empty accepted set, "value is non-zero"; otherwise
/// "value is in the accepted set". `invert` negates either rule. An unresolved
/// or unreadable value is always `false`, whatever `invert` says.
#[derive(Debug, Clone)]
pub struct TypedSensor {
    source: ValueSource,
    invert: bool,
    kind: SensorKind,
}

impl TypedSensor {
    /// Build a sensor from its configuration node.
    ///
    /// A simulator value that cannot be found is not an error; a malformed node is.
    pub fn build(node: &ConfigNode, sim: &Arc<dyn SimAccess>, field: &str) -> Result<Self> {
        let spec = SensorSpec::parse(node, field)?;
        let values_field = child(field, "values");

        let kind = match spec.type_name.as_str() {
            "bool" => {
                if spec.values.is_some() {
                    debug!(field, "accepted values are ignored for bool sensors");
                }
                SensorKind::Bool
            }
            "int" => SensorKind::Int(parse_values(spec.values, &values_field, "integer", |v| {
                v.as_i64().and_then(|i| i32::try_from(i).ok())
            })?),
            "float" => SensorKind::Float(parse_values(spec.values, &values_field, "number", |v| {
                v.as_f64().map(|f| f as f32)
            })?),
            other => {
                return Err(ProfileError::UnknownSensorType {
                    field: child(field, "type"),
                    type_name: other.to_string(),
                })
            }
        };

        Ok(Self {
            source: ValueSource::resolve(sim, &spec.key, spec.index),
            invert: spec.invert,
            kind,
        })
    }

    pub fn source(&self) -> &ValueSource {
        &self.source
    }

    pub fn kind(&self) -> &SensorKind {
        &self.kind
    }

    pub fn is_inverted(&self) -> bool {
        self.invert
    }
}

impl Indicator for TypedSensor {
    fn is_set(&self) -> bool {
        let hit = match &self.kind {
            SensorKind::Bool => self.source.read_bool(),
            SensorKind::Int(accepted) => self.source.read_int().map(|v| {
                if accepted.is_empty() {
                    v != 0
                } else {
                    accepted.contains(&v)
                }
            }),
            SensorKind::Float(accepted) => self.source.read_float().map(|v| {
                if accepted.is_empty() {
                    v != 0.0
                } else {
                    accepted.contains(&v)
                }
            }),
        };
        match hit {
            Some(hit) => hit != self.invert,
            None => false,
        }
    }
}

/// Parse an accepted-value list. A single scalar counts as a one-element list.
fn parse_values<T: PartialEq>(
    node: Option<&ConfigNode>,
    field: &str,
    expected: &'static str,
    convert: impl Fn(&ConfigNode) -> Option<T>,
) -> Result<Vec<T>> {
    let Some(node) = node else {
        return Ok(Vec::new());
    };

    let items: Vec<(String, &ConfigNode)> = match node {
        ConfigNode::Sequence(seq) => seq
            .iter()
            .enumerate()
            .map(|(i, v)| (element(field, i), v))
            .collect(),
        other => vec![(field.to_string(), other)],
    };

    let mut values = Vec::with_capacity(items.len());
    for (item_field, item) in items {
        let value =
            convert(item).ok_or_else(|| ProfileError::invalid_node(item_field, expected, item))?;
        if !values.contains(&value) {
            values.push(value);
        }
    }
    Ok(values)
}
