//! Composite sensors - logical OR over typed sensors

use std::sync::Arc;

use contracts::{ConfigNode, SimAccess};

use crate::error::{ProfileError, Result};
use crate::node::element;
use crate::sensor::{Indicator, TypedSensor};

/// Ordered collection of typed sensors, set when any member is set.
///
/// Configured as a sequence of sensor nodes; a single sensor node is accepted
/// as a one-member composite. An empty composite is never set.
#[derive(Debug, Clone, Default)]
pub struct CompositeSensor {
    members: Vec<TypedSensor>,
}

impl CompositeSensor {
    pub fn build(node: &ConfigNode, sim: &Arc<dyn SimAccess>, field: &str) -> Result<Self> {
        let members = match node {
            ConfigNode::Sequence(seq) => seq
                .iter()
                .enumerate()
                .map(|(i, member)| TypedSensor::build(member, sim, &element(field, i)))
                .collect::<Result<Vec<_>>>()?,
            ConfigNode::String(_) | ConfigNode::Mapping(_) => {
                vec![TypedSensor::build(node, sim, field)?]
            }
            other => {
                return Err(ProfileError::invalid_node(
                    field,
                    "sequence, string or map",
                    other,
                ))
            }
        };
        Ok(Self { members })
    }

    pub fn members(&self) -> &[TypedSensor] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl Indicator for CompositeSensor {
    fn is_set(&self) -> bool {
        self.members.iter().any(Indicator::is_set)
    }
}
