//! Indicator block macros
//!
//! Every indicator block has the same shape: a handful of required composite
//! sensors, a handful of optional ones, a builder that reads them from a map,
//! and one accessor per indicator.

/// Define an indicator block.
///
/// Required indicators build first (a missing one fails the block), then the
/// optional ones in declaration order. Required accessors return `bool`;
/// optional accessors return `None` when the indicator is not configured.
///
/// # Usage
/// ```ignore
/// define_indicator_block!(
///     /// Power and gear
///     SystemBlock {
///         required: [volts],
///         optional: [gear],
///     }
/// );
/// ```
macro_rules! define_indicator_block {
    (
        $(#[$meta:meta])*
        $name:ident {
            required: [$($req:ident),* $(,)?],
            optional: [$($opt:ident),* $(,)?] $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            $($req: $crate::composite::CompositeSensor,)*
            $($opt: Option<$crate::composite::CompositeSensor>,)*
        }

        impl $name {
            /// Build the block from a map node at `field`.
            pub fn build(
                node: &contracts::ConfigNode,
                sim: &std::sync::Arc<dyn contracts::SimAccess>,
                field: &str,
            ) -> $crate::error::Result<Self> {
                if !node.is_mapping() {
                    return Err($crate::error::ProfileError::invalid_node(field, "map", node));
                }
                $(
                    let $req = $crate::composite::CompositeSensor::build(
                        $crate::node::required(node, stringify!($req), field)?,
                        sim,
                        &$crate::node::child(field, stringify!($req)),
                    )?;
                )*
                $(
                    let $opt = match $crate::node::optional(node, stringify!($opt)) {
                        Some(member) => Some($crate::composite::CompositeSensor::build(
                            member,
                            sim,
                            &$crate::node::child(field, stringify!($opt)),
                        )?),
                        None => None,
                    };
                )*
                Ok(Self { $($req,)* $($opt,)* })
            }

            $(
                pub fn $req(&self) -> bool {
                    $crate::sensor::Indicator::is_set(&self.$req)
                }
            )*

            $(
                pub fn $opt(&self) -> Option<bool> {
                    self.$opt.as_ref().map($crate::sensor::Indicator::is_set)
                }
            )*

            /// Number of indicators present in the configuration
            pub fn configured(&self) -> usize {
                #[allow(unused_mut)]
                let mut count = 0usize;
                $(
                    let _ = &self.$req;
                    count += 1;
                )*
                $(
                    count += usize::from(self.$opt.is_some());
                )*
                count
            }
        }
    };
}
