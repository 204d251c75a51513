//! The component marker trait.

use std::any::{Any, type_name};

/// Any plain value type that can be stored in a [`ComponentPool`](crate::ComponentPool).
///
/// Components need no base type and no identity field. A component may carry
/// the [`Entity`](crate::Entity) it belongs to so that code iterating a pool
/// can navigate back to its owner, but storage never requires it.
pub trait Component: Any {}

impl<T> Component for T where T: Any {}

/// Returns the type name of a component, for diagnostics.
#[must_use]
pub fn component_name<T: Component>() -> &'static str {
    type_name::<T>()
}
