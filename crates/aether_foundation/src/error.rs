//! Error types for Aether storage and systems.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Unchecked queries never produce these; only checked operations do.

use std::fmt;

use thiserror::Error;

use crate::entity::Entity;

/// Result alias used throughout Aether.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Aether operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind }
    }

    /// Creates a duplicate component error.
    #[must_use]
    pub fn duplicate_component(entity: Entity, component: &'static str) -> Self {
        Self::new(ErrorKind::DuplicateComponent { entity, component })
    }

    /// Creates a component not found error.
    #[must_use]
    pub fn component_not_found(entity: Entity, component: &'static str) -> Self {
        Self::new(ErrorKind::ComponentNotFound { entity, component })
    }

    /// Creates a pool not found error.
    #[must_use]
    pub fn pool_not_found(component: &'static str) -> Self {
        Self::new(ErrorKind::PoolNotFound { component })
    }

    /// Creates an invalid system run error.
    #[must_use]
    pub fn invalid_system_run(system: impl Into<String>, failing: Vec<Entity>) -> Self {
        Self::new(ErrorKind::InvalidSystemRun {
            system: system.into(),
            failing: FailingEntities(failing),
        })
    }

    /// Creates a system registry inconsistency error.
    #[must_use]
    pub fn registry_inconsistency(system: impl Into<String>) -> Self {
        Self::new(ErrorKind::SystemRegistryInconsistency {
            system: system.into(),
        })
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// An entity already holds a component of this type.
    #[error(
        "entity {entity} already has a {component}; an entity holds at most one component per type"
    )]
    DuplicateComponent {
        /// The entity the add targeted.
        entity: Entity,
        /// Type name of the component.
        component: &'static str,
    },

    /// A component that must exist is not attached to the entity.
    #[error("component not found: {component} on entity {entity}")]
    ComponentNotFound {
        /// The entity that was queried.
        entity: Entity,
        /// Type name of the component.
        component: &'static str,
    },

    /// No pool has been created for the component type.
    #[error("no pool exists for component {component}")]
    PoolNotFound {
        /// Type name of the component.
        component: &'static str,
    },

    /// A system was run while some entities fail its predicate.
    #[error("refused to run system '{system}': {failing}")]
    InvalidSystemRun {
        /// Name of the system.
        system: String,
        /// Entities currently failing validation.
        failing: FailingEntities,
    },

    /// A system could not be found while deregistering (internal bug).
    #[error("system '{system}' missing from its collection's registry")]
    SystemRegistryInconsistency {
        /// Name of the system.
        system: String,
    },
}

/// The entities that failed validation when a run was refused.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FailingEntities(pub Vec<Entity>);

impl FailingEntities {
    /// Returns the failing entities.
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.0
    }
}

impl fmt::Display for FailingEntities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed for ")?;
        if self.0.is_empty() {
            return write!(f, "no recorded entities");
        }
        write!(f, "entities ")?;
        for (i, entity) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{entity}")?;
        }
        Ok(())
    }
}
