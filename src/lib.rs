//! Aether - sparse-set entity-component storage with validated systems
//!
//! This crate re-exports all layers of the Aether system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: aether_sandbox    - Demo binary
//! Layer 1: aether_storage    - Component pools, collections, systems
//! Layer 0: aether_foundation - Core types (Entity, Error, EcsConfig)
//! ```

pub use aether_foundation as foundation;
pub use aether_storage as storage;

pub use aether_foundation::{
    CheckMode, EcsConfig, Entity, EntityAllocator, Error, ErrorKind, Result, new_entity,
};
pub use aether_storage::{
    Component, ComponentCollection, ComponentPool, ComponentSystem, SharedCollection, SystemId,
    SystemLogic,
};
