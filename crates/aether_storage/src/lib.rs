//! Sparse-set component pools, collections, and validated systems for Aether.
//!
//! This crate provides:
//! - [`ComponentPool`] - Sparse-set storage for one component type
//! - [`PoolRegistry`] - Type-erased map of pools keyed by component type
//! - [`ComponentCollection`] - Pools, the live entity set, and observing systems
//! - [`ComponentSystem`] - Incrementally validated unit of work over a collection
//!
//! # Re-entrancy
//!
//! Mutation and validation are strictly sequential. [`SystemLogic`] callbacks
//! receive a shared `&ComponentCollection` and cannot mutate it; reaching the
//! collection through another [`SharedCollection`] handle from inside a
//! callback panics on the `RefCell` borrow.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collection;
pub mod component;
pub mod observer;
pub mod pool;
pub mod registry;
pub mod system;

pub use collection::{ComponentCollection, SharedCollection};
pub use component::{Component, component_name};
pub use observer::SystemId;
pub use pool::ComponentPool;
pub use registry::{ErasedPool, PoolRegistry};
pub use system::{ComponentSystem, SystemLogic, ValidationState};

pub use aether_foundation::{CheckMode, EcsConfig, Entity, Error, ErrorKind, Result};
