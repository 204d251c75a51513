//! Entity handles, errors, and configuration for Aether.
//!
//! This crate provides:
//! - [`Entity`] - Opaque entity identifiers
//! - [`EntityAllocator`] / [`new_entity`] - Monotonic entity allocation
//! - [`Error`] - Error kinds raised by checked storage operations
//! - [`EcsConfig`] / [`CheckMode`] - The checked/unchecked switch

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod entity;
pub mod error;

pub use config::{CheckMode, EcsConfig};
pub use entity::{Entity, EntityAllocator, new_entity};
pub use error::{Error, ErrorKind, FailingEntities, Result};
