//! Type-erased registry of component pools.
//!
//! A collection holds pools of many component types in one map. The map only
//! needs two capabilities from each pool (membership and forced removal), so
//! pools are stored behind [`ErasedPool`] and downcast back to
//! `ComponentPool<T>` at the typed API boundary.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

use aether_foundation::{CheckMode, Entity};

use crate::component::{Component, component_name};
use crate::pool::ComponentPool;

/// Capabilities every pool offers regardless of its component type.
///
/// Only membership and forced removal; everything else goes through the
/// typed pool after a downcast.
pub trait ErasedPool: Any {
    /// Checks if the pool contains the entity.
    fn contains(&self, entity: Entity) -> bool;

    /// Removes the entity's component if present.
    fn remove_entity(&mut self, entity: Entity);

    /// Upcast for typed access.
    fn as_any(&self) -> &dyn Any;

    /// Upcast for typed mutable access.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> ErasedPool for ComponentPool<T> {
    fn contains(&self, entity: Entity) -> bool {
        self.has(entity)
    }

    fn remove_entity(&mut self, entity: Entity) {
        self.remove(entity);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

struct PoolSlot {
    name: &'static str,
    pool: Box<dyn ErasedPool>,
}

/// Map from component type to its pool.
///
/// Pools are created lazily on first typed access and live as long as the
/// registry, even once emptied.
#[derive(Default)]
pub struct PoolRegistry {
    pools: HashMap<TypeId, PoolSlot>,
}

impl fmt::Debug for PoolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.component_names()).finish()
    }
}

impl PoolRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the pool for `T`, if it has been created.
    #[must_use]
    pub fn get<T: Component>(&self) -> Option<&ComponentPool<T>> {
        self.pools
            .get(&TypeId::of::<T>())
            .and_then(|slot| slot.pool.as_any().downcast_ref())
    }

    /// Returns the pool for `T` mutably, if it has been created.
    #[must_use]
    pub fn get_mut<T: Component>(&mut self) -> Option<&mut ComponentPool<T>> {
        self.pools
            .get_mut(&TypeId::of::<T>())
            .and_then(|slot| slot.pool.as_any_mut().downcast_mut())
    }

    /// Returns the pool for `T`, creating it first if needed.
    ///
    /// # Panics
    ///
    /// Panics if the pool stored under `T`'s `TypeId` is not a `ComponentPool<T>`,
    /// which would mean the registry itself is corrupt.
    pub fn get_or_create<T: Component>(
        &mut self,
        checks: CheckMode,
        capacity: usize,
    ) -> &mut ComponentPool<T> {
        self.pools
            .entry(TypeId::of::<T>())
            .or_insert_with(|| {
                let name = component_name::<T>();
                log::debug!("creating pool for {name}");
                PoolSlot {
                    name,
                    pool: Box::new(ComponentPool::<T>::with_capacity(checks, capacity)),
                }
            })
            .pool
            .as_any_mut()
            .downcast_mut()
            .expect("pool registered under a foreign TypeId")
    }

    /// Checks if any pool contains the entity.
    #[must_use]
    pub fn any_contains(&self, entity: Entity) -> bool {
        self.pools.values().any(|slot| slot.pool.contains(entity))
    }

    /// Removes the entity from every pool.
    pub fn remove_from_all(&mut self, entity: Entity) {
        for slot in self.pools.values_mut() {
            slot.pool.remove_entity(entity);
        }
    }

    /// Number of pools created so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// Returns true if no pool has been created yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// Type names of the components that have a pool, for diagnostics.
    pub fn component_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.pools.values().map(|slot| slot.name)
    }
}
