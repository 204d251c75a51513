//! Sparse-set storage for a single component type.
//!
//! A pool keeps its components in a dense array for cache-friendly iteration,
//! a parallel dense array of owning entities, and a sparse map from entity to
//! dense index. For every valid slot `i`:
//!
//! ```text
//! sparse[entities[i]] == i
//! ```
//!
//! Removal swaps the last slot into the hole and truncates, so add, remove,
//! and lookup are all O(1) but iteration order is not preserved across removals.

use std::collections::HashMap;
use std::ops::{Index, IndexMut};

use aether_foundation::{CheckMode, Entity, Error, Result};

use crate::component::{Component, component_name};

/// Sparse-set container owning every live instance of component type `T`.
#[derive(Clone, Debug)]
pub struct ComponentPool<T> {
    /// Component values, densely packed.
    components: Vec<T>,
    /// Owning entity of each dense slot.
    entities: Vec<Entity>,
    /// Entity -> dense index.
    sparse: HashMap<Entity, usize>,
    checks: CheckMode,
}

impl<T: Component> Default for ComponentPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Component> ComponentPool<T> {
    /// Creates an empty pool using the build profile's default check mode.
    #[must_use]
    pub fn new() -> Self {
        Self::with_mode(CheckMode::default())
    }

    /// Creates an empty pool with an explicit check mode.
    #[must_use]
    pub fn with_mode(checks: CheckMode) -> Self {
        Self::with_capacity(checks, 0)
    }

    /// Creates an empty pool with room for `capacity` components.
    #[must_use]
    pub fn with_capacity(checks: CheckMode, capacity: usize) -> Self {
        Self {
            components: Vec::with_capacity(capacity),
            entities: Vec::with_capacity(capacity),
            sparse: HashMap::with_capacity(capacity),
            checks,
        }
    }

    /// Returns the pool's check mode.
    #[must_use]
    pub fn check_mode(&self) -> CheckMode {
        self.checks
    }

    /// Checks if the entity has a component in this pool.
    #[must_use]
    pub fn has(&self, entity: Entity) -> bool {
        self.sparse.contains_key(&entity)
    }

    /// Gets the entity's component.
    #[must_use]
    pub fn get(&self, entity: Entity) -> Option<&T> {
        let index = *self.sparse.get(&entity)?;
        Some(&self.components[index])
    }

    /// Gets the entity's component mutably.
    #[must_use]
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        let index = *self.sparse.get(&entity)?;
        Some(&mut self.components[index])
    }

    /// Returns the dense component array.
    ///
    /// Order is insertion order, except that each removal moves the last
    /// component into the removed slot.
    #[must_use]
    pub fn get_all(&self) -> &[T] {
        &self.components
    }

    /// Returns the dense component array mutably.
    ///
    /// Values may be edited in place; membership cannot change through this slice.
    #[must_use]
    pub fn get_all_mut(&mut self) -> &mut [T] {
        &mut self.components
    }

    /// Returns the owning entity of each dense slot, parallel to [`get_all`](Self::get_all).
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Iterates `(entity, component)` pairs in dense order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.entities.iter().copied().zip(self.components.iter())
    }

    /// Iterates `(entity, component)` pairs in dense order, with mutable components.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.entities.iter().copied().zip(self.components.iter_mut())
    }

    /// Returns the number of components in the pool.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns true if the pool holds no components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Attaches a component to the entity by appending it to the dense arrays.
    ///
    /// An entity holds at most one component per type. With checks enabled a
    /// second add is rejected and the existing value is left untouched; without
    /// checks the existing value is overwritten in place.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateComponent`](aether_foundation::ErrorKind::DuplicateComponent)
    /// in checked mode if the entity already has a component of this type.
    pub fn add(&mut self, entity: Entity, component: T) -> Result<()> {
        if let Some(&index) = self.sparse.get(&entity) {
            if self.checks.is_checked() {
                return Err(Error::duplicate_component(entity, component_name::<T>()));
            }
            self.components[index] = component;
            return Ok(());
        }

        let index = self.components.len();
        self.components.push(component);
        self.entities.push(entity);
        self.sparse.insert(entity, index);
        Ok(())
    }

    /// Detaches and returns the entity's component. Absent entities are a no-op.
    ///
    /// The last dense slot is moved into the vacated slot and the moved
    /// entity's sparse index is updated.
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        let index = self.sparse.remove(&entity)?;

        let removed = self.components.swap_remove(index);
        self.entities.swap_remove(index);

        // Nothing moved if the removed slot was the last one.
        if let Some(&moved) = self.entities.get(index) {
            self.sparse.insert(moved, index);
        }

        Some(removed)
    }

    /// Removes every component, keeping allocated capacity.
    pub fn clear(&mut self) {
        self.components.clear();
        self.entities.clear();
        self.sparse.clear();
    }

    #[cfg(test)]
    fn assert_consistent(&self) {
        assert_eq!(self.components.len(), self.entities.len());
        assert_eq!(self.sparse.len(), self.entities.len());
        for (i, entity) in self.entities.iter().enumerate() {
            assert_eq!(self.sparse.get(entity), Some(&i));
        }
    }
}

impl<T: Component> Index<Entity> for ComponentPool<T> {
    type Output = T;

    fn index(&self, entity: Entity) -> &Self::Output {
        self.get(entity)
            .unwrap_or_else(|| panic!("entity {entity} has no {}", component_name::<T>()))
    }
}

impl<T: Component> IndexMut<Entity> for ComponentPool<T> {
    fn index_mut(&mut self, entity: Entity) -> &mut Self::Output {
        self.get_mut(entity)
            .unwrap_or_else(|| panic!("entity {entity} has no {}", component_name::<T>()))
    }
}
