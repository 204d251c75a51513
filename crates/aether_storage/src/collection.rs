//! The component collection: pools, live entities, and observing systems.
//!
//! Every structural mutation ([`add`](ComponentCollection::add),
//! [`remove`](ComponentCollection::remove),
//! [`remove_all`](ComponentCollection::remove_all)) keeps the live entity set
//! in sync with the pools and, in checked mode, asks each registered system to
//! re-validate the affected entity before returning.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use aether_foundation::{EcsConfig, Entity, Error, Result};

use crate::component::{Component, component_name};
use crate::observer::{ObserverHandle, SystemId, SystemRegistry};
use crate::pool::ComponentPool;
use crate::registry::PoolRegistry;

/// A collection shared between the caller and every system observing it.
pub type SharedCollection = Rc<RefCell<ComponentCollection>>;

/// Owns one pool per component type and the set of entities holding at least
/// one component.
///
/// Invariant: an entity is in [`entities`](Self::entities) if and only if
/// some pool contains it.
#[derive(Debug, Default)]
pub struct ComponentCollection {
    config: EcsConfig,
    pools: PoolRegistry,
    entities: HashSet<Entity>,
    systems: SystemRegistry,
}

impl ComponentCollection {
    /// Creates an empty collection with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty collection with the given configuration.
    #[must_use]
    pub fn with_config(config: EcsConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Creates an empty, shareable collection with the default configuration.
    #[must_use]
    pub fn shared() -> SharedCollection {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Creates an empty, shareable collection with the given configuration.
    #[must_use]
    pub fn shared_with_config(config: EcsConfig) -> SharedCollection {
        Rc::new(RefCell::new(Self::with_config(config)))
    }

    /// Returns the collection's configuration.
    #[must_use]
    pub fn config(&self) -> &EcsConfig {
        &self.config
    }

    // --- Queries ---

    /// Checks if the entity has a component of type `T`.
    ///
    /// A type that has never been stored simply has no components.
    #[must_use]
    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.pools.get::<T>().is_some_and(|pool| pool.has(entity))
    }

    /// Gets the entity's `T` component, if any.
    #[must_use]
    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.pools.get::<T>()?.get(entity)
    }

    /// Gets the entity's `T` component mutably, if any.
    #[must_use]
    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.pools.get_mut::<T>()?.get_mut(entity)
    }

    /// Gets a component that must exist.
    ///
    /// # Errors
    ///
    /// Returns `ComponentNotFound` if the entity has no `T` component.
    pub fn fetch<T: Component>(&self, entity: Entity) -> Result<&T> {
        self.get(entity)
            .ok_or_else(|| Error::component_not_found(entity, component_name::<T>()))
    }

    /// Gets a component that must exist, mutably.
    ///
    /// # Errors
    ///
    /// Returns `ComponentNotFound` if the entity has no `T` component.
    pub fn fetch_mut<T: Component>(&mut self, entity: Entity) -> Result<&mut T> {
        self.get_mut(entity)
            .ok_or_else(|| Error::component_not_found(entity, component_name::<T>()))
    }

    /// Returns the pool for `T` if it exists.
    #[must_use]
    pub fn try_pool<T: Component>(&self) -> Option<&ComponentPool<T>> {
        self.pools.get::<T>()
    }

    /// Returns the pool for `T`, which must already exist.
    ///
    /// # Errors
    ///
    /// Returns `PoolNotFound` if no component of type `T` has ever been stored
    /// and the pool was never requested through [`pool_mut`](Self::pool_mut).
    pub fn pool<T: Component>(&self) -> Result<&ComponentPool<T>> {
        self.try_pool()
            .ok_or_else(|| Error::pool_not_found(component_name::<T>()))
    }

    /// Returns the pool for `T`, creating it if needed.
    ///
    /// Intended for in-place edits of component values. Adding or removing
    /// through the returned pool bypasses the entity set and system
    /// validation; use [`add`](Self::add) and [`remove`](Self::remove) for
    /// structural changes.
    pub fn pool_mut<T: Component>(&mut self) -> &mut ComponentPool<T> {
        self.pools
            .get_or_create::<T>(self.config.checks, self.config.pool_capacity)
    }

    /// Returns every entity that has at least one component.
    #[must_use]
    pub fn entities(&self) -> &HashSet<Entity> {
        &self.entities
    }

    /// Checks if the entity has any component at all.
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains(&entity)
    }

    /// Number of pools created so far.
    #[must_use]
    pub fn pool_count(&self) -> usize {
        self.pools.len()
    }

    /// Number of live systems currently observing this collection.
    #[must_use]
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    /// Checks if a system is registered with this collection and alive.
    #[must_use]
    pub fn is_registered(&self, id: SystemId) -> bool {
        self.systems.contains(id)
    }

    // --- Mutations ---

    /// Attaches a component to the entity and re-validates it in every system.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateComponent` in checked mode if the entity already has a
    /// `T`. The existing component is left unchanged and no system is notified.
    pub fn add<T: Component>(&mut self, entity: Entity, component: T) -> Result<()> {
        self.prune_dropped_systems();
        self.pool_mut::<T>().add(entity, component)?;
        self.entities.insert(entity);
        log::trace!("added {} to entity {entity}", component_name::<T>());

        self.validate_entity(entity);
        Ok(())
    }

    /// Detaches the entity's `T` component and re-validates it in every system.
    ///
    /// Removing a component the entity does not have is not an error. The
    /// entity leaves the live set once it holds no components at all.
    pub fn remove<T: Component>(&mut self, entity: Entity) -> Option<T> {
        self.prune_dropped_systems();
        let removed = self.pool_mut::<T>().remove(entity);
        if removed.is_some() {
            log::trace!("removed {} from entity {entity}", component_name::<T>());
        }

        if !self.pools.any_contains(entity) {
            self.entities.remove(&entity);
        }

        self.validate_entity(entity);
        removed
    }

    /// Detaches every component of the entity, of every type, and
    /// re-validates it once.
    pub fn remove_all(&mut self, entity: Entity) {
        self.prune_dropped_systems();
        self.pools.remove_from_all(entity);
        self.entities.remove(&entity);
        log::trace!("removed all components from entity {entity}");

        self.validate_entity(entity);
    }

    // --- System registry ---

    pub(crate) fn add_system(&mut self, observer: ObserverHandle) -> SystemId {
        self.prune_dropped_systems();
        let id = self.systems.register(observer);
        log::debug!("registered {id}; {} system(s) observing", self.systems.len());
        id
    }

    pub(crate) fn remove_system(&mut self, id: SystemId, name: &str) -> Result<()> {
        if !self.systems.deregister(id) {
            return Err(Error::registry_inconsistency(name));
        }
        log::debug!("deregistered {id} ('{name}')");
        Ok(())
    }

    /// Forgets systems that were dropped while the collection was borrowed.
    fn prune_dropped_systems(&mut self) {
        let pruned = self.systems.retain_live();
        if pruned > 0 {
            log::debug!(
                "pruned {pruned} dropped system(s); {} system(s) observing",
                self.systems.len()
            );
        }
    }

    /// Asks every registered system to re-validate one entity.
    ///
    /// Skipped entirely in unchecked mode.
    fn validate_entity(&self, entity: Entity) {
        if !self.config.is_checked() {
            return;
        }

        for (id, handle) in self.systems.observers() {
            // Dropped systems were pruned when this mutation started
            let Some(observer) = handle.upgrade() else {
                continue;
            };
            log::trace!("re-validating entity {entity} for '{}' ({id})", observer.name());
            observer.validate_entity(self, entity);
        }
    }
}
