//! Systems and their incremental validation state machine.
//!
//! A system pairs a per-entity validity predicate with a work routine, both
//! supplied through [`SystemLogic`]. The base machinery tracks which entities
//! currently fail the predicate:
//!
//! ```text
//! Unvalidated --validate()--> Validated { valid: true | false }
//!                                  ^            |
//!                                  +------------+  per-entity re-validation
//!                                                  on every add/remove
//! ```
//!
//! One full scan happens through [`ComponentSystem::validate`]. After that the
//! collection keeps the state current one entity at a time, so
//! [`ComponentSystem::run`] can gate on validity without rescanning.

use std::cell::{Ref, RefCell, RefMut};
use std::collections::HashSet;
use std::rc::Rc;

use aether_foundation::{Entity, Error, Result};

use crate::collection::{ComponentCollection, SharedCollection};
use crate::observer::{SystemId, SystemObserver};

/// The behavior a concrete system supplies.
///
/// Both callbacks receive the collection by shared reference; mutating the
/// collection while a system validates or runs is not possible.
pub trait SystemLogic: 'static {
    /// Returns true if the entity satisfies this system's preconditions.
    fn is_valid(&self, collection: &ComponentCollection, entity: Entity) -> bool;

    /// Does the system's work. Only called while every entity is valid
    /// (in checked mode).
    fn run(&mut self, collection: &ComponentCollection);
}

/// Cached validity of a system over the entities of its collection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationState {
    valid: bool,
    validated: bool,
    failing: HashSet<Entity>,
}

impl ValidationState {
    /// Creates an unvalidated state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True once validated and while no entity is failing.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// True once a full scan has completed.
    #[must_use]
    pub fn is_validated(&self) -> bool {
        self.validated
    }

    /// Checks if the entity is currently failing.
    #[must_use]
    pub fn is_failing(&self, entity: Entity) -> bool {
        self.failing.contains(&entity)
    }

    /// Failing entities, in ascending id order.
    #[must_use]
    pub fn failing(&self) -> Vec<Entity> {
        let mut failing: Vec<_> = self.failing.iter().copied().collect();
        failing.sort_unstable();
        failing
    }

    /// Records the outcome of a full scan.
    pub fn complete_scan(&mut self, failing: impl IntoIterator<Item = Entity>) {
        self.failing = failing.into_iter().collect();
        self.valid = self.failing.is_empty();
        self.validated = true;
    }

    /// Forgets every result, returning to the unvalidated state.
    pub fn invalidate(&mut self) {
        *self = Self::default();
    }

    /// Records the re-evaluation of a single entity.
    pub fn record(&mut self, entity: Entity, passes: bool) {
        if passes {
            if self.failing.remove(&entity) && self.failing.is_empty() {
                self.valid = true;
            }
        } else if self.failing.insert(entity) {
            self.valid = false;
        }
    }
}

/// The part of a system the collection dispatches to.
///
/// Logic and state sit in separate cells: re-validation only needs a shared
/// borrow of the logic, so a caller holding [`ComponentSystem::logic`] never
/// blocks it.
struct SystemCore<L> {
    name: String,
    logic: RefCell<L>,
    state: RefCell<ValidationState>,
}

impl<L: SystemLogic> SystemCore<L> {
    fn validate_all(&self, collection: &ComponentCollection) {
        let mut state = self.state.borrow_mut();
        if state.is_validated() && collection.config().is_checked() {
            log::warn!(
                "tried to validate component system '{}' but this has already been done and \
                 should only be done once; consider validating when the system is built",
                self.name
            );
            return;
        }

        let logic = self.logic.borrow();
        let failing = collection
            .entities()
            .iter()
            .copied()
            .filter(|&entity| !logic.is_valid(collection, entity));
        state.complete_scan(failing);

        log::debug!(
            "validated system '{}' over {} entities: {}",
            self.name,
            collection.entities().len(),
            if state.is_valid() { "valid" } else { "invalid" }
        );
    }
}

impl<L: SystemLogic> SystemObserver for SystemCore<L> {
    fn name(&self) -> &str {
        &self.name
    }

    fn validate_entity(&self, collection: &ComponentCollection, entity: Entity) {
        if !self.state.borrow().is_validated() {
            log::warn!(
                "tried to validate entity {entity} for component system '{}' before it was fully \
                 validated; no components should change before every attached system has been \
                 validated",
                self.name
            );
            return;
        }

        let Ok(logic) = self.logic.try_borrow() else {
            log::error!(
                "entity {entity} changed while the logic of component system '{}' was mutably \
                 borrowed; the system must be validated again before it can run",
                self.name
            );
            self.state.borrow_mut().invalidate();
            return;
        };

        let passes = logic.is_valid(collection, entity);
        self.state.borrow_mut().record(entity, passes);
    }
}

/// A registered system over a shared collection.
///
/// Construction registers the system with the collection and dropping it
/// deregisters it. The collection only holds a weak handle, so it never keeps
/// a system alive.
pub struct ComponentSystem<L: SystemLogic> {
    id: SystemId,
    name: String,
    collection: SharedCollection,
    core: Rc<SystemCore<L>>,
}

impl<L: SystemLogic> ComponentSystem<L> {
    /// Creates a system and registers it with the collection.
    ///
    /// The system starts unvalidated; call [`validate`](Self::validate) once
    /// before mutating the collection further, or use
    /// [`new_validated`](Self::new_validated).
    ///
    /// # Panics
    ///
    /// Panics if the collection is currently borrowed.
    pub fn new(name: impl Into<String>, collection: SharedCollection, logic: L) -> Self {
        let name = name.into();
        let core = Rc::new(SystemCore {
            name: name.clone(),
            logic: RefCell::new(logic),
            state: RefCell::new(ValidationState::new()),
        });

        let observer: Rc<dyn SystemObserver> = core.clone();
        let id = collection.borrow_mut().add_system(Rc::downgrade(&observer));
        log::debug!("created component system '{name}' as {id}");

        Self {
            id,
            name,
            collection,
            core,
        }
    }

    /// Creates a system, registers it, and runs the initial full validation.
    ///
    /// # Panics
    ///
    /// Panics if the collection is currently borrowed.
    pub fn new_validated(name: impl Into<String>, collection: SharedCollection, logic: L) -> Self {
        let mut system = Self::new(name, collection, logic);
        system.validate();
        system
    }

    /// Validates every entity currently in the collection.
    ///
    /// In checked mode this happens once; later calls log a warning and
    /// leave the state alone, since per-entity re-validation keeps it
    /// current. The exception is a system whose logic was mutably borrowed
    /// during a mutation: it drops back to unvalidated and needs this scan
    /// again. In unchecked mode no re-validation happens on mutation, so
    /// calling this again refreshes the state.
    ///
    /// # Panics
    ///
    /// Panics if the collection or the logic is mutably borrowed.
    pub fn validate(&mut self) {
        let collection = self.collection.borrow();
        self.core.validate_all(&collection);
    }

    /// Runs the system's work routine.
    ///
    /// In checked mode the routine only runs while every entity is valid.
    /// In unchecked mode it always runs.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSystemRun`, listing the failing entities, if checks are
    /// enabled and the system is not currently valid.
    ///
    /// # Panics
    ///
    /// Panics if the collection is mutably borrowed or the logic is borrowed.
    pub fn run(&mut self) -> Result<()> {
        let collection = self.collection.borrow();

        if collection.config().is_checked() {
            let state = self.core.state.borrow();
            if !state.is_valid() {
                let failing = state.failing();
                log::error!(
                    "failed to run component system '{}' as all entities are not valid",
                    self.name
                );
                if state.is_validated() {
                    for entity in &failing {
                        log::error!(" - entity {entity} failed validation");
                    }
                } else {
                    log::error!(" - the system has not been fully validated");
                }
                return Err(Error::invalid_system_run(self.name.clone(), failing));
            }
        }

        self.core.logic.borrow_mut().run(&collection);
        Ok(())
    }

    /// Returns the system's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the handle under which the system is registered.
    #[must_use]
    pub fn id(&self) -> SystemId {
        self.id
    }

    /// Returns the collection this system observes.
    #[must_use]
    pub fn collection(&self) -> &SharedCollection {
        &self.collection
    }

    /// True once validated and while no entity fails the predicate.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.core.state.borrow().is_valid()
    }

    /// True once the initial full validation has happened.
    #[must_use]
    pub fn is_validated(&self) -> bool {
        self.core.state.borrow().is_validated()
    }

    /// Entities currently failing the predicate, in ascending id order.
    #[must_use]
    pub fn failing_entities(&self) -> Vec<Entity> {
        self.core.state.borrow().failing()
    }

    /// Returns a snapshot of the validation state.
    #[must_use]
    pub fn validation_state(&self) -> ValidationState {
        self.core.state.borrow().clone()
    }

    /// Borrows the system's logic.
    ///
    /// The collection can still be mutated while this borrow is held.
    #[must_use]
    pub fn logic(&self) -> Ref<'_, L> {
        self.core.logic.borrow()
    }

    /// Borrows the system's logic mutably.
    ///
    /// A mutation of the collection while this borrow is held cannot
    /// re-validate the system, which then needs a full
    /// [`validate`](Self::validate) before it runs again.
    #[must_use]
    pub fn logic_mut(&self) -> RefMut<'_, L> {
        self.core.logic.borrow_mut()
    }
}

impl<L: SystemLogic> Drop for ComponentSystem<L> {
    fn drop(&mut self) {
        let Ok(mut collection) = self.collection.try_borrow_mut() else {
            log::warn!(
                "could not deregister component system '{}': its collection is borrowed; \
                 it will be pruned on the next mutation",
                self.name
            );
            return;
        };

        if let Err(err) = collection.remove_system(self.id, &self.name) {
            log::warn!("{err}; this should never happen, please report it as a bug");
        }
    }
}

impl<L: SystemLogic> std::fmt::Debug for ComponentSystem<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentSystem")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("state", &self.core.state.try_borrow().map(|s| s.clone()).ok())
            .finish_non_exhaustive()
    }
}
