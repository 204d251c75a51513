//! Registry of the systems observing a collection.
//!
//! The collection never owns its systems. It keeps a weak handle per system,
//! keyed by a [`SystemId`], in a dense list with a side index so that
//! deregistration is an O(1) swap-and-truncate, the same removal scheme the
//! pools use. Handles whose system was dropped without deregistering are
//! pruned with the same scheme.

use std::collections::HashMap;
use std::fmt;
use std::rc::Weak;

use aether_foundation::Entity;

use crate::collection::ComponentCollection;

/// Handle identifying a system registered with a collection.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SystemId(u64);

impl SystemId {
    /// Returns the raw id.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "system#{}", self.0)
    }
}

/// What the collection needs from a registered system.
pub(crate) trait SystemObserver {
    /// Name of the system, for diagnostics.
    fn name(&self) -> &str;

    /// Re-evaluates a single entity after a structural mutation.
    fn validate_entity(&self, collection: &ComponentCollection, entity: Entity);
}

pub(crate) type ObserverHandle = Weak<dyn SystemObserver>;

struct Registration {
    id: SystemId,
    observer: ObserverHandle,
}

/// Dense list of registered systems with an id -> slot index.
#[derive(Default)]
pub(crate) struct SystemRegistry {
    next_id: u64,
    systems: Vec<Registration>,
    lookup: HashMap<SystemId, usize>,
}

impl SystemRegistry {
    /// Appends a system and returns its handle.
    pub(crate) fn register(&mut self, observer: ObserverHandle) -> SystemId {
        let id = SystemId(self.next_id);
        self.next_id += 1;

        let index = self.systems.len();
        self.systems.push(Registration { id, observer });
        self.lookup.insert(id, index);
        id
    }

    /// Removes a system. Returns false if it was not registered.
    pub(crate) fn deregister(&mut self, id: SystemId) -> bool {
        let Some(index) = self.lookup.remove(&id) else {
            return false;
        };

        self.swap_remove(index);
        true
    }

    /// Drops the handles of systems that no longer exist. Returns how many
    /// were removed.
    pub(crate) fn retain_live(&mut self) -> usize {
        let mut pruned = 0;
        let mut index = 0;
        while index < self.systems.len() {
            if self.systems[index].observer.strong_count() == 0 {
                self.lookup.remove(&self.systems[index].id);
                self.swap_remove(index);
                pruned += 1;
            } else {
                index += 1;
            }
        }
        pruned
    }

    fn swap_remove(&mut self, index: usize) {
        self.systems.swap_remove(index);
        if let Some(moved) = self.systems.get(index) {
            self.lookup.insert(moved.id, index);
        }
    }

    /// Checks if the system is registered and still alive.
    pub(crate) fn contains(&self, id: SystemId) -> bool {
        self.lookup
            .get(&id)
            .is_some_and(|&index| self.systems[index].observer.strong_count() > 0)
    }

    /// Number of registered systems that are still alive.
    pub(crate) fn len(&self) -> usize {
        self.systems
            .iter()
            .filter(|r| r.observer.strong_count() > 0)
            .count()
    }

    /// Registered systems in dispatch order.
    pub(crate) fn observers(&self) -> impl Iterator<Item = (SystemId, &ObserverHandle)> {
        self.systems.iter().map(|r| (r.id, &r.observer))
    }

    /// Ids in dispatch order.
    pub(crate) fn ids(&self) -> impl Iterator<Item = SystemId> + '_ {
        self.systems.iter().map(|r| r.id)
    }
}

impl fmt::Debug for SystemRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.ids()).finish()
    }
}
