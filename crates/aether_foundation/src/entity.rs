//! Entity identifiers and monotonic allocation.
//!
//! Entities are plain 32-bit ids handed out by a counter that starts at 1.
//! Ids are never reused; `0` is reserved as the null entity.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

/// Opaque entity identifier.
///
/// An entity carries no data of its own. It exists only through the
/// components attached to it in a collection.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Entity(u32);

impl Entity {
    /// The reserved "no entity" value. Never produced by an allocator.
    pub const NULL: Self = Self(0);

    /// Wraps a raw id.
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw id.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns true if this is the reserved null entity.
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self::NULL
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "Entity(null)")
        } else {
            write!(f, "Entity({})", self.0)
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Entity> for u32 {
    fn from(entity: Entity) -> Self {
        entity.0
    }
}

/// Monotonic entity id counter.
///
/// Each allocator is an independent id scope. The process-wide scope used by
/// [`new_entity`] is a `static` allocator; tests that need predictable ids
/// create their own.
///
/// Allocation is a single atomic increment, so sharing an allocator between
/// threads never produces duplicate ids.
#[derive(Debug)]
pub struct EntityAllocator {
    next: AtomicU32,
}

impl Default for EntityAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityAllocator {
    /// Creates an allocator whose first id is 1.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next: AtomicU32::new(1),
        }
    }

    /// Allocates the next entity, or `None` once the 32-bit id space is spent.
    pub fn try_allocate(&self) -> Option<Entity> {
        self.next
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |next| {
                (next != 0).then(|| next.wrapping_add(1))
            })
            .ok()
            .map(Entity)
    }

    /// Allocates the next entity.
    ///
    /// # Panics
    ///
    /// Panics if every id in `1..=u32::MAX` has already been handed out.
    pub fn allocate(&self) -> Entity {
        self.try_allocate()
            .expect("entity id space exhausted; ids are never reused")
    }

    /// Returns the id the next allocation would produce, without allocating.
    #[must_use]
    pub fn peek(&self) -> Option<Entity> {
        match self.next.load(Ordering::Relaxed) {
            0 => None,
            next => Some(Entity(next)),
        }
    }
}

static GLOBAL_ALLOCATOR: EntityAllocator = EntityAllocator::new();

/// Allocates a fresh entity from the process-wide counter.
///
/// Ids increase monotonically for the lifetime of the process and are never
/// reset, including between tests in the same binary.
///
/// # Panics
///
/// Panics if the process has exhausted the 32-bit id space.
pub fn new_entity() -> Entity {
    GLOBAL_ALLOCATOR.allocate()
}
