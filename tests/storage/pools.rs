//! Integration tests for component pools
//!
//! Tests dense layout, swap-remove ordering, and duplicate handling.

use aether_storage::{CheckMode, ComponentPool, Entity, ErrorKind};
use proptest::prelude::*;

#[derive(Debug, Clone, PartialEq)]
struct Health(u32);

fn e(raw: u32) -> Entity {
    Entity::from_raw(raw)
}

fn checked_pool() -> ComponentPool<Health> {
    ComponentPool::with_mode(CheckMode::Checked)
}

// =============================================================================
// Dense Layout
// =============================================================================

#[test]
fn components_are_dense_in_insertion_order() {
    let mut pool = checked_pool();
    for raw in [10, 20, 30] {
        pool.add(e(raw), Health(raw)).unwrap();
    }

    assert_eq!(pool.len(), 3);
    assert_eq!(pool.get_all(), [Health(10), Health(20), Health(30)]);
    assert_eq!(pool.entities(), [e(10), e(20), e(30)]);
}

#[test]
fn get_all_mut_edits_in_place() {
    let mut pool = checked_pool();
    pool.add(e(1), Health(1)).unwrap();
    pool.add(e(2), Health(2)).unwrap();

    for health in pool.get_all_mut() {
        health.0 *= 10;
    }

    assert_eq!(pool.get(e(1)), Some(&Health(10)));
    assert_eq!(pool[e(2)], Health(20));
}

#[test]
fn iter_pairs_entities_with_components() {
    let mut pool = checked_pool();
    pool.add(e(4), Health(40)).unwrap();
    pool.add(e(5), Health(50)).unwrap();

    let pairs: Vec<_> = pool.iter().map(|(entity, h)| (entity.raw(), h.0)).collect();
    assert_eq!(pairs, [(4, 40), (5, 50)]);

    for (entity, health) in pool.iter_mut() {
        health.0 += entity.raw();
    }
    assert_eq!(pool[e(4)], Health(44));
}

#[test]
fn capacity_is_reserved_up_front() {
    let pool: ComponentPool<Health> = ComponentPool::with_capacity(CheckMode::Checked, 64);
    assert!(pool.is_empty());
    assert_eq!(pool.check_mode(), CheckMode::Checked);
}

// =============================================================================
// Removal
// =============================================================================

#[test]
fn remove_moves_last_into_hole() {
    let mut pool = checked_pool();
    for raw in 1..=4 {
        pool.add(e(raw), Health(raw)).unwrap();
    }

    assert_eq!(pool.remove(e(2)), Some(Health(2)));

    assert_eq!(pool.entities(), [e(1), e(4), e(3)]);
    assert_eq!(pool.get_all(), [Health(1), Health(4), Health(3)]);
    assert_eq!(pool[e(4)], Health(4));
    assert!(!pool.has(e(2)));
}

#[test]
fn remove_only_component() {
    let mut pool = checked_pool();
    pool.add(e(1), Health(1)).unwrap();

    assert_eq!(pool.remove(e(1)), Some(Health(1)));
    assert!(pool.is_empty());
    assert!(!pool.has(e(1)));

    // The pool is still usable afterwards
    pool.add(e(1), Health(2)).unwrap();
    assert_eq!(pool[e(1)], Health(2));
}

#[test]
fn remove_absent_is_noop() {
    let mut pool = checked_pool();
    pool.add(e(1), Health(1)).unwrap();

    assert_eq!(pool.remove(e(99)), None);
    assert_eq!(pool.len(), 1);
}

#[test]
fn clear_empties_pool() {
    let mut pool = checked_pool();
    pool.add(e(1), Health(1)).unwrap();
    pool.add(e(2), Health(2)).unwrap();
    pool.clear();

    assert!(pool.is_empty());
    assert!(pool.get(e(1)).is_none());
}

// =============================================================================
// Duplicates
// =============================================================================

#[test]
fn checked_duplicate_is_rejected() {
    let mut pool = checked_pool();
    pool.add(e(1), Health(1)).unwrap();

    let err = pool.add(e(1), Health(2)).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateComponent { .. }));
    assert_eq!(pool[e(1)], Health(1));
    assert_eq!(pool.len(), 1);
}

#[test]
fn unchecked_duplicate_overwrites() {
    let mut pool = ComponentPool::with_mode(CheckMode::Unchecked);
    pool.add(e(1), Health(1)).unwrap();
    pool.add(e(1), Health(2)).unwrap();

    assert_eq!(pool[e(1)], Health(2));
    assert_eq!(pool.len(), 1);
}

#[test]
#[should_panic(expected = "has no")]
fn index_missing_panics() {
    let pool = checked_pool();
    let _health: &Health = &pool[e(1)];
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn every_entity_maps_to_its_component(
        raws in prop::collection::hash_set(1u32..500, 0..50),
        removals in prop::collection::vec(1u32..500, 0..50),
    ) {
        let mut pool = checked_pool();
        for &raw in &raws {
            pool.add(e(raw), Health(raw)).unwrap();
        }
        for &raw in &removals {
            pool.remove(e(raw));
        }

        let expected: Vec<u32> = raws
            .iter()
            .copied()
            .filter(|raw| !removals.contains(raw))
            .collect();
        prop_assert_eq!(pool.len(), expected.len());
        for raw in expected {
            prop_assert_eq!(pool.get(e(raw)), Some(&Health(raw)));
        }
        for (entity, health) in pool.iter() {
            prop_assert_eq!(entity.raw(), health.0);
        }
    }
}
