//! # Entity Lifecycle Integration Tests
//!
//! Liveness and recycling properties of the entity manager, and the
//! destroy-then-purge contract with the component manager.

use std::collections::HashSet;

use proptest::prelude::*;
use tessera_core::{ComponentManager, EntityHandle, EntityManager};

#[derive(Clone, Debug)]
enum Op {
    Create,
    /// Destroy the n-th handle ever issued (modulo the number issued).
    Destroy(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Create),
        2 => any::<usize>().prop_map(Op::Destroy),
    ]
}

proptest! {
    /// `is_alive` is true exactly for issued handles not yet destroyed.
    #[test]
    fn prop_alive_iff_issued_and_not_destroyed(ops in prop::collection::vec(op(), 1..200)) {
        let mut entities = EntityManager::new(100, 1_000);
        let mut issued: Vec<EntityHandle> = Vec::new();
        let mut live: HashSet<EntityHandle> = HashSet::new();

        for op in ops {
            match op {
                Op::Create => {
                    let handle = entities.create_entity();
                    prop_assert!(handle.is_valid());
                    prop_assert!(!issued.contains(&handle), "handle {} issued twice", handle);
                    issued.push(handle);
                    live.insert(handle);
                }
                Op::Destroy(n) if !issued.is_empty() => {
                    let handle = issued[n % issued.len()];
                    entities.destroy_entity(handle);
                    live.remove(&handle);
                }
                Op::Destroy(_) => {}
            }

            for handle in &issued {
                prop_assert_eq!(entities.is_alive(*handle), live.contains(handle));
            }
            prop_assert_eq!(entities.alive_count(), live.len());
        }
    }

    /// Reissued ids always carry a strictly newer generation.
    #[test]
    fn prop_recycled_generation_increases(rounds in 1usize..50) {
        let mut entities = EntityManager::default();
        let mut previous = entities.create_entity();

        for _ in 0..rounds {
            entities.destroy_entity(previous);
            let next = entities.create_entity();
            prop_assert_eq!(next.id, previous.id);
            prop_assert!(next.generation > previous.generation);
            prop_assert!(!entities.is_alive(previous));
            prop_assert!(entities.is_alive(next));
            previous = next;
        }
    }
}

#[test]
fn test_random_handles_are_not_alive() {
    let mut entities = EntityManager::new(0, 16);
    let _ = entities.create_entity();

    assert!(!entities.is_alive(EntityHandle::NULL));
    assert!(!entities.is_alive(EntityHandle::new(0, 0)));
    assert!(!entities.is_alive(EntityHandle::new(0, 7)));
    assert!(!entities.is_alive(EntityHandle::new(3, 1)));
    assert!(!entities.is_alive(EntityHandle::new(u64::MAX, 1)));
}

#[test]
fn test_disjoint_managers_never_collide() {
    let mut widgets = EntityManager::new(0, 1_000);
    let mut world = EntityManager::new(1_000, 1_000);

    let a = widgets.create_entity();
    let b = world.create_entity();
    assert_ne!(a, b);
    assert!(widgets.is_alive(a) && !widgets.is_alive(b));
    assert!(world.is_alive(b) && !world.is_alive(a));
}

#[test]
fn test_purge_before_recycle() {
    #[derive(Debug, PartialEq)]
    struct Label(&'static str);

    let mut entities = EntityManager::default();
    let mut components = ComponentManager::new();
    components.register_component::<Label>();

    let old = entities.create_entity();
    components.add_component(old, Label("old"));

    entities.destroy_entity(old);
    assert_eq!(components.remove_components(old), 1);

    let recycled = entities.create_entity();
    assert_eq!(recycled.id, old.id);
    assert!(components.get_component::<Label>(recycled).is_none());
    assert!(components.storage::<Label>().is_empty());
}
