//! Shared helpers: building trees and checking invariants independently
//! of `ImplicitAvl::validate`.

#![allow(dead_code)]

use implicit_avl::tree::{left_child, right_child};
use implicit_avl::{ImplicitAvl, ReferenceAvl};

pub fn build_store(keys: &[i64]) -> ImplicitAvl<i64> {
    let mut store = ImplicitAvl::new();
    for &key in keys {
        store.insert(key);
    }
    store
}

pub fn build_reference(keys: &[i64]) -> ReferenceAvl<i64> {
    keys.iter().copied().collect()
}

/// Keys of every occupied slot below `index` (exclusive)
fn descendants(store: &ImplicitAvl<i64>, index: usize) -> Vec<i64> {
    let mut keys = Vec::new();
    let mut stack: Vec<usize> = [left_child(index), right_child(index)].into_iter().flatten().collect();
    while let Some(i) = stack.pop() {
        if let Some(key) = store.key_at(i) {
            keys.push(key);
            stack.extend(left_child(i));
            stack.extend(right_child(i));
        }
    }
    keys
}

fn subtree_keys(store: &ImplicitAvl<i64>, root: Option<usize>) -> Vec<i64> {
    match root.and_then(|r| store.key_at(r).map(|k| (r, k))) {
        Some((r, key)) => {
            let mut keys = descendants(store, r);
            keys.push(key);
            keys
        }
        None => Vec::new(),
    }
}

/// Full-array scan: topology, height cache, balance and BST order
pub fn assert_invariants(store: &ImplicitAvl<i64>) {
    let mut occupied = 0;

    for (index, slot) in store.keys().iter().enumerate() {
        let Some(key) = *slot else {
            assert_eq!(store.heights()[index], 0, "empty slot {index} has a height");
            continue;
        };
        occupied += 1;

        if index > 0 {
            assert!(
                store.key_at((index - 1) / 2).is_some(),
                "slot {index} is occupied but its parent is empty"
            );
        }

        let left = left_child(index).map_or(0, |c| store.get_height(c));
        let right = right_child(index).map_or(0, |c| store.get_height(c));
        assert_eq!(
            store.heights()[index],
            1 + left.max(right),
            "height cache wrong at slot {index}"
        );
        assert!(
            (i64::from(left) - i64::from(right)).abs() <= 1,
            "slot {index} unbalanced: left={left} right={right}"
        );

        for smaller in subtree_keys(store, left_child(index)) {
            assert!(smaller < key, "left subtree of {key} holds {smaller}");
        }
        for larger in subtree_keys(store, right_child(index)) {
            assert!(larger > key, "right subtree of {key} holds {larger}");
        }
    }

    assert_eq!(occupied, store.len(), "len disagrees with occupied slots");
}

/// Occupied slots as `(slot, key, height)`
pub fn layout(store: &ImplicitAvl<i64>) -> Vec<(usize, i64, u32)> {
    store
        .occupied()
        .filter_map(|slot| slot.key.map(|key| (slot.index, key, slot.height)))
        .collect()
}
