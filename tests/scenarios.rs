//! End-to-end scenarios on the array tree

use implicit_avl::tree::{map_relative_to_absolute, IndexPath};
use implicit_avl::{DotGraph, ImplicitAvl, StoreConfig};
use test_case::test_case;

mod common;
use common::*;

#[test]
fn test_reference_dataset() {
    let mut store = ImplicitAvl::with_capacity(10);
    for key in [10, 20, 30, 40, 50, 25] {
        store.insert(key);
    }

    assert_eq!(store.in_order(), vec![10, 20, 25, 30, 40, 50]);
    assert_eq!(store.root_height(), 3);
    assert!(store.search(&25));
    assert!(!store.search(&99));

    //        30
    //      /    \
    //    20      40
    //   /  \       \
    //  10  25       50
    assert_eq!(
        layout(&store),
        vec![
            (0, 30, 3),
            (1, 20, 2),
            (2, 40, 2),
            (3, 10, 1),
            (4, 25, 1),
            (6, 50, 1),
        ]
    );
    assert_invariants(&store);
}

#[test_case(&[30, 20, 10], &[20, 10, 30] ; "left-left")]
#[test_case(&[10, 20, 30], &[20, 10, 30] ; "right-right")]
#[test_case(&[30, 10, 20], &[20, 10, 30] ; "left-right")]
#[test_case(&[10, 30, 20], &[20, 10, 30] ; "right-left")]
fn test_single_rebalance_layout(keys: &[i64], expected: &[i64]) {
    let store = build_store(keys);
    let top: Vec<i64> = store.keys()[..3].iter().flatten().copied().collect();
    assert_eq!(top, expected);
    assert!(store.keys()[3..].iter().all(Option::is_none));
    assert_eq!(store.heights()[..3], [2, 1, 1]);
}

#[test_case(0, 0 => 0 ; "root maps to itself")]
#[test_case(7, 0 => 7 ; "relative root maps to new root")]
#[test_case(0, 13 => 13 ; "identity under slot zero")]
#[test_case(1, 1 => 3 ; "left of slot one")]
#[test_case(1, 2 => 4 ; "right of slot one")]
#[test_case(2, 3 => 11 ; "left-left under slot two")]
#[test_case(3, 5 => 17 ; "right-left under slot three")]
#[test_case(2, 6 => 14 ; "right-right under slot two")]
#[test_case(4, 10 => 42 ; "left-right-right under slot four")]
fn test_map_relative_to_absolute(root: usize, relative: usize) -> usize {
    map_relative_to_absolute(root, relative).unwrap()
}

#[test]
fn test_relative_mapping_matches_subtree_walk() {
    // Walk the same path from slot 0 and from slot `root`: the mapping must
    // agree with stepping through the child formulas one level at a time
    for root in [0usize, 1, 2, 5, 9, 20] {
        for relative in 0usize..200 {
            let path = IndexPath::from_relative(relative);
            assert_eq!(path.replay_from(0), Some(relative));
            assert_eq!(map_relative_to_absolute(root, relative), path.replay_from(root));
        }
    }
}

#[test_case((1..=50).collect() ; "ascending")]
#[test_case((1..=50).rev().collect() ; "descending")]
fn test_growth_never_loses_keys(keys: Vec<i64>) {
    let mut store = ImplicitAvl::with_config(&StoreConfig::with_capacity(1).profiled());
    let mut inserted = Vec::new();

    for key in keys {
        store.insert(key);
        inserted.push(key);
        for earlier in &inserted {
            assert!(store.search(earlier), "lost {earlier} after inserting {key}");
        }
    }

    assert_invariants(&store);
    assert_eq!(store.root_height(), 6);

    let profile = store.take_profile().unwrap();
    assert!(profile.reallocations > 0);
    assert_eq!(profile.peak_capacity, store.capacity());
}

#[test]
fn test_duplicates_absorbed() {
    let mut store = build_store(&[5, 3, 8]);
    assert!(!store.insert(5));
    assert!(!store.insert(8));
    assert_eq!(store.len(), 3);
    assert_eq!(store.in_order(), vec![3, 5, 8]);
}

#[test]
fn test_negative_and_extreme_keys() {
    let keys = [i64::MIN, -1, 0, i64::MAX, -1_000, 1_000];
    let store = build_store(&keys);
    assert_invariants(&store);
    for key in keys {
        assert!(store.search(&key));
    }
    assert!(!store.search(&1));
}

#[test]
fn test_shape_matches_reference() {
    let keys: Vec<i64> = (0..300).map(|i| (i * 7919) % 1009).collect();
    let store = build_store(&keys);
    let reference = build_reference(&keys);

    assert_eq!(layout(&store), reference.implicit_layout());
    assert_eq!(store.in_order(), reference.in_order());
}

#[test]
fn test_exporter_sees_every_node() {
    let keys = [10, 20, 30, 40, 50, 25];
    let store = build_store(&keys);
    let graph = DotGraph::from_store(&store, "AVL Array");

    assert_eq!(graph.nodes.len(), keys.len());
    assert_eq!(graph.edges.len(), keys.len() - 1);
    assert!(graph.edges.contains(&("2".to_string(), "6".to_string())));
    assert!(graph.to_string().contains("\"25 (idx 4)\""));
}
