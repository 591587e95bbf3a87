#![cfg(feature = "collection")]
//! Integration tests for Collection.
//!
//! These tests drive the public API only: insertion under both duplicate
//! policies, removal by key, index and value, sorting, cursors and
//! comparison.

use indexkit::collection::{
    Collection, CollectionConfig, CollectionError, Cursor, Direction, DuplicatePolicy,
};
use indexkit::compare::FnEquality;
use rstest::{fixture, rstest};

// =============================================================================
// Fixtures
// =============================================================================

#[fixture]
fn fruits() -> Collection<u32> {
    [("apple", 3), ("banana", 1), ("cherry", 2), ("damson", 5)]
        .into_iter()
        .collect()
}

fn assert_indices_match_positions<V>(collection: &Collection<V>) {
    for (position, entry) in collection.iter().enumerate() {
        assert_eq!(entry.sorted_index(), position, "key {}", entry.key());
        assert_eq!(collection.get_key(position), Some(entry.key()));
        assert_eq!(collection.get_index(entry.key()), Some(position));
    }
    assert_eq!(collection.keys().len(), collection.len());
}

// =============================================================================
// Insertion
// =============================================================================

#[rstest]
fn test_reference_scenario() {
    let mut collection: Collection<i32> = Collection::with_policy(DuplicatePolicy::IgnoreDuplicateKeys);

    assert_eq!(collection.add("a", 1), Ok(0));
    assert_eq!(collection.add("b", 2), Ok(1));
    assert_eq!(
        collection.add("a", 99),
        Err(CollectionError::DuplicateKey {
            key: "a".to_string(),
            index: 0,
        })
    );
    assert_eq!(collection.get_value("a"), Some(&1));

    assert!(collection.remove_by_key("a").is_some());
    assert_eq!(collection.len(), 1);
    assert_eq!(collection.get_index("b"), Some(0));
}

#[rstest]
fn test_replace_policy_keeps_position_and_length() {
    let mut collection = Collection::with_policy(DuplicatePolicy::ReplaceDuplicateKeys);
    collection.add("first", "one").unwrap();
    collection.add("second", "two").unwrap();

    assert_eq!(collection.add("first", "uno"), Ok(0));
    assert_eq!(collection.len(), 2);
    assert_eq!(collection.to_key_vec(), vec!["first", "second"]);
    assert_eq!(collection.get_value("first"), Some(&"uno"));
}

#[rstest]
fn test_with_config() {
    let config = CollectionConfig::default()
        .with_duplicate_policy(DuplicatePolicy::ReplaceDuplicateKeys)
        .with_initial_capacity(64);
    let collection: Collection<u8> = Collection::with_config(config);

    assert!(collection.is_empty());
    assert_eq!(collection.policy(), DuplicatePolicy::ReplaceDuplicateKeys);
}

#[rstest]
fn test_readd_after_remove_appends(mut fruits: Collection<u32>) {
    fruits.remove_by_key("apple");

    assert_eq!(fruits.add("apple", 30), Ok(3));
    assert_eq!(fruits.to_key_vec(), vec!["banana", "cherry", "damson", "apple"]);
    assert_indices_match_positions(&fruits);
}

// =============================================================================
// Removal
// =============================================================================

#[rstest]
#[case::first(0, "apple")]
#[case::middle(2, "cherry")]
#[case::last(3, "damson")]
fn test_remove_by_index(mut fruits: Collection<u32>, #[case] index: usize, #[case] key: &str) {
    let removed = fruits.remove_by_index(index).unwrap();

    assert_eq!(removed.key(), key);
    assert_eq!(fruits.len(), 3);
    assert!(!fruits.has_element(key));
    assert_indices_match_positions(&fruits);
}

#[rstest]
fn test_remove_out_of_range_is_none(mut fruits: Collection<u32>) {
    assert!(fruits.remove_by_index(4).is_none());
    assert!(fruits.remove_by_key("elderberry").is_none());
    assert_eq!(fruits.len(), 4);
}

#[rstest]
fn test_remove_by_value_uses_injected_equality() {
    let mut collection = Collection::new().with_equality(FnEquality::new(
        |left: &String, right: &String| left.eq_ignore_ascii_case(right),
    ));
    collection.add("x", "Alpha".to_string()).unwrap();
    collection.add("y", "Beta".to_string()).unwrap();

    let removed = collection.remove_by_value(&"BETA".to_string()).unwrap();

    assert_eq!(removed.into_parts(), ("y".to_string(), "Beta".to_string()));
    assert_eq!(collection.len(), 1);
}

#[rstest]
fn test_retain_renumbers(mut fruits: Collection<u32>) {
    let removed = fruits.retain(|entry| *entry.value() >= 2);

    assert_eq!(removed, 1);
    assert_eq!(fruits.to_key_vec(), vec!["apple", "cherry", "damson"]);
    assert_indices_match_positions(&fruits);
}

#[rstest]
fn test_clear_restarts_numbering(mut fruits: Collection<u32>) {
    fruits.clear();
    assert!(fruits.is_empty());
    assert_eq!(fruits.first().map(|entry| entry.key()), None);

    fruits.add("fig", 7).unwrap();
    assert_eq!(fruits.get_element("fig").map(|entry| entry.original_index()), Some(0));
}

// =============================================================================
// Ordering
// =============================================================================

#[rstest]
fn test_sort_by_value_then_restore(mut fruits: Collection<u32>) {
    fruits.sort_by_value();
    assert_eq!(fruits.to_value_vec(), vec![&1, &2, &3, &5]);
    assert_indices_match_positions(&fruits);

    fruits.restore_insertion_order();
    assert_eq!(fruits.to_key_vec(), vec!["apple", "banana", "cherry", "damson"]);
    assert_indices_match_positions(&fruits);
}

#[rstest]
fn test_sort_comparator_sees_whole_entry(mut fruits: Collection<u32>) {
    fruits.sort_by(|left, right| {
        right
            .value()
            .cmp(left.value())
            .then_with(|| left.key().cmp(right.key()))
    });

    assert_eq!(fruits.to_key_vec(), vec!["damson", "apple", "cherry", "banana"]);
    assert_indices_match_positions(&fruits);
}

#[rstest]
fn test_sort_by_cached_key(mut fruits: Collection<u32>) {
    fruits.sort_by_cached_key(|entry| std::cmp::Reverse(entry.key().len()));

    assert_eq!(fruits.first().map(|entry| entry.key().len()), Some(6));
    assert_eq!(fruits.last().map(|entry| entry.key()), Some("apple"));
    assert_indices_match_positions(&fruits);
}

#[rstest]
fn test_move_to(mut fruits: Collection<u32>) {
    assert_eq!(fruits.move_to("banana", 3), Some(3));
    assert_eq!(fruits.to_key_vec(), vec!["apple", "cherry", "damson", "banana"]);
    assert_eq!(fruits.move_to("missing", 0), None);
    assert_indices_match_positions(&fruits);
}

// =============================================================================
// Lookup
// =============================================================================

#[rstest]
fn test_lookup_by_key_index_and_value(fruits: Collection<u32>) {
    assert_eq!(fruits.get_value("cherry"), Some(&2));
    assert_eq!(fruits.get_value_at(2), Some(&2));
    assert_eq!(fruits.get_key(1), Some("banana"));
    assert_eq!(fruits.get_index_of_value(&5), Some(3));
    assert_eq!(fruits.get_key_of_value(&3), Some("apple"));
    assert!(fruits.contains_value(&1));
    assert!(!fruits.contains_value(&4));
    assert!(fruits.has_index(3));
    assert!(!fruits.has_index(4));
    assert_eq!(fruits.get_element_at(10), None);
}

#[rstest]
fn test_map_visits_display_order(fruits: Collection<u32>) {
    let labels = fruits.map(|entry| format!("{}={}", entry.key(), entry.value()));
    assert_eq!(labels, vec!["apple=3", "banana=1", "cherry=2", "damson=5"]);
}

#[rstest]
fn test_owned_iteration(fruits: Collection<u32>) {
    let pairs: Vec<(String, u32)> = fruits.into_iter().rev().collect();
    assert_eq!(pairs.first(), Some(&("damson".to_string(), 5)));
    assert_eq!(pairs.len(), 4);
}

// =============================================================================
// Cursor
// =============================================================================

#[rstest]
fn test_forward_and_backward_cursors_are_independent(fruits: Collection<u32>) {
    let mut forward = Cursor::new(Direction::Forward);
    let mut backward = Cursor::new(Direction::Backward);

    let mut interleaved = Vec::new();
    while forward.has_next(&fruits) && backward.has_next(&fruits) {
        interleaved.push(forward.next(&fruits).map(|entry| entry.key().to_string()));
        interleaved.push(backward.next(&fruits).map(|entry| entry.key().to_string()));
    }

    let keys: Vec<&str> = interleaved.iter().flatten().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec!["apple", "damson", "banana", "cherry", "cherry", "banana", "damson", "apple"]
    );
}

#[rstest]
fn test_cursor_survives_removal(mut fruits: Collection<u32>) {
    let mut cursor = Cursor::new(Direction::Forward);
    cursor.next(&fruits);
    cursor.next(&fruits);
    cursor.next(&fruits);
    assert_eq!(cursor.index(), Some(2));

    fruits.remove_by_key("apple");
    fruits.remove_by_key("banana");

    assert_eq!(cursor.current(&fruits), None);
    assert!(!cursor.has_next(&fruits));
    assert!(cursor.next(&fruits).is_none());

    cursor.reset(Direction::Backward);
    assert_eq!(cursor.next(&fruits).map(|entry| entry.key()), Some("damson"));
}

// =============================================================================
// Comparison
// =============================================================================

#[rstest]
fn test_equality_ignores_display_order(fruits: Collection<u32>) {
    let mut sorted = fruits.clone();
    sorted.sort_by_value();

    assert!(fruits.equals(&sorted));
    assert_eq!(fruits, sorted);
}

#[rstest]
fn test_equality_detects_differences(fruits: Collection<u32>) {
    let mut changed = fruits.clone();
    if let Some(value) = changed.get_value_mut("apple") {
        *value = 4;
    }
    assert!(!fruits.equals(&changed));

    let mut shorter = fruits.clone();
    shorter.remove_by_index(0);
    assert_ne!(fruits, shorter);
}

#[rstest]
fn test_debug_output_follows_display_order() {
    let mut collection: Collection<i32> = [("b", 2), ("a", 1)].into_iter().collect();
    assert_eq!(format!("{collection:?}"), r#"{"b": 2, "a": 1}"#);

    collection.sort_by(|left, right| left.key().cmp(right.key()));
    assert_eq!(format!("{collection:?}"), r#"{"a": 1, "b": 2}"#);
}
