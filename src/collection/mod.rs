//! Keyed collection with an independently mutable display order.
//!
//! [`Collection`] behaves like an ordered dictionary keyed by `String`:
//!
//! - O(1) lookup by key through a hash map of [`Entry`] values
//! - a separate display order (`Vec` of keys) that can be sorted, reordered
//!   and indexed without touching the map
//! - caller-owned [`Cursor`]s for stepwise traversal in either direction
//!
//! # Invariants
//!
//! 1. Every key in the display order has exactly one entry in the map, and
//!    vice versa.
//! 2. `entry.sorted_index()` equals the key's position in the display order.
//! 3. `len()` equals the length of the display order.
//!
//! # Examples
//!
//! ```rust
//! use indexkit::collection::{Collection, CollectionError};
//!
//! let mut collection: Collection<i32> = Collection::new();
//! assert_eq!(collection.add("a", 1), Ok(0));
//! assert_eq!(collection.add("b", 2), Ok(1));
//!
//! // Duplicate keys are rejected by default
//! assert!(matches!(collection.add("a", 99), Err(CollectionError::DuplicateKey { .. })));
//! assert_eq!(collection.get_value("a"), Some(&1));
//!
//! collection.remove_by_key("a");
//! assert_eq!(collection.len(), 1);
//! assert_eq!(collection.get_index("b"), Some(0));
//! ```

mod config;
mod cursor;
mod entry;
mod error;
mod iter;

pub use config::CollectionConfig;
pub use config::DuplicatePolicy;
pub use cursor::Cursor;
pub use cursor::Direction;
pub use entry::Entry;
pub use error::CollectionError;
pub use iter::IntoIter;
pub use iter::Iter;
pub use iter::Keys;
pub use iter::Values;

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::BuildHasher;

use crate::compare::{DefaultEquality, Equivalence};

// =============================================================================
// Hasher Selection
// =============================================================================

/// Hasher used by [`Collection`] unless another one is supplied.
///
/// With the `fxhash` feature this is `rustc_hash::FxBuildHasher`, with the
/// `ahash` feature `ahash::RandomState`, otherwise the standard `SipHash`
/// based `RandomState`. Fast hashers are not `HashDoS` resistant; only enable
/// them for trusted keys.
#[cfg(feature = "fxhash")]
pub type DefaultBuildHasher = rustc_hash::FxBuildHasher;

/// Hasher used by [`Collection`] unless another one is supplied.
#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
pub type DefaultBuildHasher = ahash::RandomState;

/// Hasher used by [`Collection`] unless another one is supplied.
#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
pub type DefaultBuildHasher = std::collections::hash_map::RandomState;

// =============================================================================
// Collection Definition
// =============================================================================

/// An ordered dictionary with O(1) key lookup and a sortable display order.
///
/// `E` decides value equivalence for the `*_value` lookups and for
/// [`equals`](Self::equals). `S` is the hasher for the key map.
///
/// # Time Complexity
///
/// | Operation                  | Complexity   |
/// |----------------------------|--------------|
/// | `add`                      | O(1)*        |
/// | `get_value` / `get_index`  | O(1)         |
/// | `get_value_at` / `get_key` | O(1)         |
/// | `remove_by_key`            | O(n - i)     |
/// | `remove_by_value`          | O(n)         |
/// | `sort_by`                  | O(n log n)   |
/// | `len`                      | O(1)         |
///
/// `i` is the removed entry's display position; removal renumbers only the
/// entries after it.
#[derive(Clone)]
pub struct Collection<V, E = DefaultEquality, S = DefaultBuildHasher> {
    entries: HashMap<String, Entry<V>, S>,
    sorted_order: Vec<String>,
    policy: DuplicatePolicy,
    equality: E,
    next_original_index: usize,
}

static_assertions::assert_impl_all!(Collection<i32>: Send, Sync, Clone);
static_assertions::assert_impl_all!(Cursor: Copy, Send, Sync);

impl<V> Collection<V> {
    /// Creates an empty collection that rejects duplicate keys.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CollectionConfig::default())
    }

    /// Creates an empty collection with the given duplicate key policy.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use indexkit::collection::{Collection, DuplicatePolicy};
    ///
    /// let mut collection = Collection::with_policy(DuplicatePolicy::ReplaceDuplicateKeys);
    /// collection.add("a", 1).unwrap();
    /// collection.add("b", 2).unwrap();
    /// assert_eq!(collection.add("a", 10), Ok(0));
    /// assert_eq!(collection.to_value_vec(), vec![&10, &2]);
    /// ```
    #[must_use]
    pub fn with_policy(duplicate_policy: DuplicatePolicy) -> Self {
        Self::with_config(CollectionConfig::default().with_duplicate_policy(duplicate_policy))
    }

    /// Creates an empty collection from a [`CollectionConfig`].
    #[must_use]
    pub fn with_config(config: CollectionConfig) -> Self {
        Self::with_config_and_hasher(config, DefaultBuildHasher::default())
    }
}

impl<V, S: BuildHasher> Collection<V, DefaultEquality, S> {
    /// Creates an empty collection that hashes keys with `hasher`.
    pub fn with_config_and_hasher(config: CollectionConfig, hasher: S) -> Self {
        Self {
            entries: HashMap::with_capacity_and_hasher(config.initial_capacity, hasher),
            sorted_order: Vec::with_capacity(config.initial_capacity),
            policy: config.duplicate_policy,
            equality: DefaultEquality,
            next_original_index: 0,
        }
    }
}

impl<V, E, S> Default for Collection<V, E, S>
where
    E: Default,
    S: Default,
{
    fn default() -> Self {
        Self {
            entries: HashMap::default(),
            sorted_order: Vec::new(),
            policy: DuplicatePolicy::default(),
            equality: E::default(),
            next_original_index: 0,
        }
    }
}

impl<V, E, S: BuildHasher> Collection<V, E, S> {
    /// Replaces the equivalence used by value lookups.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use indexkit::collection::Collection;
    /// use indexkit::compare::FnEquality;
    ///
    /// let mut routes = Collection::new().with_equality(FnEquality::new(
    ///     |left: &String, right: &String| left.eq_ignore_ascii_case(right),
    /// ));
    /// routes.add("/home", "Home".to_string()).unwrap();
    /// assert_eq!(routes.get_key_of_value(&"HOME".to_string()), Some("/home"));
    /// ```
    #[must_use]
    pub fn with_equality<E2>(self, equality: E2) -> Collection<V, E2, S> {
        Collection {
            entries: self.entries,
            sorted_order: self.sorted_order,
            policy: self.policy,
            equality,
            next_original_index: self.next_original_index,
        }
    }

    /// The duplicate key policy.
    #[inline]
    pub const fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.sorted_order.len()
    }

    /// Returns `true` if the collection holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sorted_order.is_empty()
    }

    // =========================================================================
    // Insertion
    // =========================================================================

    /// Adds `value` under `key` and returns its display position.
    ///
    /// A new key is appended at the end of the display order. For an
    /// existing key the outcome depends on the policy: with
    /// `IgnoreDuplicateKeys` nothing changes and an error is returned; with
    /// `ReplaceDuplicateKeys` the value is overwritten in place and the
    /// existing position is returned.
    ///
    /// # Errors
    ///
    /// [`CollectionError::DuplicateKey`] if the key exists under
    /// `IgnoreDuplicateKeys`.
    pub fn add(&mut self, key: impl Into<String>, value: V) -> Result<usize, CollectionError> {
        let key = key.into();

        if let Some(existing) = self.entries.get_mut(&key) {
            return match self.policy {
                DuplicatePolicy::IgnoreDuplicateKeys => {
                    tracing::debug!(key = %key, index = existing.sorted_index, "duplicate key rejected");
                    Err(CollectionError::DuplicateKey {
                        key,
                        index: existing.sorted_index,
                    })
                }
                DuplicatePolicy::ReplaceDuplicateKeys => {
                    existing.value = value;
                    tracing::trace!(key = %key, index = existing.sorted_index, "collection value replaced");
                    Ok(existing.sorted_index)
                }
            };
        }

        let index = self.sorted_order.len();
        let original_index = self.next_original_index;
        self.next_original_index += 1;

        self.sorted_order.push(key.clone());
        tracing::trace!(key = %key, index, "collection entry added");
        self.entries
            .insert(key.clone(), Entry::new(key, value, index, original_index));
        Ok(index)
    }

    // =========================================================================
    // Removal
    // =========================================================================

    /// Removes the entry stored under `key`.
    pub fn remove_by_key(&mut self, key: &str) -> Option<Entry<V>> {
        let entry = self.entries.remove(key)?;
        self.sorted_order.remove(entry.sorted_index);
        self.renumber(entry.sorted_index, self.sorted_order.len());
        tracing::trace!(key, index = entry.sorted_index, "collection entry removed");
        Some(entry)
    }

    /// Removes the entry at display position `index`.
    pub fn remove_by_index(&mut self, index: usize) -> Option<Entry<V>> {
        if index >= self.sorted_order.len() {
            return None;
        }
        let key = self.sorted_order.remove(index);
        let entry = self.entries.remove(&key);
        self.renumber(index, self.sorted_order.len());
        tracing::trace!(key = %key, index, "collection entry removed");
        entry
    }

    /// Removes the first entry, in display order, whose value is equivalent
    /// to `value`.
    pub fn remove_by_value(&mut self, value: &V) -> Option<Entry<V>>
    where
        E: Equivalence<V>,
    {
        let index = self.get_index_of_value(value)?;
        self.remove_by_index(index)
    }

    /// Keeps only the entries for which `predicate` returns `true` and
    /// returns how many were removed. Display order is preserved.
    pub fn retain(&mut self, mut predicate: impl FnMut(&Entry<V>) -> bool) -> usize {
        let before = self.sorted_order.len();
        let entries = &mut self.entries;
        self.sorted_order.retain(|key| {
            let keep = entries.get(key).is_some_and(&mut predicate);
            if !keep {
                entries.remove(key);
            }
            keep
        });
        self.renumber(0, self.sorted_order.len());
        before - self.sorted_order.len()
    }

    /// Removes every entry and restarts insertion numbering.
    pub fn clear(&mut self) {
        tracing::debug!(removed = self.sorted_order.len(), "collection cleared");
        self.entries.clear();
        self.sorted_order.clear();
        self.next_original_index = 0;
    }

    // =========================================================================
    // Ordering
    // =========================================================================

    /// Sorts the display order with a comparator over whole entries.
    ///
    /// The sort is stable. Every `sorted_index` is resynchronised afterwards.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use indexkit::collection::Collection;
    ///
    /// let mut collection: Collection<u32> =
    ///     [("b", 2), ("c", 3), ("a", 1)].into_iter().collect();
    /// collection.sort_by(|left, right| left.key().cmp(right.key()));
    /// assert_eq!(collection.to_key_vec(), vec!["a", "b", "c"]);
    /// assert_eq!(collection.get_index("c"), Some(2));
    /// ```
    pub fn sort_by(&mut self, mut compare: impl FnMut(&Entry<V>, &Entry<V>) -> Ordering) {
        let entries = &self.entries;
        self.sorted_order
            .sort_by(|left, right| match (entries.get(left), entries.get(right)) {
                (Some(left), Some(right)) => compare(left, right),
                _ => Ordering::Equal,
            });
        self.renumber(0, self.sorted_order.len());
        tracing::debug!(length = self.sorted_order.len(), "collection sorted");
    }

    /// Sorts the display order by a key extracted once per entry.
    pub fn sort_by_cached_key<K: Ord>(&mut self, mut extract: impl FnMut(&Entry<V>) -> K) {
        let entries = &self.entries;
        self.sorted_order
            .sort_by_cached_key(|key| entries.get(key).map(&mut extract));
        self.renumber(0, self.sorted_order.len());
        tracing::debug!(length = self.sorted_order.len(), "collection sorted");
    }

    /// Sorts the display order by value.
    pub fn sort_by_value(&mut self)
    where
        V: Ord,
    {
        self.sort_by(|left, right| left.value.cmp(&right.value));
    }

    /// Puts the entries back in the order they were first added.
    pub fn restore_insertion_order(&mut self) {
        self.sort_by(|left, right| left.original_index.cmp(&right.original_index));
    }

    /// Moves the entry under `key` to display position `index`, clamped to
    /// the last position, and returns the position it ended up at.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use indexkit::collection::Collection;
    ///
    /// let mut collection: Collection<u32> =
    ///     [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
    /// assert_eq!(collection.move_to("c", 0), Some(0));
    /// assert_eq!(collection.to_key_vec(), vec!["c", "a", "b"]);
    /// assert_eq!(collection.move_to("c", 100), Some(2));
    /// ```
    pub fn move_to(&mut self, key: &str, index: usize) -> Option<usize> {
        let from = self.entries.get(key)?.sorted_index;
        let to = index.min(self.sorted_order.len() - 1);
        if from != to {
            let moved = self.sorted_order.remove(from);
            self.sorted_order.insert(to, moved);
            self.renumber(from.min(to), from.max(to) + 1);
        }
        Some(to)
    }

    /// Rewrites `sorted_index` for the display positions `start..end`.
    fn renumber(&mut self, start: usize, end: usize) {
        for (position, key) in self
            .sorted_order
            .iter()
            .enumerate()
            .take(end)
            .skip(start)
        {
            if let Some(entry) = self.entries.get_mut(key) {
                entry.sorted_index = position;
            }
        }
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Value stored under `key`.
    pub fn get_value(&self, key: &str) -> Option<&V> {
        self.entries.get(key).map(Entry::value)
    }

    /// Mutable value stored under `key`.
    pub fn get_value_mut(&mut self, key: &str) -> Option<&mut V> {
        self.entries.get_mut(key).map(Entry::value_mut)
    }

    /// Value at display position `index`.
    pub fn get_value_at(&self, index: usize) -> Option<&V> {
        self.get_element_at(index).map(Entry::value)
    }

    /// Entry stored under `key`.
    pub fn get_element(&self, key: &str) -> Option<&Entry<V>> {
        self.entries.get(key)
    }

    /// Entry at display position `index`.
    pub fn get_element_at(&self, index: usize) -> Option<&Entry<V>> {
        self.sorted_order
            .get(index)
            .and_then(|key| self.entries.get(key))
    }

    /// Display position of `key`.
    pub fn get_index(&self, key: &str) -> Option<usize> {
        self.entries.get(key).map(Entry::sorted_index)
    }

    /// Key at display position `index`.
    pub fn get_key(&self, index: usize) -> Option<&str> {
        self.sorted_order.get(index).map(String::as_str)
    }

    /// Returns `true` if `key` is stored.
    pub fn has_element(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns `true` if `index` is a valid display position.
    pub fn has_index(&self, index: usize) -> bool {
        index < self.sorted_order.len()
    }

    /// First entry in display order.
    pub fn first(&self) -> Option<&Entry<V>> {
        self.get_element_at(0)
    }

    /// Last entry in display order.
    pub fn last(&self) -> Option<&Entry<V>> {
        self.len()
            .checked_sub(1)
            .and_then(|index| self.get_element_at(index))
    }

    /// Display position of the first entry whose value is equivalent to
    /// `value`.
    pub fn get_index_of_value(&self, value: &V) -> Option<usize>
    where
        E: Equivalence<V>,
    {
        self.iter()
            .position(|entry| self.equality.equivalent(&entry.value, value))
    }

    /// Key of the first entry whose value is equivalent to `value`.
    pub fn get_key_of_value(&self, value: &V) -> Option<&str>
    where
        E: Equivalence<V>,
    {
        self.iter()
            .find(|entry| self.equality.equivalent(&entry.value, value))
            .map(Entry::key)
    }

    /// Returns `true` if some entry's value is equivalent to `value`.
    pub fn contains_value(&self, value: &V) -> bool
    where
        E: Equivalence<V>,
    {
        self.get_index_of_value(value).is_some()
    }

    // =========================================================================
    // Views
    // =========================================================================

    /// Iterates over entries in display order.
    ///
    /// The iterator borrows the collection, so it cannot be mutated
    /// mid-iteration:
    ///
    /// ```compile_fail
    /// use indexkit::collection::Collection;
    ///
    /// let mut collection: Collection<i32> = [("a", 1)].into_iter().collect();
    /// for entry in collection.iter() {
    ///     collection.remove_by_key(entry.key());
    /// }
    /// ```
    pub fn iter(&self) -> Iter<'_, V, S> {
        Iter {
            order: self.sorted_order.iter(),
            entries: &self.entries,
        }
    }

    /// Keys in display order.
    pub fn keys(&self) -> Keys<'_> {
        Keys {
            order: self.sorted_order.iter(),
        }
    }

    /// Values in display order.
    pub fn values(&self) -> Values<'_, V, S> {
        Values { inner: self.iter() }
    }

    /// Values in display order, collected.
    pub fn to_value_vec(&self) -> Vec<&V> {
        self.values().collect()
    }

    /// Keys in display order, collected.
    pub fn to_key_vec(&self) -> Vec<&str> {
        self.keys().collect()
    }

    /// Applies `function` to every entry in display order.
    pub fn map<U>(&self, function: impl FnMut(&Entry<V>) -> U) -> Vec<U> {
        self.iter().map(function).collect()
    }

    // =========================================================================
    // Comparison
    // =========================================================================

    /// Returns `true` if both collections have the same length and every key
    /// of `self` is stored in `other` with an equivalent value.
    ///
    /// Display order is ignored. Because keys are unique, equal lengths plus
    /// one-way containment already imply identical key sets.
    pub fn equals<E2, S2>(&self, other: &Collection<V, E2, S2>) -> bool
    where
        E: Equivalence<V>,
        S2: BuildHasher,
    {
        self.len() == other.len()
            && self.entries.iter().all(|(key, entry)| {
                other
                    .get_value(key)
                    .is_some_and(|value| self.equality.equivalent(&entry.value, value))
            })
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl<V, E, E2, S, S2> PartialEq<Collection<V, E2, S2>> for Collection<V, E, S>
where
    V: PartialEq,
    S: BuildHasher,
    S2: BuildHasher,
{
    fn eq(&self, other: &Collection<V, E2, S2>) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(key, entry)| other.get_value(key) == Some(&entry.value))
    }
}

impl<V: Eq, E, S: BuildHasher> Eq for Collection<V, E, S> {}

impl<V: fmt::Debug, E, S: BuildHasher> fmt::Debug for Collection<V, E, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_map()
            .entries(self.iter().map(|entry| (entry.key(), entry.value())))
            .finish()
    }
}

/// Builds a collection with the default policy: for repeated keys the
/// first value wins.
impl<K, V, E, S> FromIterator<(K, V)> for Collection<V, E, S>
where
    K: Into<String>,
    E: Default,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iterable: I) -> Self {
        let mut collection = Self::default();
        collection.extend(iterable);
        collection
    }
}

/// Adds every pair under the collection's policy; rejected duplicates are
/// skipped.
impl<K, V, E, S> Extend<(K, V)> for Collection<V, E, S>
where
    K: Into<String>,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iterable: I) {
        for (key, value) in iterable {
            if let Err(error) = self.add(key, value) {
                tracing::trace!(%error, "extend skipped entry");
            }
        }
    }
}

impl<'a, V, E, S: BuildHasher> IntoIterator for &'a Collection<V, E, S> {
    type Item = &'a Entry<V>;
    type IntoIter = Iter<'a, V, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V, E, S: BuildHasher> IntoIterator for Collection<V, E, S> {
    type Item = (String, V);
    type IntoIter = IntoIter<V, S>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            order: self.sorted_order.into_iter(),
            entries: self.entries,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::FnEquality;
    use rstest::rstest;

    fn assert_consistent<V, E, S: BuildHasher>(collection: &Collection<V, E, S>) {
        assert_eq!(collection.entries.len(), collection.sorted_order.len());
        for (position, key) in collection.sorted_order.iter().enumerate() {
            let entry = collection
                .entries
                .get(key)
                .expect("every ordered key has an entry");
            assert_eq!(entry.sorted_index, position);
            assert_eq!(&entry.key, key);
        }
    }

    fn abc() -> Collection<i32> {
        [("a", 1), ("b", 2), ("c", 3)].into_iter().collect()
    }

    #[rstest]
    fn test_new_is_empty() {
        let collection: Collection<i32> = Collection::new();
        assert!(collection.is_empty());
        assert_eq!(collection.len(), 0);
        assert_eq!(collection.policy(), DuplicatePolicy::IgnoreDuplicateKeys);
    }

    #[rstest]
    fn test_ignore_duplicates_scenario() {
        let mut collection = Collection::with_policy(DuplicatePolicy::IgnoreDuplicateKeys);
        assert_eq!(collection.add("a", 1), Ok(0));
        assert_eq!(collection.add("b", 2), Ok(1));
        assert_eq!(
            collection.add("a", 99),
            Err(CollectionError::DuplicateKey {
                key: "a".to_string(),
                index: 0
            })
        );
        assert_eq!(collection.get_value("a"), Some(&1));

        let removed = collection.remove_by_key("a").map(Entry::into_value);
        assert_eq!(removed, Some(1));
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.get_index("b"), Some(0));
        assert_consistent(&collection);
    }

    #[rstest]
    fn test_replace_keeps_position() {
        let mut collection = Collection::with_policy(DuplicatePolicy::ReplaceDuplicateKeys);
        collection.add("a", 1).unwrap();
        collection.add("b", 2).unwrap();
        assert_eq!(collection.add("a", 10), Ok(0));
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.to_value_vec(), vec![&10, &2]);
        assert_eq!(collection.get_element("a").map(Entry::original_index), Some(0));
        assert_consistent(&collection);
    }

    #[rstest]
    #[case(0, "a", vec!["b", "c"])]
    #[case(1, "b", vec!["a", "c"])]
    #[case(2, "c", vec!["a", "b"])]
    fn test_remove_by_index(
        #[case] index: usize,
        #[case] expected_key: &str,
        #[case] remaining: Vec<&str>,
    ) {
        let mut collection = abc();
        let removed = collection.remove_by_index(index);
        assert_eq!(removed.as_ref().map(Entry::key), Some(expected_key));
        assert_eq!(collection.to_key_vec(), remaining);
        assert_consistent(&collection);
    }

    #[rstest]
    fn test_remove_out_of_range_is_none() {
        let mut collection = abc();
        assert!(collection.remove_by_index(3).is_none());
        assert!(collection.remove_by_key("z").is_none());
        assert_eq!(collection.len(), 3);
    }

    #[rstest]
    fn test_remove_by_value_uses_equality() {
        let mut collection = abc();
        let removed = collection.remove_by_value(&2);
        assert_eq!(removed.as_ref().map(Entry::key), Some("b"));
        assert!(collection.remove_by_value(&2).is_none());
        assert_consistent(&collection);
    }

    #[rstest]
    fn test_remove_by_value_custom_equality() {
        let mut collection = abc().with_equality(FnEquality::new(|left: &i32, right: &i32| {
            left % 2 == right % 2
        }));
        // First odd value in display order
        let removed = collection.remove_by_value(&5);
        assert_eq!(removed.as_ref().map(Entry::key), Some("a"));
        assert_eq!(collection.get_key_of_value(&7), Some("c"));
    }

    #[rstest]
    fn test_readd_appends_at_end() {
        let mut collection = abc();
        collection.remove_by_key("a");
        assert_eq!(collection.add("a", 1), Ok(2));
        assert_eq!(collection.to_key_vec(), vec!["b", "c", "a"]);
        assert_eq!(collection.get_element("a").map(Entry::original_index), Some(3));
        assert_consistent(&collection);
    }

    #[rstest]
    fn test_sort_by_value_descending() {
        let mut collection = abc();
        collection.sort_by(|left, right| right.value().cmp(left.value()));
        assert_eq!(collection.to_value_vec(), vec![&3, &2, &1]);
        assert_consistent(&collection);

        collection.restore_insertion_order();
        assert_eq!(collection.to_key_vec(), vec!["a", "b", "c"]);
        assert_consistent(&collection);
    }

    #[rstest]
    fn test_sort_by_cached_key() {
        let mut collection: Collection<&str> =
            [("x", "ccc"), ("y", "a"), ("z", "bb")].into_iter().collect();
        collection.sort_by_cached_key(|entry| entry.value().len());
        assert_eq!(collection.to_key_vec(), vec!["y", "z", "x"]);
        assert_consistent(&collection);
    }

    #[rstest]
    fn test_move_to() {
        let mut collection = abc();
        assert_eq!(collection.move_to("a", 2), Some(2));
        assert_eq!(collection.to_key_vec(), vec!["b", "c", "a"]);
        assert_consistent(&collection);
        assert_eq!(collection.move_to("missing", 0), None);
    }

    #[rstest]
    fn test_retain() {
        let mut collection = abc();
        let removed = collection.retain(|entry| entry.value() % 2 == 1);
        assert_eq!(removed, 1);
        assert_eq!(collection.to_key_vec(), vec!["a", "c"]);
        assert_consistent(&collection);
    }

    #[rstest]
    fn test_lookups() {
        let collection = abc();
        assert_eq!(collection.get_value_at(1), Some(&2));
        assert_eq!(collection.get_value_at(3), None);
        assert_eq!(collection.get_key(2), Some("c"));
        assert_eq!(collection.get_key(9), None);
        assert!(collection.has_element("b"));
        assert!(!collection.has_element("d"));
        assert!(collection.has_index(2));
        assert!(!collection.has_index(3));
        assert_eq!(collection.get_index_of_value(&3), Some(2));
        assert!(collection.contains_value(&1));
        assert_eq!(collection.first().map(Entry::key), Some("a"));
        assert_eq!(collection.last().map(Entry::key), Some("c"));
    }

    #[rstest]
    fn test_get_value_mut() {
        let mut collection = abc();
        if let Some(value) = collection.get_value_mut("b") {
            *value = 20;
        }
        assert_eq!(collection.get_value("b"), Some(&20));
    }

    #[rstest]
    fn test_clear_resets_numbering() {
        let mut collection = abc();
        collection.clear();
        assert!(collection.is_empty());
        assert!(collection.first().is_none());
        assert_eq!(collection.add("z", 0), Ok(0));
        assert_eq!(collection.get_element("z").map(Entry::original_index), Some(0));
    }

    #[rstest]
    fn test_map_and_iterators() {
        let collection = abc();
        assert_eq!(
            collection.map(|entry| format!("{}={}", entry.key(), entry.value())),
            vec!["a=1", "b=2", "c=3"]
        );
        assert_eq!(collection.iter().rev().map(Entry::key).collect::<Vec<_>>(), vec!["c", "b", "a"]);
        assert_eq!(collection.iter().len(), 3);

        let owned: Vec<(String, i32)> = collection.into_iter().collect();
        assert_eq!(
            owned,
            vec![("a".to_string(), 1), ("b".to_string(), 2), ("c".to_string(), 3)]
        );
    }

    #[rstest]
    fn test_equals_ignores_order() {
        let first = abc();
        let mut second = abc();
        second.sort_by(|left, right| right.key().cmp(left.key()));
        assert!(first.equals(&second));
        assert_eq!(first, second);

        if let Some(value) = second.get_value_mut("a") {
            *value = 100;
        }
        assert!(!first.equals(&second));
        assert_ne!(first, second);
    }

    #[rstest]
    fn test_equals_requires_same_length() {
        let first = abc();
        let mut second = abc();
        second.add("d", 4).unwrap();
        assert!(!first.equals(&second));
        assert!(!second.equals(&first));
    }

    #[rstest]
    fn test_from_iter_first_value_wins() {
        let collection: Collection<i32> = [("a", 1), ("a", 2)].into_iter().collect();
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.get_value("a"), Some(&1));
    }

    #[rstest]
    fn test_debug_in_display_order() {
        let mut collection = abc();
        collection.move_to("c", 0);
        assert_eq!(format!("{collection:?}"), r#"{"c": 3, "a": 1, "b": 2}"#);
    }
}
