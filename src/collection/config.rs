/// What `add` does when the key is already present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DuplicatePolicy {
    /// Keep the existing entry and report [`CollectionError::DuplicateKey`].
    ///
    /// [`CollectionError::DuplicateKey`]: super::CollectionError::DuplicateKey
    #[default]
    IgnoreDuplicateKeys,
    /// Overwrite the value in place. The entry keeps its display position.
    ReplaceDuplicateKeys,
}

/// Runtime configuration for a [`Collection`](super::Collection).
///
/// # Examples
///
/// ```rust
/// use indexkit::collection::{Collection, CollectionConfig, DuplicatePolicy};
///
/// let config = CollectionConfig::default()
///     .with_duplicate_policy(DuplicatePolicy::ReplaceDuplicateKeys)
///     .with_initial_capacity(64);
///
/// let mut collection: Collection<u32> = Collection::with_config(config);
/// collection.add("a", 1).unwrap();
/// assert_eq!(collection.add("a", 2), Ok(0));
/// assert_eq!(collection.get_value("a"), Some(&2));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CollectionConfig {
    /// Duplicate key handling.
    pub duplicate_policy: DuplicatePolicy,
    /// Number of entries to reserve space for up front.
    pub initial_capacity: usize,
}

impl CollectionConfig {
    /// Sets the duplicate key policy.
    #[must_use]
    pub const fn with_duplicate_policy(mut self, duplicate_policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = duplicate_policy;
        self
    }

    /// Sets the initial capacity.
    #[must_use]
    pub const fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }
}
