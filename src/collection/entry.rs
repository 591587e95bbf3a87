/// A stored key/value pair together with its positions.
///
/// `sorted_index` is the entry's current position in the collection's
/// display order. `original_index` is the insertion sequence number the
/// entry received when it was first added; it survives sorting and is what
/// [`Collection::restore_insertion_order`] sorts by.
///
/// [`Collection::restore_insertion_order`]: super::Collection::restore_insertion_order
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entry<V> {
    pub(super) key: String,
    pub(super) value: V,
    pub(super) sorted_index: usize,
    pub(super) original_index: usize,
}

impl<V> Entry<V> {
    pub(super) const fn new(key: String, value: V, sorted_index: usize, original_index: usize) -> Self {
        Self {
            key,
            value,
            sorted_index,
            original_index,
        }
    }

    /// The entry's key.
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The stored value.
    #[inline]
    pub const fn value(&self) -> &V {
        &self.value
    }

    /// Mutable access to the stored value.
    #[inline]
    pub const fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Position in the display order.
    #[inline]
    pub const fn sorted_index(&self) -> usize {
        self.sorted_index
    }

    /// Insertion sequence number.
    #[inline]
    pub const fn original_index(&self) -> usize {
        self.original_index
    }

    /// Consumes the entry, returning its key and value.
    #[inline]
    pub fn into_parts(self) -> (String, V) {
        (self.key, self.value)
    }

    /// Consumes the entry, returning its value.
    #[inline]
    pub fn into_value(self) -> V {
        self.value
    }
}
