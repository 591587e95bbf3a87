use std::collections::HashMap;
use std::hash::BuildHasher;
use std::iter::FusedIterator;

use super::Entry;

/// Borrowing iterator over entries in display order.
///
/// Created by [`Collection::iter`](super::Collection::iter).
pub struct Iter<'a, V, S> {
    pub(super) order: std::slice::Iter<'a, String>,
    pub(super) entries: &'a HashMap<String, Entry<V>, S>,
}

impl<'a, V, S: BuildHasher> Iterator for Iter<'a, V, S> {
    type Item = &'a Entry<V>;

    fn next(&mut self) -> Option<Self::Item> {
        self.order.next().and_then(|key| self.entries.get(key))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl<V, S: BuildHasher> DoubleEndedIterator for Iter<'_, V, S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.order.next_back().and_then(|key| self.entries.get(key))
    }
}

impl<V, S: BuildHasher> ExactSizeIterator for Iter<'_, V, S> {}

impl<V, S: BuildHasher> FusedIterator for Iter<'_, V, S> {}

impl<V, S> Clone for Iter<'_, V, S> {
    fn clone(&self) -> Self {
        Self {
            order: self.order.clone(),
            entries: self.entries,
        }
    }
}

/// Keys in display order.
pub struct Keys<'a> {
    pub(super) order: std::slice::Iter<'a, String>,
}

impl<'a> Iterator for Keys<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.order.next().map(String::as_str)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl DoubleEndedIterator for Keys<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.order.next_back().map(String::as_str)
    }
}

impl ExactSizeIterator for Keys<'_> {}

impl FusedIterator for Keys<'_> {}

/// Values in display order.
pub struct Values<'a, V, S> {
    pub(super) inner: Iter<'a, V, S>,
}

impl<'a, V, S: BuildHasher> Iterator for Values<'a, V, S> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Entry::value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V, S: BuildHasher> DoubleEndedIterator for Values<'_, V, S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(Entry::value)
    }
}

impl<V, S: BuildHasher> ExactSizeIterator for Values<'_, V, S> {}

impl<V, S: BuildHasher> FusedIterator for Values<'_, V, S> {}

/// Owning iterator over `(key, value)` pairs in display order.
pub struct IntoIter<V, S> {
    pub(super) order: std::vec::IntoIter<String>,
    pub(super) entries: HashMap<String, Entry<V>, S>,
}

impl<V, S: BuildHasher> Iterator for IntoIter<V, S> {
    type Item = (String, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.order
            .next()
            .and_then(|key| self.entries.remove(&key))
            .map(Entry::into_parts)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl<V, S: BuildHasher> DoubleEndedIterator for IntoIter<V, S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.order
            .next_back()
            .and_then(|key| self.entries.remove(&key))
            .map(Entry::into_parts)
    }
}

impl<V, S: BuildHasher> ExactSizeIterator for IntoIter<V, S> {}

impl<V, S: BuildHasher> FusedIterator for IntoIter<V, S> {}
