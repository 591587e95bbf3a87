use std::iter::FusedIterator;

use super::arena::{Arena, NodeId};

/// In-order iterator yielding each distinct value with its multiplicity.
///
/// Created by [`SearchTree::iter_with_counts`](super::SearchTree::iter_with_counts).
pub struct IterWithCounts<'a, T> {
    arena: &'a Arena<T>,
    stack: Vec<NodeId>,
    remaining: usize,
}

impl<'a, T> IterWithCounts<'a, T> {
    pub(super) fn new(arena: &'a Arena<T>, root: Option<NodeId>) -> Self {
        let mut iterator = Self {
            arena,
            stack: Vec::new(),
            remaining: arena.len(),
        };
        iterator.push_left_spine(root);
        iterator
    }

    fn push_left_spine(&mut self, mut current: Option<NodeId>) {
        while let Some(id) = current {
            self.stack.push(id);
            current = self.arena[id].left;
        }
    }
}

impl<'a, T> Iterator for IterWithCounts<'a, T> {
    type Item = (&'a T, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let arena = self.arena;
        let node = &arena[id];
        self.push_left_spine(node.right);
        self.remaining -= 1;
        Some((&node.data, node.count))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IterWithCounts<'_, T> {}

impl<T> FusedIterator for IterWithCounts<'_, T> {}

/// In-order iterator over distinct values.
///
/// Created by [`SearchTree::iter`](super::SearchTree::iter).
pub struct Iter<'a, T> {
    pub(super) inner: IterWithCounts<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(value, _)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}
