use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

use super::arena::{Arena, Node, NodeId};
use super::balance::{BalancePolicy, Unbalanced};
use super::error::TreeError;
use super::iter::{Iter, IterWithCounts};
use crate::compare::{Comparator, NaturalOrder, try_compare};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Search {
    Found(NodeId),
    Vacant { parent: Option<NodeId>, side: Side },
}

// =============================================================================
// SearchTree Definition
// =============================================================================

/// Arena-backed binary search tree with multiplicity counts.
///
/// Equal values share one node whose count is incremented. `C` orders the
/// values; `B` is the [`BalancePolicy`]. Use the aliases
/// [`BinaryTree`](super::BinaryTree) and
/// [`BalancedBinaryTree`](super::BalancedBinaryTree) rather than naming
/// this type directly.
///
/// # Time Complexity
///
/// | Operation               | Unbalanced | Avl       |
/// |-------------------------|------------|-----------|
/// | `add` / `remove`        | O(h)       | O(log N)  |
/// | `exists` / `count_of`   | O(h)       | O(log N)  |
/// | `min` / `max`           | O(h)       | O(log N)  |
/// | `height` / `len`        | O(1)       | O(1)      |
/// | `is_balanced`           | O(N)       | O(N)      |
///
/// `h` is the current height, which for an unbalanced tree can reach N.
///
/// # Panics
///
/// `add`, `remove`, `remove_all`, `exists` and `count_of` panic when the
/// comparator cannot order two values. The matching `try_*` methods return
/// [`TreeError::Incomparable`] instead.
#[derive(Clone)]
pub struct SearchTree<T, C = NaturalOrder, B = Unbalanced> {
    arena: Arena<T>,
    root: Option<NodeId>,
    comparator: C,
    total: usize,
    policy: PhantomData<B>,
}

static_assertions::assert_impl_all!(SearchTree<i32>: Send, Sync, Clone);

impl<T: Ord, B: BalancePolicy> SearchTree<T, NaturalOrder, B> {
    /// Creates an empty tree ordered by [`Ord`].
    #[must_use]
    pub const fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<T, C: Default, B: BalancePolicy> Default for SearchTree<T, C, B> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T, C, B: BalancePolicy> SearchTree<T, C, B> {
    /// Creates an empty tree ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use indexkit::compare::ReverseOrder;
    /// use indexkit::compare::NaturalOrder;
    /// use indexkit::tree::BinaryTree;
    ///
    /// let mut tree = BinaryTree::with_comparator(ReverseOrder(NaturalOrder));
    /// tree.extend([1, 2, 3]);
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
    /// ```
    pub const fn with_comparator(comparator: C) -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            comparator,
            total: 0,
            policy: PhantomData,
        }
    }

    /// Number of distinct values.
    #[inline]
    pub const fn len(&self) -> usize {
        self.arena.len()
    }

    /// Number of stored values, counting duplicates.
    #[inline]
    pub const fn total_count(&self) -> usize {
        self.total
    }

    /// Returns `true` if the tree holds no values.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the tree: zero when empty, one for a single node.
    #[inline]
    pub fn height(&self) -> usize {
        self.height_of(self.root)
    }

    /// Value at the root.
    pub fn root(&self) -> Option<&T> {
        self.root.map(|id| &self.arena[id].data)
    }

    /// Smallest value.
    pub fn min(&self) -> Option<&T> {
        self.root.map(|id| &self.arena[self.leftmost(id)].data)
    }

    /// Largest value.
    pub fn max(&self) -> Option<&T> {
        self.root.map(|id| &self.arena[self.rightmost(id)].data)
    }

    /// Removes every value.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.total = 0;
    }

    /// In-order iterator over distinct values.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.iter_with_counts(),
        }
    }

    /// In-order iterator over distinct values and their multiplicities.
    pub fn iter_with_counts(&self) -> IterWithCounts<'_, T> {
        IterWithCounts::new(&self.arena, self.root)
    }

    /// Returns `true` if, at every node, the depths of the two subtrees
    /// differ by at most one.
    ///
    /// Depths are recomputed from scratch rather than read from the cached
    /// heights.
    pub fn is_balanced(&self) -> bool {
        // Post-order walk; `depths` holds the depth of each finished subtree.
        let mut stack = vec![(self.root, false)];
        let mut depths: Vec<usize> = Vec::new();

        while let Some((node, children_done)) = stack.pop() {
            let Some(id) = node else {
                depths.push(0);
                continue;
            };
            if children_done {
                let right = depths.pop().unwrap_or(0);
                let left = depths.pop().unwrap_or(0);
                if left.abs_diff(right) > 1 {
                    return false;
                }
                depths.push(1 + left.max(right));
            } else {
                let node = &self.arena[id];
                stack.push((Some(id), true));
                stack.push((node.right, false));
                stack.push((node.left, false));
            }
        }
        true
    }

    /// Returns `true` if every node has either zero or two children.
    pub fn is_complete(&self) -> bool {
        self.arena
            .nodes()
            .all(|node| node.is_leaf() || (node.left.is_some() && node.right.is_some()))
    }

    // =========================================================================
    // Link Maintenance
    // =========================================================================

    fn height_of(&self, node: Option<NodeId>) -> usize {
        node.map_or(0, |id| self.arena[id].height)
    }

    fn refresh_height(&mut self, id: NodeId) {
        let node = &self.arena[id];
        let height = 1 + self.height_of(node.left).max(self.height_of(node.right));
        self.arena[id].height = height;
    }

    fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.arena[id].left {
            id = left;
        }
        id
    }

    fn rightmost(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.arena[id].right {
            id = right;
        }
        id
    }

    fn set_child(&mut self, parent: NodeId, side: Side, child: Option<NodeId>) {
        match side {
            Side::Left => self.arena[parent].left = child,
            Side::Right => self.arena[parent].right = child,
        }
        if let Some(child) = child {
            self.arena[child].parent = Some(parent);
        }
    }

    /// Points whichever slot referred to `old` (a child slot of `parent`, or
    /// the root) at `new`, and fixes `new`'s back-reference.
    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: Option<NodeId>) {
        match parent {
            None => self.root = new,
            Some(parent) if self.arena[parent].left == Some(old) => {
                self.arena[parent].left = new;
            }
            Some(parent) => self.arena[parent].right = new,
        }
        if let Some(new) = new {
            self.arena[new].parent = parent;
        }
    }

    /// Walks from `start` to the root refreshing heights and, for a
    /// self-balancing policy, rotating unbalanced nodes. Each level is
    /// visited once and gets at most one single or double rotation.
    fn retrace(&mut self, start: Option<NodeId>) {
        let mut current = start;
        while let Some(id) = current {
            self.refresh_height(id);
            let subtree_root = if B::SELF_BALANCING {
                self.rebalance(id)
            } else {
                id
            };
            current = self.arena[subtree_root].parent;
        }
    }

    fn rebalance(&mut self, id: NodeId) -> NodeId {
        let (left, right) = (self.arena[id].left, self.arena[id].right);
        let (left_height, right_height) = (self.height_of(left), self.height_of(right));

        if left_height > right_height + 1 {
            if let Some(left) = left {
                let child = &self.arena[left];
                if self.height_of(child.right) > self.height_of(child.left) {
                    self.rotate_left(left);
                }
            }
            return self.rotate_right(id);
        }
        if right_height > left_height + 1 {
            if let Some(right) = right {
                let child = &self.arena[right];
                if self.height_of(child.left) > self.height_of(child.right) {
                    self.rotate_right(right);
                }
            }
            return self.rotate_left(id);
        }
        id
    }

    /// Lifts the right child of `pivot` into its place and returns it.
    fn rotate_left(&mut self, pivot: NodeId) -> NodeId {
        let Some(riser) = self.arena[pivot].right else {
            return pivot;
        };
        let parent = self.arena[pivot].parent;
        let inner = self.arena[riser].left;

        self.set_child(pivot, Side::Right, inner);
        self.replace_child(parent, pivot, Some(riser));
        self.set_child(riser, Side::Left, Some(pivot));

        self.refresh_height(pivot);
        self.refresh_height(riser);
        tracing::trace!(
            policy = B::NAME,
            pivot = pivot.index(),
            riser = riser.index(),
            "rotated left"
        );
        riser
    }

    /// Lifts the left child of `pivot` into its place and returns it.
    fn rotate_right(&mut self, pivot: NodeId) -> NodeId {
        let Some(riser) = self.arena[pivot].left else {
            return pivot;
        };
        let parent = self.arena[pivot].parent;
        let inner = self.arena[riser].right;

        self.set_child(pivot, Side::Left, inner);
        self.replace_child(parent, pivot, Some(riser));
        self.set_child(riser, Side::Right, Some(pivot));

        self.refresh_height(pivot);
        self.refresh_height(riser);
        tracing::trace!(
            policy = B::NAME,
            pivot = pivot.index(),
            riser = riser.index(),
            "rotated right"
        );
        riser
    }

    /// Unlinks node `id` and returns its value. A node with two children
    /// takes over its in-order successor's value and count, and the
    /// successor's node is unlinked instead.
    fn delete(&mut self, id: NodeId) -> T {
        let (left, right, parent) = {
            let node = &self.arena[id];
            (node.left, node.right, node.parent)
        };

        match (left, right) {
            (Some(_), Some(right)) => {
                let successor = self.leftmost(right);
                let successor_parent = self.arena[successor].parent;
                let successor_right = self.arena[successor].right;
                self.replace_child(successor_parent, successor, successor_right);

                let successor_node = self.arena.release(successor);
                let node = &mut self.arena[id];
                let removed = std::mem::replace(&mut node.data, successor_node.data);
                node.count = successor_node.count;

                self.retrace(successor_parent);
                removed
            }
            (child, None) | (None, child) => {
                self.replace_child(parent, id, child);
                let removed = self.arena.release(id).data;
                self.retrace(parent);
                removed
            }
        }
    }
}

// =============================================================================
// Comparator-Dependent Operations
// =============================================================================

impl<T, C: Comparator<T>, B: BalancePolicy> SearchTree<T, C, B> {
    fn search(&self, value: &T) -> Result<Search, TreeError> {
        let mut parent = None;
        let mut side = Side::Left;
        let mut current = self.root;

        while let Some(id) = current {
            let node = &self.arena[id];
            match try_compare(&self.comparator, value, &node.data)? {
                Ordering::Equal => return Ok(Search::Found(id)),
                Ordering::Less => {
                    side = Side::Left;
                    current = node.left;
                }
                Ordering::Greater => {
                    side = Side::Right;
                    current = node.right;
                }
            }
            parent = Some(id);
        }

        Ok(Search::Vacant { parent, side })
    }

    /// Inserts `value` and returns its multiplicity afterwards.
    ///
    /// # Errors
    ///
    /// [`TreeError::Incomparable`] if the comparator cannot order `value`
    /// against a value on its search path. The tree is left unchanged.
    pub fn try_add(&mut self, value: T) -> Result<usize, TreeError> {
        match self.search(&value)? {
            Search::Found(id) => {
                let node = &mut self.arena[id];
                node.count += 1;
                self.total += 1;
                Ok(node.count)
            }
            Search::Vacant { parent, side } => {
                let id = self.arena.allocate(Node::leaf(value, parent));
                match parent {
                    None => self.root = Some(id),
                    Some(parent) => self.set_child(parent, side, Some(id)),
                }
                self.total += 1;
                self.retrace(parent);
                Ok(1)
            }
        }
    }

    /// Inserts `value` and returns its multiplicity afterwards.
    ///
    /// # Panics
    ///
    /// Panics if the comparator cannot order `value`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use indexkit::tree::BinaryTree;
    ///
    /// let mut tree = BinaryTree::new();
    /// for value in [5, 3, 8, 3] {
    ///     tree.add(value);
    /// }
    /// assert!(tree.exists(&3));
    /// assert_eq!(tree.count_of(&3), 2);
    /// assert_eq!(tree.min(), Some(&3));
    /// assert_eq!(tree.max(), Some(&8));
    /// ```
    pub fn add(&mut self, value: T) -> usize {
        self.try_add(value).unwrap_or_else(|error| panic!("{error}"))
    }

    /// Removes one occurrence of `value`. The node is deleted once its
    /// multiplicity reaches zero. Returns `false` if `value` was absent.
    ///
    /// # Errors
    ///
    /// [`TreeError::Incomparable`] if the comparator cannot order `value`.
    pub fn try_remove(&mut self, value: &T) -> Result<bool, TreeError> {
        let Search::Found(id) = self.search(value)? else {
            return Ok(false);
        };
        self.total -= 1;
        let node = &mut self.arena[id];
        if node.count > 1 {
            node.count -= 1;
        } else {
            self.delete(id);
        }
        Ok(true)
    }

    /// Removes one occurrence of `value`.
    ///
    /// # Panics
    ///
    /// Panics if the comparator cannot order `value`.
    pub fn remove(&mut self, value: &T) -> bool {
        self.try_remove(value)
            .unwrap_or_else(|error| panic!("{error}"))
    }

    /// Removes every occurrence of `value` and returns how many there were.
    ///
    /// # Errors
    ///
    /// [`TreeError::Incomparable`] if the comparator cannot order `value`.
    pub fn try_remove_all(&mut self, value: &T) -> Result<usize, TreeError> {
        let Search::Found(id) = self.search(value)? else {
            return Ok(0);
        };
        let count = self.arena[id].count;
        self.total -= count;
        self.delete(id);
        Ok(count)
    }

    /// Removes every occurrence of `value` and returns how many there were.
    ///
    /// # Panics
    ///
    /// Panics if the comparator cannot order `value`.
    pub fn remove_all(&mut self, value: &T) -> usize {
        self.try_remove_all(value)
            .unwrap_or_else(|error| panic!("{error}"))
    }

    /// Multiplicity of `value`, zero if absent.
    ///
    /// # Errors
    ///
    /// [`TreeError::Incomparable`] if the comparator cannot order `value`.
    pub fn try_count_of(&self, value: &T) -> Result<usize, TreeError> {
        Ok(match self.search(value)? {
            Search::Found(id) => self.arena[id].count,
            Search::Vacant { .. } => 0,
        })
    }

    /// Multiplicity of `value`, zero if absent.
    ///
    /// # Panics
    ///
    /// Panics if the comparator cannot order `value`.
    pub fn count_of(&self, value: &T) -> usize {
        self.try_count_of(value)
            .unwrap_or_else(|error| panic!("{error}"))
    }

    /// Returns `true` if `value` is stored.
    ///
    /// # Errors
    ///
    /// [`TreeError::Incomparable`] if the comparator cannot order `value`.
    pub fn try_exists(&self, value: &T) -> Result<bool, TreeError> {
        self.try_count_of(value).map(|count| count > 0)
    }

    /// Returns `true` if `value` is stored.
    ///
    /// # Panics
    ///
    /// Panics if the comparator cannot order `value`.
    pub fn exists(&self, value: &T) -> bool {
        self.count_of(value) > 0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl<T: fmt::Debug, C, B: BalancePolicy> fmt::Debug for SearchTree<T, C, B> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_map()
            .entries(self.iter_with_counts())
            .finish()
    }
}

impl<T, C, B> FromIterator<T> for SearchTree<T, C, B>
where
    C: Comparator<T> + Default,
    B: BalancePolicy,
{
    fn from_iter<I: IntoIterator<Item = T>>(iterable: I) -> Self {
        let mut tree = Self::default();
        tree.extend(iterable);
        tree
    }
}

impl<T, C: Comparator<T>, B: BalancePolicy> Extend<T> for SearchTree<T, C, B> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iterable: I) {
        for value in iterable {
            self.add(value);
        }
    }
}

impl<'a, T, C, B: BalancePolicy> IntoIterator for &'a SearchTree<T, C, B> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Tests
// =============================================================================
