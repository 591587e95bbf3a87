use std::ops::{Index, IndexMut};

/// Handle of a node inside a tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Raw slot index, for diagnostics.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A tree node. Child links own their subtree in the sense that only the
/// parent's slot refers to them; `parent` is a plain back-index and never
/// keeps a node alive.
#[derive(Debug, Clone)]
pub(super) struct Node<T> {
    pub(super) data: T,
    pub(super) count: usize,
    pub(super) left: Option<NodeId>,
    pub(super) right: Option<NodeId>,
    pub(super) parent: Option<NodeId>,
    pub(super) height: usize,
}

impl<T> Node<T> {
    pub(super) const fn leaf(data: T, parent: Option<NodeId>) -> Self {
        Self {
            data,
            count: 1,
            left: None,
            right: None,
            parent,
            height: 1,
        }
    }

    #[inline]
    pub(super) const fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Vector-backed node storage with slot reuse.
#[derive(Debug, Clone)]
pub(super) struct Arena<T> {
    slots: Vec<Option<Node<T>>>,
    vacant: Vec<usize>,
    occupied: usize,
}

impl<T> Arena<T> {
    pub(super) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            vacant: Vec::new(),
            occupied: 0,
        }
    }

    /// Number of live nodes.
    #[inline]
    pub(super) const fn len(&self) -> usize {
        self.occupied
    }

    pub(super) fn allocate(&mut self, node: Node<T>) -> NodeId {
        self.occupied += 1;
        if let Some(index) = self.vacant.pop() {
            self.slots[index] = Some(node);
            NodeId(index)
        } else {
            self.slots.push(Some(node));
            NodeId(self.slots.len() - 1)
        }
    }

    /// Frees the slot and hands back the node.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not refer to a live node.
    pub(super) fn release(&mut self, id: NodeId) -> Node<T> {
        let Some(node) = self.slots.get_mut(id.0).and_then(Option::take) else {
            panic!("released a stale node handle {id:?}");
        };
        self.occupied -= 1;
        self.vacant.push(id.0);
        node
    }

    pub(super) fn clear(&mut self) {
        self.slots.clear();
        self.vacant.clear();
        self.occupied = 0;
    }

    /// Live nodes in slot order.
    pub(super) fn nodes(&self) -> impl Iterator<Item = &Node<T>> {
        self.slots.iter().flatten()
    }
}

impl<T> Index<NodeId> for Arena<T> {
    type Output = Node<T>;

    fn index(&self, id: NodeId) -> &Self::Output {
        match self.slots.get(id.0) {
            Some(Some(node)) => node,
            _ => panic!("stale node handle {id:?}"),
        }
    }
}

impl<T> IndexMut<NodeId> for Arena<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        match self.slots.get_mut(id.0) {
            Some(Some(node)) => node,
            _ => panic!("stale node handle {id:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_allocate_and_index() {
        let mut arena = Arena::new();
        let first = arena.allocate(Node::leaf(10, None));
        let second = arena.allocate(Node::leaf(20, Some(first)));
        assert_eq!(arena.len(), 2);
        assert_eq!(arena[first].data, 10);
        assert_eq!(arena[second].parent, Some(first));
        assert!(arena[second].is_leaf());
    }

    #[rstest]
    fn test_release_reuses_slot() {
        let mut arena = Arena::new();
        let first = arena.allocate(Node::leaf('a', None));
        let _second = arena.allocate(Node::leaf('b', None));
        let released = arena.release(first);
        assert_eq!(released.data, 'a');
        assert_eq!(arena.len(), 1);

        let third = arena.allocate(Node::leaf('c', None));
        assert_eq!(third, first);
        assert_eq!(arena.nodes().map(|node| node.data).collect::<Vec<_>>(), vec!['c', 'b']);
    }

    #[rstest]
    #[should_panic(expected = "stale node handle")]
    fn test_index_after_release_panics() {
        let mut arena = Arena::new();
        let id = arena.allocate(Node::leaf(1, None));
        arena.release(id);
        let _ = &arena[id];
    }

    #[rstest]
    fn test_clear() {
        let mut arena = Arena::new();
        arena.allocate(Node::leaf(1, None));
        arena.clear();
        assert_eq!(arena.len(), 0);
        assert_eq!(arena.nodes().count(), 0);
    }
}
