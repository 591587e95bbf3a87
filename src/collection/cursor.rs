use std::hash::BuildHasher;

use super::{Collection, Entry};

/// Traversal direction of a [`Cursor`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// From the first display position to the last.
    #[default]
    Forward,
    /// From the last display position to the first.
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Position {
    Start,
    At(usize),
    Exhausted,
}

/// A caller-owned position over a collection's display order.
///
/// The cursor does not borrow the collection; every call takes the
/// collection explicitly. Any number of cursors, in either direction, can
/// walk the same collection at once. After the collection is mutated a
/// cursor stays safe to use but its position refers to the new layout, and
/// a position past the end reads as exhausted.
///
/// # Examples
///
/// ```rust
/// use indexkit::collection::{Collection, Cursor, Direction};
///
/// let collection: Collection<i32> = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
///
/// let mut forward = Cursor::new(Direction::Forward);
/// let mut backward = Cursor::new(Direction::Backward);
///
/// assert_eq!(forward.next(&collection).map(|entry| entry.key()), Some("a"));
/// assert_eq!(backward.next(&collection).map(|entry| entry.key()), Some("c"));
/// assert_eq!(forward.next(&collection).map(|entry| entry.key()), Some("b"));
/// assert_eq!(forward.current(&collection).map(|entry| *entry.value()), Some(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor {
    direction: Direction,
    position: Position,
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new(Direction::Forward)
    }
}

impl Cursor {
    /// Creates a cursor positioned before the first element in `direction`.
    #[must_use]
    pub const fn new(direction: Direction) -> Self {
        Self {
            direction,
            position: Position::Start,
        }
    }

    /// Rewinds the cursor and sets its direction.
    pub const fn reset(&mut self, direction: Direction) {
        self.direction = direction;
        self.position = Position::Start;
    }

    /// The cursor's direction.
    #[inline]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Display position of the current element, if the cursor is on one.
    #[inline]
    pub const fn index(&self) -> Option<usize> {
        match self.position {
            Position::At(index) => Some(index),
            Position::Start | Position::Exhausted => None,
        }
    }

    fn following(&self, length: usize) -> Option<usize> {
        match (self.direction, self.position) {
            (_, Position::Exhausted) => None,
            (Direction::Forward, Position::Start) => (length > 0).then_some(0),
            (Direction::Forward, Position::At(index)) => {
                let candidate = index + 1;
                (candidate < length).then_some(candidate)
            }
            (Direction::Backward, Position::Start) => length.checked_sub(1),
            (Direction::Backward, Position::At(index)) => index.min(length).checked_sub(1),
        }
    }

    /// Returns `true` if [`next`](Self::next) would yield an element.
    pub fn has_next<V, E, S>(&self, collection: &Collection<V, E, S>) -> bool
    where
        S: BuildHasher,
    {
        self.following(collection.len()).is_some()
    }

    /// Advances the cursor and returns the element it lands on.
    ///
    /// Once this returns `None` the cursor is exhausted until
    /// [`reset`](Self::reset).
    pub fn next<'a, V, E, S>(&mut self, collection: &'a Collection<V, E, S>) -> Option<&'a Entry<V>>
    where
        S: BuildHasher,
    {
        match self.following(collection.len()) {
            Some(index) => {
                self.position = Position::At(index);
                collection.get_element_at(index)
            }
            None => {
                self.position = Position::Exhausted;
                None
            }
        }
    }

    /// The element under the cursor, without moving.
    pub fn current<'a, V, E, S>(&self, collection: &'a Collection<V, E, S>) -> Option<&'a Entry<V>>
    where
        S: BuildHasher,
    {
        self.index().and_then(|index| collection.get_element_at(index))
    }
}
