//! Character prefix tree.
//!
//! [`Trie`] stores a set of words. Each node holds its outgoing links, one
//! per next character, in a small vector sorted by character, plus a flag
//! marking whether the path from the root spells a stored word.
//!
//! Removing a word prunes every branch that no longer leads to a stored
//! word, so the node count only depends on the stored set.
//!
//! # Examples
//!
//! ```rust
//! use indexkit::trie::Trie;
//!
//! let mut trie = Trie::new();
//! trie.add("cat");
//! trie.add("car");
//!
//! assert!(trie.exists("cat"));
//! assert!(!trie.exists("ca"));
//! assert!(trie.has_prefix("ca"));
//! assert_eq!(trie.words_with_prefix("ca"), vec!["car", "cat"]);
//! ```

mod iter;

pub use iter::Words;

use std::fmt;

use smallvec::SmallVec;

/// Links stored inline before spilling to the heap.
const INLINE_CHILDREN: usize = 4;

type Children = SmallVec<[(char, Box<TrieNode>); INLINE_CHILDREN]>;

// Clone, equality and drop are iterative; a node chain is as deep as its word.
#[derive(Default)]
struct TrieNode {
    // Sorted by character.
    children: Children,
    terminates: bool,
}

impl TrieNode {
    fn position(&self, character: char) -> Result<usize, usize> {
        self.children
            .binary_search_by_key(&character, |(link, _)| *link)
    }

    fn child(&self, character: char) -> Option<&Self> {
        self.position(character)
            .ok()
            .map(|position| &*self.children[position].1)
    }

    fn child_or_insert(&mut self, character: char) -> &mut Self {
        let position = match self.position(character) {
            Ok(position) => position,
            Err(position) => {
                self.children
                    .insert(position, (character, Box::default()));
                position
            }
        };
        &mut self.children[position].1
    }

    /// Neither a word end nor on the way to one.
    fn is_dead(&self) -> bool {
        !self.terminates && self.children.is_empty()
    }

    fn node_count(&self) -> usize {
        let mut pending = vec![self];
        let mut count = 0;
        while let Some(node) = pending.pop() {
            count += 1;
            pending.extend(node.children.iter().map(|(_, child)| &**child));
        }
        count
    }
}

struct CloneFrame<'a> {
    source: &'a TrieNode,
    character: char,
    next: usize,
    children: Children,
}

impl<'a> CloneFrame<'a> {
    fn new(source: &'a TrieNode, character: char) -> Self {
        Self {
            source,
            character,
            next: 0,
            children: Children::new(),
        }
    }
}

impl Clone for TrieNode {
    fn clone(&self) -> Self {
        // Children are copied before their parent is assembled.
        let mut stack = vec![CloneFrame::new(self, '\0')];
        while let Some(frame) = stack.last_mut() {
            let source = frame.source;
            if let Some((character, child)) = source.children.get(frame.next) {
                frame.next += 1;
                stack.push(CloneFrame::new(child, *character));
                continue;
            }

            let Some(finished) = stack.pop() else {
                break;
            };
            let node = Self {
                children: finished.children,
                terminates: finished.source.terminates,
            };
            match stack.last_mut() {
                Some(parent) => parent.children.push((finished.character, Box::new(node))),
                None => return node,
            }
        }
        Self::default()
    }
}

impl PartialEq for TrieNode {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((left, right)) = pending.pop() {
            if left.terminates != right.terminates || left.children.len() != right.children.len() {
                return false;
            }
            for ((left_link, left_child), (right_link, right_child)) in
                left.children.iter().zip(&right.children)
            {
                if left_link != right_link {
                    return false;
                }
                pending.push((&**left_child, &**right_child));
            }
        }
        true
    }
}

impl Eq for TrieNode {}

impl Drop for TrieNode {
    fn drop(&mut self) {
        let mut pending: Vec<Box<Self>> = self.children.drain(..).map(|(_, child)| child).collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.children.drain(..).map(|(_, child)| child));
        }
    }
}

/// A set of words stored as a prefix tree.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Trie {
    root: TrieNode,
    length: usize,
}

static_assertions::assert_impl_all!(Trie: Send, Sync, Clone);

impl Trie {
    /// Creates an empty trie.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored words.
    #[inline]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if no word is stored.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Number of nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    /// Removes every word.
    pub fn clear(&mut self) {
        self.root = TrieNode::default();
        self.length = 0;
    }

    /// Stores `word` and returns `true` if it was not already present.
    ///
    /// The empty word marks the root itself.
    pub fn add(&mut self, word: &str) -> bool {
        let mut node = &mut self.root;
        for character in word.chars() {
            node = node.child_or_insert(character);
        }
        let added = !std::mem::replace(&mut node.terminates, true);
        if added {
            self.length += 1;
        }
        added
    }

    /// Removes `word` and returns `true` if it was present.
    ///
    /// Branches left without any word beneath them are pruned.
    pub fn remove(&mut self, word: &str) -> bool {
        // Positions of the links along `word`, and the depth of the deepest
        // node on the path that must survive the removal.
        let mut positions = Vec::new();
        let mut anchor = 0;
        let mut node = &self.root;
        for character in word.chars() {
            if node.terminates || node.children.len() > 1 {
                anchor = positions.len();
            }
            let Ok(position) = node.position(character) else {
                return false;
            };
            positions.push(position);
            node = &*node.children[position].1;
        }
        if !node.terminates {
            return false;
        }

        let prune = !positions.is_empty() && node.children.is_empty();
        let depth = if prune { anchor } else { positions.len() };
        let mut node = &mut self.root;
        for &position in &positions[..depth] {
            node = &mut *node.children[position].1;
        }
        if prune {
            let (character, _) = node.children.remove(positions[anchor]);
            tracing::trace!(%character, depth = anchor, "trie branch pruned");
        } else {
            node.terminates = false;
        }

        self.length -= 1;
        true
    }

    fn find(&self, path: &str) -> Option<&TrieNode> {
        path.chars()
            .try_fold(&self.root, |node, character| node.child(character))
    }

    /// Returns `true` if `word` is stored. A path that exists only as a
    /// prefix of longer words does not count.
    pub fn exists(&self, word: &str) -> bool {
        self.find(word).is_some_and(|node| node.terminates)
    }

    /// Returns `true` if some stored word starts with `prefix`.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.find(prefix)
            .is_some_and(|node| !node.is_dead())
    }

    /// Stored words starting with `prefix`, in lexicographic order.
    pub fn words_with_prefix(&self, prefix: &str) -> Vec<String> {
        Words::new(self.find(prefix), prefix.to_owned()).collect()
    }

    /// All stored words in lexicographic order.
    pub fn iter(&self) -> Words<'_> {
        Words::new(Some(&self.root), String::new())
    }
}

impl fmt::Debug for Trie {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Trie {
    fn from_iter<I: IntoIterator<Item = S>>(iterable: I) -> Self {
        let mut trie = Self::new();
        trie.extend(iterable);
        trie
    }
}

impl<S: AsRef<str>> Extend<S> for Trie {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iterable: I) {
        for word in iterable {
            self.add(word.as_ref());
        }
    }
}

impl<'a> IntoIterator for &'a Trie {
    type Item = String;
    type IntoIter = Words<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
