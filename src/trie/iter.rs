use std::iter::FusedIterator;

use super::TrieNode;

/// Words below a trie node, in lexicographic order.
///
/// Created by [`Trie::iter`](super::Trie::iter).
pub struct Words<'a> {
    stack: Vec<(&'a TrieNode, String)>,
}

impl<'a> Words<'a> {
    pub(super) fn new(start: Option<&'a TrieNode>, prefix: String) -> Self {
        Self {
            stack: start.map(|node| (node, prefix)).into_iter().collect(),
        }
    }
}

impl Iterator for Words<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, word)) = self.stack.pop() {
            // Reversed so the smallest character is popped first.
            for (character, child) in node.children.iter().rev() {
                let mut extended = String::with_capacity(word.len() + character.len_utf8());
                extended.push_str(&word);
                extended.push(*character);
                self.stack.push((&**child, extended));
            }
            if node.terminates {
                return Some(word);
            }
        }
        None
    }
}

impl FusedIterator for Words<'_> {}
