//! # indexkit
//!
//! In-memory indexed data structures for single-threaded use.
//!
//! ## Overview
//!
//! - **Collection**: an ordered dictionary with O(1) key lookup, a sortable
//!   display order and caller-owned traversal cursors
//! - **Tree**: an arena-backed binary search tree with multiplicity counts,
//!   and its AVL-balanced variant
//! - **Trie**: a character prefix tree
//! - **Compare**: comparator and equivalence capabilities used by the above
//!
//! ## Feature Flags
//!
//! - `collection`: [`collection`] module
//! - `tree`: [`tree`] module
//! - `trie`: [`trie`] module
//! - `full`: enable all of the above
//! - `fxhash` / `ahash`: faster key hashing for `Collection`
//!
//! ## Logging
//!
//! Structural events (insertions, removals, rotations, pruning) are emitted
//! through [`tracing`] at `trace` level; rejected duplicates and bulk
//! operations at `debug` level. The library never installs a subscriber.
//!
//! ## Example
//!
//! ```rust
//! use indexkit::prelude::*;
//!
//! let mut history: Collection<&str> = Collection::new();
//! history.add("/home", "Home").unwrap();
//! history.add("/settings", "Settings").unwrap();
//! assert_eq!(history.get_value("/settings"), Some(&"Settings"));
//!
//! let mut tree = BalancedBinaryTree::new();
//! tree.extend([5, 3, 8, 1, 4]);
//! assert!(tree.is_balanced());
//!
//! let words: Trie = ["cat", "car"].into_iter().collect();
//! assert!(words.exists("cat"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports the main types of every enabled module.
///
/// # Usage
///
/// ```rust
/// use indexkit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::compare::{
        CapabilityOrder, Comparable, Comparator, DefaultEquality, Equivalence, NaturalOrder,
        PartialOrder,
    };

    #[cfg(feature = "collection")]
    pub use crate::collection::{
        Collection, CollectionConfig, CollectionError, Cursor, Direction, DuplicatePolicy, Entry,
    };

    #[cfg(feature = "tree")]
    pub use crate::tree::{BalancedBinaryTree, BinaryTree, TreeError};

    #[cfg(feature = "trie")]
    pub use crate::trie::Trie;
}

pub mod compare;

#[cfg(feature = "collection")]
pub mod collection;

#[cfg(feature = "tree")]
pub mod tree;

#[cfg(feature = "trie")]
pub mod trie;
