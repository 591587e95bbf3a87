//! Binary search trees over an index-addressed node arena.
//!
//! - [`BinaryTree`]: plain binary search tree, shape follows insertion order
//! - [`BalancedBinaryTree`]: the same tree with AVL rebalancing
//!
//! Both are aliases of [`SearchTree`] with a different [`BalancePolicy`], so
//! they share one insert path, one delete path and one set of invariants.
//!
//! # Storage
//!
//! Nodes live in a vector-backed arena and refer to each other by
//! [`NodeId`]. Child links are the only owning edges; the parent link is a
//! plain index used to find a node's side during deletion and rotation. No
//! reference cycles exist, and every rewiring updates both directions.
//!
//! # Invariants
//!
//! 1. Every value in a node's left subtree orders before the node's value,
//!    every value in its right subtree after it.
//! 2. Equal values share one node; its `count` is the multiplicity.
//! 3. `parent` of each child points at the node holding it.
//! 4. For [`BalancedBinaryTree`], after every operation the subtree heights
//!    of each node differ by at most one.
//!
//! # Examples
//!
//! ```rust
//! use indexkit::tree::BalancedBinaryTree;
//!
//! let mut tree = BalancedBinaryTree::new();
//! for value in 1..=15 {
//!     tree.add(value);
//! }
//! assert!(tree.is_balanced());
//! assert_eq!(tree.height(), 4);
//!
//! tree.remove(&8);
//! assert!(tree.is_balanced());
//! assert_eq!(tree.iter().count(), 14);
//! ```

mod arena;
mod balance;
mod error;
mod iter;
mod search_tree;

pub use arena::NodeId;
pub use balance::Avl;
pub use balance::BalancePolicy;
pub use balance::Unbalanced;
pub use error::TreeError;
pub use iter::Iter;
pub use iter::IterWithCounts;
pub use search_tree::SearchTree;

use crate::compare::NaturalOrder;

/// Unbalanced binary search tree.
pub type BinaryTree<T, C = NaturalOrder> = SearchTree<T, C, Unbalanced>;

/// Binary search tree kept height-balanced with AVL rotations.
pub type BalancedBinaryTree<T, C = NaturalOrder> = SearchTree<T, C, Avl>;
