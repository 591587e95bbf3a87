use thiserror::Error;

use crate::compare::CompareError;

/// Errors reported by the `try_*` search tree operations.
///
/// The non-`try` operations panic with this error's message instead,
/// because continuing would break the search order.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// The comparator could not order the value against a stored one.
    #[error("cannot place value in search tree: {0}")]
    Incomparable(#[from] CompareError),
}
