use thiserror::Error;

/// Errors reported by [`Collection`](super::Collection) operations.
///
/// These are ordinary, recoverable outcomes. A caller that wants to
/// overwrite can remove the key first and add it again.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// The key is already present and the policy is `IgnoreDuplicateKeys`.
    #[error("duplicate key '{key}' already stored at index {index}")]
    DuplicateKey {
        /// The rejected key.
        key: String,
        /// Display position of the entry that already holds the key.
        index: usize,
    },
}
