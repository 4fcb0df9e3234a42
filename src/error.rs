//! Error type for fallible map operations.

/// Errors surfaced by [`TreeMap`](crate::TreeMap) operations.
///
/// Every failing operation reports its error before touching the tree, so a
/// caller observing an `Err` sees the map exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The handle is the end position (or does not name a live entry).
    #[error("cannot dereference the end handle")]
    DereferenceEnd,
    /// `erase` was asked to remove a key that is not present.
    #[error("no such key in the tree")]
    KeyNotFound,
    /// `erase_at` was given the end handle (or a handle to a non-live node).
    #[error("handle does not refer to a live entry")]
    HandleNotFound,
    /// Checked lookup of a key that is not present.
    #[error("no such key in the map")]
    MissingKey,
}

/// Result alias for map operations.
pub type Result<T> = std::result::Result<T, TreeError>;
