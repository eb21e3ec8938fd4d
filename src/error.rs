//! Errors reported by the containers in this crate.

use std::collections::TryReserveError;

/// Errors triggered by tree traversals, rebalancing, and hash table construction.
///
/// Looking up or deleting a missing key is not an error. Those operations return `None`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A scratch or items buffer could not grow to hold more nodes.
    #[error("failed to grow buffer: {0}")]
    Alloc(#[from] TryReserveError),
    /// A hash table needs at least one bucket to place entries in.
    #[error("hash table must have at least one bucket")]
    ZeroBuckets,
}

/// Shorthand for results carrying this crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
