//! Error types for graph traversal.

use gitint_store::StoreError;
use gitint_types::ObjectHash;

/// Errors that can occur while walking history or trees.
#[derive(Debug, thiserror::Error)]
pub enum WalkError {
    /// A commit reached during the history walk could not be read.
    #[error("history walk failed at commit {hash}: {source}")]
    Commit {
        hash: ObjectHash,
        #[source]
        source: StoreError,
    },

    /// A tree entry could not be resolved.
    #[error("cannot resolve {path:?} ({hash}): {source}")]
    Entry {
        path: String,
        hash: ObjectHash,
        #[source]
        source: StoreError,
    },

    /// The starting object could not be read.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Convenience alias for walk results.
pub type WalkResult<T> = Result<T, WalkError>;
