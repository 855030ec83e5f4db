use gitint_types::ObjectHash;

use crate::object::ObjectKind;

/// Errors from object store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No loose object file exists for the hash.
    #[error("object not found: {0}")]
    ObjectNotFound(ObjectHash),

    /// The stored bytes are not a valid zlib stream.
    #[error("failed to decompress object {hash}: {source}")]
    Decompression {
        hash: ObjectHash,
        #[source]
        source: std::io::Error,
    },

    /// The decompressed image has no NUL separator, an unknown kind token,
    /// or an unparseable length.
    #[error("malformed header in object {hash}: {reason}")]
    MalformedHeader { hash: ObjectHash, reason: String },

    /// A tree payload ended in the middle of an entry.
    #[error("malformed tree: {0}")]
    MalformedTree(String),

    /// A commit payload lacks its tree line or carries unparseable fields.
    #[error("malformed commit: {0}")]
    MalformedCommit(String),

    /// The object exists but is not of the kind the caller asked for.
    #[error("object {hash} is a {actual}, expected a {expected}")]
    UnexpectedKind {
        hash: ObjectHash,
        expected: ObjectKind,
        actual: ObjectKind,
    },

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
