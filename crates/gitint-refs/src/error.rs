//! Error types for reference operations.

use gitint_types::TypeError;
use thiserror::Error;

/// Errors that can occur during reference operations.
#[derive(Debug, Error)]
pub enum RefError {
    /// The branch file or HEAD does not exist.
    #[error("reference not found: {name}")]
    ReferenceNotFound { name: String },

    /// The branch name is invalid.
    #[error("invalid branch name {name:?}: {reason}")]
    InvalidBranchName { name: String, reason: String },

    /// The reference file does not hold a valid object hash.
    #[error("reference {name} does not hold a valid hash: {source}")]
    InvalidHash {
        name: String,
        #[source]
        source: TypeError,
    },

    /// I/O error while reading reference files.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for ref operations.
pub type Result<T> = std::result::Result<T, RefError>;
