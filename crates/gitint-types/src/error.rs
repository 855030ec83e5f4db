use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid hex string {input:?}: {reason}")]
    InvalidHex { input: String, reason: String },

    #[error("invalid hash length: expected {expected} hex characters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}
