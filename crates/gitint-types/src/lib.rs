//! Foundation types for gitint.
//!
//! Every object in a repository's object database is addressed by the SHA-1
//! of its decompressed content. This crate provides that identifier,
//! [`ObjectHash`], plus the error type for parsing it. All other gitint crates
//! depend on `gitint-types`.

pub mod error;
pub mod hash;

pub use error::TypeError;
pub use hash::{ObjectHash, HASH_HEX_LEN, HASH_LEN};
