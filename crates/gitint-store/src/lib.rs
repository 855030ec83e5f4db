//! Read-only access to a repository's loose object database.
//!
//! Objects live under `objects/<first 2 hex>/<remaining 38 hex>` as zlib
//! streams whose decompressed image is `<kind> <len>\0<payload>`. This crate
//! locates and inflates those files, parses the header, and decodes the three
//! object kinds:
//!
//! - [`Blob`] -- opaque file content
//! - [`Tree`] -- binary directory listing of (mode, name, hash) entries
//! - [`Commit`] -- text record of tree, parents, signatures and message
//!
//! # Storage Backends
//!
//! All backends implement the [`ObjectStore`] trait:
//!
//! - [`LooseObjectStore`] -- reads loose files from a repository directory
//! - [`InMemoryObjectStore`] -- `HashMap`-based store for tests and embedding
//!
//! # Design Rules
//!
//! 1. The store is never written to; every read decodes fresh from bytes.
//! 2. File handles live only for the duration of a single read.
//! 3. Decoders are pure functions over a payload and never touch storage.
//! 4. All I/O and decode failures are propagated, never silently ignored.

pub mod commit;
pub mod error;
pub mod loose;
pub mod memory;
pub mod object;
pub mod traits;
pub mod tree;

// Re-export primary types at crate root for ergonomic imports.
pub use commit::{Commit, Signature, SignatureRole};
pub use error::{StoreError, StoreResult};
pub use loose::LooseObjectStore;
pub use memory::InMemoryObjectStore;
pub use object::{encode_image, Blob, Object, ObjectKind, StoredObject};
pub use traits::ObjectStore;
pub use tree::{Tree, TreeEntry, GITLINK_MODE};
