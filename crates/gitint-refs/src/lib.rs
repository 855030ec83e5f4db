//! Reference access for gitint.
//!
//! References are the human-readable entry points into the commit graph.
//! This crate reads them; it never creates or moves them.
//!
//! - **Branches** live under `refs/heads/<name>`, each a file holding the
//!   hash of the branch tip.
//! - **HEAD** names the current branch (`ref: refs/heads/<name>`), or holds
//!   a bare commit hash when detached.
//!
//! # Modules
//!
//! - [`error`]: Error types for ref operations
//! - [`types`]: Core ref types: [`Branch`], [`Head`]
//! - [`traits`]: The [`RefStore`] trait defining the storage interface
//! - [`names`]: Branch name validation
//! - [`fs`]: [`FsRefStore`] reading a repository directory
//! - [`memory`]: In-memory [`InMemoryRefStore`] for tests
//! - [`lister`]: Sorted branch listing with the current-branch marker

pub mod error;
pub mod fs;
pub mod lister;
pub mod memory;
pub mod names;
pub mod traits;
pub mod types;

pub use error::{RefError, Result};
pub use fs::FsRefStore;
pub use lister::{list_branches, render_branch_list, BranchInfo, NO_BRANCHES};
pub use memory::InMemoryRefStore;
pub use names::validate_branch_name;
pub use traits::RefStore;
pub use types::{Branch, Head};
