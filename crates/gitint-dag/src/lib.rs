//! Graph traversal over the object database.
//!
//! Two walkers drive repeated reads from an [`ObjectStore`]:
//!
//! - [`HistoryWalker`] follows parent links from a commit, breadth-first,
//!   and labels the second parent of a two-parent merge as merged.
//! - [`TreeWalker`] flattens a tree into full file paths, depth-first in
//!   on-disk entry order.
//!
//! Both keep an explicit worklist instead of recursing, so history depth
//! and tree nesting are bounded by memory rather than the call stack.
//!
//! [`ObjectStore`]: gitint_store::ObjectStore

pub mod error;
pub mod history;
pub mod paths;

pub use error::{WalkError, WalkResult};
pub use history::{HistoryWalker, LogEntry};
pub use paths::{commit_tree_paths, TreeWalker};
