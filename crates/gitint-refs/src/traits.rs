//! The [`RefStore`] trait defining the reference storage interface.

use crate::error::Result;
use crate::types::{Branch, Head};

/// Read-only storage backend for named references.
///
/// Implementations must be thread-safe (`Send + Sync`). Branch names are
/// short names relative to `refs/heads/` (e.g. "main", "feature/auth").
pub trait RefStore: Send + Sync {
    /// Names of all branches, in no particular order.
    ///
    /// A repository without a branch namespace has no branches; that is not
    /// an error.
    fn branch_names(&self) -> Result<Vec<String>>;

    /// Resolve a branch to its tip.
    ///
    /// Fails with [`RefError::ReferenceNotFound`](crate::RefError::ReferenceNotFound)
    /// if the branch does not exist.
    fn read_branch(&self, name: &str) -> Result<Branch>;

    /// Read the current HEAD state.
    fn head(&self) -> Result<Head>;

    /// Name of the current branch, if HEAD is symbolic.
    fn current_branch(&self) -> Result<Option<String>> {
        Ok(self.head()?.branch().map(str::to_string))
    }
}
