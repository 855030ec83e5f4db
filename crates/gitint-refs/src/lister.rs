//! Sorted branch listing with the current-branch marker.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::traits::RefStore;

/// Message shown when a repository has no branches.
pub const NO_BRANCHES: &str = "No branches found";

/// One line of a branch listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchInfo {
    /// Branch name.
    pub name: String,
    /// Whether this is the currently checked-out branch (HEAD points here).
    pub is_current: bool,
}

/// List all branches sorted by name, marking the one HEAD names.
///
/// HEAD is only consulted when at least one branch exists.
pub fn list_branches(refs: &dyn RefStore) -> Result<Vec<BranchInfo>> {
    let mut names = refs.branch_names()?;
    if names.is_empty() {
        return Ok(Vec::new());
    }
    names.sort();

    let current = refs.current_branch()?;
    debug!(count = names.len(), current = ?current, "listing branches");
    Ok(names
        .into_iter()
        .map(|name| BranchInfo {
            is_current: current.as_deref() == Some(name.as_str()),
            name,
        })
        .collect())
}

/// Render a listing: `* <name>` for the current branch, `  <name>` for the
/// rest, or [`NO_BRANCHES`] when empty.
pub fn render_branch_list(branches: &[BranchInfo]) -> String {
    if branches.is_empty() {
        return NO_BRANCHES.to_string();
    }
    branches
        .iter()
        .map(|b| {
            let marker = if b.is_current { "* " } else { "  " };
            format!("{marker}{}", b.name)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
