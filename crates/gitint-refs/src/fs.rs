//! Filesystem reference store.
//!
//! [`FsRefStore`] reads branch files under `<root>/refs/heads` and the
//! `<root>/HEAD` pointer of a repository directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use gitint_types::ObjectHash;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{RefError, Result};
use crate::names::validate_branch_name;
use crate::traits::RefStore;
use crate::types::{Branch, Head, HEADS_PREFIX};

/// Reads references from a repository directory.
#[derive(Clone, Debug)]
pub struct FsRefStore {
    root: PathBuf,
}

impl FsRefStore {
    /// Open a ref store rooted at a repository directory.
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The repository directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn heads_dir(&self) -> PathBuf {
        self.root.join("refs").join("heads")
    }

    fn read_text(&self, path: &Path, name: impl Into<String>) -> Result<String> {
        std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => RefError::ReferenceNotFound { name: name.into() },
            _ => RefError::Io(e),
        })
    }
}

impl RefStore for FsRefStore {
    fn branch_names(&self) -> Result<Vec<String>> {
        let heads = self.heads_dir();
        if !heads.is_dir() {
            debug!(path = %heads.display(), "no branch namespace");
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in WalkDir::new(&heads).min_depth(1) {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(&heads) else {
                continue;
            };
            let name: Vec<String> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            names.push(name.join("/"));
        }
        debug!(count = names.len(), "listed branches");
        Ok(names)
    }

    fn read_branch(&self, name: &str) -> Result<Branch> {
        validate_branch_name(name)?;
        let canonical = format!("{HEADS_PREFIX}{name}");
        let text = self.read_text(&self.heads_dir().join(name), canonical.clone())?;
        let tip = ObjectHash::from_hex(text.trim())
            .map_err(|source| RefError::InvalidHash {
                name: canonical,
                source,
            })?;
        debug!(branch = name, tip = %tip.short_hex(), "resolved branch");
        Ok(Branch {
            name: name.to_string(),
            tip,
        })
    }

    fn head(&self) -> Result<Head> {
        let text = self.read_text(&self.root.join("HEAD"), "HEAD")?;
        Ok(Head::parse(&text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIP: &str = "31cc2a9c2b5d7ad3b8ac1c7fb0a4b22b0b2a8bc2";

    fn repo() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("refs/heads/feature")).unwrap();
        std::fs::write(dir.path().join("refs/heads/main"), format!("{TIP}\n")).unwrap();
        std::fs::write(dir.path().join("refs/heads/feature/auth"), TIP).unwrap();
        std::fs::write(dir.path().join("HEAD"), "ref: refs/heads/main\n").unwrap();
        dir
    }

    #[test]
    fn lists_nested_branches() {
        let dir = repo();
        let store = FsRefStore::open(dir.path());
        let mut names = store.branch_names().unwrap();
        names.sort();
        assert_eq!(names, ["feature/auth", "main"]);
    }

    #[test]
    fn missing_heads_dir_means_no_branches() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsRefStore::open(dir.path());
        assert!(store.branch_names().unwrap().is_empty());
    }

    #[test]
    fn empty_heads_dir_means_no_branches() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("refs/heads/feature")).unwrap();
        std::fs::write(dir.path().join("HEAD"), "ref: refs/heads/main\n").unwrap();
        let store = FsRefStore::open(dir.path());

        assert!(store.branch_names().unwrap().is_empty());
        let listing = crate::lister::list_branches(&store).unwrap();
        assert_eq!(
            crate::lister::render_branch_list(&listing),
            crate::lister::NO_BRANCHES
        );
    }

    #[test]
    fn read_branch_trims_content() {
        let dir = repo();
        let store = FsRefStore::open(dir.path());
        let branch = store.read_branch("main").unwrap();
        assert_eq!(branch.tip.to_hex(), TIP);
        assert_eq!(store.read_branch("feature/auth").unwrap().tip, branch.tip);
    }

    #[test]
    fn missing_branch_is_reference_not_found() {
        let dir = repo();
        let store = FsRefStore::open(dir.path());
        match store.read_branch("nope").unwrap_err() {
            RefError::ReferenceNotFound { name } => assert_eq!(name, "refs/heads/nope"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn traversal_is_rejected_before_io() {
        let dir = repo();
        let store = FsRefStore::open(dir.path());
        assert!(matches!(
            store.read_branch("../../HEAD"),
            Err(RefError::InvalidBranchName { .. })
        ));
    }

    #[test]
    fn garbage_branch_content_is_invalid_hash() {
        let dir = repo();
        std::fs::write(dir.path().join("refs/heads/broken"), "not a hash").unwrap();
        let store = FsRefStore::open(dir.path());
        assert!(matches!(
            store.read_branch("broken"),
            Err(RefError::InvalidHash { .. })
        ));
    }

    #[test]
    fn head_names_current_branch() {
        let dir = repo();
        let store = FsRefStore::open(dir.path());
        assert_eq!(store.current_branch().unwrap(), Some("main".to_string()));
    }

    #[test]
    fn missing_head_is_reference_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsRefStore::open(dir.path());
        assert!(matches!(
            store.head(),
            Err(RefError::ReferenceNotFound { name }) if name == "HEAD"
        ));
    }
}
