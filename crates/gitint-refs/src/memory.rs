//! In-memory reference store for testing and embedding.

use std::collections::BTreeMap;
use std::sync::RwLock;

use gitint_types::ObjectHash;

use crate::error::{RefError, Result};
use crate::names::validate_branch_name;
use crate::traits::RefStore;
use crate::types::{Branch, Head, HEADS_PREFIX};

/// An in-memory implementation of [`RefStore`].
///
/// Branches and HEAD are seeded through [`set_branch`](Self::set_branch) and
/// [`set_head`](Self::set_head); the [`RefStore`] surface stays read-only.
#[derive(Debug, Default)]
pub struct InMemoryRefStore {
    branches: RwLock<BTreeMap<String, ObjectHash>>,
    head: RwLock<Option<Head>>,
}

impl InMemoryRefStore {
    /// Create a new empty ref store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or move a branch.
    pub fn set_branch(&self, name: &str, tip: ObjectHash) -> Result<()> {
        validate_branch_name(name)?;
        self.branches
            .write()
            .expect("lock poisoned")
            .insert(name.to_string(), tip);
        Ok(())
    }

    /// Replace the HEAD state.
    pub fn set_head(&self, head: Head) {
        *self.head.write().expect("lock poisoned") = Some(head);
    }
}

impl RefStore for InMemoryRefStore {
    fn branch_names(&self) -> Result<Vec<String>> {
        Ok(self
            .branches
            .read()
            .expect("lock poisoned")
            .keys()
            .cloned()
            .collect())
    }

    fn read_branch(&self, name: &str) -> Result<Branch> {
        let tip = self
            .branches
            .read()
            .expect("lock poisoned")
            .get(name)
            .copied()
            .ok_or_else(|| RefError::ReferenceNotFound {
                name: format!("{HEADS_PREFIX}{name}"),
            })?;
        Ok(Branch {
            name: name.to_string(),
            tip,
        })
    }

    fn head(&self) -> Result<Head> {
        self.head
            .read()
            .expect("lock poisoned")
            .clone()
            .ok_or_else(|| RefError::ReferenceNotFound {
                name: "HEAD".into(),
            })
    }
}
