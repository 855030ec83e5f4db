//! Flattening a tree into full file paths.

use gitint_store::{ObjectKind, ObjectStore, StoreError, Tree, TreeEntry};
use gitint_types::ObjectHash;
use tracing::debug;

use crate::error::{WalkError, WalkResult};

/// Depth-first, pre-order iterator over the non-tree paths below a tree.
///
/// Entries are visited in on-disk order within each tree. Every entry's
/// target is read to learn its kind: trees are descended into, anything else
/// (blobs, and commits referenced by submodule entries) is yielded as a
/// path. A submodule entry whose commit is not in this store is still
/// yielded, since that commit lives in another repository.
pub struct TreeWalker<'a> {
    store: &'a dyn ObjectStore,
    /// Pending entries with their full paths; the next one is on top.
    stack: Vec<(String, TreeEntry)>,
}

impl<'a> TreeWalker<'a> {
    /// Read the root tree and prepare the walk.
    pub fn new(store: &'a dyn ObjectStore, tree: ObjectHash) -> WalkResult<Self> {
        let root = store.read_tree(&tree)?;
        let mut walker = Self {
            store,
            stack: Vec::new(),
        };
        walker.push_children("", root);
        Ok(walker)
    }

    fn push_children(&mut self, prefix: &str, tree: Tree) {
        for entry in tree.entries.into_iter().rev() {
            let path = if prefix.is_empty() {
                entry.name.clone()
            } else {
                format!("{prefix}/{}", entry.name)
            };
            self.stack.push((path, entry));
        }
    }

    fn step(&mut self, path: &str, entry: &TreeEntry) -> Result<Option<String>, StoreError> {
        if entry.is_gitlink() && !self.store.exists(&entry.hash)? {
            debug!(path, commit = %entry.hash.short_hex(), "submodule commit not in store");
            return Ok(Some(path.to_string()));
        }
        let object = self.store.read(&entry.hash)?;
        match object.kind {
            ObjectKind::Tree => {
                let subtree = Tree::decode(object.payload())?;
                debug!(path, entries = subtree.len(), "descending into tree");
                self.push_children(path, subtree);
                Ok(None)
            }
            ObjectKind::Blob | ObjectKind::Commit => Ok(Some(path.to_string())),
        }
    }
}

impl Iterator for TreeWalker<'_> {
    type Item = WalkResult<String>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((path, entry)) = self.stack.pop() {
            match self.step(&path, &entry) {
                Ok(Some(file)) => return Some(Ok(file)),
                Ok(None) => continue,
                Err(source) => {
                    self.stack.clear();
                    return Some(Err(WalkError::Entry {
                        path,
                        hash: entry.hash,
                        source,
                    }));
                }
            }
        }
        None
    }
}

/// Resolve every file path in the tree of a commit.
pub fn commit_tree_paths(store: &dyn ObjectStore, commit: &ObjectHash) -> WalkResult<Vec<String>> {
    let commit = store.read_commit(commit)?;
    TreeWalker::new(store, commit.tree)?.collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gitint_store::{InMemoryObjectStore, GITLINK_MODE};

    fn oid(byte: u8) -> ObjectHash {
        ObjectHash::from_raw([byte; 20])
    }

    fn add_tree(store: &InMemoryObjectStore, id: u8, entries: &[(&str, &str, u8)]) {
        let mut payload = Vec::new();
        for (mode, name, target) in entries {
            payload.extend_from_slice(format!("{mode} {name}\0").as_bytes());
            payload.extend_from_slice(oid(*target).as_bytes());
        }
        store.insert(oid(id), ObjectKind::Tree, &payload);
    }

    fn add_blob(store: &InMemoryObjectStore, id: u8) {
        store.insert(oid(id), ObjectKind::Blob, b"content");
    }

    fn paths(store: &InMemoryObjectStore, tree: u8) -> Vec<String> {
        TreeWalker::new(store, oid(tree))
            .unwrap()
            .collect::<WalkResult<_>>()
            .unwrap()
    }

    #[test]
    fn nested_tree_paths_in_order() {
        let store = InMemoryObjectStore::new();
        add_blob(&store, 1);
        add_blob(&store, 2);
        add_tree(&store, 10, &[("100644", "b.txt", 2)]);
        add_tree(&store, 11, &[("100644", "a.txt", 1), ("40000", "sub", 10)]);

        assert_eq!(paths(&store, 11), ["a.txt", "sub/b.txt"]);
    }

    #[test]
    fn pre_order_follows_disk_order() {
        let store = InMemoryObjectStore::new();
        add_blob(&store, 1);
        add_tree(&store, 10, &[("100644", "deep.txt", 1)]);
        add_tree(&store, 11, &[("40000", "inner", 10), ("100644", "z.txt", 1)]);
        add_tree(
            &store,
            12,
            &[("40000", "b", 11), ("100644", "a.txt", 1), ("40000", "c", 10)],
        );

        assert_eq!(
            paths(&store, 12),
            ["b/inner/deep.txt", "b/z.txt", "a.txt", "c/deep.txt"]
        );
    }

    #[test]
    fn empty_subtree_yields_nothing() {
        let store = InMemoryObjectStore::new();
        add_blob(&store, 1);
        add_tree(&store, 10, &[]);
        add_tree(&store, 11, &[("40000", "empty", 10), ("100644", "f", 1)]);
        assert_eq!(paths(&store, 11), ["f"]);
    }

    #[test]
    fn submodule_commit_is_a_leaf() {
        let store = InMemoryObjectStore::new();
        add_blob(&store, 1);
        add_tree(
            &store,
            11,
            &[(GITLINK_MODE, "vendor/lib", 99), ("100644", "main.rs", 1)],
        );
        assert_eq!(paths(&store, 11), ["vendor/lib", "main.rs"]);
    }

    #[test]
    fn missing_blob_reports_path() {
        let store = InMemoryObjectStore::new();
        add_tree(&store, 10, &[("100644", "gone.txt", 7)]);
        add_tree(&store, 11, &[("40000", "dir", 10)]);

        let mut walker = TreeWalker::new(&store, oid(11)).unwrap();
        match walker.next().unwrap() {
            Err(WalkError::Entry { path, hash, source }) => {
                assert_eq!(path, "dir/gone.txt");
                assert_eq!(hash, oid(7));
                assert!(matches!(source, StoreError::ObjectNotFound(_)));
            }
            other => panic!("unexpected step: {other:?}"),
        }
        assert!(walker.next().is_none());
    }

    #[test]
    fn commit_tree_paths_starts_from_commit() {
        let store = InMemoryObjectStore::new();
        add_blob(&store, 1);
        add_tree(&store, 11, &[("100644", "README.md", 1)]);
        let payload = format!("tree {}\n\ninitial\n", oid(11));
        store.insert(oid(20), ObjectKind::Commit, payload.as_bytes());

        assert_eq!(commit_tree_paths(&store, &oid(20)).unwrap(), ["README.md"]);
    }

    #[test]
    fn commit_tree_paths_rejects_non_commit() {
        let store = InMemoryObjectStore::new();
        add_tree(&store, 11, &[]);
        assert!(matches!(
            commit_tree_paths(&store, &oid(11)),
            Err(WalkError::Store(StoreError::UnexpectedKind { .. }))
        ));
    }
}
