use gitint_types::ObjectHash;

use crate::commit::Commit;
use crate::error::{StoreError, StoreResult};
use crate::object::{Object, ObjectKind, StoredObject};
use crate::tree::Tree;

/// Read-only content-addressed object store.
///
/// All implementations must satisfy these invariants:
/// - Objects are immutable; reading the same hash twice yields the same bytes.
/// - Every read decodes fresh from storage; nothing is cached.
/// - A missing object is [`StoreError::ObjectNotFound`], not an empty value.
/// - All I/O errors are propagated, never silently ignored.
pub trait ObjectStore: Send + Sync {
    /// Read and inflate an object, parsing its header.
    fn read(&self, hash: &ObjectHash) -> StoreResult<StoredObject>;

    /// Check whether an object exists without decoding it.
    fn exists(&self, hash: &ObjectHash) -> StoreResult<bool>;

    /// Read an object and decode it according to its kind.
    fn read_object(&self, hash: &ObjectHash) -> StoreResult<Object> {
        self.read(hash)?.decode()
    }

    /// Read an object that must be a commit.
    fn read_commit(&self, hash: &ObjectHash) -> StoreResult<Commit> {
        match self.read_object(hash)? {
            Object::Commit(commit) => Ok(commit),
            other => Err(StoreError::UnexpectedKind {
                hash: *hash,
                expected: ObjectKind::Commit,
                actual: other.kind(),
            }),
        }
    }

    /// Read an object that must be a tree.
    fn read_tree(&self, hash: &ObjectHash) -> StoreResult<Tree> {
        match self.read_object(hash)? {
            Object::Tree(tree) => Ok(tree),
            other => Err(StoreError::UnexpectedKind {
                hash: *hash,
                expected: ObjectKind::Tree,
                actual: other.kind(),
            }),
        }
    }
}
