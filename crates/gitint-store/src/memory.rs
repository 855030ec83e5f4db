use std::collections::HashMap;
use std::sync::RwLock;

use gitint_types::ObjectHash;

use crate::error::{StoreError, StoreResult};
use crate::object::{encode_image, ObjectKind, StoredObject};
use crate::traits::ObjectStore;

/// In-memory, HashMap-based object store.
///
/// Intended for tests and embedding. Holds decompressed images keyed by
/// hash; reads run the same header parser as the loose backend. Hashes are
/// supplied by the caller and not verified against content.
pub struct InMemoryObjectStore {
    objects: RwLock<HashMap<ObjectHash, Vec<u8>>>,
}

impl InMemoryObjectStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Store a well-formed object under `hash`.
    pub fn insert(&self, hash: ObjectHash, kind: ObjectKind, payload: &[u8]) {
        self.insert_raw(hash, encode_image(kind, payload));
    }

    /// Store an arbitrary decompressed image under `hash`.
    pub fn insert_raw(&self, hash: ObjectHash, image: Vec<u8>) {
        self.objects
            .write()
            .expect("lock poisoned")
            .insert(hash, image);
    }

    /// Number of objects currently stored.
    pub fn len(&self) -> usize {
        self.objects.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.read().expect("lock poisoned").is_empty()
    }
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectStore for InMemoryObjectStore {
    fn read(&self, hash: &ObjectHash) -> StoreResult<StoredObject> {
        let image = self
            .objects
            .read()
            .expect("lock poisoned")
            .get(hash)
            .cloned()
            .ok_or(StoreError::ObjectNotFound(*hash))?;
        StoredObject::parse(*hash, image)
    }

    fn exists(&self, hash: &ObjectHash) -> StoreResult<bool> {
        Ok(self.objects.read().expect("lock poisoned").contains_key(hash))
    }
}

impl std::fmt::Debug for InMemoryObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryObjectStore")
            .field("object_count", &self.len())
            .finish()
    }
}
