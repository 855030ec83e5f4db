use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

use flate2::read::ZlibDecoder;
use gitint_types::ObjectHash;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::object::StoredObject;
use crate::traits::ObjectStore;

/// Object store backed by loose files under `<root>/objects`.
///
/// `root` is the repository directory (the one holding `objects/`, `refs/`
/// and `HEAD`). Each read opens, inflates and closes one file.
#[derive(Clone, Debug)]
pub struct LooseObjectStore {
    root: PathBuf,
}

impl LooseObjectStore {
    /// Open a store rooted at a repository directory.
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The repository directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the loose file for `hash`: `objects/<2 hex>/<38 hex>`.
    pub fn object_path(&self, hash: &ObjectHash) -> PathBuf {
        self.root
            .join("objects")
            .join(hash.dir_name())
            .join(hash.file_name())
    }
}

/// Inflate a zlib stream and parse the resulting image.
pub(crate) fn inflate(hash: ObjectHash, compressed: impl Read) -> StoreResult<StoredObject> {
    let mut raw = Vec::new();
    ZlibDecoder::new(compressed)
        .read_to_end(&mut raw)
        .map_err(|source| StoreError::Decompression { hash, source })?;
    StoredObject::parse(hash, raw)
}

impl ObjectStore for LooseObjectStore {
    fn read(&self, hash: &ObjectHash) -> StoreResult<StoredObject> {
        let path = self.object_path(hash);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::ObjectNotFound(*hash))
            }
            Err(e) => return Err(e.into()),
        };
        let object = inflate(*hash, file)?;
        debug!(
            hash = %hash.short_hex(),
            kind = %object.kind,
            size = object.payload().len(),
            "read loose object"
        );
        Ok(object)
    }

    fn exists(&self, hash: &ObjectHash) -> StoreResult<bool> {
        Ok(self.object_path(hash).is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{encode_image, Object, ObjectKind};
    use flate2::write::ZlibEncoder;
    use flate2::Compression;
    use proptest::prelude::*;
    use std::io::Write;

    fn compress(data: &[u8]) -> Vec<u8> {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    fn write_loose(root: &Path, hash: &ObjectHash, image: &[u8]) {
        let dir = root.join("objects").join(hash.dir_name());
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(hash.file_name()), compress(image)).unwrap();
    }

    fn oid(byte: u8) -> ObjectHash {
        ObjectHash::from_raw([byte; 20])
    }

    #[test]
    fn object_path_uses_fan_out() {
        let store = LooseObjectStore::open("/repo/.git");
        let hash = ObjectHash::from_hex("0eee6a98471a350b2c2316313114185ecaf82f0e").unwrap();
        assert_eq!(
            store.object_path(&hash),
            PathBuf::from("/repo/.git/objects/0e/ee6a98471a350b2c2316313114185ecaf82f0e")
        );
    }

    #[test]
    fn read_blob_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        write_loose(dir.path(), &oid(1), &encode_image(ObjectKind::Blob, b"hello\n"));

        let store = LooseObjectStore::open(dir.path());
        assert!(store.exists(&oid(1)).unwrap());
        let obj = store.read(&oid(1)).unwrap();
        assert_eq!(obj.kind, ObjectKind::Blob);
        assert_eq!(obj.payload(), b"hello\n");
        match obj.decode().unwrap() {
            Object::Blob(blob) => assert_eq!(blob.text(), "hello\n"),
            other => panic!("expected blob, got {:?}", other.kind()),
        }
    }

    #[test]
    fn missing_object_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = LooseObjectStore::open(dir.path());
        assert!(!store.exists(&oid(2)).unwrap());
        assert!(matches!(
            store.read(&oid(2)),
            Err(StoreError::ObjectNotFound(h)) if h == oid(2)
        ));
    }

    #[test]
    fn uncompressed_bytes_fail_decompression() {
        let dir = tempfile::tempdir().unwrap();
        let hash = oid(3);
        let sub = dir.path().join("objects").join(hash.dir_name());
        std::fs::create_dir_all(&sub).unwrap();
        std::fs::write(sub.join(hash.file_name()), b"blob 5\0hello").unwrap();

        let store = LooseObjectStore::open(dir.path());
        assert!(matches!(
            store.read(&hash),
            Err(StoreError::Decompression { .. })
        ));
    }

    #[test]
    fn compressed_garbage_is_malformed_header() {
        let dir = tempfile::tempdir().unwrap();
        write_loose(dir.path(), &oid(4), b"no separator here");
        let store = LooseObjectStore::open(dir.path());
        assert!(matches!(
            store.read(&oid(4)),
            Err(StoreError::MalformedHeader { .. })
        ));
    }

    proptest! {
        #[test]
        fn compressed_image_roundtrip(
            kind in prop_oneof![Just(ObjectKind::Blob), Just(ObjectKind::Tree), Just(ObjectKind::Commit)],
            payload in proptest::collection::vec(any::<u8>(), 0..512),
        ) {
            let compressed = compress(&encode_image(kind, &payload));
            let obj = inflate(oid(9), &compressed[..]).unwrap();
            prop_assert_eq!(obj.kind, kind);
            prop_assert_eq!(obj.payload(), &payload[..]);
        }
    }
}
