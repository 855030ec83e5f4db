//! On-disk repository fixture for command tests.

use std::fs;
use std::io::Write;
use std::path::Path;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use gitint_store::{encode_image, ObjectKind};
use gitint_types::ObjectHash;
use tempfile::TempDir;

const SIGNATURE: &str = "Kalinka Kali <kalinka@kali.com> 1585491500 +0300";

/// A temporary repository directory with loose objects, branches and HEAD.
///
/// History of `main`: `C1 <- C2 <- MERGE`, with `FEATURE` (child of `C1`)
/// merged in as the second parent. `dev` points at `FEATURE`.
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    pub const BLOB_A: &'static str = "a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1";
    pub const BLOB_B: &'static str = "b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2";
    pub const SUB_TREE: &'static str = "5b5b5b5b5b5b5b5b5b5b5b5b5b5b5b5b5b5b5b5b";
    pub const ROOT_TREE: &'static str = "7070707070707070707070707070707070707070";
    pub const C1: &'static str = "c1c1c1c1c1c1c1c1c1c1c1c1c1c1c1c1c1c1c1c1";
    pub const C2: &'static str = "c2c2c2c2c2c2c2c2c2c2c2c2c2c2c2c2c2c2c2c2";
    pub const FEATURE: &'static str = "fefefefefefefefefefefefefefefefefefefefe";
    pub const MERGE: &'static str = "e3e3e3e3e3e3e3e3e3e3e3e3e3e3e3e3e3e3e3e3";

    /// A repository with an objects directory and nothing else.
    pub fn empty() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("objects")).unwrap();
        Self { dir }
    }

    pub fn sample() -> Self {
        let fixture = Self::empty();
        fixture.write_object(Self::BLOB_A, ObjectKind::Blob, b"alpha\n");
        fixture.write_object(Self::BLOB_B, ObjectKind::Blob, b"beta\n");
        fixture.write_tree(Self::SUB_TREE, &[("100644", "b.txt", Self::BLOB_B)]);
        fixture.write_tree(
            Self::ROOT_TREE,
            &[("100644", "a.txt", Self::BLOB_A), ("40000", "sub", Self::SUB_TREE)],
        );
        fixture.write_commit(Self::C1, &[], "first");
        fixture.write_commit(Self::C2, &[Self::C1], "second");
        fixture.write_commit(Self::FEATURE, &[Self::C1], "feature");
        fixture.write_commit(Self::MERGE, &[Self::C2, Self::FEATURE], "merge feature");
        fixture.write_ref("refs/heads/main", Self::MERGE);
        fixture.write_ref("refs/heads/dev", Self::FEATURE);
        fixture.write_ref("HEAD", "ref: refs/heads/main");
        fixture
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write_object(&self, hash: &str, kind: ObjectKind, payload: &[u8]) {
        let hash: ObjectHash = hash.parse().unwrap();
        let dir = self.path().join("objects").join(hash.dir_name());
        fs::create_dir_all(&dir).unwrap();
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&encode_image(kind, payload)).unwrap();
        fs::write(dir.join(hash.file_name()), encoder.finish().unwrap()).unwrap();
    }

    fn write_tree(&self, hash: &str, entries: &[(&str, &str, &str)]) {
        let mut payload = Vec::new();
        for (mode, name, target) in entries {
            payload.extend_from_slice(format!("{mode} {name}\0").as_bytes());
            let target: ObjectHash = target.parse().unwrap();
            payload.extend_from_slice(target.as_bytes());
        }
        self.write_object(hash, ObjectKind::Tree, &payload);
    }

    fn write_commit(&self, hash: &str, parents: &[&str], message: &str) {
        let mut payload = format!("tree {}\n", Self::ROOT_TREE);
        for parent in parents {
            payload.push_str(&format!("parent {parent}\n"));
        }
        payload.push_str(&format!("author {SIGNATURE}\ncommitter {SIGNATURE}\n\n{message}\n"));
        self.write_object(hash, ObjectKind::Commit, payload.as_bytes());
    }

    fn write_ref(&self, name: &str, content: &str) {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, format!("{content}\n")).unwrap();
    }
}
