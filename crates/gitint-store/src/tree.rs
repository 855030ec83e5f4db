//! Decoder for the binary tree payload.
//!
//! A tree payload is a concatenation of entries, each laid out as
//! `<mode> SP <name> NUL <20 raw hash bytes>`. There is no entry count and
//! no terminator, so the decoder walks the bytes with a cursor and a small
//! state machine until the input is exhausted exactly at an entry boundary.

use std::collections::HashMap;

use gitint_types::{ObjectHash, HASH_LEN};
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Mode of a tree entry that references a submodule commit.
pub const GITLINK_MODE: &str = "160000";

/// A single entry in a tree object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    /// Mode text exactly as stored (e.g. `100644`, `40000`).
    pub mode: String,
    /// Entry name (filename or directory name).
    pub name: String,
    /// Hash of the referenced object.
    pub hash: ObjectHash,
}

impl TreeEntry {
    /// Create a new tree entry.
    pub fn new(mode: impl Into<String>, name: impl Into<String>, hash: ObjectHash) -> Self {
        Self {
            mode: mode.into(),
            name: name.into(),
            hash,
        }
    }

    /// Returns `true` if this entry points at a submodule commit.
    pub fn is_gitlink(&self) -> bool {
        self.mode == GITLINK_MODE
    }
}

/// Directory listing object, entries in on-disk order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    pub entries: Vec<TreeEntry>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ScanState {
    ReadMode,
    ReadName,
    ReadHash,
}

impl ScanState {
    fn describe(self) -> &'static str {
        match self {
            Self::ReadMode => "mode",
            Self::ReadName => "name",
            Self::ReadHash => "hash",
        }
    }
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    /// Bytes up to (not including) `delim`; the cursor moves past `delim`.
    fn take_until(&mut self, delim: u8) -> Option<&'a [u8]> {
        let rest = &self.bytes[self.pos..];
        let len = rest.iter().position(|&b| b == delim)?;
        self.pos += len + 1;
        Some(&rest[..len])
    }

    fn take(&mut self, n: usize) -> Option<&'a [u8]> {
        let rest = &self.bytes[self.pos..];
        if rest.len() < n {
            return None;
        }
        self.pos += n;
        Some(&rest[..n])
    }
}

impl Tree {
    /// Create a tree from entries, keeping their order.
    pub fn new(entries: Vec<TreeEntry>) -> Self {
        Self { entries }
    }

    /// Decode a raw tree payload.
    ///
    /// Fails with [`StoreError::MalformedTree`] if the payload ends in the
    /// middle of an entry. An empty payload is an empty tree.
    pub fn decode(payload: &[u8]) -> StoreResult<Self> {
        let mut cursor = Cursor::new(payload);
        let mut state = ScanState::ReadMode;
        let mut entries = Vec::new();
        let mut mode = String::new();
        let mut name = String::new();

        while !(cursor.is_at_end() && state == ScanState::ReadMode) {
            let offset = cursor.pos;
            let truncated = || {
                StoreError::MalformedTree(format!(
                    "payload ends inside the {} of entry {} (offset {offset})",
                    state.describe(),
                    entries.len()
                ))
            };
            state = match state {
                ScanState::ReadMode => {
                    let raw = cursor.take_until(b' ').ok_or_else(truncated)?;
                    mode = String::from_utf8_lossy(raw).into_owned();
                    ScanState::ReadName
                }
                ScanState::ReadName => {
                    let raw = cursor.take_until(0).ok_or_else(truncated)?;
                    name = String::from_utf8_lossy(raw).into_owned();
                    ScanState::ReadHash
                }
                ScanState::ReadHash => {
                    let raw = cursor.take(HASH_LEN).ok_or_else(truncated)?;
                    let hash = ObjectHash::from_slice(raw)
                        .map_err(|e| StoreError::MalformedTree(e.to_string()))?;
                    entries.push(TreeEntry {
                        mode: std::mem::take(&mut mode),
                        name: std::mem::take(&mut name),
                        hash,
                    });
                    ScanState::ReadMode
                }
            };
        }

        Ok(Self { entries })
    }

    /// Name to hash lookup. Later duplicates of a name win.
    pub fn lookup(&self) -> HashMap<&str, ObjectHash> {
        self.entries
            .iter()
            .map(|e| (e.name.as_str(), e.hash))
            .collect()
    }

    /// Look up an entry by name. Later duplicates of a name win.
    pub fn get(&self, name: &str) -> Option<&TreeEntry> {
        self.entries.iter().rev().find(|e| e.name == name)
    }

    /// Render the tree as a catalog, one `<mode> <hash> <name>` line per entry.
    pub fn catalog(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{} {} {}\n", e.mode, e.hash, e.name))
            .collect()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the tree has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
