use std::borrow::Cow;

use gitint_types::ObjectHash;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::commit::Commit;
use crate::error::{StoreError, StoreResult};
use crate::tree::Tree;

/// The kind of object stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    /// Raw content (file contents, arbitrary data).
    Blob,
    /// Directory listing: ordered entries mapping names to object hashes.
    Tree,
    /// A node in the history graph.
    Commit,
}

impl ObjectKind {
    /// The header token for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blob => "blob",
            Self::Tree => "tree",
            Self::Commit => "commit",
        }
    }

    /// Parse a header token. Returns `None` for anything but the three
    /// recognized kinds.
    pub fn from_token(token: &[u8]) -> Option<Self> {
        match token {
            b"blob" => Some(Self::Blob),
            b"tree" => Some(Self::Tree),
            b"commit" => Some(Self::Commit),
            _ => None,
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decompressed loose object with its parsed header.
///
/// `raw` is the complete decompressed image, `<kind> <len>\0<payload>`.
/// The payload is everything after the first NUL byte.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredObject {
    /// The hash this object was looked up by.
    pub hash: ObjectHash,
    /// The type of this object.
    pub kind: ObjectKind,
    /// Payload length as declared in the header.
    pub declared_len: usize,
    /// The full decompressed image, header included.
    pub raw: Vec<u8>,
    payload_start: usize,
}

impl StoredObject {
    /// Parse the header of a decompressed image.
    ///
    /// A declared length that disagrees with the actual payload length is
    /// logged and tolerated.
    pub fn parse(hash: ObjectHash, raw: Vec<u8>) -> StoreResult<Self> {
        let malformed = |reason: &str| StoreError::MalformedHeader {
            hash,
            reason: reason.to_string(),
        };

        let nul = raw
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| malformed("no NUL separator after header"))?;
        let header = &raw[..nul];

        let space = header
            .iter()
            .position(|&b| b == b' ')
            .ok_or_else(|| malformed("no space between kind and length"))?;
        let (kind_token, len_token) = (&header[..space], &header[space + 1..]);

        let kind = ObjectKind::from_token(kind_token).ok_or_else(|| {
            malformed(&format!(
                "unknown object kind {:?}",
                String::from_utf8_lossy(kind_token)
            ))
        })?;
        let declared_len = std::str::from_utf8(len_token)
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .ok_or_else(|| {
                malformed(&format!(
                    "invalid length {:?}",
                    String::from_utf8_lossy(len_token)
                ))
            })?;

        let payload_start = nul + 1;
        let actual = raw.len() - payload_start;
        if actual != declared_len {
            warn!(
                hash = %hash.short_hex(),
                declared = declared_len,
                actual,
                "object payload length does not match header"
            );
        }

        Ok(Self {
            hash,
            kind,
            declared_len,
            raw,
            payload_start,
        })
    }

    /// The bytes after the header's NUL separator.
    pub fn payload(&self) -> &[u8] {
        &self.raw[self.payload_start..]
    }

    /// The payload decoded as UTF-8, with invalid sequences replaced.
    pub fn payload_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.payload())
    }

    /// Decode the payload according to the object's kind.
    pub fn decode(&self) -> StoreResult<Object> {
        Ok(match self.kind {
            ObjectKind::Blob => Object::Blob(Blob::new(self.payload().to_vec())),
            ObjectKind::Tree => Object::Tree(Tree::decode(self.payload())?),
            ObjectKind::Commit => Object::Commit(Commit::decode(&self.payload_text())?),
        })
    }
}

/// Build the decompressed image of an object: `<kind> <len>\0<payload>`.
pub fn encode_image(kind: ObjectKind, payload: &[u8]) -> Vec<u8> {
    let mut image = format!("{} {}\0", kind, payload.len()).into_bytes();
    image.extend_from_slice(payload);
    image
}

/// A decoded object, one variant per kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Object {
    Blob(Blob),
    Tree(Tree),
    Commit(Commit),
}

impl Object {
    /// The kind of this object.
    pub fn kind(&self) -> ObjectKind {
        match self {
            Self::Blob(_) => ObjectKind::Blob,
            Self::Tree(_) => ObjectKind::Tree,
            Self::Commit(_) => ObjectKind::Commit,
        }
    }
}

/// Raw content object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blob {
    pub data: Vec<u8>,
}

impl Blob {
    /// Create a new blob from raw bytes.
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// The content as text, with invalid UTF-8 replaced.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }
}
