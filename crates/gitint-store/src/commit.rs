//! Decoder for the text commit payload.
//!
//! A commit payload holds `tree`, `parent`, `author` and `committer` lines
//! and a free-form message. Every non-blank line is classified by its leading
//! token, wherever it appears; lines that are not recognized are folded into
//! the message rather than rejected.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use gitint_types::ObjectHash;
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Which role a signature plays in a commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignatureRole {
    Author,
    Committer,
}

impl SignatureRole {
    /// Label used when rendering the signature's timestamp.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Author => "original",
            Self::Committer => "commit",
        }
    }
}

/// Name, email and timestamp of an author or committer.
///
/// `when` keeps the offset recorded in the commit, so rendering happens in
/// the committer's own zone rather than local time or UTC.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub name: String,
    pub email: String,
    pub when: DateTime<FixedOffset>,
}

impl Signature {
    /// Parse `<name> <<email>> <epoch seconds> <±HHMM>`.
    pub fn parse(raw: &str) -> StoreResult<Self> {
        let malformed =
            |reason: &str| StoreError::MalformedCommit(format!("{reason} in signature {raw:?}"));

        let open = raw.find('<').ok_or_else(|| malformed("missing '<'"))?;
        let close = raw.rfind('>').ok_or_else(|| malformed("missing '>'"))?;
        if close < open {
            return Err(malformed("unbalanced email brackets"));
        }
        let name = raw[..open].trim().to_string();
        let email = raw[open + 1..close].to_string();

        let mut tail = raw[close + 1..].split_whitespace();
        let (Some(epoch), Some(zone), None) = (tail.next(), tail.next(), tail.next()) else {
            return Err(malformed("expected '<epoch> <offset>' after the email"));
        };
        let epoch: i64 = epoch.parse().map_err(|_| malformed("invalid epoch"))?;
        let offset = parse_offset(zone).ok_or_else(|| malformed("invalid zone offset"))?;
        let when = DateTime::from_timestamp(epoch, 0)
            .ok_or_else(|| malformed("epoch out of range"))?
            .with_timezone(&offset);

        Ok(Self { name, email, when })
    }

    /// Timestamp as `yyyy-MM-dd HH:mm:ss XXX`, where a zero offset is `Z`.
    pub fn formatted_time(&self) -> String {
        let zone = if self.when.offset().local_minus_utc() == 0 {
            "Z".to_string()
        } else {
            self.when.format("%:z").to_string()
        };
        format!("{} {}", self.when.format("%Y-%m-%d %H:%M:%S"), zone)
    }

    /// `<name> <email> <label> timestamp: <time>`. An empty name is left out.
    pub fn normalized(&self, role: SignatureRole) -> String {
        let who = if self.name.is_empty() {
            self.email.clone()
        } else {
            format!("{} {}", self.name, self.email)
        };
        format!("{who} {} timestamp: {}", role.label(), self.formatted_time())
    }
}

fn parse_offset(token: &str) -> Option<FixedOffset> {
    let (sign, digits) = match token.as_bytes().first().copied()? {
        b'+' => (1, &token[1..]),
        b'-' => (-1, &token[1..]),
        _ => return None,
    };
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// A decoded commit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub tree: ObjectHash,
    /// Parents in the order their lines appear.
    pub parents: Vec<ObjectHash>,
    pub author: Option<Signature>,
    pub committer: Option<Signature>,
    /// Message lines, trimmed, without a trailing newline.
    pub message: String,
}

impl Commit {
    /// Decode a commit payload.
    ///
    /// Lines are trimmed and blank lines dropped. Each remaining line is
    /// classified by its leading token; unrecognized ones become message
    /// lines.
    pub fn decode(payload: &str) -> StoreResult<Self> {
        let mut tree = None;
        let mut parents = Vec::new();
        let mut author = None;
        let mut committer = None;
        let mut message: Vec<&str> = Vec::new();

        for line in payload.split('\n').map(str::trim).filter(|l| !l.is_empty()) {
            let (token, rest) = line.split_once(' ').unwrap_or((line, ""));
            match token {
                "tree" => {
                    if tree.is_some() {
                        return Err(StoreError::MalformedCommit(
                            "more than one tree line".into(),
                        ));
                    }
                    tree = Some(parse_hash("tree", rest)?);
                }
                "parent" => parents.push(parse_hash("parent", rest)?),
                "author" => author = Some(Signature::parse(rest)?),
                "committer" => committer = Some(Signature::parse(rest)?),
                _ => message.push(line),
            }
        }

        let tree = tree.ok_or_else(|| StoreError::MalformedCommit("missing tree line".into()))?;
        Ok(Self {
            tree,
            parents,
            author,
            committer,
            message: message.join("\n"),
        })
    }

    /// Normalized author string, empty if the commit has no author line.
    pub fn author_line(&self) -> String {
        self.author
            .as_ref()
            .map(|s| s.normalized(SignatureRole::Author))
            .unwrap_or_default()
    }

    /// Normalized committer string, empty if the commit has no committer line.
    pub fn committer_line(&self) -> String {
        self.committer
            .as_ref()
            .map(|s| s.normalized(SignatureRole::Committer))
            .unwrap_or_default()
    }

    /// Returns `true` if the commit has more than one parent.
    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }
}

fn parse_hash(field: &str, text: &str) -> StoreResult<ObjectHash> {
    ObjectHash::from_hex(text.trim())
        .map_err(|e| StoreError::MalformedCommit(format!("bad {field} hash: {e}")))
}

impl fmt::Display for Commit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "tree: {}", self.tree)?;
        if !self.parents.is_empty() {
            let parents: Vec<String> = self.parents.iter().map(|p| p.to_hex()).collect();
            writeln!(f, "parents: {}", parents.join(" | "))?;
        }
        writeln!(f, "author: {}", self.author_line())?;
        writeln!(f, "committer: {}", self.committer_line())?;
        writeln!(f, "commit message:")?;
        write!(f, "{}", self.message)
    }
}
