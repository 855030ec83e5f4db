//! Core reference types.

use gitint_types::ObjectHash;
use serde::{Deserialize, Serialize};

/// Prefix of a symbolic HEAD's content.
const SYMBOLIC_PREFIX: &str = "ref:";

/// Namespace holding branch refs.
pub const HEADS_PREFIX: &str = "refs/heads/";

/// A branch and the commit at its tip.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    /// Short branch name (e.g. "main", "feature/auth").
    pub name: String,
    /// Hash of the commit at the tip of this branch.
    pub tip: ObjectHash,
}

impl Branch {
    /// Returns the canonical name for this branch (e.g. "refs/heads/main").
    pub fn canonical_name(&self) -> String {
        format!("{HEADS_PREFIX}{}", self.name)
    }
}

/// The state of HEAD: either symbolic (pointing to a branch) or detached.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Head {
    /// HEAD points to a branch by name.
    Symbolic(String),
    /// HEAD is detached, pointing directly to a commit.
    Detached(ObjectHash),
}

impl Head {
    /// Interpret the content of a HEAD file.
    ///
    /// `ref: refs/heads/<name>` yields the branch name. A symbolic ref
    /// outside `refs/heads/` yields its last path segment. A bare hash is a
    /// detached HEAD.
    pub fn parse(content: &str) -> Self {
        let content = content.trim();
        if let Some(target) = content.strip_prefix(SYMBOLIC_PREFIX) {
            let target = target.trim();
            let name = target
                .strip_prefix(HEADS_PREFIX)
                .unwrap_or_else(|| target.rsplit('/').next().unwrap_or(target));
            return Self::Symbolic(name.to_string());
        }
        match ObjectHash::from_hex(content) {
            Ok(hash) => Self::Detached(hash),
            Err(_) => Self::Symbolic(content.rsplit('/').next().unwrap_or(content).to_string()),
        }
    }

    /// The branch HEAD names, if it is symbolic.
    pub fn branch(&self) -> Option<&str> {
        match self {
            Self::Symbolic(name) => Some(name),
            Self::Detached(_) => None,
        }
    }
}
