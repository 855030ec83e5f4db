//! Breadth-first commit history walk.
//!
//! The walk keeps a FIFO worklist of `(hash, primary)` pairs seeded with the
//! starting commit. Dequeuing a primary commit enqueues its parents: for a
//! two-parent merge the second parent goes in first, flagged as merged, then
//! the first parent as primary; any other parent count enqueues every parent
//! as primary. Merged commits are reported but not expanded.
//!
//! There is no visited set. A commit reachable along several primary paths
//! is reported once per path.

use std::collections::VecDeque;

use gitint_store::{Commit, ObjectStore};
use gitint_types::ObjectHash;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{WalkError, WalkResult};

/// One commit produced by the history walk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub hash: ObjectHash,
    /// `true` when this commit was reached as the second parent of a merge.
    pub merged: bool,
    pub commit: Commit,
}

impl LogEntry {
    /// `Commit: <hash>[ (merged)]`, the committer line, then the message.
    ///
    /// Ends with a newline; an empty message adds no line.
    pub fn render(&self) -> String {
        let suffix = if self.merged { " (merged)" } else { "" };
        let mut out = format!(
            "Commit: {}{}\n{}\n",
            self.hash,
            suffix,
            self.commit.committer_line()
        );
        if !self.commit.message.is_empty() {
            out.push_str(&self.commit.message);
            out.push('\n');
        }
        out
    }
}

/// Iterator over the history reachable from a commit.
///
/// Yields entries in dequeue order. The first read failure is yielded as an
/// error and ends the walk.
pub struct HistoryWalker<'a> {
    store: &'a dyn ObjectStore,
    queue: VecDeque<(ObjectHash, bool)>,
}

impl<'a> HistoryWalker<'a> {
    /// Start a walk at `start`, which counts as primary ancestry.
    pub fn new(store: &'a dyn ObjectStore, start: ObjectHash) -> Self {
        Self {
            store,
            queue: VecDeque::from([(start, true)]),
        }
    }

    /// Number of commits waiting in the worklist.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    fn enqueue_parents(&mut self, commit: &Commit) {
        match commit.parents.as_slice() {
            [first, second] => {
                self.queue.push_back((*second, false));
                self.queue.push_back((*first, true));
            }
            parents => {
                self.queue.extend(parents.iter().map(|p| (*p, true)));
            }
        }
    }
}

impl Iterator for HistoryWalker<'_> {
    type Item = WalkResult<LogEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        let (hash, primary) = self.queue.pop_front()?;
        let commit = match self.store.read_commit(&hash) {
            Ok(commit) => commit,
            Err(source) => {
                self.queue.clear();
                return Some(Err(WalkError::Commit { hash, source }));
            }
        };
        if primary {
            self.enqueue_parents(&commit);
        }
        debug!(
            commit = %hash.short_hex(),
            merged = !primary,
            parents = commit.parents.len(),
            pending = self.queue.len(),
            "history step"
        );
        Some(Ok(LogEntry {
            hash,
            merged: !primary,
            commit,
        }))
    }
}
