//! Command Replies
//!
//! A successful command produces a single plain-text line:
//!
//! ```text
//! <key>=<value> (reads=<r>, writes=<w>)
//! ```
//!
//! Writes wrap the same line in a highlighted `SET` marker so a browser
//! front-end can tell them apart from reads.

use crate::storage::StatEntry;
use std::fmt;

/// The outcome of a successful GET or SET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Result of `$get`
    Read {
        key: String,
        value: String,
        stats: StatEntry,
    },
    /// Result of `$set`
    Write {
        key: String,
        value: String,
        stats: StatEntry,
    },
}

impl Reply {
    /// Key the command addressed.
    pub fn key(&self) -> &str {
        match self {
            Reply::Read { key, .. } | Reply::Write { key, .. } => key,
        }
    }

    /// Value read or written; empty for a key that was never set.
    pub fn value(&self) -> &str {
        match self {
            Reply::Read { value, .. } | Reply::Write { value, .. } => value,
        }
    }

    /// Counters as they were right after this command's increment.
    pub fn stats(&self) -> StatEntry {
        match self {
            Reply::Read { stats, .. } | Reply::Write { stats, .. } => *stats,
        }
    }

    /// Returns true for replies to `$set`.
    pub fn is_write(&self) -> bool {
        matches!(self, Reply::Write { .. })
    }

    /// The `<key>=<value> (reads=<r>, writes=<w>)` line, without markup.
    pub fn line(&self) -> String {
        let stats = self.stats();
        format!(
            "{}={} (reads={}, writes={})",
            self.key(),
            self.value(),
            stats.reads,
            stats.writes
        )
    }

    /// The response body sent to the client.
    pub fn body(&self) -> String {
        match self {
            Reply::Read { .. } => self.line(),
            Reply::Write { .. } => {
                format!("<span style='background:#fdd'>SET {}</span>", self.line())
            }
        }
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.body())
    }
}
