//! Per-Key Access Statistics
//!
//! Every GET and SET bumps a counter for the key it touches. Entries are
//! created lazily on first access, so a key can have statistics before it
//! ever holds a value, and they are never removed.
//!
//! The table itself has no lock: it lives next to the [`ConfigStore`]
//! inside the command service's single critical section, so a value and
//! its counters always change together.
//!
//! [`ConfigStore`]: crate::storage::ConfigStore

use std::collections::HashMap;

/// Read/write counters for one key.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StatEntry {
    /// Number of `$get` commands issued for the key
    pub reads: u64,
    /// Number of `$set` commands issued for the key
    pub writes: u64,
}

/// Statistics for all keys seen since startup.
#[derive(Debug, Default)]
pub struct Stats {
    entries: HashMap<String, StatEntry>,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts a read and returns the updated entry.
    pub fn record_read(&mut self, key: &str) -> StatEntry {
        let entry = self.entry(key);
        entry.reads += 1;
        *entry
    }

    /// Counts a write and returns the updated entry.
    pub fn record_write(&mut self, key: &str) -> StatEntry {
        let entry = self.entry(key);
        entry.writes += 1;
        *entry
    }

    /// Returns the counters for a key, `(0, 0)` if it was never touched.
    pub fn get(&self, key: &str) -> StatEntry {
        self.entries.get(key).copied().unwrap_or_default()
    }

    /// Number of keys with statistics.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&mut self, key: &str) -> &mut StatEntry {
        self.entries.entry(key.to_string()).or_default()
    }
}
