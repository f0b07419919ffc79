//! Storage Module
//!
//! This module holds the two tables behind every command:
//!
//! - [`ConfigStore`]: the persistent key/value table, one flat `[main]`
//!   section of an INI file next to the executable
//! - [`Stats`]: per-key read/write counters, kept in memory only
//!
//! Neither table locks on its own. The command service owns both behind a
//! single mutex so a value and its counters are always observed together.
//!
//! ## Example
//!
//! ```
//! use getset::storage::{ConfigStore, Stats};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let path = dir.path().join("config.txt");
//! std::fs::write(&path, "[main]\nname=Ariz\n").unwrap();
//!
//! let store = ConfigStore::load(&path).unwrap();
//! assert_eq!(store.get("name").as_deref(), Some("Ariz"));
//!
//! let mut stats = Stats::new();
//! assert_eq!(stats.record_read("name").reads, 1);
//! ```

pub mod config_store;
pub mod stats;

// Re-export commonly used types
pub use config_store::{ConfigStore, StoreError};
pub use stats::{StatEntry, Stats};
