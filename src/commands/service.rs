//! Command Service
//!
//! Executes parsed commands against the shared tables and builds replies.
//!
//! ## Concurrency
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               CommandService                │
//! │                                             │
//! │   Mutex<Tables>                             │
//! │   ┌───────────────┐   ┌───────────────┐     │
//! │   │  ConfigStore  │   │     Stats     │     │
//! │   │  (INI file)   │   │ (reads/writes)│     │
//! │   └───────────────┘   └───────────────┘     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! One lock covers both tables, so a reply never pairs a value with
//! counters from a different moment. A SET rewrites the backing file while
//! holding the lock, which serializes every other command behind that write.

use crate::commands::CommandError;
use crate::config::Paths;
use crate::protocol::{check_entry, parse_command, Command, Reply};
use crate::storage::{ConfigStore, StatEntry, Stats, StoreError};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info};

/// Name of the form field carrying the command text.
pub const COMMAND_FIELD: &str = "command";

/// Everything mutated by a command, guarded as one unit.
#[derive(Debug)]
struct Tables {
    store: ConfigStore,
    stats: Stats,
}

/// Parses and executes commands against the persistent store.
///
/// Designed to be wrapped in an `Arc` and shared by all request handlers.
#[derive(Debug)]
pub struct CommandService {
    tables: Mutex<Tables>,
}

impl CommandService {
    /// Creates a service over an already loaded store.
    pub fn new(store: ConfigStore) -> Self {
        Self {
            tables: Mutex::new(Tables {
                store,
                stats: Stats::new(),
            }),
        }
    }

    /// Loads the backing file named by `paths`.
    ///
    /// A load failure is fatal: the server cannot run without its store.
    pub fn initialize(paths: &Paths) -> Result<Self, StoreError> {
        let store = ConfigStore::load(&paths.config_file)?;
        info!(
            path = %store.path().display(),
            keys = store.len(),
            "Command service initialized"
        );
        Ok(Self::new(store))
    }

    /// `GET /command` is never a valid way to issue a command.
    pub fn handle_get(&self) -> Result<Reply, CommandError> {
        Err(CommandError::UsePost)
    }

    /// Handles the decoded form fields of `POST /command`.
    pub fn handle_post(&self, params: &HashMap<String, String>) -> Result<Reply, CommandError> {
        match params.get(COMMAND_FIELD) {
            Some(text) => self.dispatch(text),
            None => Err(CommandError::MissingCommand),
        }
    }

    /// Parses `text` and runs the resulting command.
    pub fn dispatch(&self, text: &str) -> Result<Reply, CommandError> {
        match parse_command(text)? {
            Command::Get { key } => Ok(self.get(&key)),
            Command::Set { key, value } => self.set(&key, &value),
        }
    }

    /// Reads `key` (empty if absent) and counts the read.
    pub fn get(&self, key: &str) -> Reply {
        let mut tables = self.lock();

        let value = tables.store.get(key).unwrap_or_default();
        let stats = tables.stats.record_read(key);
        drop(tables);

        debug!(key, reads = stats.reads, writes = stats.writes, "GET");
        Reply::Read {
            key: key.to_string(),
            value,
            stats,
        }
    }

    /// Stores `value` under `key`, persists the store and counts the write.
    ///
    /// Entries the backing file cannot hold are rejected before anything
    /// changes. If persisting fails the in-memory value and the write
    /// counter keep the update and [`CommandError::Persist`] is returned.
    pub fn set(&self, key: &str, value: &str) -> Result<Reply, CommandError> {
        check_entry(key, value)?;
        let mut tables = self.lock();

        tables.store.set(key, value);
        let saved = tables.store.save();
        let stats = tables.stats.record_write(key);
        drop(tables);

        if let Err(source) = saved {
            error!(key, error = %source, "Failed to persist SET");
            return Err(CommandError::Persist(source));
        }

        debug!(key, reads = stats.reads, writes = stats.writes, "SET");
        Ok(Reply::Write {
            key: key.to_string(),
            value: value.to_string(),
            stats,
        })
    }

    /// Current counters for `key` without touching them.
    pub fn snapshot(&self, key: &str) -> StatEntry {
        self.lock().stats.get(key)
    }

    /// Number of keys currently in the store.
    pub fn len(&self) -> usize {
        self.lock().store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        // No critical section can panic halfway through an update.
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn create_service() -> (TempDir, CommandService) {
        let dir = TempDir::new().unwrap();
        let paths = Paths::new(dir.path());
        std::fs::write(&paths.config_file, "").unwrap();
        let service = CommandService::initialize(&paths).unwrap();
        (dir, service)
    }

    fn form(command: &str) -> HashMap<String, String> {
        HashMap::from([(COMMAND_FIELD.to_string(), command.to_string())])
    }

    #[test]
    fn test_initialize_missing_file_is_fatal() {
        let dir = TempDir::new().unwrap();
        let err = CommandService::initialize(&Paths::new(dir.path())).unwrap_err();
        assert!(matches!(err, StoreError::Load { .. }));
    }

    #[test]
    fn test_get_unknown_key() {
        let (_dir, service) = create_service();

        for expected_reads in 1..=3 {
            let reply = service.dispatch("$get nothing").unwrap();
            assert_eq!(
                reply.body(),
                format!("nothing= (reads={expected_reads}, writes=0)")
            );
        }
        assert_eq!(service.snapshot("nothing"), StatEntry { reads: 3, writes: 0 });
        assert!(service.is_empty());
    }

    #[test]
    fn test_scenario() {
        let (_dir, service) = create_service();

        let reply = service.handle_post(&form("$set a=1")).unwrap();
        assert!(reply.is_write());
        assert_eq!(reply.line(), "a=1 (reads=0, writes=1)");

        let reply = service.handle_post(&form("$get a")).unwrap();
        assert_eq!(reply.body(), "a=1 (reads=1, writes=1)");

        let reply = service.handle_post(&form("$set a=2")).unwrap();
        assert_eq!(reply.line(), "a=2 (reads=1, writes=2)");

        let err = service.handle_post(&form("$bogus")).unwrap_err();
        assert!(err.to_string().contains("$bogus"));

        assert!(matches!(service.handle_get(), Err(CommandError::UsePost)));
    }

    #[test]
    fn test_missing_command_field() {
        let (_dir, service) = create_service();
        let err = service.handle_post(&HashMap::new()).unwrap_err();
        assert!(matches!(err, CommandError::MissingCommand));
        assert_eq!(err.to_string(), "No command POSTed");
    }

    #[test]
    fn test_set_without_equals() {
        let (_dir, service) = create_service();
        let err = service.dispatch("$set novalue").unwrap_err();
        assert_eq!(err.to_string(), "Failed to parse SET params: novalue");
        assert_eq!(service.snapshot("novalue"), StatEntry::default());
    }

    #[test]
    fn test_repeated_set() {
        let (_dir, service) = create_service();
        for n in 1..=5 {
            let reply = service.dispatch("$set k=v").unwrap();
            assert_eq!(reply.stats(), StatEntry { reads: 0, writes: n });
            assert_eq!(reply.value(), "v");
        }
        assert_eq!(service.get("k").value(), "v");
    }

    #[test]
    fn test_set_persists_to_disk() {
        let (dir, service) = create_service();
        service.dispatch("$set name=Ariz").unwrap();
        service.dispatch("$set expr=a=b").unwrap();

        service.dispatch("$set empty=").unwrap();
        service.dispatch("$set #hash=a;b # c").unwrap();
        service.dispatch("$set ;semi=[x]").unwrap();
        service.dispatch("$set in ner=two  words").unwrap();

        let restarted = CommandService::initialize(&Paths::new(dir.path())).unwrap();
        assert_eq!(restarted.len(), 6);
        assert_eq!(restarted.get("name").value(), "Ariz");
        assert_eq!(restarted.get("expr").value(), "a=b");
        assert_eq!(restarted.get("empty").value(), "");
        assert_eq!(restarted.get("#hash").value(), "a;b # c");
        assert_eq!(restarted.get(";semi").value(), "[x]");
        assert_eq!(restarted.get("in ner").value(), "two  words");
        // Statistics are not persisted
        assert_eq!(restarted.snapshot("name"), StatEntry { reads: 1, writes: 0 });
    }

    #[test]
    fn test_unstorable_sets_are_rejected_and_restart_succeeds() {
        let (dir, service) = create_service();
        service.dispatch("$set keep=1").unwrap();

        for text in [
            "$set =x",
            "$set [x]=2",
            "$set  lead=1",
            "$set trail =1",
            "$set nl=x\n=boom",
            "$set cr=x\r\n[other]",
            "$set pad= x ",
        ] {
            let err = service.dispatch(text).unwrap_err();
            assert!(matches!(err, CommandError::Parse(_)), "{text:?}");
            assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
        }
        for i in 0..20 {
            service.dispatch(&format!("$set k{i}=v{i}")).unwrap();
        }
        assert_eq!(service.len(), 21);

        let restarted = CommandService::initialize(&Paths::new(dir.path())).unwrap();
        assert_eq!(restarted.len(), 21);
        assert_eq!(restarted.get("keep").value(), "1");
        for i in 0..20 {
            assert_eq!(restarted.get(&format!("k{i}")).value(), format!("v{i}"));
        }
    }

    #[test]
    fn test_direct_set_checks_entry() {
        let (_dir, service) = create_service();
        let err = service.set("[main", "x").unwrap_err();
        assert!(matches!(err, CommandError::Parse(_)));
        assert_eq!(service.snapshot("[main"), StatEntry::default());
        assert!(service.is_empty());
    }

    #[test]
    fn test_persist_failure_keeps_memory_update() {
        let (dir, service) = create_service();
        drop(dir);

        let err = service.dispatch("$set a=1").unwrap_err();
        assert!(matches!(err, CommandError::Persist(_)));

        let reply = service.get("a");
        assert_eq!(reply.body(), "a=1 (reads=1, writes=1)");
    }

    #[test]
    fn test_concurrent_sets_on_different_keys() {
        let (_dir, service) = create_service();
        let service = Arc::new(service);

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let service = Arc::clone(&service);
                std::thread::spawn(move || {
                    for i in 1..=25u64 {
                        let reply = service.dispatch(&format!("$set key{t}=v{i}")).unwrap();
                        assert_eq!(reply.stats().writes, i);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(service.len(), 8);
        for t in 0..8 {
            assert_eq!(service.snapshot(&format!("key{t}")).writes, 25);
            assert_eq!(service.get(&format!("key{t}")).value(), "v25");
        }
    }

    #[test]
    fn test_concurrent_sets_on_same_key_are_serialized() {
        let (_dir, service) = create_service();
        let service = Arc::new(service);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let service = Arc::clone(&service);
                std::thread::spawn(move || {
                    (0..20)
                        .map(|_| service.dispatch("$set shared=x").unwrap().stats().writes)
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut seen: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, (1..=80u64).collect::<Vec<_>>());
    }
}
