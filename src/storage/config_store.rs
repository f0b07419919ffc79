//! INI-Backed Persistent Key/Value Store
//!
//! All keys live in a single `[main]` section of an INI-style file. The file
//! is read once at startup and rewritten in full on every write.
//!
//! ## File Format
//!
//! ```text
//! [main]
//! name=Ariz
//! url=http://example.com/?a=b
//! ```
//!
//! Parsing and serialization are delegated to the `configparser` crate. It is
//! configured case-sensitive, with `=` as the only delimiter and no comment
//! symbols, so `:`, `#` and `;` survive a round trip in keys and values.
//!
//! The format cannot hold every string. An empty key, a key starting with
//! `[`, surrounding whitespace and line breaks all read back differently;
//! callers reject such entries before [`ConfigStore::set`].
//!
//! ## Durability
//!
//! [`ConfigStore::save`] writes the serialized store to a temporary file in
//! the same directory, syncs it and renames it over the backing file, so a
//! crash mid-write leaves either the old or the new contents on disk.

use configparser::ini::Ini;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, trace};

/// The single section every key is stored under.
const SECTION: &str = "main";

/// Errors raised by the persistent store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file could not be read or parsed at startup
    #[error("Failed to read {}: {reason}", path.display())]
    Load { path: PathBuf, reason: String },

    /// The backing file could not be rewritten after a SET
    #[error("Failed to save {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A flat string-to-string table persisted to an INI file.
///
/// Not synchronized on its own; callers wrap it in a lock together with
/// whatever else must change atomically with it.
pub struct ConfigStore {
    ini: Ini,
    path: PathBuf,
}

impl std::fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStore")
            .field("path", &self.path)
            .field("keys", &self.len())
            .finish()
    }
}

impl ConfigStore {
    /// Loads the store from `path`.
    ///
    /// The file must exist; a missing or unreadable file is an error.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let mut ini = new_ini();

        ini.load(&path).map_err(|reason| StoreError::Load {
            path: path.clone(),
            reason,
        })?;

        let store = Self { ini, path };
        debug!(path = %store.path.display(), keys = store.len(), "Config store loaded");
        Ok(store)
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<String> {
        self.ini.get(SECTION, key)
    }

    /// Stores `value` under `key` in memory. Call [`save`](Self::save) to persist.
    ///
    /// The entry must be representable in the file format (see the module
    /// docs); otherwise it will not read back unchanged after a reload.
    pub fn set(&mut self, key: &str, value: &str) {
        self.ini.set(SECTION, key, Some(value.to_string()));
    }

    /// Rewrites the whole backing file from the in-memory table.
    pub fn save(&self) -> Result<(), StoreError> {
        let contents = self.ini.writes();
        let save_err = |source: std::io::Error| StoreError::Save {
            path: self.path.clone(),
            source,
        };

        // Dropping `temp` on an early return deletes it.
        let mut temp = NamedTempFile::new_in(self.dir()).map_err(save_err)?;
        temp.write_all(contents.as_bytes()).map_err(save_err)?;
        temp.as_file().sync_all().map_err(save_err)?;
        temp.persist(&self.path).map_err(|err| save_err(err.error))?;

        trace!(path = %self.path.display(), "Config store saved");
        Ok(())
    }

    /// Number of keys in the store.
    pub fn len(&self) -> usize {
        self.ini
            .get_map_ref()
            .get(SECTION)
            .map(|section| section.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }
}

fn new_ini() -> Ini {
    let mut defaults = Ini::new_cs().defaults();
    defaults.delimiters = vec!['='];
    defaults.comment_symbols = Vec::new();
    Ini::new_from_defaults(defaults)
}
