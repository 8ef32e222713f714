//! Client-side persistence.
//!
//! Two stores make up the only state this client keeps on disk or in
//! memory across calls:
//!
//! - a durable store holding the remembered shopper (`user_id`,
//!   `username` as plain strings), surviving restarts;
//! - a session-scoped store holding the encoded admin credential, living
//!   only as long as the process.
//!
//! Both are plain string key-value maps behind the same trait so the
//! gateway and the session bootstrapper stay storage-agnostic. Persistence
//! failures are logged and swallowed: losing a remembered identity is
//! recoverable (bootstrap re-provisions), so it must never take the
//! application down.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::warn;

/// A string key-value store.
pub trait KeyValueStore: Send + Sync {
    /// Read a value.
    fn get(&self, key: &str) -> Option<String>;
    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str);
    /// Remove a value if present.
    fn remove(&self, key: &str);
}

/// Process-lifetime store; the session-scoped half of client persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

/// File-backed store; the durable half of client persistence.
///
/// The file is a single JSON object of string entries, created on first
/// write. Reads are served from memory; every mutation writes through.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Open a store at `path`, loading existing entries if the file is
    /// present and readable. An unreadable or malformed file is treated as
    /// empty (and logged): a corrupt remembered identity is equivalent to a
    /// stale one.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = Self::load(&path);
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    fn load(path: &Path) -> BTreeMap<String, String> {
        match std::fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(error) => {
                    warn!(path = %path.display(), %error, "Discarding malformed profile store");
                    BTreeMap::new()
                }
            },
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(error) => {
                warn!(path = %path.display(), %error, "Failed to read profile store");
                BTreeMap::new()
            }
        }
    }

    fn persist(&self, entries: &BTreeMap<String, String>) {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(error) = std::fs::create_dir_all(parent)
        {
            warn!(path = %self.path.display(), %error, "Failed to create profile store directory");
            return;
        }

        let serialized = match serde_json::to_string_pretty(entries) {
            Ok(serialized) => serialized,
            Err(error) => {
                warn!(path = %self.path.display(), %error, "Failed to serialize profile store");
                return;
            }
        };

        if let Err(error) = std::fs::write(&self.path, serialized) {
            warn!(path = %self.path.display(), %error, "Failed to write profile store");
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_owned(), value.to_owned());
        self.persist(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if entries.remove(key).is_some() {
            self.persist(&entries);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "plumcot-storage-{name}-{}.json",
            std::process::id()
        ))
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("user_id"), None);

        store.set("user_id", "42");
        assert_eq!(store.get("user_id"), Some("42".to_owned()));

        store.set("user_id", "43");
        assert_eq!(store.get("user_id"), Some("43".to_owned()));

        store.remove("user_id");
        assert_eq!(store.get("user_id"), None);
    }

    #[test]
    fn test_file_store_round_trip() {
        let path = scratch_path("round-trip");
        let _ = std::fs::remove_file(&path);

        let store = JsonFileStore::open(&path);
        store.set("user_id", "7");
        store.set("username", "mara");

        // A fresh handle sees what the first one persisted.
        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.get("user_id"), Some("7".to_owned()));
        assert_eq!(reopened.get("username"), Some("mara".to_owned()));

        reopened.remove("user_id");
        let reopened_again = JsonFileStore::open(&path);
        assert_eq!(reopened_again.get("user_id"), None);
        assert_eq!(reopened_again.get("username"), Some("mara".to_owned()));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_file_store_tolerates_malformed_file() {
        let path = scratch_path("malformed");
        std::fs::write(&path, "not json").expect("scratch file is writable");

        let store = JsonFileStore::open(&path);
        assert_eq!(store.get("user_id"), None);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let path = scratch_path("missing");
        let _ = std::fs::remove_file(&path);

        let store = JsonFileStore::open(&path);
        assert_eq!(store.get("anything"), None);
    }
}
