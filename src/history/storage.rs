//! Persistent storage for search history.
//!
//! Search history survives app restarts through a small durable key-value
//! store. The engine serializes the history as a JSON array under a single
//! well-known key; the [`FileStore`] implementation keeps one file per key
//! under the user's config directory and replaces it atomically on write.
//!
//! Persistence is strictly best-effort: a failed read starts the session
//! with an empty history, a failed write keeps the in-memory history, and
//! neither ever blocks or fails a search.

use super::models::{SearchHistory, SearchHistoryEntry};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

/// Well-known key the search history is persisted under.
pub const HISTORY_STORAGE_KEY: &str = "lostfound.searchHistory";

/// Errors that can occur during history persistence.
#[derive(Debug)]
pub enum StorageError {
    /// Error reading from or writing to the underlying store.
    Io(std::io::Error),

    /// Persisted data could not be serialized or deserialized.
    Serialization(serde_json::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(err) => write!(f, "History storage error: {}", err),
            StorageError::Serialization(err) => {
                write!(f, "History serialization error: {}", err)
            }
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(err) => Some(err),
            StorageError::Serialization(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err)
    }
}

/// A durable string-to-string store.
///
/// The engine only ever uses `HISTORY_STORAGE_KEY`, but the trait is keyed
/// so one store can back several engine instances (or future preferences).
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`, or `None` if absent.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes `value` under `key`, replacing any prior value.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes the value under `key`. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// File-backed key-value store under the user's config directory.
///
/// Each key maps to `<root>/<sanitized-key>.json`. Writes go to a temporary
/// file first and are renamed into place, so a crash mid-write never leaves
/// a truncated value behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at the default config location.
    ///
    /// Resolves to `~/.config/lostfound` on Unix-like systems or the
    /// roaming AppData equivalent on Windows.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if no home directory can be determined.
    pub fn new() -> Result<Self, StorageError> {
        let config_dir = if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home).join(".config")
        } else if let Some(user_profile) = std::env::var_os("USERPROFILE") {
            PathBuf::from(user_profile).join("AppData").join("Roaming")
        } else {
            return Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine home directory",
            )));
        };

        Ok(Self {
            root: config_dir.join("lostfound"),
        })
    }

    /// Creates a store rooted at an explicit directory.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        // Keys may contain dots and other separators; keep the file name flat.
        let sanitized: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            })
            .collect();
        self.root.join(format!("{}.json", sanitized))
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
        }

        let path = self.key_path(key);
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, value)?;

        // Atomically replace the old value with the new one
        fs::rename(&temp_path, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

/// Purely in-memory key-value store for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

/// Loads the persisted search history from the store.
///
/// A missing value yields an empty history. Entries are re-validated on
/// load, so data written by an older version with different invariants is
/// normalized rather than rejected.
///
/// # Errors
///
/// Returns `StorageError` if the store read fails or the persisted value is
/// not valid JSON; callers are expected to fall back to an empty history.
pub fn load_history(
    store: &dyn KeyValueStore,
    key: &str,
    max_entries: usize,
) -> Result<SearchHistory, StorageError> {
    match store.read(key)? {
        None => Ok(SearchHistory::with_max_entries(max_entries)),
        Some(raw) => {
            let entries: Vec<SearchHistoryEntry> = serde_json::from_str(&raw)?;
            Ok(SearchHistory::from_entries(entries, max_entries))
        }
    }
}

/// Persists the search history, replacing any prior value.
pub fn save_history(
    store: &dyn KeyValueStore,
    key: &str,
    history: &SearchHistory,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(history.entries())?;
    store.write(key, &json)
}

/// Removes the persisted search history entirely.
pub fn clear_history(store: &dyn KeyValueStore, key: &str) -> Result<(), StorageError> {
    store.remove(key)
}
