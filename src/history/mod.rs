//! Search history tracking and persistence.
//!
//! This module provides the bounded, deduplicated record of past successful
//! searches and its durable storage, allowing users to quickly re-run a
//! recent query.
//!
//! # Features
//!
//! - At most five remembered queries, most recent first
//! - Case-insensitive deduplication (newest casing wins)
//! - Only match-producing queries are remembered
//! - Persisted as JSON under a single well-known key
//! - Best-effort persistence: storage failures never block searching
//!
//! # Example
//!
//! ```
//! use lostfound_search::history::{SearchHistory, storage};
//! use lostfound_search::history::storage::{MemoryStore, HISTORY_STORAGE_KEY};
//!
//! let store = MemoryStore::new();
//! let mut history = SearchHistory::new();
//! history.commit("blue backpack");
//! storage::save_history(&store, HISTORY_STORAGE_KEY, &history).unwrap();
//!
//! let restored = storage::load_history(&store, HISTORY_STORAGE_KEY, 5).unwrap();
//! assert_eq!(restored.entries()[0].query, "blue backpack");
//! ```

pub mod models;
pub mod storage;

// Re-export commonly used types
pub use models::{SearchHistory, SearchHistoryEntry, MAX_HISTORY_ENTRIES};
pub use storage::{
    clear_history, load_history, save_history, FileStore, KeyValueStore, MemoryStore,
    StorageError, HISTORY_STORAGE_KEY,
};
