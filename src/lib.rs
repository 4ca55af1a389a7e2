//! Search and filter engine for the campus lost & found app.
//!
//! The mobile app is a thin GUI over a hosted backend; the one piece of
//! client logic with real ordering semantics is the home screen's item
//! search, and that is what this crate implements: an engine owning the
//! active tab, the fetched item listing, a debounced free-text query, and a
//! small persisted history of successful searches.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - **models**: Item document types shared with the backend
//! - **repository**: The async listing seam (`get_all` / `get_by_type`) and
//!   an in-memory implementation with the backend's query semantics
//! - **engine**: The search engine itself: tab switching with stale-fetch
//!   discard, trailing-edge debounced matching, and history bookkeeping
//! - **history**: The bounded, deduplicated search history and its durable
//!   key-value storage
//! - **config**: User-tunable settings (debounce window, history cap) with
//!   a global singleton accessor
//!
//! # Behavior highlights
//!
//! - Matching is case-insensitive substring containment over title,
//!   category, location and description; absent fields compare as empty.
//!   Result order is the repository's order; there is no ranking.
//! - A fetch response arriving after a newer fetch was issued is discarded,
//!   so switching tabs quickly can never leave stale items on screen.
//! - Only queries with at least one result enter the history; the history
//!   holds at most five case-insensitively distinct queries, newest first.
//! - Repository and storage failures are non-fatal: the engine keeps its
//!   last-good state and reports the failure as an event or a stderr
//!   warning.
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use lostfound_search::engine::{SearchEngine, SearchTab};
//! use lostfound_search::history::FileStore;
//! use lostfound_search::repository::InMemoryItemRepository;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let repository = Arc::new(InMemoryItemRepository::new());
//! let store = Arc::new(FileStore::new()?);
//! let engine = SearchEngine::new(repository, store);
//!
//! // Tab switch kicks off a background fetch
//! engine.set_active_tab(SearchTab::Recent).await?;
//!
//! // Keystrokes update the field synchronously; the match is debounced
//! engine.set_query("blue backpack");
//!
//! // The rendering surface binds to the snapshot
//! let snapshot = engine.snapshot();
//! println!("{} items shown", snapshot.displayed_items.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod engine;
pub mod history;
pub mod models;
pub mod repository;

// Re-export the types most callers need
pub use config::{get_config, load_config, SearchConfig};
pub use engine::{EngineEvent, EngineSnapshot, SearchEngine, SearchTab};
pub use history::{
    FileStore, KeyValueStore, MemoryStore, SearchHistory, SearchHistoryEntry, StorageError,
    HISTORY_STORAGE_KEY, MAX_HISTORY_ENTRIES,
};
pub use models::{Item, ItemStatus, ItemType};
pub use repository::{InMemoryItemRepository, ItemRepository, RepositoryError};
