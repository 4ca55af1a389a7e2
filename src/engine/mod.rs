//! The item search and filter engine.
//!
//! This module owns the state behind the home screen's search experience:
//! the active tab, the item listing last fetched for it, the current query,
//! the filtered result list, and the persisted search history.
//!
//! # Ordering guarantees
//!
//! - Fetches are stamped with a monotonically increasing sequence number at
//!   issue time; a response that completes after a newer fetch was issued is
//!   discarded, so stale data never overwrites fresh data.
//! - Match runs are debounced with a trailing-edge quiet period; at most one
//!   debounced run is pending at any time.
//! - All state mutations go through one mutex with short critical sections
//!   that are never held across an await, so no two match runs interleave.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use lostfound_search::engine::{SearchEngine, SearchTab};
//! use lostfound_search::history::MemoryStore;
//! use lostfound_search::repository::InMemoryItemRepository;
//!
//! # async fn example() {
//! let repository = Arc::new(InMemoryItemRepository::new());
//! let store = Arc::new(MemoryStore::new());
//! let engine = SearchEngine::new(repository, store);
//!
//! engine.set_active_tab(SearchTab::Lost).await.unwrap();
//! engine.set_query("blue backpack");
//! # }
//! ```

pub mod debounce;
pub mod events;
pub mod matcher;

// Re-export commonly used types
pub use debounce::Debouncer;
pub use events::{EngineEvent, EventBus};

use crate::config::SearchConfig;
use crate::history::storage::{self, KeyValueStore};
use crate::history::{SearchHistory, SearchHistoryEntry};
use crate::models::{Item, ItemType};
use crate::repository::ItemRepository;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;

/// Which item subset the home screen is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SearchTab {
    /// Recent posts across both lost and found items.
    #[default]
    Recent,
    /// Lost items only.
    Lost,
    /// Found items only.
    Found,
}

impl SearchTab {
    /// The type filter this tab requests from the repository.
    ///
    /// `None` means the unfiltered listing (`get_all`).
    pub fn item_type(&self) -> Option<ItemType> {
        match self {
            SearchTab::Recent => None,
            SearchTab::Lost => Some(ItemType::Lost),
            SearchTab::Found => Some(ItemType::Found),
        }
    }

    /// Returns the string representation of the tab.
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchTab::Recent => "recent",
            SearchTab::Lost => "lost",
            SearchTab::Found => "found",
        }
    }
}

impl std::fmt::Display for SearchTab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A point-in-time copy of the engine's observable state.
///
/// This is what the rendering surface binds to. `is_filtering` is the
/// explicit discriminator between "search ran with zero results" and "no
/// search active"; callers must not infer mode from list emptiness.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSnapshot {
    /// The tab whose listing is loaded.
    pub active_tab: SearchTab,
    /// Items currently shown: the listing itself, or the matched subset.
    pub displayed_items: Vec<Item>,
    /// True iff a non-empty query has been matched against the listing.
    pub is_filtering: bool,
    /// The raw query text as typed.
    pub query: String,
    /// Whether the history panel should be visible.
    pub history_visible: bool,
    /// Remembered successful queries, most recent first.
    pub search_history: Vec<SearchHistoryEntry>,
}

/// Mutable engine state, only ever touched under the shared mutex.
#[derive(Debug)]
struct EngineState {
    active_tab: SearchTab,
    source_items: Vec<Item>,
    query: String,
    displayed_items: Vec<Item>,
    is_filtering: bool,
    history_visible: bool,
    history: SearchHistory,
}

/// State and collaborators shared with spawned fetch/debounce tasks.
struct EngineShared {
    state: Mutex<EngineState>,
    store: Arc<dyn KeyValueStore>,
    events: EventBus,
    config: SearchConfig,
    /// Sequence number of the most recently issued fetch.
    fetch_seq: AtomicU64,
}

impl EngineShared {
    /// Runs the match algorithm for `raw_query` against the current listing.
    ///
    /// An empty (after trimming) query restores the unfiltered listing and
    /// clears the filtering flag. Otherwise the matched subset is displayed
    /// and, when non-empty, the query is committed to history.
    fn run_match(&self, raw_query: &str) {
        let normalized = matcher::normalize_query(raw_query);

        let (event, committed) = {
            let mut state = self.state.lock().unwrap();

            if normalized.is_empty() {
                state.displayed_items = state.source_items.clone();
                state.is_filtering = false;
                return;
            }

            let matches = matcher::filter_items(&normalized, &state.source_items);
            let count = matches.len();
            state.displayed_items = matches;
            state.is_filtering = true;

            // Only queries with at least one result are remembered
            let committed = count > 0;
            if committed {
                state.history.commit(raw_query);
            }

            (
                EngineEvent::SearchCompleted {
                    query: raw_query.trim().to_string(),
                    matches: count,
                },
                committed,
            )
        };

        if committed {
            self.persist_history();
        }
        self.events.emit(event);
    }

    /// Applies a completed fetch, unless a newer fetch has been issued.
    fn apply_fetch(&self, tab: SearchTab, seq: u64, items: Vec<Item>) {
        let (count, rerun_query) = {
            let mut state = self.state.lock().unwrap();

            // A response for a superseded fetch is discarded outright
            if seq != self.fetch_seq.load(Ordering::SeqCst) {
                return;
            }

            state.source_items = items;
            let count = state.source_items.len();
            let raw = state.query.clone();

            if raw.trim().is_empty() {
                state.displayed_items = state.source_items.clone();
                state.is_filtering = false;
                (count, None)
            } else {
                (count, Some(raw))
            }
        };

        // The active query is re-matched against the fresh listing
        if let Some(raw) = rerun_query {
            self.run_match(&raw);
        }

        self.events.emit(EngineEvent::ItemsLoaded { tab, count });
    }

    /// Persists the current history without blocking the caller.
    ///
    /// Inside a runtime the write happens on a spawned task; outside one it
    /// runs inline. Failures keep the in-memory history and are only logged.
    fn persist_history(&self) {
        let history = self.state.lock().unwrap().history.clone();
        let store = Arc::clone(&self.store);
        let key = self.config.history_storage_key.clone();

        let write = move || {
            if let Err(err) = storage::save_history(store.as_ref(), &key, &history) {
                eprintln!("Warning: Failed to persist search history: {}", err);
            }
        };

        match Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move { write() });
            }
            Err(_) => write(),
        }
    }

    /// Removes the persisted history value entirely.
    fn remove_persisted_history(&self) {
        let store = Arc::clone(&self.store);
        let key = self.config.history_storage_key.clone();

        let remove = move || {
            if let Err(err) = storage::clear_history(store.as_ref(), &key) {
                eprintln!("Warning: Failed to clear persisted search history: {}", err);
            }
        };

        match Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move { remove() });
            }
            Err(_) => remove(),
        }
    }
}

/// The search/filter engine.
///
/// One instance is the single owner of its state; the UI layer drives it
/// through the operations below and reads back via [`SearchEngine::snapshot`]
/// or the individual accessors. Operations that spawn background work
/// (`set_active_tab`, `refresh`, a non-empty `set_query`) must be called
/// from within a tokio runtime.
pub struct SearchEngine {
    shared: Arc<EngineShared>,
    repository: Arc<dyn ItemRepository>,
    debounce: Debouncer,
}

impl SearchEngine {
    /// Creates an engine using the globally configured settings.
    ///
    /// Search history is loaded from the store once, here; a failed or
    /// corrupted read starts the session with an empty history.
    pub fn new(repository: Arc<dyn ItemRepository>, store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_config(repository, store, crate::config::get_config())
    }

    /// Creates an engine with an explicit configuration.
    pub fn with_config(
        repository: Arc<dyn ItemRepository>,
        store: Arc<dyn KeyValueStore>,
        config: SearchConfig,
    ) -> Self {
        let history = match storage::load_history(
            store.as_ref(),
            &config.history_storage_key,
            config.max_history_entries,
        ) {
            Ok(history) => history,
            Err(err) => {
                eprintln!(
                    "Warning: Failed to load search history: {}. Starting empty.",
                    err
                );
                SearchHistory::with_max_entries(config.max_history_entries)
            }
        };

        let shared = Arc::new(EngineShared {
            state: Mutex::new(EngineState {
                active_tab: SearchTab::default(),
                source_items: Vec::new(),
                query: String::new(),
                displayed_items: Vec::new(),
                is_filtering: false,
                history_visible: false,
                history,
            }),
            store,
            events: EventBus::new(),
            config,
            fetch_seq: AtomicU64::new(0),
        });

        Self {
            shared,
            repository,
            debounce: Debouncer::new(),
        }
    }

    /// Switches the active tab and fetches its listing.
    ///
    /// The fetch runs on a background task; the returned handle resolves
    /// when it completes (the UI can ignore it, tests usually await it).
    /// A response arriving after a newer fetch was issued is discarded. On
    /// fetch failure the previous listing is kept and a
    /// [`EngineEvent::FetchFailed`] is emitted.
    pub fn set_active_tab(&self, tab: SearchTab) -> JoinHandle<()> {
        self.shared.state.lock().unwrap().active_tab = tab;
        self.spawn_fetch(tab)
    }

    /// Re-fetches the listing for the current tab.
    pub fn refresh(&self) -> JoinHandle<()> {
        let tab = self.shared.state.lock().unwrap().active_tab;
        self.spawn_fetch(tab)
    }

    fn spawn_fetch(&self, tab: SearchTab) -> JoinHandle<()> {
        // Stamp the fetch; completions compare against the latest stamp
        let seq = self.shared.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let shared = Arc::clone(&self.shared);
        let repository = Arc::clone(&self.repository);

        tokio::spawn(async move {
            let result = match tab.item_type() {
                None => repository.get_all().await,
                Some(item_type) => repository.get_by_type(item_type).await,
            };

            match result {
                Ok(items) => shared.apply_fetch(tab, seq, items),
                Err(error) => {
                    // Last-good listing stays in place
                    shared.events.emit(EngineEvent::FetchFailed { tab, error });
                }
            }
        })
    }

    /// Updates the query text from a keystroke.
    ///
    /// The text and the history-panel visibility update synchronously so
    /// the input field never lags. An empty text resets the listing
    /// immediately and cancels any pending run; otherwise a debounced match
    /// is (re)scheduled with the configured quiet period.
    pub fn set_query(&self, text: impl Into<String>) {
        let text = text.into();

        if text.is_empty() {
            self.debounce.cancel();
            let mut state = self.shared.state.lock().unwrap();
            state.query.clear();
            state.history_visible =
                self.shared.config.show_history_when_empty && !state.history.is_empty();
            state.displayed_items = state.source_items.clone();
            state.is_filtering = false;
            return;
        }

        {
            let mut state = self.shared.state.lock().unwrap();
            state.query = text.clone();
            state.history_visible = false;
        }

        let shared = Arc::clone(&self.shared);
        self.debounce
            .schedule(self.shared.config.debounce_duration(), move || {
                // Skip if the query moved on while this timer was firing
                let still_current = shared.state.lock().unwrap().query == text;
                if still_current {
                    shared.run_match(&text);
                }
            });
    }

    /// Runs the match for the current query immediately (explicit submit).
    ///
    /// Cancels any pending debounced run first.
    pub fn submit_query(&self) {
        self.debounce.cancel();
        let raw = self.shared.state.lock().unwrap().query.clone();
        self.shared.run_match(&raw);
    }

    /// Re-runs a remembered query from the history panel.
    ///
    /// The query becomes the current text, the match runs synchronously
    /// (no debounce), and the history panel is hidden.
    pub fn select_entry(&self, query: &str) {
        self.debounce.cancel();
        {
            let mut state = self.shared.state.lock().unwrap();
            state.query = query.to_string();
            state.history_visible = false;
        }
        self.shared.run_match(query);
    }

    /// Deletes one history entry by index and persists the change.
    ///
    /// Does not affect the displayed items or the current query.
    ///
    /// # Returns
    ///
    /// `true` if an entry was removed, `false` for an out-of-range index.
    pub fn delete_entry(&self, index: usize) -> bool {
        let removed = self.shared.state.lock().unwrap().history.delete(index);
        if removed {
            self.shared.persist_history();
        }
        removed
    }

    /// Clears the entire search history, in memory and in the store.
    pub fn clear_all_history(&self) {
        {
            let mut state = self.shared.state.lock().unwrap();
            state.history.clear();
            state.history_visible = false;
        }
        self.shared.remove_persisted_history();
    }

    /// Resets the search: empty query, unfiltered listing, panel hidden.
    ///
    /// History entries are untouched. Any pending debounced run is
    /// cancelled.
    pub fn clear_search(&self) {
        self.debounce.cancel();
        let mut state = self.shared.state.lock().unwrap();
        state.query.clear();
        state.displayed_items = state.source_items.clone();
        state.is_filtering = false;
        state.history_visible = false;
    }

    /// Subscribes to engine events, replacing any previous subscriber.
    pub fn subscribe(&self) -> UnboundedReceiver<EngineEvent> {
        self.shared.events.subscribe()
    }

    /// Returns a point-in-time copy of the observable state.
    pub fn snapshot(&self) -> EngineSnapshot {
        let state = self.shared.state.lock().unwrap();
        EngineSnapshot {
            active_tab: state.active_tab,
            displayed_items: state.displayed_items.clone(),
            is_filtering: state.is_filtering,
            query: state.query.clone(),
            history_visible: state.history_visible,
            search_history: state.history.entries().to_vec(),
        }
    }

    /// The items currently shown.
    pub fn displayed_items(&self) -> Vec<Item> {
        self.shared.state.lock().unwrap().displayed_items.clone()
    }

    /// True iff a non-empty query has been matched against the listing.
    pub fn is_filtering(&self) -> bool {
        self.shared.state.lock().unwrap().is_filtering
    }

    /// The raw query text as typed.
    pub fn query(&self) -> String {
        self.shared.state.lock().unwrap().query.clone()
    }

    /// The tab whose listing is loaded.
    pub fn active_tab(&self) -> SearchTab {
        self.shared.state.lock().unwrap().active_tab
    }

    /// Whether the history panel should be visible.
    pub fn history_visible(&self) -> bool {
        self.shared.state.lock().unwrap().history_visible
    }

    /// Remembered successful queries, most recent first.
    pub fn search_history(&self) -> Vec<SearchHistoryEntry> {
        self.shared
            .state
            .lock()
            .unwrap()
            .history
            .entries()
            .to_vec()
    }

    /// The configuration this engine was built with.
    pub fn config(&self) -> &SearchConfig {
        &self.shared.config
    }
}
