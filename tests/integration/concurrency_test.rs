//! Concurrency and ordering integration tests.
//!
//! These tests pin down the engine's two ordering guarantees (stale fetch
//! responses are discarded, rapid keystrokes collapse to a single debounced
//! match) using a paused tokio clock for determinism.

use async_trait::async_trait;
use lostfound_search::config::SearchConfig;
use lostfound_search::engine::{EngineEvent, SearchEngine, SearchTab};
use lostfound_search::history::MemoryStore;
use lostfound_search::models::{Item, ItemType};
use lostfound_search::repository::{ItemRepository, RepositoryError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Repository whose listings take a configurable time to arrive and which
/// counts how many fetches were actually issued.
struct SlowRepository {
    all_delay: Duration,
    typed_delay: Duration,
    items: Vec<Item>,
    fetches: AtomicUsize,
}

impl SlowRepository {
    fn new(all_delay: Duration, typed_delay: Duration, items: Vec<Item>) -> Self {
        Self {
            all_delay,
            typed_delay,
            items,
            fetches: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ItemRepository for SlowRepository {
    async fn get_all(&self) -> Result<Vec<Item>, RepositoryError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.all_delay).await;
        Ok(self.items.clone())
    }

    async fn get_by_type(&self, item_type: ItemType) -> Result<Vec<Item>, RepositoryError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.typed_delay).await;
        Ok(self
            .items
            .iter()
            .filter(|item| item.item_type == item_type)
            .cloned()
            .collect())
    }
}

fn campus_items() -> Vec<Item> {
    vec![
        Item::new("backpack", ItemType::Lost)
            .with_title("Blue Backpack")
            .with_location("Library"),
        Item::new("phone", ItemType::Found)
            .with_title("iPhone 13")
            .with_location("Library"),
        Item::new("bottle", ItemType::Lost)
            .with_title("Water Bottle")
            .with_location("Gym"),
    ]
}

fn create_engine(repository: Arc<dyn ItemRepository>) -> SearchEngine {
    SearchEngine::with_config(
        repository,
        Arc::new(MemoryStore::new()),
        SearchConfig::default(),
    )
}

#[tokio::test(start_paused = true)]
async fn test_out_of_order_completion_is_discarded() {
    let repository = Arc::new(SlowRepository::new(
        Duration::from_millis(800),
        Duration::from_millis(50),
        campus_items(),
    ));
    let engine = create_engine(repository.clone());
    let mut rx = engine.subscribe();

    // Recent is requested first but answers last
    let slow = engine.set_active_tab(SearchTab::Recent);
    let fast = engine.set_active_tab(SearchTab::Found);
    let _ = tokio::join!(slow, fast);

    assert_eq!(repository.fetches.load(Ordering::SeqCst), 2);

    // Only the Found listing was applied; the late Recent response was
    // dropped without touching state
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.active_tab, SearchTab::Found);
    assert_eq!(snapshot.displayed_items.len(), 1);
    assert_eq!(snapshot.displayed_items[0].id, "phone");

    assert_eq!(
        rx.try_recv().unwrap(),
        EngineEvent::ItemsLoaded {
            tab: SearchTab::Found,
            count: 1
        }
    );
    assert!(rx.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn test_three_way_tab_race_latest_wins() {
    let repository = Arc::new(SlowRepository::new(
        Duration::from_millis(300),
        Duration::from_millis(300),
        campus_items(),
    ));
    let engine = create_engine(repository);

    // All three fetches take the same time; issue order decides the winner
    let first = engine.set_active_tab(SearchTab::Recent);
    let second = engine.set_active_tab(SearchTab::Found);
    let third = engine.set_active_tab(SearchTab::Lost);
    let _ = tokio::join!(first, second, third);

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.active_tab, SearchTab::Lost);
    assert_eq!(snapshot.displayed_items.len(), 2);
    assert!(snapshot
        .displayed_items
        .iter()
        .all(|item| item.item_type == ItemType::Lost));
}

#[tokio::test(start_paused = true)]
async fn test_keystroke_burst_runs_one_match() {
    let repository = Arc::new(SlowRepository::new(
        Duration::ZERO,
        Duration::ZERO,
        campus_items(),
    ));
    let engine = create_engine(repository);
    engine.set_active_tab(SearchTab::Recent).await.unwrap();
    let mut rx = engine.subscribe();

    // Simulate typing "library" one keystroke every 50ms, well inside the
    // 300ms quiet period
    let mut text = String::new();
    for ch in "library".chars() {
        text.push(ch);
        engine.set_query(text.clone());
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    tokio::time::sleep(Duration::from_millis(350)).await;

    // One match, for the final text
    let mut completed = Vec::new();
    while let Ok(event) = rx.try_recv() {
        if let EngineEvent::SearchCompleted { query, matches } = event {
            completed.push((query, matches));
        }
    }
    assert_eq!(completed, vec![("library".to_string(), 2)]);

    // Exactly one history entry exists, for the full word
    let history = engine.search_history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].query, "library");
}

#[tokio::test(start_paused = true)]
async fn test_fetch_completing_mid_search_reapplies_query() {
    let repository = Arc::new(SlowRepository::new(
        Duration::from_millis(500),
        Duration::from_millis(500),
        campus_items(),
    ));
    let engine = create_engine(repository);

    // Fetch is still in flight while the user types and the match runs
    // against the (empty) current listing
    let fetch = engine.set_active_tab(SearchTab::Recent);
    engine.set_query("library");
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(engine.is_filtering());
    assert!(engine.displayed_items().is_empty());

    // When the listing lands, the active query is re-applied to it
    fetch.await.unwrap();
    let snapshot = engine.snapshot();
    assert!(snapshot.is_filtering);
    assert_eq!(snapshot.displayed_items.len(), 2);
    assert_eq!(snapshot.query, "library");
}

#[tokio::test(start_paused = true)]
async fn test_clear_search_cancels_pending_match() {
    let repository = Arc::new(SlowRepository::new(
        Duration::ZERO,
        Duration::ZERO,
        campus_items(),
    ));
    let engine = create_engine(repository);
    engine.set_active_tab(SearchTab::Recent).await.unwrap();

    engine.set_query("gym");
    engine.clear_search();

    tokio::time::sleep(Duration::from_millis(500)).await;

    // The scheduled match never ran: no filtering, no history
    let snapshot = engine.snapshot();
    assert!(!snapshot.is_filtering);
    assert_eq!(snapshot.displayed_items.len(), 3);
    assert!(snapshot.search_history.is_empty());
    assert!(snapshot.query.is_empty());
}
