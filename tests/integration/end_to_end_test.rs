//! End-to-end integration tests for the search engine.
//!
//! These tests verify complete user workflows (reporting items, switching
//! tabs, searching, re-opening the app with a persisted history) against
//! the file-backed store and the in-memory repository.

use lostfound_search::config::SearchConfig;
use lostfound_search::engine::{SearchEngine, SearchTab};
use lostfound_search::history::{storage, FileStore, KeyValueStore};
use lostfound_search::models::{Item, ItemType};
use lostfound_search::repository::InMemoryItemRepository;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Helper to create a file store rooted in a fresh temp directory.
fn create_temp_store() -> (TempDir, Arc<FileStore>) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = Arc::new(FileStore::with_root(temp_dir.path().join("lostfound")));
    (temp_dir, store)
}

/// Helper to create a repository seeded through the reporting flow.
fn create_seeded_repository() -> Arc<InMemoryItemRepository> {
    let repository = InMemoryItemRepository::with_items(Vec::new());

    repository.create_item(
        Item::new("", ItemType::Lost)
            .with_title("Blue Backpack")
            .with_category("bags")
            .with_location("Library"),
    );
    repository.create_item(
        Item::new("", ItemType::Found)
            .with_title("iPhone 13")
            .with_category("electronics")
            .with_location("Library"),
    );
    repository.create_item(
        Item::new("", ItemType::Found)
            .with_title("Student ID Card")
            .with_category("documents")
            .with_location("Cafeteria")
            .with_description("Card for Jane Doe"),
    );

    Arc::new(repository)
}

fn test_config(key: &str) -> SearchConfig {
    SearchConfig {
        history_storage_key: key.to_string(),
        ..Default::default()
    }
}

#[tokio::test(start_paused = true)]
async fn test_report_browse_search_workflow() {
    // Step 1: Items are reported through the repository
    let repository = create_seeded_repository();
    let (_temp_dir, store) = create_temp_store();

    // Step 2: The home screen opens on the Recent tab
    let engine = SearchEngine::with_config(
        repository.clone(),
        store.clone(),
        test_config("e2e.history"),
    );
    engine.set_active_tab(SearchTab::Recent).await.unwrap();
    assert_eq!(engine.displayed_items().len(), 3);
    assert!(!engine.is_filtering());

    // Step 3: The user types a query; the match runs after the quiet period
    engine.set_query("library");
    tokio::time::sleep(Duration::from_millis(400)).await;

    let snapshot = engine.snapshot();
    assert!(snapshot.is_filtering);
    assert_eq!(snapshot.displayed_items.len(), 2);
    assert!(snapshot
        .displayed_items
        .iter()
        .all(|item| item.location.as_deref() == Some("Library")));

    // Step 4: The successful query was remembered and persisted
    assert_eq!(snapshot.search_history.len(), 1);
    assert_eq!(snapshot.search_history[0].query, "library");

    tokio::task::yield_now().await; // let the background write land
    let persisted = store.read("e2e.history").unwrap();
    assert!(persisted.is_some());
    assert!(persisted.unwrap().contains("library"));

    // Step 5: Clearing the search restores the listing, keeps the history
    engine.clear_search();
    assert_eq!(engine.displayed_items().len(), 3);
    assert!(!engine.is_filtering());
    assert_eq!(engine.search_history().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_tab_switch_refilters_listing() {
    let repository = create_seeded_repository();
    let (_temp_dir, store) = create_temp_store();
    let engine =
        SearchEngine::with_config(repository, store, test_config("e2e.tabs"));

    engine.set_active_tab(SearchTab::Recent).await.unwrap();
    engine.set_query("library");
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(engine.displayed_items().len(), 2);

    // Switching to Found narrows the listing; the query re-applies to it
    engine.set_active_tab(SearchTab::Found).await.unwrap();

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.active_tab, SearchTab::Found);
    assert!(snapshot.is_filtering);
    assert_eq!(snapshot.displayed_items.len(), 1);
    assert_eq!(
        snapshot.displayed_items[0].title.as_deref(),
        Some("iPhone 13")
    );
    assert_eq!(snapshot.query, "library");
}

#[tokio::test(start_paused = true)]
async fn test_history_survives_restart() {
    let repository = create_seeded_repository();
    let (_temp_dir, store) = create_temp_store();

    // First session: two successful searches
    {
        let engine = SearchEngine::with_config(
            repository.clone(),
            store.clone(),
            test_config("e2e.restart"),
        );
        engine.set_active_tab(SearchTab::Recent).await.unwrap();

        engine.set_query("library");
        tokio::time::sleep(Duration::from_millis(400)).await;
        engine.set_query("cafeteria");
        tokio::time::sleep(Duration::from_millis(400)).await;
        tokio::task::yield_now().await;

        assert_eq!(engine.search_history().len(), 2);
    }

    // Second session: the history comes back, newest first
    let engine = SearchEngine::with_config(
        repository,
        store.clone(),
        test_config("e2e.restart"),
    );
    let remembered = engine.search_history();
    assert_eq!(remembered.len(), 2);
    assert_eq!(remembered[0].query, "cafeteria");
    assert_eq!(remembered[1].query, "library");

    // Selecting the remembered query re-runs it against the fresh session
    engine.set_active_tab(SearchTab::Recent).await.unwrap();
    engine.select_entry("library");
    assert_eq!(engine.displayed_items().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_history_management_round_trip() {
    let repository = create_seeded_repository();
    let (_temp_dir, store) = create_temp_store();
    let engine = SearchEngine::with_config(
        repository,
        store.clone(),
        test_config("e2e.manage"),
    );
    engine.set_active_tab(SearchTab::Recent).await.unwrap();

    for query in ["library", "cafeteria", "iphone"] {
        engine.set_query(query);
        tokio::time::sleep(Duration::from_millis(400)).await;
    }
    tokio::task::yield_now().await;
    assert_eq!(engine.search_history().len(), 3);

    // Delete the middle entry and confirm the persisted copy follows
    assert!(engine.delete_entry(1));
    tokio::task::yield_now().await;

    let reloaded = storage::load_history(store.as_ref(), "e2e.manage", 5).unwrap();
    let queries: Vec<&str> = reloaded.entries().iter().map(|e| e.query.as_str()).collect();
    assert_eq!(queries, vec!["iphone", "library"]);

    // Clear everything; the persisted key disappears
    engine.clear_all_history();
    tokio::task::yield_now().await;
    assert!(engine.search_history().is_empty());
    assert_eq!(store.read("e2e.manage").unwrap(), None);
}

#[tokio::test(start_paused = true)]
async fn test_failed_search_leaves_history_alone() {
    let repository = create_seeded_repository();
    let (_temp_dir, store) = create_temp_store();
    let engine = SearchEngine::with_config(
        repository,
        store.clone(),
        test_config("e2e.nomatch"),
    );
    engine.set_active_tab(SearchTab::Recent).await.unwrap();

    engine.set_query("nosuchitem");
    tokio::time::sleep(Duration::from_millis(400)).await;

    let snapshot = engine.snapshot();
    assert!(snapshot.displayed_items.is_empty());
    assert!(snapshot.is_filtering);
    assert!(snapshot.search_history.is_empty());

    // Nothing was ever written for this key
    assert_eq!(store.read("e2e.nomatch").unwrap(), None);
}
