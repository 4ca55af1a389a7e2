//! In-memory item repository.
//!
//! This module provides a process-local [`ItemRepository`] implementation
//! that mirrors the hosted backend's query semantics: listings return only
//! `active` items, ordered newest-first, capped at the configured fetch
//! limit. It backs unit tests and offline development builds.

use super::{ItemRepository, RepositoryError};
use crate::models::{Item, ItemStatus, ItemType};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::RwLock;

/// A thread-safe, in-memory store of item documents.
///
/// Cheap to construct in tests; the item list lives behind an `RwLock` so a
/// shared repository can be mutated while fetches are in flight.
#[derive(Debug)]
pub struct InMemoryItemRepository {
    items: RwLock<Vec<Item>>,
    fetch_limit: usize,
}

impl InMemoryItemRepository {
    /// Creates an empty repository using the globally configured fetch limit.
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
            fetch_limit: crate::config::get_config().fetch_limit,
        }
    }

    /// Creates a repository pre-populated with the given items.
    pub fn with_items(items: Vec<Item>) -> Self {
        let repo = Self::new();
        *repo.items.write().unwrap() = items;
        repo
    }

    /// Overrides the fetch limit, builder-style.
    pub fn with_fetch_limit(mut self, limit: usize) -> Self {
        self.fetch_limit = limit;
        self
    }

    /// Inserts an item as-is, without stamping id or timestamp.
    pub fn insert(&self, item: Item) {
        self.items.write().unwrap().push(item);
    }

    /// Stores a newly reported item.
    ///
    /// Stamps a fresh unique id and the current creation time, forces the
    /// status to `active`, and returns the stored document, matching the
    /// server-side stamping the hosted backend performs on create.
    pub fn create_item(&self, draft: Item) -> Item {
        let mut item = draft;
        item.id = uuid::Uuid::new_v4().to_string();
        item.created_at = Utc::now();
        item.status = ItemStatus::Active;
        self.items.write().unwrap().push(item.clone());
        item
    }

    /// Returns every item reported by the given user, newest first.
    ///
    /// Unlike the listing queries, this includes claimed and resolved items
    /// and applies no fetch limit.
    pub fn items_for_user(&self, user_id: &str) -> Vec<Item> {
        let items = self.items.read().unwrap();
        let mut matches: Vec<Item> = items
            .iter()
            .filter(|item| item.user_id.as_deref() == Some(user_id))
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matches
    }

    /// Total number of stored items, regardless of status.
    pub fn len(&self) -> usize {
        self.items.read().unwrap().len()
    }

    /// Returns `true` when no items are stored.
    pub fn is_empty(&self) -> bool {
        self.items.read().unwrap().is_empty()
    }

    fn listing(&self, item_type: Option<ItemType>) -> Vec<Item> {
        let items = self.items.read().unwrap();
        let mut listing: Vec<Item> = items
            .iter()
            .filter(|item| item.status == ItemStatus::Active)
            .filter(|item| item_type.map_or(true, |t| item.item_type == t))
            .cloned()
            .collect();
        listing.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        listing.truncate(self.fetch_limit);
        listing
    }
}

impl Default for InMemoryItemRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn get_all(&self) -> Result<Vec<Item>, RepositoryError> {
        Ok(self.listing(None))
    }

    async fn get_by_type(&self, item_type: ItemType) -> Result<Vec<Item>, RepositoryError> {
        Ok(self.listing(Some(item_type)))
    }
}
