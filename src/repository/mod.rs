//! Item repository abstraction.
//!
//! The search engine never talks to the hosted backend directly; it fetches
//! item listings through the [`ItemRepository`] trait. Production builds
//! implement it against the backend SDK, tests and offline builds use the
//! bundled [`InMemoryItemRepository`].
//!
//! Listing queries follow the backend's conventions: only `active` items,
//! ordered newest-first, capped at the configured fetch limit.

pub mod error;
pub mod memory;

// Re-export commonly used types
pub use error::RepositoryError;
pub use memory::InMemoryItemRepository;

use crate::models::{Item, ItemType};
use async_trait::async_trait;

/// Source of item listings.
///
/// Implementations are expected to return items already ordered for display
/// (newest first); the engine preserves whatever order it receives and does
/// not re-sort or deduplicate.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Fetches the current listing across both lost and found items.
    async fn get_all(&self) -> Result<Vec<Item>, RepositoryError>;

    /// Fetches the current listing restricted to one item type.
    async fn get_by_type(&self, item_type: ItemType) -> Result<Vec<Item>, RepositoryError>;
}
