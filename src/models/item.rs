//! Item data models.
//!
//! This module defines the core data structures for lost and found item
//! documents as stored by the backend. Field names serialize in camelCase to
//! stay wire-compatible with the hosted document database.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether an item was reported as lost or found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    /// The reporter lost this item and is looking for it.
    Lost,
    /// The reporter found this item and wants to return it.
    Found,
}

impl ItemType {
    /// Returns the string representation of the item type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Lost => "lost",
            ItemType::Found => "found",
        }
    }

    /// Parses a string into an ItemType.
    ///
    /// # Returns
    ///
    /// `Some(ItemType)` if the string is a valid type tag, `None` otherwise.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "lost" => Some(ItemType::Lost),
            "found" => Some(ItemType::Found),
            _ => None,
        }
    }
}

impl std::fmt::Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle status of a reported item.
///
/// Only `active` items are returned by the default repository queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    /// Item is still outstanding and shown in listings.
    #[default]
    Active,
    /// Someone has claimed the item; pending handover.
    Claimed,
    /// Item has been returned to its owner.
    Resolved,
}

impl ItemStatus {
    /// Returns the string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Active => "active",
            ItemStatus::Claimed => "claimed",
            ItemStatus::Resolved => "resolved",
        }
    }
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A lost or found item document.
///
/// Items are owned by the backend repository and read-only to the search
/// engine. Free-text fields are optional; an absent field matches searches
/// as an empty string rather than erroring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Opaque unique identifier assigned by the backend.
    pub id: String,

    /// Whether this item was reported lost or found.
    #[serde(rename = "type")]
    pub item_type: ItemType,

    /// Short title, e.g. "Blue Backpack".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Longer free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Category tag, e.g. "electronics", "bags".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Where the item was lost or found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// User-entered date of the loss/find, kept as display text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Serialized image reference list; absent when no photos were attached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<String>,

    /// Lifecycle status; listings only include `active` items.
    #[serde(default)]
    pub status: ItemStatus,

    /// Id of the reporting user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Display name of the reporting user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,

    /// Institutional email of the reporting user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,

    /// Creation timestamp, stamped by the repository.
    ///
    /// Listings are ordered newest-first by this field; the search engine
    /// preserves whatever order the repository returned.
    pub created_at: DateTime<Utc>,
}

impl Item {
    /// Creates a new item with the given id and type.
    ///
    /// All optional fields start empty; `status` defaults to `active` and
    /// `created_at` to the current time.
    pub fn new(id: impl Into<String>, item_type: ItemType) -> Self {
        Self {
            id: id.into(),
            item_type,
            title: None,
            description: None,
            category: None,
            location: None,
            date: None,
            images: None,
            status: ItemStatus::Active,
            user_id: None,
            user_name: None,
            user_email: None,
            created_at: Utc::now(),
        }
    }

    /// Sets the title, builder-style.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the description, builder-style.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the category, builder-style.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the location, builder-style.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Returns the four searchable text fields in match order.
    ///
    /// Absent fields are returned as empty strings so that matching never
    /// has to special-case missing data.
    pub fn searchable_fields(&self) -> [&str; 4] {
        [
            self.title.as_deref().unwrap_or(""),
            self.category.as_deref().unwrap_or(""),
            self.location.as_deref().unwrap_or(""),
            self.description.as_deref().unwrap_or(""),
        ]
    }
}
