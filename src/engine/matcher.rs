//! Query matching over item lists.
//!
//! This module implements the pure matching algorithm: case-insensitive
//! substring containment across an item's text fields, preserving the
//! original list order. No ranking or scoring is applied.

use crate::models::Item;

/// Normalizes a raw query for matching.
///
/// Trims surrounding whitespace and lower-cases the remainder. An empty
/// normalized query means "no filter".
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Checks if an item matches the given normalized query.
///
/// The query matches when it is a substring of at least one of the item's
/// title, category, location, or description (lower-cased; absent fields
/// compare as empty strings and simply fail their sub-check).
///
/// # Arguments
///
/// * `item` - The item to check
/// * `normalized_query` - The trimmed, lower-cased search term
pub fn item_matches(item: &Item, normalized_query: &str) -> bool {
    item.searchable_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(normalized_query))
}

/// Filters items by a normalized query, preserving their original order.
///
/// # Arguments
///
/// * `normalized_query` - The trimmed, lower-cased search term
/// * `items` - The items to filter
///
/// # Returns
///
/// The matching subset of `items`, in their original relative order. An
/// empty query returns the full list.
pub fn filter_items(normalized_query: &str, items: &[Item]) -> Vec<Item> {
    if normalized_query.is_empty() {
        return items.to_vec();
    }

    items
        .iter()
        .filter(|item| item_matches(item, normalized_query))
        .cloned()
        .collect()
}
