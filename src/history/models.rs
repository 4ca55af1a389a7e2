//! Data models for search history.
//!
//! This module defines the bounded, deduplicated list of past successful
//! search queries shown as quick-repeat suggestions under the search bar.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of search history entries to retain.
///
/// Older entries beyond this cap are evicted when a new query is committed.
pub const MAX_HISTORY_ENTRIES: usize = 5;

/// A single remembered search query.
///
/// Only queries that produced at least one match are remembered; the
/// timestamp records the most recent time the query succeeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHistoryEntry {
    /// The query text as the user entered it, trimmed but case-preserved.
    pub query: String,

    /// Time of the last match-producing search for this query.
    pub timestamp: DateTime<Utc>,
}

impl SearchHistoryEntry {
    /// Creates an entry for the given query stamped with the current time.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Bounded, most-recent-first list of past successful queries.
///
/// Invariants, maintained by every mutation:
/// - at most `max_entries` entries;
/// - no two entries with case-insensitively equal queries;
/// - index 0 is always the most recently committed query.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHistory {
    entries: Vec<SearchHistoryEntry>,
    max_entries: usize,
}

impl SearchHistory {
    /// Creates an empty history with the default cap.
    pub fn new() -> Self {
        Self::with_max_entries(MAX_HISTORY_ENTRIES)
    }

    /// Creates an empty history with a custom cap.
    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries,
        }
    }

    /// Rebuilds a history from persisted entries, re-applying the invariants.
    ///
    /// Entries are taken in stored order (most recent first). Duplicate
    /// queries and entries beyond the cap, possible in data written by an
    /// older version, are dropped rather than rejected.
    pub fn from_entries(entries: Vec<SearchHistoryEntry>, max_entries: usize) -> Self {
        let mut history = Self::with_max_entries(max_entries);
        for entry in entries {
            let trimmed = entry.query.trim();
            if trimmed.is_empty() {
                continue;
            }
            if history.entries.len() >= max_entries {
                break;
            }
            if !history.contains(trimmed) {
                history.entries.push(SearchHistoryEntry {
                    query: trimmed.to_string(),
                    timestamp: entry.timestamp,
                });
            }
        }
        history
    }

    /// Records a successful query, promoting it to the front of the list.
    ///
    /// The query is trimmed (case preserved for display); any existing entry
    /// with a case-insensitively equal query is removed first, then the new
    /// entry is prepended and the list truncated to the cap. Empty queries
    /// are ignored.
    pub fn commit(&mut self, query: &str) {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return;
        }

        let needle = trimmed.to_lowercase();
        self.entries
            .retain(|entry| entry.query.to_lowercase() != needle);
        self.entries.insert(0, SearchHistoryEntry::new(trimmed));
        self.entries.truncate(self.max_entries);
    }

    /// Removes the entry at `index`.
    ///
    /// # Returns
    ///
    /// `true` if an entry was removed, `false` for an out-of-range index.
    pub fn delete(&mut self, index: usize) -> bool {
        if index < self.entries.len() {
            self.entries.remove(index);
            true
        } else {
            false
        }
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Checks whether a case-insensitively equal query is already recorded.
    pub fn contains(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        self.entries
            .iter()
            .any(|entry| entry.query.to_lowercase() == needle)
    }

    /// The entries, most recent first.
    pub fn entries(&self) -> &[SearchHistoryEntry] {
        &self.entries
    }

    /// Number of remembered queries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no queries are remembered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SearchHistory {
    fn default() -> Self {
        Self::new()
    }
}
