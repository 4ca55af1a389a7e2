//! Configuration schema for the search engine.
//!
//! This module defines the configuration structure and validation logic for
//! the user-tunable search settings.

use serde::{Deserialize, Serialize};

/// Search engine configuration.
///
/// All settings can be provided via app settings under the "lostfound" key.
/// Missing or invalid settings fall back to sensible defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchConfig {
    /// Quiet period for the search debounce, in milliseconds.
    ///
    /// A match run is scheduled this long after the last keystroke; further
    /// keystrokes within the window cancel and reschedule it. Defaults to
    /// 300ms. A value of 0 disables the quiet period (every keystroke runs
    /// a match).
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Maximum number of search history entries to keep.
    ///
    /// Older entries beyond this limit are evicted. Defaults to 5.
    ///
    /// Must be > 0.
    #[serde(default = "default_max_history_entries")]
    pub max_history_entries: usize,

    /// Storage key the search history is persisted under.
    ///
    /// Defaults to "lostfound.searchHistory". Engines sharing one store must
    /// use distinct keys to keep separate histories.
    #[serde(default = "default_history_storage_key")]
    pub history_storage_key: String,

    /// Maximum number of items a repository listing returns.
    ///
    /// Matches the backend's page size. Defaults to 50.
    ///
    /// Must be > 0.
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: usize,

    /// Whether the history panel is shown when the search field is emptied.
    ///
    /// Defaults to true.
    #[serde(default = "default_show_history_when_empty")]
    pub show_history_when_empty: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            max_history_entries: default_max_history_entries(),
            history_storage_key: default_history_storage_key(),
            fetch_limit: default_fetch_limit(),
            show_history_when_empty: default_show_history_when_empty(),
        }
    }
}

impl SearchConfig {
    /// Validates the configuration.
    ///
    /// # Returns
    ///
    /// `Ok(())` if all settings are valid, or `Err` with a descriptive
    /// error message.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_history_entries == 0 {
            return Err("maxHistoryEntries must be greater than 0".to_string());
        }

        if self.fetch_limit == 0 {
            return Err("fetchLimit must be greater than 0".to_string());
        }

        if self.history_storage_key.trim().is_empty() {
            return Err("historyStorageKey must not be empty".to_string());
        }

        // debounce_ms can be 0 (no quiet period), so no validation needed

        Ok(())
    }

    /// Returns the debounce quiet period as a `std::time::Duration`.
    pub fn debounce_duration(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.debounce_ms)
    }

    /// Merges this configuration with another, using values from `other`.
    ///
    /// This is useful for applying user settings on top of defaults.
    pub fn merge(&self, other: &SearchConfig) -> Self {
        Self {
            debounce_ms: other.debounce_ms,
            max_history_entries: other.max_history_entries,
            history_storage_key: other.history_storage_key.clone(),
            fetch_limit: other.fetch_limit,
            show_history_when_empty: other.show_history_when_empty,
        }
    }
}

// Default value functions for serde

fn default_debounce_ms() -> u64 {
    300
}

fn default_max_history_entries() -> usize {
    crate::history::MAX_HISTORY_ENTRIES
}

fn default_history_storage_key() -> String {
    crate::history::HISTORY_STORAGE_KEY.to_string()
}

fn default_fetch_limit() -> usize {
    50
}

fn default_show_history_when_empty() -> bool {
    true
}
