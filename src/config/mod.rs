//! Configuration management for the search engine.
//!
//! This module provides configuration loading, validation, and access
//! through a singleton pattern. Configuration is read from app settings
//! under the "lostfound" key and merged with defaults.

pub mod schema;

pub use schema::SearchConfig;

use once_cell::sync::Lazy;
use serde_json::Value;
use std::sync::RwLock;

/// Global configuration instance.
///
/// Lazily initialized on first access and updated when settings change.
static CONFIG: Lazy<RwLock<SearchConfig>> = Lazy::new(|| RwLock::new(SearchConfig::default()));

/// Loads configuration from an app settings JSON value.
///
/// Reads the "lostfound" settings key, merges it with defaults, validates
/// the result, and updates the global configuration.
///
/// # Arguments
///
/// * `settings_json` - Optional JSON value containing user settings under
///   the "lostfound" key
///
/// # Returns
///
/// `Ok(SearchConfig)` with the loaded configuration, or `Err` if validation
/// fails.
///
/// # Example
///
/// ```
/// use lostfound_search::config::load_config;
/// use serde_json::json;
///
/// let settings = json!({
///     "lostfound": {
///         "debounceMs": 200,
///         "maxHistoryEntries": 8
///     }
/// });
///
/// let config = load_config(Some(settings)).unwrap();
/// assert_eq!(config.debounce_ms, 200);
/// ```
pub fn load_config(settings_json: Option<Value>) -> Result<SearchConfig, String> {
    let mut config = SearchConfig::default();

    if let Some(settings) = settings_json {
        if let Some(search_settings) = settings.get("lostfound") {
            match serde_json::from_value::<SearchConfig>(search_settings.clone()) {
                Ok(user_config) => {
                    // User settings take precedence over defaults
                    config = config.merge(&user_config);
                }
                Err(e) => {
                    eprintln!(
                        "Warning: Failed to parse lostfound settings: {}. Using defaults.",
                        e
                    );
                }
            }
        }
    }

    config
        .validate()
        .map_err(|e| format!("Invalid configuration: {}. Using defaults.", e))?;

    if let Ok(mut global_config) = CONFIG.write() {
        *global_config = config.clone();
    }

    Ok(config)
}

/// Gets the current global configuration.
///
/// Returns a clone of the current configuration, or the defaults if no
/// configuration has been loaded yet.
pub fn get_config() -> SearchConfig {
    CONFIG
        .read()
        .map(|c| c.clone())
        .unwrap_or_else(|_| SearchConfig::default())
}

/// Updates a specific configuration setting.
///
/// # Arguments
///
/// * `updater` - A closure that modifies the configuration
///
/// # Example
///
/// ```
/// use lostfound_search::config::{get_config, reset_config, update_config};
///
/// update_config(|config| {
///     config.debounce_ms = 150;
/// });
/// assert_eq!(get_config().debounce_ms, 150);
/// # reset_config();
/// ```
pub fn update_config<F>(updater: F)
where
    F: FnOnce(&mut SearchConfig),
{
    if let Ok(mut config) = CONFIG.write() {
        updater(&mut config);

        // Validate after update
        if let Err(e) = config.validate() {
            eprintln!(
                "Warning: Configuration validation failed after update: {}",
                e
            );
            // Revert to defaults if validation fails
            *config = SearchConfig::default();
        }
    }
}

/// Resets the configuration to defaults.
///
/// Useful for testing or when the user wants to clear custom settings.
pub fn reset_config() {
    if let Ok(mut config) = CONFIG.write() {
        *config = SearchConfig::default();
    }
}
