//! Integration tests module for the lost & found search engine.
//!
//! This module provides common utilities and test infrastructure for
//! integration testing across the repository, engine, and storage layers.

pub mod concurrency_test;
pub mod end_to_end_test;

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize test environment (run once)
pub fn init_test_env() {
    INIT.call_once(|| {
        // Initialize global test setup if needed
    });
}
