//! Item repository error types.
//!
//! This module defines the error type surfaced when a fetch from the hosted
//! item store fails. The search engine treats all of these as non-fatal: the
//! last successfully fetched items stay on screen and the failure is
//! reported as an event.

use std::fmt;

/// Errors that can occur while fetching items from the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Network-level failure reaching the backend.
    ///
    /// Includes connection failures, DNS errors and timeouts.
    Network(String),

    /// The backend accepted the request but reported a failure.
    Backend(String),

    /// The session is missing or expired; the backend rejected the query.
    Unauthorized(String),
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepositoryError::Network(msg) => write!(f, "Network error: {}", msg),
            RepositoryError::Backend(msg) => write!(f, "Backend error: {}", msg),
            RepositoryError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
        }
    }
}

impl std::error::Error for RepositoryError {}
