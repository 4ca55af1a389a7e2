//! Engine notifications for the rendering surface.
//!
//! The engine reports non-fatal happenings (listings arriving, fetches
//! failing, searches completing) through an event channel the UI layer can
//! subscribe to. Events are advisory; engine state is always readable
//! directly through the snapshot accessors.

use super::SearchTab;
use crate::repository::RepositoryError;
use std::sync::Mutex;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Non-fatal notifications emitted by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// A repository fetch completed and was applied.
    ItemsLoaded {
        /// Tab the fetch was issued for.
        tab: SearchTab,
        /// Number of items in the applied listing.
        count: usize,
    },

    /// A repository fetch failed; the previous listing was kept.
    FetchFailed {
        /// Tab the fetch was issued for.
        tab: SearchTab,
        /// The underlying fetch error.
        error: RepositoryError,
    },

    /// A match run finished against the current listing.
    SearchCompleted {
        /// The trimmed query that was matched.
        query: String,
        /// Number of matching items now displayed.
        matches: usize,
    },
}

/// Single-subscriber event channel.
///
/// Emitting without a subscriber is a no-op; a dropped receiver detaches
/// the sender so later emits stay cheap.
#[derive(Debug, Default)]
pub struct EventBus {
    sender: Mutex<Option<UnboundedSender<EngineEvent>>>,
}

impl EventBus {
    /// Creates a bus with no subscriber attached.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a subscriber, replacing any previous one.
    pub fn subscribe(&self) -> UnboundedReceiver<EngineEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        *self.sender.lock().unwrap() = Some(tx);
        rx
    }

    /// Sends an event to the subscriber, if one is attached.
    pub fn emit(&self, event: EngineEvent) {
        let mut sender = self.sender.lock().unwrap();
        if let Some(tx) = sender.as_ref() {
            if tx.send(event).is_err() {
                // Receiver is gone; detach so we stop building events
                *sender = None;
            }
        }
    }
}
