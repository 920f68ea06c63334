//! # Engine Events
//!
//! Notifications emitted after each successful engine mutation, for
//! consumers that don't hold a live query (home-screen widgets, the CLI's
//! log output).

use serde::Serialize;
use tracing::debug;

/// What changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ListEvent {
    /// Live items were added, edited, toggled or removed.
    ItemsChanged,

    /// A list was saved from a selection.
    ListSaved { list_id: i64, name: String, items: usize },

    /// A saved list was copied into the live items and activated.
    ListLoaded { list_id: i64, items_added: usize },

    /// A loaded list was removed from the live items and deactivated.
    ListUnloaded {
        list_id: i64,
        items_removed: usize,
        items_missing: usize,
    },

    /// A saved list was deleted.
    ListDeleted { list_id: i64 },

    /// A saved list was renamed.
    ListRenamed { list_id: i64, name: String },

    /// Custom units or categories changed.
    CatalogChanged,
}

/// Receiver of engine events.
pub trait ListEventEmitter: Send + Sync {
    /// Called once per successful mutation.
    fn emit(&self, event: &ListEvent);
}

/// Discards every event.
pub struct NoOpEmitter;

impl ListEventEmitter for NoOpEmitter {
    fn emit(&self, _event: &ListEvent) {}
}

/// Logs every event at debug level.
pub struct LogEmitter;

impl ListEventEmitter for LogEmitter {
    fn emit(&self, event: &ListEvent) {
        debug!(?event, "List event");
    }
}
