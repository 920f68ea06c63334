//! # Change Notifications & Live Queries
//!
//! Reactive reads over the stores.
//!
//! ## How It Works
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Live Query Lifecycle                               │
//! │                                                                         │
//! │  Repository write ──► ChangeNotifier::notify(Table::Items)             │
//! │                              │  (tokio broadcast)                       │
//! │                              ▼                                          │
//! │  ┌──────────────────────────────────────────────┐                       │
//! │  │ live query task                               │                       │
//! │  │  1. subscribed before the first read          │                       │
//! │  │  2. wait for a change on a watched table      │                       │
//! │  │  3. drain queued changes (coalesce)           │                       │
//! │  │  4. re-run the query                          │                       │
//! │  │  5. publish on the watch channel              │                       │
//! │  └──────────────────────┬───────────────────────┘                       │
//! │                         ▼                                               │
//! │  watch::Receiver<T>  ← subscribers always see the latest snapshot       │
//! │                                                                         │
//! │  Last receiver dropped ──► task exits                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed re-query publishes `T::default()` (an empty list, `None`) and
//! logs a warning. Errors never reach the subscriber.

use serde::{Deserialize, Serialize};
use std::future::Future;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tokio::sync::{broadcast, watch};
use tracing::{debug, warn};

use crate::error::DbResult;

/// Capacity of the change channel. A subscriber that falls further behind
/// simply re-queries.
const CHANNEL_CAPACITY: usize = 64;

/// Tables whose changes are broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Items,
    Lists,
    SavedListItems,
    Preferences,
}

/// Broadcasts which table a write touched.
///
/// Cloning shares the same channel.
#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    tx: broadcast::Sender<Table>,
}

impl ChangeNotifier {
    /// Creates a notifier with no subscribers.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        ChangeNotifier { tx }
    }

    /// Publishes a change. Having no subscribers is not an error.
    pub fn notify(&self, table: Table) {
        let _ = self.tx.send(table);
    }

    /// Subscribes to every change published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Table> {
        self.tx.subscribe()
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs `query` now and again after every change to one of `tables`.
///
/// The returned receiver already holds the first result. Later results
/// replace it; a subscriber that is slow to look only sees the newest one.
///
/// ## Arguments
/// * `notifier` - Change source
/// * `tables` - Tables whose changes trigger a re-query
/// * `query` - Produces a fresh snapshot each call
///
/// ## Example
/// ```rust,ignore
/// let items = db.items();
/// let rx = live_query(db.notifier(), &[Table::Items], move || {
///     let items = items.clone();
///     async move { items.list(&ItemFilter::All).await }
/// })
/// .await;
/// ```
pub async fn live_query<T, F, Fut>(
    notifier: &ChangeNotifier,
    tables: &'static [Table],
    query: F,
) -> watch::Receiver<T>
where
    T: Default + Clone + Send + Sync + 'static,
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = DbResult<T>> + Send + 'static,
{
    // Subscribe first so a write racing the initial read is not missed
    let mut changes = notifier.subscribe();

    let initial = run_query(&query).await;
    let (tx, rx) = watch::channel(initial);

    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = tx.closed() => break,
                changed = next_relevant_change(&mut changes, tables) => {
                    if !changed {
                        break;
                    }
                }
            }

            let value = run_query(&query).await;
            if tx.send(value).is_err() {
                break;
            }
        }

        debug!(?tables, "Live query stopped");
    });

    rx
}

async fn run_query<T, F, Fut>(query: &F) -> T
where
    T: Default,
    F: Fn() -> Fut,
    Fut: Future<Output = DbResult<T>>,
{
    match query().await {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "Live query failed, publishing empty result");
            T::default()
        }
    }
}

/// Waits for a change to one of `tables`, then drains whatever else is
/// queued. Returns false once the notifier is gone.
async fn next_relevant_change(
    changes: &mut broadcast::Receiver<Table>,
    tables: &[Table],
) -> bool {
    loop {
        match changes.recv().await {
            Ok(table) if tables.contains(&table) => break,
            Ok(_) => continue,
            Err(RecvError::Lagged(skipped)) => {
                debug!(skipped, "Live query lagged, re-querying");
                break;
            }
            Err(RecvError::Closed) => return false,
        }
    }

    loop {
        match changes.try_recv() {
            Ok(_) | Err(TryRecvError::Lagged(_)) => continue,
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return true,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
