//! # Shopping Session
//!
//! The API a screen talks to: the current filter selections, one combined
//! reactive state, and the user's commands.
//!
//! ## State Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  items (live) ──────────┐                                              │
//! │  categories (live) ─────┤                                              │
//! │  saved lists (live) ────┤                                              │
//! │  active list (live) ────┼──► compose ──► watch<ShoppingUiState>        │
//! │  filter ────────────────┤        ▲                                     │
//! │  category ──────────────┤        │ any source changes                  │
//! │  search ────────────────┘        │ (latest values win)                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Commands
//! - Item commands (add, toggle, delete, undo) log failures and return
//!   nothing. The live state is the feedback.
//! - List commands (save, load, unload, delete, rename) return a
//!   [`CommandResult`] whose error message is meant for display.

use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::engine::{ListSyncEngine, LoadOutcome, UnloadOutcome};
use crate::error::{CommandError, CommandResult};
use listify_core::validation::normalize_search_query;
use listify_core::{FilterType, ItemFilter, NewItem, ShoppingItem, ShoppingList};

/// Message shown when a save produced no usable list id.
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save list";

// =============================================================================
// UI State
// =============================================================================

/// Everything a shopping list screen renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingUiState {
    /// Live items after the filter, category and search are applied.
    pub items: Vec<ShoppingItem>,

    /// Distinct categories of all live items.
    pub categories: Vec<String>,

    pub selected_filter: FilterType,
    pub selected_category: Option<String>,
    pub search_query: String,

    /// Saved lists, newest first.
    pub saved_lists: Vec<ShoppingList>,

    pub active_list: Option<ShoppingList>,
}

/// Applies the screen's selections to the live items.
///
/// Filter type first, then exact category, then a case-insensitive
/// substring match on name or category. A blank query matches everything;
/// any other query is matched as typed, spaces included.
pub fn visible_items(
    items: &[ShoppingItem],
    filter: FilterType,
    category: Option<&str>,
    search: &str,
) -> Vec<ShoppingItem> {
    let query = normalize_search_query(search);

    items
        .iter()
        .filter(|item| filter.accepts(item))
        .filter(|item| category.map_or(true, |c| item.category == c))
        .filter(|item| match &query {
            Some(q) => {
                item.name.to_lowercase().contains(q) || item.category.to_lowercase().contains(q)
            }
            None => true,
        })
        .cloned()
        .collect()
}

// =============================================================================
// Session
// =============================================================================

/// One screen's view of the shopping list.
pub struct ShoppingSession {
    engine: ListSyncEngine,
    filter_tx: watch::Sender<FilterType>,
    category_tx: watch::Sender<Option<String>>,
    search_tx: watch::Sender<String>,
}

impl ShoppingSession {
    /// Creates a session with no filter, category or search selected.
    pub fn new(engine: ListSyncEngine) -> Self {
        let (filter_tx, _) = watch::channel(FilterType::All);
        let (category_tx, _) = watch::channel(None);
        let (search_tx, _) = watch::channel(String::new());

        ShoppingSession {
            engine,
            filter_tx,
            category_tx,
            search_tx,
        }
    }

    pub fn engine(&self) -> &ListSyncEngine {
        &self.engine
    }

    // =========================================================================
    // Selections
    // =========================================================================

    pub fn set_filter(&self, filter: FilterType) {
        self.filter_tx.send_replace(filter);
    }

    /// Restricts the items to one category, or clears it with `None`.
    pub fn set_category(&self, category: Option<String>) {
        self.category_tx.send_replace(category);
    }

    pub fn set_search_query(&self, query: impl Into<String>) {
        self.search_tx.send_replace(query.into());
    }

    // =========================================================================
    // Combined State
    // =========================================================================

    /// Subscribes to the combined screen state.
    ///
    /// The receiver holds the current state immediately and is updated
    /// whenever an item, list, or selection changes. Bursts of changes may
    /// be delivered as one update. Dropping the receiver stops the
    /// background task and the live queries it holds.
    pub async fn state(&self) -> watch::Receiver<ShoppingUiState> {
        let db = self.engine.database();

        let mut items = db.items().observe(ItemFilter::All).await;
        let mut categories = db.items().observe_categories().await;
        let mut saved_lists = db.lists().observe_all().await;
        let mut active_list = db.lists().observe_active().await;
        let mut filter = self.filter_tx.subscribe();
        let mut category = self.category_tx.subscribe();
        let mut search = self.search_tx.subscribe();

        let initial = compose(
            &mut items,
            &mut categories,
            &mut saved_lists,
            &mut active_list,
            &mut filter,
            &mut category,
            &mut search,
        );
        let (tx, rx) = watch::channel(initial);

        tokio::spawn(async move {
            loop {
                let alive = tokio::select! {
                    _ = tx.closed() => false,
                    r = items.changed() => r.is_ok(),
                    r = categories.changed() => r.is_ok(),
                    r = saved_lists.changed() => r.is_ok(),
                    r = active_list.changed() => r.is_ok(),
                    r = filter.changed() => r.is_ok(),
                    r = category.changed() => r.is_ok(),
                    r = search.changed() => r.is_ok(),
                };

                if !alive {
                    break;
                }

                let state = compose(
                    &mut items,
                    &mut categories,
                    &mut saved_lists,
                    &mut active_list,
                    &mut filter,
                    &mut category,
                    &mut search,
                );

                if tx.send(state).is_err() {
                    break;
                }
            }

            debug!("Session state stopped");
        });

        rx
    }

    // =========================================================================
    // Item Commands
    // =========================================================================

    pub async fn add_item(&self, item: NewItem) {
        if let Err(e) = self.engine.add_item(item).await {
            warn!(error = %e, "Failed to add item");
        }
    }

    pub async fn toggle_bought(&self, item: &ShoppingItem) {
        if let Err(e) = self.engine.toggle_bought(item).await {
            warn!(id = item.id, error = %e, "Failed to toggle item");
        }
    }

    /// Deletes an item. Keep `item` around to offer an undo.
    pub async fn delete_item(&self, item: &ShoppingItem) {
        if let Err(e) = self.engine.delete_item(item.id).await {
            warn!(id = item.id, error = %e, "Failed to delete item");
        }
    }

    pub async fn undo_delete(&self, item: &ShoppingItem) {
        if let Err(e) = self.engine.undo_delete(item).await {
            warn!(id = item.id, error = %e, "Failed to restore item");
        }
    }

    // =========================================================================
    // List Commands
    // =========================================================================

    /// Saves the selected items as a new list.
    ///
    /// ## Errors
    /// * "No items to save" - `items` was empty
    /// * "Failed to save list" - The store returned no usable id
    /// * Anything else - The underlying error's message
    pub async fn save_current_list(&self, name: &str, items: &[ShoppingItem]) -> CommandResult {
        match self.engine.save_current_selection(name, items).await {
            Ok(list_id) if list_id > 0 => Ok(()),
            Ok(list_id) => {
                warn!(list_id, "Save returned an invalid list id");
                Err(CommandError::internal(SAVE_FAILED_MESSAGE))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Loads a saved list into the live items. An unknown list is a no-op.
    pub async fn load_list(&self, list_id: i64) -> CommandResult {
        match self.engine.load_list(list_id).await? {
            LoadOutcome::Loaded { .. } => {}
            LoadOutcome::NotFound => debug!(list_id, "Nothing to load"),
        }
        Ok(())
    }

    /// Removes a loaded list's items. An unknown or inactive list is a no-op.
    pub async fn unload_list(&self, list_id: i64) -> CommandResult {
        match self.engine.unload_list(list_id).await? {
            UnloadOutcome::Unloaded { .. } => {}
            other => debug!(list_id, ?other, "Nothing to unload"),
        }
        Ok(())
    }

    pub async fn delete_list(&self, list_id: i64) -> CommandResult {
        self.engine.delete_list(list_id).await?;
        Ok(())
    }

    pub async fn rename_list(&self, list_id: i64, new_name: &str) -> CommandResult {
        self.engine.rename_list(list_id, new_name).await?;
        Ok(())
    }
}

fn compose(
    items: &mut watch::Receiver<Vec<ShoppingItem>>,
    categories: &mut watch::Receiver<Vec<String>>,
    saved_lists: &mut watch::Receiver<Vec<ShoppingList>>,
    active_list: &mut watch::Receiver<Option<ShoppingList>>,
    filter: &mut watch::Receiver<FilterType>,
    category: &mut watch::Receiver<Option<String>>,
    search: &mut watch::Receiver<String>,
) -> ShoppingUiState {
    let selected_filter = *filter.borrow_and_update();
    let selected_category = category.borrow_and_update().clone();
    let search_query = search.borrow_and_update().clone();

    let items = visible_items(
        &items.borrow_and_update(),
        selected_filter,
        selected_category.as_deref(),
        &search_query,
    );

    ShoppingUiState {
        items,
        categories: categories.borrow_and_update().clone(),
        selected_filter,
        selected_category,
        search_query,
        saved_lists: saved_lists.borrow_and_update().clone(),
        active_list: active_list.borrow_and_update().clone(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use listify_db::{Database, DbConfig};
    use std::time::Duration;

    fn item(id: i64, name: &str, category: &str, bought: bool) -> ShoppingItem {
        ShoppingItem {
            id,
            name: name.to_string(),
            quantity: "1".to_string(),
            unit: "pcs".to_string(),
            category: category.to_string(),
            is_bought: bought,
        }
    }

    async fn setup() -> ShoppingSession {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        ShoppingSession::new(ListSyncEngine::new(db))
    }

    async fn wait_for(
        rx: &mut watch::Receiver<ShoppingUiState>,
        pred: impl Fn(&ShoppingUiState) -> bool,
    ) -> ShoppingUiState {
        tokio::time::timeout(Duration::from_secs(2), async {
            loop {
                {
                    let state = rx.borrow_and_update();
                    if pred(&state) {
                        return state.clone();
                    }
                }
                rx.changed().await.unwrap();
            }
        })
        .await
        .unwrap()
    }

    #[test]
    fn test_visible_items_filter_order() {
        let items = vec![
            item(1, "Bread", "Bakery", false),
            item(2, "Milk", "Dairy", true),
            item(3, "Yogurt", "Dairy", false),
        ];

        let to_buy = visible_items(&items, FilterType::ToBuy, None, "");
        assert_eq!(to_buy.iter().map(|i| i.id).collect::<Vec<_>>(), vec![1, 3]);

        let dairy = visible_items(&items, FilterType::All, Some("Dairy"), "");
        assert_eq!(dairy.len(), 2);

        let bought_dairy = visible_items(&items, FilterType::Bought, Some("Dairy"), "");
        assert_eq!(bought_dairy, vec![items[1].clone()]);
    }

    #[test]
    fn test_visible_items_search() {
        let items = vec![
            item(1, "Bread", "Bakery", false),
            item(2, "Milk", "Dairy", false),
        ];

        // Name or category, case-insensitive
        assert_eq!(visible_items(&items, FilterType::All, None, "MIL").len(), 1);
        assert_eq!(visible_items(&items, FilterType::All, None, "bak").len(), 1);
        assert_eq!(visible_items(&items, FilterType::All, None, "   ").len(), 2);
        assert!(visible_items(&items, FilterType::All, Some("Dairy"), "bread").is_empty());

        // Whitespace in a non-blank query is matched literally
        assert!(visible_items(&items, FilterType::All, None, " milk").is_empty());
        assert_eq!(visible_items(&items, FilterType::All, None, "milk").len(), 1);
    }

    #[tokio::test]
    async fn test_state_follows_items_and_selections() {
        let session = setup().await;
        let mut rx = session.state().await;
        assert_eq!(*rx.borrow(), ShoppingUiState::default());

        session.add_item(NewItem::new("Milk", "1", "L", "Dairy")).await;
        session.add_item(NewItem::new("Bread", "2", "pcs", "Bakery")).await;

        let state = wait_for(&mut rx, |s| s.items.len() == 2 && s.categories.len() == 2).await;
        assert_eq!(state.categories, vec!["Bakery", "Dairy"]);

        session.set_category(Some("Dairy".to_string()));
        let state = wait_for(&mut rx, |s| s.selected_category.is_some()).await;
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].name, "Milk");

        session.set_category(None);
        session.set_search_query("bre");
        let state = wait_for(&mut rx, |s| s.search_query == "bre" && s.selected_category.is_none()).await;
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].name, "Bread");

        let bread = state.items[0].clone();
        session.set_search_query("");
        session.toggle_bought(&bread).await;
        session.set_filter(FilterType::Bought);
        let state = wait_for(&mut rx, |s| {
            s.selected_filter == FilterType::Bought && s.items.len() == 1 && s.items[0].is_bought
        })
        .await;
        assert_eq!(state.items[0].id, bread.id);
    }

    #[tokio::test]
    async fn test_state_tracks_saved_and_active_lists() {
        let session = setup().await;
        let mut rx = session.state().await;

        session.add_item(NewItem::new("Milk", "1", "L", "Dairy")).await;
        let items = wait_for(&mut rx, |s| s.items.len() == 1).await.items;

        session.save_current_list("Groceries", &items).await.unwrap();
        let state = wait_for(&mut rx, |s| s.saved_lists.len() == 1).await;
        let list_id = state.saved_lists[0].id;
        assert!(state.active_list.is_none());

        session.load_list(list_id).await.unwrap();
        let state = wait_for(&mut rx, |s| s.active_list.is_some() && s.items.len() == 2).await;
        assert_eq!(state.active_list.unwrap().name, "Groceries");

        session.unload_list(list_id).await.unwrap();
        let state = wait_for(&mut rx, |s| s.active_list.is_none() && s.items.len() == 1).await;
        assert_eq!(state.items[0].name, "Milk");
    }

    #[tokio::test]
    async fn test_delete_and_undo() {
        let session = setup().await;
        let mut rx = session.state().await;

        session.add_item(NewItem::new("Milk", "1", "L", "Dairy")).await;
        let milk = wait_for(&mut rx, |s| s.items.len() == 1).await.items[0].clone();

        session.delete_item(&milk).await;
        wait_for(&mut rx, |s| s.items.is_empty()).await;

        session.undo_delete(&milk).await;
        let state = wait_for(&mut rx, |s| s.items.len() == 1).await;
        assert_eq!(state.items[0], milk);
    }

    #[tokio::test]
    async fn test_save_command_messages() {
        let session = setup().await;

        let err = session.save_current_list("Empty", &[]).await.unwrap_err();
        assert_eq!(err.message, "No items to save");
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = session
            .save_current_list(" ", &[item(1, "Milk", "Dairy", false)])
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_list_commands_on_unknown_list() {
        let session = setup().await;

        assert!(session.load_list(42).await.is_ok());
        assert!(session.unload_list(42).await.is_ok());
        assert!(session.delete_list(42).await.is_ok());

        let err = session.rename_list(42, "Other").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_failed_add_is_swallowed() {
        let session = setup().await;
        session.add_item(NewItem::new("", "1", "L", "Dairy")).await;

        let count = session.engine().database().items().count().await.unwrap();
        assert_eq!(count, 0);
    }
}
