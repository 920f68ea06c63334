//! # List Synchronization Engine
//!
//! Keeps the live shopping list and the saved lists in step.
//!
//! ## Load / Unload
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Saved list "Groceries" (inactive)      Live items                     │
//! │  ┌──────────────────────────┐          ┌──────────────────────────┐    │
//! │  │ Milk   1 L    Dairy      │          │ Eggs  12 pcs  Dairy      │    │
//! │  │ Bread  2 pcs  Bakery     │          └──────────────────────────┘    │
//! │  └──────────────────────────┘                                          │
//! │               │ load_list                                               │
//! │               ▼                                                         │
//! │  copies every row in as a new, unbought item, then activates the list  │
//! │                                         ┌──────────────────────────┐    │
//! │  "Groceries" (ACTIVE)                   │ Eggs  12 pcs  Dairy      │    │
//! │                                         │ Milk   1 L    Dairy   +  │    │
//! │                                         │ Bread  2 pcs  Bakery  +  │    │
//! │                                         └──────────────────────────┘    │
//! │               │ unload_list                                             │
//! │               ▼                                                         │
//! │  for each saved row: delete the first live item with the same          │
//! │  name, quantity, unit and category; then deactivate all lists          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Live items carry no reference to the list they came from, so unload
//! matches by value. A hand-added item identical to a loaded one is
//! indistinguishable from it, and an item edited after loading no longer
//! matches and stays behind.
//!
//! Neither operation is one transaction. Each write is durable on its own;
//! a crash halfway through a load leaves the inserted items in place with
//! no list active.

use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{SyncError, SyncResult};
use crate::events::{ListEvent, ListEventEmitter, NoOpEmitter};
use listify_core::catalog::CatalogKind;
use listify_core::export::{ExportLayout, Page};
use listify_core::share::{format_share_text, ShareOptions};
use listify_core::validation::{validate_catalog_entry, validate_item_name, validate_list_name};
use listify_core::{ItemFilter, ListSummary, NewItem, ShoppingItem};
use listify_db::{Database, DbError};

// =============================================================================
// Outcomes
// =============================================================================

/// Result of [`ListSyncEngine::load_list`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Items were copied in and the list is now active.
    Loaded { items_added: usize },
    /// No such list; nothing changed.
    NotFound,
}

/// Result of [`ListSyncEngine::unload_list`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnloadOutcome {
    /// Matching items were removed and no list is active.
    Unloaded {
        items_removed: usize,
        /// Saved rows with no matching live item (edited or deleted since).
        items_missing: usize,
    },
    /// The list exists but isn't active; nothing changed.
    NotActive,
    /// No such list; nothing changed.
    NotFound,
}

// =============================================================================
// Engine
// =============================================================================

/// Coordinates the item, list and preference stores.
///
/// Cheap to clone; clones share the database and the emitter.
///
/// ## Usage
/// ```rust,ignore
/// let engine = ListSyncEngine::new(db);
///
/// let id = engine.save_current_selection("Groceries", &selection).await?;
/// engine.load_list(id).await?;
/// engine.unload_list(id).await?;
/// ```
#[derive(Clone)]
pub struct ListSyncEngine {
    db: Database,
    emitter: Arc<dyn ListEventEmitter>,
}

impl ListSyncEngine {
    /// Creates an engine that emits nothing.
    pub fn new(db: Database) -> Self {
        Self::with_emitter(db, Arc::new(NoOpEmitter))
    }

    /// Creates an engine with a custom event emitter.
    pub fn with_emitter(db: Database, emitter: Arc<dyn ListEventEmitter>) -> Self {
        ListSyncEngine { db, emitter }
    }

    /// The underlying database (for reads and live queries).
    pub fn database(&self) -> &Database {
        &self.db
    }

    // =========================================================================
    // Saved Lists
    // =========================================================================

    /// Saves the given items as a new, inactive list.
    ///
    /// The live items are left untouched.
    ///
    /// ## Returns
    /// * `Ok(list_id)` - The new list
    /// * `Err(SyncError::EmptySelection)` - `items` was empty ("No items to save")
    /// * `Err(SyncError::Validation)` - Blank or overlong name
    pub async fn save_current_selection(
        &self,
        name: &str,
        items: &[ShoppingItem],
    ) -> SyncResult<i64> {
        if items.is_empty() {
            return Err(SyncError::empty_selection("save"));
        }

        let name = name.trim();
        validate_list_name(name)?;

        let list_id = self.db.lists().save_snapshot(name, items).await?;

        self.emitter.emit(&ListEvent::ListSaved {
            list_id,
            name: name.to_string(),
            items: items.len(),
        });

        Ok(list_id)
    }

    /// Copies a saved list into the live items and makes it the active list.
    ///
    /// Every saved row becomes a new unbought item, even if an identical
    /// item is already there: loading twice doubles the items.
    ///
    /// ## Returns
    /// * `Ok(LoadOutcome::NotFound)` - Unknown list, nothing changed
    /// * `Err(_)` - A write failed; items inserted so far stay
    pub async fn load_list(&self, list_id: i64) -> SyncResult<LoadOutcome> {
        let Some(snapshot) = self.db.lists().get_snapshot(list_id).await? else {
            debug!(list_id, "Load skipped, list not found");
            return Ok(LoadOutcome::NotFound);
        };

        let items = self.db.items();
        for saved in &snapshot.items {
            items.insert(&NewItem::from(saved)).await?;
        }

        self.db.lists().activate(list_id).await?;

        let items_added = snapshot.items.len();
        info!(list_id, name = %snapshot.list.name, items_added, "List loaded");
        self.emitter.emit(&ListEvent::ListLoaded {
            list_id,
            items_added,
        });

        Ok(LoadOutcome::Loaded { items_added })
    }

    /// Removes a loaded list's items from the live list and deactivates it.
    ///
    /// Only acts when the list exists and is active. Each saved row removes
    /// at most one live item: the first (by category, name, id) with the
    /// same name, quantity, unit and category. Rows with no match are
    /// skipped.
    pub async fn unload_list(&self, list_id: i64) -> SyncResult<UnloadOutcome> {
        let Some(snapshot) = self.db.lists().get_snapshot(list_id).await? else {
            debug!(list_id, "Unload skipped, list not found");
            return Ok(UnloadOutcome::NotFound);
        };

        if !snapshot.list.is_active {
            debug!(list_id, "Unload skipped, list not active");
            return Ok(UnloadOutcome::NotActive);
        }

        let items = self.db.items();
        let mut items_removed = 0;
        let mut items_missing = 0;

        for saved in &snapshot.items {
            match items.find_first_matching(&saved.key()).await? {
                Some(item) => {
                    if items.delete(item.id).await? {
                        items_removed += 1;
                    }
                }
                None => {
                    debug!(list_id, name = %saved.name, "No live item matches saved row");
                    items_missing += 1;
                }
            }
        }

        self.db.lists().deactivate_all().await?;

        info!(list_id, items_removed, items_missing, "List unloaded");
        self.emitter.emit(&ListEvent::ListUnloaded {
            list_id,
            items_removed,
            items_missing,
        });

        Ok(UnloadOutcome::Unloaded {
            items_removed,
            items_missing,
        })
    }

    /// Deletes a saved list and its rows. Live items are not touched.
    ///
    /// ## Returns
    /// Whether a list was removed.
    pub async fn delete_list(&self, list_id: i64) -> SyncResult<bool> {
        let removed = self.db.lists().delete_snapshot(list_id).await?;
        if removed {
            self.emitter.emit(&ListEvent::ListDeleted { list_id });
        }
        Ok(removed)
    }

    /// Renames a saved list.
    pub async fn rename_list(&self, list_id: i64, new_name: &str) -> SyncResult<()> {
        let new_name = new_name.trim();
        validate_list_name(new_name)?;

        self.db.lists().rename(list_id, new_name).await?;

        self.emitter.emit(&ListEvent::ListRenamed {
            list_id,
            name: new_name.to_string(),
        });
        Ok(())
    }

    /// Number of rows saved in a list.
    pub async fn list_item_count(&self, list_id: i64) -> SyncResult<i64> {
        Ok(self.db.lists().count_items(list_id).await?)
    }

    // =========================================================================
    // Live Items
    // =========================================================================

    /// Adds an item to the live list.
    ///
    /// Name and category are trimmed; a blank name is rejected.
    pub async fn add_item(&self, item: NewItem) -> SyncResult<ShoppingItem> {
        let item = item.trimmed();
        validate_item_name(&item.name)?;

        let stored = self.db.items().insert(&item).await?;

        self.emitter.emit(&ListEvent::ItemsChanged);
        Ok(stored)
    }

    /// Replaces every field of an existing item.
    pub async fn update_item(&self, item: &ShoppingItem) -> SyncResult<()> {
        validate_item_name(&item.name)?;

        self.db.items().update(item).await?;

        self.emitter.emit(&ListEvent::ItemsChanged);
        Ok(())
    }

    /// Flips the bought flag of an item.
    ///
    /// ## Returns
    /// The item as stored afterwards.
    pub async fn toggle_bought(&self, item: &ShoppingItem) -> SyncResult<ShoppingItem> {
        let toggled = item.toggled();
        self.db.items().update(&toggled).await?;

        self.emitter.emit(&ListEvent::ItemsChanged);
        Ok(toggled)
    }

    /// Flips the bought flag of the item with the given id.
    pub async fn toggle_bought_by_id(&self, id: i64) -> SyncResult<ShoppingItem> {
        let item = self
            .db
            .items()
            .get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("ShoppingItem", id))?;

        self.toggle_bought(&item).await
    }

    /// Deletes an item.
    ///
    /// ## Returns
    /// The removed item (hand it to [`undo_delete`](Self::undo_delete) to
    /// restore it), or `None` if there was no such item.
    pub async fn delete_item(&self, id: i64) -> SyncResult<Option<ShoppingItem>> {
        let items = self.db.items();

        let Some(item) = items.get_by_id(id).await? else {
            return Ok(None);
        };

        if !items.delete(id).await? {
            return Ok(None);
        }

        self.emitter.emit(&ListEvent::ItemsChanged);
        Ok(Some(item))
    }

    /// Restores a deleted item with its original id and bought state.
    pub async fn undo_delete(&self, item: &ShoppingItem) -> SyncResult<ShoppingItem> {
        let restored = self.db.items().upsert(item).await?;

        self.emitter.emit(&ListEvent::ItemsChanged);
        Ok(restored)
    }

    // =========================================================================
    // Units & Categories
    // =========================================================================

    /// Adds a custom unit or category.
    ///
    /// ## Returns
    /// * `Ok(false)` - Already present
    /// * `Err(SyncError::Validation)` - Blank, too long, or contains a comma
    pub async fn add_catalog_entry(&self, kind: CatalogKind, entry: &str) -> SyncResult<bool> {
        let entry = entry.trim();
        validate_catalog_entry(kind.field(), entry)?;

        let added = self.db.preferences().add_custom_entry(kind, entry).await?;
        if added {
            self.emitter.emit(&ListEvent::CatalogChanged);
        }
        Ok(added)
    }

    /// Removes a custom unit or category.
    pub async fn delete_catalog_entry(&self, kind: CatalogKind, entry: &str) -> SyncResult<bool> {
        let removed = self
            .db
            .preferences()
            .delete_custom_entry(kind, entry.trim())
            .await?;
        if removed {
            self.emitter.emit(&ListEvent::CatalogChanged);
        }
        Ok(removed)
    }

    /// Built-in entries followed by custom ones.
    pub async fn catalog(&self, kind: CatalogKind) -> SyncResult<Vec<String>> {
        Ok(self.db.preferences().all_entries(kind).await?)
    }

    // =========================================================================
    // Share / Export / Summary
    // =========================================================================

    /// Formats the live items matching `filter` as shareable text.
    ///
    /// `None` when no items match.
    pub async fn share_text(
        &self,
        filter: &ItemFilter,
        options: &ShareOptions,
    ) -> SyncResult<Option<String>> {
        let items = self.db.items().list(filter).await?;
        Ok(format_share_text(&items, options))
    }

    /// Lays out the live items matching `filter` as export pages.
    pub async fn export_pages(&self, filter: &ItemFilter) -> SyncResult<Vec<Page>> {
        let items = self.db.items().list(filter).await?;
        Ok(ExportLayout::paginate(&items))
    }

    /// Bought/remaining counts over every live item.
    pub async fn summary(&self) -> SyncResult<ListSummary> {
        let items = self.db.items().list(&ItemFilter::All).await?;
        Ok(ListSummary::of(&items))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use listify_db::DbConfig;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingEmitter {
        events: Mutex<Vec<ListEvent>>,
    }

    impl ListEventEmitter for RecordingEmitter {
        fn emit(&self, event: &ListEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    async fn setup() -> ListSyncEngine {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        ListSyncEngine::new(db)
    }

    async fn add(engine: &ListSyncEngine, name: &str, qty: &str, unit: &str, cat: &str) -> ShoppingItem {
        engine
            .add_item(NewItem::new(name, qty, unit, cat))
            .await
            .unwrap()
    }

    async fn live(engine: &ListSyncEngine) -> Vec<ShoppingItem> {
        engine
            .database()
            .items()
            .list(&ItemFilter::All)
            .await
            .unwrap()
    }

    async fn active_id(engine: &ListSyncEngine) -> Option<i64> {
        engine
            .database()
            .lists()
            .active()
            .await
            .unwrap()
            .map(|l| l.id)
    }

    #[tokio::test]
    async fn test_save_load_unload_round_trip() {
        let engine = setup().await;
        let milk = add(&engine, "Milk", "1", "L", "Dairy").await;
        let bread = add(&engine, "Bread", "2", "pcs", "Bakery").await;

        let list_id = engine
            .save_current_selection("Groceries", &[milk.clone(), bread.clone()])
            .await
            .unwrap();
        assert!(list_id > 0);
        assert_eq!(active_id(&engine).await, None);

        // Saving doesn't consume the selection
        for item in [&milk, &bread] {
            engine.database().items().delete(item.id).await.unwrap();
        }
        assert!(live(&engine).await.is_empty());

        let outcome = engine.load_list(list_id).await.unwrap();
        assert_eq!(outcome, LoadOutcome::Loaded { items_added: 2 });

        let loaded = live(&engine).await;
        assert_eq!(loaded.len(), 2);
        assert!(loaded.iter().all(|i| !i.is_bought));
        assert!(loaded.iter().all(|i| i.id != milk.id && i.id != bread.id));
        assert_eq!(active_id(&engine).await, Some(list_id));

        let outcome = engine.unload_list(list_id).await.unwrap();
        assert_eq!(
            outcome,
            UnloadOutcome::Unloaded {
                items_removed: 2,
                items_missing: 0
            }
        );
        assert!(live(&engine).await.is_empty());
        assert_eq!(active_id(&engine).await, None);
    }

    #[tokio::test]
    async fn test_empty_selection_is_rejected() {
        let engine = setup().await;

        let err = engine.save_current_selection("Nothing", &[]).await.unwrap_err();
        assert_eq!(err.to_string(), "No items to save");
        assert!(engine.database().lists().list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_list_name_is_rejected() {
        let engine = setup().await;
        let milk = add(&engine, "Milk", "1", "L", "Dairy").await;

        let err = engine.save_current_selection("   ", &[milk]).await.unwrap_err();
        assert!(matches!(err, SyncError::Validation(_)));
    }

    #[tokio::test]
    async fn test_load_twice_duplicates_items() {
        let engine = setup().await;
        let milk = add(&engine, "Milk", "1", "L", "Dairy").await;
        let list_id = engine.save_current_selection("L", &[milk]).await.unwrap();

        engine.load_list(list_id).await.unwrap();
        engine.load_list(list_id).await.unwrap();

        let milks = live(&engine)
            .await
            .into_iter()
            .filter(|i| i.name == "Milk")
            .count();
        assert_eq!(milks, 3);
    }

    #[tokio::test]
    async fn test_load_unknown_list_is_noop() {
        let engine = setup().await;
        add(&engine, "Milk", "1", "L", "Dairy").await;

        assert_eq!(engine.load_list(404).await.unwrap(), LoadOutcome::NotFound);
        assert_eq!(live(&engine).await.len(), 1);
        assert_eq!(active_id(&engine).await, None);
    }

    #[tokio::test]
    async fn test_unload_keeps_unrelated_items() {
        let engine = setup().await;
        let milk = add(&engine, "Milk", "1", "L", "Dairy").await;
        let list_id = engine.save_current_selection("L", &[milk.clone()]).await.unwrap();
        engine.database().items().delete(milk.id).await.unwrap();

        add(&engine, "Eggs", "12", "pcs", "Dairy").await;
        engine.load_list(list_id).await.unwrap();
        engine.unload_list(list_id).await.unwrap();

        let names: Vec<String> = live(&engine).await.into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["Eggs"]);
    }

    #[tokio::test]
    async fn test_unload_inactive_list_is_noop() {
        let engine = setup().await;
        let milk = add(&engine, "Milk", "1", "L", "Dairy").await;
        let bread = add(&engine, "Bread", "2", "pcs", "Bakery").await;
        let inactive_id = engine.save_current_selection("L", &[milk]).await.unwrap();
        let loaded_id = engine.save_current_selection("Other", &[bread]).await.unwrap();
        engine.load_list(loaded_id).await.unwrap();

        let lists_before = engine.database().lists().list_all().await.unwrap();
        let items_before = live(&engine).await;

        assert_eq!(
            engine.unload_list(inactive_id).await.unwrap(),
            UnloadOutcome::NotActive
        );
        assert_eq!(
            engine.unload_list(999).await.unwrap(),
            UnloadOutcome::NotFound
        );

        assert_eq!(live(&engine).await, items_before);
        assert_eq!(
            engine.database().lists().list_all().await.unwrap(),
            lists_before
        );
        assert_eq!(active_id(&engine).await, Some(loaded_id));
    }

    #[tokio::test]
    async fn test_unload_skips_edited_items() {
        let engine = setup().await;
        let milk = add(&engine, "Milk", "1", "L", "Dairy").await;
        let bread = add(&engine, "Bread", "2", "pcs", "Bakery").await;
        let list_id = engine
            .save_current_selection("L", &[milk.clone(), bread.clone()])
            .await
            .unwrap();
        engine.database().items().delete(milk.id).await.unwrap();
        engine.database().items().delete(bread.id).await.unwrap();

        engine.load_list(list_id).await.unwrap();

        let mut loaded_milk = live(&engine)
            .await
            .into_iter()
            .find(|i| i.name == "Milk")
            .unwrap();
        loaded_milk.quantity = "2".to_string();
        engine.update_item(&loaded_milk).await.unwrap();

        let outcome = engine.unload_list(list_id).await.unwrap();
        assert_eq!(
            outcome,
            UnloadOutcome::Unloaded {
                items_removed: 1,
                items_missing: 1
            }
        );
        assert_eq!(live(&engine).await, vec![loaded_milk]);
        assert_eq!(active_id(&engine).await, None);
    }

    #[tokio::test]
    async fn test_unload_removes_one_item_per_duplicate_row() {
        let engine = setup().await;
        let a = add(&engine, "Milk", "1", "L", "Dairy").await;
        let b = add(&engine, "Milk", "1", "L", "Dairy").await;
        let list_id = engine
            .save_current_selection("Double", &[a.clone(), b.clone()])
            .await
            .unwrap();

        engine.load_list(list_id).await.unwrap();
        assert_eq!(live(&engine).await.len(), 4);

        engine.unload_list(list_id).await.unwrap();
        assert_eq!(live(&engine).await.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_and_rename_list() {
        let engine = setup().await;
        let milk = add(&engine, "Milk", "1", "L", "Dairy").await;
        let list_id = engine.save_current_selection("Old", &[milk]).await.unwrap();

        engine.rename_list(list_id, "  New  ").await.unwrap();
        let list = engine.database().lists().get_by_id(list_id).await.unwrap().unwrap();
        assert_eq!(list.name, "New");
        assert_eq!(engine.list_item_count(list_id).await.unwrap(), 1);

        assert!(engine.delete_list(list_id).await.unwrap());
        assert_eq!(engine.list_item_count(list_id).await.unwrap(), 0);
        assert!(engine
            .database()
            .lists()
            .get_snapshot(list_id)
            .await
            .unwrap()
            .is_none());

        let err = engine.rename_list(list_id, "Gone").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_add_item_trims_and_validates() {
        let engine = setup().await;

        let item = add(&engine, "  Milk ", "1", "L", " Dairy ").await;
        assert_eq!(item.name, "Milk");
        assert_eq!(item.category, "Dairy");

        let err = engine
            .add_item(NewItem::new("  ", "1", "L", "Dairy"))
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::Validation(_)));
    }

    #[tokio::test]
    async fn test_toggle_delete_and_undo() {
        let engine = setup().await;
        let milk = add(&engine, "Milk", "1", "L", "Dairy").await;

        let toggled = engine.toggle_bought_by_id(milk.id).await.unwrap();
        assert!(toggled.is_bought);

        let removed = engine.delete_item(milk.id).await.unwrap().unwrap();
        assert!(live(&engine).await.is_empty());
        assert!(engine.delete_item(milk.id).await.unwrap().is_none());

        let restored = engine.undo_delete(&removed).await.unwrap();
        assert_eq!(restored.id, milk.id);
        assert!(restored.is_bought);
        assert_eq!(live(&engine).await, vec![restored]);

        assert!(engine.toggle_bought_by_id(404).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_catalog_entries() {
        let engine = setup().await;

        assert!(engine.add_catalog_entry(CatalogKind::Unit, " jar ").await.unwrap());
        assert!(!engine.add_catalog_entry(CatalogKind::Unit, "jar").await.unwrap());

        let err = engine
            .add_catalog_entry(CatalogKind::Category, "Fruit,Veg")
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::Validation(_)));

        let units = engine.catalog(CatalogKind::Unit).await.unwrap();
        assert_eq!(units.first().map(String::as_str), Some("pcs"));
        assert_eq!(units.last().map(String::as_str), Some("jar"));

        assert!(engine.delete_catalog_entry(CatalogKind::Unit, "jar").await.unwrap());
        assert!(engine.catalog(CatalogKind::Category).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_share_export_and_summary() {
        let engine = setup().await;
        let milk = add(&engine, "Milk", "1", "L", "Dairy").await;
        add(&engine, "Bread", "2", "pcs", "Bakery").await;
        engine.toggle_bought(&milk).await.unwrap();

        let text = engine
            .share_text(&ItemFilter::All, &ShareOptions::default())
            .await
            .unwrap()
            .unwrap();
        assert!(text.contains("*📦 BAKERY*"));
        assert!(text.contains("~Milk _(1 L)_~"));

        assert!(engine
            .share_text(&ItemFilter::Category("Frozen".into()), &ShareOptions::default())
            .await
            .unwrap()
            .is_none());

        let pages = engine.export_pages(&ItemFilter::All).await.unwrap();
        assert_eq!(pages.len(), 1);

        let summary = engine.summary().await.unwrap();
        assert_eq!((summary.total, summary.bought, summary.progress_percent), (2, 1, 50));
    }

    #[tokio::test]
    async fn test_events_emitted_on_mutations() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let recorder = Arc::new(RecordingEmitter::default());
        let engine = ListSyncEngine::with_emitter(db, recorder.clone());

        let milk = add(&engine, "Milk", "1", "L", "Dairy").await;
        let list_id = engine.save_current_selection("L", &[milk]).await.unwrap();
        engine.load_list(list_id).await.unwrap();
        engine.load_list(404).await.unwrap();
        engine.unload_list(list_id).await.unwrap();

        let events = recorder.events.lock().unwrap().clone();
        assert_eq!(
            events,
            vec![
                ListEvent::ItemsChanged,
                ListEvent::ListSaved {
                    list_id,
                    name: "L".to_string(),
                    items: 1
                },
                ListEvent::ListLoaded {
                    list_id,
                    items_added: 1
                },
                ListEvent::ListUnloaded {
                    list_id,
                    items_removed: 1,
                    items_missing: 0
                },
            ]
        );
    }
}
