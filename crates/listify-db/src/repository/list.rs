//! # List Repository
//!
//! Saved lists ("templates") and their frozen item copies.
//!
//! ## Snapshot Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    save_snapshot("Groceries", items)                    │
//! │                                                                         │
//! │  BEGIN                                                                 │
//! │   ├── INSERT shopping_lists   (name, created_at, is_active = 0)        │
//! │   └── INSERT saved_list_items (one per item, input order)              │
//! │       copies name / quantity / unit / category only                    │
//! │       bought state and item ids are NOT carried over                   │
//! │  COMMIT                                                                │
//! │                                                                         │
//! │  delete_snapshot(id) → saved_list_items go with it (ON DELETE CASCADE) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Active List
//! At most one list has `is_active = 1`. [`ListRepository::activate`] clears
//! the flag everywhere and sets it on the target inside one transaction, so
//! no reader ever sees two active lists.

use chrono::Utc;
use sqlx::SqlitePool;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use crate::notify::{live_query, ChangeNotifier, Table};
use listify_core::{ListSnapshot, SavedListItem, ShoppingItem, ShoppingList};

const SELECT_LISTS: &str = "SELECT id, name, created_at, is_active FROM shopping_lists";

/// Repository for saved lists.
#[derive(Debug, Clone)]
pub struct ListRepository {
    pool: SqlitePool,
    notifier: ChangeNotifier,
}

impl ListRepository {
    /// Creates a new ListRepository.
    pub fn new(pool: SqlitePool, notifier: ChangeNotifier) -> Self {
        ListRepository { pool, notifier }
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    /// Saves a named snapshot of the given items.
    ///
    /// ## Arguments
    /// * `name` - Display name of the new list
    /// * `items` - Items to capture, in the order they should be stored
    ///
    /// ## Returns
    /// * `Ok(list_id)` - The new, inactive list
    /// * `Err(DbError::EmptySnapshot)` - `items` was empty; nothing was written
    pub async fn save_snapshot(&self, name: &str, items: &[ShoppingItem]) -> DbResult<i64> {
        if items.is_empty() {
            return Err(DbError::EmptySnapshot);
        }

        debug!(name = %name, count = items.len(), "Saving list snapshot");

        let mut tx = self.pool.begin().await?;

        let list_id = sqlx::query(
            "INSERT INTO shopping_lists (name, created_at, is_active) VALUES (?1, ?2, 0)",
        )
        .bind(name)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        for item in items {
            sqlx::query(
                r#"
                INSERT INTO saved_list_items (list_id, name, quantity, unit, category)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(list_id)
            .bind(&item.name)
            .bind(&item.quantity)
            .bind(&item.unit)
            .bind(&item.category)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!(list_id, name = %name, count = items.len(), "List saved");
        self.notifier.notify(Table::Lists);
        self.notifier.notify(Table::SavedListItems);

        Ok(list_id)
    }

    /// Gets a list together with its saved items (insertion order).
    pub async fn get_snapshot(&self, list_id: i64) -> DbResult<Option<ListSnapshot>> {
        let Some(list) = self.get_by_id(list_id).await? else {
            return Ok(None);
        };

        let items = sqlx::query_as::<_, SavedListItem>(
            r#"
            SELECT id, list_id, name, quantity, unit, category
            FROM saved_list_items
            WHERE list_id = ?1
            ORDER BY id
            "#,
        )
        .bind(list_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(ListSnapshot { list, items }))
    }

    /// Deletes a list and, by cascade, its saved items.
    ///
    /// ## Returns
    /// Whether a list was removed.
    pub async fn delete_snapshot(&self, list_id: i64) -> DbResult<bool> {
        debug!(list_id, "Deleting list");

        let result = sqlx::query("DELETE FROM shopping_lists WHERE id = ?1")
            .bind(list_id)
            .execute(&self.pool)
            .await?;

        let removed = result.rows_affected() > 0;
        if removed {
            self.notifier.notify(Table::Lists);
            self.notifier.notify(Table::SavedListItems);
        }

        Ok(removed)
    }

    /// Renames a list.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - No list with that id
    pub async fn rename(&self, list_id: i64, new_name: &str) -> DbResult<()> {
        debug!(list_id, new_name = %new_name, "Renaming list");

        let result = sqlx::query("UPDATE shopping_lists SET name = ?2 WHERE id = ?1")
            .bind(list_id)
            .bind(new_name)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("ShoppingList", list_id));
        }

        self.notifier.notify(Table::Lists);
        Ok(())
    }

    /// Number of saved items in a list (zero for an unknown list).
    pub async fn count_items(&self, list_id: i64) -> DbResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM saved_list_items WHERE list_id = ?1")
                .bind(list_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    // =========================================================================
    // Lists
    // =========================================================================

    /// Gets a list header by id.
    pub async fn get_by_id(&self, list_id: i64) -> DbResult<Option<ShoppingList>> {
        let list = sqlx::query_as::<_, ShoppingList>(&format!("{} WHERE id = ?1", SELECT_LISTS))
            .bind(list_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(list)
    }

    /// All lists, newest first.
    pub async fn list_all(&self) -> DbResult<Vec<ShoppingList>> {
        let lists = sqlx::query_as::<_, ShoppingList>(&format!(
            "{} ORDER BY created_at DESC, id DESC",
            SELECT_LISTS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(lists)
    }

    /// The active list, if any.
    pub async fn active(&self) -> DbResult<Option<ShoppingList>> {
        let list = sqlx::query_as::<_, ShoppingList>(&format!(
            "{} WHERE is_active = 1 LIMIT 1",
            SELECT_LISTS
        ))
        .fetch_optional(&self.pool)
        .await?;

        Ok(list)
    }

    // =========================================================================
    // Activation
    // =========================================================================

    /// Makes `list_id` the only active list.
    ///
    /// ## Returns
    /// * `Ok(())` - The list is now the only active one
    /// * `Err(DbError::NotFound)` - Unknown id; every list is left inactive
    pub async fn activate(&self, list_id: i64) -> DbResult<()> {
        debug!(list_id, "Activating list");

        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE shopping_lists SET is_active = 0 WHERE is_active = 1")
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("UPDATE shopping_lists SET is_active = 1 WHERE id = ?1")
            .bind(list_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        self.notifier.notify(Table::Lists);

        if result.rows_affected() == 0 {
            warn!(list_id, "Activated unknown list, no list is active");
            return Err(DbError::not_found("ShoppingList", list_id));
        }

        Ok(())
    }

    /// Clears the active flag on every list.
    pub async fn deactivate_all(&self) -> DbResult<()> {
        debug!("Deactivating all lists");

        sqlx::query("UPDATE shopping_lists SET is_active = 0 WHERE is_active = 1")
            .execute(&self.pool)
            .await?;

        self.notifier.notify(Table::Lists);
        Ok(())
    }

    // =========================================================================
    // Live Queries
    // =========================================================================

    /// Continuously updated result of [`list_all`](Self::list_all).
    pub async fn observe_all(&self) -> watch::Receiver<Vec<ShoppingList>> {
        let repo = self.clone();
        live_query(&self.notifier, &[Table::Lists], move || {
            let repo = repo.clone();
            async move { repo.list_all().await }
        })
        .await
    }

    /// Continuously updated result of [`active`](Self::active).
    pub async fn observe_active(&self) -> watch::Receiver<Option<ShoppingList>> {
        let repo = self.clone();
        live_query(&self.notifier, &[Table::Lists], move || {
            let repo = repo.clone();
            async move { repo.active().await }
        })
        .await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use std::time::Duration;

    async fn setup() -> ListRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().lists()
    }

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

    async fn active_count(repo: &ListRepository) -> usize {
        repo.list_all()
            .await
            .unwrap()
            .iter()
            .filter(|l| l.is_active)
            .count()
    }

    #[tokio::test]
    async fn test_empty_snapshot_is_rejected_without_writes() {
        let repo = setup().await;

        let err = repo.save_snapshot("Nothing", &[]).await.unwrap_err();
        assert!(matches!(err, DbError::EmptySnapshot));
        assert!(repo.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_copies_fields_in_order() {
        let repo = setup().await;
        let items = vec![
            item(10, "Milk", "Dairy", true),
            item(11, "Bread", "Bakery", false),
        ];

        let list_id = repo.save_snapshot("Groceries", &items).await.unwrap();
        assert!(list_id > 0);

        let snapshot = repo.get_snapshot(list_id).await.unwrap().unwrap();
        assert_eq!(snapshot.list.name, "Groceries");
        assert!(!snapshot.list.is_active);
        assert_eq!(snapshot.items.len(), 2);

        for (saved, original) in snapshot.items.iter().zip(&items) {
            assert_eq!(saved.key(), original.key());
            assert_eq!(saved.list_id, list_id);
            assert_ne!(saved.id, original.id);
        }
        assert_eq!(repo.count_items(list_id).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_activate_keeps_at_most_one_active() {
        let repo = setup().await;
        let a = repo.save_snapshot("A", &[item(1, "x", "c", false)]).await.unwrap();
        let b = repo.save_snapshot("B", &[item(1, "y", "c", false)]).await.unwrap();

        for id in [a, b, b, a] {
            repo.activate(id).await.unwrap();
            assert_eq!(active_count(&repo).await, 1);
            assert_eq!(repo.active().await.unwrap().map(|l| l.id), Some(id));
        }

        repo.deactivate_all().await.unwrap();
        assert_eq!(active_count(&repo).await, 0);
        assert!(repo.active().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_activate_unknown_list_leaves_none_active() {
        let repo = setup().await;
        let a = repo.save_snapshot("A", &[item(1, "x", "c", false)]).await.unwrap();
        repo.activate(a).await.unwrap();

        let err = repo.activate(9999).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(active_count(&repo).await, 0);
    }

    #[tokio::test]
    async fn test_delete_snapshot_cascades() {
        let repo = setup().await;
        let id = repo
            .save_snapshot("Party", &[item(1, "Chips", "Snacks", false)])
            .await
            .unwrap();

        assert!(repo.delete_snapshot(id).await.unwrap());
        assert!(repo.get_snapshot(id).await.unwrap().is_none());
        assert_eq!(repo.count_items(id).await.unwrap(), 0);
        assert!(!repo.delete_snapshot(id).await.unwrap());
    }

    #[tokio::test]
    async fn test_rename() {
        let repo = setup().await;
        let id = repo.save_snapshot("Old", &[item(1, "x", "c", false)]).await.unwrap();

        repo.rename(id, "New").await.unwrap();
        assert_eq!(repo.get_by_id(id).await.unwrap().unwrap().name, "New");

        assert!(repo.rename(404, "Nope").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_list_all_newest_first() {
        let repo = setup().await;
        let first = repo.save_snapshot("First", &[item(1, "x", "c", false)]).await.unwrap();
        let second = repo.save_snapshot("Second", &[item(1, "x", "c", false)]).await.unwrap();

        let ids: Vec<i64> = repo.list_all().await.unwrap().iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![second, first]);
    }

    #[tokio::test]
    async fn test_observe_active_follows_activation() {
        let repo = setup().await;
        let id = repo.save_snapshot("A", &[item(1, "x", "c", false)]).await.unwrap();

        let mut rx = repo.observe_active().await;
        assert!(rx.borrow_and_update().is_none());

        repo.activate(id).await.unwrap();
        tokio::time::timeout(Duration::from_secs(1), rx.changed())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(rx.borrow_and_update().as_ref().map(|l| l.id), Some(id));
    }
}
