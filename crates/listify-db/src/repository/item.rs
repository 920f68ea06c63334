//! # Item Repository
//!
//! Database operations for the live shopping list.
//!
//! ## Ordering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  list(All | ToBuy | Bought)   ORDER BY category, name, id              │
//! │  list(Category(c))            WHERE category = c ORDER BY name, id     │
//! │  categories()                 SELECT DISTINCT category ORDER BY 1      │
//! │  find_first_matching(key)     first row of list(All) equal to key      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Names are not unique: the same item can appear any number of times.

use sqlx::SqlitePool;
use tokio::sync::watch;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::notify::{live_query, ChangeNotifier, Table};
use listify_core::{ItemFilter, ItemKey, NewItem, ShoppingItem};

const SELECT_ITEMS: &str = "SELECT id, name, quantity, unit, category, is_bought FROM shopping_items";

/// Repository for live shopping items.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
    notifier: ChangeNotifier,
}

impl ItemRepository {
    /// Creates a new ItemRepository.
    pub fn new(pool: SqlitePool, notifier: ChangeNotifier) -> Self {
        ItemRepository { pool, notifier }
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Appends a new, unbought item.
    ///
    /// ## Returns
    /// The stored item with its freshly assigned id.
    pub async fn insert(&self, item: &NewItem) -> DbResult<ShoppingItem> {
        debug!(name = %item.name, category = %item.category, "Inserting item");

        let result = sqlx::query(
            r#"
            INSERT INTO shopping_items (name, quantity, unit, category, is_bought)
            VALUES (?1, ?2, ?3, ?4, 0)
            "#,
        )
        .bind(&item.name)
        .bind(&item.quantity)
        .bind(&item.unit)
        .bind(&item.category)
        .execute(&self.pool)
        .await?;

        self.notifier.notify(Table::Items);

        Ok(ShoppingItem {
            id: result.last_insert_rowid(),
            name: item.name.clone(),
            quantity: item.quantity.clone(),
            unit: item.unit.clone(),
            category: item.category.clone(),
            is_bought: false,
        })
    }

    /// Inserts an item, replacing any existing row with the same id.
    ///
    /// An id of zero or less gets a fresh id assigned. A positive id is kept,
    /// which is how a deleted item is restored in place.
    pub async fn upsert(&self, item: &ShoppingItem) -> DbResult<ShoppingItem> {
        debug!(id = item.id, name = %item.name, "Upserting item");

        let id = if item.id > 0 {
            sqlx::query(
                r#"
                INSERT OR REPLACE INTO shopping_items
                    (id, name, quantity, unit, category, is_bought)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )
            .bind(item.id)
            .bind(&item.name)
            .bind(&item.quantity)
            .bind(&item.unit)
            .bind(&item.category)
            .bind(item.is_bought)
            .execute(&self.pool)
            .await?;

            item.id
        } else {
            sqlx::query(
                r#"
                INSERT INTO shopping_items (name, quantity, unit, category, is_bought)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(&item.name)
            .bind(&item.quantity)
            .bind(&item.unit)
            .bind(&item.category)
            .bind(item.is_bought)
            .execute(&self.pool)
            .await?
            .last_insert_rowid()
        };

        self.notifier.notify(Table::Items);

        Ok(ShoppingItem {
            id,
            ..item.clone()
        })
    }

    /// Updates every field of an existing item.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::NotFound)` - No item with that id
    pub async fn update(&self, item: &ShoppingItem) -> DbResult<()> {
        debug!(id = item.id, "Updating item");

        let result = sqlx::query(
            r#"
            UPDATE shopping_items SET
                name = ?2,
                quantity = ?3,
                unit = ?4,
                category = ?5,
                is_bought = ?6
            WHERE id = ?1
            "#,
        )
        .bind(item.id)
        .bind(&item.name)
        .bind(&item.quantity)
        .bind(&item.unit)
        .bind(&item.category)
        .bind(item.is_bought)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("ShoppingItem", item.id));
        }

        self.notifier.notify(Table::Items);
        Ok(())
    }

    /// Deletes an item by id.
    ///
    /// ## Returns
    /// Whether a row was removed.
    pub async fn delete(&self, id: i64) -> DbResult<bool> {
        debug!(id, "Deleting item");

        let result = sqlx::query("DELETE FROM shopping_items WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        let removed = result.rows_affected() > 0;
        if removed {
            self.notifier.notify(Table::Items);
        }

        Ok(removed)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Gets an item by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<ShoppingItem>> {
        let item = sqlx::query_as::<_, ShoppingItem>(&format!("{} WHERE id = ?1", SELECT_ITEMS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(item)
    }

    /// Lists items matching a filter.
    pub async fn list(&self, filter: &ItemFilter) -> DbResult<Vec<ShoppingItem>> {
        let items = match filter {
            ItemFilter::All => {
                sqlx::query_as::<_, ShoppingItem>(&format!(
                    "{} ORDER BY category, name, id",
                    SELECT_ITEMS
                ))
                .fetch_all(&self.pool)
                .await?
            }
            ItemFilter::ToBuy | ItemFilter::Bought => {
                sqlx::query_as::<_, ShoppingItem>(&format!(
                    "{} WHERE is_bought = ?1 ORDER BY category, name, id",
                    SELECT_ITEMS
                ))
                .bind(matches!(filter, ItemFilter::Bought))
                .fetch_all(&self.pool)
                .await?
            }
            ItemFilter::Category(category) => {
                sqlx::query_as::<_, ShoppingItem>(&format!(
                    "{} WHERE category = ?1 ORDER BY name, id",
                    SELECT_ITEMS
                ))
                .bind(category)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(items)
    }

    /// Distinct categories of the live items, sorted.
    pub async fn categories(&self) -> DbResult<Vec<String>> {
        let categories: Vec<String> = sqlx::query_scalar(
            "SELECT DISTINCT category FROM shopping_items ORDER BY category",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Finds the first item (in category, name, id order) whose name,
    /// quantity, unit and category all equal the key.
    pub async fn find_first_matching(&self, key: &ItemKey) -> DbResult<Option<ShoppingItem>> {
        let item = sqlx::query_as::<_, ShoppingItem>(&format!(
            r#"{}
            WHERE name = ?1 AND quantity = ?2 AND unit = ?3 AND category = ?4
            ORDER BY category, name, id
            LIMIT 1"#,
            SELECT_ITEMS
        ))
        .bind(&key.name)
        .bind(&key.quantity)
        .bind(&key.unit)
        .bind(&key.category)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Counts all live items.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shopping_items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // =========================================================================
    // Live Queries
    // =========================================================================

    /// Continuously updated result of [`list`](Self::list).
    pub async fn observe(&self, filter: ItemFilter) -> watch::Receiver<Vec<ShoppingItem>> {
        let repo = self.clone();
        live_query(&self.notifier, &[Table::Items], move || {
            let repo = repo.clone();
            let filter = filter.clone();
            async move { repo.list(&filter).await }
        })
        .await
    }

    /// Continuously updated result of [`categories`](Self::categories).
    pub async fn observe_categories(&self) -> watch::Receiver<Vec<String>> {
        let repo = self.clone();
        live_query(&self.notifier, &[Table::Items], move || {
            let repo = repo.clone();
            async move { repo.categories().await }
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

    async fn setup() -> ItemRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().items()
    }

    async fn seed(repo: &ItemRepository) {
        for (name, qty, unit, category) in [
            ("Milk", "1", "L", "Dairy"),
            ("Bread", "2", "pcs", "Bakery"),
            ("Cheese", "200", "g", "Dairy"),
            ("Apples", "1", "kg", "Produce"),
        ] {
            repo.insert(&NewItem::new(name, qty, unit, category))
                .await
                .unwrap();
        }
    }

    fn names(items: &[ShoppingItem]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_insert_assigns_ids_and_starts_unbought() {
        let repo = setup().await;
        let a = repo.insert(&NewItem::new("Milk", "1", "L", "Dairy")).await.unwrap();
        let b = repo.insert(&NewItem::new("Milk", "1", "L", "Dairy")).await.unwrap();

        assert!(a.id > 0);
        assert_ne!(a.id, b.id);
        assert!(!a.is_bought);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_list_orders_by_category_then_name() {
        let repo = setup().await;
        seed(&repo).await;

        let all = repo.list(&ItemFilter::All).await.unwrap();
        assert_eq!(names(&all), vec!["Bread", "Cheese", "Milk", "Apples"]);
    }

    #[tokio::test]
    async fn test_list_filters() {
        let repo = setup().await;
        seed(&repo).await;

        let mut bread = repo.list(&ItemFilter::All).await.unwrap().remove(0);
        bread.is_bought = true;
        repo.update(&bread).await.unwrap();

        let bought = repo.list(&ItemFilter::Bought).await.unwrap();
        assert_eq!(names(&bought), vec!["Bread"]);

        let to_buy = repo.list(&ItemFilter::ToBuy).await.unwrap();
        assert_eq!(names(&to_buy), vec!["Cheese", "Milk", "Apples"]);

        let dairy = repo
            .list(&ItemFilter::Category("Dairy".to_string()))
            .await
            .unwrap();
        assert_eq!(names(&dairy), vec!["Cheese", "Milk"]);
    }

    #[tokio::test]
    async fn test_categories_distinct_sorted() {
        let repo = setup().await;
        seed(&repo).await;

        assert_eq!(
            repo.categories().await.unwrap(),
            vec!["Bakery", "Dairy", "Produce"]
        );
    }

    #[tokio::test]
    async fn test_update_missing_item_is_not_found() {
        let repo = setup().await;
        let ghost = ShoppingItem {
            id: 99,
            name: "Ghost".to_string(),
            quantity: String::new(),
            unit: String::new(),
            category: String::new(),
            is_bought: false,
        };

        let err = repo.update(&ghost).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_and_upsert_restores_original_id() {
        let repo = setup().await;
        let milk = repo.insert(&NewItem::new("Milk", "1", "L", "Dairy")).await.unwrap();

        assert!(repo.delete(milk.id).await.unwrap());
        assert!(!repo.delete(milk.id).await.unwrap());
        assert!(repo.get_by_id(milk.id).await.unwrap().is_none());

        let restored = repo.upsert(&milk).await.unwrap();
        assert_eq!(restored.id, milk.id);
        assert_eq!(repo.get_by_id(milk.id).await.unwrap(), Some(milk));
    }

    #[tokio::test]
    async fn test_upsert_replaces_existing_row() {
        let repo = setup().await;
        let milk = repo.insert(&NewItem::new("Milk", "1", "L", "Dairy")).await.unwrap();

        let changed = ShoppingItem {
            quantity: "2".to_string(),
            is_bought: true,
            ..milk.clone()
        };
        repo.upsert(&changed).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 1);
        assert_eq!(repo.get_by_id(milk.id).await.unwrap(), Some(changed));
    }

    #[tokio::test]
    async fn test_find_first_matching_uses_all_four_fields() {
        let repo = setup().await;
        let first = repo.insert(&NewItem::new("Milk", "1", "L", "Dairy")).await.unwrap();
        repo.insert(&NewItem::new("Milk", "1", "L", "Dairy")).await.unwrap();
        repo.insert(&NewItem::new("Milk", "2", "L", "Dairy")).await.unwrap();

        let found = repo.find_first_matching(&first.key()).await.unwrap();
        assert_eq!(found.map(|i| i.id), Some(first.id));

        let key = ItemKey {
            name: "Milk".to_string(),
            quantity: "1".to_string(),
            unit: "ml".to_string(),
            category: "Dairy".to_string(),
        };
        assert!(repo.find_first_matching(&key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_observe_sees_writes() {
        let repo = setup().await;
        let mut rx = repo.observe(ItemFilter::ToBuy).await;
        assert!(rx.borrow_and_update().is_empty());

        repo.insert(&NewItem::new("Eggs", "12", "pcs", "Dairy"))
            .await
            .unwrap();

        tokio::time::timeout(Duration::from_secs(1), rx.changed())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(names(&rx.borrow_and_update()), vec!["Eggs"]);
    }

    #[tokio::test]
    async fn test_observe_categories() {
        let repo = setup().await;
        seed(&repo).await;

        let rx = repo.observe_categories().await;
        assert_eq!(rx.borrow().len(), 3);
    }
}
