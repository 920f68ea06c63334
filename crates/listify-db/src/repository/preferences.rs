//! # Preferences Repository
//!
//! Key-value settings, used for the custom unit and category catalogues.
//!
//! ```text
//! preferences
//! ┌───────────────────┬──────────────────────────┐
//! │ key               │ value                    │
//! ├───────────────────┼──────────────────────────┤
//! │ custom_units      │ jar,tin,bottle           │
//! │ custom_categories │ Pets,Garden              │
//! └───────────────────┴──────────────────────────┘
//! ```
//!
//! Callers validate entries (see `listify_core::validation`) before adding;
//! this layer stores whatever it is given.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use crate::notify::{ChangeNotifier, Table};
use listify_core::catalog::{self, CatalogKind};

/// Repository for user preferences.
#[derive(Debug, Clone)]
pub struct PreferencesRepository {
    pool: SqlitePool,
    notifier: ChangeNotifier,
}

impl PreferencesRepository {
    /// Creates a new PreferencesRepository.
    pub fn new(pool: SqlitePool, notifier: ChangeNotifier) -> Self {
        PreferencesRepository { pool, notifier }
    }

    // =========================================================================
    // Raw Key-Value Access
    // =========================================================================

    /// Reads a value.
    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM preferences WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(value)
    }

    /// Writes a value, replacing any previous one.
    pub async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        debug!(key = %key, "Writing preference");

        sqlx::query(
            r#"
            INSERT INTO preferences (key, value) VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        self.notifier.notify(Table::Preferences);
        Ok(())
    }

    // =========================================================================
    // Catalogues
    // =========================================================================

    /// Custom entries of one catalogue, in the order they were added.
    pub async fn custom_entries(&self, kind: CatalogKind) -> DbResult<Vec<String>> {
        let stored = self.get(kind.preference_key()).await?.unwrap_or_default();
        Ok(catalog::parse_entries(&stored))
    }

    /// Adds a custom entry unless it is already there.
    ///
    /// ## Returns
    /// Whether the entry was added.
    pub async fn add_custom_entry(&self, kind: CatalogKind, entry: &str) -> DbResult<bool> {
        let mut entries = self.custom_entries(kind).await?;
        if !catalog::add_entry(&mut entries, entry) {
            return Ok(false);
        }

        self.set(kind.preference_key(), &catalog::join_entries(&entries))
            .await?;
        Ok(true)
    }

    /// Removes a custom entry.
    ///
    /// ## Returns
    /// Whether anything was removed.
    pub async fn delete_custom_entry(&self, kind: CatalogKind, entry: &str) -> DbResult<bool> {
        let mut entries = self.custom_entries(kind).await?;
        if !catalog::remove_entry(&mut entries, entry) {
            return Ok(false);
        }

        self.set(kind.preference_key(), &catalog::join_entries(&entries))
            .await?;
        Ok(true)
    }

    /// Built-in entries followed by custom ones, without duplicates.
    pub async fn all_entries(&self, kind: CatalogKind) -> DbResult<Vec<String>> {
        let custom = self.custom_entries(kind).await?;
        Ok(catalog::merge_with_defaults(kind, &custom))
    }

    /// Custom units.
    pub async fn custom_units(&self) -> DbResult<Vec<String>> {
        self.custom_entries(CatalogKind::Unit).await
    }

    /// Adds a custom unit.
    pub async fn add_custom_unit(&self, unit: &str) -> DbResult<bool> {
        self.add_custom_entry(CatalogKind::Unit, unit).await
    }

    /// Removes a custom unit.
    pub async fn delete_custom_unit(&self, unit: &str) -> DbResult<bool> {
        self.delete_custom_entry(CatalogKind::Unit, unit).await
    }

    /// Default units followed by custom ones.
    pub async fn all_units(&self) -> DbResult<Vec<String>> {
        self.all_entries(CatalogKind::Unit).await
    }

    /// Custom categories.
    pub async fn custom_categories(&self) -> DbResult<Vec<String>> {
        self.custom_entries(CatalogKind::Category).await
    }

    /// Adds a custom category.
    pub async fn add_custom_category(&self, category: &str) -> DbResult<bool> {
        self.add_custom_entry(CatalogKind::Category, category).await
    }

    /// Removes a custom category.
    pub async fn delete_custom_category(&self, category: &str) -> DbResult<bool> {
        self.delete_custom_entry(CatalogKind::Category, category)
            .await
    }

    /// All categories the user defined (there are no built-in ones).
    pub async fn all_categories(&self) -> DbResult<Vec<String>> {
        self.all_entries(CatalogKind::Category).await
    }
}
