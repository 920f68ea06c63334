//! # Domain Types
//!
//! Core domain types used throughout Listify.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  ShoppingItem   │   │  ShoppingList   │   │  SavedListItem  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  id (i64)       │   │  id (i64)       │       │
//! │  │  name           │   │  name           │   │  list_id (FK)   │       │
//! │  │  quantity, unit │   │  created_at     │   │  name, quantity │       │
//! │  │  category       │   │  is_active      │   │  unit, category │       │
//! │  │  is_bought      │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘            │ 1                   ▲ N               │
//! │          ▲                      └─────────────────────┘                 │
//! │          │ value equality only (ItemKey)                                │
//! │          └──────────────────────────────── SavedListItem                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Live items and saved snapshot rows never reference each other by id.
//! Load copies snapshot rows into fresh items, Unload finds them again by
//! comparing the four descriptive fields ([`ItemKey`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Item Key
// =============================================================================

/// The descriptive fields that identify an item by value.
///
/// Two rows with equal keys are indistinguishable to the synchronization
/// engine, whatever their ids or bought state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemKey {
    pub name: String,
    pub quantity: String,
    pub unit: String,
    pub category: String,
}

// =============================================================================
// Shopping Item
// =============================================================================

/// An item on the live shopping list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ShoppingItem {
    /// Surrogate key assigned by the store.
    pub id: i64,

    /// Display name (never blank once stored through the engine).
    pub name: String,

    /// Free-form quantity ("2", "1/2", "a few").
    pub quantity: String,

    /// Free-form unit ("pcs", "kg", ...).
    pub unit: String,

    /// Grouping key for display and sharing.
    pub category: String,

    /// Whether the item has been bought.
    pub is_bought: bool,
}

impl ShoppingItem {
    /// Returns the value-equality key of this item.
    pub fn key(&self) -> ItemKey {
        ItemKey {
            name: self.name.clone(),
            quantity: self.quantity.clone(),
            unit: self.unit.clone(),
            category: self.category.clone(),
        }
    }

    /// Checks whether this item matches a key field by field.
    pub fn matches(&self, key: &ItemKey) -> bool {
        self.name == key.name
            && self.quantity == key.quantity
            && self.unit == key.unit
            && self.category == key.category
    }

    /// Returns a copy with the bought flag flipped.
    pub fn toggled(&self) -> Self {
        ShoppingItem {
            is_bought: !self.is_bought,
            ..self.clone()
        }
    }
}

// =============================================================================
// New Item
// =============================================================================

/// An item that has not been stored yet.
///
/// The store assigns the id; `is_bought` always starts out false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewItem {
    pub name: String,
    pub quantity: String,
    pub unit: String,
    pub category: String,
}

impl NewItem {
    /// Creates a new item draft.
    pub fn new(
        name: impl Into<String>,
        quantity: impl Into<String>,
        unit: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        NewItem {
            name: name.into(),
            quantity: quantity.into(),
            unit: unit.into(),
            category: category.into(),
        }
    }

    /// Returns a copy with surrounding whitespace removed from name and category.
    ///
    /// Quantity and unit are kept verbatim.
    pub fn trimmed(&self) -> Self {
        NewItem {
            name: self.name.trim().to_string(),
            quantity: self.quantity.clone(),
            unit: self.unit.clone(),
            category: self.category.trim().to_string(),
        }
    }
}

impl From<&SavedListItem> for NewItem {
    fn from(saved: &SavedListItem) -> Self {
        NewItem {
            name: saved.name.clone(),
            quantity: saved.quantity.clone(),
            unit: saved.unit.clone(),
            category: saved.category.clone(),
        }
    }
}

// =============================================================================
// Shopping List
// =============================================================================

/// A named, saved snapshot of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ShoppingList {
    /// Surrogate key assigned by the store.
    pub id: i64,

    /// Display name.
    pub name: String,

    /// When the list was saved.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// Whether this list is currently loaded into the live items.
    ///
    /// At most one list is active at any time.
    pub is_active: bool,
}

// =============================================================================
// Saved List Item
// =============================================================================

/// A frozen copy of an item captured when a list was saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SavedListItem {
    pub id: i64,

    /// Owning list (cascade delete).
    pub list_id: i64,

    pub name: String,
    pub quantity: String,
    pub unit: String,
    pub category: String,
}

impl SavedListItem {
    /// Returns the value-equality key of this snapshot row.
    pub fn key(&self) -> ItemKey {
        ItemKey {
            name: self.name.clone(),
            quantity: self.quantity.clone(),
            unit: self.unit.clone(),
            category: self.category.clone(),
        }
    }
}

/// A saved list together with its captured items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ListSnapshot {
    pub list: ShoppingList,
    pub items: Vec<SavedListItem>,
}

// =============================================================================
// Filters
// =============================================================================

/// Bought-state filter applied to the live items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FilterType {
    /// Every item.
    #[default]
    All,
    /// Items not bought yet.
    ToBuy,
    /// Items already bought.
    Bought,
}

impl FilterType {
    /// Checks whether an item passes this filter.
    pub fn accepts(&self, item: &ShoppingItem) -> bool {
        match self {
            FilterType::All => true,
            FilterType::ToBuy => !item.is_bought,
            FilterType::Bought => item.is_bought,
        }
    }
}

impl std::fmt::Display for FilterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterType::All => write!(f, "all"),
            FilterType::ToBuy => write!(f, "to_buy"),
            FilterType::Bought => write!(f, "bought"),
        }
    }
}

impl std::str::FromStr for FilterType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(FilterType::All),
            "to_buy" | "to-buy" | "tobuy" => Ok(FilterType::ToBuy),
            "bought" => Ok(FilterType::Bought),
            other => Err(format!("Unknown filter: {}", other)),
        }
    }
}

/// Which slice of the live items a store query returns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum ItemFilter {
    /// Filter by bought state; ordered by category then name.
    #[default]
    All,
    ToBuy,
    Bought,
    /// Exact category match; ordered by name.
    Category(String),
}

impl From<FilterType> for ItemFilter {
    fn from(filter: FilterType) -> Self {
        match filter {
            FilterType::All => ItemFilter::All,
            FilterType::ToBuy => ItemFilter::ToBuy,
            FilterType::Bought => ItemFilter::Bought,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
