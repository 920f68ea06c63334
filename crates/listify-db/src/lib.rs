//! # listify-db: Storage Layer for Listify
//!
//! SQLite persistence for live items, saved lists and preferences, plus
//! live queries that re-emit whenever a table changes.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Listify Data Flow                                │
//! │                                                                         │
//! │  ListSyncEngine / ShoppingSession (listify-sync)                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    listify-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ ItemRepo      │    │ 001_init.sql │  │   │
//! │  │   │ SqlitePool    │◄───│ ListRepo      │    │ 002_prefs    │  │   │
//! │  │   │ Notifier      │    │ PrefsRepo     │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   <data dir>/listify/listify.db                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`notify`] - Change notifications and live queries
//! - [`repository`] - Item, list and preference stores
//!
//! ## Usage
//!
//! ```rust,ignore
//! use listify_db::{Database, DbConfig};
//! use listify_core::{ItemFilter, NewItem};
//!
//! let db = Database::new(DbConfig::new("listify.db")).await?;
//!
//! db.items().insert(&NewItem::new("Milk", "1", "L", "Dairy")).await?;
//! let to_buy = db.items().list(&ItemFilter::ToBuy).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod notify;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use notify::{ChangeNotifier, Table};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::item::ItemRepository;
pub use repository::list::ListRepository;
pub use repository::preferences::PreferencesRepository;
