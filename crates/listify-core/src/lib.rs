//! # listify-core: Pure Domain Logic for Listify
//!
//! Domain types, validation rules and the pure formatters (share text,
//! export pages, summaries). Nothing in here touches a database, a file or
//! the network.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Listify Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Presentation (CLI, UI front ends)                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │        listify-sync (engine, session, config)                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ listify-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   share   │  │  export   │  │ validation│  │   │
//! │  │   │   Item    │  │  text     │  │  pages    │  │  catalog  │  │   │
//! │  │   │   List    │  │  summary  │  │  regions  │  │   rules   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  listify-db (Database Layer)                    │   │
//! │  │          SQLite stores, migrations, live queries               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ShoppingItem, ShoppingList, SavedListItem, filters)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//! - [`catalog`] - Custom unit/category rules
//! - [`share`] - Share-as-text formatter
//! - [`export`] - Paginated export layout
//! - [`summary`] - Bought/remaining counts
//!
//! ## Example Usage
//!
//! ```rust
//! use listify_core::share::{format_share_text, ShareOptions};
//! use listify_core::ShoppingItem;
//!
//! let items = vec![ShoppingItem {
//!     id: 1,
//!     name: "Milk".to_string(),
//!     quantity: "1".to_string(),
//!     unit: "L".to_string(),
//!     category: "Dairy".to_string(),
//!     is_bought: false,
//! }];
//!
//! let text = format_share_text(&items, &ShareOptions::default()).unwrap();
//! assert!(text.contains("1. • Milk _(1 L)_"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod export;
pub mod share;
pub mod summary;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use summary::ListSummary;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of an item name, unit or category, in characters.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length of a saved list name, in characters.
pub const MAX_LIST_NAME_LEN: usize = 100;

/// Heading used by the share formatter when none is configured.
pub const DEFAULT_SHARE_HEADING: &str = "My Shopping List";
