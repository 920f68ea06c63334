//! # Repository Module
//!
//! Store implementations for Listify.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Engine / CLI                                                          │
//! │       │                                                                 │
//! │       │  db.items().list(&ItemFilter::ToBuy)                           │
//! │       ▼                                                                 │
//! │  ItemRepository          ListRepository        PreferencesRepository   │
//! │  ├── insert / upsert     ├── save_snapshot     ├── get / set           │
//! │  ├── update / delete     ├── get_snapshot      ├── custom units        │
//! │  ├── list / categories   ├── activate          └── custom categories   │
//! │  └── observe             └── observe_all                               │
//! │       │                        │                       │                │
//! │       └──── SQL ───────────────┴───────────────────────┘                │
//! │                          SQLite Database                               │
//! │                                                                         │
//! │  Every write also publishes a Table change for live queries.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ItemRepository`](item::ItemRepository) - Live shopping items
//! - [`ListRepository`](list::ListRepository) - Saved lists and their snapshots
//! - [`PreferencesRepository`](preferences::PreferencesRepository) - Custom units and categories

pub mod item;
pub mod list;
pub mod preferences;
