//! # listify-sync: List Synchronization Engine for Listify
//!
//! Compound operations that span the item and list stores, and the
//! session API a screen drives.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Listify Engine Layer                             │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                   ShoppingSession (session.rs)                   │  │
//! │  │                                                                  │  │
//! │  │  filter / category / search selections                           │  │
//! │  │  combined ShoppingUiState, commands with displayable errors      │  │
//! │  └────────────────────────────┬─────────────────────────────────────┘  │
//! │                               │                                         │
//! │                               ▼                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                   ListSyncEngine (engine.rs)                     │  │
//! │  │                                                                  │  │
//! │  │  save selection ─► load ─► unload, item edits, catalogue,        │  │
//! │  │  share text, export pages, summary                               │  │
//! │  └──────────┬──────────────────────────────────────┬────────────────┘  │
//! │             │                                      │                    │
//! │             ▼                                      ▼                    │
//! │  ┌────────────────────────┐            ┌────────────────────────────┐  │
//! │  │  listify-db            │            │  ListEventEmitter          │  │
//! │  │  items, lists, prefs   │            │  (widgets, logs)           │  │
//! │  └────────────────────────┘            └────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`config`] - Engine configuration (TOML file + environment)
//! - [`engine`] - `ListSyncEngine` compound operations
//! - [`error`] - Engine and command error types
//! - [`events`] - Mutation events and the emitter trait
//! - [`session`] - `ShoppingSession` and `ShoppingUiState`
//!
//! ## Usage
//! ```rust,ignore
//! use listify_sync::{EngineConfig, ListSyncEngine, ShoppingSession};
//!
//! let config = EngineConfig::load_or_default(None);
//! let db = Database::new(config.db_config()).await?;
//! let session = ShoppingSession::new(ListSyncEngine::new(db));
//!
//! let mut state = session.state().await;
//! session.add_item(NewItem::new("Milk", "1", "L", "Dairy")).await;
//! state.changed().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod session;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::EngineConfig;
pub use engine::{ListSyncEngine, LoadOutcome, UnloadOutcome};
pub use error::{CommandError, CommandResult, ErrorCode, SyncError, SyncResult};
pub use events::{ListEvent, ListEventEmitter, LogEmitter, NoOpEmitter};
pub use session::{ShoppingSession, ShoppingUiState};
