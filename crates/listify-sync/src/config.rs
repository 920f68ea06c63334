//! # Engine Configuration
//!
//! Configuration for the engine and the applications built on it.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     LISTIFY_DB_PATH=/tmp/listify.db                                    │
//! │     LISTIFY_DB_MAX_CONNECTIONS=2                                       │
//! │     LISTIFY_SHARE_HEADING="Weekend BBQ"                                │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/listify/listify.toml (Linux)                             │
//! │     ~/Library/Application Support/com.listify.app/listify.toml (macOS) │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     database in the platform data dir, "My Shopping List" heading      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # listify.toml
//! [database]
//! path = "/home/me/.local/share/listify/listify.db"
//! max_connections = 5
//!
//! [share]
//! heading = "My Shopping List"
//! show_serial_numbers = true
//! show_checkboxes = false
//! group_by_category = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{SyncError, SyncResult};
use listify_core::share::ShareOptions;
use listify_core::DEFAULT_SHARE_HEADING;
use listify_db::DbConfig;

/// File name of the database inside the data directory.
pub const DATABASE_FILE_NAME: &str = "listify.db";

/// File name of the config file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "listify.toml";

// =============================================================================
// Database Settings
// =============================================================================

/// Where and how the database is opened.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// Database file. `None` means the platform data directory.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Maximum pool connections.
    /// Default: 5
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            path: None,
            max_connections: default_max_connections(),
        }
    }
}

// =============================================================================
// Share Settings
// =============================================================================

/// Defaults for sharing a list as text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareSettings {
    #[serde(default = "default_heading")]
    pub heading: String,

    #[serde(default = "default_true")]
    pub show_heading: bool,

    #[serde(default = "default_true")]
    pub show_serial_numbers: bool,

    #[serde(default)]
    pub show_checkboxes: bool,

    #[serde(default = "default_true")]
    pub show_summary: bool,

    #[serde(default = "default_true")]
    pub show_footer: bool,

    #[serde(default = "default_true")]
    pub group_by_category: bool,
}

fn default_heading() -> String {
    DEFAULT_SHARE_HEADING.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ShareSettings {
    fn default() -> Self {
        ShareSettings::from(&ShareOptions::default())
    }
}

impl From<&ShareOptions> for ShareSettings {
    fn from(options: &ShareOptions) -> Self {
        ShareSettings {
            heading: options.heading.clone(),
            show_heading: options.show_heading,
            show_serial_numbers: options.show_serial_numbers,
            show_checkboxes: options.show_checkboxes,
            show_summary: options.show_summary,
            show_footer: options.show_footer,
            group_by_category: options.group_by_category,
        }
    }
}

impl ShareSettings {
    /// Converts to formatter options.
    pub fn to_options(&self) -> ShareOptions {
        ShareOptions {
            heading: self.heading.clone(),
            show_heading: self.show_heading,
            show_serial_numbers: self.show_serial_numbers,
            show_checkboxes: self.show_checkboxes,
            show_summary: self.show_summary,
            show_footer: self.show_footer,
            group_by_category: self.group_by_category,
        }
    }
}

// =============================================================================
// Engine Configuration
// =============================================================================

/// Complete configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub share: ShareSettings,
}

impl EngineConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (listify.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> SyncResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns defaults if loading fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> SyncResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| SyncError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> SyncResult<()> {
        if self.database.max_connections == 0 {
            return Err(SyncError::InvalidConfig(
                "max_connections must be greater than 0".into(),
            ));
        }

        if let Some(ref path) = self.database.path {
            if path.as_os_str().is_empty() {
                return Err(SyncError::InvalidConfig(
                    "database path must not be empty".into(),
                ));
            }
        }

        if self.share.show_heading && self.share.heading.trim().is_empty() {
            return Err(SyncError::InvalidConfig(
                "share heading must not be blank when show_heading is on".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("LISTIFY_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = Some(PathBuf::from(path));
        }

        if let Ok(max) = std::env::var("LISTIFY_DB_MAX_CONNECTIONS") {
            match max.parse::<u32>() {
                Ok(n) => self.database.max_connections = n,
                Err(_) => warn!(value = %max, "Ignoring invalid LISTIFY_DB_MAX_CONNECTIONS"),
            }
        }

        if let Ok(heading) = std::env::var("LISTIFY_SHARE_HEADING") {
            self.share.heading = heading;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "listify", "app")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Returns the default database path (platform data dir).
    pub fn default_database_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "listify", "app")
            .map(|dirs| dirs.data_dir().join(DATABASE_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Resolved database file: configured path, platform data dir, or the
    /// working directory as a last resort.
    pub fn database_path(&self) -> PathBuf {
        self.database
            .path
            .clone()
            .or_else(Self::default_database_path)
            .unwrap_or_else(|| PathBuf::from(DATABASE_FILE_NAME))
    }

    /// Pool configuration for the resolved database.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(self.database_path()).max_connections(self.database.max_connections)
    }

    /// Share formatter defaults.
    pub fn share_options(&self) -> ShareOptions {
        self.share.to_options()
    }
}
