//! # Engine Error Types
//!
//! Error types for engine and session operations.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Engine Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Validation    │  │     Storage             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  EmptySelection │  │  Database(DbError)      │ │
//! │  │  ConfigLoad...  │  │  Validation     │  │                         │ │
//! │  │  ConfigSave...  │  │                 │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │           SyncError ──► CommandError { code, message }                 │
//! │                         (what a UI or the CLI shows)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;

use listify_core::ValidationError;
use listify_db::DbError;

/// Result type alias for engine operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Engine error type.
#[derive(Debug, Error)]
pub enum SyncError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid engine configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    /// A command needed items and got none.
    #[error("No items to {action}")]
    EmptySelection { action: String },

    /// Input failed validation.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    // =========================================================================
    // Storage Errors
    // =========================================================================
    /// A store operation failed.
    #[error("Database error: {0}")]
    Database(DbError),
}

impl SyncError {
    /// Creates an EmptySelection error.
    pub fn empty_selection(action: impl Into<String>) -> Self {
        SyncError::EmptySelection {
            action: action.into(),
        }
    }

    /// Returns true if the error is a missing list or item.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SyncError::Database(e) if e.is_not_found())
    }
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<DbError> for SyncError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::EmptySnapshot => SyncError::empty_selection("save"),
            other => SyncError::Database(other),
        }
    }
}

impl From<std::io::Error> for SyncError {
    fn from(err: std::io::Error) -> Self {
        SyncError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for SyncError {
    fn from(err: toml::de::Error) -> Self {
        SyncError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for SyncError {
    fn from(err: toml::ser::Error) -> Self {
        SyncError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Command Error
// =============================================================================

/// Error returned to the presentation layer by callback commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "No items to save"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct CommandError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// List or item not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Database operation failed
    DatabaseError,

    /// Anything else
    Internal,
}

/// Result of a callback command.
pub type CommandResult = Result<(), CommandError>;

impl CommandError {
    /// Creates a new command error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CommandError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        CommandError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        CommandError::new(ErrorCode::Internal, message)
    }
}

impl From<SyncError> for CommandError {
    fn from(err: SyncError) -> Self {
        let code = match &err {
            e if e.is_not_found() => ErrorCode::NotFound,
            SyncError::EmptySelection { .. } | SyncError::Validation(_) => {
                ErrorCode::ValidationError
            }
            SyncError::Database(_) => ErrorCode::DatabaseError,
            _ => ErrorCode::Internal,
        };

        CommandError::new(code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_snapshot_maps_to_empty_selection() {
        let err: SyncError = DbError::EmptySnapshot.into();
        assert_eq!(err.to_string(), "No items to save");
    }

    #[test]
    fn test_not_found_detection() {
        let err: SyncError = DbError::not_found("ShoppingList", 7).into();
        assert!(err.is_not_found());
        assert!(!SyncError::empty_selection("save").is_not_found());
    }

    #[test]
    fn test_command_error_codes() {
        let cmd: CommandError = SyncError::empty_selection("save").into();
        assert_eq!(cmd.code, ErrorCode::ValidationError);
        assert_eq!(cmd.message, "No items to save");

        let cmd: CommandError = SyncError::from(DbError::not_found("ShoppingList", 3)).into();
        assert_eq!(cmd.code, ErrorCode::NotFound);

        let cmd: CommandError = SyncError::Database(DbError::PoolExhausted).into();
        assert_eq!(cmd.code, ErrorCode::DatabaseError);
    }

    #[test]
    fn test_command_error_serialization() {
        let json = serde_json::to_string(&CommandError::validation("No items to save")).unwrap();
        assert_eq!(
            json,
            r#"{"code":"VALIDATION_ERROR","message":"No items to save"}"#
        );
    }
}
