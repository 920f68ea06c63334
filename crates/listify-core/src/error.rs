//! # Error Types
//!
//! Domain-specific error types for listify-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  listify-core errors (this file)                                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  listify-db errors                                                     │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  listify-sync errors                                                   │
//! │  ├── SyncError        - Engine failures                                │
//! │  └── CommandError     - What the presentation layer sees               │
//! │                                                                         │
//! │  Flow: ValidationError → SyncError → CommandError → UI message         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before anything touches the stores.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Field contains a character the storage format can't represent.
    #[error("{field} must not contain '{character}'")]
    ForbiddenCharacter { field: String, character: char },
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::TooLong {
            field: "list name".to_string(),
            max: 100,
        };
        assert_eq!(err.to_string(), "list name must be at most 100 characters");

        let err = ValidationError::ForbiddenCharacter {
            field: "unit".to_string(),
            character: ',',
        };
        assert_eq!(err.to_string(), "unit must not contain ','");
    }
}
