//! # Validation Module
//!
//! Input validation utilities for Listify.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation (CLI / UI)                                      │
//! │  └── Basic format checks, immediate feedback                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Engine (listify-sync)                                        │
//! │  └── THIS MODULE: names, selections, catalogue entries                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── Foreign key constraints (saved_list_items → shopping_lists)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use listify_core::validation::{validate_item_name, validate_catalog_entry};
//!
//! validate_item_name("Milk").unwrap();
//! assert!(validate_catalog_entry("unit", "a,b").is_err());
//! ```

use crate::error::ValidationError;
use crate::{MAX_LIST_NAME_LEN, MAX_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a shopping item name.
///
/// ## Rules
/// - Must not be blank (whitespace only counts as blank)
/// - At most [`MAX_NAME_LEN`] characters after trimming
///
/// ## Example
/// ```rust
/// use listify_core::validation::validate_item_name;
///
/// assert!(validate_item_name("Bread").is_ok());
/// assert!(validate_item_name("   ").is_err());
/// ```
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    validate_required_text("name", name, MAX_NAME_LEN)
}

/// Validates a saved list name.
///
/// ## Rules
/// - Must not be blank
/// - At most [`MAX_LIST_NAME_LEN`] characters after trimming
pub fn validate_list_name(name: &str) -> ValidationResult<()> {
    validate_required_text("list name", name, MAX_LIST_NAME_LEN)
}

/// Validates a custom unit or category before it joins the catalogue.
///
/// The catalogue is persisted comma-joined with no escaping, so an entry
/// containing a comma would split into two on the next read.
pub fn validate_catalog_entry(field: &str, value: &str) -> ValidationResult<()> {
    validate_required_text(field, value, MAX_NAME_LEN)?;

    if value.contains(crate::catalog::SEPARATOR) {
        return Err(ValidationError::ForbiddenCharacter {
            field: field.to_string(),
            character: crate::catalog::SEPARATOR,
        });
    }

    Ok(())
}

fn validate_required_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Normalizes a search query.
///
/// Returns `None` for a blank query (no search active). A non-blank
/// query is only lowercased; surrounding whitespace is part of the match.
pub fn normalize_search_query(query: &str) -> Option<String> {
    if query.trim().is_empty() {
        None
    } else {
        Some(query.to_lowercase())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_item_name() {
        assert!(validate_item_name("Milk").is_ok());
        assert!(validate_item_name("  Milk  ").is_ok());

        assert_eq!(
            validate_item_name(""),
            Err(ValidationError::Required {
                field: "name".to_string()
            })
        );
        assert!(validate_item_name("\t ").is_err());
        assert!(validate_item_name(&"x".repeat(MAX_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn test_validate_list_name() {
        assert!(validate_list_name("Groceries").is_ok());
        assert!(validate_list_name(" ").is_err());
    }

    #[test]
    fn test_validate_catalog_entry_rejects_separator() {
        assert!(validate_catalog_entry("unit", "bottle").is_ok());
        assert_eq!(
            validate_catalog_entry("unit", "6,pack"),
            Err(ValidationError::ForbiddenCharacter {
                field: "unit".to_string(),
                character: ','
            })
        );
        assert!(validate_catalog_entry("category", "").is_err());
    }

    #[test]
    fn test_normalize_search_query() {
        assert_eq!(normalize_search_query("  "), None);
        assert_eq!(normalize_search_query(""), None);
        assert_eq!(normalize_search_query("MiLk"), Some("milk".to_string()));
        assert_eq!(normalize_search_query(" MiLk "), Some(" milk ".to_string()));
    }
}
