//! # Unit & Category Catalogue
//!
//! Rules for the user's custom units and categories.
//!
//! Entries are persisted as a single comma-joined string per kind, so the
//! separator itself can never be part of an entry (see
//! [`crate::validation::validate_catalog_entry`]).

/// Separator between persisted entries.
pub const SEPARATOR: char = ',';

/// Units offered before any custom ones.
pub const DEFAULT_UNITS: [&str; 8] = ["pcs", "kg", "g", "L", "ml", "pack", "dozen", "box"];

/// Which catalogue an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    Unit,
    Category,
}

impl CatalogKind {
    /// Preference key the entries are stored under.
    pub fn preference_key(&self) -> &'static str {
        match self {
            CatalogKind::Unit => "custom_units",
            CatalogKind::Category => "custom_categories",
        }
    }

    /// Field name used in validation messages.
    pub fn field(&self) -> &'static str {
        match self {
            CatalogKind::Unit => "unit",
            CatalogKind::Category => "category",
        }
    }

    /// Built-in entries listed ahead of custom ones.
    pub fn defaults(&self) -> &'static [&'static str] {
        match self {
            CatalogKind::Unit => &DEFAULT_UNITS,
            CatalogKind::Category => &[],
        }
    }
}

/// Splits a stored value into entries, dropping blanks.
pub fn parse_entries(stored: &str) -> Vec<String> {
    stored
        .split(SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Joins entries back into their stored form.
pub fn join_entries(entries: &[String]) -> String {
    entries.join(&SEPARATOR.to_string())
}

/// Appends `entry` unless already present. Returns whether it was added.
pub fn add_entry(entries: &mut Vec<String>, entry: &str) -> bool {
    if entries.iter().any(|e| e == entry) {
        return false;
    }
    entries.push(entry.to_string());
    true
}

/// Removes every occurrence of `entry`. Returns whether anything was removed.
pub fn remove_entry(entries: &mut Vec<String>, entry: &str) -> bool {
    let before = entries.len();
    entries.retain(|e| e != entry);
    entries.len() != before
}

/// Defaults followed by custom entries, de-duplicated, order preserved.
///
/// ## Example
/// ```rust
/// use listify_core::catalog::{merge_with_defaults, CatalogKind};
///
/// let custom = vec!["bottle".to_string(), "kg".to_string()];
/// let all = merge_with_defaults(CatalogKind::Unit, &custom);
/// assert_eq!(all.first().map(String::as_str), Some("pcs"));
/// assert_eq!(all.last().map(String::as_str), Some("bottle"));
/// ```
pub fn merge_with_defaults(kind: CatalogKind, custom: &[String]) -> Vec<String> {
    let mut merged: Vec<String> = Vec::new();

    let all = kind
        .defaults()
        .iter()
        .map(|s| s.to_string())
        .chain(custom.iter().cloned());

    for entry in all {
        if !merged.contains(&entry) {
            merged.push(entry);
        }
    }

    merged
}
