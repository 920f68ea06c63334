//! # List Summary
//!
//! Bought/remaining counts shared by the share text, the export footer and
//! the home-screen widget.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::ShoppingItem;

/// Progress figures for a set of items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ListSummary {
    pub total: usize,
    pub bought: usize,
    pub remaining: usize,
    /// Whole percent of bought items, rounded down. Zero for an empty list.
    pub progress_percent: u32,
}

impl ListSummary {
    /// Computes the summary of the given items.
    ///
    /// ## Example
    /// ```rust
    /// use listify_core::summary::ListSummary;
    ///
    /// let summary = ListSummary::of(&[]);
    /// assert_eq!(summary.total, 0);
    /// assert_eq!(summary.progress_percent, 0);
    /// ```
    pub fn of(items: &[ShoppingItem]) -> Self {
        let total = items.len();
        let bought = items.iter().filter(|item| item.is_bought).count();
        let progress_percent = if total > 0 {
            ((bought * 100) / total) as u32
        } else {
            0
        };

        ListSummary {
            total,
            bought,
            remaining: total - bought,
            progress_percent,
        }
    }

    /// Checks whether every item is bought (false for an empty list).
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.remaining == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(bought: bool) -> ShoppingItem {
        ShoppingItem {
            id: 0,
            name: "x".to_string(),
            quantity: "1".to_string(),
            unit: "pcs".to_string(),
            category: "c".to_string(),
            is_bought: bought,
        }
    }

    #[test]
    fn test_progress_rounds_down() {
        let items = vec![item(true), item(false), item(false)];
        let summary = ListSummary::of(&items);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.bought, 1);
        assert_eq!(summary.remaining, 2);
        assert_eq!(summary.progress_percent, 33);
        assert!(!summary.is_complete());
    }

    #[test]
    fn test_complete_list() {
        let summary = ListSummary::of(&[item(true), item(true)]);
        assert_eq!(summary.progress_percent, 100);
        assert!(summary.is_complete());
        assert!(!ListSummary::default().is_complete());
    }
}
