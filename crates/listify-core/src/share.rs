//! # Share Text Formatter
//!
//! Renders items as chat-friendly plain text (`*bold*`, `_italic_`,
//! `~strike~` markup).
//!
//! ## Output Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  *My Shopping List*                      ← heading (optional)          │
//! │  ----------------------                                                │
//! │                                                                         │
//! │  *📦 DAIRY*                              ← category (grouped mode)      │
//! │  1. • Milk _(1 L)_                       ← serial, status, item         │
//! │  2. ✓ ~Cheese _(200 g)_~                 ← bought rows struck through   │
//! │                                                                         │
//! │  ----------------------                  ← summary (optional)          │
//! │  *Summary*                                                              │
//! │  Total Items: *2*                                                       │
//! │  ...                                                                    │
//! │                                                                         │
//! │  _Shared via Listify_                    ← footer (optional)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt::Write;
use ts_rs::TS;

use crate::summary::ListSummary;
use crate::types::ShoppingItem;
use crate::DEFAULT_SHARE_HEADING;

const DIVIDER: &str = "----------------------";
const FOOTER: &str = "_Shared via Listify_";

/// What the shared text contains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ShareOptions {
    pub heading: String,
    pub show_heading: bool,
    pub show_serial_numbers: bool,
    /// Render `✅`/`⬜` boxes instead of `✓`/`•` markers and strike-through.
    pub show_checkboxes: bool,
    pub show_summary: bool,
    pub show_footer: bool,
    pub group_by_category: bool,
}

impl Default for ShareOptions {
    fn default() -> Self {
        ShareOptions {
            heading: DEFAULT_SHARE_HEADING.to_string(),
            show_heading: true,
            show_serial_numbers: true,
            show_checkboxes: false,
            show_summary: true,
            show_footer: true,
            group_by_category: true,
        }
    }
}

/// Items of one category, in the order they appeared in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup<'a> {
    pub category: &'a str,
    pub items: Vec<&'a ShoppingItem>,
}

/// Groups items by category, keeping first-appearance order for both the
/// groups and the items inside them.
pub fn group_by_category(items: &[ShoppingItem]) -> Vec<CategoryGroup<'_>> {
    let mut groups: Vec<CategoryGroup<'_>> = Vec::new();

    for item in items {
        match groups.iter_mut().find(|g| g.category == item.category) {
            Some(group) => group.items.push(item),
            None => groups.push(CategoryGroup {
                category: &item.category,
                items: vec![item],
            }),
        }
    }

    groups
}

/// Formats items as shareable text.
///
/// Returns `None` when there is nothing to share.
///
/// ## Example
/// ```rust
/// use listify_core::share::{format_share_text, ShareOptions};
///
/// assert!(format_share_text(&[], &ShareOptions::default()).is_none());
/// ```
pub fn format_share_text(items: &[ShoppingItem], options: &ShareOptions) -> Option<String> {
    if items.is_empty() {
        return None;
    }

    let mut out = String::new();

    if options.show_heading {
        line(&mut out, &format!("*{}*", options.heading));
        line(&mut out, DIVIDER);
    }

    let mut serial = 1usize;

    if options.group_by_category {
        for group in group_by_category(items) {
            line(&mut out, "");
            line(&mut out, &format!("*📦 {}*", group.category.to_uppercase()));

            for item in group.items {
                let text = format!("{} _({} {})_", item.name, item.quantity, item.unit);
                line(&mut out, &format_row(item, &text, serial, options));
                serial += 1;
            }
        }
    } else {
        line(&mut out, "");

        let mixed = items.iter().any(|i| i.category != items[0].category);
        for item in items {
            let mut text = format!("{} _({} {})_", item.name, item.quantity, item.unit);
            if mixed {
                // write! to a String cannot fail
                let _ = write!(text, " [{}]", item.category);
            }
            line(&mut out, &format_row(item, &text, serial, options));
            serial += 1;
        }
    }

    if options.show_summary {
        let summary = ListSummary::of(items);

        line(&mut out, "");
        line(&mut out, DIVIDER);
        line(&mut out, "*Summary*");
        line(&mut out, &format!("Total Items: *{}*", summary.total));
        line(&mut out, &format!("Bought: *{}*", summary.bought));
        line(&mut out, &format!("Remaining: *{}*", summary.remaining));
        if summary.total > 0 {
            line(&mut out, &format!("Progress: *{}%*", summary.progress_percent));
        }
    }

    if options.show_footer {
        line(&mut out, "");
        line(&mut out, FOOTER);
    }

    Some(out)
}

fn format_row(item: &ShoppingItem, text: &str, serial: usize, options: &ShareOptions) -> String {
    let serial = if options.show_serial_numbers {
        format!("{}. ", serial)
    } else {
        String::new()
    };

    let marker = match (options.show_checkboxes, item.is_bought) {
        (true, true) => "✅ ",
        (true, false) => "⬜ ",
        (false, true) => "✓ ",
        (false, false) => "• ",
    };

    let strike = if item.is_bought && !options.show_checkboxes {
        "~"
    } else {
        ""
    };

    format!("{serial}{marker}{strike}{text}{strike}")
}

fn line(out: &mut String, text: &str) {
    out.push_str(text);
    out.push('\n');
}

// =============================================================================
// Unit Tests
// =============================================================================
