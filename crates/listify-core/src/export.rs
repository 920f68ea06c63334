//! # Export Layout
//!
//! Paginates items into a slim receipt-style document.
//!
//! This module decides *where* things go; drawing the regions into a file
//! format is left to the caller.
//!
//! ## Page Geometry
//! ```text
//!   0 ┌──────────────────────────┐   width 280, height 842, margin 20
//!     │  LISTIFY header          │   first page only, content starts at 85
//!  85 ├──────────────────────────┤
//!     │  - - - - - - - - - - - - │   divider          +12
//!     │  ■ DAIRY        2 items  │   category header  +15
//!     │  - - - - - - - - - - - - │   divider          +12
//!     │  □ Milk          1 L     │   item row         +22
//!     │  ☑ Cheese      200 g     │   item row         +22
//!     │                          │   gap              +5
//!     │  ...                     │
//!     │  Total / Done / Left     │   footer (summary)
//! 842 └──────────────────────────┘
//! ```
//!
//! Continuation pages start at y=40 and carry no header.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::share::group_by_category;
use crate::summary::ListSummary;
use crate::types::ShoppingItem;

/// Page width in points.
pub const PAGE_WIDTH: u32 = 280;
/// Page height in points.
pub const PAGE_HEIGHT: u32 = 842;
/// Margin on every side.
pub const MARGIN: u32 = 20;
/// Height of one item row.
pub const LINE_HEIGHT: u32 = 22;

const HEADER_BOTTOM: u32 = 85;
const CONTINUATION_TOP: u32 = MARGIN + 20;
const DIVIDER_HEIGHT: u32 = 12;
const CATEGORY_HEADER_HEIGHT: u32 = 15;
const CATEGORY_GAP: u32 = 5;

/// A category block or the footer must start above this line.
const BLOCK_LIMIT: u32 = PAGE_HEIGHT - MARGIN - 100;
/// An item row must start above this line.
const ROW_LIMIT: u32 = PAGE_HEIGHT - MARGIN - 80;

// =============================================================================
// Layout Types
// =============================================================================

/// Whether the rendered document uses the accent palette.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ColorMode {
    #[default]
    Color,
    Mono,
}

impl std::fmt::Display for ColorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorMode::Color => write!(f, "color"),
            ColorMode::Mono => write!(f, "mono"),
        }
    }
}

/// One positioned element on a page. `y` is where drawing starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum Region {
    Header { y: u32 },
    Divider { y: u32 },
    CategoryHeader { category: String, count: usize, y: u32 },
    ItemRow { item: ShoppingItem, y: u32 },
    Footer { summary: ListSummary, y: u32 },
}

impl Region {
    /// Vertical start of the region.
    pub fn y(&self) -> u32 {
        match self {
            Region::Header { y }
            | Region::Divider { y }
            | Region::CategoryHeader { y, .. }
            | Region::ItemRow { y, .. }
            | Region::Footer { y, .. } => *y,
        }
    }
}

/// A single page of the export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Page {
    /// 1-based page number.
    pub number: u32,
    pub regions: Vec<Region>,
}

/// Label shown next to a category header ("1 item", "3 items").
pub fn item_count_label(count: usize) -> String {
    if count == 1 {
        "1 item".to_string()
    } else {
        format!("{} items", count)
    }
}

/// File name for an exported document.
pub fn export_file_name(mode: ColorMode, timestamp_millis: i64) -> String {
    format!("listify_{}_{}.pdf", mode, timestamp_millis)
}

// =============================================================================
// Pagination
// =============================================================================

/// Export layout engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportLayout;

impl ExportLayout {
    /// Splits items into pages.
    ///
    /// Always returns at least one page: an empty list still gets a header
    /// and a footer with zero counts.
    ///
    /// ## Example
    /// ```rust
    /// use listify_core::export::ExportLayout;
    ///
    /// let pages = ExportLayout::paginate(&[]);
    /// assert_eq!(pages.len(), 1);
    /// ```
    pub fn paginate(items: &[ShoppingItem]) -> Vec<Page> {
        let mut cursor = Cursor::new();

        for group in group_by_category(items) {
            cursor.break_if_below(BLOCK_LIMIT);

            cursor.push(Region::Divider { y: cursor.y }, DIVIDER_HEIGHT);
            cursor.push(
                Region::CategoryHeader {
                    category: group.category.to_string(),
                    count: group.items.len(),
                    y: cursor.y,
                },
                CATEGORY_HEADER_HEIGHT,
            );
            cursor.push(Region::Divider { y: cursor.y }, DIVIDER_HEIGHT);

            for item in group.items {
                cursor.break_if_below(ROW_LIMIT);
                cursor.push(
                    Region::ItemRow {
                        item: item.clone(),
                        y: cursor.y,
                    },
                    LINE_HEIGHT,
                );
            }

            cursor.y += CATEGORY_GAP;
        }

        cursor.break_if_below(BLOCK_LIMIT);
        let footer = Region::Footer {
            summary: ListSummary::of(items),
            y: cursor.y,
        };
        cursor.current.regions.push(footer);

        cursor.finish()
    }
}

struct Cursor {
    pages: Vec<Page>,
    current: Page,
    y: u32,
}

impl Cursor {
    fn new() -> Self {
        Cursor {
            pages: Vec::new(),
            current: Page {
                number: 1,
                regions: vec![Region::Header { y: 0 }],
            },
            y: HEADER_BOTTOM,
        }
    }

    fn push(&mut self, region: Region, height: u32) {
        self.current.regions.push(region);
        self.y += height;
    }

    fn break_if_below(&mut self, limit: u32) {
        if self.y <= limit {
            return;
        }

        let next = Page {
            number: self.current.number + 1,
            regions: Vec::new(),
        };
        self.pages.push(std::mem::replace(&mut self.current, next));
        self.y = CONTINUATION_TOP;
    }

    fn finish(mut self) -> Vec<Page> {
        self.pages.push(self.current);
        self.pages
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn items(category: &str, count: usize) -> Vec<ShoppingItem> {
        (0..count)
            .map(|i| ShoppingItem {
                id: i as i64,
                name: format!("Item {}", i),
                quantity: "1".to_string(),
                unit: "pcs".to_string(),
                category: category.to_string(),
                is_bought: i % 2 == 0,
            })
            .collect()
    }

    #[test]
    fn test_single_page_positions() {
        let pages = ExportLayout::paginate(&items("Dairy", 2));
        assert_eq!(pages.len(), 1);

        let ys: Vec<u32> = pages[0].regions.iter().map(Region::y).collect();
        // header, divider, category, divider, row, row, footer
        assert_eq!(ys, vec![0, 85, 97, 112, 124, 146, 173]);

        match &pages[0].regions[2] {
            Region::CategoryHeader { category, count, .. } => {
                assert_eq!(category, "Dairy");
                assert_eq!(*count, 2);
            }
            other => panic!("expected category header, got {:?}", other),
        }
        match pages[0].regions.last() {
            Some(Region::Footer { summary, .. }) => {
                assert_eq!(summary.total, 2);
                assert_eq!(summary.bought, 1);
            }
            other => panic!("expected footer, got {:?}", other),
        }
    }

    #[test]
    fn test_long_list_breaks_pages_without_header() {
        let pages = ExportLayout::paginate(&items("Pantry", 40));
        assert!(pages.len() >= 2);

        assert!(matches!(pages[0].regions[0], Region::Header { .. }));
        assert_eq!(pages[1].number, 2);
        assert!(!pages[1]
            .regions
            .iter()
            .any(|r| matches!(r, Region::Header { .. })));
        assert_eq!(pages[1].regions[0].y(), CONTINUATION_TOP);

        let rows: usize = pages
            .iter()
            .flat_map(|p| p.regions.iter())
            .filter(|r| matches!(r, Region::ItemRow { .. }))
            .count();
        assert_eq!(rows, 40);

        for page in &pages {
            for region in &page.regions {
                if let Region::ItemRow { y, .. } = region {
                    assert!(*y <= ROW_LIMIT);
                }
            }
        }
    }

    #[test]
    fn test_empty_list_still_has_header_and_footer() {
        let pages = ExportLayout::paginate(&[]);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].regions.len(), 2);
        assert!(matches!(pages[0].regions[1], Region::Footer { y: 85, .. }));
    }

    #[test]
    fn test_labels_and_file_name() {
        assert_eq!(item_count_label(1), "1 item");
        assert_eq!(item_count_label(3), "3 items");
        assert_eq!(
            export_file_name(ColorMode::Mono, 1700000000000),
            "listify_mono_1700000000000.pdf"
        );
    }
}
