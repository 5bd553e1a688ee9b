//! Shared test utilities for the docnav test suite.
//!
//! Provides document builders, lookups, and a compact tree-shape assertion
//! for sidebar trees.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let docs = vec![
//!     doc_at("intro", ".", "intro.md"),
//!     doc_at("api/core/init", "api/core", "api/core/init.md"),
//! ];
//! let items = autogenerate(".", &docs, &SidebarOptions::default());
//!
//! assert_tree_shape(&items, &[
//!     "doc intro",
//!     "category api",
//!     "  category core",
//!     "    doc api/core/init",
//! ]);
//! ```

use crate::types::{Document, SidebarItem};

// =========================================================================
// Builders
// =========================================================================

/// A document with no front-matter.
pub fn doc_at(id: &str, directory: &str, sort_key: &str) -> Document {
    Document::new(id, directory, sort_key)
}

// =========================================================================
// Lookups: panic with a clear message on miss
// =========================================================================

/// Find a top-level category by label. Panics if not found.
pub fn find_category<'a>(items: &'a [SidebarItem], label: &str) -> &'a [SidebarItem] {
    items
        .iter()
        .find_map(|item| match item {
            SidebarItem::Category {
                label: l, items, ..
            } if l == label => Some(items.as_slice()),
            _ => None,
        })
        .unwrap_or_else(|| {
            let labels = tree_shape(items);
            panic!("category '{label}' not found. Available: {labels:?}")
        })
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// All doc ids, depth-first.
pub fn doc_ids(items: &[SidebarItem]) -> Vec<String> {
    crate::navigation::collect_doc_ids(items)
}

/// One line per item: `doc <id>`, `link <label>` or `category <label>`,
/// indented two spaces per nesting level.
pub fn tree_shape(items: &[SidebarItem]) -> Vec<String> {
    fn walk(items: &[SidebarItem], depth: usize, out: &mut Vec<String>) {
        let pad = "  ".repeat(depth);
        for item in items {
            match item {
                SidebarItem::Doc { id, .. } => out.push(format!("{pad}doc {id}")),
                SidebarItem::Link { label, .. } => out.push(format!("{pad}link {label}")),
                SidebarItem::Category { label, items, .. } => {
                    out.push(format!("{pad}category {label}"));
                    walk(items, depth + 1, out);
                }
            }
        }
    }
    let mut out = Vec::new();
    walk(items, 0, &mut out);
    out
}

/// Assert that a sidebar tree matches the expected [`tree_shape`] lines.
pub fn assert_tree_shape(items: &[SidebarItem], expected: &[&str]) {
    let actual = tree_shape(items);
    assert_eq!(actual, expected, "sidebar tree shape mismatch");
}
