//! Sidebar autogeneration from the document layout.
//!
//! An `autogenerated` placeholder names a directory scope. Every document in
//! that directory or below it becomes a sidebar entry, and every
//! subdirectory on the way becomes a category:
//!
//! ```text
//! documents (sortKey order)          autogenerate(".")
//! intro.md          (.)              doc intro
//! 2-API/overview.md (2-API)          category "API"
//! 2-API/core/init.md (2-API/core)      doc overview
//! 2-API/core/run.md  (2-API/core)      category "core"
//!                                        doc init
//!                                        doc run
//! ```
//!
//! ## Ordering
//!
//! Documents are walked once in `sortKey` order. A category is created the
//! first time a document inside it is seen, so categories and documents
//! interleave by their natural file order. The walk is a sequential fold:
//! a later document must see the categories created by earlier ones.
//!
//! ## Arena
//!
//! Categories under construction live in a flat arena and are referenced by
//! index. A map from the joined breadcrumb (`2-API/core`) to the arena index
//! finds the deepest existing ancestor without holding aliased `&mut`
//! borrows into the tree. The nested [`SidebarItem`] tree is only built once
//! the fold is finished.

use crate::config::SidebarOptions;
use crate::naming::strip_number_prefix;
use crate::types::{Document, SidebarItem};
use log::warn;
use std::collections::HashMap;

/// Expand the scope `dir_path` into a sidebar subtree.
///
/// `dir_path` is relative to the docs root, `.` meaning the root itself.
/// An empty scope logs a warning and yields no items.
pub fn autogenerate(
    dir_path: &str,
    documents: &[Document],
    opts: &SidebarOptions,
) -> Vec<SidebarItem> {
    let mut selected: Vec<&Document> = documents
        .iter()
        .filter(|doc| in_scope(&doc.directory_path, dir_path))
        .collect();

    if selected.is_empty() {
        warn!("No docs found in directory '{dir_path}': the autogenerated sidebar section is empty");
        return Vec::new();
    }

    // Id as tie-breaker keeps the output independent of input order.
    selected.sort_by(|a, b| {
        a.sort_key
            .cmp(&b.sort_key)
            .then_with(|| a.id.cmp(&b.id))
    });

    selected
        .into_iter()
        .fold(CategoryArena::new(*opts), |mut arena, doc| {
            let crumbs = breadcrumb(&doc.directory_path, dir_path);
            arena.place(&crumbs, doc);
            arena
        })
        .into_items()
}

/// Whether a document directory sits at or below the scope.
fn in_scope(directory: &str, scope: &str) -> bool {
    if scope == "." || directory == scope {
        return true;
    }
    directory
        .strip_prefix(scope)
        .is_some_and(|rest| rest.starts_with('/'))
}

/// Directory segments from the scope root down to the document.
///
/// Empty for documents sitting directly in the scope.
fn breadcrumb<'a>(directory: &'a str, scope: &str) -> Vec<&'a str> {
    let relative = if scope == "." {
        directory
    } else {
        directory.strip_prefix(scope).unwrap_or_default()
    };
    relative
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect()
}

enum Entry {
    Doc(SidebarItem),
    Category(usize),
}

struct CategoryNode {
    label: String,
    entries: Vec<Entry>,
}

struct CategoryArena {
    opts: SidebarOptions,
    nodes: Vec<CategoryNode>,
    top: Vec<Entry>,
    by_breadcrumb: HashMap<String, usize>,
}

impl CategoryArena {
    fn new(opts: SidebarOptions) -> Self {
        Self {
            opts,
            nodes: Vec::new(),
            top: Vec::new(),
            by_breadcrumb: HashMap::new(),
        }
    }

    fn place(&mut self, crumbs: &[&str], doc: &Document) {
        let item = SidebarItem::Doc {
            id: doc.id.clone(),
            label_override: doc.sidebar_label().map(str::to_string),
        };
        match self.ensure_category(crumbs) {
            Some(idx) => self.nodes[idx].entries.push(Entry::Doc(item)),
            None => self.top.push(Entry::Doc(item)),
        }
    }

    /// Return the category for `crumbs`, creating missing ancestors top-down.
    fn ensure_category(&mut self, crumbs: &[&str]) -> Option<usize> {
        let mut parent: Option<usize> = None;
        for depth in 1..=crumbs.len() {
            let key = crumbs[..depth].join("/");
            let idx = match self.by_breadcrumb.get(&key) {
                Some(&idx) => idx,
                None => {
                    let idx = self.nodes.len();
                    let label = self.category_label(crumbs[depth - 1]);
                    self.nodes.push(CategoryNode {
                        label,
                        entries: Vec::new(),
                    });
                    match parent {
                        Some(p) => self.nodes[p].entries.push(Entry::Category(idx)),
                        None => self.top.push(Entry::Category(idx)),
                    }
                    self.by_breadcrumb.insert(key, idx);
                    idx
                }
            };
            parent = Some(idx);
        }
        parent
    }

    fn category_label(&self, segment: &str) -> String {
        if self.opts.strip_number_prefixes {
            strip_number_prefix(segment)
        } else {
            segment.to_string()
        }
    }

    fn into_items(mut self) -> Vec<SidebarItem> {
        let top = std::mem::take(&mut self.top);
        self.materialize(top)
    }

    fn materialize(&mut self, entries: Vec<Entry>) -> Vec<SidebarItem> {
        entries
            .into_iter()
            .map(|entry| match entry {
                Entry::Doc(item) => item,
                Entry::Category(idx) => {
                    let label = std::mem::take(&mut self.nodes[idx].label);
                    let children = std::mem::take(&mut self.nodes[idx].entries);
                    SidebarItem::Category {
                        label,
                        items: self.materialize(children),
                        collapsed: self.opts.default_collapsed,
                    }
                }
            })
            .collect()
    }
}
