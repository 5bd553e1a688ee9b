//! Sidebar processing: placeholders in, concrete trees out.
//!
//! Walks each normalized sidebar, expands every `autogenerated` placeholder
//! in place via [`autogen::autogenerate`](crate::autogen::autogenerate) and
//! recurses into explicit categories. Sibling order is kept exactly as
//! declared; a placeholder's output is spliced where the placeholder stood.
//!
//! ## Parallel Processing
//!
//! Sidebars are independent of each other and are processed in parallel
//! with [rayon](https://docs.rs/rayon). Results are collected in declaration
//! order, so the output is the same as a sequential run.

use crate::autogen::autogenerate;
use crate::config::SidebarOptions;
use crate::types::{
    Document, NamedSidebar, SidebarItem, Sidebars, UnprocessedItem, UnprocessedSidebars, Warning,
};
use rayon::prelude::*;

/// Output of [`process_sidebars`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedSidebars {
    pub sidebars: Sidebars,
    /// Empty autogenerated scopes, in sidebar declaration order.
    pub warnings: Vec<Warning>,
}

/// Resolve every sidebar of a version.
pub fn process_sidebars(
    unprocessed: &UnprocessedSidebars,
    documents: &[Document],
    opts: &SidebarOptions,
) -> ProcessedSidebars {
    let processed: Vec<(NamedSidebar<SidebarItem>, Vec<Warning>)> = unprocessed
        .as_slice()
        .par_iter()
        .map(|sidebar| {
            let (items, warnings) = process_sidebar(&sidebar.name, &sidebar.items, documents, opts);
            (
                NamedSidebar {
                    name: sidebar.name.clone(),
                    items,
                },
                warnings,
            )
        })
        .collect();

    let mut warnings = Vec::new();
    let sidebars = processed
        .into_iter()
        .map(|(sidebar, w)| {
            warnings.extend(w);
            sidebar
        })
        .collect();

    ProcessedSidebars { sidebars, warnings }
}

/// Resolve one sidebar. `name` is only used to attribute warnings.
pub fn process_sidebar(
    name: &str,
    items: &[UnprocessedItem],
    documents: &[Document],
    opts: &SidebarOptions,
) -> (Vec<SidebarItem>, Vec<Warning>) {
    let mut processor = Processor {
        sidebar: name,
        documents,
        opts,
        warnings: Vec::new(),
    };
    let items = processor.process_items(items);
    (items, processor.warnings)
}

struct Processor<'a> {
    sidebar: &'a str,
    documents: &'a [Document],
    opts: &'a SidebarOptions,
    warnings: Vec<Warning>,
}

impl Processor<'_> {
    fn process_items(&mut self, items: &[UnprocessedItem]) -> Vec<SidebarItem> {
        let mut out = Vec::with_capacity(items.len());
        for item in items {
            self.process_item(item, &mut out);
        }
        out
    }

    /// Push the processed form of `item` onto `out`. A placeholder may push
    /// any number of items, including none.
    fn process_item(&mut self, item: &UnprocessedItem, out: &mut Vec<SidebarItem>) {
        match item {
            UnprocessedItem::Doc { id, label_override } => out.push(SidebarItem::Doc {
                id: id.clone(),
                label_override: label_override.clone(),
            }),
            UnprocessedItem::Link { href, label } => out.push(SidebarItem::Link {
                href: href.clone(),
                label: label.clone(),
            }),
            UnprocessedItem::Category {
                label,
                items,
                collapsed,
            } => out.push(SidebarItem::Category {
                label: label.clone(),
                items: self.process_items(items),
                collapsed: *collapsed,
            }),
            UnprocessedItem::Autogenerated { dir_path } => {
                let generated = autogenerate(dir_path, self.documents, self.opts);
                if generated.is_empty() {
                    self.warnings.push(Warning::EmptyScope {
                        sidebar: self.sidebar.to_string(),
                        dir_path: dir_path.clone(),
                    });
                }
                out.extend(generated);
            }
        }
    }
}
