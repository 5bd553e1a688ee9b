//! Previous/next navigation derived from final sidebars.
//!
//! Each sidebar is flattened depth-first, left to right, into the ordered
//! list of document ids it contains. Categories and links are walked but do
//! not take a slot. A document's neighbours are the ids right before and
//! after it in the flattened list of the sidebar that owns it.
//!
//! A document placed in more than one sidebar (or twice in one) is owned by
//! its first occurrence in sidebar declaration order.

use crate::types::{SidebarItem, Sidebars};
use log::debug;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum NavigationError {
    #[error(
        "sidebars reference documents that do not exist:\n{}\n\nAvailable document ids:\n{}",
        bullet_list(.missing),
        bullet_list(.valid)
    )]
    DanglingDocIds {
        missing: Vec<String>,
        valid: Vec<String>,
    },
}

fn bullet_list(ids: &[String]) -> String {
    if ids.is_empty() {
        return "  (none)".to_string();
    }
    ids.iter()
        .map(|id| format!("  - {id}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Where a document sits in the navigation of its version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocNavigation {
    pub sidebar: Option<String>,
    pub previous: Option<String>,
    pub next: Option<String>,
}

/// Flattened document order of every sidebar of one version.
#[derive(Debug, Clone)]
pub struct NavigationIndex {
    sidebars: Vec<(String, Vec<String>)>,
    /// First occurrence of each id: (sidebar index, position in that sidebar).
    owners: HashMap<String, (usize, usize)>,
}

impl NavigationIndex {
    pub fn new(sidebars: &Sidebars) -> Self {
        let mut flattened = Vec::with_capacity(sidebars.len());
        let mut owners = HashMap::new();

        for (sidebar_idx, sidebar) in sidebars.iter().enumerate() {
            let ids = collect_doc_ids(&sidebar.items);
            for (pos, id) in ids.iter().enumerate() {
                if let Some(&(owner, _)) = owners.get(id) {
                    // The owner is either an earlier sidebar or this one.
                    let owner_name = flattened
                        .get(owner)
                        .map_or(sidebar.name.as_str(), |(name, _): &(String, Vec<String>)| {
                            name.as_str()
                        });
                    debug!(
                        "doc '{id}' appears again in sidebar '{}', keeping its first placement in '{owner_name}'",
                        sidebar.name
                    );
                    continue;
                }
                owners.insert(id.clone(), (sidebar_idx, pos));
            }
            flattened.push((sidebar.name.clone(), ids));
        }

        Self {
            sidebars: flattened,
            owners,
        }
    }

    /// Sidebar names in declaration order.
    pub fn sidebar_names(&self) -> impl Iterator<Item = &str> {
        self.sidebars.iter().map(|(name, _)| name.as_str())
    }

    /// Document ids of a sidebar in navigation order.
    pub fn document_ids(&self, sidebar: &str) -> Option<&[String]> {
        self.sidebars
            .iter()
            .find(|(name, _)| name == sidebar)
            .map(|(_, ids)| ids.as_slice())
    }

    pub fn first_document_id(&self, sidebar: &str) -> Option<&str> {
        self.document_ids(sidebar)
            .and_then(|ids| ids.first())
            .map(String::as_str)
    }

    /// Name of the sidebar that owns `doc_id`, if any.
    pub fn sidebar_for(&self, doc_id: &str) -> Option<&str> {
        self.owners
            .get(doc_id)
            .map(|&(idx, _)| self.sidebars[idx].0.as_str())
    }

    /// Owning sidebar and neighbours of `doc_id`. All fields are `None` for
    /// documents that appear in no sidebar.
    pub fn navigation_for(&self, doc_id: &str) -> DocNavigation {
        let Some(&(idx, pos)) = self.owners.get(doc_id) else {
            return DocNavigation::default();
        };
        let (name, ids) = &self.sidebars[idx];
        DocNavigation {
            sidebar: Some(name.clone()),
            previous: pos.checked_sub(1).map(|p| ids[p].clone()),
            next: ids.get(pos + 1).cloned(),
        }
    }

    /// Navigation of every document referenced by a sidebar, keyed by id.
    pub fn navigation_map(&self) -> BTreeMap<String, DocNavigation> {
        self.owners
            .keys()
            .map(|id| (id.clone(), self.navigation_for(id)))
            .collect()
    }

    /// Every document id referenced by any sidebar.
    pub fn referenced_ids(&self) -> BTreeSet<&str> {
        self.sidebars
            .iter()
            .flat_map(|(_, ids)| ids.iter().map(String::as_str))
            .collect()
    }

    /// Fail if any sidebar references a document id missing from `valid_ids`.
    ///
    /// The error lists every dangling id and every valid id, both sorted.
    pub fn validate_references<I, S>(&self, valid_ids: I) -> Result<(), NavigationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let valid: BTreeSet<String> = valid_ids
            .into_iter()
            .map(|id| id.as_ref().to_string())
            .collect();
        let missing: Vec<String> = self
            .referenced_ids()
            .into_iter()
            .filter(|id| !valid.contains(*id))
            .map(str::to_string)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(NavigationError::DanglingDocIds {
                missing,
                valid: valid.into_iter().collect(),
            })
        }
    }
}

/// Depth-first, left-to-right list of the doc ids in `items`.
pub fn collect_doc_ids(items: &[SidebarItem]) -> Vec<String> {
    fn walk(items: &[SidebarItem], out: &mut Vec<String>) {
        for item in items {
            match item {
                SidebarItem::Doc { id, .. } => out.push(id.clone()),
                SidebarItem::Category { items, .. } => walk(items, out),
                SidebarItem::Link { .. } => {}
            }
        }
    }
    let mut out = Vec::new();
    walk(items, &mut out);
    out
}
