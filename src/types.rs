//! Shared types used across all pipeline stages.
//!
//! Two item enums model the two halves of the pipeline: [`UnprocessedItem`]
//! is what the normalizer produces and may still contain autogeneration
//! placeholders; [`SidebarItem`] is the final tree and cannot. Both serialize
//! to the same `{"type": ...}` shape the normalizer accepts, so a final
//! sidebar can be fed back through the pipeline unchanged.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// A content document as handed over by the loader.
///
/// The core never reads files; the loader extracts the id, the directory the
/// document lives in (relative to the content root, `.` for the root itself)
/// and a sort key (usually directory + filename) before calling in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub directory_path: String,
    pub sort_key: String,
    /// Explicit label override supplied by the loader, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidebar_label_override: Option<String>,
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub front_matter: serde_json::Map<String, serde_json::Value>,
}

impl Document {
    pub fn new(
        id: impl Into<String>,
        directory_path: impl Into<String>,
        sort_key: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            directory_path: directory_path.into(),
            sort_key: sort_key.into(),
            sidebar_label_override: None,
            front_matter: serde_json::Map::new(),
        }
    }

    /// Label shown in generated sidebars instead of the document title.
    ///
    /// An explicit override wins over the `sidebar_label` front-matter key.
    pub fn sidebar_label(&self) -> Option<&str> {
        self.sidebar_label_override.as_deref().or_else(|| {
            self.front_matter
                .get("sidebar_label")
                .and_then(serde_json::Value::as_str)
        })
    }
}

/// A node of a final, fully resolved sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SidebarItem {
    Doc {
        id: String,
        #[serde(rename = "label", default, skip_serializing_if = "Option::is_none")]
        label_override: Option<String>,
    },
    Link {
        href: String,
        label: String,
    },
    Category {
        label: String,
        items: Vec<SidebarItem>,
        collapsed: bool,
    },
}

impl SidebarItem {
    pub fn doc(id: impl Into<String>) -> Self {
        SidebarItem::Doc {
            id: id.into(),
            label_override: None,
        }
    }

    pub fn category(label: impl Into<String>, items: Vec<SidebarItem>) -> Self {
        SidebarItem::Category {
            label: label.into(),
            items,
            collapsed: true,
        }
    }
}

/// A node of a normalized sidebar that may still hold placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum UnprocessedItem {
    Doc {
        id: String,
        #[serde(rename = "label", skip_serializing_if = "Option::is_none")]
        label_override: Option<String>,
    },
    Link {
        href: String,
        label: String,
    },
    Category {
        label: String,
        items: Vec<UnprocessedItem>,
        collapsed: bool,
    },
    /// Expands into the documents under `dir_path` during processing.
    Autogenerated {
        #[serde(rename = "dirPath")]
        dir_path: String,
    },
}

/// One named sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedSidebar<T> {
    pub name: String,
    pub items: Vec<T>,
}

/// Sidebars of one version, in declaration order.
///
/// Declaration order matters: when a document is placed in several sidebars
/// the first one owns it for navigation purposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarSet<T> {
    entries: Vec<NamedSidebar<T>>,
}

pub type UnprocessedSidebars = SidebarSet<UnprocessedItem>;
pub type Sidebars = SidebarSet<SidebarItem>;

impl<T> SidebarSet<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a sidebar, replacing the items of an existing one with the same
    /// name in place.
    pub fn insert(&mut self, name: impl Into<String>, items: Vec<T>) {
        let name = name.into();
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(existing) => existing.items = items,
            None => self.entries.push(NamedSidebar { name, items }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&[T]> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.items.as_slice())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn as_slice(&self) -> &[NamedSidebar<T>] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NamedSidebar<T>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for SidebarSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<NamedSidebar<T>> for SidebarSet<T> {
    fn from_iter<I: IntoIterator<Item = NamedSidebar<T>>>(iter: I) -> Self {
        let mut set = SidebarSet::new();
        for sidebar in iter {
            set.insert(sidebar.name, sidebar.items);
        }
        set
    }
}

impl<T> IntoIterator for SidebarSet<T> {
    type Item = NamedSidebar<T>;
    type IntoIter = std::vec::IntoIter<NamedSidebar<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a SidebarSet<T> {
    type Item = &'a NamedSidebar<T>;
    type IntoIter = std::slice::Iter<'a, NamedSidebar<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Serializes as a JSON object keyed by sidebar name, in declaration order.
impl<T: Serialize> Serialize for SidebarSet<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.name, &entry.items)?;
        }
        map.end()
    }
}

/// Non-fatal conditions found while building a version's sidebars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// An autogenerated placeholder matched no documents.
    EmptyScope { sidebar: String, dir_path: String },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::EmptyScope { sidebar, dir_path } => write!(
                f,
                "sidebar '{sidebar}': no docs found in directory '{dir_path}', autogenerated section is empty"
            ),
        }
    }
}
