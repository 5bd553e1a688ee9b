//! Sidebar normalization.
//!
//! Turns the loosely-typed sidebar JSON users write into [`UnprocessedItem`]
//! trees. Accepted item forms:
//!
//! ```text
//! "intro"                                          doc shorthand
//! {"Guides": ["a", "b"]}                           category shorthand (one category per key)
//! {"type": "doc", "id": "a", "label": "A"}         doc ("ref" is accepted as an alias)
//! {"type": "link", "href": "...", "label": "..."}  external link
//! {"type": "category", "label": "...", "items": [...], "collapsed": false}
//! {"type": "autogenerated", "dirPath": "guides"}   placeholder, expanded by `process`
//! ```
//!
//! Every explicit type has an exact key allow-list. Anything unexpected is a
//! hard error that echoes the offending item, so typos surface at load time
//! instead of silently producing a different sidebar.
//!
//! When no sidebar file exists at all, [`normalize_sidebars`] yields a single
//! `defaultSidebar` that autogenerates from the docs root.

use crate::config::SidebarOptions;
use crate::types::{UnprocessedItem, UnprocessedSidebars};
use serde_json::{Map, Value};
use thiserror::Error;

/// Name of the sidebar created when no sidebar spec is supplied.
pub const DEFAULT_SIDEBAR_NAME: &str = "defaultSidebar";

const CATEGORY_KEYS: &[&str] = &["type", "label", "items", "collapsed"];
const AUTOGENERATED_KEYS: &[&str] = &["type", "dirPath"];
const LINK_KEYS: &[&str] = &["type", "href", "label"];
const DOC_KEYS: &[&str] = &["type", "id", "label"];

#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("sidebars must be an object mapping sidebar names to items, got:\n{found}")]
    InvalidSidebarSet { found: String },
    #[error("invalid sidebar '{name}': {source}")]
    InSidebar {
        name: String,
        #[source]
        source: Box<NormalizeError>,
    },
    #[error("a sidebar must be a list of items or a map of category shorthands, got:\n{found}")]
    InvalidSidebar { found: String },
    #[error("sidebar items must be strings or objects, got:\n{item}")]
    InvalidItem { item: String },
    #[error("sidebar item type \"{from}\" has been renamed to \"{to}\", please update it:\n{item}")]
    RenamedType {
        from: String,
        to: &'static str,
        item: String,
    },
    #[error(
        "unknown sidebar item type \"{ty}\" (expected category, autogenerated, link, doc or ref):\n{item}"
    )]
    UnknownType { ty: String, item: String },
    #[error("sidebar {ty} item is missing required key \"{key}\":\n{item}")]
    MissingKey {
        ty: String,
        key: &'static str,
        item: String,
    },
    #[error("sidebar {ty} item key \"{key}\" must be {expected}:\n{item}")]
    InvalidValue {
        ty: String,
        key: String,
        expected: &'static str,
        item: String,
    },
    #[error("unknown sidebar {ty} item keys: {}. Item:\n{item}", .keys.join(", "))]
    UnknownKeys {
        ty: String,
        keys: Vec<String>,
        item: String,
    },
    #[error(
        "autogenerated dirPath \"{dir_path}\" must be a relative path without leading or trailing separators (use \".\" for the docs root):\n{item}"
    )]
    UncleanDirPath { dir_path: String, item: String },
}

fn render(item: &Value) -> String {
    format!("{item:#}")
}

/// Normalize a whole sidebar spec.
///
/// `None` (or JSON `null`) means the user wrote no sidebar file: the result
/// is a single [`DEFAULT_SIDEBAR_NAME`] sidebar autogenerated from `.`.
pub fn normalize_sidebars(
    raw: Option<&Value>,
    opts: &SidebarOptions,
) -> Result<UnprocessedSidebars, NormalizeError> {
    let sidebars = match raw {
        None | Some(Value::Null) => return Ok(default_sidebars()),
        Some(Value::Object(map)) => map,
        Some(other) => {
            return Err(NormalizeError::InvalidSidebarSet {
                found: render(other),
            });
        }
    };

    let mut result = UnprocessedSidebars::new();
    for (name, body) in sidebars {
        let items = normalize_sidebar(body, opts).map_err(|e| NormalizeError::InSidebar {
            name: name.clone(),
            source: Box::new(e),
        })?;
        result.insert(name.clone(), items);
    }
    Ok(result)
}

/// The sidebar set used when the user supplied none.
pub fn default_sidebars() -> UnprocessedSidebars {
    let mut sidebars = UnprocessedSidebars::new();
    sidebars.insert(
        DEFAULT_SIDEBAR_NAME,
        vec![UnprocessedItem::Autogenerated {
            dir_path: ".".to_string(),
        }],
    );
    sidebars
}

/// Normalize one sidebar body: a list of items, or a category shorthand map.
pub fn normalize_sidebar(
    body: &Value,
    opts: &SidebarOptions,
) -> Result<Vec<UnprocessedItem>, NormalizeError> {
    match body {
        Value::Array(items) => normalize_items(items, opts),
        Value::Object(map) if !map.contains_key("type") => normalize_shorthand(map, opts),
        other => Err(NormalizeError::InvalidSidebar {
            found: render(other),
        }),
    }
}

fn normalize_items(
    items: &[Value],
    opts: &SidebarOptions,
) -> Result<Vec<UnprocessedItem>, NormalizeError> {
    let mut result = Vec::with_capacity(items.len());
    for item in items {
        result.extend(normalize_item(item, opts)?);
    }
    Ok(result)
}

/// Normalize one raw item. A shorthand map expands to one category per key,
/// so the result is a list.
pub fn normalize_item(
    item: &Value,
    opts: &SidebarOptions,
) -> Result<Vec<UnprocessedItem>, NormalizeError> {
    match item {
        Value::String(id) => Ok(vec![UnprocessedItem::Doc {
            id: id.clone(),
            label_override: None,
        }]),
        Value::Object(map) => match map.get("type") {
            None => normalize_shorthand(map, opts),
            Some(ty) => normalize_typed(item, map, ty, opts).map(|i| vec![i]),
        },
        other => Err(NormalizeError::InvalidItem {
            item: render(other),
        }),
    }
}

fn normalize_shorthand(
    map: &Map<String, Value>,
    opts: &SidebarOptions,
) -> Result<Vec<UnprocessedItem>, NormalizeError> {
    let mut categories = Vec::with_capacity(map.len());
    for (label, value) in map {
        let Value::Array(items) = value else {
            return Err(NormalizeError::InvalidValue {
                ty: "shorthand category".into(),
                key: label.clone(),
                expected: "a list of items",
                item: render(&Value::Object(map.clone())),
            });
        };
        categories.push(UnprocessedItem::Category {
            label: label.clone(),
            items: normalize_items(items, opts)?,
            collapsed: opts.default_collapsed,
        });
    }
    Ok(categories)
}

fn normalize_typed(
    item: &Value,
    map: &Map<String, Value>,
    ty: &Value,
    opts: &SidebarOptions,
) -> Result<UnprocessedItem, NormalizeError> {
    let Some(ty) = ty.as_str() else {
        return Err(NormalizeError::InvalidValue {
            ty: "typed".into(),
            key: "type".into(),
            expected: "a string",
            item: render(item),
        });
    };
    let fields = Fields { ty, item, map };

    match ty {
        "category" => {
            fields.check_keys(CATEGORY_KEYS)?;
            let label = fields.required_str("label")?;
            let items = match map.get("items") {
                Some(Value::Array(items)) => normalize_items(items, opts)?,
                Some(_) => return Err(fields.invalid("items", "a list of items")),
                None => return Err(fields.missing("items")),
            };
            let collapsed = match map.get("collapsed") {
                None => opts.default_collapsed,
                Some(Value::Bool(b)) => *b,
                Some(_) => return Err(fields.invalid("collapsed", "a boolean")),
            };
            Ok(UnprocessedItem::Category {
                label,
                items,
                collapsed,
            })
        }
        "autogenerated" => {
            fields.check_keys(AUTOGENERATED_KEYS)?;
            let dir_path = fields.required_str("dirPath")?;
            if !is_clean_dir_path(&dir_path) {
                return Err(NormalizeError::UncleanDirPath {
                    dir_path,
                    item: render(item),
                });
            }
            Ok(UnprocessedItem::Autogenerated { dir_path })
        }
        "link" => {
            fields.check_keys(LINK_KEYS)?;
            Ok(UnprocessedItem::Link {
                href: fields.required_str("href")?,
                label: fields.required_str("label")?,
            })
        }
        "doc" | "ref" => {
            fields.check_keys(DOC_KEYS)?;
            Ok(UnprocessedItem::Doc {
                id: fields.required_str("id")?,
                label_override: fields.optional_str("label")?,
            })
        }
        "subcategory" => Err(NormalizeError::RenamedType {
            from: ty.to_string(),
            to: "category",
            item: render(item),
        }),
        _ => Err(NormalizeError::UnknownType {
            ty: ty.to_string(),
            item: render(item),
        }),
    }
}

/// `dirPath` must be relative with no leading or trailing separator.
fn is_clean_dir_path(dir_path: &str) -> bool {
    let is_sep = |c: char| c == '/' || c == '\\';
    !dir_path.is_empty() && !dir_path.starts_with(is_sep) && !dir_path.ends_with(is_sep)
}

/// Key accessors for one typed item, producing errors that echo the item.
struct Fields<'a> {
    ty: &'a str,
    item: &'a Value,
    map: &'a Map<String, Value>,
}

impl Fields<'_> {
    fn check_keys(&self, allowed: &[&str]) -> Result<(), NormalizeError> {
        let unknown: Vec<String> = self
            .map
            .keys()
            .filter(|k| !allowed.contains(&k.as_str()))
            .cloned()
            .collect();
        if unknown.is_empty() {
            Ok(())
        } else {
            Err(NormalizeError::UnknownKeys {
                ty: self.ty.to_string(),
                keys: unknown,
                item: render(self.item),
            })
        }
    }

    fn required_str(&self, key: &'static str) -> Result<String, NormalizeError> {
        self.optional_str(key)?.ok_or_else(|| self.missing(key))
    }

    fn optional_str(&self, key: &'static str) -> Result<Option<String>, NormalizeError> {
        match self.map.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(self.invalid(key, "a string")),
        }
    }

    fn missing(&self, key: &'static str) -> NormalizeError {
        NormalizeError::MissingKey {
            ty: self.ty.to_string(),
            key,
            item: render(self.item),
        }
    }

    fn invalid(&self, key: &str, expected: &'static str) -> NormalizeError {
        NormalizeError::InvalidValue {
            ty: self.ty.to_string(),
            key: key.to_string(),
            expected,
            item: render(self.item),
        }
    }
}
