//! CLI output formatting.
//!
//! Every loaded version is shown as an inventory of its sidebars: each item
//! leads with its positional index among its siblings, nested items are
//! indented four spaces per level.
//!
//! ```text
//! Version current
//! Sidebar docs (4 docs)
//!     001 intro
//!     002 Guides
//!         001 Install (guides/install)
//!         002 Blog → https://example.com/blog
//!     003 faq
//! Unlisted
//!     drafts/wip
//! Warnings
//!     sidebar 'docs': no docs found in directory 'old', autogenerated section is empty
//!
//! Loaded 1 version, 1 sidebar, 4 docs in navigation
//! ```
//!
//! Format functions return `Vec<String>` and do no I/O; `print_*` wrappers
//! write to stdout.

use crate::load::LoadedVersion;
use crate::types::SidebarItem;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Format one item line. Docs with a label override show the id in parens.
fn item_line(index: usize, item: &SidebarItem) -> String {
    match item {
        SidebarItem::Doc {
            id,
            label_override: Some(label),
        } => format!("{} {} ({})", format_index(index), label, id),
        SidebarItem::Doc { id, .. } => format!("{} {}", format_index(index), id),
        SidebarItem::Link { href, label } => {
            format!("{} {} \u{2192} {}", format_index(index), label, href)
        }
        SidebarItem::Category {
            label, collapsed, ..
        } => {
            let state = if *collapsed { "" } else { " (expanded)" };
            format!("{} {}{}", format_index(index), label, state)
        }
    }
}

fn format_items(items: &[SidebarItem], depth: usize, lines: &mut Vec<String>) {
    for (i, item) in items.iter().enumerate() {
        lines.push(format!("{}{}", indent(depth), item_line(i + 1, item)));
        if let SidebarItem::Category { items, .. } = item {
            format_items(items, depth + 1, lines);
        }
    }
}

/// Format the sidebars, unlisted docs and warnings of one version.
pub fn format_version(version: &LoadedVersion) -> Vec<String> {
    let mut lines = vec![format!("Version {}", version.name)];

    for sidebar in &version.sidebars {
        let doc_count = version
            .navigation
            .document_ids(&sidebar.name)
            .map_or(0, <[String]>::len);
        lines.push(format!(
            "Sidebar {} ({})",
            sidebar.name,
            plural(doc_count, "doc")
        ));
        if sidebar.items.is_empty() {
            lines.push(format!("{}(empty)", indent(1)));
        }
        format_items(&sidebar.items, 1, &mut lines);
    }

    if !version.unlisted.is_empty() {
        lines.push("Unlisted".to_string());
        for id in &version.unlisted {
            lines.push(format!("{}{}", indent(1), id));
        }
    }

    if !version.warnings.is_empty() {
        lines.push("Warnings".to_string());
        for warning in &version.warnings {
            lines.push(format!("{}{}", indent(1), warning));
        }
    }

    lines
}

/// Format all versions followed by a one-line summary.
pub fn format_load_output(versions: &[LoadedVersion]) -> Vec<String> {
    let mut lines = Vec::new();
    for version in versions {
        lines.extend(format_version(version));
        lines.push(String::new());
    }

    let sidebar_count: usize = versions.iter().map(|v| v.sidebars.len()).sum();
    let doc_count: usize = versions
        .iter()
        .map(|v| v.navigation.referenced_ids().len())
        .sum();
    lines.push(format!(
        "Loaded {}, {}, {} in navigation",
        plural(versions.len(), "version"),
        plural(sidebar_count, "sidebar"),
        plural(doc_count, "doc")
    ));
    lines
}

/// Print load output to stdout.
pub fn print_load_output(versions: &[LoadedVersion]) {
    for line in format_load_output(versions) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SidebarOptions;
    use crate::load::{VersionInput, load_version};
    use crate::test_helpers::*;
    use serde_json::json;

    fn loaded() -> LoadedVersion {
        let docs = [
            doc_at("intro", ".", "intro.md"),
            doc_at("guides/install", "guides", "guides/install.md"),
            doc_at("faq", ".", "faq.md"),
            doc_at("drafts/wip", "drafts", "drafts/wip.md"),
        ];
        let input = VersionInput {
            name: "current".into(),
            documents: docs.iter().map(|d| (d.sort_key.clone(), d.clone())).collect(),
            sidebars: Some(json!({
                "docs": [
                    "intro",
                    { "type": "category", "label": "Guides", "collapsed": false, "items": [
                        { "type": "doc", "id": "guides/install", "label": "Install" },
                        { "type": "link", "href": "https://example.com/blog", "label": "Blog" }
                    ]},
                    "faq",
                    { "type": "autogenerated", "dirPath": "old" }
                ]
            })),
        };
        load_version(&input, &SidebarOptions::default()).unwrap()
    }

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(100), "100");
    }

    #[test]
    fn plural_forms() {
        assert_eq!(plural(1, "doc"), "1 doc");
        assert_eq!(plural(0, "doc"), "0 docs");
        assert_eq!(plural(3, "sidebar"), "3 sidebars");
    }

    #[test]
    fn version_tree_lines() {
        let lines = format_version(&loaded());
        assert_eq!(
            lines,
            vec![
                "Version current",
                "Sidebar docs (3 docs)",
                "    001 intro",
                "    002 Guides (expanded)",
                "        001 Install (guides/install)",
                "        002 Blog \u{2192} https://example.com/blog",
                "    003 faq",
                "Unlisted",
                "    drafts/wip",
                "Warnings",
                "    sidebar 'docs': no docs found in directory 'old', autogenerated section is empty",
            ]
        );
    }

    #[test]
    fn summary_line() {
        let lines = format_load_output(&[loaded()]);
        assert_eq!(
            lines.last().unwrap(),
            "Loaded 1 version, 1 sidebar, 3 docs in navigation"
        );
    }
}
