//! End-to-end load of `fixtures/site.json` through the public API.

use docnav::config::{NavConfig, SidebarOptions};
use docnav::load::{LoadedVersion, SiteInput, VersionInput, artifact, load_versions, read_site};
use docnav::navigation::DocNavigation;
use docnav::types::{SidebarItem, Warning};
use std::path::Path;

fn fixture_site() -> SiteInput {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site.json");
    read_site(&path).unwrap()
}

fn load_fixture() -> Vec<LoadedVersion> {
    let site = fixture_site();
    load_versions(&site.versions, &SidebarOptions::default()).unwrap()
}

fn nav(sidebar: &str, previous: Option<&str>, next: Option<&str>) -> DocNavigation {
    DocNavigation {
        sidebar: Some(sidebar.to_string()),
        previous: previous.map(str::to_string),
        next: next.map(str::to_string),
    }
}

#[test]
fn versions_load_in_order() {
    let versions = load_fixture();
    let names: Vec<&str> = versions.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["current", "1.0"]);
}

#[test]
fn explicit_sidebar_with_shorthand_and_autogenerated_section() {
    let versions = load_fixture();
    let current = &versions[0];

    assert_eq!(
        current.sidebars.get("docs").unwrap(),
        &[
            SidebarItem::Doc {
                id: "0-getting-started".into(),
                label_override: Some("Start here".into()),
            },
            SidebarItem::Category {
                label: "Guides".into(),
                collapsed: true,
                items: vec![
                    SidebarItem::Category {
                        label: "Advanced".into(),
                        collapsed: true,
                        items: vec![SidebarItem::Doc {
                            id: "guides/advanced/tuning".into(),
                            label_override: Some("Performance tuning".into()),
                        }],
                    },
                    SidebarItem::doc("guides/install"),
                ],
            },
            SidebarItem::Link {
                href: "https://example.com/changelog".into(),
                label: "Changelog".into(),
            },
        ]
    );
}

#[test]
fn previous_next_follow_flattened_order() {
    let versions = load_fixture();
    let index = &versions[0].navigation;

    assert_eq!(
        index.navigation_for("0-getting-started"),
        nav("docs", None, Some("guides/advanced/tuning"))
    );
    assert_eq!(
        index.navigation_for("guides/advanced/tuning"),
        nav("docs", Some("0-getting-started"), Some("guides/install"))
    );
    assert_eq!(
        index.navigation_for("guides/install"),
        nav("docs", Some("guides/advanced/tuning"), None)
    );
    assert_eq!(
        index.document_ids("api").unwrap(),
        &["api/core/init", "api/core/run", "api/index"]
    );
}

#[test]
fn unlisted_docs_and_empty_scopes_are_reported() {
    let versions = load_fixture();
    let current = &versions[0];

    assert_eq!(current.unlisted, vec!["drafts/wip"]);
    assert_eq!(
        current.navigation.navigation_for("drafts/wip"),
        DocNavigation::default()
    );
    assert_eq!(
        current.warnings,
        vec![Warning::EmptyScope {
            sidebar: "api".into(),
            dir_path: "3-Removed".into(),
        }]
    );
}

#[test]
fn version_without_sidebars_autogenerates_everything() {
    let versions = load_fixture();
    let old = &versions[1];

    assert_eq!(old.sidebars.names().collect::<Vec<_>>(), vec!["defaultSidebar"]);
    assert_eq!(
        old.sidebars.get("defaultSidebar").unwrap(),
        &[
            SidebarItem::category("API", vec![SidebarItem::doc("api/index")]),
            SidebarItem::doc("intro"),
        ]
    );
    assert_eq!(
        old.navigation.navigation_for("api/index"),
        nav("defaultSidebar", None, Some("intro"))
    );
}

#[test]
fn versions_do_not_share_documents() {
    let versions = load_fixture();
    // "api/index" exists in both versions but belongs to different sidebars.
    assert_eq!(versions[0].navigation.sidebar_for("api/index"), Some("api"));
    assert_eq!(
        versions[1].navigation.sidebar_for("api/index"),
        Some("defaultSidebar")
    );
    assert_eq!(versions[1].navigation.sidebar_for("guides/install"), None);
}

#[test]
fn keeping_number_prefixes_changes_only_labels() {
    let site = fixture_site();
    let mut config = NavConfig::default();
    config.autogenerate.strip_number_prefixes = false;
    let versions = load_versions(&site.versions, &SidebarOptions::from_config(&config)).unwrap();

    let old = versions[1].sidebars.get("defaultSidebar").unwrap();
    assert!(matches!(&old[0], SidebarItem::Category { label, .. } if label == "2-API"));
    assert_eq!(
        versions[1].navigation.document_ids("defaultSidebar").unwrap(),
        &["api/index", "intro"]
    );
}

#[test]
fn dangling_reference_aborts_load() {
    let mut site = fixture_site();
    site.versions.push(VersionInput {
        name: "broken".into(),
        documents: Default::default(),
        sidebars: Some(serde_json::json!({ "docs": ["missing"] })),
    });
    let err = load_versions(&site.versions, &SidebarOptions::default()).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("broken"));
    assert!(msg.contains("- missing"));
}

#[test]
fn artifact_serializes_every_version() {
    let versions = load_fixture();
    let value = serde_json::to_value(artifact(&versions)).unwrap();

    let rendered = value["versions"].as_array().unwrap();
    assert_eq!(rendered.len(), 2);
    assert_eq!(rendered[0]["navigation"]["guides/install"]["previous"], "guides/advanced/tuning");
    assert_eq!(rendered[0]["warnings"][0]["kind"], "empty_scope");
    assert_eq!(rendered[1]["sidebars"]["defaultSidebar"][0]["label"], "API");
}
