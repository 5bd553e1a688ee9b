//! Version loading: the full pipeline for one documentation version.
//!
//! ```text
//! raw sidebar JSON ─ normalize ─▶ unprocessed sidebars
//!                                   │  (documents)
//!                                   ▼
//!                                process ─▶ final sidebars ─▶ NavigationIndex
//!                                                              │
//!                                                   validate_references
//! ```
//!
//! Versions never share state, so [`load_versions`] builds them in parallel.
//! Any error aborts the whole load; there are no partial results.

use crate::config::SidebarOptions;
use crate::navigation::{DocNavigation, NavigationError, NavigationIndex};
use crate::normalize::{NormalizeError, normalize_sidebars};
use crate::process::process_sidebars;
use crate::types::{Document, Sidebars, Warning};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("version '{version}': {source}")]
    Normalize {
        version: String,
        #[source]
        source: NormalizeError,
    },
    #[error("version '{version}': {source}")]
    Navigation {
        version: String,
        #[source]
        source: NavigationError,
    },
    #[error("version '{version}': document id '{id}' is used by both {first} and {second}")]
    DuplicateDocumentId {
        version: String,
        id: String,
        first: String,
        second: String,
    },
}

/// Everything the loader hands over for a site.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteInput {
    pub versions: Vec<VersionInput>,
}

/// One version: its documents keyed by content-relative path, and its raw
/// sidebar spec (`None` = autogenerate everything).
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VersionInput {
    pub name: String,
    #[serde(default)]
    pub documents: BTreeMap<String, Document>,
    #[serde(default)]
    pub sidebars: Option<serde_json::Value>,
}

/// A fully built version, ready for rendering.
#[derive(Debug, Clone)]
pub struct LoadedVersion {
    pub name: String,
    pub sidebars: Sidebars,
    pub navigation: NavigationIndex,
    pub warnings: Vec<Warning>,
    /// Ids of documents no sidebar references, sorted.
    pub unlisted: Vec<String>,
}

/// Read a site input manifest from disk.
pub fn read_site(path: &Path) -> Result<SiteInput, LoadError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Build every version in parallel, preserving input order.
pub fn load_versions(
    versions: &[VersionInput],
    opts: &SidebarOptions,
) -> Result<Vec<LoadedVersion>, LoadError> {
    versions
        .par_iter()
        .map(|version| load_version(version, opts))
        .collect()
}

/// Normalize, process and index the sidebars of one version.
///
/// Reference validation runs before the navigation index is returned, so
/// callers never see navigation that points at missing documents.
pub fn load_version(
    input: &VersionInput,
    opts: &SidebarOptions,
) -> Result<LoadedVersion, LoadError> {
    let documents = collect_documents(input)?;

    let unprocessed =
        normalize_sidebars(input.sidebars.as_ref(), opts).map_err(|source| {
            LoadError::Normalize {
                version: input.name.clone(),
                source,
            }
        })?;
    let processed = process_sidebars(&unprocessed, &documents, opts);

    let navigation = NavigationIndex::new(&processed.sidebars);
    navigation
        .validate_references(documents.iter().map(|d| d.id.as_str()))
        .map_err(|source| LoadError::Navigation {
            version: input.name.clone(),
            source,
        })?;

    let referenced = navigation.referenced_ids();
    let mut unlisted: Vec<String> = documents
        .iter()
        .filter(|d| !referenced.contains(d.id.as_str()))
        .map(|d| d.id.clone())
        .collect();
    unlisted.sort();

    Ok(LoadedVersion {
        name: input.name.clone(),
        sidebars: processed.sidebars,
        navigation,
        warnings: processed.warnings,
        unlisted,
    })
}

/// Documents of a version, rejecting ids used by two files.
fn collect_documents(input: &VersionInput) -> Result<Vec<Document>, LoadError> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for (path, doc) in &input.documents {
        if let Some(first) = seen.insert(doc.id.as_str(), path.as_str()) {
            return Err(LoadError::DuplicateDocumentId {
                version: input.name.clone(),
                id: doc.id.clone(),
                first: first.to_string(),
                second: path.clone(),
            });
        }
    }
    Ok(input.documents.values().cloned().collect())
}

// ============================================================================
// Output artifact
// ============================================================================

/// JSON artifact written by `docnav build`.
#[derive(Debug, Serialize)]
pub struct NavigationArtifact<'a> {
    pub versions: Vec<VersionArtifact<'a>>,
}

#[derive(Debug, Serialize)]
pub struct VersionArtifact<'a> {
    pub name: &'a str,
    pub sidebars: &'a Sidebars,
    pub navigation: BTreeMap<String, DocNavigation>,
    #[serde(skip_serializing_if = "no_warnings")]
    pub warnings: &'a [Warning],
}

fn no_warnings(warnings: &&[Warning]) -> bool {
    warnings.is_empty()
}

impl LoadedVersion {
    pub fn artifact(&self) -> VersionArtifact<'_> {
        VersionArtifact {
            name: &self.name,
            sidebars: &self.sidebars,
            navigation: self.navigation.navigation_map(),
            warnings: &self.warnings,
        }
    }
}

pub fn artifact(versions: &[LoadedVersion]) -> NavigationArtifact<'_> {
    NavigationArtifact {
        versions: versions.iter().map(LoadedVersion::artifact).collect(),
    }
}
