//! # docnav
//!
//! Sidebars and previous/next navigation for versioned documentation sets.
//! Given the documents of a version (each with an id, a directory and a sort
//! key) and an optional user-written sidebar spec, docnav produces the final
//! sidebar trees and, for every document, the sidebar it belongs to and its
//! neighbours in reading order.
//!
//! # Architecture: Four-Stage Pipeline
//!
//! ```text
//! 1. Normalize   raw sidebar JSON  →  unprocessed sidebars  (placeholders intact)
//! 2. Process     unprocessed       →  final sidebars        (placeholders expanded)
//! 3. Index       final sidebars    →  NavigationIndex       (flattened doc order)
//! 4. Validate    NavigationIndex   ✓  every doc id exists
//! ```
//!
//! Each stage is a pure function of its inputs. Nothing reads the
//! filesystem except the CLI front-end and [`config::load_config`]; documents
//! arrive as already-extracted records.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`normalize`] | Stage 1: shorthand expansion and per-type key validation |
//! | [`autogen`] | Builds category trees from document directories |
//! | [`process`] | Stage 2: expands autogenerated placeholders in place |
//! | [`navigation`] | Stages 3 and 4: doc order per sidebar, previous/next, reference checks |
//! | [`load`] | Runs the pipeline per version, versions in parallel |
//! | [`config`] | `config.toml` loading, validation and merging |
//! | [`types`] | Shared types: `Document`, `SidebarItem`, `SidebarSet` |
//! | [`naming`] | `NN-name` ordinal prefix parser for category labels |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Two Item Types
//!
//! Placeholders only exist before processing. Rather than one enum with a
//! variant that "must not" survive, unprocessed and final trees use separate
//! enums ([`types::UnprocessedItem`], [`types::SidebarItem`]), so a final
//! tree with a leftover placeholder cannot be expressed.
//!
//! ## First Sidebar Wins
//!
//! A document listed in several sidebars navigates within the first one, in
//! declaration order. Sidebar order is therefore preserved end to end, from
//! the JSON object keys through [`types::SidebarSet`].
//!
//! ## Fail Fast
//!
//! Malformed sidebar items and references to unknown documents abort the
//! load of the version with an error that echoes the offending input. An
//! autogenerated section that matches no documents is only a warning.

pub mod autogen;
pub mod config;
pub mod load;
pub mod naming;
pub mod navigation;
pub mod normalize;
pub mod output;
pub mod process;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
