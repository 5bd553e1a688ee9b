//! Configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file is
//! optional and sparse: stock defaults are overridden only by the keys the
//! user sets.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [sidebars]
//! collapsed = true              # Categories start collapsed unless they say otherwise
//!
//! [autogenerate]
//! strip_number_prefixes = true  # "2-API/" becomes a category labelled "API"
//!
//! [processing]
//! max_processes = 4             # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavConfig {
    /// Defaults applied to sidebar categories.
    pub sidebars: SidebarsConfig,
    /// Autogenerated category settings.
    pub autogenerate: AutogenerateConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl NavConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Category defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SidebarsConfig {
    /// Collapsed state for categories that don't declare one. Covers explicit
    /// categories without `collapsed`, shorthand categories and generated ones.
    pub collapsed: bool,
}

impl Default for SidebarsConfig {
    fn default() -> Self {
        Self { collapsed: true }
    }
}

/// Autogenerated category settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AutogenerateConfig {
    /// Drop ordinal prefixes (`01-`, `2_`) from generated category labels.
    pub strip_number_prefixes: bool,
}

impl Default for AutogenerateConfig {
    fn default() -> Self {
        Self {
            strip_number_prefixes: true,
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel workers for version and sidebar fan-out.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

/// The subset of config the sidebar stages need, flattened for cheap copying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SidebarOptions {
    pub default_collapsed: bool,
    pub strip_number_prefixes: bool,
}

impl SidebarOptions {
    pub fn from_config(config: &NavConfig) -> Self {
        Self {
            default_collapsed: config.sidebars.collapsed,
            strip_number_prefixes: config.autogenerate.strip_number_prefixes,
        }
    }
}

impl Default for SidebarOptions {
    fn default() -> Self {
        Self::from_config(&NavConfig::default())
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(NavConfig::default())
        .map_err(|e| ConfigError::Validation(format!("stock defaults do not serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<NavConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: NavConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
pub fn load_config(dir: &Path) -> Result<NavConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(dir)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# docnav configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# ---------------------------------------------------------------------------
# Sidebar categories
# ---------------------------------------------------------------------------
[sidebars]
# Collapsed state for categories that don't set `collapsed` themselves.
# Applies to explicit categories, shorthand categories and generated ones.
collapsed = true

# ---------------------------------------------------------------------------
# Autogenerated sidebars
# ---------------------------------------------------------------------------
[autogenerate]
# Drop ordinal prefixes from generated category labels: "2-API" -> "API".
strip_number_prefixes = true

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel workers used to build versions and sidebars.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
