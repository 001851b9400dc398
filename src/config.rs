//! Indexer configuration.
//!
//! Every option has a default, and the defaults reproduce the plain behavior:
//! every entry is listed, `index.txt` is embedded as a preview, and timestamps
//! are shown in local time. A config file is only read when passed with
//! `--config`.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [time]
//! format = "%Y-%m-%d %H:%M:%S %z"  # strftime pattern for Last Modified
//! utc = false                       # UTC instead of local time
//!
//! [preview]
//! enabled = true                    # embed the sidecar preview when present
//! file = "index.txt"                # sidecar file name
//!
//! [listing]
//! show_hidden = true                # include dot-files
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Values are merged on top of the stock defaults:
//!
//! ```toml
//! [time]
//! utc = true
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::index::OUTPUT_FILE;
use chrono::format::{Item, StrftimeItems};
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

/// Indexer configuration loaded from a TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexConfig {
    /// How the Last Modified column is rendered.
    pub time: TimeConfig,
    /// Sidecar preview settings.
    pub preview: PreviewConfig,
    /// Which entries appear in the listing.
    pub listing: ListingConfig,
}

impl IndexConfig {
    /// Validate config values before any directory is touched.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_time_format(&self.time.format) {
            return Err(ConfigError::Validation(format!(
                "time.format is not a valid strftime pattern: {:?}",
                self.time.format
            )));
        }
        let file = &self.preview.file;
        if file.is_empty() {
            return Err(ConfigError::Validation(
                "preview.file must not be empty".into(),
            ));
        }
        if file.contains(['/', '\\']) || file == "." || file == ".." {
            return Err(ConfigError::Validation(format!(
                "preview.file must be a plain file name: {file:?}"
            )));
        }
        if file == OUTPUT_FILE {
            return Err(ConfigError::Validation(format!(
                "preview.file must not be the output file {OUTPUT_FILE}"
            )));
        }
        Ok(())
    }
}

/// Timestamp rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimeConfig {
    /// `strftime`-style pattern, as understood by `chrono`.
    pub format: String,
    /// Render in UTC rather than the local time zone.
    pub utc: bool,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            format: "%Y-%m-%d %H:%M:%S %z".to_string(),
            utc: false,
        }
    }
}

/// Sidecar preview lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreviewConfig {
    pub enabled: bool,
    /// File name looked up inside each indexed directory.
    pub file: String,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            file: "index.txt".to_string(),
        }
    }
}

/// Entry selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListingConfig {
    /// Include names starting with a dot.
    pub show_hidden: bool,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self { show_hidden: true }
    }
}

/// Whether `chrono` accepts every specifier in `format`.
pub fn is_valid_time_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// [`IndexConfig::default`] as a TOML table, the layer `--config` files land on.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(IndexConfig::default()).expect("default config must serialize")
}

/// Lay a user config over the defaults.
///
/// A file that sets only `[time] utc` keeps the default `[time] format`:
/// sections are combined per key, and anything that is not a section
/// (`format = "..."`, `show_hidden = false`) is taken from `overlay` as is.
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

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<IndexConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: IndexConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from an explicit file, or use the stock defaults when `None`.
///
/// A path that was passed but cannot be read is an error; unlike the preview
/// sidecar, a missing config file is never silently ignored.
pub fn load_config(path: Option<&Path>) -> Result<IndexConfig, ConfigError> {
    let overlay = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            Some(toml::from_str::<toml::Value>(&content)?)
        }
        None => None,
    };
    resolve_config(overlay)
}

/// Returns a fully-commented stock config with all keys and explanations.
///
/// Printed by `--gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# dirhtml configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Pass the file with --config.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Last Modified column
# ---------------------------------------------------------------------------
[time]
# strftime pattern (chrono syntax).
format = "%Y-%m-%d %H:%M:%S %z"

# Render timestamps in UTC instead of the local time zone.
utc = false

# ---------------------------------------------------------------------------
# Preview sidecar
# ---------------------------------------------------------------------------
[preview]
# Embed the sidecar file's text below the table when it exists.
enabled = true

# Sidecar file name, looked up inside each indexed directory.
file = "index.txt"

# ---------------------------------------------------------------------------
# Listing
# ---------------------------------------------------------------------------
[listing]
# Include entries whose names start with a dot.
show_hidden = true
"##
}
