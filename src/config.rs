//! Build configuration module.
//!
//! Handles loading, validating, and merging the optional `config.toml` at the
//! repository root. Stock defaults reproduce the classic layout (`blogs/`,
//! `collections/`, output to `docs/`), so most repositories need no config
//! file at all.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! title = "Blog"              # Site index heading
//! # source_url = "https://github.com/you/you.github.io"
//! utc_offset_hours = 8        # Timezone for the build timestamp
//!
//! [paths]
//! blogs = "blogs"             # Standalone posts root
//! collections = "collections" # One subdirectory per collection
//! output = "docs"             # Generated site
//! lua_filter = "filters/note-filter.lua"
//!
//! [markup]
//! extension = "tex"           # Source file extension to pick up
//! input_format = "latex"      # Converter input format
//!
//! [pandoc]
//! binary = "pandoc"
//! katex_url = "https://cdn.jsdelivr.net/npm/katex@latest/dist/"
//!
//! [git]
//! binary = "git"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the config file looked up in the repository root.
pub const CONFIG_FILENAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Heading and `<title>` of the site index.
    pub title: String,
    /// Optional link to the site's source repository, shown in the banner.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// Fixed UTC offset (hours) used for build timestamps.
    pub utc_offset_hours: i32,
    /// Input and output directories, relative to the repository root.
    pub paths: PathsConfig,
    /// Source markup settings.
    pub markup: MarkupConfig,
    /// Conversion engine settings.
    pub pandoc: PandocConfig,
    /// Version control settings.
    pub git: GitConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            source_url: None,
            utc_offset_hours: 8,
            paths: PathsConfig::default(),
            markup: MarkupConfig::default(),
            pandoc: PandocConfig::default(),
            git: GitConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.utc_offset().is_none() {
            return Err(ConfigError::Validation(
                "utc_offset_hours must be between -23 and 23".into(),
            ));
        }
        let paths = [
            ("paths.blogs", &self.paths.blogs),
            ("paths.collections", &self.paths.collections),
            ("paths.output", &self.paths.output),
        ];
        for (key, value) in paths {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        if self.markup.extension.trim().is_empty() {
            return Err(ConfigError::Validation(
                "markup.extension must not be empty".into(),
            ));
        }
        if self.markup.extension.starts_with('.') {
            return Err(ConfigError::Validation(
                "markup.extension must not start with a dot".into(),
            ));
        }
        Ok(())
    }

    /// The configured timezone, or `None` if the offset is out of range.
    pub fn utc_offset(&self) -> Option<FixedOffset> {
        if !(-23..=23).contains(&self.utc_offset_hours) {
            return None;
        }
        FixedOffset::east_opt(self.utc_offset_hours * 3600)
    }

    /// Resolve all configured paths against the repository root.
    pub fn resolve_paths(&self, root: &Path) -> BuildPaths {
        BuildPaths {
            root: root.to_path_buf(),
            blogs: root.join(&self.paths.blogs),
            collections: root.join(&self.paths.collections),
            output: root.join(&self.paths.output),
            lua_filter: root.join(&self.paths.lua_filter),
        }
    }
}

/// Input and output directories.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Root of standalone posts.
    pub blogs: String,
    /// Root of collections; each immediate subdirectory is one collection.
    pub collections: String,
    /// Generated site directory.
    pub output: String,
    /// Custom converter filter, used only when the file exists.
    pub lua_filter: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            blogs: "blogs".to_string(),
            collections: "collections".to_string(),
            output: "docs".to_string(),
            lua_filter: "filters/note-filter.lua".to_string(),
        }
    }
}

/// Source markup settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkupConfig {
    /// File extension (without dot) of source documents.
    pub extension: String,
    /// Input format name passed to the converter.
    pub input_format: String,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            extension: "tex".to_string(),
            input_format: "latex".to_string(),
        }
    }
}

/// Conversion engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PandocConfig {
    /// Executable name or path.
    pub binary: String,
    /// Base URL of the KaTeX distribution used for math rendering.
    pub katex_url: String,
}

impl Default for PandocConfig {
    fn default() -> Self {
        Self {
            binary: "pandoc".to_string(),
            katex_url: "https://cdn.jsdelivr.net/npm/katex@latest/dist/".to_string(),
        }
    }
}

/// Version control settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitConfig {
    /// Executable name or path.
    pub binary: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            binary: "git".to_string(),
        }
    }
}

/// Configured paths resolved against the repository root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPaths {
    pub root: PathBuf,
    pub blogs: PathBuf,
    pub collections: PathBuf,
    pub output: PathBuf,
    pub lua_filter: PathBuf,
}

// =============================================================================
// Loading
// =============================================================================

/// `SiteConfig::default()` as a TOML table, the values a partial
/// `config.toml` falls back to.
fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Fill in `user` with `defaults` wherever the user left a key out.
///
/// Sections like `[paths]` merge key by key, so setting `paths.output`
/// keeps the stock `paths.blogs`.
fn merge_toml(defaults: toml::Value, user: toml::Value) -> toml::Value {
    match (defaults, user) {
        (toml::Value::Table(mut table), toml::Value::Table(user_table)) => {
            for (key, user_val) in user_table {
                let merged = match table.remove(&key) {
                    Some(default_val) => merge_toml(default_val, user_val),
                    None => user_val,
                };
                table.insert(key, merged);
            }
            toml::Value::Table(table)
        }
        (_, user) => user,
    }
}

/// Read `<root>/config.toml`, or `None` when the repository has none.
fn read_user_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    Ok(Some(toml::from_str(&content)?))
}

/// Load the site config for the repository at `root`.
///
/// Without a `config.toml` this is `SiteConfig::default()`. Unknown keys and
/// invalid values are errors.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let defaults = stock_defaults_value()?;
    let merged = match read_user_config(root)? {
        Some(user) => merge_toml(defaults, user),
        None => defaults,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# revpress configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# Heading and <title> of the site index.
title = "Blog"

# Link to the site's source repository, shown next to "Last updated".
# source_url = "https://github.com/you/you.github.io"

# Fixed UTC offset (hours) used for the build timestamp.
utc_offset_hours = 8

# ---------------------------------------------------------------------------
# Directories (relative to the repository root)
# ---------------------------------------------------------------------------
[paths]
# Standalone posts, optionally organized by date folders.
blogs = "blogs"

# Collections: each immediate subdirectory is one ordered collection.
collections = "collections"

# Generated site. Every run rebuilds it in full.
output = "docs"

# Custom converter filter, passed only when the file exists.
lua_filter = "filters/note-filter.lua"

# ---------------------------------------------------------------------------
# Source markup
# ---------------------------------------------------------------------------
[markup]
extension = "tex"
input_format = "latex"

# ---------------------------------------------------------------------------
# Conversion engine
# ---------------------------------------------------------------------------
[pandoc]
binary = "pandoc"
katex_url = "https://cdn.jsdelivr.net/npm/katex@latest/dist/"

# ---------------------------------------------------------------------------
# Version control
# ---------------------------------------------------------------------------
[git]
binary = "git"
"##
}
