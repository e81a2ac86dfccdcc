//! Configuration file parsing.
//!
//! Each `.ki.toml` is read into a [`RawConfig`] whose fields are all optional,
//! so partial files can be layered by the merge step.

use std::{fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here and ignore parent and global configs.
    pub root: Option<bool>,
    /// Article file(s), as written in the file. Accepts a string or an array.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub corpus: Option<Vec<String>>,
    /// `[search]` section.
    pub search: Option<RawSearchSettings>,
    /// `[trends]` section.
    pub trends: Option<RawTrendSettings>,
    /// `[connections]` section.
    pub connections: Option<RawConnectionSettings>,
    /// `[qa]` section.
    pub qa: Option<RawQaSettings>,
}

/// Raw `[search]` settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSearchSettings {
    /// Maximum hits per query.
    pub limit: Option<usize>,
    /// Minimum hit score.
    pub min_score: Option<f64>,
    /// Whether hits carry snippets.
    pub snippets: Option<bool>,
}

/// Raw `[trends]` settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawTrendSettings {
    /// Hot-topic window in days.
    pub hot_days: Option<i64>,
}

/// Raw `[connections]` settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConnectionSettings {
    /// Minimum edge score for the connection graph.
    pub min_score: Option<f64>,
}

/// Raw `[qa]` settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawQaSettings {
    /// Articles retrieved per question.
    pub limit: Option<usize>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string; `path` is used for errors only.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration without path context (template checks).
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Checks whether a config file sets `root = true`.
///
/// Unreadable or malformed files count as not root; loading reports them later.
pub fn is_root_config(path: &Path) -> bool {
    fs::read_to_string(path)
        .ok()
        .and_then(|contents| toml::from_str::<RawConfig>(&contents).ok())
        .is_some_and(|config| config.root == Some(true))
}
