//! Configuration system for ki.
//!
//! ki reads TOML files named `.ki.toml`. Files are collected by walking up from
//! the working directory, then `~/.ki.toml` is added with the lowest precedence.
//! A file with `root = true` ends the walk and suppresses the global file.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod resolve;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawConnectionSettings, RawQaSettings, RawSearchSettings, RawTrendSettings,
    parse_config_file, parse_config_str,
};
pub use resolve::resolve_corpus_path;
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Fully merged configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Resolved article files, in declaration order.
    pub corpus: Vec<PathBuf>,
    /// `[search]` settings.
    pub search: SearchSettings,
    /// `[trends]` settings.
    pub trends: TrendSettings,
    /// `[connections]` settings.
    pub connections: ConnectionSettings,
    /// `[qa]` settings.
    pub qa: QaSettings,
    /// Directory of the highest-precedence config file, if any.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Discovers and merges every `.ki.toml` relevant to `cwd`.
    ///
    /// Returns the defaults when no file is found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        Self::load_from_files(&discover_config_files(cwd))
    }

    /// Loads and merges the given files, highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let parsed = files
            .iter()
            .map(|path| {
                Ok(ParsedConfig {
                    path: path.clone(),
                    config: parse_config_file(path)?,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// Reports missing corpus files and out-of-range settings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Renders the effective configuration in `.ki.toml` form.
    pub fn settings_to_toml(&self) -> Result<String, ConfigError> {
        let view = SettingsView {
            corpus: self
                .corpus
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            search: &self.search,
            trends: &self.trends,
            connections: &self.connections,
            qa: &self.qa,
        };
        Ok(toml::to_string_pretty(&view)?)
    }
}

/// `[search]` settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Maximum hits per query.
    pub limit: usize,
    /// Hits scoring below this are dropped.
    pub min_score: f64,
    /// Whether hits carry content snippets.
    pub snippets: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            limit: 5,
            min_score: 0.1,
            snippets: true,
        }
    }
}

/// `[trends]` settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TrendSettings {
    /// Window for hot topics, in days.
    pub hot_days: i64,
}

impl Default for TrendSettings {
    fn default() -> Self {
        Self { hot_days: 7 }
    }
}

/// `[connections]` settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ConnectionSettings {
    /// Minimum relation score for a graph edge.
    pub min_score: f64,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self { min_score: 0.2 }
    }
}

/// `[qa]` settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct QaSettings {
    /// Articles retrieved per question.
    pub limit: usize,
}

impl Default for QaSettings {
    fn default() -> Self {
        Self { limit: 5 }
    }
}

/// Borrowed view of [`Config`] for TOML output.
#[derive(Serialize)]
struct SettingsView<'a> {
    /// Resolved corpus paths.
    corpus: Vec<String>,
    /// `[search]`.
    search: &'a SearchSettings,
    /// `[trends]`.
    trends: &'a TrendSettings,
    /// `[connections]`.
    connections: &'a ConnectionSettings,
    /// `[qa]`.
    qa: &'a QaSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert!(config.corpus.is_empty());
        assert_eq!(config.search, SearchSettings::default());
        assert_eq!(config.search.limit, 5);
        assert!((config.search.min_score - 0.1).abs() < f64::EPSILON);
        assert!(config.search.snippets);
        assert_eq!(config.trends.hot_days, 7);
        assert!((config.connections.min_score - 0.2).abs() < f64::EPSILON);
        assert_eq!(config.qa.limit, 5);
    }

    #[test]
    fn settings_to_toml_round_trips_through_raw_config() {
        let config = Config {
            corpus: vec![PathBuf::from("/kb/articles.json")],
            ..Config::default()
        };
        let rendered = config.settings_to_toml().unwrap();
        assert!(rendered.contains("[search]"));
        assert!(rendered.contains("hot_days = 7"));

        let raw = parse_config_str(&rendered, Path::new("rendered.toml")).unwrap();
        assert_eq!(raw.corpus.unwrap(), vec!["/kb/articles.json"]);
        assert_eq!(raw.qa.unwrap().limit, Some(5));
    }

    #[test]
    fn load_from_no_files() {
        let config = Config::load_from_files(&[]).unwrap();
        assert!(config.config_root.is_none());
    }
}
