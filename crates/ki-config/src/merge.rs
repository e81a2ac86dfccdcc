//! Configuration merging.
//!
//! Layers parsed files into one [`Config`]. Inputs arrive highest precedence
//! first; scalars are applied lowest precedence first so closer files overwrite.

use std::path::PathBuf;

use crate::{
    Config, ConfigError, ConnectionSettings, QaSettings, SearchSettings, TrendSettings,
    parse::{RawConfig, RawConnectionSettings, RawQaSettings, RawSearchSettings, RawTrendSettings},
    resolve::resolve_corpus_path,
};

/// A parsed config file with its source path.
#[derive(Debug, Clone)]
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

impl ParsedConfig {
    /// Directory containing the config file.
    fn dir(&self) -> PathBuf {
        self.path
            .parent()
            .map(PathBuf::from)
            .unwrap_or_default()
    }
}

/// Merges configuration files into a single [`Config`].
///
/// - Scalar settings: the closest file defining a value wins.
/// - `corpus`: the closest file defining it wins as a whole; its entries are
///   resolved relative to that file.
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    let Some(closest) = configs.first() else {
        return Ok(Config::default());
    };

    let mut config = Config {
        corpus: merge_corpus(configs)?,
        config_root: Some(closest.dir()),
        ..Config::default()
    };

    for parsed in configs.iter().rev() {
        let raw = &parsed.config;
        if let Some(search) = &raw.search {
            apply_search(&mut config.search, search);
        }
        if let Some(trends) = &raw.trends {
            apply_trends(&mut config.trends, trends);
        }
        if let Some(connections) = &raw.connections {
            apply_connections(&mut config.connections, connections);
        }
        if let Some(qa) = &raw.qa {
            apply_qa(&mut config.qa, qa);
        }
    }

    Ok(config)
}

/// Resolves the corpus list from the closest file that declares one.
fn merge_corpus(configs: &[ParsedConfig]) -> Result<Vec<PathBuf>, ConfigError> {
    let Some((parsed, entries)) = configs
        .iter()
        .find_map(|p| p.config.corpus.as_ref().map(|c| (p, c)))
    else {
        return Ok(Vec::new());
    };

    let dir = parsed.dir();
    entries
        .iter()
        .map(|entry| resolve_corpus_path(entry, &dir))
        .collect()
}

/// Overwrites search settings with any values present in `raw`.
fn apply_search(result: &mut SearchSettings, raw: &RawSearchSettings) {
    if let Some(v) = raw.limit {
        result.limit = v;
    }
    if let Some(v) = raw.min_score {
        result.min_score = v;
    }
    if let Some(v) = raw.snippets {
        result.snippets = v;
    }
}

/// Overwrites trend settings with any values present in `raw`.
fn apply_trends(result: &mut TrendSettings, raw: &RawTrendSettings) {
    if let Some(v) = raw.hot_days {
        result.hot_days = v;
    }
}

/// Overwrites connection settings with any values present in `raw`.
fn apply_connections(result: &mut ConnectionSettings, raw: &RawConnectionSettings) {
    if let Some(v) = raw.min_score {
        result.min_score = v;
    }
}

/// Overwrites QA settings with any values present in `raw`.
fn apply_qa(result: &mut QaSettings, raw: &RawQaSettings) {
    if let Some(v) = raw.limit {
        result.limit = v;
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::parse::parse_config_str;

    fn parsed(path: &str, toml: &str) -> ParsedConfig {
        ParsedConfig {
            path: PathBuf::from(path),
            config: parse_config_str(toml, Path::new(path)).unwrap(),
        }
    }

    #[test]
    fn empty_input_gives_defaults() {
        let config = merge_configs(&[]).unwrap();
        assert!(config.corpus.is_empty());
        assert!(config.config_root.is_none());
        assert_eq!(config.search.limit, 5);
    }

    #[test]
    fn closest_scalar_wins() {
        let config = merge_configs(&[
            parsed("/p/.ki.toml", "[search]\nlimit = 3\n"),
            parsed("/.ki.toml", "[search]\nlimit = 9\nmin_score = 0.4\n"),
        ])
        .unwrap();
        assert_eq!(config.search.limit, 3);
        assert_eq!(config.search.min_score, 0.4);
        assert!(config.search.snippets);
    }

    #[test]
    fn corpus_resolves_against_its_own_file() {
        let config = merge_configs(&[
            parsed("/work/project/.ki.toml", "[qa]\nlimit = 2\n"),
            parsed("/work/.ki.toml", r#"corpus = ["kb/a.json", "/abs/b.json"]"#),
        ])
        .unwrap();
        assert_eq!(
            config.corpus,
            vec![PathBuf::from("/work/kb/a.json"), PathBuf::from("/abs/b.json")]
        );
        assert_eq!(config.config_root, Some(PathBuf::from("/work/project")));
        assert_eq!(config.qa.limit, 2);
    }

    #[test]
    fn closest_corpus_replaces_outer() {
        let config = merge_configs(&[
            parsed("/work/project/.ki.toml", r#"corpus = "local.json""#),
            parsed("/work/.ki.toml", r#"corpus = "outer.json""#),
        ])
        .unwrap();
        assert_eq!(config.corpus, vec![PathBuf::from("/work/project/local.json")]);
    }

    #[test]
    fn all_sections_merge() {
        let config = merge_configs(&[parsed(
            "/p/.ki.toml",
            "[trends]\nhot_days = 30\n[connections]\nmin_score = 0.5\n",
        )])
        .unwrap();
        assert_eq!(config.trends.hot_days, 30);
        assert_eq!(config.connections.min_score, 0.5);
    }
}
