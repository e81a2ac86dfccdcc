//! Configuration validation.

use std::fmt;

use crate::Config;

/// A non-fatal problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// No corpus file is configured.
    NoCorpusDefined,
    /// A corpus file does not exist.
    CorpusFileMissing {
        /// The resolved path.
        path: String,
    },
    /// A corpus path exists but is not a regular file.
    CorpusPathNotFile {
        /// The resolved path.
        path: String,
    },
    /// A setting is outside its useful range.
    SettingOutOfRange {
        /// Dotted setting name.
        setting: &'static str,
        /// Expected range.
        expected: &'static str,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCorpusDefined => write!(f, "no corpus files are configured"),
            Self::CorpusFileMissing { path } => write!(f, "corpus file does not exist: {path}"),
            Self::CorpusPathNotFile { path } => write!(f, "corpus path is not a file: {path}"),
            Self::SettingOutOfRange { setting, expected } => {
                write!(f, "{setting} should be {expected}")
            }
        }
    }
}

/// Checks corpus paths and setting ranges.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    if config.corpus.is_empty() {
        warnings.push(ConfigWarning::NoCorpusDefined);
    }
    for path in &config.corpus {
        let display = path.display().to_string();
        if !path.exists() {
            warnings.push(ConfigWarning::CorpusFileMissing { path: display });
        } else if !path.is_file() {
            warnings.push(ConfigWarning::CorpusPathNotFile { path: display });
        }
    }

    if !(0.0..=1.0).contains(&config.search.min_score) {
        warnings.push(ConfigWarning::SettingOutOfRange {
            setting: "search.min_score",
            expected: "between 0 and 1",
        });
    }
    if !(0.0..=1.0).contains(&config.connections.min_score) {
        warnings.push(ConfigWarning::SettingOutOfRange {
            setting: "connections.min_score",
            expected: "between 0 and 1",
        });
    }
    if config.trends.hot_days < 1 {
        warnings.push(ConfigWarning::SettingOutOfRange {
            setting: "trends.hot_days",
            expected: "at least 1",
        });
    }

    warnings
}
