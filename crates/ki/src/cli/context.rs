//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
};

use ki_article::{Corpus, JsonFileProvider};
use ki_config::Config;
use ki_index::SemanticSearch;
use serde::Serialize;
use tracing::debug;

use super::output::print_json;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
    /// Whether output is JSON.
    pub json: bool,
    /// Corpus files given on the command line, resolved against `cwd`.
    corpus_override: Vec<PathBuf>,
    /// Corpus loaded for this invocation.
    corpus: Option<Corpus>,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load(corpus_override: &[PathBuf], json: bool) -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        Ok(Self::new(cwd, config, corpus_override, json))
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used for `init`, which should work even when an existing config file is
    /// invalid.
    pub fn load_cwd_only(json: bool) -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self::new(cwd, Config::default(), &[], json))
    }

    /// Builds a context from its parts.
    fn new(cwd: PathBuf, config: Config, corpus_override: &[PathBuf], json: bool) -> Self {
        let corpus_override = corpus_override.iter().map(|p| cwd.join(p)).collect();
        Self {
            cwd,
            config,
            json,
            corpus_override,
            corpus: None,
        }
    }

    /// Corpus files in effect: the command-line override, else the config.
    pub fn corpus_paths(&self) -> &[PathBuf] {
        if self.corpus_override.is_empty() {
            &self.config.corpus
        } else {
            &self.corpus_override
        }
    }

    /// Ensures at least one corpus file is known, optionally printing an init hint.
    pub fn require_corpus(&self, show_init_hint: bool) -> Result<(), ExitCode> {
        if self.corpus_paths().is_empty() {
            eprintln!("error: no corpus defined");
            if show_init_hint {
                eprintln!("Run 'ki init' to create a configuration file, or pass --corpus FILE.");
            }
            return Err(ExitCode::FAILURE);
        }
        Ok(())
    }

    /// Returns the corpus, loading it on first use.
    pub fn corpus(&mut self) -> Result<Corpus, ExitCode> {
        if let Some(corpus) = &self.corpus {
            return Ok(corpus.clone());
        }
        self.require_corpus(true)?;

        let provider = JsonFileProvider::new(self.corpus_paths().to_vec());
        let corpus = Corpus::load(&provider).map_err(|e| {
            eprintln!("error: failed to load corpus: {e}");
            ExitCode::FAILURE
        })?;
        debug!(articles = corpus.len(), "corpus ready");

        self.corpus = Some(corpus.clone());
        Ok(corpus)
    }

    /// Indexes the corpus for search.
    pub fn search(&mut self) -> Result<SemanticSearch, ExitCode> {
        let corpus = self.corpus()?;
        SemanticSearch::from_corpus(&corpus).map_err(|e| {
            eprintln!("error: failed to build search index: {e}");
            ExitCode::FAILURE
        })
    }

    /// Prints `value` as JSON when JSON output was requested, otherwise runs
    /// `text` to render it.
    pub fn emit<T, F>(&self, value: &T, text: F) -> ExitCode
    where
        T: Serialize + ?Sized,
        F: FnOnce(&T),
    {
        if self.json {
            return print_json(value);
        }
        text(value);
        ExitCode::SUCCESS
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}
