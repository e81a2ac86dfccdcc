//! Article providers.
//!
//! The engines never read files themselves. They receive a [`Corpus`] built
//! from whatever [`ArticleProvider`] the caller injects.
//!
//! [`Corpus`]: crate::Corpus

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::debug;

use crate::{Article, ArticleError};

/// Something that can hand over the current article set in one batch.
pub trait ArticleProvider {
    /// Loads every article.
    fn load(&self) -> Result<Vec<Article>, ArticleError>;
}

impl ArticleProvider for Vec<Article> {
    fn load(&self) -> Result<Vec<Article>, ArticleError> {
        Ok(self.clone())
    }
}

impl ArticleProvider for [Article] {
    fn load(&self) -> Result<Vec<Article>, ArticleError> {
        Ok(self.to_vec())
    }
}

impl<F> ArticleProvider for F
where
    F: Fn() -> Result<Vec<Article>, ArticleError>,
{
    fn load(&self) -> Result<Vec<Article>, ArticleError> {
        self()
    }
}

/// Loads articles from one or more JSON files.
///
/// Each file holds either a bare array of articles or an object with an
/// `articles` array (the shape the knowledge-base collaborator writes).
/// Files are read in order and their articles concatenated.
#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    /// Files to read.
    paths: Vec<PathBuf>,
}

impl JsonFileProvider {
    /// Creates a provider over the given files.
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    /// Creates a provider over a single file.
    pub fn single(path: impl Into<PathBuf>) -> Self {
        Self::new(vec![path.into()])
    }

    /// Files this provider reads.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

impl ArticleProvider for JsonFileProvider {
    fn load(&self) -> Result<Vec<Article>, ArticleError> {
        let mut articles = Vec::new();
        for path in &self.paths {
            let loaded = read_articles_file(path)?;
            debug!(path = %path.display(), count = loaded.len(), "read corpus file");
            articles.extend(loaded);
        }
        Ok(articles)
    }
}

/// Accepted top-level shapes of a corpus file.
#[derive(Deserialize)]
#[serde(untagged)]
enum CorpusFile {
    /// `[ {...}, {...} ]`
    List(Vec<Article>),
    /// `{ "articles": [ ... ] }`
    Wrapped {
        /// The article list.
        articles: Vec<Article>,
    },
}

/// Reads and parses a corpus file.
pub fn read_articles_file(path: &Path) -> Result<Vec<Article>, ArticleError> {
    let contents = fs::read_to_string(path).map_err(|source| ArticleError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    parse_articles_str(&contents, path)
}

/// Parses corpus JSON.
///
/// The `path` parameter is used for error reporting.
pub fn parse_articles_str(contents: &str, path: &Path) -> Result<Vec<Article>, ArticleError> {
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }
    let file: CorpusFile =
        serde_json::from_str(contents).map_err(|source| ArticleError::ParseJson {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(match file {
        CorpusFile::List(articles) | CorpusFile::Wrapped { articles } => articles,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_array() {
        let articles = parse_articles_str(r#"[{"id": "a"}, {"id": "b"}]"#, Path::new("x")).unwrap();
        assert_eq!(articles.len(), 2);
    }

    #[test]
    fn parses_wrapped_object() {
        let articles =
            parse_articles_str(r#"{"articles": [{"id": "a"}], "version": 2}"#, Path::new("x"))
                .unwrap();
        assert_eq!(articles.len(), 1);
    }

    #[test]
    fn empty_file_is_empty_corpus() {
        assert!(parse_articles_str("  \n", Path::new("x")).unwrap().is_empty());
    }

    #[test]
    fn malformed_json_reports_path() {
        let err = parse_articles_str("{nope", Path::new("kb.json")).unwrap_err();
        assert!(err.to_string().contains("kb.json"));
    }

    #[test]
    fn json_file_provider_concatenates_files() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("one.json");
        let second = dir.path().join("two.json");
        fs::write(&first, r#"[{"id": "a"}]"#).unwrap();
        fs::write(&second, r#"{"articles": [{"id": "b"}]}"#).unwrap();

        let provider = JsonFileProvider::new(vec![first, second]);
        let ids: Vec<_> = provider.load().unwrap().into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn missing_file_is_read_error() {
        let provider = JsonFileProvider::single("/definitely/not/here.json");
        assert!(matches!(
            provider.load(),
            Err(ArticleError::ReadFile { .. })
        ));
    }

    #[test]
    fn closure_provider() {
        let provider = || -> Result<Vec<Article>, ArticleError> { Ok(vec![Article::new("a", "t")]) };
        assert_eq!(provider.load().unwrap().len(), 1);
    }
}
