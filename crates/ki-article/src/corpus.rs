//! Immutable corpus snapshots.

use std::{collections::HashSet, ops::Deref, sync::Arc};

use tracing::{debug, warn};

use crate::{Article, ArticleError, ArticleProvider};

/// A read-only snapshot of the loaded articles.
///
/// Cloning is cheap (an `Arc` bump), so every engine keeps its own handle to the
/// same snapshot. A caller that wants fresh data loads a new `Corpus` and builds
/// new engines from it.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    /// The articles, unique by id, in provider order.
    articles: Arc<[Article]>,
}

impl Corpus {
    /// Builds a snapshot, keeping the first article for each id.
    pub fn new(articles: Vec<Article>) -> Self {
        let total = articles.len();
        let mut seen = HashSet::with_capacity(total);
        let mut unique = Vec::with_capacity(total);

        for article in articles {
            if seen.insert(article.id.clone()) {
                unique.push(article);
            } else {
                warn!(id = %article.id, "dropping article with duplicate id");
            }
        }

        Self {
            articles: unique.into(),
        }
    }

    /// Loads a snapshot from a provider.
    pub fn load<P: ArticleProvider + ?Sized>(provider: &P) -> Result<Self, ArticleError> {
        let articles = provider.load()?;
        let corpus = Self::new(articles);
        debug!(articles = corpus.len(), "loaded corpus");
        Ok(corpus)
    }

    /// The articles in provider order.
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    /// Looks up an article by id.
    pub fn get(&self, id: &str) -> Option<&Article> {
        self.articles.iter().find(|a| a.id == id)
    }

    /// Distinct tags across the corpus (case-insensitive), first spelling wins.
    pub fn tags(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut tags = Vec::new();
        for tag in self.articles.iter().flat_map(|a| a.tags.iter()) {
            let trimmed = tag.trim();
            if !trimmed.is_empty() && seen.insert(trimmed.to_lowercase()) {
                tags.push(trimmed.to_string());
            }
        }
        tags
    }
}

impl Deref for Corpus {
    type Target = [Article];

    fn deref(&self) -> &Self::Target {
        &self.articles
    }
}

impl From<Vec<Article>> for Corpus {
    fn from(articles: Vec<Article>) -> Self {
        Self::new(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(id: &str, title: &str, tags: &[&str]) -> Article {
        let mut a = Article::new(id, title);
        a.tags = tags.iter().map(|t| t.to_string()).collect();
        a
    }

    #[test]
    fn duplicate_ids_keep_first() {
        let corpus = Corpus::new(vec![
            article("a", "first", &[]),
            article("b", "other", &[]),
            article("a", "second", &[]),
        ]);
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.get("a").unwrap().title, "first");
    }

    #[test]
    fn clones_share_the_snapshot() {
        let corpus = Corpus::new(vec![article("a", "t", &[])]);
        let clone = corpus.clone();
        assert!(std::ptr::eq(corpus.articles(), clone.articles()));
    }

    #[test]
    fn tags_are_distinct_case_insensitive() {
        let corpus = Corpus::new(vec![
            article("a", "t", &["RWA", "DeFi"]),
            article("b", "t", &["rwa", "AI", " "]),
        ]);
        assert_eq!(corpus.tags(), vec!["RWA", "DeFi", "AI"]);
    }

    #[test]
    fn load_from_vec_provider() {
        let provider = vec![article("a", "t", &[])];
        let corpus = Corpus::load(&provider).unwrap();
        assert_eq!(corpus.len(), 1);
    }

    #[test]
    fn empty_corpus() {
        let corpus = Corpus::default();
        assert!(corpus.is_empty());
        assert!(corpus.get("a").is_none());
        assert!(corpus.tags().is_empty());
    }
}
