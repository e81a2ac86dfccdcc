//! Semantic article search.
//!
//! [`SemanticSearch`] owns a [`TfIdfVectorizer`] fitted over a corpus snapshot
//! and turns raw `(id, score)` rankings into hits carrying article metadata and
//! optional snippets.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use ki_article::{Article, ArticleRef, Corpus};
use serde::Serialize;
use tracing::debug;

use crate::{
    IndexError, TfIdfVectorizer,
    snippet::{MAX_SNIPPETS, extract_snippets, query_tokens},
};

/// A hit must score strictly above this for a question to count as answerable.
pub const RELEVANCE_THRESHOLD: f64 = 0.15;

/// Options for [`SemanticSearch::search`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOptions {
    /// Maximum hits to return.
    pub top_k: usize,
    /// Hits scoring below this are dropped.
    pub min_score: f64,
    /// Whether to attach matching content sentences.
    pub include_snippets: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            top_k: 5,
            min_score: 0.1,
            include_snippets: true,
        }
    }
}

/// A ranked article.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    /// Article id.
    pub id: String,
    /// Cosine similarity to the query.
    pub score: f64,
    /// Article title.
    pub title: String,
    /// Article category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Article tags.
    pub tags: Vec<String>,
    /// Source location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// When the article was saved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
    /// Article summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Key points of the article.
    pub key_points: Vec<String>,
    /// Content sentences overlapping the query, best first.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub snippets: Vec<String>,
}

impl SearchHit {
    /// Builds a hit from an article and its score.
    fn from_article(article: &Article, score: f64) -> Self {
        Self {
            id: article.id.clone(),
            score,
            title: article.title.clone(),
            category: article.category().map(str::to_string),
            tags: article.tags.clone(),
            url: article.url.clone(),
            saved_at: article.saved_at,
            summary: article.summary.clone(),
            key_points: article.key_points.clone(),
            snippets: Vec::new(),
        }
    }
}

/// Search results plus the relevance verdict used by question answering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextSearch {
    /// Ranked hits, with snippets.
    pub results: Vec<SearchHit>,
    /// True iff some hit scores strictly above [`RELEVANCE_THRESHOLD`].
    pub has_relevant_info: bool,
}

/// Articles sharing a category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicCluster {
    /// Category name, or [`ki_article::UNCATEGORIZED`].
    pub category: String,
    /// Articles in corpus order.
    pub articles: Vec<ArticleRef>,
}

/// Size of the fitted index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    /// Indexed articles.
    pub documents: usize,
    /// Distinct terms (unigrams and bigrams).
    pub vocabulary: usize,
}

/// Returns true if any hit clears the relevance gate.
pub fn has_relevant_info(results: &[SearchHit]) -> bool {
    results.iter().any(|hit| hit.score > RELEVANCE_THRESHOLD)
}

/// TF-IDF search over a corpus snapshot.
#[derive(Debug, Clone, Default)]
pub struct SemanticSearch {
    /// The indexed snapshot.
    corpus: Corpus,
    /// Article id → position in `corpus`.
    positions: HashMap<String, usize>,
    /// Model fitted over `corpus`.
    vectorizer: TfIdfVectorizer,
}

impl SemanticSearch {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an index over a corpus.
    pub fn from_corpus(corpus: &Corpus) -> Result<Self, IndexError> {
        let mut search = Self::new();
        search.index_articles(corpus)?;
        Ok(search)
    }

    /// Replaces the index with a fresh fit over `corpus`.
    ///
    /// An empty corpus leaves the index empty instead of failing.
    pub fn index_articles(&mut self, corpus: &Corpus) -> Result<IndexStats, IndexError> {
        let mut vectorizer = TfIdfVectorizer::new();
        let mut positions = HashMap::with_capacity(corpus.len());

        for (position, article) in corpus.iter().enumerate() {
            vectorizer.add_document(article.id.clone(), &article.search_text());
            positions.insert(article.id.clone(), position);
        }

        if !corpus.is_empty() {
            vectorizer.fit()?;
        }

        self.corpus = corpus.clone();
        self.positions = positions;
        self.vectorizer = vectorizer;

        let stats = self.stats();
        debug!(
            documents = stats.documents,
            vocabulary = stats.vocabulary,
            "indexed articles"
        );
        Ok(stats)
    }

    /// Size of the current index.
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            documents: self.vectorizer.document_count(),
            vocabulary: self.vectorizer.vocabulary_len(),
        }
    }

    /// The fitted vectorizer.
    pub fn vectorizer(&self) -> &TfIdfVectorizer {
        &self.vectorizer
    }

    /// The indexed snapshot.
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Looks up an indexed article.
    pub fn article(&self, id: &str) -> Option<&Article> {
        self.positions.get(id).map(|&pos| &self.corpus[pos])
    }

    /// Ranks articles against a free-text query.
    pub fn search(&self, query: &str, options: &SearchOptions) -> Vec<SearchHit> {
        let tokens = options.include_snippets.then(|| query_tokens(query));

        self.vectorizer
            .rank(query, options.top_k)
            .into_iter()
            .filter(|scored| scored.score >= options.min_score)
            .filter_map(|scored| {
                let article = self.article(&scored.id)?;
                let mut hit = SearchHit::from_article(article, scored.score);
                if let Some(tokens) = &tokens {
                    let text = article.content.as_deref().unwrap_or(article.summary());
                    hit.snippets = extract_snippets(text, tokens, MAX_SNIPPETS);
                }
                Some(hit)
            })
            .collect()
    }

    /// Finds articles similar to an indexed one.
    ///
    /// The query is the article's own title, summary and key points. The source
    /// article never appears in the results; an unknown id yields none.
    pub fn find_similar(&self, article_id: &str, top_k: usize) -> Vec<SearchHit> {
        let Some(article) = self.article(article_id) else {
            return Vec::new();
        };

        let options = SearchOptions {
            top_k: top_k.saturating_add(1),
            min_score: 0.0,
            include_snippets: false,
        };
        let mut hits: Vec<SearchHit> = self
            .search(&article.topic_text(), &options)
            .into_iter()
            .filter(|hit| hit.id != article_id)
            .collect();
        hits.truncate(top_k);
        hits
    }

    /// Searches for a question and reports whether anything is relevant enough
    /// to answer from.
    pub fn search_with_context(&self, question: &str, top_k: usize) -> ContextSearch {
        let options = SearchOptions {
            top_k,
            include_snippets: true,
            ..SearchOptions::default()
        };
        let results = self.search(question, &options);
        ContextSearch {
            has_relevant_info: has_relevant_info(&results),
            results,
        }
    }

    /// Partitions indexed articles by category, sorted by category name.
    pub fn cluster_by_topic(&self) -> Vec<TopicCluster> {
        let mut groups: BTreeMap<String, Vec<ArticleRef>> = BTreeMap::new();
        for article in self.corpus.iter() {
            let category = article.category_label().to_string();
            groups.entry(category).or_default().push(article.to_ref());
        }
        groups
            .into_iter()
            .map(|(category, articles)| TopicCluster { category, articles })
            .collect()
    }
}
