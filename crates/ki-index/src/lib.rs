//! TF-IDF vector index and semantic search for ki.
//!
//! This crate provides:
//! - [`TfIdfVectorizer`], a batch vectorizer with an explicit fitted state
//! - [`SemanticSearch`], which indexes a [`ki_article::Corpus`] and returns
//!   hits enriched with article metadata and snippets
//!
//! # Example
//!
//! ```
//! use ki_article::{Article, Corpus};
//! use ki_index::{SearchOptions, SemanticSearch};
//!
//! let corpus = Corpus::new(vec![
//!     Article::new("a", "RWA tokenization"),
//!     Article::new("b", "AI in finance"),
//! ]);
//! let search = SemanticSearch::from_corpus(&corpus).unwrap();
//! let hits = search.search("tokenization", &SearchOptions::default());
//! assert_eq!(hits[0].id, "a");
//! ```

#![warn(missing_docs)]

mod error;
mod search;
mod snippet;
mod vectorizer;

pub use error::IndexError;
pub use search::{
    ContextSearch, IndexStats, RELEVANCE_THRESHOLD, SearchHit, SearchOptions, SemanticSearch,
    TopicCluster, has_relevant_info,
};
pub use snippet::{MAX_SNIPPETS, extract_snippets, query_tokens};
pub use vectorizer::{ScoredDoc, TfIdfVectorizer};
