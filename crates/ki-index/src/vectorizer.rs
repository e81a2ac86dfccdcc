//! TF-IDF vectorizer.
//!
//! Documents are added as raw text, preprocessed into unigrams plus bigrams, and
//! stored as term counts. `fit` turns the stored counts into a vocabulary, an
//! IDF table, and one sparse vector per document. Adding a document after a fit
//! discards the model; there is no incremental update.
//!
//! Weighting:
//! - `idf(t) = ln((N + 1) / (df(t) + 1)) + 1`
//! - `w(t, d) = tf(t, d) / max_tf(d) × idf(t)`

use std::{cmp::Ordering, collections::BTreeMap};

use ki_text::{IdfProvider, SparseVector, TermCounts, cosine_similarity, preprocess, term_frequency};
use serde::Serialize;
use tracing::debug;

use crate::IndexError;

/// A document id with its similarity to a query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredDoc {
    /// Document id as given to [`TfIdfVectorizer::add_document`].
    pub id: String,
    /// Cosine similarity to the query, in `(0, 1]`.
    pub score: f64,
}

/// A stored document awaiting or included in a fit.
#[derive(Debug, Clone)]
struct StoredDoc {
    /// Caller-supplied id.
    id: String,
    /// Counts over unigrams and bigrams.
    counts: TermCounts,
}

/// Everything computed by `fit`.
#[derive(Debug, Clone)]
struct Model {
    /// Term → stable index, assigned in lexicographic order.
    vocabulary: BTreeMap<String, usize>,
    /// Term → IDF weight.
    idf: BTreeMap<String, f64>,
    /// One vector per stored document, parallel to `documents`.
    vectors: Vec<SparseVector>,
}

/// TF-IDF vectorizer with an explicit unfitted/fitted state.
#[derive(Debug, Clone, Default)]
pub struct TfIdfVectorizer {
    /// Documents in insertion order.
    documents: Vec<StoredDoc>,
    /// `None` while unfitted.
    model: Option<Model>,
}

impl TfIdfVectorizer {
    /// Creates an empty, unfitted vectorizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a document and invalidates any existing fit.
    pub fn add_document(&mut self, id: impl Into<String>, text: &str) {
        self.documents.push(StoredDoc {
            id: id.into(),
            counts: term_frequency(&preprocess(text).all),
        });
        self.model = None;
    }

    /// Returns true once `fit` has run since the last added document.
    pub fn is_fitted(&self) -> bool {
        self.model.is_some()
    }

    /// Number of stored documents.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Number of terms in the fitted vocabulary (0 when unfitted).
    pub fn vocabulary_len(&self) -> usize {
        self.model.as_ref().map_or(0, |m| m.vocabulary.len())
    }

    /// The fitted vocabulary, if any.
    pub fn vocabulary(&self) -> Option<&BTreeMap<String, usize>> {
        self.model.as_ref().map(|m| &m.vocabulary)
    }

    /// The fitted IDF table, if any.
    pub fn idf_table(&self) -> Option<&BTreeMap<String, f64>> {
        self.model.as_ref().map(|m| &m.idf)
    }

    /// Computes document frequencies, IDF, and document vectors.
    pub fn fit(&mut self) -> Result<(), IndexError> {
        if self.documents.is_empty() {
            return Err(IndexError::EmptyCorpus);
        }

        let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for doc in &self.documents {
            for term in doc.counts.keys() {
                *document_frequency.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        let n = self.documents.len() as f64;
        let idf: BTreeMap<String, f64> = document_frequency
            .iter()
            .map(|(term, &df)| (term.to_string(), ((n + 1.0) / (df as f64 + 1.0)).ln() + 1.0))
            .collect();
        let vocabulary: BTreeMap<String, usize> = idf
            .keys()
            .enumerate()
            .map(|(index, term)| (term.clone(), index))
            .collect();

        let vectors = self
            .documents
            .iter()
            .map(|doc| weigh(&doc.counts, &idf))
            .collect();

        debug!(
            documents = self.documents.len(),
            vocabulary = vocabulary.len(),
            "fitted tf-idf model"
        );

        self.model = Some(Model {
            vocabulary,
            idf,
            vectors,
        });
        Ok(())
    }

    /// Converts term counts into a TF-IDF vector against the fitted IDF table.
    ///
    /// Terms outside the vocabulary are omitted. An unfitted vectorizer yields an
    /// empty vector.
    pub fn vectorize(&self, counts: &TermCounts) -> SparseVector {
        match &self.model {
            Some(model) => weigh(counts, &model.idf),
            None => SparseVector::new(),
        }
    }

    /// Ranks documents against a query, fitting first if needed.
    pub fn search(&mut self, query: &str, top_k: usize) -> Result<Vec<ScoredDoc>, IndexError> {
        if !self.is_fitted() {
            self.fit()?;
        }
        Ok(self.rank(query, top_k))
    }

    /// Ranks documents against a query using the current fit.
    ///
    /// Only strictly positive scores are returned, best first; equal scores keep
    /// insertion order. Returns nothing when unfitted.
    pub fn rank(&self, query: &str, top_k: usize) -> Vec<ScoredDoc> {
        let Some(model) = &self.model else {
            return Vec::new();
        };

        let query_vector = self.vectorize(&term_frequency(&preprocess(query).all));
        if query_vector.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<ScoredDoc> = self
            .documents
            .iter()
            .zip(&model.vectors)
            .filter_map(|(doc, vector)| {
                let score = cosine_similarity(&query_vector, vector);
                (score > 0.0).then(|| ScoredDoc {
                    id: doc.id.clone(),
                    score,
                })
            })
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        scored.truncate(top_k);
        scored
    }
}

impl IdfProvider for TfIdfVectorizer {
    fn idf(&self, term: &str) -> Option<f64> {
        self.model.as_ref()?.idf.get(term).copied()
    }
}

/// Applies `tf / max_tf × idf`, dropping terms without an IDF entry.
fn weigh(counts: &TermCounts, idf: &BTreeMap<String, f64>) -> SparseVector {
    let max_tf = counts.values().copied().max().unwrap_or(0);
    if max_tf == 0 {
        return SparseVector::new();
    }

    counts
        .iter()
        .filter_map(|(term, &tf)| {
            let weight = idf.get(term)?;
            Some((term.clone(), tf as f64 / max_tf as f64 * weight))
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    fn fitted(docs: &[(&str, &str)]) -> TfIdfVectorizer {
        let mut v = TfIdfVectorizer::new();
        for (id, text) in docs {
            v.add_document(*id, text);
        }
        v.fit().unwrap();
        v
    }

    #[test]
    fn fit_on_empty_corpus_fails() {
        let mut v = TfIdfVectorizer::new();
        assert_eq!(v.fit(), Err(IndexError::EmptyCorpus));
        assert_eq!(v.search("anything", 5), Err(IndexError::EmptyCorpus));
    }

    #[test]
    fn idf_is_smoothed_and_positive() {
        let v = fitted(&[("a", "rwa token"), ("b", "rwa stablecoin")]);
        let shared = v.idf("rwa").unwrap();
        let rare = v.idf("token").unwrap();
        // ln(3/3) + 1 and ln(3/2) + 1
        assert!((shared - 1.0).abs() < 1e-9);
        assert!((rare - (1.5f64.ln() + 1.0)).abs() < 1e-9);
        assert!(rare > shared);
    }

    #[test]
    fn vocabulary_indices_are_lexicographic() {
        let v = fitted(&[("a", "zeta alpha")]);
        let vocab = v.vocabulary().unwrap();
        assert_eq!(vocab["alpha"], 0);
        assert!(vocab["zeta"] > vocab["alpha"]);
        assert_eq!(v.vocabulary_len(), 3); // alpha, zeta, zetaalpha
    }

    #[test]
    fn adding_a_document_invalidates_the_fit() {
        let mut v = fitted(&[("a", "rwa")]);
        assert!(v.is_fitted());
        v.add_document("b", "defi");
        assert!(!v.is_fitted());
        assert_eq!(v.vocabulary_len(), 0);
    }

    #[test]
    fn search_fits_lazily() {
        let mut v = TfIdfVectorizer::new();
        v.add_document("a", "rwa tokenization");
        let hits = v.search("rwa", 5).unwrap();
        assert!(v.is_fitted());
        assert_eq!(hits[0].id, "a");
    }

    #[test]
    fn out_of_vocabulary_query_has_no_hits() {
        let mut v = fitted(&[("a", "rwa tokenization")]);
        assert!(v.search("quantum", 5).unwrap().is_empty());
        assert!(v.vectorize(&term_frequency(&["quantum"])).is_empty());
    }

    #[test]
    fn vectorize_normalizes_by_max_term_frequency() {
        let v = fitted(&[("a", "rwa rwa defi"), ("b", "ai")]);
        let vector = v.vectorize(&term_frequency(&["rwa", "rwa", "defi"]));
        let idf = v.idf("rwa").unwrap();
        assert!((vector["rwa"] - idf).abs() < 1e-9);
        assert!((vector["defi"] - 0.5 * v.idf("defi").unwrap()).abs() < 1e-9);
    }

    #[test]
    fn refit_is_idempotent() {
        let mut v = fitted(&[
            ("a", "RWA tokenization RWA"),
            ("b", "Stablecoin settlement RWA"),
            ("c", "AI trading"),
        ]);
        let vocab = v.vocabulary().unwrap().clone();
        let idf = v.idf_table().unwrap().clone();
        let ranking = v.search("RWA stablecoin", 10).unwrap();

        v.fit().unwrap();
        assert_eq!(v.vocabulary().unwrap(), &vocab);
        assert_eq!(v.idf_table().unwrap(), &idf);
        assert_eq!(v.search("RWA stablecoin", 10).unwrap(), ranking);
    }

    #[test]
    fn results_are_limited_and_sorted() {
        let mut v = fitted(&[
            ("a", "rwa"),
            ("b", "rwa defi defi"),
            ("c", "rwa ai ai ai"),
        ]);
        let hits = v.search("rwa", 2).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, "a");
        assert!(hits[0].score >= hits[1].score);
    }
}
