//! Keyword extraction.
//!
//! Two rankings are provided:
//!
//! - **Frequency**: tokens ranked by how often they occur in the text. Needs no
//!   corpus and is what reports and insights use.
//! - **Corpus TF-IDF**: frequency multiplied by an IDF value from an
//!   [`IdfProvider`], typically a fitted vectorizer. Terms the provider does not
//!   know are dropped.

use std::cmp::Ordering;

use serde::Serialize;

use crate::{preprocess, similarity::term_frequency};

/// Minimum character length for a keyword.
const MIN_KEYWORD_CHARS: usize = 2;

/// Trait for providing IDF values for terms.
///
/// This abstraction lets keyword ranking work against any fitted corpus model.
pub trait IdfProvider {
    /// Returns the IDF value for a term, or `None` if the term is not in the
    /// corpus vocabulary.
    fn idf(&self, term: &str) -> Option<f64>;
}

/// A keyword with its score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredKeyword {
    /// The keyword.
    pub term: String,
    /// Raw occurrence count in the source text.
    pub count: usize,
    /// Ranking score. Equal to `count` for frequency ranking.
    pub score: f64,
}

/// Extracts the `top_n` most frequent keywords of at least two characters.
///
/// Ties are broken alphabetically so the output is stable.
pub fn extract_keywords(text: &str, top_n: usize) -> Vec<ScoredKeyword> {
    let tokens: Vec<String> = preprocess(text)
        .tokens
        .into_iter()
        .filter(|t| t.chars().count() >= MIN_KEYWORD_CHARS)
        .collect();

    let mut keywords: Vec<ScoredKeyword> = term_frequency(&tokens)
        .into_iter()
        .map(|(term, count)| ScoredKeyword {
            term,
            count,
            score: count as f64,
        })
        .collect();

    sort_keywords(&mut keywords);
    keywords.truncate(top_n);
    keywords
}

/// Extracts keywords ranked by `count × idf`.
///
/// Single Chinese characters are kept here because the vocabulary contains
/// them; unknown terms are filtered out.
pub fn rank_keywords<P: IdfProvider>(text: &str, provider: &P, top_n: usize) -> Vec<ScoredKeyword> {
    let tokens = preprocess(text).tokens;

    let mut keywords: Vec<ScoredKeyword> = term_frequency(&tokens)
        .into_iter()
        .filter_map(|(term, count)| {
            let idf = provider.idf(&term)?;
            Some(ScoredKeyword {
                score: count as f64 * idf,
                term,
                count,
            })
        })
        .collect();

    sort_keywords(&mut keywords);
    keywords.truncate(top_n);
    keywords
}

/// Sorts by score descending, then term ascending.
fn sort_keywords(keywords: &mut [ScoredKeyword]) {
    keywords.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.term.cmp(&b.term))
    });
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use super::*;

    struct MockIdf {
        values: HashMap<String, f64>,
    }

    impl MockIdf {
        fn new() -> Self {
            Self {
                values: HashMap::new(),
            }
        }

        fn with_term(mut self, term: &str, idf: f64) -> Self {
            self.values.insert(term.to_string(), idf);
            self
        }
    }

    impl IdfProvider for MockIdf {
        fn idf(&self, term: &str) -> Option<f64> {
            self.values.get(term).copied()
        }
    }

    #[test]
    fn keywords_ranked_by_frequency() {
        let keywords = extract_keywords("stablecoin reserve stablecoin audit stablecoin reserve", 2);
        assert_eq!(keywords.len(), 2);
        assert_eq!(keywords[0].term, "stablecoin");
        assert_eq!(keywords[0].count, 3);
        assert_eq!(keywords[1].term, "reserve");
    }

    #[test]
    fn keywords_skip_single_characters() {
        let keywords = extract_keywords("幣 幣 幣 market", 10);
        assert_eq!(keywords.len(), 1);
        assert_eq!(keywords[0].term, "market");
    }

    #[test]
    fn keyword_ties_are_alphabetical() {
        let keywords = extract_keywords("zebra alpha", 10);
        assert_eq!(keywords[0].term, "alpha");
        assert_eq!(keywords[1].term, "zebra");
    }

    #[test]
    fn empty_text_has_no_keywords() {
        assert!(extract_keywords("", 5).is_empty());
    }

    #[test]
    fn rank_keywords_uses_idf() {
        let idf = MockIdf::new().with_term("rare", 5.0).with_term("common", 1.0);
        let keywords = rank_keywords("rare common common common", &idf, 10);
        assert_eq!(keywords[0].term, "rare");
        assert_eq!(keywords[1].term, "common");
    }

    #[test]
    fn rank_keywords_drops_unknown_terms() {
        let idf = MockIdf::new().with_term("kubernetes", 1.0);
        let keywords = rank_keywords("kubernetes terraform", &idf, 10);
        assert_eq!(keywords.len(), 1);
        assert_eq!(keywords[0].term, "kubernetes");
    }
}
