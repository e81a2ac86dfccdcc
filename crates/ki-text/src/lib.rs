//! Text processing for the ki knowledge engine.
//!
//! Everything in this crate is a pure function over strings. The pipeline is:
//!
//! 1. **Tokenize**: split mixed Chinese/English/numeric text by character class.
//!    Chinese is not segmented into words; every ideograph is its own token.
//! 2. **Filter**: drop Chinese and English stopwords and short Latin fragments.
//! 3. **Bigrams**: join adjacent filtered tokens to add some phrase-level signal.
//!
//! On top of that sit term counting, Jaccard and cosine similarity, keyword
//! extraction, and key sentence extraction.

#![warn(missing_docs)]

mod keyword;
mod sentence;
mod similarity;
mod stopwords;
mod tokenize;

use std::sync::LazyLock;

pub use keyword::{IdfProvider, ScoredKeyword, extract_keywords, rank_keywords};
pub use sentence::{KeySentence, extract_key_sentences, split_sentences};
pub use similarity::{
    SparseVector, TermCounts, cosine_similarity, counts_to_vector, jaccard_similarity,
    term_frequency,
};
pub use stopwords::Stopwords;
pub use tokenize::{is_chinese_token, is_cjk, tokenize};

/// Shared stopword table; built once, read-only afterwards.
static STOPWORDS: LazyLock<Stopwords> = LazyLock::new(Stopwords::new);

/// Output of [`preprocess`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preprocessed {
    /// Filtered unigrams in document order.
    pub tokens: Vec<String>,
    /// Adjacent filtered unigrams joined without a separator.
    pub bigrams: Vec<String>,
    /// `tokens` followed by `bigrams`.
    pub all: Vec<String>,
}

/// Removes stopwords and single-character non-Chinese tokens.
pub fn remove_stopwords(tokens: Vec<String>) -> Vec<String> {
    STOPWORDS.filter(tokens)
}

/// Tokenizes, filters and builds bigrams for a piece of text.
pub fn preprocess(text: &str) -> Preprocessed {
    let tokens = remove_stopwords(tokenize(text));
    let bigrams: Vec<String> = tokens
        .windows(2)
        .map(|pair| format!("{}{}", pair[0], pair[1]))
        .collect();

    let mut all = Vec::with_capacity(tokens.len() + bigrams.len());
    all.extend(tokens.iter().cloned());
    all.extend(bigrams.iter().cloned());

    Preprocessed {
        tokens,
        bigrams,
        all,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn preprocess_builds_bigrams_over_filtered_tokens() {
        let p = preprocess("The RWA market is growing");
        assert_eq!(p.tokens, vec!["rwa", "market", "growing"]);
        assert_eq!(p.bigrams, vec!["rwamarket", "marketgrowing"]);
        assert_eq!(p.all.len(), 5);
        assert_eq!(&p.all[..3], &p.tokens[..]);
    }

    #[test]
    fn preprocess_chinese_bigrams() {
        let p = preprocess("穩定幣的發展");
        assert_eq!(p.tokens, vec!["穩", "定", "幣", "發", "展"]);
        assert_eq!(p.bigrams[0], "穩定");
        assert!(p.bigrams.contains(&"幣發".to_string()));
    }

    #[test]
    fn preprocess_single_token_has_no_bigrams() {
        let p = preprocess("RWA");
        assert_eq!(p.tokens, vec!["rwa"]);
        assert!(p.bigrams.is_empty());
        assert_eq!(p.all, vec!["rwa"]);
    }

    #[test]
    fn preprocess_empty() {
        assert_eq!(preprocess(""), Preprocessed::default());
    }

    #[test]
    fn remove_stopwords_drops_short_latin() {
        let tokens = tokenize("a b RWA the 幣");
        assert_eq!(remove_stopwords(tokens), vec!["rwa", "幣"]);
    }
}
