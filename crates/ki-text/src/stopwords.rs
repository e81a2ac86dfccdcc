//! Stopword filtering for mixed Chinese and English token streams.
//!
//! Two fixed lists are combined:
//! - Single Chinese characters that carry grammatical rather than topical meaning
//!   (particles, pronouns, common function words, both traditional and simplified)
//! - Common English function words
//!
//! Any non-Chinese token of one character or less is also treated as noise.

use std::collections::HashSet;

use crate::tokenize::is_chinese_token;

/// A stopword filter over the fixed Chinese and English lists.
///
/// Uses a `HashSet` for O(1) lookup. Tokens are expected to already be lowercase,
/// which is what the tokenizer produces.
#[derive(Clone)]
pub struct Stopwords {
    /// Every stopword from both languages.
    words: HashSet<&'static str>,
}

impl Default for Stopwords {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwords {
    /// Creates the filter with the built-in Chinese and English lists.
    pub fn new() -> Self {
        let words = CHINESE_STOPWORDS
            .iter()
            .chain(ENGLISH_STOPWORDS)
            .copied()
            .collect();
        Self { words }
    }

    /// Checks if a token is in either stopword list.
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    /// Returns true if the token should be dropped before analysis.
    ///
    /// This covers both listed stopwords and short non-Chinese fragments.
    pub fn is_noise(&self, token: &str) -> bool {
        if self.contains(token) {
            return true;
        }
        !is_chinese_token(token) && token.chars().count() <= 1
    }

    /// Filters a token sequence, preserving order.
    pub fn filter(&self, tokens: Vec<String>) -> Vec<String> {
        tokens.into_iter().filter(|t| !self.is_noise(t)).collect()
    }

    /// Returns the total number of stopwords.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if no stopwords are configured.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Single-character Chinese function words.
static CHINESE_STOPWORDS: &[&str] = &[
    "的", "了", "在", "是", "我", "有", "和", "就", "不", "都", "一", "也", "很", "到", "說", "说",
    "要", "去", "你", "會", "会", "著", "着", "沒", "没", "這", "这", "那", "他", "她", "它", "們",
    "们", "與", "与", "及", "或", "而", "之", "其", "為", "为", "以", "於", "于", "被", "把", "讓",
    "让", "從", "从", "對", "对", "等", "但", "並", "并", "則", "则", "吧", "嗎", "吗", "呢", "啊",
    "呀", "哦", "個", "个", "來", "来", "將", "将", "已", "所", "此", "該", "该", "各", "每", "又",
    "再", "還", "还", "更", "最", "得", "地", "麼", "么", "些", "哪",
];

/// Common English function words.
static ENGLISH_STOPWORDS: &[&str] = &[
    "a", "about", "after", "all", "also", "an", "and", "any", "are", "as", "at", "be", "because",
    "been", "being", "but", "by", "can", "could", "did", "do", "does", "for", "from", "had", "has",
    "have", "he", "her", "here", "him", "his", "how", "i", "if", "in", "into", "is", "it", "its",
    "just", "may", "me", "might", "more", "most", "must", "my", "no", "not", "of", "on", "only",
    "or", "other", "our", "out", "over", "same", "she", "should", "so", "some", "such", "than",
    "that", "the", "their", "them", "then", "there", "these", "they", "this", "those", "to", "too",
    "up", "us", "very", "was", "we", "were", "what", "when", "where", "which", "who", "whom",
    "why", "will", "with", "would", "you", "your",
];

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn contains_both_languages() {
        let stopwords = Stopwords::new();
        assert!(stopwords.contains("的"));
        assert!(stopwords.contains("the"));
        assert!(!stopwords.contains("rwa"));
        assert!(!stopwords.contains("幣"));
    }

    #[test]
    fn single_latin_characters_are_noise() {
        let stopwords = Stopwords::new();
        assert!(stopwords.is_noise("x"));
        assert!(stopwords.is_noise("7"));
        assert!(!stopwords.is_noise("42"));
    }

    #[test]
    fn single_chinese_characters_survive() {
        let stopwords = Stopwords::new();
        assert!(!stopwords.is_noise("幣"));
        assert!(stopwords.is_noise("是"));
    }

    #[test]
    fn filter_preserves_order() {
        let stopwords = Stopwords::new();
        let tokens = ["the", "stablecoin", "是", "幣", "a", "market"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(stopwords.filter(tokens), vec!["stablecoin", "幣", "market"]);
    }

    #[test]
    fn lists_are_populated() {
        let stopwords = Stopwords::new();
        assert!(!stopwords.is_empty());
        assert!(stopwords.len() > 100);
    }
}
