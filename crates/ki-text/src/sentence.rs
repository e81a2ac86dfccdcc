//! Sentence splitting and key sentence extraction.

use std::cmp::Ordering;

use serde::Serialize;

use crate::{preprocess, similarity::term_frequency};

/// Characters that end a sentence.
const SENTENCE_TERMINATORS: &[char] = &['。', '！', '？', '.', '!', '?', '\n'];

/// A sentence selected as representative of its document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeySentence {
    /// The trimmed sentence text, without its terminator.
    pub text: String,
    /// Relevance score.
    pub score: f64,
    /// Zero-based index of the sentence in the document.
    pub position: usize,
}

/// Splits text into trimmed, non-empty sentences.
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.split(SENTENCE_TERMINATORS)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Selects the `top_n` most representative sentences.
///
/// Each sentence is scored by summing the document-wide frequency of each of
/// its tokens and dividing by the square root of its token count, so sentences
/// dense in recurring terms win over merely long ones. Ties keep document order.
pub fn extract_key_sentences(text: &str, top_n: usize) -> Vec<KeySentence> {
    let document_counts = term_frequency(&preprocess(text).tokens);

    let mut scored: Vec<KeySentence> = split_sentences(text)
        .into_iter()
        .enumerate()
        .filter_map(|(position, sentence)| {
            let tokens = preprocess(sentence).tokens;
            if tokens.is_empty() {
                return None;
            }
            let overlap: usize = tokens
                .iter()
                .map(|t| document_counts.get(t).copied().unwrap_or(0))
                .sum();
            Some(KeySentence {
                text: sentence.to_string(),
                score: overlap as f64 / (tokens.len() as f64).sqrt(),
                position,
            })
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.position.cmp(&b.position))
    });
    scored.truncate(top_n);
    scored
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn splits_on_mixed_terminators() {
        let sentences = split_sentences("穩定幣很重要。Why? Reserves matter! 結束");
        assert_eq!(
            sentences,
            vec!["穩定幣很重要", "Why", "Reserves matter", "結束"]
        );
    }

    #[test]
    fn split_drops_empty_fragments() {
        assert!(split_sentences("...!!").is_empty());
    }

    #[test]
    fn key_sentences_prefer_recurring_terms() {
        let text = "Stablecoin reserves need audits. The weather was nice today. \
                    Stablecoin audits protect reserves.";
        let key = extract_key_sentences(text, 2);
        assert_eq!(key.len(), 2);
        assert!(key.iter().all(|s| s.text.contains("Stablecoin")));
    }

    #[test]
    fn key_sentence_score_sums_document_frequencies() {
        let key = extract_key_sentences("Reserves reserves audits. Weather forecast.", 2);
        assert_eq!(key[0].position, 0);
        // reserves ×2 in the document, audits ×1: (2 + 2 + 1) / √3
        assert!((key[0].score - 5.0 / 3f64.sqrt()).abs() < 1e-9);
        assert!((key[1].score - 2.0 / 2f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn key_sentences_respect_limit() {
        let text = "One sentence here. Another sentence here. Third sentence here.";
        assert_eq!(extract_key_sentences(text, 1).len(), 1);
    }

    #[test]
    fn key_sentences_of_empty_text() {
        assert!(extract_key_sentences("", 3).is_empty());
    }
}
