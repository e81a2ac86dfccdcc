//! Snippet extraction for search hits.
//!
//! Snippets are scored by how many query tokens a sentence contains. This is a
//! cheaper pass than vector ranking and need not agree with it.

use std::collections::HashSet;

use ki_text::{preprocess, split_sentences};

/// Maximum snippets attached to a hit.
pub const MAX_SNIPPETS: usize = 3;

/// Returns up to `limit` sentences from `text` that share tokens with the query.
///
/// Best overlap first; equal overlap keeps document order.
pub fn extract_snippets(text: &str, query_tokens: &HashSet<String>, limit: usize) -> Vec<String> {
    if query_tokens.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(usize, &str)> = split_sentences(text)
        .into_iter()
        .filter_map(|sentence| {
            let overlap = preprocess(sentence)
                .tokens
                .iter()
                .filter(|t| query_tokens.contains(*t))
                .count();
            (overlap > 0).then_some((overlap, sentence))
        })
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored
        .into_iter()
        .take(limit)
        .map(|(_, sentence)| sentence.to_string())
        .collect()
}

/// The distinct filtered tokens of a query.
pub fn query_tokens(query: &str) -> HashSet<String> {
    preprocess(query).tokens.into_iter().collect()
}
