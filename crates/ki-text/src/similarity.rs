//! Term counting and set/vector similarity measures.

use std::{
    collections::{BTreeMap, HashSet},
    hash::Hash,
};

/// Term → occurrence count.
pub type TermCounts = BTreeMap<String, usize>;

/// Sparse term → weight vector.
///
/// A `BTreeMap` keeps iteration (and therefore floating point summation) order
/// deterministic.
pub type SparseVector = BTreeMap<String, f64>;

/// Counts how often each token occurs.
pub fn term_frequency<S: AsRef<str>>(tokens: &[S]) -> TermCounts {
    let mut counts = TermCounts::new();
    for token in tokens {
        *counts.entry(token.as_ref().to_string()).or_insert(0) += 1;
    }
    counts
}

/// Converts raw counts into a vector with the counts as weights.
pub fn counts_to_vector(counts: &TermCounts) -> SparseVector {
    counts
        .iter()
        .map(|(term, &count)| (term.clone(), count as f64))
        .collect()
}

/// Jaccard similarity `|A ∩ B| / |A ∪ B|`.
///
/// Returns 0 when both sets are empty.
pub fn jaccard_similarity<T: Eq + Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f64 {
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}

/// Cosine similarity of two sparse vectors.
///
/// Returns 0 when either vector has zero norm. Weights are non-negative in
/// every caller, so the result is clamped into `[0, 1]` to absorb rounding.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let dot: f64 = small
        .iter()
        .filter_map(|(term, w)| large.get(term).map(|v| w * v))
        .sum();

    let norm_a = norm(a);
    let norm_b = norm(b);
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
}

/// Euclidean norm of a sparse vector.
fn norm(v: &SparseVector) -> f64 {
    v.values().map(|w| w * w).sum::<f64>().sqrt()
}

#[cfg(test)]
mod test {
    use super::*;

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn vector(items: &[(&str, f64)]) -> SparseVector {
        items.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn term_frequency_counts() {
        let counts = term_frequency(&["rwa", "defi", "rwa"]);
        assert_eq!(counts["rwa"], 2);
        assert_eq!(counts["defi"], 1);
    }

    #[test]
    fn jaccard_basic() {
        let a = set(&["rwa", "defi", "ai"]);
        let b = set(&["rwa", "defi"]);
        assert!((jaccard_similarity(&a, &b) - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn jaccard_both_empty_is_zero() {
        let empty: HashSet<String> = HashSet::new();
        assert_eq!(jaccard_similarity(&empty, &empty), 0.0);
    }

    #[test]
    fn jaccard_one_empty_is_zero() {
        let empty: HashSet<String> = HashSet::new();
        assert_eq!(jaccard_similarity(&set(&["rwa"]), &empty), 0.0);
    }

    #[test]
    fn cosine_identical_is_one() {
        let a = vector(&[("rwa", 2.0), ("defi", 1.0)]);
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn cosine_disjoint_is_zero() {
        let a = vector(&[("rwa", 1.0)]);
        let b = vector(&[("ai", 1.0)]);
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn cosine_zero_norm_is_zero() {
        let a = vector(&[]);
        let b = vector(&[("ai", 1.0)]);
        assert_eq!(cosine_similarity(&a, &b), 0.0);
        assert_eq!(cosine_similarity(&a, &a), 0.0);
    }

    #[test]
    fn cosine_is_symmetric() {
        let a = vector(&[("rwa", 3.0), ("defi", 1.0), ("ai", 0.5)]);
        let b = vector(&[("rwa", 1.0), ("ai", 2.0)]);
        assert_eq!(cosine_similarity(&a, &b), cosine_similarity(&b, &a));
    }
}
