//! Case-insensitive tag and category counting.

use std::collections::BTreeMap;

use ki_article::Article;
use serde::Serialize;

/// A tag with its article count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    /// Tag as first spelled in the counted articles.
    pub tag: String,
    /// Articles carrying the tag.
    pub count: usize,
}

/// A category with its article count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    /// Category name, or [`ki_article::UNCATEGORIZED`].
    pub category: String,
    /// Articles in the category.
    pub count: usize,
}

/// Counts labels case-insensitively, remembering the first spelling seen.
#[derive(Debug, Default)]
pub struct Tally {
    /// Lowercase key → (display spelling, count).
    entries: BTreeMap<String, (String, usize)>,
}

impl Tally {
    /// Counts one occurrence of `label`.
    pub fn add(&mut self, label: &str) {
        let label = label.trim();
        if label.is_empty() {
            return;
        }
        self.entries
            .entry(label.to_lowercase())
            .or_insert_with(|| (label.to_string(), 0))
            .1 += 1;
    }

    /// Counts each distinct tag of an article once.
    pub fn add_tags(&mut self, article: &Article) {
        let mut seen: Vec<String> = Vec::with_capacity(article.tags.len());
        for tag in &article.tags {
            let key = tag.trim().to_lowercase();
            if !seen.contains(&key) {
                self.add(tag);
                seen.push(key);
            }
        }
    }

    /// Count for a label, ignoring case.
    pub fn get(&self, label: &str) -> usize {
        self.entries
            .get(&label.trim().to_lowercase())
            .map_or(0, |(_, count)| *count)
    }

    /// Iterates `(key, display, count)` in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, usize)> {
        self.entries
            .iter()
            .map(|(key, (display, count))| (key.as_str(), display.as_str(), *count))
    }

    /// Entries sorted by count descending, then key ascending.
    pub fn ranked(&self) -> Vec<(String, usize)> {
        let mut ranked: Vec<(String, usize)> = self
            .entries
            .values()
            .map(|(display, count)| (display.clone(), *count))
            .collect();
        // BTreeMap order is by key, so a stable sort on count keeps keys ascending.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

/// Counts tags over `articles`, most frequent first.
pub fn count_tags<'a>(articles: impl IntoIterator<Item = &'a Article>) -> Vec<TagCount> {
    let mut tally = Tally::default();
    for article in articles {
        tally.add_tags(article);
    }
    tally
        .ranked()
        .into_iter()
        .map(|(tag, count)| TagCount { tag, count })
        .collect()
}

/// Counts categories over `articles`, most frequent first.
pub fn count_categories<'a>(articles: impl IntoIterator<Item = &'a Article>) -> Vec<CategoryCount> {
    let mut tally = Tally::default();
    for article in articles {
        tally.add(article.category_label());
    }
    tally
        .ranked()
        .into_iter()
        .map(|(category, count)| CategoryCount { category, count })
        .collect()
}
