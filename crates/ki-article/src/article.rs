//! The article record supplied by collaborator modules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::timestamp::deserialize_lenient;

/// Category label for articles without one.
pub const UNCATEGORIZED: &str = "uncategorized";

/// A saved article.
///
/// Only `id` is required. Every other field may be missing (or `null`) in the
/// source JSON and reads back as empty. Field names follow the camelCase used by
/// the collaborator modules (`keyPoints`, `savedAt`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Unique identifier within a corpus.
    pub id: String,
    /// Headline.
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Full text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Short text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Ordered list of short takeaways.
    #[serde(default, deserialize_with = "null_as_default")]
    pub key_points: Vec<String>,
    /// Tags in their original display order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    /// Single category label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// When the article was saved.
    #[serde(
        default,
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub saved_at: Option<DateTime<Utc>>,
    /// Source location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Article {
    /// Creates an article with only an id and title.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Full text, or an empty string.
    pub fn content(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }

    /// Summary, or an empty string.
    pub fn summary(&self) -> &str {
        self.summary.as_deref().unwrap_or("")
    }

    /// Category if present and non-empty.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.trim().is_empty())
    }

    /// Category, or [`UNCATEGORIZED`].
    pub fn category_label(&self) -> &str {
        self.category().unwrap_or(UNCATEGORIZED)
    }

    /// Returns true if the article carries `tag`, ignoring case.
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == tag)
    }

    /// Lowercased tags with duplicates removed, in original order.
    pub fn normalized_tags(&self) -> Vec<String> {
        let mut seen = Vec::with_capacity(self.tags.len());
        for tag in &self.tags {
            let lower = tag.trim().to_lowercase();
            if !lower.is_empty() && !seen.contains(&lower) {
                seen.push(lower);
            }
        }
        seen
    }

    /// All searchable text: title, content, summary, key points and tags.
    pub fn search_text(&self) -> String {
        join_nonempty(
            [self.title.as_str(), self.content(), self.summary()]
                .into_iter()
                .chain(self.key_points.iter().map(String::as_str))
                .chain(self.tags.iter().map(String::as_str)),
        )
    }

    /// Text describing what the article is about: title, summary and key points.
    pub fn topic_text(&self) -> String {
        join_nonempty(
            [self.title.as_str(), self.summary()]
                .into_iter()
                .chain(self.key_points.iter().map(String::as_str)),
        )
    }

    /// Compact reference for use in result lists.
    pub fn to_ref(&self) -> ArticleRef {
        ArticleRef {
            id: self.id.clone(),
            title: self.title.clone(),
        }
    }
}

/// Identifier and title of an article.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArticleRef {
    /// Article id.
    pub id: String,
    /// Article title.
    pub title: String,
}

/// Joins non-empty parts with single spaces.
fn join_nonempty<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Deserializes `null` as the type's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_minimal_record() {
        let article: Article = serde_json::from_str(r#"{"id": "a"}"#).unwrap();
        assert_eq!(article.id, "a");
        assert!(article.title.is_empty());
        assert!(article.tags.is_empty());
        assert_eq!(article.content(), "");
        assert!(article.saved_at.is_none());
    }

    #[test]
    fn deserializes_camel_case_fields() {
        let json = r#"{
            "id": "a",
            "title": "RWA tokenization",
            "keyPoints": ["RWA needs redemption"],
            "tags": ["RWA"],
            "category": "finance",
            "savedAt": "2024-05-01T08:00:00Z"
        }"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.key_points, vec!["RWA needs redemption"]);
        assert!(article.saved_at.is_some());
        assert_eq!(article.category(), Some("finance"));
    }

    #[test]
    fn tolerates_nulls_and_bad_timestamps() {
        let json = r#"{"id": "a", "title": null, "tags": null, "savedAt": "not a date"}"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert!(article.title.is_empty());
        assert!(article.tags.is_empty());
        assert!(article.saved_at.is_none());
    }

    #[test]
    fn epoch_millis_timestamp() {
        let json = r#"{"id": "a", "savedAt": 1714550400000}"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(
            article.saved_at.unwrap().to_rfc3339(),
            "2024-05-01T08:00:00+00:00"
        );
    }

    #[test]
    fn search_text_concatenates_fields() {
        let mut article = Article::new("a", "Title");
        article.summary = Some("Summary".into());
        article.key_points = vec!["Point".into()];
        article.tags = vec!["Tag".into()];
        assert_eq!(article.search_text(), "Title Summary Point Tag");
        assert_eq!(article.topic_text(), "Title Summary Point");
    }

    #[test]
    fn blank_category_is_absent() {
        let mut article = Article::new("a", "t");
        article.category = Some("  ".into());
        assert_eq!(article.category(), None);
        assert_eq!(article.category_label(), UNCATEGORIZED);
    }

    #[test]
    fn tag_matching_ignores_case() {
        let mut article = Article::new("a", "t");
        article.tags = vec!["RWA".into(), "rwa".into(), "DeFi".into()];
        assert!(article.has_tag("rwa"));
        assert_eq!(article.normalized_tags(), vec!["rwa", "defi"]);
    }
}
