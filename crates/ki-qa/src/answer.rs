//! Answer records and the per-intent builders that fill them.
//!
//! Builders only rearrange what retrieval returned: summaries, key points and
//! snippets of the matching articles. Nothing is generated.

use chrono::{DateTime, Utc};
use ki_analysis::{TrendRecord, dedupe_key_points};
use ki_index::SearchHit;
use serde::Serialize;

use crate::QuestionType;

/// Maximum detail lines in an answer.
const MAX_DETAILS: usize = 8;
/// Detail lines taken from a single article in a definition.
const DEFINITION_DETAILS: usize = 5;

/// Whether retrieval found anything to answer from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerStatus {
    /// The answer is built from matching articles.
    Answered,
    /// Nothing in the corpus is relevant enough.
    NoRelevantInfo,
}

/// An article an answer draws on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Source {
    /// Article id.
    pub id: String,
    /// Article title.
    pub title: String,
    /// Search score.
    pub score: f64,
    /// Source location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// When the article was saved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl From<&SearchHit> for Source {
    fn from(hit: &SearchHit) -> Self {
        Self {
            id: hit.id.clone(),
            title: hit.title.clone(),
            score: hit.score,
            url: hit.url.clone(),
            saved_at: hit.saved_at,
        }
    }
}

/// A templated answer to a question.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Answer {
    /// The question as answered.
    pub question: String,
    /// Retrieval outcome.
    pub status: AnswerStatus,
    /// Detected intent.
    pub question_type: QuestionType,
    /// Residual topic of the question.
    pub topic: String,
    /// Headline sentence.
    pub answer: String,
    /// Supporting lines.
    pub details: Vec<String>,
    /// Articles used, in presentation order.
    pub sources: Vec<Source>,
    /// Corpus tags to try instead, when nothing matched.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
    /// Trend of the topic, for trend questions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<TrendRecord>,
}

impl Answer {
    /// An answer reporting that nothing relevant was found.
    pub fn no_relevant_info(
        question: &str,
        question_type: QuestionType,
        topic: &str,
        suggestions: Vec<String>,
    ) -> Self {
        let subject = if topic.is_empty() { question } else { topic };
        Self {
            question: question.to_string(),
            status: AnswerStatus::NoRelevantInfo,
            question_type,
            topic: topic.to_string(),
            answer: format!("No saved articles cover \"{subject}\" yet."),
            details: Vec::new(),
            sources: Vec::new(),
            suggestions,
            trend: None,
        }
    }
}

/// What a builder produces before the common fields are attached.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    /// Headline sentence.
    pub answer: String,
    /// Supporting lines.
    pub details: Vec<String>,
    /// Hits in presentation order.
    pub order: Vec<usize>,
}

/// The most descriptive text of a hit: its summary, else its first key point,
/// else its first snippet.
fn lead_text(hit: &SearchHit) -> Option<&str> {
    hit.summary
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or_else(|| hit.key_points.first().map(String::as_str))
        .or_else(|| hit.snippets.first().map(String::as_str))
}

/// Label for a topic in a headline, falling back to the top hit's title.
fn subject<'a>(topic: &'a str, hits: &'a [SearchHit]) -> &'a str {
    if topic.is_empty() {
        hits.first().map_or("this question", |h| h.title.as_str())
    } else {
        topic
    }
}

/// Presentation order of hits as returned by search.
fn ranked_order(hits: &[SearchHit]) -> Vec<usize> {
    (0..hits.len()).collect()
}

/// "What is X?": the best hit's lead text and its key points.
pub fn build_definition(topic: &str, hits: &[SearchHit]) -> Draft {
    let Some(top) = hits.first() else {
        return Draft::default();
    };
    let answer = match lead_text(top) {
        Some(text) => format!("{}: {text}", subject(topic, hits)),
        None => format!("{} is covered in \"{}\".", subject(topic, hits), top.title),
    };
    let mut details = dedupe_key_points(top.key_points.iter().map(String::as_str));
    details.truncate(DEFINITION_DETAILS);

    Draft {
        answer,
        details,
        order: ranked_order(hits),
    }
}

/// "Which X are there?": one line per matching article.
pub fn build_listing(topic: &str, hits: &[SearchHit]) -> Draft {
    let details = hits
        .iter()
        .map(|hit| match lead_text(hit) {
            Some(text) => format!("{}: {text}", hit.title),
            None => hit.title.clone(),
        })
        .collect();

    Draft {
        answer: format!(
            "Found {} articles related to {}:",
            hits.len(),
            subject(topic, hits)
        ),
        details,
        order: ranked_order(hits),
    }
}

/// "Summarize X": the combined, de-duplicated key points.
pub fn build_summary(topic: &str, hits: &[SearchHit]) -> Draft {
    let mut details = dedupe_key_points(
        hits.iter()
            .flat_map(|hit| hit.key_points.iter().map(String::as_str))
            .chain(hits.iter().filter_map(|hit| hit.summary.as_deref())),
    );
    details.truncate(MAX_DETAILS);

    Draft {
        answer: format!(
            "Summary of {} articles about {}:",
            hits.len(),
            subject(topic, hits)
        ),
        details,
        order: ranked_order(hits),
    }
}

/// "Why X?": key points and snippets that may carry the reasoning.
pub fn build_reason(topic: &str, hits: &[SearchHit]) -> Draft {
    let mut details = dedupe_key_points(
        hits.iter()
            .flat_map(|hit| hit.key_points.iter().chain(&hit.snippets))
            .map(String::as_str),
    );
    details.truncate(MAX_DETAILS);

    Draft {
        answer: format!("Reasons discussed for {}:", subject(topic, hits)),
        details,
        order: ranked_order(hits),
    }
}

/// "Where is X heading?": the trend headline and hits oldest first.
pub fn build_trend(topic: &str, hits: &[SearchHit], trend: &TrendRecord) -> Draft {
    let mut order = ranked_order(hits);
    order.sort_by_key(|&i| hits[i].saved_at);

    let details = order
        .iter()
        .map(|&i| {
            let hit = &hits[i];
            let date = hit
                .saved_at
                .map_or_else(|| "undated".to_string(), |t| t.format("%Y-%m-%d").to_string());
            match lead_text(hit) {
                Some(text) => format!("{date} {}: {text}", hit.title),
                None => format!("{date} {}", hit.title),
            }
        })
        .collect();

    Draft {
        answer: format!(
            "{} is {} ({} articles in the last 30 days, {} in the 30 days before).",
            subject(topic, hits),
            trend.trend,
            trend.recent_count,
            trend.older_count
        ),
        details,
        order,
    }
}

/// Any other question: the best hit's lead text backed by snippets.
pub fn build_general(topic: &str, hits: &[SearchHit]) -> Draft {
    let Some(top) = hits.first() else {
        return Draft::default();
    };
    let answer = lead_text(top).map_or_else(
        || {
            format!(
                "The most relevant article on {} is \"{}\".",
                subject(topic, hits),
                top.title
            )
        },
        str::to_string,
    );
    let mut details = dedupe_key_points(
        hits.iter()
            .flat_map(|hit| hit.snippets.iter().chain(&hit.key_points))
            .map(String::as_str)
            .filter(|line| *line != answer),
    );
    details.truncate(MAX_DETAILS);

    Draft {
        answer,
        details,
        order: ranked_order(hits),
    }
}

/// Dispatches to the builder for an intent. Comparison and opinion questions
/// use the general builder.
pub fn build_answer(
    question_type: QuestionType,
    topic: &str,
    hits: &[SearchHit],
    trend: Option<&TrendRecord>,
) -> Draft {
    match (question_type, trend) {
        (QuestionType::Definition, _) => build_definition(topic, hits),
        (QuestionType::Listing, _) => build_listing(topic, hits),
        (QuestionType::Summary, _) => build_summary(topic, hits),
        (QuestionType::Reason, _) => build_reason(topic, hits),
        (QuestionType::Trend, Some(trend)) => build_trend(topic, hits, trend),
        (
            QuestionType::Trend
            | QuestionType::Comparison
            | QuestionType::Opinion
            | QuestionType::General,
            _,
        ) => build_general(topic, hits),
    }
}
