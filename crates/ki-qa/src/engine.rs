//! The question-answering engine.

use chrono::{DateTime, Utc};
use ki_analysis::TrendAnalyzer;
use ki_article::Corpus;
use ki_index::SemanticSearch;
use serde::Serialize;
use tracing::debug;

use crate::{
    Answer, AnswerStatus, QaError, QuestionClassifier, QuestionType, Source, TopicExtractor,
    answer::build_answer,
};

/// Default number of articles retrieved per question.
pub const DEFAULT_LIMIT: usize = 5;
/// Maximum tag suggestions on an unanswered question.
pub const MAX_SUGGESTIONS: usize = 5;
/// Maximum follow-up questions in an interactive answer.
pub const MAX_FOLLOW_UPS: usize = 3;
/// Characters compared when matching a topic against tags.
const SUGGESTION_PREFIX_CHARS: usize = 3;

/// Conversation state carried between interactive questions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QaContext {
    /// Topic of the previous question, if any.
    pub previous_topic: Option<String>,
}

/// An answer with follow-up questions and the topic to carry forward.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteractiveAnswer {
    /// The answer itself.
    #[serde(flatten)]
    pub answer: Answer,
    /// Suggested next questions.
    pub follow_ups: Vec<String>,
    /// Topic to pass as the next [`QaContext::previous_topic`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_topic: Option<String>,
}

/// Answers natural-language questions from a corpus snapshot.
#[derive(Debug, Clone)]
pub struct QaEngine {
    /// Index the answers are retrieved from.
    search: SemanticSearch,
    /// Trend engine for trend questions.
    trends: TrendAnalyzer,
    /// Intent table.
    classifier: QuestionClassifier,
    /// Cue stripper for topics.
    topics: TopicExtractor,
    /// Distinct corpus tags, for suggestions.
    tags: Vec<String>,
    /// Articles retrieved per question.
    limit: usize,
}

impl QaEngine {
    /// Indexes `corpus` and compiles the question patterns.
    pub fn new(corpus: &Corpus) -> Result<Self, QaError> {
        Ok(Self {
            search: SemanticSearch::from_corpus(corpus)?,
            trends: TrendAnalyzer::new(corpus),
            classifier: QuestionClassifier::new()?,
            topics: TopicExtractor::new()?,
            tags: corpus.tags(),
            limit: DEFAULT_LIMIT,
        })
    }

    /// Sets how many articles are retrieved per question.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Replaces the reference instant for trend questions.
    #[must_use]
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.trends = self.trends.with_now(now);
        self
    }

    /// The intent of a question.
    pub fn analyze_question(&self, question: &str) -> QuestionType {
        self.classifier.classify(question)
    }

    /// The residual topic of a question.
    pub fn extract_topics(&self, question: &str) -> String {
        self.topics.extract(question)
    }

    /// Answers a question from the articles that match it.
    pub fn answer(&self, question: &str) -> Answer {
        let question_type = self.analyze_question(question);
        let topic = self.extract_topics(question);
        let context = self.search.search_with_context(question, self.limit);
        debug!(
            %question_type,
            topic = %topic,
            results = context.results.len(),
            relevant = context.has_relevant_info,
            "answering question"
        );

        if !context.has_relevant_info {
            let suggestions = self.suggest_tags(&topic);
            return Answer::no_relevant_info(question, question_type, &topic, suggestions);
        }

        let hits = context.results;
        let trend = (question_type == QuestionType::Trend).then(|| {
            let subject = if topic.is_empty() { question } else { &topic };
            self.trends.analyze_trend(subject)
        });
        let draft = build_answer(question_type, &topic, &hits, trend.as_ref());
        let sources = draft.order.iter().map(|&i| Source::from(&hits[i])).collect();

        Answer {
            question: question.to_string(),
            status: AnswerStatus::Answered,
            question_type,
            topic,
            answer: draft.answer,
            details: draft.details,
            sources,
            suggestions: Vec::new(),
            trend,
        }
    }

    /// Answers a question in the context of the previous one.
    ///
    /// The previous topic is prepended to the question before answering. The
    /// topic carried forward is the new question's own topic, or the previous
    /// one when the new question has none.
    pub fn interactive_qa(&self, question: &str, context: &QaContext) -> InteractiveAnswer {
        let previous = context
            .previous_topic
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty());
        let full_question = match previous {
            Some(previous) => format!("{previous} {question}"),
            None => question.to_string(),
        };

        let answer = self.answer(&full_question);
        let own_topic = self.extract_topics(question);
        let next_topic = if own_topic.is_empty() {
            previous.map(str::to_string)
        } else {
            Some(own_topic)
        };
        let follow_ups = follow_ups(&answer);

        InteractiveAnswer {
            answer,
            follow_ups,
            next_topic,
        }
    }

    /// Up to [`MAX_SUGGESTIONS`] tags sharing a three-character prefix with
    /// the topic, in either direction.
    fn suggest_tags(&self, topic: &str) -> Vec<String> {
        let topic = topic.to_lowercase();
        if topic.is_empty() {
            return Vec::new();
        }
        let topic_prefix = prefix(&topic);

        self.tags
            .iter()
            .filter(|tag| {
                let tag = tag.to_lowercase();
                tag.contains(&topic_prefix) || topic.contains(&prefix(&tag))
            })
            .take(MAX_SUGGESTIONS)
            .cloned()
            .collect()
    }
}

/// The first [`SUGGESTION_PREFIX_CHARS`] characters of `text`.
fn prefix(text: &str) -> String {
    text.chars().take(SUGGESTION_PREFIX_CHARS).collect()
}

/// Templated follow-ups: other intents about the same topic, or suggested
/// tags when nothing was found.
fn follow_ups(answer: &Answer) -> Vec<String> {
    if answer.status == AnswerStatus::NoRelevantInfo {
        return answer
            .suggestions
            .iter()
            .take(MAX_FOLLOW_UPS)
            .map(|tag| format!("What is {tag}?"))
            .collect();
    }
    let topic = answer.topic.as_str();
    if topic.is_empty() {
        return Vec::new();
    }

    [
        (QuestionType::Definition, format!("What is {topic}?")),
        (QuestionType::Trend, format!("How is the {topic} trend developing?")),
        (QuestionType::Reason, format!("Why does {topic} matter?")),
        (QuestionType::Listing, format!("Which articles cover {topic}?")),
        (QuestionType::Summary, format!("Summarize {topic}")),
    ]
    .into_iter()
    .filter(|(intent, _)| *intent != answer.question_type)
    .map(|(_, question)| question)
    .take(MAX_FOLLOW_UPS)
    .collect()
}
