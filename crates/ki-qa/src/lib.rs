//! Rule-based question answering for ki.
//!
//! A question is classified by intent, stripped down to its topic, and answered
//! by rearranging the summaries, key points and snippets of the articles that
//! match it. When the best match is too weak the answer says so and suggests
//! corpus tags instead.
//!
//! ```
//! use ki_article::{Article, Corpus};
//! use ki_qa::{AnswerStatus, QaEngine};
//!
//! let mut article = Article::new("a", "RWA tokenization");
//! article.key_points = vec!["RWA needs redemption".into()];
//! let engine = QaEngine::new(&Corpus::new(vec![article])).unwrap();
//!
//! let answer = engine.answer("What is RWA?");
//! assert_eq!(answer.status, AnswerStatus::Answered);
//! ```

#![warn(missing_docs)]

mod answer;
mod engine;
mod error;
mod intent;
mod topic;

pub use answer::{Answer, AnswerStatus, Source};
pub use engine::{
    DEFAULT_LIMIT, InteractiveAnswer, MAX_FOLLOW_UPS, MAX_SUGGESTIONS, QaContext, QaEngine,
};
pub use error::QaError;
pub use intent::{QuestionClassifier, QuestionType};
pub use topic::TopicExtractor;
