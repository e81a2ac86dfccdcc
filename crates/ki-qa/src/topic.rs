//! Residual topic extraction.
//!
//! The topic is what is left of a question after interrogative phrases and
//! punctuation are removed. It labels answers and seeds tag suggestions; search
//! always runs on the full question.

use regex::{Regex, RegexBuilder};

/// Chinese interrogative and filler phrases, longest first so compound forms
/// are removed whole.
const CHINESE_CUES: &[&str] = &[
    "告訴我", "告诉我", "什麼是", "什么是", "是什麼", "是什么", "為什麼", "为什么", "有哪些",
    "怎麼看", "怎么看", "請問", "请问", "關於", "关于", "為何", "为何", "哪些", "如何", "怎麼",
    "怎么", "怎樣", "怎样", "何謂", "何谓", "趨勢", "趋势", "總結", "总结", "比較", "比较",
    "看法", "一下", "嗎", "吗", "呢",
];

/// English interrogative and filler words.
const ENGLISH_CUES: &[&str] = &[
    "what", "why", "how", "which", "who", "when", "where", "is", "are", "was", "were", "do",
    "does", "did", "can", "could", "the", "a", "an", "of", "about", "on", "tell", "me", "please",
    "define", "list", "summarize", "summarise", "summary", "compare", "explain", "trend",
    "trends", "opinion", "think", "you", "your",
];

/// Strips cue words from questions.
#[derive(Debug, Clone)]
pub struct TopicExtractor {
    /// Chinese cue phrases.
    chinese: Regex,
    /// English cue words, whole words only.
    english: Regex,
    /// Punctuation and symbols.
    punctuation: Regex,
    /// Runs of whitespace.
    whitespace: Regex,
}

impl TopicExtractor {
    /// Compiles the cue patterns.
    pub fn new() -> Result<Self, regex::Error> {
        let chinese = CHINESE_CUES
            .iter()
            .map(|cue| regex::escape(cue))
            .collect::<Vec<_>>()
            .join("|");
        let english = format!(r"\b(?:{})\b", ENGLISH_CUES.join("|"));

        Ok(Self {
            chinese: Regex::new(&chinese)?,
            english: RegexBuilder::new(&english).case_insensitive(true).build()?,
            punctuation: Regex::new(r"[\p{P}\p{S}]")?,
            whitespace: Regex::new(r"\s+")?,
        })
    }

    /// The residual topic of a question, possibly empty.
    pub fn extract(&self, question: &str) -> String {
        let text = self.punctuation.replace_all(question, " ");
        let text = self.chinese.replace_all(&text, " ");
        let text = self.english.replace_all(&text, " ");
        self.whitespace.replace_all(text.trim(), " ").into_owned()
    }
}
