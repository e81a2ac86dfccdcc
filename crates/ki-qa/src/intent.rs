//! Question intent classification.
//!
//! Intents are tried in a fixed order and the first pattern that matches wins,
//! so "what are the differences" is a definition question, not a comparison.

use std::fmt;

use regex::{Regex, RegexBuilder};
use serde::Serialize;

/// What a question asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    /// "What is X?"
    Definition,
    /// "X vs Y?"
    Comparison,
    /// "Which X are there?"
    Listing,
    /// "Why X?"
    Reason,
    /// "Summarize X."
    Summary,
    /// "Where is X heading?"
    Trend,
    /// "What do you think of X?"
    Opinion,
    /// Anything else.
    General,
}

impl QuestionType {
    /// The serialized name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Definition => "definition",
            Self::Comparison => "comparison",
            Self::Listing => "listing",
            Self::Reason => "reason",
            Self::Summary => "summary",
            Self::Trend => "trend",
            Self::Opinion => "opinion",
            Self::General => "general",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cue patterns per intent, in match order. Traditional and simplified
/// Chinese forms are listed side by side.
const INTENT_PATTERNS: &[(QuestionType, &str)] = &[
    (
        QuestionType::Definition,
        r"什麼是|什么是|是什麼|是什么|何謂|何谓|定義|定义|\bwhat\s+(?:is|are)\b|\bdefine\b|\bdefinition\b|\bmeaning\s+of\b",
    ),
    (
        QuestionType::Comparison,
        r"比較|比较|區別|区别|差異|差异|不同|相比|\bvs\.?|\bversus\b|\bcompare\b|\bcomparison\b|\bdifferences?\b",
    ),
    (
        QuestionType::Listing,
        r"有哪些|哪些|列出|列舉|列举|\blist\b|\bwhich\b|\bexamples?\s+of\b",
    ),
    (
        QuestionType::Reason,
        r"為什麼|为什么|為何|为何|原因|\bwhy\b|\breasons?\b",
    ),
    (
        QuestionType::Summary,
        r"總結|总结|摘要|概述|概括|\bsummar(?:y|ize|ise)\b|\boverview\b",
    ),
    (
        QuestionType::Trend,
        r"趨勢|趋势|走勢|走势|發展|发展|未來|未来|\btrends?\b|\bfuture\b|\boutlook\b",
    ),
    (
        QuestionType::Opinion,
        r"看法|觀點|观点|認為|认为|怎麼看|怎么看|\bopinions?\b|\bthink\b|\bviews?\s+on\b",
    ),
];

/// Ordered `(pattern, intent)` table.
#[derive(Debug, Clone)]
pub struct QuestionClassifier {
    /// Compiled patterns in match order.
    patterns: Vec<(QuestionType, Regex)>,
}

impl QuestionClassifier {
    /// Compiles the intent table.
    pub fn new() -> Result<Self, regex::Error> {
        let patterns: Vec<(QuestionType, Regex)> = INTENT_PATTERNS
            .iter()
            .map(|(intent, pattern)| {
                let regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;
                Ok((*intent, regex))
            })
            .collect::<Result<_, regex::Error>>()?;
        Ok(Self { patterns })
    }

    /// Returns the first intent whose pattern matches, or
    /// [`QuestionType::General`].
    pub fn classify(&self, question: &str) -> QuestionType {
        self.patterns
            .iter()
            .find(|(_, regex)| regex.is_match(question))
            .map_or(QuestionType::General, |(intent, _)| *intent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(question: &str) -> QuestionType {
        QuestionClassifier::new().unwrap().classify(question)
    }

    #[test]
    fn chinese_scenarios() {
        assert_eq!(classify("什麼是 RWA？"), QuestionType::Definition);
        assert_eq!(classify("有哪些穩定幣？"), QuestionType::Listing);
        assert_eq!(classify("為什麼代幣化重要？"), QuestionType::Reason);
    }

    #[test]
    fn simplified_chinese() {
        assert_eq!(classify("什么是稳定币"), QuestionType::Definition);
        assert_eq!(classify("代币化的趋势"), QuestionType::Trend);
        assert_eq!(classify("总结一下 DeFi"), QuestionType::Summary);
    }

    #[test]
    fn english_cues_ignore_case() {
        assert_eq!(classify("What is tokenization?"), QuestionType::Definition);
        assert_eq!(classify("USDC vs USDT"), QuestionType::Comparison);
        assert_eq!(classify("List the stablecoins"), QuestionType::Listing);
        assert_eq!(classify("WHY does RWA matter"), QuestionType::Reason);
        assert_eq!(classify("Summarize DeFi news"), QuestionType::Summary);
        assert_eq!(classify("RWA outlook"), QuestionType::Trend);
        assert_eq!(classify("Your opinion on Bitcoin"), QuestionType::Opinion);
    }

    #[test]
    fn earlier_intents_win() {
        // Definition precedes comparison.
        assert_eq!(
            classify("What is the difference between USDC and USDT"),
            QuestionType::Definition
        );
        // Listing precedes trend.
        assert_eq!(classify("哪些趨勢值得關注"), QuestionType::Listing);
    }

    #[test]
    fn no_cue_is_general() {
        assert_eq!(classify("RWA"), QuestionType::General);
        assert_eq!(classify(""), QuestionType::General);
    }

    #[test]
    fn words_must_stand_alone() {
        assert_eq!(classify("whyte paper"), QuestionType::General);
    }

    #[test]
    fn serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&QuestionType::Definition).unwrap(),
            "\"definition\""
        );
    }
}
