//! Character-class tokenizer for mixed Chinese, English and numeric text.
//!
//! The tokenizer does not attempt Chinese word segmentation. Each CJK ideograph
//! becomes its own token, runs of letters become one lowercase word, and runs of
//! ASCII digits become one number. Whitespace and punctuation only separate
//! tokens.

/// Character classes recognised by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    /// A CJK ideograph, always emitted as a single-character token.
    Cjk,
    /// A non-CJK alphabetic character.
    Letter,
    /// An ASCII digit.
    Digit,
    /// Anything else; acts as a separator.
    Separator,
}

impl CharClass {
    /// Classifies a single character.
    fn of(c: char) -> Self {
        if is_cjk(c) {
            Self::Cjk
        } else if c.is_ascii_digit() {
            Self::Digit
        } else if c.is_alphabetic() {
            Self::Letter
        } else {
            Self::Separator
        }
    }
}

/// Returns true if the character is a CJK unified ideograph.
pub fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{4E00}'..='\u{9FFF}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{F900}'..='\u{FAFF}'
        | '\u{20000}'..='\u{2A6DF}'
    )
}

/// Returns true if the token is a single Chinese character.
pub fn is_chinese_token(token: &str) -> bool {
    let mut chars = token.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if is_cjk(c))
}

/// Splits text into tokens.
///
/// Tokens are emitted in document order. Letter runs are lowercased.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut current_class = CharClass::Separator;

    for c in text.chars() {
        let class = CharClass::of(c);
        if class != current_class && !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
        current_class = class;

        match class {
            CharClass::Cjk => tokens.push(c.to_string()),
            CharClass::Letter => current.extend(c.to_lowercase()),
            CharClass::Digit => current.push(c),
            CharClass::Separator => {}
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}
