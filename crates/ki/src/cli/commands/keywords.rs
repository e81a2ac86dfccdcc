//! Implementation of `ki keywords`.

use std::process::ExitCode;

use comfy_table::Cell;
use ki_text::{KeySentence, ScoredKeyword, extract_key_sentences, extract_keywords, rank_keywords};
use serde::Serialize;

use crate::cli::{
    args::KeywordsCommand,
    context::CommandContext,
    output::{dim, excerpt, subheader, table},
};

/// Key sentences shown with `--sentences`.
const KEY_SENTENCES: usize = 3;

/// JSON output for `ki keywords`.
#[derive(Serialize)]
struct KeywordsOutput {
    /// Ranked keywords.
    keywords: Vec<ScoredKeyword>,
    /// Representative sentences, when requested.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    sentences: Vec<KeySentence>,
}

/// Extracts keywords from raw text or an indexed article.
///
/// Raw text is ranked by frequency. Articles are ranked by TF-IDF against the
/// corpus, so terms common to every article sink.
pub fn run(ctx: &mut CommandContext, cmd: &KeywordsCommand) -> ExitCode {
    let (keywords, body) = if let Some(text) = &cmd.text {
        (extract_keywords(text, cmd.limit), text.clone())
    } else {
        let id = cmd.id.as_deref().unwrap_or_default();
        let search = match ctx.search() {
            Ok(s) => s,
            Err(code) => return code,
        };
        let Some(article) = search.article(id) else {
            eprintln!("error: no article with id '{id}'");
            return ExitCode::FAILURE;
        };
        let text = article.search_text();
        let keywords = rank_keywords(&text, search.vectorizer(), cmd.limit);
        let body = if article.content().is_empty() {
            text
        } else {
            article.content().to_string()
        };
        (keywords, body)
    };

    let sentences = if cmd.sentences {
        extract_key_sentences(&body, KEY_SENTENCES)
    } else {
        Vec::new()
    };

    let output = KeywordsOutput {
        keywords,
        sentences,
    };
    ctx.emit(&output, print_keywords)
}

/// Renders keywords as a table followed by key sentences.
fn print_keywords(output: &KeywordsOutput) {
    if output.keywords.is_empty() {
        println!("{}", dim("No keywords found."));
    } else {
        let mut keywords = table(&["Term", "Count", "Score"]);
        for keyword in &output.keywords {
            keywords.add_row(vec![
                Cell::new(&keyword.term),
                Cell::new(keyword.count),
                Cell::new(format!("{:.2}", keyword.score)),
            ]);
        }
        println!("{keywords}");
    }

    if !output.sentences.is_empty() {
        println!("{}", subheader("Key sentences:"));
        for sentence in &output.sentences {
            println!("   {}", excerpt(&sentence.text));
        }
    }
}
