//! Implementation of `ki search`.

use std::process::ExitCode;

use ki_index::{SearchHit, SearchOptions};
use serde::Serialize;

use crate::cli::{args::SearchCommand, context::CommandContext, output::print_hits};

/// JSON output for `ki search`.
#[derive(Serialize)]
struct JsonSearchOutput<'a> {
    /// The query as searched.
    query: &'a str,
    /// Hits returned.
    total_matches: usize,
    /// Hits, best first.
    results: &'a [SearchHit],
}

/// Searches the corpus and prints matching articles.
pub fn run(ctx: &mut CommandContext, cmd: &SearchCommand) -> ExitCode {
    let settings = &ctx.config.search;
    let options = SearchOptions {
        top_k: cmd.limit.unwrap_or(settings.limit),
        min_score: cmd.min_score.unwrap_or(settings.min_score),
        include_snippets: settings.snippets && !cmd.no_snippets,
    };

    let search = match ctx.search() {
        Ok(s) => s,
        Err(code) => return code,
    };

    let query = cmd.query.join(" ");
    let hits = search.search(&query, &options);
    let output = JsonSearchOutput {
        query: &query,
        total_matches: hits.len(),
        results: &hits,
    };
    ctx.emit(&output, |out| print_hits(out.results))
}
