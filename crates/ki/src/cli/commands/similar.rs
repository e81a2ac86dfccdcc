//! Implementation of `ki similar`.

use std::process::ExitCode;

use crate::cli::{
    args::SimilarCommand,
    context::CommandContext,
    output::{dim, print_hits, subheader},
};

/// Prints the articles most similar to an article.
pub fn run(ctx: &mut CommandContext, cmd: &SimilarCommand) -> ExitCode {
    let limit = cmd.limit.unwrap_or(ctx.config.search.limit);
    let search = match ctx.search() {
        Ok(s) => s,
        Err(code) => return code,
    };

    let Some(source) = search.article(&cmd.id) else {
        eprintln!("error: no article with id '{}'", cmd.id);
        return ExitCode::FAILURE;
    };
    let title = source.title.clone();

    let hits = search.find_similar(&cmd.id, limit);
    ctx.emit(&hits, |hits| {
        println!(
            "{} {}",
            subheader(&format!("Similar to {title}")),
            dim(&format!("[{}]", cmd.id))
        );
        println!();
        print_hits(hits);
    })
}
