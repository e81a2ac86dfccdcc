//! Implementation of `ki ask`.

use std::process::ExitCode;

use comfy_table::Cell;
use ki_qa::{AnswerStatus, InteractiveAnswer, QaContext, QaEngine};

use crate::cli::{
    args::AskCommand,
    context::CommandContext,
    output::{date, dim, header, score, subheader, table, trend_label},
};

/// Answers a question from the corpus.
pub fn run(ctx: &mut CommandContext, cmd: &AskCommand) -> ExitCode {
    let limit = cmd.limit.unwrap_or(ctx.config.qa.limit);
    let corpus = match ctx.corpus() {
        Ok(c) => c,
        Err(code) => return code,
    };
    let engine = match QaEngine::new(&corpus) {
        Ok(engine) => engine.with_limit(limit),
        Err(e) => {
            eprintln!("error: failed to prepare question answering: {e}");
            return ExitCode::FAILURE;
        }
    };

    let question = cmd.question.join(" ");
    let context = QaContext {
        previous_topic: cmd.previous_topic.clone(),
    };
    let reply = engine.interactive_qa(&question, &context);
    ctx.emit(&reply, print_reply)
}

/// Renders an answer with its sources and follow-ups.
fn print_reply(reply: &InteractiveAnswer) {
    let answer = &reply.answer;
    println!(
        "{} {}",
        header(&answer.answer),
        dim(&format!("({})", answer.question_type))
    );
    for detail in &answer.details {
        println!("   - {detail}");
    }

    if let Some(trend) = &answer.trend {
        println!(
            "{} {} {}",
            subheader("Trend:"),
            trend_label(trend.trend),
            dim(&format!(
                "({} recent, {} older)",
                trend.recent_count, trend.older_count
            ))
        );
    }

    if answer.status == AnswerStatus::NoRelevantInfo {
        if !answer.suggestions.is_empty() {
            println!("{} {}", subheader("Try:"), answer.suggestions.join(", "));
        }
    } else if !answer.sources.is_empty() {
        let mut sources = table(&["Score", "Title", "Date", "ID"]);
        for source in &answer.sources {
            sources.add_row(vec![
                Cell::new(score(source.score)),
                Cell::new(&source.title),
                Cell::new(date(source.saved_at)),
                Cell::new(&source.id),
            ]);
        }
        println!();
        println!("{}", subheader("Sources:"));
        println!("{sources}");
    }

    if !reply.follow_ups.is_empty() {
        println!();
        println!("{}", subheader("Follow-up questions:"));
        for follow_up in &reply.follow_ups {
            println!("   {follow_up}");
        }
    }
}
