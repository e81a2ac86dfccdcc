//! Implementations of `ki trend`, `ki hot` and `ki emerging`.

use std::process::ExitCode;

use comfy_table::Cell;
use ki_analysis::{EmergingTopic, HotTopic, TrendAnalyzer, TrendRecord};

use crate::cli::{
    args::{HotCommand, TrendCommand},
    context::CommandContext,
    output::{date, dim, header, table, trend_label},
};

/// Builds a trend analyzer over the corpus.
fn analyzer(ctx: &mut CommandContext) -> Result<TrendAnalyzer, ExitCode> {
    ctx.corpus().map(|corpus| TrendAnalyzer::new(&corpus))
}

/// Shows the timeline and trend class of a tag.
pub fn trend(ctx: &mut CommandContext, cmd: &TrendCommand) -> ExitCode {
    let analyzer = match analyzer(ctx) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let record = analyzer.analyze_trend(&cmd.tag);
    ctx.emit(&record, print_trend)
}

/// Renders a trend record with its timeline.
pub fn print_trend(record: &TrendRecord) {
    println!("{} {}", header(&record.tag), trend_label(record.trend));
    println!(
        "   {}",
        dim(&format!(
            "{} articles, {} in the last 30 days, {} in the 30 days before",
            record.article_count, record.recent_count, record.older_count
        ))
    );
    if record.timeline.is_empty() {
        return;
    }

    let mut timeline = table(&["Date", "Title", "ID"]);
    for entry in &record.timeline {
        timeline.add_row(vec![
            Cell::new(date(entry.saved_at)),
            Cell::new(&entry.title),
            Cell::new(&entry.id),
        ]);
    }
    println!("{timeline}");
}

/// Lists the most frequent tags in a recent window.
pub fn hot(ctx: &mut CommandContext, cmd: &HotCommand) -> ExitCode {
    let days = cmd.days.unwrap_or(ctx.config.trends.hot_days);
    let analyzer = match analyzer(ctx) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let topics = analyzer.find_hot_topics(days);
    ctx.emit(topics.as_slice(), |topics| {
        if topics.is_empty() {
            println!("{}", dim(&format!("No articles in the last {days} days.")));
            return;
        }
        print_hot_topics(topics);
    })
}

/// Renders hot topics as a table.
pub fn print_hot_topics(topics: &[HotTopic]) {
    let mut hot = table(&["Tag", "Articles", "Share"]);
    for topic in topics {
        hot.add_row(vec![
            Cell::new(&topic.tag),
            Cell::new(topic.count),
            Cell::new(format!("{:.1}%", topic.percentage)),
        ]);
    }
    println!("{hot}");
}

/// Lists tags growing from the older window into the recent one.
pub fn emerging(ctx: &mut CommandContext) -> ExitCode {
    let analyzer = match analyzer(ctx) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let topics = analyzer.find_emerging_topics();
    ctx.emit(topics.as_slice(), |topics| {
        if topics.is_empty() {
            println!("{}", dim("No emerging topics."));
            return;
        }
        print_emerging_topics(topics);
    })
}

/// Renders emerging topics as a table.
pub fn print_emerging_topics(topics: &[EmergingTopic]) {
    let mut emerging = table(&["Tag", "Recent", "Older", "Growth"]);
    for topic in topics {
        emerging.add_row(vec![
            Cell::new(&topic.tag),
            Cell::new(topic.recent_count),
            Cell::new(topic.older_count),
            Cell::new(format!("{:.1}x", topic.growth)),
        ]);
    }
    println!("{emerging}");
}
