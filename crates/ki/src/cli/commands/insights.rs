//! Implementation of `ki insights`.

use std::process::ExitCode;

use comfy_table::Cell;
use ki_analysis::{
    CorpusOverview, CrossArticleInsights, FullReport, InsightGenerator, InsightStatus,
    TopicInsights, WeeklyInsights,
};
use ki_text::ScoredKeyword;

use super::trends::{print_emerging_topics, print_hot_topics, print_trend};
use crate::cli::{
    args::InsightsWhat,
    context::CommandContext,
    output::{date, dim, header, rule, score, subheader, table},
};

/// Generates and prints the selected report.
pub fn run(ctx: &mut CommandContext, what: &InsightsWhat) -> ExitCode {
    let corpus = match ctx.corpus() {
        Ok(c) => c,
        Err(code) => return code,
    };
    let generator = InsightGenerator::new(&corpus);

    match what {
        InsightsWhat::Topic { tag } => {
            ctx.emit(&generator.generate_topic_insights(tag), print_topic)
        }
        InsightsWhat::Cross => ctx.emit(&generator.generate_cross_article_insights(), print_cross),
        InsightsWhat::Weekly => ctx.emit(&generator.generate_weekly_insights(), print_weekly),
        InsightsWhat::Report => ctx.emit(&generator.generate_full_report(), print_report),
    }
}

/// Prints a placeholder when a report had nothing to work with.
fn insufficient(status: InsightStatus) -> bool {
    if status == InsightStatus::InsufficientData {
        println!("{}", dim("Not enough data."));
        return true;
    }
    false
}

/// Formats keywords as `term (count)` pairs.
fn keyword_line(keywords: &[ScoredKeyword]) -> String {
    keywords
        .iter()
        .map(|k| format!("{} ({})", k.term, k.count))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Prints a titled bullet list, skipping empty lists.
fn print_bullets(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("{}", subheader(title));
    for item in items {
        println!("   - {item}");
    }
}

/// Renders a topic report.
fn print_topic(insights: &TopicInsights) {
    print_trend(&insights.trend);
    if insufficient(insights.status) {
        return;
    }
    println!(
        "   {}",
        dim(&format!(
            "first seen {}, last seen {}",
            date(insights.first_seen),
            date(insights.last_seen)
        ))
    );
    if !insights.keywords.is_empty() {
        println!("{} {}", subheader("Keywords:"), keyword_line(&insights.keywords));
    }
    if !insights.related_tags.is_empty() {
        let related: Vec<String> = insights
            .related_tags
            .iter()
            .map(|t| format!("{} ({})", t.tag, t.count))
            .collect();
        println!("{} {}", subheader("Related tags:"), related.join(", "));
    }
    print_bullets("Key points:", &insights.key_points);
}

/// Renders a cross-article report.
fn print_cross(insights: &CrossArticleInsights) {
    println!("{}", header("Cross-article insights"));
    if insufficient(insights.status) {
        return;
    }

    if insights.clusters.is_empty() {
        println!("{}", dim("No clusters found."));
    }
    for (n, cluster) in insights.clusters.iter().enumerate() {
        let titles: Vec<&str> = cluster.articles.iter().map(|a| a.title.as_str()).collect();
        println!(
            "{} {}",
            subheader(&format!("Cluster {}:", n + 1)),
            titles.join(" · ")
        );
        if !cluster.shared_tags.is_empty() {
            println!("   {}", dim(&format!("tags: {}", cluster.shared_tags.join(", "))));
        }
        if !cluster.keywords.is_empty() {
            println!("   {}", dim(&format!("keywords: {}", keyword_line(&cluster.keywords))));
        }
    }

    if !insights.strongest_connections.is_empty() {
        let mut edges = table(&["Score", "Article", "Related article"]);
        for edge in &insights.strongest_connections {
            edges.add_row(vec![
                Cell::new(score(edge.score)),
                Cell::new(&edge.source.title),
                Cell::new(&edge.target.title),
            ]);
        }
        println!("{}", subheader("Strongest connections:"));
        println!("{edges}");
    }

    let hubs: Vec<String> = insights
        .hubs
        .iter()
        .map(|h| format!("{} ({} connections)", h.article.title, h.connections))
        .collect();
    print_bullets("Hub articles:", &hubs);
}

/// Renders a weekly digest.
fn print_weekly(insights: &WeeklyInsights) {
    println!(
        "{} {}",
        header("Weekly insights"),
        dim(&format!(
            "{} to {}",
            date(Some(insights.period_start)),
            date(Some(insights.period_end))
        ))
    );
    if insufficient(insights.status) {
        return;
    }
    println!("   {}", dim(&format!("{} articles", insights.article_count)));

    if !insights.hot_topics.is_empty() {
        println!("{}", subheader("Hot topics:"));
        print_hot_topics(&insights.hot_topics);
    }
    if !insights.emerging_topics.is_empty() {
        println!("{}", subheader("Emerging topics:"));
        print_emerging_topics(&insights.emerging_topics);
    }
    if !insights.keywords.is_empty() {
        println!("{} {}", subheader("Keywords:"), keyword_line(&insights.keywords));
    }
    if !insights.categories.is_empty() {
        let categories: Vec<String> = insights
            .categories
            .iter()
            .map(|c| format!("{} ({})", c.category, c.count))
            .collect();
        println!("{} {}", subheader("Categories:"), categories.join(", "));
    }
    print_bullets("Key points:", &insights.key_points);
}

/// Renders corpus totals.
fn print_overview(overview: &CorpusOverview) {
    println!("{}", header("Overview"));
    println!(
        "   {} articles ({} dated), {} distinct tags",
        overview.total_articles, overview.dated_articles, overview.distinct_tags
    );
    if !overview.categories.is_empty() {
        let mut categories = table(&["Category", "Articles"]);
        for category in &overview.categories {
            categories.add_row(vec![Cell::new(&category.category), Cell::new(category.count)]);
        }
        println!("{categories}");
    }
}

/// Renders the full report section by section.
fn print_report(report: &FullReport) {
    println!(
        "{}",
        dim(&format!("Generated {}", report.generated_at.format("%Y-%m-%d %H:%M UTC")))
    );
    println!();
    print_overview(&report.overview);
    println!("{}", rule(40));
    print_weekly(&report.weekly);
    println!("{}", rule(40));
    print_cross(&report.cross_article);

    if !report.hot_topics.is_empty() {
        println!("{}", rule(40));
        println!("{}", header("Hot topics (30 days)"));
        print_hot_topics(&report.hot_topics);
    }
    if !report.emerging_topics.is_empty() {
        println!("{}", header("Emerging topics"));
        print_emerging_topics(&report.emerging_topics);
    }
    for topic in &report.topics {
        println!("{}", rule(40));
        print_topic(topic);
    }
}
