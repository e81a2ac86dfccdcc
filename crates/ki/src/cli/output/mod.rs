//! Rendering and JSON serialization for CLI output.

mod style;

use std::process::ExitCode;

use chrono::{DateTime, Utc};
use comfy_table::{Table, presets::UTF8_FULL_CONDENSED};
use ki_analysis::TrendClass;
use ki_index::SearchHit;
use serde::Serialize;
pub use style::{dim, error, header, rule, subheader, success, warning};

/// Longest excerpt shown in table cells, in characters.
const EXCERPT_CHARS: usize = 80;

/// Prints a value as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// A table with the house style and the given header row.
pub fn table(columns: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(columns.to_vec());
    table
}

/// Formats a similarity score.
pub fn score(value: f64) -> String {
    format!("{value:.3}")
}

/// Formats an optional timestamp as a calendar date.
pub fn date(value: Option<DateTime<Utc>>) -> String {
    value.map_or_else(|| "-".to_string(), |t| t.format("%Y-%m-%d").to_string())
}

/// A trend class colored by direction.
pub fn trend_label(trend: TrendClass) -> String {
    match trend {
        TrendClass::Rising | TrendClass::New => success(trend.as_str()),
        TrendClass::Declining => error(trend.as_str()),
        TrendClass::Stable | TrendClass::NoData => dim(trend.as_str()),
    }
}

/// Shortens text to [`EXCERPT_CHARS`] characters, marking the cut.
pub fn excerpt(text: &str) -> String {
    let text = text.trim();
    if text.chars().count() <= EXCERPT_CHARS {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(EXCERPT_CHARS - 1).collect();
    cut.push('…');
    cut
}

/// Prints search hits, one block per hit.
pub fn print_hits(hits: &[SearchHit]) {
    if hits.is_empty() {
        println!("{}", dim("No results found."));
        return;
    }

    for (rank, hit) in hits.iter().enumerate() {
        println!(
            "{} {} {}",
            header(&format!("{}. {}", rank + 1, hit.title)),
            dim(&format!("[{}]", hit.id)),
            dim(&score(hit.score))
        );

        let mut meta = Vec::new();
        if let Some(category) = &hit.category {
            meta.push(category.clone());
        }
        if !hit.tags.is_empty() {
            meta.push(hit.tags.join(", "));
        }
        if hit.saved_at.is_some() {
            meta.push(date(hit.saved_at));
        }
        if !meta.is_empty() {
            println!("   {}", dim(&meta.join(" · ")));
        }

        if let Some(summary) = hit.summary.as_deref().filter(|s| !s.trim().is_empty()) {
            println!("   {}", excerpt(summary));
        }
        for snippet in &hit.snippets {
            println!("   {} {}", dim("›"), snippet);
        }
        if let Some(url) = &hit.url {
            println!("   {}", dim(url));
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn excerpt_keeps_short_text() {
        assert_eq!(excerpt("  short  "), "short");
    }

    #[test]
    fn excerpt_cuts_on_characters() {
        let long = "穩".repeat(100);
        let cut = excerpt(&long);
        assert_eq!(cut.chars().count(), EXCERPT_CHARS);
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn date_formats_day() {
        let t = Utc.with_ymd_and_hms(2024, 3, 9, 15, 0, 0).unwrap();
        assert_eq!(date(Some(t)), "2024-03-09");
        assert_eq!(date(None), "-");
    }

    #[test]
    fn score_has_three_decimals() {
        assert_eq!(score(0.5), "0.500");
    }
}
