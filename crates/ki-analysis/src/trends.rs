//! Tag timelines and trend detection.
//!
//! Trends compare two rolling windows ending at the analyzer's reference
//! instant: *recent* covers the last [`RECENT_WINDOW_DAYS`] days and *older*
//! the window of the same length before it. Articles without a timestamp
//! appear in timelines but never in a window.

use std::{cmp::Ordering, fmt};

use chrono::{DateTime, Duration, Utc};
use ki_article::{Article, Corpus};
use serde::Serialize;

use crate::tally::{Tally, TagCount, count_tags};

/// Length of each trend window.
pub const RECENT_WINDOW_DAYS: i64 = 30;

/// `recent > older × RISING_RATIO` marks a rising trend.
pub const RISING_RATIO: f64 = 1.5;

/// `recent < older × DECLINING_RATIO` (with older > 0) marks a declining trend.
pub const DECLINING_RATIO: f64 = 0.5;

/// Maximum hot topics reported.
pub const MAX_HOT_TOPICS: usize = 10;

/// Maximum emerging topics reported.
pub const MAX_EMERGING_TOPICS: usize = 5;

/// Growth assigned per recent article when a tag has no older articles.
const NEW_TAG_GROWTH: f64 = 2.0;

/// Direction of a tag's activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendClass {
    /// More recent activity than before.
    Rising,
    /// Roughly unchanged activity.
    Stable,
    /// Less recent activity than before.
    Declining,
    /// Exactly one matching article.
    New,
    /// No matching articles.
    NoData,
}

impl TrendClass {
    /// The serialized name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rising => "rising",
            Self::Stable => "stable",
            Self::Declining => "declining",
            Self::New => "new",
            Self::NoData => "no_data",
        }
    }

    /// Classifies window counts for a timeline of `total` articles.
    ///
    /// A single article is `new` whatever its window, so a lone recent article
    /// does not read as rising.
    pub fn classify(total: usize, recent: usize, older: usize) -> Self {
        let (recent_f, older_f) = (recent as f64, older as f64);
        if total == 0 {
            Self::NoData
        } else if total == 1 {
            Self::New
        } else if recent_f > older_f * RISING_RATIO {
            Self::Rising
        } else if older > 0 && recent_f < older_f * DECLINING_RATIO {
            Self::Declining
        } else {
            Self::Stable
        }
    }
}

impl fmt::Display for TrendClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One article on a tag's timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    /// Article id.
    pub id: String,
    /// Article title.
    pub title: String,
    /// When the article was saved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

/// Trend classification for a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendRecord {
    /// The tag as queried.
    pub tag: String,
    /// Articles on the timeline.
    pub article_count: usize,
    /// Classification.
    pub trend: TrendClass,
    /// Timeline articles in the recent window.
    pub recent_count: usize,
    /// Timeline articles in the older window.
    pub older_count: usize,
    /// Matching articles, oldest first.
    pub timeline: Vec<TimelineEntry>,
}

/// A tag frequent within a window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotTopic {
    /// Tag as first spelled in the window.
    pub tag: String,
    /// Window articles carrying the tag.
    pub count: usize,
    /// `count` as a percentage of all window articles.
    pub percentage: f64,
}

/// A tag whose recent activity outgrows its older activity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmergingTopic {
    /// Tag as first spelled in the recent window.
    pub tag: String,
    /// Articles in the recent window.
    pub recent_count: usize,
    /// Articles in the older window.
    pub older_count: usize,
    /// `recent / older`, or `recent × 2` for tags with no older articles.
    pub growth: f64,
}

/// Which trend window an article falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Window {
    /// Within the last window length, including future timestamps.
    Recent,
    /// Between one and two window lengths old.
    Older,
}

/// Trend analysis over a corpus snapshot.
#[derive(Debug, Clone)]
pub struct TrendAnalyzer {
    /// Analyzed articles.
    corpus: Corpus,
    /// Reference instant windows are measured from.
    now: DateTime<Utc>,
}

impl TrendAnalyzer {
    /// Creates an analyzer measuring windows from the current time.
    pub fn new(corpus: &Corpus) -> Self {
        Self {
            corpus: corpus.clone(),
            now: Utc::now(),
        }
    }

    /// Replaces the reference instant.
    #[must_use]
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// The reference instant.
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Articles matching `tag`, oldest first, undated first.
    ///
    /// An article matches when one of its tags equals `tag` ignoring case, or
    /// its title or content contains `tag` ignoring case.
    pub fn timeline_articles(&self, tag: &str) -> Vec<&Article> {
        let needle = tag.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<&Article> = self
            .corpus
            .iter()
            .filter(|article| {
                article.has_tag(&needle)
                    || article.title.to_lowercase().contains(&needle)
                    || article.content().to_lowercase().contains(&needle)
            })
            .collect();
        matches.sort_by_key(|article| article.saved_at);
        matches
    }

    /// Timeline entries for `tag`, oldest first.
    pub fn build_timeline(&self, tag: &str) -> Vec<TimelineEntry> {
        self.timeline_articles(tag)
            .into_iter()
            .map(|article| TimelineEntry {
                id: article.id.clone(),
                title: article.title.clone(),
                saved_at: article.saved_at,
            })
            .collect()
    }

    /// Classifies the activity of `tag`.
    pub fn analyze_trend(&self, tag: &str) -> TrendRecord {
        let articles = self.timeline_articles(tag);
        let recent_count = self.count_in(&articles, Window::Recent);
        let older_count = self.count_in(&articles, Window::Older);

        TrendRecord {
            tag: tag.to_string(),
            article_count: articles.len(),
            trend: TrendClass::classify(articles.len(), recent_count, older_count),
            recent_count,
            older_count,
            timeline: self.build_timeline(tag),
        }
    }

    /// Start of the window covering the last `days` days.
    ///
    /// `None` when the window reaches past the representable range, in which
    /// case it covers every dated article.
    pub fn days_ago(&self, days: i64) -> Option<DateTime<Utc>> {
        Duration::try_days(days).and_then(|d| self.now.checked_sub_signed(d))
    }

    /// Most frequent tags among articles saved in the last `days` days.
    pub fn find_hot_topics(&self, days: i64) -> Vec<HotTopic> {
        let cutoff = self.days_ago(days);
        let window: Vec<&Article> = self
            .corpus
            .iter()
            .filter(|a| a.saved_at.is_some_and(|t| cutoff.is_none_or(|c| t >= c)))
            .collect();
        if window.is_empty() {
            return Vec::new();
        }

        let total = window.len() as f64;
        count_tags(window)
            .into_iter()
            .take(MAX_HOT_TOPICS)
            .map(|TagCount { tag, count }| HotTopic {
                tag,
                count,
                percentage: count as f64 / total * 100.0,
            })
            .collect()
    }

    /// Tags active in the recent window, fastest growing first.
    ///
    /// Growth is `recent / older`, or `recent × 2` for tags absent from the
    /// older window.
    pub fn find_emerging_topics(&self) -> Vec<EmergingTopic> {
        let mut recent = Tally::default();
        let mut older = Tally::default();
        for article in self.corpus.iter() {
            match self.window_of(article) {
                Some(Window::Recent) => recent.add_tags(article),
                Some(Window::Older) => older.add_tags(article),
                None => {}
            }
        }

        let mut emerging: Vec<EmergingTopic> = recent
            .iter()
            .map(|(key, display, recent_count)| {
                let older_count = older.get(key);
                let growth = if older_count > 0 {
                    recent_count as f64 / older_count as f64
                } else {
                    recent_count as f64 * NEW_TAG_GROWTH
                };
                EmergingTopic {
                    tag: display.to_string(),
                    recent_count,
                    older_count,
                    growth,
                }
            })
            .collect();

        emerging.sort_by(|a, b| b.growth.partial_cmp(&a.growth).unwrap_or(Ordering::Equal));
        emerging.truncate(MAX_EMERGING_TOPICS);
        emerging
    }

    /// All-time tag frequencies, most frequent first.
    pub fn tag_counts(&self) -> Vec<TagCount> {
        count_tags(self.corpus.iter())
    }

    /// The window an article's timestamp falls in, if any.
    fn window_of(&self, article: &Article) -> Option<Window> {
        let saved_at = article.saved_at?;
        let recent_start = self.days_ago(RECENT_WINDOW_DAYS);
        let older_start = self.days_ago(RECENT_WINDOW_DAYS * 2);
        if recent_start.is_none_or(|start| saved_at >= start) {
            Some(Window::Recent)
        } else if older_start.is_none_or(|start| saved_at >= start) {
            Some(Window::Older)
        } else {
            None
        }
    }

    /// Counts articles in a window.
    fn count_in(&self, articles: &[&Article], window: Window) -> usize {
        articles
            .iter()
            .filter(|a| self.window_of(a) == Some(window))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap()
    }

    fn dated(id: &str, tags: &[&str], days_ago: i64) -> Article {
        let mut article = Article::new(id, format!("article {id}"));
        article.tags = tags.iter().map(|t| t.to_string()).collect();
        article.saved_at = Some(now() - Duration::days(days_ago));
        article
    }

    fn analyzer(articles: Vec<Article>) -> TrendAnalyzer {
        TrendAnalyzer::new(&Corpus::new(articles)).with_now(now())
    }

    #[test]
    fn three_recent_one_older_is_rising() {
        let trends = analyzer(vec![
            dated("a", &["RWA"], 1),
            dated("b", &["RWA"], 5),
            dated("c", &["RWA"], 10),
            dated("d", &["RWA"], 45),
        ]);
        let record = trends.analyze_trend("RWA");
        assert_eq!(record.recent_count, 3);
        assert_eq!(record.older_count, 1);
        assert_eq!(record.trend, TrendClass::Rising);
    }

    #[test]
    fn one_recent_three_older_is_declining() {
        let trends = analyzer(vec![
            dated("a", &["RWA"], 2),
            dated("b", &["RWA"], 35),
            dated("c", &["RWA"], 40),
            dated("d", &["RWA"], 50),
        ]);
        assert_eq!(trends.analyze_trend("rwa").trend, TrendClass::Declining);
    }

    #[test]
    fn single_article_is_new() {
        let trends = analyzer(vec![dated("a", &["RWA"], 1), dated("b", &["AI"], 1)]);
        assert_eq!(trends.analyze_trend("RWA").trend, TrendClass::New);

        let old = analyzer(vec![dated("a", &["RWA"], 400)]);
        assert_eq!(old.analyze_trend("RWA").trend, TrendClass::New);
    }

    #[test]
    fn unknown_tag_has_no_data() {
        let trends = analyzer(vec![dated("a", &["RWA"], 1)]);
        let record = trends.analyze_trend("quantum");
        assert_eq!(record.trend, TrendClass::NoData);
        assert!(record.timeline.is_empty());
        assert_eq!(trends.analyze_trend("  ").trend, TrendClass::NoData);
    }

    #[test]
    fn equal_windows_are_stable() {
        let trends = analyzer(vec![dated("a", &["RWA"], 3), dated("b", &["RWA"], 40)]);
        assert_eq!(trends.analyze_trend("RWA").trend, TrendClass::Stable);
    }

    #[test]
    fn classify_guards_zero_windows() {
        assert_eq!(TrendClass::classify(3, 0, 0), TrendClass::Stable);
        assert_eq!(TrendClass::classify(2, 2, 0), TrendClass::Rising);
        assert_eq!(TrendClass::classify(0, 0, 0), TrendClass::NoData);
    }

    #[test]
    fn timeline_matches_title_and_content_substrings() {
        let mut titled = dated("t", &[], 3);
        titled.title = "Tokenized RWA funds".into();
        let mut body = dated("c", &[], 9);
        body.content = Some("Banks now hold rwa collateral".into());
        let mut undated = Article::new("u", "RWA primer");
        undated.saved_at = None;
        let trends = analyzer(vec![titled, body, undated, dated("x", &["AI"], 1)]);

        let ids: Vec<_> = trends.build_timeline("RWA").into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["u", "c", "t"]);
    }

    #[test]
    fn tags_match_exactly_not_by_substring() {
        let trends = analyzer(vec![dated("a", &["RWAX"], 1)]);
        assert!(trends.build_timeline("RWA").is_empty());
    }

    #[test]
    fn hot_topics_rank_by_count_within_window() {
        let trends = analyzer(vec![
            dated("a", &["RWA", "DeFi"], 1),
            dated("b", &["RWA"], 2),
            dated("c", &["AI"], 3),
            dated("d", &["AI", "AI"], 4),
            dated("e", &["Old"], 20),
        ]);
        let hot = trends.find_hot_topics(7);
        let tags: Vec<_> = hot.iter().map(|h| h.tag.as_str()).collect();
        assert_eq!(tags, vec!["AI", "RWA", "DeFi"]);
        assert_eq!(hot[0].count, 2);
        assert!((hot[0].percentage - 50.0).abs() < 1e-9);
    }

    #[test]
    fn hot_topics_empty_window() {
        let trends = analyzer(vec![dated("a", &["RWA"], 100)]);
        assert!(trends.find_hot_topics(7).is_empty());
    }

    #[test]
    fn emerging_topics_rank_by_growth() {
        let trends = analyzer(vec![
            dated("a", &["RWA"], 1),
            dated("b", &["RWA"], 2),
            dated("c", &["RWA"], 40),
            dated("d", &["AI"], 3),
            dated("e", &["AI"], 35),
            dated("f", &["New"], 4),
        ]);
        let emerging = trends.find_emerging_topics();
        let tags: Vec<_> = emerging.iter().map(|e| e.tag.as_str()).collect();
        // RWA 2/1 = 2, New 1*2 = 2, AI 1/1 = 1
        assert_eq!(tags, vec!["New", "RWA", "AI"]);
        assert!((emerging[0].growth - 2.0).abs() < 1e-9);
        assert_eq!(emerging[1].older_count, 1);
        assert!((emerging[2].growth - 1.0).abs() < 1e-9);
    }

    #[test]
    fn shrinking_topics_are_still_reported() {
        let trends = analyzer(vec![
            dated("a", &["AI"], 1),
            dated("b", &["AI"], 40),
            dated("c", &["Old"], 2),
            dated("d", &["Old"], 35),
            dated("e", &["Old"], 45),
            dated("f", &["Old"], 55),
        ]);
        let emerging = trends.find_emerging_topics();
        let tags: Vec<_> = emerging.iter().map(|e| e.tag.as_str()).collect();
        assert_eq!(tags, vec!["AI", "Old"]);
        assert!((emerging[1].growth - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn unbounded_hot_window_counts_every_dated_article() {
        let mut undated = Article::new("u", "undated");
        undated.tags = vec!["AI".into()];
        undated.saved_at = None;
        let trends = analyzer(vec![
            dated("a", &["RWA"], 1),
            dated("b", &["RWA"], 100_000),
            undated,
        ]);

        assert!(trends.days_ago(i64::MAX).is_none());
        for days in [i64::MAX, 200_000_000] {
            let hot = trends.find_hot_topics(days);
            assert_eq!(hot.len(), 1);
            assert_eq!(hot[0].tag, "RWA");
            assert_eq!(hot[0].count, 2);
        }
    }

    #[test]
    fn windows_survive_an_extreme_reference_instant() {
        let trends = TrendAnalyzer::new(&Corpus::new(vec![dated("a", &["RWA"], 1)]))
            .with_now(DateTime::<Utc>::MIN_UTC);
        let record = trends.analyze_trend("RWA");
        assert_eq!(record.recent_count, 1);
        assert!(trends.find_emerging_topics()[0].growth > 0.0);
    }

    #[test]
    fn tag_counts_cover_all_time() {
        let trends = analyzer(vec![dated("a", &["RWA"], 1), dated("b", &["rwa"], 900)]);
        assert_eq!(trends.tag_counts()[0].count, 2);
    }

    #[test]
    fn trend_class_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&TrendClass::NoData).unwrap(),
            "\"no_data\""
        );
        assert_eq!(TrendClass::Rising.to_string(), "rising");
    }
}
