//! Structured insight reports composed from trends, connections and keywords.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use ki_article::{Article, ArticleRef, Corpus};
use ki_text::{ScoredKeyword, extract_keywords};
use serde::Serialize;
use tracing::debug;

use crate::{
    connections::{CLUSTER_GRAPH_MIN_SCORE, ConnectionDiscovery, RelationType},
    tally::{CategoryCount, TagCount, count_categories, count_tags},
    trends::{EmergingTopic, HotTopic, TrendAnalyzer, TrendRecord},
};

/// Characters compared when de-duplicating key points.
const DEDUPE_PREFIX_CHARS: usize = 50;
/// Maximum key points in a report section.
const MAX_KEY_POINTS: usize = 10;
/// Maximum keywords in a report section.
const MAX_KEYWORDS: usize = 10;
/// Maximum co-occurring tags in topic insights.
const MAX_RELATED_TAGS: usize = 5;
/// Maximum strongest connections in cross-article insights.
const MAX_STRONGEST_CONNECTIONS: usize = 5;
/// Maximum hub articles in cross-article insights.
const MAX_HUBS: usize = 3;
/// Keywords attached to each cluster.
const CLUSTER_KEYWORDS: usize = 5;
/// Days covered by weekly insights.
const WEEK_DAYS: i64 = 7;
/// Hot topic window of the full report.
const REPORT_HOT_DAYS: i64 = 30;
/// Hot tags expanded into topic insights in the full report.
const REPORT_TOPICS: usize = 3;

/// Whether a report had data to work with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightStatus {
    /// The report is populated.
    Ok,
    /// Not enough articles; the rest of the report is empty.
    InsufficientData,
}

/// Everything known about one tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicInsights {
    /// The tag.
    pub tag: String,
    /// Whether any article matched.
    pub status: InsightStatus,
    /// Trend classification.
    pub trend: TrendRecord,
    /// Frequent terms across matching articles.
    pub keywords: Vec<ScoredKeyword>,
    /// De-duplicated key points of matching articles.
    pub key_points: Vec<String>,
    /// Other tags carried by matching articles.
    pub related_tags: Vec<TagCount>,
    /// Earliest save among matching articles.
    pub first_seen: Option<DateTime<Utc>>,
    /// Latest save among matching articles.
    pub last_seen: Option<DateTime<Utc>>,
    /// Matching articles, oldest first.
    pub articles: Vec<ArticleRef>,
}

/// A cluster with the terms that characterize it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterInsight {
    /// Members.
    pub articles: Vec<ArticleRef>,
    /// Tags shared by at least two members.
    pub shared_tags: Vec<String>,
    /// Frequent terms across members.
    pub keywords: Vec<ScoredKeyword>,
}

/// One undirected edge between two articles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectionEdge {
    /// Endpoint earlier in the corpus.
    pub source: ArticleRef,
    /// Endpoint later in the corpus.
    pub target: ArticleRef,
    /// Relation total score.
    pub score: f64,
    /// Relation labels.
    pub relation_types: Vec<RelationType>,
}

/// An article with many connections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HubArticle {
    /// The article.
    pub article: ArticleRef,
    /// Its connection count.
    pub connections: usize,
}

/// How the corpus hangs together.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossArticleInsights {
    /// `insufficient_data` with fewer than two articles.
    pub status: InsightStatus,
    /// Articles considered.
    pub article_count: usize,
    /// Clusters, largest first.
    pub clusters: Vec<ClusterInsight>,
    /// Strongest edges, each pair once.
    pub strongest_connections: Vec<ConnectionEdge>,
    /// Most connected articles.
    pub hubs: Vec<HubArticle>,
}

/// Digest of the last week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyInsights {
    /// `insufficient_data` when nothing was saved this week.
    pub status: InsightStatus,
    /// Start of the week.
    pub period_start: DateTime<Utc>,
    /// End of the week.
    pub period_end: DateTime<Utc>,
    /// Articles saved this week.
    pub article_count: usize,
    /// Hot topics over the week.
    pub hot_topics: Vec<HotTopic>,
    /// Emerging topics over the trend windows.
    pub emerging_topics: Vec<EmergingTopic>,
    /// Frequent terms this week.
    pub keywords: Vec<ScoredKeyword>,
    /// De-duplicated key points saved this week.
    pub key_points: Vec<String>,
    /// Articles per category this week.
    pub categories: Vec<CategoryCount>,
}

/// Corpus totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorpusOverview {
    /// Articles in the corpus.
    pub total_articles: usize,
    /// Articles with a save time.
    pub dated_articles: usize,
    /// Distinct tags, ignoring case.
    pub distinct_tags: usize,
    /// Articles per category.
    pub categories: Vec<CategoryCount>,
}

/// Every report in one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FullReport {
    /// Reference instant of the report.
    pub generated_at: DateTime<Utc>,
    /// Corpus totals.
    pub overview: CorpusOverview,
    /// Weekly digest.
    pub weekly: WeeklyInsights,
    /// Corpus structure.
    pub cross_article: CrossArticleInsights,
    /// Hot topics over the last 30 days.
    pub hot_topics: Vec<HotTopic>,
    /// Emerging topics.
    pub emerging_topics: Vec<EmergingTopic>,
    /// Topic insights for the hottest tags.
    pub topics: Vec<TopicInsights>,
}

/// Drops key points whose lowercase first 50 characters repeat an earlier one.
///
/// Blank points are dropped; survivors keep their original text and order.
pub fn dedupe_key_points<'a>(points: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    points
        .into_iter()
        .map(str::trim)
        .filter(|point| !point.is_empty())
        .filter(|point| {
            let key: String = point.to_lowercase().chars().take(DEDUPE_PREFIX_CHARS).collect();
            seen.insert(key)
        })
        .map(str::to_string)
        .collect()
}

/// Report generation over a corpus snapshot.
#[derive(Debug, Clone)]
pub struct InsightGenerator {
    /// Articles reported on.
    corpus: Corpus,
    /// Trend engine sharing the snapshot.
    trends: TrendAnalyzer,
    /// Connection engine sharing the snapshot.
    connections: ConnectionDiscovery,
}

impl InsightGenerator {
    /// Creates a generator measuring time from now.
    pub fn new(corpus: &Corpus) -> Self {
        Self {
            corpus: corpus.clone(),
            trends: TrendAnalyzer::new(corpus),
            connections: ConnectionDiscovery::new(corpus),
        }
    }

    /// Replaces the reference instant.
    #[must_use]
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.trends = self.trends.with_now(now);
        self
    }

    /// The trend engine.
    pub fn trends(&self) -> &TrendAnalyzer {
        &self.trends
    }

    /// The connection engine.
    pub fn connections(&self) -> &ConnectionDiscovery {
        &self.connections
    }

    /// Summarizes one tag.
    pub fn generate_topic_insights(&self, tag: &str) -> TopicInsights {
        let articles = self.trends.timeline_articles(tag);
        let trend = self.trends.analyze_trend(tag);
        let status = if articles.is_empty() {
            InsightStatus::InsufficientData
        } else {
            InsightStatus::Ok
        };

        let needle = tag.trim().to_lowercase();
        let related_tags = count_tags(articles.iter().copied())
            .into_iter()
            .filter(|t| t.tag.to_lowercase() != needle)
            .take(MAX_RELATED_TAGS)
            .collect();

        TopicInsights {
            tag: tag.to_string(),
            status,
            trend,
            keywords: keywords_of(&articles, MAX_KEYWORDS),
            key_points: key_points_of(&articles),
            related_tags,
            first_seen: articles.iter().filter_map(|a| a.saved_at).min(),
            last_seen: articles.iter().filter_map(|a| a.saved_at).max(),
            articles: articles.iter().map(|a| a.to_ref()).collect(),
        }
    }

    /// Describes clusters, strong edges and hubs across the corpus.
    pub fn generate_cross_article_insights(&self) -> CrossArticleInsights {
        if self.corpus.len() < 2 {
            return CrossArticleInsights {
                status: InsightStatus::InsufficientData,
                article_count: self.corpus.len(),
                clusters: Vec::new(),
                strongest_connections: Vec::new(),
                hubs: Vec::new(),
            };
        }

        let clusters = self
            .connections
            .find_clusters()
            .into_iter()
            .map(|cluster| {
                let members: Vec<&Article> = cluster
                    .articles
                    .iter()
                    .filter_map(|r| self.corpus.get(&r.id))
                    .collect();
                ClusterInsight {
                    keywords: keywords_of(&members, CLUSTER_KEYWORDS),
                    articles: cluster.articles,
                    shared_tags: cluster.shared_tags,
                }
            })
            .collect();

        let graph = self
            .connections
            .build_connection_graph(CLUSTER_GRAPH_MIN_SCORE);

        let articles = self.corpus.articles();
        let positions: HashMap<&str, usize> = articles
            .iter()
            .enumerate()
            .map(|(i, a)| (a.id.as_str(), i))
            .collect();

        let mut edges = Vec::new();
        let mut hubs = Vec::new();
        for (position, article) in articles.iter().enumerate() {
            let connections = graph.connections(&article.id);
            if !connections.is_empty() {
                hubs.push(HubArticle {
                    article: article.to_ref(),
                    connections: connections.len(),
                });
            }
            for edge in connections {
                // Each pair once, from its earlier article.
                let Some(&target) = positions.get(edge.target_id.as_str()) else {
                    continue;
                };
                if target > position {
                    edges.push(ConnectionEdge {
                        source: article.to_ref(),
                        target: articles[target].to_ref(),
                        score: edge.score,
                        relation_types: edge.relation_types.clone(),
                    });
                }
            }
        }

        edges.sort_by(|a, b| b.score.total_cmp(&a.score));
        edges.truncate(MAX_STRONGEST_CONNECTIONS);
        hubs.sort_by(|a, b| b.connections.cmp(&a.connections));
        hubs.truncate(MAX_HUBS);

        CrossArticleInsights {
            status: InsightStatus::Ok,
            article_count: self.corpus.len(),
            clusters,
            strongest_connections: edges,
            hubs,
        }
    }

    /// Digests the articles saved in the last seven days.
    pub fn generate_weekly_insights(&self) -> WeeklyInsights {
        let period_end = self.trends.now();
        let period_start = self
            .trends
            .days_ago(WEEK_DAYS)
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let week: Vec<&Article> = self
            .corpus
            .iter()
            .filter(|a| a.saved_at.is_some_and(|t| t >= period_start))
            .collect();

        if week.is_empty() {
            return WeeklyInsights {
                status: InsightStatus::InsufficientData,
                period_start,
                period_end,
                article_count: 0,
                hot_topics: Vec::new(),
                emerging_topics: Vec::new(),
                keywords: Vec::new(),
                key_points: Vec::new(),
                categories: Vec::new(),
            };
        }

        WeeklyInsights {
            status: InsightStatus::Ok,
            period_start,
            period_end,
            article_count: week.len(),
            hot_topics: self.trends.find_hot_topics(WEEK_DAYS),
            emerging_topics: self.trends.find_emerging_topics(),
            keywords: keywords_of(&week, MAX_KEYWORDS),
            key_points: key_points_of(&week),
            categories: count_categories(week.iter().copied()),
        }
    }

    /// Combines every report, expanding the hottest tags into topic insights.
    pub fn generate_full_report(&self) -> FullReport {
        let hot_topics = self.trends.find_hot_topics(REPORT_HOT_DAYS);
        let topics = hot_topics
            .iter()
            .take(REPORT_TOPICS)
            .map(|hot| self.generate_topic_insights(&hot.tag))
            .collect();

        let report = FullReport {
            generated_at: self.trends.now(),
            overview: CorpusOverview {
                total_articles: self.corpus.len(),
                dated_articles: self.corpus.iter().filter(|a| a.saved_at.is_some()).count(),
                distinct_tags: self.corpus.tags().len(),
                categories: count_categories(self.corpus.iter()),
            },
            weekly: self.generate_weekly_insights(),
            cross_article: self.generate_cross_article_insights(),
            hot_topics,
            emerging_topics: self.trends.find_emerging_topics(),
            topics,
        };
        debug!(
            articles = report.overview.total_articles,
            topics = report.topics.len(),
            "generated full report"
        );
        report
    }
}

/// Frequent terms over the searchable text of `articles`.
fn keywords_of(articles: &[&Article], top_n: usize) -> Vec<ScoredKeyword> {
    let text = articles
        .iter()
        .map(|a| a.search_text())
        .collect::<Vec<_>>()
        .join("\n");
    extract_keywords(&text, top_n)
}

/// De-duplicated key points of `articles`, capped.
fn key_points_of(articles: &[&Article]) -> Vec<String> {
    let mut points = dedupe_key_points(
        articles
            .iter()
            .flat_map(|a| a.key_points.iter().map(String::as_str)),
    );
    points.truncate(MAX_KEY_POINTS);
    points
}
