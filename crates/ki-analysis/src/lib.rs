//! Corpus analysis for ki.
//!
//! Three engines, each built from a [`ki_article::Corpus`] snapshot:
//! - [`TrendAnalyzer`]: per-tag timelines, trend classes, hot and emerging topics
//! - [`ConnectionDiscovery`]: pairwise relations, the connection graph, clusters
//! - [`InsightGenerator`]: topic, weekly, cross-article and full reports
//!
//! Every threshold is a named constant; none are configurable.

#![warn(missing_docs)]

mod connections;
mod insights;
mod tally;
mod trends;

pub use connections::{
    CLUSTER_EDGE_MIN_SCORE, CLUSTER_GRAPH_MIN_SCORE, Cluster, Connection, ConnectionDiscovery,
    ConnectionGraph, KEY_POINT_WEIGHT, MAX_NEW_ARTICLE_CONNECTIONS, NEW_ARTICLE_MIN_SCORE,
    Relation, RelationType, TAG_WEIGHT, TOPIC_WEIGHT,
};
pub use insights::{
    ClusterInsight, ConnectionEdge, CorpusOverview, CrossArticleInsights, FullReport, HubArticle,
    InsightGenerator, InsightStatus, TopicInsights, WeeklyInsights, dedupe_key_points,
};
pub use tally::{CategoryCount, TagCount, count_categories, count_tags};
pub use trends::{
    DECLINING_RATIO, EmergingTopic, HotTopic, MAX_EMERGING_TOPICS, MAX_HOT_TOPICS,
    RECENT_WINDOW_DAYS, RISING_RATIO, TimelineEntry, TrendAnalyzer, TrendClass, TrendRecord,
};
