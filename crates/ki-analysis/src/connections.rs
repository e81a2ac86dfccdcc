//! Pairwise article relations and the connection graph built from them.
//!
//! A relation blends three signals with fixed weights:
//!
//! | Signal | Measure | Weight |
//! |--------|---------|--------|
//! | Tags | shared / max(tag counts) | [`TAG_WEIGHT`] |
//! | Topic | cosine of title + summary + key point term counts | [`TOPIC_WEIGHT`] |
//! | Key points | Jaccard of key point tokens | [`KEY_POINT_WEIGHT`] |

use std::{
    cmp::Ordering,
    collections::{BTreeMap, HashSet, VecDeque},
    fmt,
};

use chrono::{DateTime, Duration, Utc};
use ki_article::{Article, ArticleRef, Corpus};
use ki_text::{
    SparseVector, cosine_similarity, counts_to_vector, jaccard_similarity, preprocess,
    term_frequency,
};
use serde::Serialize;
use tracing::debug;

use crate::tally::Tally;

/// Weight of tag overlap in the total score.
pub const TAG_WEIGHT: f64 = 0.4;
/// Weight of topic similarity in the total score.
pub const TOPIC_WEIGHT: f64 = 0.4;
/// Weight of key point similarity in the total score.
pub const KEY_POINT_WEIGHT: f64 = 0.2;

/// Shared tags needed for a "common theme".
const COMMON_THEME_MIN_TAGS: usize = 2;
/// Title token Jaccard above which titles are "similar".
const SIMILAR_TITLE_THRESHOLD: f64 = 0.3;
/// Key point similarity above which viewpoints are "related".
const RELATED_VIEWPOINT_THRESHOLD: f64 = 0.2;
/// Maximum distance between saves for a "recently related" pair.
const RECENT_RELATION_DAYS: i64 = 7;
/// Total score above which close saves count as "recently related".
const RECENT_RELATION_MIN_SCORE: f64 = 0.2;

/// Edge threshold of the graph clusters are found in.
pub const CLUSTER_GRAPH_MIN_SCORE: f64 = 0.25;
/// Edges must score above this to join a cluster.
pub const CLUSTER_EDGE_MIN_SCORE: f64 = 0.3;
/// Candidate connections must score above this.
pub const NEW_ARTICLE_MIN_SCORE: f64 = 0.1;
/// Maximum candidate connections reported.
pub const MAX_NEW_ARTICLE_CONNECTIONS: usize = 5;

/// Why two articles are related.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RelationType {
    /// At least two shared tags.
    #[serde(rename = "common theme")]
    CommonTheme,
    /// Titles share many tokens.
    #[serde(rename = "similar title")]
    SimilarTitle,
    /// Key points share many tokens.
    #[serde(rename = "related viewpoint")]
    RelatedViewpoint,
    /// Same category.
    #[serde(rename = "same category")]
    SameCategory,
    /// Saved within a week of each other and otherwise related.
    #[serde(rename = "recently related")]
    RecentlyRelated,
}

impl RelationType {
    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::CommonTheme => "common theme",
            Self::SimilarTitle => "similar title",
            Self::RelatedViewpoint => "related viewpoint",
            Self::SameCategory => "same category",
            Self::RecentlyRelated => "recently related",
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How strongly two articles are related, and why.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Relation {
    /// Shared tags over the larger tag count.
    pub tag_overlap: f64,
    /// Cosine similarity of topic term counts.
    pub topic_similarity: f64,
    /// Jaccard similarity of key point tokens; 0 unless both have key points.
    pub key_point_similarity: f64,
    /// Weighted blend of the three, in `[0, 1]`.
    pub total_score: f64,
    /// Labels for thresholds crossed.
    pub types: Vec<RelationType>,
    /// Lowercased shared tags, sorted.
    pub shared_tags: Vec<String>,
}

/// An edge from one article to another.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Connection {
    /// Target article id.
    pub target_id: String,
    /// Target article title.
    pub title: String,
    /// Relation total score.
    pub score: f64,
    /// Relation labels.
    pub relation_types: Vec<RelationType>,
    /// Lowercased shared tags.
    pub shared_tags: Vec<String>,
}

/// Adjacency lists over every article in a corpus.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConnectionGraph {
    /// Article id → edges, strongest first. Every article has an entry.
    pub adjacency: BTreeMap<String, Vec<Connection>>,
}

impl ConnectionGraph {
    /// Edges leaving `id`, strongest first.
    pub fn connections(&self, id: &str) -> &[Connection] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum::<usize>() / 2
    }
}

/// A group of transitively well-connected articles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cluster {
    /// Members in discovery order.
    pub articles: Vec<ArticleRef>,
    /// Lowercased tags carried by at least two members, most common first.
    pub shared_tags: Vec<String>,
}

/// Per-article values reused across every pair.
#[derive(Debug, Clone)]
struct Features {
    /// Lowercased distinct tags.
    tags: Vec<String>,
    /// Term counts of title, summary and key points.
    topic: SparseVector,
    /// Key point tokens.
    key_points: HashSet<String>,
    /// Title tokens.
    title: HashSet<String>,
    /// Lowercased category.
    category: Option<String>,
    /// Save time.
    saved_at: Option<DateTime<Utc>>,
}

impl Features {
    /// Extracts features from an article.
    fn of(article: &Article) -> Self {
        let token_set = |text: &str| preprocess(text).tokens.into_iter().collect::<HashSet<_>>();
        Self {
            tags: article.normalized_tags(),
            topic: counts_to_vector(&term_frequency(&preprocess(&article.topic_text()).tokens)),
            key_points: token_set(&article.key_points.join(" ")),
            title: token_set(&article.title),
            category: article.category().map(|c| c.trim().to_lowercase()),
            saved_at: article.saved_at,
        }
    }

    /// Relates two feature sets. Symmetric in its arguments.
    fn relate(&self, other: &Self) -> Relation {
        let mut shared_tags: Vec<String> = self
            .tags
            .iter()
            .filter(|t| other.tags.contains(t))
            .cloned()
            .collect();
        shared_tags.sort();

        let tag_overlap =
            shared_tags.len() as f64 / self.tags.len().max(other.tags.len()).max(1) as f64;
        let topic_similarity = cosine_similarity(&self.topic, &other.topic);
        let key_point_similarity = if self.key_points.is_empty() || other.key_points.is_empty() {
            0.0
        } else {
            jaccard_similarity(&self.key_points, &other.key_points)
        };
        let total_score = (tag_overlap * TAG_WEIGHT
            + topic_similarity * TOPIC_WEIGHT
            + key_point_similarity * KEY_POINT_WEIGHT)
            .clamp(0.0, 1.0);

        let mut types = Vec::new();
        if shared_tags.len() >= COMMON_THEME_MIN_TAGS {
            types.push(RelationType::CommonTheme);
        }
        if jaccard_similarity(&self.title, &other.title) > SIMILAR_TITLE_THRESHOLD {
            types.push(RelationType::SimilarTitle);
        }
        if key_point_similarity > RELATED_VIEWPOINT_THRESHOLD {
            types.push(RelationType::RelatedViewpoint);
        }
        if self.category.is_some() && self.category == other.category {
            types.push(RelationType::SameCategory);
        }
        if let (Some(a), Some(b)) = (self.saved_at, other.saved_at)
            && (a - b).abs() <= Duration::days(RECENT_RELATION_DAYS)
            && total_score > RECENT_RELATION_MIN_SCORE
        {
            types.push(RelationType::RecentlyRelated);
        }

        Relation {
            tag_overlap,
            topic_similarity,
            key_point_similarity,
            total_score,
            types,
            shared_tags,
        }
    }
}

/// Relation scoring and graph construction over a corpus snapshot.
#[derive(Debug, Clone)]
pub struct ConnectionDiscovery {
    /// Stored articles.
    corpus: Corpus,
    /// Features parallel to `corpus`.
    features: Vec<Features>,
}

impl ConnectionDiscovery {
    /// Precomputes relation features for every article.
    pub fn new(corpus: &Corpus) -> Self {
        Self {
            corpus: corpus.clone(),
            features: corpus.iter().map(Features::of).collect(),
        }
    }

    /// Relates two arbitrary articles.
    pub fn calculate_relation(&self, a: &Article, b: &Article) -> Relation {
        Features::of(a).relate(&Features::of(b))
    }

    /// Builds the graph of all pairs scoring at least `min_score`.
    pub fn build_connection_graph(&self, min_score: f64) -> ConnectionGraph {
        let mut adjacency: BTreeMap<String, Vec<Connection>> = self
            .corpus
            .iter()
            .map(|a| (a.id.clone(), Vec::new()))
            .collect();

        for (i, a) in self.corpus.iter().enumerate() {
            for (j, b) in self.corpus.iter().enumerate().skip(i + 1) {
                let relation = self.features[i].relate(&self.features[j]);
                if relation.total_score < min_score {
                    continue;
                }
                if let Some(edges) = adjacency.get_mut(&a.id) {
                    edges.push(connection_to(b, &relation));
                }
                if let Some(edges) = adjacency.get_mut(&b.id) {
                    edges.push(connection_to(a, &relation));
                }
            }
        }

        for edges in adjacency.values_mut() {
            sort_connections(edges);
        }

        let graph = ConnectionGraph { adjacency };
        debug!(
            articles = self.corpus.len(),
            edges = graph.edge_count(),
            min_score,
            "built connection graph"
        );
        graph
    }

    /// Groups articles linked by strong edges; every cluster has two or more
    /// members. Largest first.
    pub fn find_clusters(&self) -> Vec<Cluster> {
        let graph = self.build_connection_graph(CLUSTER_GRAPH_MIN_SCORE);
        let mut visited: HashSet<&str> = HashSet::new();
        let mut clusters = Vec::new();

        for start in self.corpus.iter() {
            if !visited.insert(start.id.as_str()) {
                continue;
            }
            let mut members = vec![start];
            let mut queue = VecDeque::from([start.id.as_str()]);
            while let Some(id) = queue.pop_front() {
                for edge in graph.connections(id) {
                    if edge.score <= CLUSTER_EDGE_MIN_SCORE {
                        continue;
                    }
                    if let Some(target) = self.corpus.get(&edge.target_id)
                        && visited.insert(target.id.as_str())
                    {
                        members.push(target);
                        queue.push_back(target.id.as_str());
                    }
                }
            }
            if members.len() >= 2 {
                clusters.push(cluster_of(&members));
            }
        }

        clusters.sort_by(|a, b| b.articles.len().cmp(&a.articles.len()));
        clusters
    }

    /// Previews how a new article would connect to the stored ones.
    ///
    /// A stored article with the candidate's id is skipped.
    pub fn find_connections_for_new_article(&self, candidate: &Article) -> Vec<Connection> {
        let features = Features::of(candidate);
        let mut connections: Vec<Connection> = self
            .corpus
            .iter()
            .zip(&self.features)
            .filter(|(article, _)| article.id != candidate.id)
            .filter_map(|(article, stored)| {
                let relation = features.relate(stored);
                (relation.total_score > NEW_ARTICLE_MIN_SCORE)
                    .then(|| connection_to(article, &relation))
            })
            .collect();

        sort_connections(&mut connections);
        connections.truncate(MAX_NEW_ARTICLE_CONNECTIONS);
        connections
    }
}

/// An edge pointing at `target`.
fn connection_to(target: &Article, relation: &Relation) -> Connection {
    Connection {
        target_id: target.id.clone(),
        title: target.title.clone(),
        score: relation.total_score,
        relation_types: relation.types.clone(),
        shared_tags: relation.shared_tags.clone(),
    }
}

/// Strongest first; ties keep their order.
fn sort_connections(connections: &mut [Connection]) {
    connections.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
}

/// Builds a cluster from its members.
fn cluster_of(members: &[&Article]) -> Cluster {
    let mut tally = Tally::default();
    for article in members {
        tally.add_tags(article);
    }
    let shared_tags = tally
        .ranked()
        .into_iter()
        .filter(|(_, count)| *count >= 2)
        .map(|(tag, _)| tag.to_lowercase())
        .collect();

    Cluster {
        articles: members.iter().map(|a| a.to_ref()).collect(),
        shared_tags,
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn article(id: &str, title: &str, tags: &[&str], key_points: &[&str]) -> Article {
        let mut a = Article::new(id, title);
        a.tags = tags.iter().map(|t| t.to_string()).collect();
        a.key_points = key_points.iter().map(|t| t.to_string()).collect();
        a
    }

    fn scenario() -> Vec<Article> {
        vec![
            article("a", "RWA tokenization", &["RWA"], &["RWA needs redemption"]),
            article(
                "b",
                "Stablecoin future",
                &["RWA", "DeFi"],
                &["Stablecoin needs settlement"],
            ),
            article("c", "AI in finance", &["AI"], &["AI automates trading"]),
        ]
    }

    fn discovery(articles: Vec<Article>) -> ConnectionDiscovery {
        ConnectionDiscovery::new(&Corpus::new(articles))
    }

    #[test]
    fn identical_tags_are_a_common_theme() {
        let a = article("a", "Treasury tokens", &["RWA", "DeFi"], &[]);
        let b = article("b", "Private credit", &["defi", "rwa"], &[]);
        let relation = discovery(vec![]).calculate_relation(&a, &b);
        assert!((relation.tag_overlap - 1.0).abs() < f64::EPSILON);
        assert!(relation.types.contains(&RelationType::CommonTheme));
        assert_eq!(relation.shared_tags, vec!["defi", "rwa"]);
    }

    #[test]
    fn relation_is_symmetric_and_bounded() {
        let articles = scenario();
        let engine = discovery(articles.clone());
        for a in &articles {
            for b in &articles {
                let ab = engine.calculate_relation(a, b);
                let ba = engine.calculate_relation(b, a);
                assert_eq!(ab.total_score, ba.total_score);
                assert_eq!(ab.shared_tags, ba.shared_tags);
                assert!((0.0..=1.0).contains(&ab.total_score));
                assert!((0.0..=1.0).contains(&ab.topic_similarity));
                assert!((0.0..=1.0).contains(&ab.key_point_similarity));
            }
        }
    }

    #[test]
    fn self_relation_scores_one() {
        let a = article("a", "RWA tokenization", &["RWA"], &["RWA needs redemption"]);
        let relation = discovery(vec![]).calculate_relation(&a, &a);
        assert!((relation.total_score - 1.0).abs() < 1e-9);
        assert!(relation.types.contains(&RelationType::SimilarTitle));
        assert!(relation.types.contains(&RelationType::RelatedViewpoint));
    }

    #[test]
    fn key_point_similarity_needs_both_sides() {
        let a = article("a", "x", &[], &["RWA needs redemption"]);
        let b = article("b", "y", &[], &[]);
        let relation = discovery(vec![]).calculate_relation(&a, &b);
        assert_eq!(relation.key_point_similarity, 0.0);
        assert_eq!(relation.total_score, 0.0);
    }

    #[test]
    fn category_and_recency_labels() {
        let when = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let mut a = article("a", "RWA funds", &["RWA"], &[]);
        let mut b = article("b", "RWA funds grow", &["RWA"], &[]);
        a.category = Some("Finance".into());
        b.category = Some("finance".into());
        a.saved_at = Some(when);
        b.saved_at = Some(when + Duration::days(7));

        let relation = discovery(vec![]).calculate_relation(&a, &b);
        assert!(relation.types.contains(&RelationType::SameCategory));
        assert!(relation.types.contains(&RelationType::RecentlyRelated));

        b.saved_at = Some(when + Duration::days(8));
        let relation = discovery(vec![]).calculate_relation(&a, &b);
        assert!(!relation.types.contains(&RelationType::RecentlyRelated));

        b.saved_at = None;
        let relation = discovery(vec![]).calculate_relation(&a, &b);
        assert!(!relation.types.contains(&RelationType::RecentlyRelated));
    }

    #[test]
    fn graph_has_every_node_and_sorted_edges() {
        let engine = discovery(vec![
            article("a", "RWA tokenization", &["RWA", "DeFi"], &[]),
            article("b", "RWA tokenization guide", &["RWA", "DeFi"], &[]),
            article("c", "RWA basics", &["RWA"], &[]),
            article("d", "Weather", &["Life"], &[]),
        ]);
        let graph = engine.build_connection_graph(0.2);
        assert_eq!(graph.adjacency.len(), 4);
        assert!(graph.connections("d").is_empty());

        let edges = graph.connections("a");
        assert_eq!(edges[0].target_id, "b");
        assert!(edges.windows(2).all(|w| w[0].score >= w[1].score));
        assert!(graph.edge_count() >= 2);
    }

    #[test]
    fn graph_threshold_filters_edges() {
        let engine = discovery(scenario());
        assert_eq!(engine.build_connection_graph(1.1).edge_count(), 0);
    }

    #[test]
    fn clusters_have_at_least_two_members() {
        let engine = discovery(vec![
            article("a", "RWA tokenization", &["RWA", "DeFi"], &["Tokens need redemption"]),
            article("b", "RWA tokenization guide", &["RWA", "DeFi"], &["Tokens need redemption"]),
            article("c", "AI trading", &["AI"], &["Models automate trading"]),
            article("d", "AI trading bots", &["AI"], &["Models automate trading"]),
            article("e", "Gardening", &["Life"], &[]),
        ]);
        let clusters = engine.find_clusters();
        assert_eq!(clusters.len(), 2);
        assert!(clusters.iter().all(|c| c.articles.len() >= 2));
        assert_eq!(clusters[0].shared_tags, vec!["defi", "rwa"]);
        assert!(
            clusters
                .iter()
                .all(|c| c.articles.iter().all(|a| a.id != "e"))
        );
    }

    #[test]
    fn unrelated_corpus_has_no_clusters() {
        let engine = discovery(vec![
            article("a", "Alpha", &["x"], &[]),
            article("b", "Beta", &["y"], &[]),
        ]);
        assert!(engine.find_clusters().is_empty());
    }

    #[test]
    fn new_article_preview_skips_same_id() {
        let engine = discovery(scenario());
        let candidate = article("a", "RWA tokenization", &["RWA"], &["RWA needs redemption"]);
        let connections = engine.find_connections_for_new_article(&candidate);
        assert!(connections.iter().all(|c| c.target_id != "a"));
        assert_eq!(connections[0].target_id, "b");
        assert!(connections.iter().all(|c| c.score > NEW_ARTICLE_MIN_SCORE));
    }

    #[test]
    fn relation_types_serialize_as_labels() {
        let json = serde_json::to_string(&RelationType::CommonTheme).unwrap();
        assert_eq!(json, "\"common theme\"");
        assert_eq!(RelationType::RecentlyRelated.to_string(), "recently related");
    }
}
