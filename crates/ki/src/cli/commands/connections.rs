//! Implementations of `ki connections` and `ki clusters`.

use std::process::ExitCode;

use comfy_table::Cell;
use ki_analysis::{Cluster, Connection, ConnectionDiscovery, ConnectionGraph, RelationType};
use ki_article::Corpus;

use crate::cli::{
    args::ConnectionsCommand,
    context::CommandContext,
    output::{dim, header, score, subheader, table},
};

/// Joins relation labels for display.
fn relation_labels(types: &[RelationType]) -> String {
    types
        .iter()
        .map(|t| t.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Shows the connection graph, or one article's edges.
pub fn run(ctx: &mut CommandContext, cmd: &ConnectionsCommand) -> ExitCode {
    let min_score = cmd.min_score.unwrap_or(ctx.config.connections.min_score);
    let corpus = match ctx.corpus() {
        Ok(c) => c,
        Err(code) => return code,
    };

    let graph = ConnectionDiscovery::new(&corpus).build_connection_graph(min_score);

    let Some(id) = &cmd.id else {
        return ctx.emit(&graph, |graph| print_graph(graph, &corpus));
    };
    let Some(article) = corpus.get(id) else {
        eprintln!("error: no article with id '{id}'");
        return ExitCode::FAILURE;
    };

    let connections = graph.connections(id);
    ctx.emit(connections, |connections| {
        println!("{} {}", header(&article.title), dim(&format!("[{id}]")));
        print_connections(connections);
    })
}

/// Renders one article's edges as a table.
fn print_connections(connections: &[Connection]) {
    if connections.is_empty() {
        println!("{}", dim("No connections."));
        return;
    }

    let mut edges = table(&["Score", "Article", "ID", "Relations", "Shared tags"]);
    for connection in connections {
        edges.add_row(vec![
            Cell::new(score(connection.score)),
            Cell::new(&connection.title),
            Cell::new(&connection.target_id),
            Cell::new(relation_labels(&connection.relation_types)),
            Cell::new(connection.shared_tags.join(", ")),
        ]);
    }
    println!("{edges}");
}

/// Renders every undirected edge once.
fn print_graph(graph: &ConnectionGraph, corpus: &Corpus) {
    println!(
        "{}",
        subheader(&format!(
            "{} articles, {} connections",
            graph.adjacency.len(),
            graph.edge_count()
        ))
    );
    if graph.edge_count() == 0 {
        return;
    }

    let title = |id: &str| corpus.get(id).map_or_else(|| id.to_string(), |a| a.title.clone());
    let mut edges = table(&["Score", "Article", "Related article", "Relations"]);
    for (source, connections) in &graph.adjacency {
        for connection in connections.iter().filter(|c| source < &c.target_id) {
            edges.add_row(vec![
                Cell::new(score(connection.score)),
                Cell::new(title(source)),
                Cell::new(&connection.title),
                Cell::new(relation_labels(&connection.relation_types)),
            ]);
        }
    }
    println!("{edges}");
}

/// Lists groups of strongly connected articles.
pub fn clusters(ctx: &mut CommandContext) -> ExitCode {
    let corpus = match ctx.corpus() {
        Ok(c) => c,
        Err(code) => return code,
    };

    let clusters = ConnectionDiscovery::new(&corpus).find_clusters();
    ctx.emit(clusters.as_slice(), print_clusters)
}

/// Renders clusters with their members.
pub fn print_clusters(clusters: &[Cluster]) {
    if clusters.is_empty() {
        println!("{}", dim("No clusters found."));
        return;
    }

    for (n, cluster) in clusters.iter().enumerate() {
        println!(
            "{} {}",
            header(&format!("Cluster {}", n + 1)),
            dim(&format!("({} articles)", cluster.articles.len()))
        );
        if !cluster.shared_tags.is_empty() {
            println!("   {}", dim(&format!("tags: {}", cluster.shared_tags.join(", "))));
        }
        for article in &cluster.articles {
            println!("   {} {}", article.title, dim(&format!("[{}]", article.id)));
        }
        println!();
    }
}
