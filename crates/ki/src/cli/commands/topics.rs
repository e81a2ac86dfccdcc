//! Implementation of `ki topics`.

use std::process::ExitCode;

use ki_index::TopicCluster;

use crate::cli::{
    context::CommandContext,
    output::{dim, header},
};

/// Lists articles grouped by category.
pub fn run(ctx: &mut CommandContext) -> ExitCode {
    let search = match ctx.search() {
        Ok(s) => s,
        Err(code) => return code,
    };

    let clusters = search.cluster_by_topic();
    ctx.emit(clusters.as_slice(), print_clusters)
}

/// Renders category groups.
fn print_clusters(clusters: &[TopicCluster]) {
    if clusters.is_empty() {
        println!("{}", dim("No articles."));
        return;
    }

    for cluster in clusters {
        println!(
            "{} {}",
            header(&cluster.category),
            dim(&format!("({})", cluster.articles.len()))
        );
        for article in &cluster.articles {
            println!("   {} {}", article.title, dim(&format!("[{}]", article.id)));
        }
        println!();
    }
}
