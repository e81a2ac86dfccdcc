//! Implementation of `ki status`.

use std::{path::PathBuf, process::ExitCode};

use ki_config::{ConfigWarning, discover_config_files};
use ki_index::{IndexStats, SemanticSearch};
use serde::Serialize;

use crate::cli::{
    context::CommandContext,
    output::{dim, print_json, subheader, warning},
};

/// A corpus file and whether it exists.
#[derive(Serialize)]
struct CorpusFile {
    /// Resolved path.
    path: PathBuf,
    /// Whether the file exists.
    exists: bool,
}

/// What was loaded from the corpus.
#[derive(Serialize)]
struct CorpusSummary {
    /// Articles loaded.
    articles: usize,
    /// Articles with a timestamp.
    dated: usize,
    /// Distinct tags.
    tags: usize,
    /// Search index size.
    index: IndexStats,
}

/// Everything `ki status` reports.
#[derive(Serialize)]
struct Status {
    /// Config files, highest precedence first.
    config_files: Vec<PathBuf>,
    /// Corpus files in effect.
    corpus: Vec<CorpusFile>,
    /// Loaded corpus, when every file could be read.
    #[serde(skip_serializing_if = "Option::is_none")]
    loaded: Option<CorpusSummary>,
    /// Configuration warnings.
    warnings: Vec<String>,
}

/// Shows configuration files, corpus files, index size and validation warnings.
pub fn run(ctx: &mut CommandContext) -> ExitCode {
    let config_files = discover_config_files(&ctx.cwd);
    if config_files.is_empty() && ctx.corpus_paths().is_empty() {
        if ctx.json {
            return print_json(&Status {
                config_files,
                corpus: Vec::new(),
                loaded: None,
                warnings: Vec::new(),
            });
        }
        println!("{}", dim("No configuration files found."));
        println!();
        println!(
            "Run {} to create a configuration file.",
            subheader("ki init")
        );
        return ExitCode::SUCCESS;
    }

    let corpus: Vec<CorpusFile> = ctx
        .corpus_paths()
        .iter()
        .map(|path| CorpusFile {
            path: path.clone(),
            exists: path.is_file(),
        })
        .collect();
    let has_corpus = !corpus.is_empty();

    let warnings: Vec<ConfigWarning> = ctx
        .config
        .validate()
        .into_iter()
        .filter(|w| !(has_corpus && *w == ConfigWarning::NoCorpusDefined))
        .collect();

    let loaded = if has_corpus && corpus.iter().all(|f| f.exists) {
        match summarize(ctx) {
            Ok(summary) => Some(summary),
            Err(code) => return code,
        }
    } else {
        None
    };

    let status = Status {
        config_files,
        corpus,
        loaded,
        warnings: warnings.iter().map(ToString::to_string).collect(),
    };
    if ctx.json {
        let code = print_json(&status);
        if status.warnings.is_empty() {
            return code;
        }
        return ExitCode::FAILURE;
    }

    print_status(&status);
    print_hints(&warnings);
    if status.warnings.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Loads and indexes the corpus to report its size.
fn summarize(ctx: &mut CommandContext) -> Result<CorpusSummary, ExitCode> {
    let corpus = ctx.corpus()?;
    let index = SemanticSearch::from_corpus(&corpus)
        .map(|search| search.stats())
        .map_err(|e| {
            eprintln!("error: failed to build search index: {e}");
            ExitCode::FAILURE
        })?;

    Ok(CorpusSummary {
        articles: corpus.len(),
        dated: corpus.iter().filter(|a| a.saved_at.is_some()).count(),
        tags: corpus.tags().len(),
        index,
    })
}

/// Renders the status report.
fn print_status(status: &Status) {
    println!("{}", subheader("Config files:"));
    if status.config_files.is_empty() {
        println!("   {}", dim("(none)"));
    }
    for path in &status.config_files {
        println!("   {}", path.display());
    }
    println!();

    println!("{}", subheader("Corpus:"));
    if status.corpus.is_empty() {
        println!("   {}", dim("(none defined)"));
    }
    for file in &status.corpus {
        if file.exists {
            println!("   {}", file.path.display());
        } else {
            println!("   {} {}", file.path.display(), warning("[missing]"));
        }
    }
    println!();

    if let Some(loaded) = &status.loaded {
        println!("{}", subheader("Articles:"));
        println!(
            "   {} articles, {} dated, {} distinct tags",
            loaded.articles, loaded.dated, loaded.tags
        );
        println!(
            "   {}",
            dim(&format!(
                "index: {} documents, {} terms",
                loaded.index.documents, loaded.index.vocabulary
            ))
        );
        println!();
    }

    if status.warnings.is_empty() {
        println!("No issues found.");
        return;
    }

    println!(
        "{}",
        subheader(&format!("Warnings ({}):", status.warnings.len()))
    );
    for w in &status.warnings {
        println!("   {}", warning(w));
    }
    println!();
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    let mut hints: Vec<&str> = warnings
        .iter()
        .map(|w| match w {
            ConfigWarning::NoCorpusDefined => "Hint: set corpus = \"articles.json\" in .ki.toml",
            ConfigWarning::CorpusFileMissing { .. } | ConfigWarning::CorpusPathNotFile { .. } => {
                "Hint: corpus paths are relative to the .ki.toml that declares them"
            }
            ConfigWarning::SettingOutOfRange { .. } => "Hint: run 'ki config' to see effective values",
        })
        .collect();
    hints.sort_unstable();
    hints.dedup();

    for hint in hints {
        println!("{}", dim(hint));
    }
}
