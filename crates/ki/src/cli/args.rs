//! Clap argument definitions for the `ki` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "ki")]
#[command(about = "Knowledge intelligence - search and analysis for saved articles")]
pub struct Cli {
    /// Article files to load instead of the configured corpus
    #[arg(long, global = true, value_name = "FILE")]
    pub corpus: Vec<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments for `ki search`.
#[derive(Args, Debug, Clone)]
pub struct SearchCommand {
    /// Search query words
    #[arg(required = true)]
    pub query: Vec<String>,

    /// Maximum hits to return [default: 5]
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Drop hits scoring below this [default: 0.1]
    #[arg(long)]
    pub min_score: Option<f64>,

    /// Do not attach matching sentences to hits
    #[arg(long)]
    pub no_snippets: bool,
}

/// Arguments for `ki similar`.
#[derive(Args, Debug, Clone)]
pub struct SimilarCommand {
    /// Article ID
    pub id: String,

    /// Maximum articles to return [default: 5]
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

/// Arguments for `ki trend`.
#[derive(Args, Debug, Clone)]
pub struct TrendCommand {
    /// Tag or term to follow
    pub tag: String,
}

/// Arguments for `ki hot`.
#[derive(Args, Debug, Clone)]
pub struct HotCommand {
    /// Window in days [default: 7]
    #[arg(short = 'd', long)]
    pub days: Option<i64>,
}

/// Arguments for `ki connections`.
#[derive(Args, Debug, Clone)]
pub struct ConnectionsCommand {
    /// Only show connections of this article
    pub id: Option<String>,

    /// Minimum relation score for an edge [default: 0.2]
    #[arg(long)]
    pub min_score: Option<f64>,
}

/// Arguments for `ki ask`.
#[derive(Args, Debug, Clone)]
pub struct AskCommand {
    /// Question words
    #[arg(required = true)]
    pub question: Vec<String>,

    /// Topic of the previous question, for follow-ups
    #[arg(short = 'p', long)]
    pub previous_topic: Option<String>,

    /// Articles retrieved per question [default: 5]
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

/// Arguments for `ki keywords`.
#[derive(Args, Debug, Clone)]
pub struct KeywordsCommand {
    /// Article ID; ranks terms against the corpus
    #[arg(required_unless_present = "text", conflicts_with = "text")]
    pub id: Option<String>,

    /// Raw text to analyze instead of an article
    #[arg(long)]
    pub text: Option<String>,

    /// Maximum keywords to return
    #[arg(short = 'n', long, default_value = "10")]
    pub limit: usize,

    /// Also show the key sentences
    #[arg(short = 's', long)]
    pub sentences: bool,
}

/// Arguments for `ki init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.ki.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `ki` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Search articles by relevance to a query
    #[command(after_help = "\
EXAMPLES:
  ki search RWA tokenization
  ki search 穩定幣 -n 10
  ki search defi --min-score 0.2 --json")]
    Search(SearchCommand),

    /// Find articles similar to an article
    Similar(SimilarCommand),

    /// Group articles by category
    Topics,

    /// Show the timeline and trend of a tag
    Trend(TrendCommand),

    /// Most frequent tags in a recent window
    Hot(HotCommand),

    /// Tags growing faster than before
    Emerging,

    /// Show related articles
    Connections(ConnectionsCommand),

    /// Groups of strongly connected articles
    Clusters,

    /// Generate insight reports
    Insights {
        /// Which report
        #[command(subcommand)]
        what: InsightsWhat,
    },

    /// Answer a question from the saved articles
    #[command(after_help = "\
EXAMPLES:
  ki ask 什麼是 RWA？
  ki ask why does tokenization matter
  ki ask --previous-topic RWA 有哪些風險")]
    Ask(AskCommand),

    /// Extract keywords from an article or text
    Keywords(KeywordsCommand),

    /// Initialize ki configuration in current directory
    Init(InitCommand),

    /// Show effective configuration settings
    Config,

    /// Show configuration, corpus and index status
    Status,
}

/// Which report `ki insights` generates.
#[derive(Clone, Subcommand)]
pub enum InsightsWhat {
    /// Everything known about one tag
    Topic {
        /// Tag to summarize
        tag: String,
    },
    /// Clusters, strongest connections and hub articles
    Cross,
    /// Digest of the last seven days
    Weekly,
    /// Overview plus every other report
    Report,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use ki_config::{ConnectionSettings, QaSettings, SearchSettings, TrendSettings};

    use super::*;

    /// Gets help text for a subcommand's argument.
    fn get_arg_help(cmd: &clap::Command, subcmd: &str, arg: &str) -> String {
        cmd.get_subcommands()
            .find(|c| c.get_name() == subcmd)
            .and_then(|c| c.get_arguments().find(|a| a.get_id() == arg))
            .and_then(|a| a.get_help().map(|h| h.to_string()))
            .unwrap_or_default()
    }

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    /// Catches drift between config defaults and the help text.
    #[test]
    fn cli_help_defaults_match_settings() {
        let cmd = Cli::command();
        let cases = [
            ("search", "limit", SearchSettings::default().limit.to_string()),
            ("search", "min_score", SearchSettings::default().min_score.to_string()),
            ("similar", "limit", SearchSettings::default().limit.to_string()),
            ("hot", "days", TrendSettings::default().hot_days.to_string()),
            (
                "connections",
                "min_score",
                ConnectionSettings::default().min_score.to_string(),
            ),
            ("ask", "limit", QaSettings::default().limit.to_string()),
        ];

        for (subcmd, arg, default) in cases {
            let help = get_arg_help(&cmd, subcmd, arg);
            assert!(
                help.contains(&format!("[default: {default}]")),
                "{subcmd} --{arg} help should contain default {default}: {help}"
            );
        }
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from(["ki", "search", "rwa", "--json", "--corpus", "a.json"])
            .unwrap();
        assert!(cli.json);
        assert_eq!(cli.corpus, vec![PathBuf::from("a.json")]);
    }

    #[test]
    fn keywords_needs_id_or_text() {
        assert!(Cli::try_parse_from(["ki", "keywords"]).is_err());
        assert!(Cli::try_parse_from(["ki", "keywords", "a", "--text", "x"]).is_err());
        assert!(Cli::try_parse_from(["ki", "keywords", "--text", "x"]).is_ok());
    }
}
