//! Implementation of `ki config`.

use std::{path::PathBuf, process::ExitCode};

use ki_config::{ConnectionSettings, QaSettings, SearchSettings, TrendSettings};
use serde::Serialize;

use crate::cli::{context::CommandContext, output::print_json};

/// JSON output for `ki config`.
#[derive(Serialize)]
struct JsonConfig<'a> {
    /// Corpus files in effect.
    corpus: &'a [PathBuf],
    /// `[search]`.
    search: &'a SearchSettings,
    /// `[trends]`.
    trends: &'a TrendSettings,
    /// `[connections]`.
    connections: &'a ConnectionSettings,
    /// `[qa]`.
    qa: &'a QaSettings,
}

/// Shows effective configuration settings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config = &ctx.config;
    if ctx.json {
        return print_json(&JsonConfig {
            corpus: &config.corpus,
            search: &config.search,
            trends: &config.trends,
            connections: &config.connections,
            qa: &config.qa,
        });
    }

    match config.settings_to_toml() {
        Ok(toml) => {
            print!("{toml}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to render configuration: {e}");
            ExitCode::FAILURE
        }
    }
}
