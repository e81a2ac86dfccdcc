//! Command-line interface for the `ki` knowledge intelligence tool.

use std::{io, process::ExitCode};

use clap::Parser;
use ki::cli::{
    CommandContext,
    args::{Cli, Commands},
    commands,
};
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "KI_LOG";

/// Installs a stderr log subscriber filtered by `KI_LOG`, defaulting to `warn`.
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let ctx = match cli.command {
        Commands::Init(_) => CommandContext::load_cwd_only(cli.json),
        _ => CommandContext::load(&cli.corpus, cli.json),
    };
    let mut ctx = match ctx {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    commands::run(cli.command, &mut ctx)
}
