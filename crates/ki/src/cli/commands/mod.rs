//! Command implementations and dispatch.

pub mod ask;
pub mod config;
pub mod connections;
pub mod init;
pub mod insights;
pub mod keywords;
pub mod search;
pub mod similar;
pub mod status;
pub mod topics;
pub mod trends;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &mut CommandContext) -> ExitCode {
    match command {
        Commands::Search(cmd) => search::run(ctx, &cmd),
        Commands::Similar(cmd) => similar::run(ctx, &cmd),
        Commands::Topics => topics::run(ctx),
        Commands::Trend(cmd) => trends::trend(ctx, &cmd),
        Commands::Hot(cmd) => trends::hot(ctx, &cmd),
        Commands::Emerging => trends::emerging(ctx),
        Commands::Connections(cmd) => connections::run(ctx, &cmd),
        Commands::Clusters => connections::clusters(ctx),
        Commands::Insights { what } => insights::run(ctx, &what),
        Commands::Ask(cmd) => ask::run(ctx, &cmd),
        Commands::Keywords(cmd) => keywords::run(ctx, &cmd),
        Commands::Init(cmd) => init::run(ctx, &cmd),
        Commands::Config => config::run(ctx),
        Commands::Status => status::run(ctx),
    }
}
