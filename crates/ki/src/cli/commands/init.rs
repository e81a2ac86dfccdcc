//! Implementation of `ki init`.

use std::{fs, path::PathBuf, process::ExitCode};

use ki_config::{CONFIG_FILENAME, global_config_path, global_template, local_template};

use crate::cli::{
    args::InitCommand,
    context::CommandContext,
    output::{dim, subheader},
};

/// Where `ki init` writes and what it writes there.
struct Target {
    /// Config file to create.
    path: PathBuf,
    /// Whether this is the global `~/.ki.toml`.
    global: bool,
}

impl Target {
    /// Picks the global file for `--global` or when run from the home
    /// directory, otherwise `.ki.toml` in the working directory.
    fn choose(ctx: &CommandContext, cmd: &InitCommand) -> Result<Self, ExitCode> {
        let global_path = global_config_path();
        let in_home = global_path
            .as_deref()
            .and_then(|p| p.parent())
            .is_some_and(|home| home == ctx.cwd.as_path());

        if !(cmd.global || in_home) {
            return Ok(Self {
                path: ctx.cwd.join(CONFIG_FILENAME),
                global: false,
            });
        }
        let Some(path) = global_path else {
            eprintln!("error: could not determine home directory");
            return Err(ExitCode::FAILURE);
        };
        Ok(Self { path, global: true })
    }

    /// Template contents for this target.
    fn template(&self) -> String {
        if self.global {
            global_template()
        } else {
            local_template()
        }
    }
}

/// Writes a commented `.ki.toml` template and shows it.
pub fn run(ctx: &CommandContext, cmd: &InitCommand) -> ExitCode {
    let target = match Target::choose(ctx, cmd) {
        Ok(t) => t,
        Err(code) => return code,
    };

    if target.path.exists() && !cmd.force {
        eprintln!(
            "error: configuration file already exists: {}",
            target.path.display()
        );
        eprintln!("use --force to overwrite");
        return ExitCode::FAILURE;
    }

    let template = target.template();
    if let Err(e) = fs::write(&target.path, &template) {
        eprintln!("error: failed to write {}: {e}", target.path.display());
        return ExitCode::FAILURE;
    }

    println!("Created {}", target.path.display());
    println!();
    println!("{}", subheader("Configuration written:"));
    for line in template.lines() {
        println!("   {line}");
    }
    if !target.global {
        println!();
        println!(
            "{}",
            dim("Point `corpus` at your saved-articles JSON, then run `ki status`.")
        );
    }

    ExitCode::SUCCESS
}
