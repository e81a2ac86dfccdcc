//! Configuration file discovery.
//!
//! Collects `.ki.toml` files from the working directory upward, then the global
//! `~/.ki.toml`, unless a `root = true` file cuts the search short.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::parse::is_root_config;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".ki.toml";

/// Discovers all configuration files relevant to `cwd`.
///
/// Paths come back highest precedence first: the file closest to `cwd`, then
/// its ancestors, then `~/.ki.toml`.
pub fn discover_config_files(cwd: &Path) -> Vec<PathBuf> {
    discover_with_global(cwd, global_config_path().as_deref())
}

/// Discovery with an explicit global config location.
fn discover_with_global(cwd: &Path, global: Option<&Path>) -> Vec<PathBuf> {
    let mut configs = Vec::new();

    for dir in cwd.ancestors() {
        let candidate = dir.join(CONFIG_FILENAME);
        if !candidate.is_file() {
            continue;
        }
        let stop = is_root_config(&candidate);
        configs.push(candidate);
        if stop {
            return configs;
        }
    }

    if let Some(global) = global
        && global.is_file()
        && !configs.iter().any(|c| c == global)
    {
        configs.push(global.to_path_buf());
    }

    configs
}

/// Returns the path to the global configuration file (`~/.ki.toml`).
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

/// Checks if a path is the global configuration file.
pub fn is_global_config(path: &Path) -> bool {
    global_config_path().is_some_and(|global| path == global)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Workspace;

    #[test]
    fn no_configs_found() {
        let dir = Workspace::new();
        let cwd = dir.dir("a/b");
        assert!(discover_with_global(&cwd, None).is_empty());
    }

    #[test]
    fn closest_config_comes_first() {
        let dir = Workspace::new();
        let outer = dir.config("");
        let inner = dir.config("a/b");
        let cwd = dir.dir("a/b/c");

        let found: Vec<_> = discover_with_global(&cwd, None)
            .into_iter()
            .filter(|p| p.starts_with(dir.path()))
            .collect();
        assert_eq!(found, vec![inner, outer]);
    }

    #[test]
    fn root_config_stops_the_walk() {
        let dir = Workspace::new();
        dir.config("");
        let root = dir.root_config("project");
        let cwd = dir.dir("project/src");
        let global = dir.config("home");

        let found = discover_with_global(&cwd, Some(&global));
        assert_eq!(found, vec![root]);
    }

    #[test]
    fn global_config_comes_last() {
        let dir = Workspace::new();
        let local = dir.config("work/project");
        let global = dir.config("home");

        let found = discover_with_global(local.parent().unwrap(), Some(&global));
        assert_eq!(found.first(), Some(&local));
        assert_eq!(found.last(), Some(&global));
    }

    #[test]
    fn missing_global_is_skipped() {
        let dir = Workspace::new();
        let cwd = dir.dir("a");
        let global = dir.path().join("nowhere").join(CONFIG_FILENAME);
        assert!(discover_with_global(&cwd, Some(&global)).is_empty());
    }
}
