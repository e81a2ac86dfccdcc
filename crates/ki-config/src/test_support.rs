//! Filesystem fixtures for ki-config unit tests.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use crate::discovery::CONFIG_FILENAME;

/// A scratch workspace of directories, corpus files and `.ki.toml` files.
pub struct Workspace(TempDir);

impl Workspace {
    /// An empty workspace, removed on drop.
    pub fn new() -> Self {
        Self(tempfile::tempdir().unwrap())
    }

    /// Workspace root.
    pub fn path(&self) -> &Path {
        self.0.path()
    }

    /// Ensures `rel` exists as a directory and returns it.
    pub fn dir(&self, rel: &str) -> PathBuf {
        let path = self.path().join(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// An article file holding an empty list.
    pub fn corpus_file(&self, rel: &str) -> PathBuf {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, "[]").unwrap();
        path
    }

    /// A `.ki.toml` in `rel` holding `content`.
    pub fn config_with(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.dir(rel).join(CONFIG_FILENAME);
        fs::write(&path, content).unwrap();
        path
    }

    /// A comment-only `.ki.toml` in `rel`.
    pub fn config(&self, rel: &str) -> PathBuf {
        self.config_with(rel, "# scratch\n")
    }

    /// A `.ki.toml` in `rel` that stops discovery.
    pub fn root_config(&self, rel: &str) -> PathBuf {
        self.config_with(rel, "root = true\n")
    }
}
