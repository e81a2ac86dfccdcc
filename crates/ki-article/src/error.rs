//! Error types for loading articles.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur when loading articles from a provider.
#[derive(Debug, Error)]
pub enum ArticleError {
    /// Failed to read a corpus file.
    #[error("failed to read corpus file {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A corpus file is not a JSON article list.
    #[error("failed to parse corpus file {path}: {source}")]
    ParseJson {
        /// Path to the file that could not be parsed.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// A provider failed for a reason of its own.
    #[error("article provider failed: {0}")]
    Provider(String),
}
