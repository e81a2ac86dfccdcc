//! Error types for the ki-index crate.

use thiserror::Error;

/// Errors that can occur when building or querying the vector index.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndexError {
    /// `fit` was called with no documents; IDF is undefined.
    #[error("cannot fit a vectorizer on an empty corpus")]
    EmptyCorpus,
}
