//! Error types for the ki-qa crate.

use ki_index::IndexError;
use thiserror::Error;

/// Errors that can occur when building a QA engine.
#[derive(Debug, Error)]
pub enum QaError {
    /// The search index could not be built.
    #[error(transparent)]
    Index(#[from] IndexError),

    /// A question pattern failed to compile.
    #[error("invalid question pattern: {0}")]
    Pattern(#[from] regex::Error),
}
