//! Article records and corpus loading for ki.
//!
//! Articles are produced by collaborator modules (trackers, news aggregators,
//! the knowledge-base saver) and arrive here as JSON. This crate provides:
//! - The [`Article`] record with lenient deserialization of optional fields
//! - The [`ArticleProvider`] trait through which callers inject article sources
//! - The immutable [`Corpus`] snapshot shared by every analysis engine

#![warn(missing_docs)]

mod article;
mod corpus;
mod error;
mod provider;
mod timestamp;

pub use article::{Article, ArticleRef, UNCATEGORIZED};
pub use corpus::Corpus;
pub use error::ArticleError;
pub use provider::{ArticleProvider, JsonFileProvider, parse_articles_str, read_articles_file};
pub use timestamp::parse_timestamp;
