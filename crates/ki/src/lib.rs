//! ki: knowledge intelligence over saved articles.
//!
//! Articles saved by trackers, news aggregators and the knowledge-base saver
//! are loaded from JSON, indexed with TF-IDF and analyzed for trends and
//! connections. The `ki` binary exposes search, "more like this", trend and
//! hot-topic reports, the connection graph, insight reports, and a rule-based
//! question answerer over that corpus.

#![warn(missing_docs)]

pub mod cli;
