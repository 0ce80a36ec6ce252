//! # lineindex-core
//!
//! Word-level inverted index over line-numbered text documents. Every
//! distinct normalized term maps to the list of `file:line:position`
//! locations where it occurs.
//!
//! The crate holds the indexing pipeline (record parsing, tokenization,
//! stopword filtering, posting aggregation) and a small in-process batch
//! runner that drives it: records are mapped in parallel, grouped by term
//! and each group is folded into one output line.

/// Text analysis: punctuation-splitting tokenizer and stopword sets.
pub mod analysis;
/// Local batch substrate: input splits, the `Job` trait and the runner.
pub mod batch;
/// Compile-time constants and the runtime `IndexConfig`.
pub mod config;
/// Error type shared by the whole pipeline.
pub mod error;
/// Postings, aggregation, the inverted index job and an in-memory index.
pub mod index;
/// Input record parsing and decoding.
pub mod record;
/// Term frequency job and stopword suggestion.
pub mod wordcount;

pub use error::{IndexError, Result};
