//! Inverted index: postings, per-term aggregation, the batch job and an
//! in-memory index.

/// Folds a term's postings into one `IndexEntry`.
pub mod aggregator;
/// In-memory term → postings map.
pub mod inverted_index;
/// The inverted index as a `Job`.
pub mod job;
/// `PostingId` and `PostingList`.
pub mod posting;

pub use aggregator::{aggregate, aggregate_serialized, IndexEntry};
pub use inverted_index::InvertedIndex;
pub use job::InvertedIndexJob;
pub use posting::{PostingId, PostingList};
