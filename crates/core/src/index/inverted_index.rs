//! In-memory inverted index.
//!
//! Maps terms to their postings for callers that index records directly
//! instead of going through a batch runner. Postings of a term are kept in
//! insertion order.

use crate::analysis::stopwords::StopwordSet;
use crate::analysis::tokenizer::tokenize;
use crate::index::aggregator::{aggregate, IndexEntry};
use crate::index::posting::PostingId;
use crate::record::RawRecord;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Inverted index mapping terms to postings.
///
/// Supports incremental record addition and removal of everything indexed
/// from one source file.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    /// term → postings, in insertion order
    index: HashMap<String, Vec<PostingId>>,
    /// Stopwords applied by `add_record`.
    stopwords: Arc<StopwordSet>,
    /// Records indexed per source file
    records_by_source: HashMap<Arc<str>, usize>,
    /// Total postings across all terms
    posting_count: usize,
}

impl InvertedIndex {
    /// Creates an empty index that filters nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty index that skips `stopwords`.
    pub fn with_stopwords(stopwords: Arc<StopwordSet>) -> Self {
        Self {
            stopwords,
            ..Self::default()
        }
    }

    /// Tokenize a record and append its postings.
    pub fn add_record(&mut self, record: &RawRecord) {
        let pairs = tokenize(record, &self.stopwords);
        self.posting_count += pairs.len();
        *self
            .records_by_source
            .entry(Arc::clone(&record.source_file))
            .or_default() += 1;
        for (term, posting) in pairs {
            self.index.entry(term.into_string()).or_default().push(posting);
        }
    }

    /// Remove every posting that points into `source_file`.
    pub fn remove_source(&mut self, source_file: &str) {
        let mut removed = 0;
        self.index.retain(|_, postings| {
            let before = postings.len();
            postings.retain(|p| &*p.source_file != source_file);
            removed += before - postings.len();
            !postings.is_empty()
        });
        self.posting_count -= removed;
        self.records_by_source.remove(source_file);
    }

    /// Postings of one term.
    pub fn get(&self, term: &str) -> Option<&[PostingId]> {
        self.index.get(term).map(Vec::as_slice)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.index.contains_key(term)
    }

    /// Number of distinct terms.
    pub fn term_count(&self) -> usize {
        self.index.len()
    }

    pub fn record_count(&self) -> usize {
        self.records_by_source.values().sum()
    }

    pub fn posting_count(&self) -> usize {
        self.posting_count
    }

    /// Aggregated entries, sorted by term.
    pub fn entries(&self) -> Vec<IndexEntry> {
        let sorted: BTreeMap<&str, &Vec<PostingId>> =
            self.index.iter().map(|(t, p)| (t.as_str(), p)).collect();
        sorted
            .into_iter()
            .map(|(term, postings)| aggregate(term, postings))
            .collect()
    }
}
