//! The inverted index as a batch job.

use crate::analysis::stopwords::{StopwordFilter, StopwordSet};
use crate::analysis::tokenizer::tokenize;
use crate::batch::job::Job;
use crate::error::Result;
use crate::index::aggregator::{aggregate, IndexEntry};
use crate::index::posting::PostingId;
use crate::record::RawRecord;
use std::sync::Arc;

/// Maps records to `(term, posting)` pairs and folds each term's postings
/// into one [`IndexEntry`].
#[derive(Debug, Clone)]
pub struct InvertedIndexJob {
    stopwords: Arc<StopwordSet>,
}

impl InvertedIndexJob {
    pub fn new(stopwords: Arc<StopwordSet>) -> Self {
        Self { stopwords }
    }

    /// Load the filter's stopwords once and build the job around them.
    pub fn from_filter(filter: &StopwordFilter) -> Result<Self> {
        Ok(Self::new(filter.load()?))
    }
}

impl Job for InvertedIndexJob {
    type Value = PostingId;
    type Output = IndexEntry;

    fn name(&self) -> &'static str {
        "inverted_index"
    }

    fn map(&self, record: &RawRecord) -> Vec<(String, PostingId)> {
        tokenize(record, &self.stopwords)
            .into_iter()
            .map(|(term, posting)| (term.into_string(), posting))
            .collect()
    }

    fn reduce(&self, key: String, values: Vec<PostingId>) -> IndexEntry {
        aggregate(key, &values)
    }
}
