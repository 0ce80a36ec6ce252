//! The map/reduce seam between the indexing core and a batch substrate.

use crate::error::Result;
use crate::record::RawRecord;
use std::fmt;
use std::sync::Arc;

/// A two-phase batch job.
///
/// The substrate parses each input line with [`parse`](Job::parse), calls
/// [`map`](Job::map) on every record (in parallel, sharing `&self`), groups
/// the emitted pairs by key and calls [`reduce`](Job::reduce) exactly once per
/// key with all of that key's values.
pub trait Job: Sync {
    /// Value emitted by `map` and grouped per key.
    type Value: Send;
    /// One output record, written as a single line.
    type Output: fmt::Display + Send;

    /// Short name used in logs and metrics.
    fn name(&self) -> &'static str;

    /// Turn one decoded physical line into a record.
    ///
    /// The default expects `<lineNumber><space><text>`.
    fn parse(&self, source_file: &Arc<str>, line: usize, raw: &str) -> Result<RawRecord> {
        RawRecord::parse(source_file, line, raw)
    }

    fn map(&self, record: &RawRecord) -> Vec<(String, Self::Value)>;

    fn reduce(&self, key: String, values: Vec<Self::Value>) -> Self::Output;
}
