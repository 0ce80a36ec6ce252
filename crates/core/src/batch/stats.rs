//! Run statistics and their metrics counters.

use crate::error::IndexError;
use metrics::counter;
use serde::Serialize;

/// Diagnostic counters from one batch run.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct JobStats {
    /// Physical lines read from all inputs.
    pub records_read: usize,
    /// Records that parsed and went through `map`.
    pub records_mapped: usize,
    /// Lines rejected as malformed records.
    pub rejected_malformed: usize,
    /// Lines rejected because they were not valid UTF-8.
    pub rejected_encoding: usize,
    /// Key/value pairs emitted by the map phase.
    pub pairs_emitted: usize,
    /// Distinct keys reduced (= output lines).
    pub groups_reduced: usize,
}

impl JobStats {
    /// Total rejected lines.
    pub fn rejected(&self) -> usize {
        self.rejected_malformed + self.rejected_encoding
    }

    pub(crate) fn record_rejection(&mut self, job: &'static str, err: &IndexError) {
        match err {
            IndexError::Encoding { .. } => self.rejected_encoding += 1,
            _ => self.rejected_malformed += 1,
        }
        counter!(
            "lineindex_records_rejected_total",
            "job" => job,
            "reason" => err.reject_reason()
        )
        .increment(1);
    }

    pub(crate) fn publish(&self, job: &'static str) {
        counter!("lineindex_records_total", "job" => job).increment(self.records_read as u64);
        counter!("lineindex_pairs_emitted_total", "job" => job)
            .increment(self.pairs_emitted as u64);
        counter!("lineindex_groups_reduced_total", "job" => job)
            .increment(self.groups_reduced as u64);
    }
}
