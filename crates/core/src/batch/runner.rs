//! In-process batch substrate.
//!
//! Reads input splits sequentially, maps records on a rayon pool, groups
//! pairs by key in a `BTreeMap`, reduces groups on the same pool and writes
//! one line per group in key order. Values of a key keep the order of
//! (input split, line, emission), so a run is deterministic.

use crate::batch::input::InputSplit;
use crate::batch::job::Job;
use crate::batch::stats::JobStats;
use crate::config::DEFAULT_WORKERS;
use crate::error::{IndexError, Result};
use crate::record::{decode_line, RawRecord};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::io::Write;
use std::time::Instant;

/// Runs [`Job`]s over in-memory input splits.
#[derive(Debug, Clone)]
pub struct LocalRunner {
    workers: usize,
}

impl Default for LocalRunner {
    fn default() -> Self {
        Self::new(DEFAULT_WORKERS)
    }
}

impl LocalRunner {
    /// `workers` threads for the map and reduce phases; 0 = one per core.
    pub fn new(workers: usize) -> Self {
        Self { workers }
    }

    /// Run `job` over `inputs`, writing output lines to `sink`.
    ///
    /// Malformed and undecodable lines are skipped and counted in the
    /// returned stats. I/O errors on the sink abort the run.
    pub fn run<J, W>(&self, job: &J, inputs: &[InputSplit], sink: &mut W) -> Result<JobStats>
    where
        J: Job,
        W: Write,
    {
        let started = Instant::now();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()
            .map_err(|e| IndexError::Configuration(format!("cannot start worker pool: {e}")))?;

        let mut stats = JobStats::default();
        let records = read_records(job, inputs, &mut stats);
        stats.records_mapped = records.len();

        let mapped: Vec<Vec<(String, J::Value)>> =
            pool.install(|| records.par_iter().map(|r| job.map(r)).collect());

        let mut groups: BTreeMap<String, Vec<J::Value>> = BTreeMap::new();
        for (key, value) in mapped.into_iter().flatten() {
            stats.pairs_emitted += 1;
            groups.entry(key).or_default().push(value);
        }
        stats.groups_reduced = groups.len();

        let groups: Vec<(String, Vec<J::Value>)> = groups.into_iter().collect();
        let outputs: Vec<J::Output> = pool.install(|| {
            groups
                .into_par_iter()
                .map(|(key, values)| job.reduce(key, values))
                .collect()
        });

        for output in &outputs {
            writeln!(sink, "{output}")?;
        }
        sink.flush()?;

        stats.publish(job.name());
        tracing::info!(
            job = job.name(),
            inputs = inputs.len(),
            records = stats.records_mapped,
            rejected = stats.rejected(),
            pairs = stats.pairs_emitted,
            groups = stats.groups_reduced,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Job completed"
        );
        Ok(stats)
    }
}

fn read_records<J: Job>(job: &J, inputs: &[InputSplit], stats: &mut JobStats) -> Vec<RawRecord> {
    let mut records = Vec::new();
    for split in inputs {
        for (line, bytes) in split.lines() {
            stats.records_read += 1;
            let parsed = decode_line(&split.name, line, bytes)
                .and_then(|raw| job.parse(&split.name, line, raw));
            match parsed {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!(source_file = %split.name, line, "Skipping record: {}", e);
                    stats.record_rejection(job.name(), &e);
                }
            }
        }
    }
    records
}
