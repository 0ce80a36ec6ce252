//! Local batch substrate: input splits, the job seam, the runner and its stats.
//!
//! The core only needs a substrate that splits input into records, groups
//! mapper output by key and sinks the reduced lines. `LocalRunner` is that
//! substrate for a single process.

/// Input files and record splitting.
pub mod input;
/// The `Job` trait implemented by every pipeline.
pub mod job;
/// Parallel map, ordered group-by and reduce.
pub mod runner;
/// Per-run counters.
pub mod stats;

pub use input::{expand_inputs, read_inputs, InputSplit};
pub use job::Job;
pub use runner::LocalRunner;
pub use stats::JobStats;
