//! Configuration for lineindex.
//!
//! Record formats, separators and defaults are compile-time constants.
//! Per-run settings live in [`IndexConfig`], which the CLI reads from a
//! JSON file and then overrides with command-line flags and environment
//! variables.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Separator between the line number and the body of an input record.
pub const RECORD_FIELD_SEPARATOR: char = ' ';

/// Separator between the fields of a posting (`file:line:position`).
pub const POSTING_FIELD_SEPARATOR: char = ':';

/// Separator between postings inside a posting list.
pub const POSTING_LIST_SEPARATOR: char = ',';

/// Separator between key and value in an output record.
pub const OUTPUT_KEY_VALUE_SEPARATOR: char = '\t';

/// First field position assigned within a record.
pub const FIRST_FIELD_POSITION: u32 = 1;

/// Terms shorter than this (in characters) are dropped by the word count job.
pub const WORD_COUNT_MIN_TERM_LEN: usize = 3;

/// Number of standard deviations above the mean a term count must exceed
/// to be suggested as a stopword.
pub const STOPWORD_SUGGESTION_SIGMAS: f64 = 3.0;

/// Environment variable naming a stopword file when no flag or config does.
pub const STOPWORDS_ENV_VAR: &str = "LINEINDEX_STOPWORDS";

/// Default worker count. 0 = let the thread pool pick one per core.
pub const DEFAULT_WORKERS: usize = 0;

/// Built-in English stopword list.
///
/// Kept verbatim, including the capitalized `"I"`: matching is exact, so
/// that entry never filters a lower-cased term.
pub const EMBEDDED_STOPWORDS: &[&str] = &[
    "I", "a", "about", "an", "are", "as", "at", "be", "by", "com", "for", "from", "how", "in",
    "is", "it", "of", "on", "or", "that", "the", "this", "to", "was", "what", "when", "where",
    "who", "will", "with", "www",
];

/// Where a task's stopword list comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum StopwordSource {
    /// No filtering.
    #[default]
    None,
    /// [`EMBEDDED_STOPWORDS`].
    Embedded,
    /// An external resource, one stopword per line.
    File(PathBuf),
    /// A literal list.
    Inline(Vec<String>),
}

/// Runtime settings for one indexing or word count run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Stopword list used by the tokenizer.
    pub stopwords: StopwordSource,
    /// Fail with a configuration error when a stopword file is missing,
    /// instead of indexing without filtering.
    pub strict_stopwords: bool,
    /// Worker threads for the map and reduce phases.
    pub workers: usize,
}

impl IndexConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
