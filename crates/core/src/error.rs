//! Error type shared by every stage of the indexing pipeline.

use std::io;
use thiserror::Error;

/// Errors raised while reading records, loading stopwords, parsing postings
/// or running a batch job.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The line lacks the `<lineNumber><space><text>` layout.
    #[error("malformed record at {source_file}:{line}: {reason}")]
    MalformedRecord {
        source_file: String,
        /// 1-based physical line within the input split.
        line: usize,
        reason: String,
    },
    #[error("configuration error: {0}")]
    Configuration(String),
    /// Input bytes that are not valid UTF-8.
    #[error("undecodable record at {source_file}:{line}")]
    Encoding { source_file: String, line: usize },
    #[error("invalid posting '{0}'")]
    InvalidPosting(String),
    /// A word count line that is not `<term>\t<count>`.
    #[error("invalid term count at line {line}: {reason}")]
    InvalidCount { line: usize, reason: String },
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl IndexError {
    /// Label used for the `reason` dimension of rejected-record metrics.
    pub fn reject_reason(&self) -> &'static str {
        match self {
            IndexError::MalformedRecord { .. } => "malformed",
            IndexError::Encoding { .. } => "encoding",
            _ => "other",
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, IndexError>;
