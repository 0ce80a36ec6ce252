//! Term frequency counting and stopword suggestion.
//!
//! [`WordCountJob`] counts normalized terms over plain text lines (no
//! line-number prefix). [`suggest_stopwords`] reads its output and returns
//! the terms whose count lies more than [`STOPWORD_SUGGESTION_SIGMAS`]
//! standard deviations above the mean, ready to be written out as a
//! stopword resource.

use crate::analysis::stopwords::{StopwordFilter, StopwordSet};
use crate::analysis::tokenizer::terms;
use crate::batch::job::Job;
use crate::config::{
    OUTPUT_KEY_VALUE_SEPARATOR, STOPWORD_SUGGESTION_SIGMAS, WORD_COUNT_MIN_TERM_LEN,
};
use crate::error::{IndexError, Result};
use crate::record::RawRecord;
use std::fmt;
use std::io::BufRead;
use std::str::FromStr;
use std::sync::Arc;

/// A term and how often it occurs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermCount {
    pub term: String,
    pub count: u64,
}

impl fmt::Display for TermCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.term, OUTPUT_KEY_VALUE_SEPARATOR, self.count)
    }
}

impl FromStr for TermCount {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (term, count) = s
            .split_once(OUTPUT_KEY_VALUE_SEPARATOR)
            .ok_or_else(|| "missing tab separator".to_string())?;
        if term.is_empty() {
            return Err("empty term".to_string());
        }
        let count = count
            .trim()
            .parse()
            .map_err(|e| format!("bad count '{count}': {e}"))?;
        Ok(Self {
            term: term.to_string(),
            count,
        })
    }
}

/// Counts terms of at least [`WORD_COUNT_MIN_TERM_LEN`] characters that are not stopwords.
#[derive(Debug, Clone)]
pub struct WordCountJob {
    stopwords: Arc<StopwordSet>,
}

impl WordCountJob {
    pub fn new(stopwords: Arc<StopwordSet>) -> Self {
        Self { stopwords }
    }

    pub fn from_filter(filter: &StopwordFilter) -> Result<Self> {
        Ok(Self::new(filter.load()?))
    }
}

impl Job for WordCountJob {
    type Value = u64;
    type Output = TermCount;

    fn name(&self) -> &'static str {
        "word_count"
    }

    /// Plain text: the whole line is the body, the physical line its number.
    fn parse(&self, source_file: &Arc<str>, line: usize, raw: &str) -> Result<RawRecord> {
        Ok(RawRecord::new(Arc::clone(source_file), line.to_string(), raw))
    }

    fn map(&self, record: &RawRecord) -> Vec<(String, u64)> {
        terms(&record.text)
            .filter(|t| t.as_str().chars().count() >= WORD_COUNT_MIN_TERM_LEN)
            .filter(|t| !self.stopwords.contains(t.as_str()))
            .map(|t| (t.into_string(), 1))
            .collect()
    }

    fn reduce(&self, key: String, values: Vec<u64>) -> TermCount {
        TermCount {
            term: key,
            count: values.iter().sum(),
        }
    }
}

/// Read `term\tcount` lines. Blank lines are skipped.
pub fn read_term_counts<R: BufRead>(reader: R) -> Result<Vec<TermCount>> {
    let mut counts = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let count = line
            .parse::<TermCount>()
            .map_err(|reason| IndexError::InvalidCount { line: i + 1, reason })?;
        counts.push(count);
    }
    Ok(counts)
}

/// Terms whose count is strictly above `mean + 3 * stddev` (population
/// standard deviation), in input order.
pub fn outlier_terms(counts: &[TermCount]) -> Vec<String> {
    if counts.is_empty() {
        return Vec::new();
    }
    let n = counts.len() as f64;
    let mean = counts.iter().map(|c| c.count as f64).sum::<f64>() / n;
    let variance = counts
        .iter()
        .map(|c| {
            let d = c.count as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    let threshold = mean + STOPWORD_SUGGESTION_SIGMAS * variance.sqrt();
    tracing::debug!(mean, stddev = variance.sqrt(), threshold, "Stopword threshold");

    counts
        .iter()
        .filter(|c| c.count as f64 > threshold)
        .map(|c| c.term.clone())
        .collect()
}

/// Read word count output and return the suggested stopwords.
pub fn suggest_stopwords<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let counts = read_term_counts(reader)?;
    let suggested = outlier_terms(&counts);
    tracing::info!(terms = counts.len(), suggested = suggested.len(), "Stopwords suggested");
    Ok(suggested)
}
