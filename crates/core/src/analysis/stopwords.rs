//! Stopword lists.
//!
//! A [`StopwordSet`] is built once per task by a [`StopwordFilter`] and then
//! shared read-only (behind an `Arc`) by every worker. Membership is exact
//! string equality against the loaded lines; candidates are not normalized
//! before lookup, so a list entry with capitals or punctuation never matches.

use crate::config::{IndexConfig, StopwordSource, EMBEDDED_STOPWORDS};
use crate::error::{IndexError, Result};
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

/// Immutable set of stopwords.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// A set that filters nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a set from literal words. Entries are trimmed; blank ones are dropped.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_string())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// Read a stopword resource: one word per line, trimmed, up to the first
    /// blank line or end of input.
    pub fn read<R: BufRead>(reader: R) -> io::Result<Self> {
        let mut words = HashSet::new();
        for line in reader.lines() {
            let line = line?;
            let word = line.trim();
            if word.is_empty() {
                break;
            }
            words.insert(word.to_string());
        }
        Ok(Self { words })
    }

    #[inline]
    pub fn contains(&self, term: &str) -> bool {
        self.words.contains(term)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Loads the stopword list named by a [`StopwordSource`].
#[derive(Debug, Clone, Default)]
pub struct StopwordFilter {
    source: StopwordSource,
    strict: bool,
}

impl StopwordFilter {
    /// `strict` turns a missing stopword file into a configuration error.
    pub fn new(source: StopwordSource, strict: bool) -> Self {
        Self { source, strict }
    }

    pub fn from_config(config: &IndexConfig) -> Self {
        Self::new(config.stopwords.clone(), config.strict_stopwords)
    }

    /// Load the list. Call once per task and share the result.
    pub fn load(&self) -> Result<Arc<StopwordSet>> {
        let set = match &self.source {
            StopwordSource::None => StopwordSet::empty(),
            StopwordSource::Embedded => StopwordSet::from_words(EMBEDDED_STOPWORDS),
            StopwordSource::Inline(words) => StopwordSet::from_words(words),
            StopwordSource::File(path) => self.load_file(path)?,
        };
        tracing::info!(source = ?self.source, count = set.len(), "Stopwords loaded");
        Ok(Arc::new(set))
    }

    fn load_file(&self, path: &Path) -> Result<StopwordSet> {
        match File::open(path) {
            Ok(file) => Ok(StopwordSet::read(BufReader::new(file))?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                if self.strict {
                    return Err(IndexError::Configuration(format!(
                        "stopword file {} not found",
                        path.display()
                    )));
                }
                tracing::warn!(
                    "Stopword file {} not found, indexing without stopwords",
                    path.display()
                );
                Ok(StopwordSet::empty())
            }
            Err(e) => Err(e.into()),
        }
    }
}
