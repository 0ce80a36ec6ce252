//! Whitespace tokenizer with punctuation splitting and stopword removal.
//!
//! Text is split on whitespace into tokens. Each token has its punctuation
//! (Unicode general category `P`) replaced by spaces, is trimmed and
//! lower-cased, then split again, so one token can yield several terms
//! (`"dar'ling"` gives `"dar"` and `"ling"`). Field positions count only the
//! terms that survive stopword filtering.

use crate::analysis::stopwords::StopwordSet;
use crate::config::FIRST_FIELD_POSITION;
use crate::index::posting::PostingId;
use crate::record::RawRecord;
use regex::Regex;
use std::borrow::Borrow;
use std::fmt;
use std::sync::LazyLock;

static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\p{P}").expect("valid punctuation pattern"));

/// A normalized, non-empty, punctuation-free, lower-case index term.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Term(String);

impl Term {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Term {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Term {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalize one whitespace-delimited token into zero or more terms.
pub fn normalize_token(token: &str) -> Vec<Term> {
    let cleaned = PUNCTUATION.replace_all(token, " ");
    let lowered = cleaned.trim().to_lowercase();
    lowered
        .split_whitespace()
        .map(|part| Term(part.to_string()))
        .collect()
}

/// All terms of a text, in order, before stopword filtering.
pub fn terms(text: &str) -> impl Iterator<Item = Term> + '_ {
    text.split_whitespace().flat_map(normalize_token)
}

/// Tokenize a record into `(term, posting)` pairs.
///
/// Stopwords are skipped without consuming a field position, so positions
/// run contiguously from 1 over the emitted terms.
pub fn tokenize(record: &RawRecord, stopwords: &StopwordSet) -> Vec<(Term, PostingId)> {
    let mut position = FIRST_FIELD_POSITION;
    let mut out = Vec::new();
    for term in terms(&record.text) {
        if stopwords.contains(term.as_str()) {
            continue;
        }
        let posting = PostingId::new(
            record.source_file.clone(),
            record.line_number.clone(),
            position,
        );
        out.push((term, posting));
        position += 1;
    }
    out
}
