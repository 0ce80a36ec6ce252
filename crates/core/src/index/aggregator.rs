//! Folds all postings of one term into a single index record.

use crate::config::OUTPUT_KEY_VALUE_SEPARATOR;
use crate::error::IndexError;
use crate::index::posting::{PostingId, PostingList};
use std::fmt;
use std::str::FromStr;

/// One line of the inverted index: a term and every place it occurs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub term: String,
    pub postings: PostingList,
}

impl fmt::Display for IndexEntry {
    /// `<term>\t<posting>,<posting>,...`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.term, OUTPUT_KEY_VALUE_SEPARATOR, self.postings
        )
    }
}

impl FromStr for IndexEntry {
    type Err = IndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (term, postings) = s
            .split_once(OUTPUT_KEY_VALUE_SEPARATOR)
            .ok_or_else(|| IndexError::InvalidPosting(s.to_string()))?;
        Ok(Self {
            term: term.to_string(),
            postings: postings.parse()?,
        })
    }
}

/// Aggregate typed postings, keeping their delivery order.
pub fn aggregate<'a, I>(term: impl Into<String>, postings: I) -> IndexEntry
where
    I: IntoIterator<Item = &'a PostingId>,
{
    IndexEntry {
        term: term.into(),
        postings: postings.into_iter().collect(),
    }
}

/// Aggregate serialized postings as delivered by a string-typed grouping
/// stage. Empty values are skipped.
pub fn aggregate_serialized<I, S>(term: impl Into<String>, postings: I) -> IndexEntry
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut list = PostingList::new();
    for posting in postings {
        list.push_serialized(posting.as_ref());
    }
    IndexEntry {
        term: term.into(),
        postings: list,
    }
}
