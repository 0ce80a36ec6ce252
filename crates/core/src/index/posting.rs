//! Posting identifiers and serialized posting lists.
//!
//! A posting is written `<sourceFile>:<lineNumber>:<fieldPosition>`; a posting
//! list joins postings with `,`. Parsing splits a posting from the right, so
//! file names may contain `:`.

use crate::config::{POSTING_FIELD_SEPARATOR, POSTING_LIST_SEPARATOR};
use crate::error::IndexError;
use std::fmt::{self, Write};
use std::str::FromStr;
use std::sync::Arc;

/// One occurrence of a term: file, line and 1-based field position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostingId {
    pub source_file: Arc<str>,
    pub line_number: String,
    pub field_position: u32,
}

impl PostingId {
    pub fn new(
        source_file: impl Into<Arc<str>>,
        line_number: impl Into<String>,
        field_position: u32,
    ) -> Self {
        Self {
            source_file: source_file.into(),
            line_number: line_number.into(),
            field_position,
        }
    }
}

impl fmt::Display for PostingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}",
            self.source_file,
            self.line_number,
            self.field_position,
            sep = POSTING_FIELD_SEPARATOR
        )
    }
}

impl FromStr for PostingId {
    type Err = IndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || IndexError::InvalidPosting(s.to_string());
        let mut fields = s.rsplitn(3, POSTING_FIELD_SEPARATOR);
        let position = fields.next().ok_or_else(invalid)?;
        let line_number = fields.next().ok_or_else(invalid)?;
        let source_file = fields.next().ok_or_else(invalid)?;

        if source_file.is_empty()
            || line_number.is_empty()
            || !line_number.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        let field_position: u32 = position.parse().map_err(|_| invalid())?;
        if field_position == 0 {
            return Err(invalid());
        }

        Ok(Self::new(source_file, line_number, field_position))
    }
}

/// The serialized, comma-joined postings of one term, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostingList {
    serialized: String,
    len: usize,
}

impl PostingList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a posting.
    pub fn push(&mut self, posting: &PostingId) {
        self.separate();
        // Writing into a String cannot fail.
        let _ = write!(self.serialized, "{posting}");
        self.len += 1;
    }

    /// Append an already-serialized posting. Empty input is ignored.
    pub fn push_serialized(&mut self, posting: &str) {
        if posting.is_empty() {
            return;
        }
        self.separate();
        self.serialized.push_str(posting);
        self.len += 1;
    }

    fn separate(&mut self) {
        if self.len > 0 {
            self.serialized.push(POSTING_LIST_SEPARATOR);
        }
    }

    /// Number of postings in the list.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_str(&self) -> &str {
        &self.serialized
    }

    /// Iterate over the serialized postings.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.serialized
            .split(POSTING_LIST_SEPARATOR)
            .filter(|p| !p.is_empty())
    }

    /// Parse every posting back into a [`PostingId`].
    pub fn to_postings(&self) -> Result<Vec<PostingId>, IndexError> {
        self.iter().map(str::parse).collect()
    }
}

impl fmt::Display for PostingList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialized)
    }
}

impl FromStr for PostingList {
    type Err = IndexError;

    /// Parse a comma-joined list, validating every posting.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut list = PostingList::new();
        for posting in s.split(POSTING_LIST_SEPARATOR).filter(|p| !p.is_empty()) {
            posting.parse::<PostingId>()?;
            list.push_serialized(posting);
        }
        Ok(list)
    }
}

impl<'a> FromIterator<&'a PostingId> for PostingList {
    fn from_iter<I: IntoIterator<Item = &'a PostingId>>(iter: I) -> Self {
        let mut list = PostingList::new();
        for posting in iter {
            list.push(posting);
        }
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posting_display() {
        let p = PostingId::new("shakespeare.txt", "3", 2);
        assert_eq!(p.to_string(), "shakespeare.txt:3:2");
    }

    #[test]
    fn test_posting_parse() {
        let p: PostingId = "shakespeare.txt:3:2".parse().unwrap();
        assert_eq!(&*p.source_file, "shakespeare.txt");
        assert_eq!(p.line_number, "3");
        assert_eq!(p.field_position, 2);
    }

    #[test]
    fn test_posting_parse_file_with_colon() {
        let p: PostingId = "c:notes.txt:10:1".parse().unwrap();
        assert_eq!(&*p.source_file, "c:notes.txt");
        assert_eq!(p.line_number, "10");
        assert_eq!(p.to_string(), "c:notes.txt:10:1");
    }

    #[test]
    fn test_posting_parse_invalid() {
        for bad in ["", "a.txt", "a.txt:3", ":3:1", "a.txt::1", "a.txt:x:1", "a.txt:3:0", "a.txt:3:-1"] {
            assert!(bad.parse::<PostingId>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn test_list_push() {
        let mut list = PostingList::new();
        assert!(list.is_empty());
        assert_eq!(list.as_str(), "");
        list.push(&PostingId::new("a.txt", "1", 1));
        list.push(&PostingId::new("b.txt", "4", 2));
        assert_eq!(list.len(), 2);
        assert_eq!(list.as_str(), "a.txt:1:1,b.txt:4:2");
    }

    #[test]
    fn test_list_skips_empty_serialized() {
        let mut list = PostingList::new();
        list.push_serialized("");
        list.push_serialized("a.txt:1:1");
        list.push_serialized("");
        assert_eq!(list.len(), 1);
        assert_eq!(list.as_str(), "a.txt:1:1");
    }

    #[test]
    fn test_list_parse_and_back() {
        let list: PostingList = "a.txt:1:1,b.txt:4:2".parse().unwrap();
        assert_eq!(list.len(), 2);
        let postings = list.to_postings().unwrap();
        assert_eq!(postings[1], PostingId::new("b.txt", "4", 2));
        assert!("a.txt:1:1,garbage".parse::<PostingList>().is_err());
    }

    #[test]
    fn test_list_from_iter() {
        let postings = [PostingId::new("a.txt", "1", 1), PostingId::new("a.txt", "2", 1)];
        let list: PostingList = postings.iter().collect();
        assert_eq!(list.to_string(), "a.txt:1:1,a.txt:2:1");
    }
}
