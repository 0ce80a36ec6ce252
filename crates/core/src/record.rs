//! Input records: one physical line of a line-numbered document.
//!
//! A line has the form `<lineNumber><space><text...>`. The source file name
//! is not part of the line; the batch substrate supplies it alongside.

use crate::config::RECORD_FIELD_SEPARATOR;
use crate::error::{IndexError, Result};
use std::sync::Arc;

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// Name of the file the line came from. Shared by every record of the file.
    pub source_file: Arc<str>,
    /// The leading line-number field, kept as written.
    pub line_number: String,
    /// Everything after the separator, trimmed.
    pub text: String,
}

impl RawRecord {
    pub fn new(
        source_file: impl Into<Arc<str>>,
        line_number: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            source_file: source_file.into(),
            line_number: line_number.into(),
            text: text.into(),
        }
    }

    /// Parse a decoded line. `line` is the 1-based physical line used in errors.
    pub fn parse(source_file: &Arc<str>, line: usize, raw: &str) -> Result<Self> {
        let malformed = |reason: &str| IndexError::MalformedRecord {
            source_file: source_file.to_string(),
            line,
            reason: reason.to_string(),
        };

        let (number, rest) = raw
            .split_once(RECORD_FIELD_SEPARATOR)
            .ok_or_else(|| malformed("missing separator after line number"))?;
        if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed("line number is not an unsigned integer"));
        }

        Ok(Self {
            source_file: Arc::clone(source_file),
            line_number: number.to_string(),
            text: rest.trim().to_string(),
        })
    }
}

/// Decode one physical line, dropping a trailing `\r`.
pub fn decode_line<'a>(source_file: &str, line: usize, bytes: &'a [u8]) -> Result<&'a str> {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    std::str::from_utf8(bytes).map_err(|_| IndexError::Encoding {
        source_file: source_file.to_string(),
        line,
    })
}
