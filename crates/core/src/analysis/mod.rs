//! Text analysis: token normalization and stopword filtering.
//!
//! The tokenizer is stateless; all shared state is the read-only
//! `StopwordSet` loaded once per task.

/// Stopword sets and the filter that loads them.
pub mod stopwords;
/// Punctuation-splitting, case-folding tokenizer.
pub mod tokenizer;

pub use stopwords::{StopwordFilter, StopwordSet};
pub use tokenizer::{normalize_token, terms, tokenize, Term};
