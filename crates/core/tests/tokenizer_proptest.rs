//! Property-based tests for the tokenizer, postings and aggregator.

use lineindex_core::analysis::{tokenize, StopwordSet};
use lineindex_core::index::{aggregate, PostingId};
use lineindex_core::record::RawRecord;
use proptest::prelude::*;
use regex::Regex;

/// Text mixing words, punctuation, symbols and assorted whitespace.
fn text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            "[A-Za-z]{1,8}",
            "[A-Za-z]{1,4}['.,;:!?-][A-Za-z]{1,4}",
            "[.,;:!?'\"()\\-]{1,3}",
            "[$+=<>0-9]{1,3}",
            "[ \t]{1,3}",
            "(É|ß|Ω|л)[a-z]{0,3}",
        ],
        0..24,
    )
    .prop_map(|parts| parts.join(" "))
}

fn stopword_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,3}", 0..6)
}

proptest! {
    #[test]
    fn terms_are_non_empty_and_punctuation_free(text in text_strategy()) {
        let punctuation = Regex::new(r"\p{P}").unwrap();
        let record = RawRecord::new("p.txt", "1", text);
        for (term, _) in tokenize(&record, &StopwordSet::empty()) {
            prop_assert!(!term.as_str().is_empty());
            prop_assert!(!punctuation.is_match(term.as_str()), "punctuation in {:?}", term);
            prop_assert!(!term.as_str().chars().any(char::is_whitespace));
        }
    }

    #[test]
    fn positions_are_contiguous_over_non_stopwords(
        text in text_strategy(),
        stopwords in stopword_strategy(),
    ) {
        let stopwords = StopwordSet::from_words(&stopwords);
        let record = RawRecord::new("p.txt", "9", text);
        let pairs = tokenize(&record, &stopwords);
        for (i, (term, posting)) in pairs.iter().enumerate() {
            prop_assert_eq!(posting.field_position as usize, i + 1);
            prop_assert!(!stopwords.contains(term.as_str()));
            prop_assert_eq!(posting.line_number.as_str(), "9");
        }
    }

    #[test]
    fn tokenize_is_idempotent(text in text_strategy(), stopwords in stopword_strategy()) {
        let stopwords = StopwordSet::from_words(&stopwords);
        let record = RawRecord::new("p.txt", "1", text);
        prop_assert_eq!(tokenize(&record, &stopwords), tokenize(&record, &stopwords));
    }

    #[test]
    fn posting_text_parses_back(
        file in "[a-z][a-z0-9_.:-]{0,12}",
        line in 0u32..100_000,
        position in 1u32..10_000,
    ) {
        let posting = PostingId::new(file.as_str(), line.to_string(), position);
        let parsed: PostingId = posting.to_string().parse().unwrap();
        prop_assert_eq!(parsed, posting);
    }

    #[test]
    fn aggregate_has_n_minus_one_commas(n in 0usize..50) {
        let postings: Vec<PostingId> = (0..n)
            .map(|i| PostingId::new("a.txt", (i + 1).to_string(), 1))
            .collect();
        let entry = aggregate("term", &postings);
        let list = entry.postings.as_str();
        prop_assert!(!list.starts_with(','));
        prop_assert_eq!(list.matches(',').count(), n.saturating_sub(1));
        prop_assert_eq!(entry.postings.len(), n);
    }
}
