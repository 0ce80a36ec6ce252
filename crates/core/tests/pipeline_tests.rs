use lineindex_core::analysis::{StopwordFilter, StopwordSet};
use lineindex_core::batch::{read_inputs, InputSplit, LocalRunner};
use lineindex_core::config::StopwordSource;
use lineindex_core::index::{IndexEntry, InvertedIndex, InvertedIndexJob, PostingId};
use lineindex_core::record::RawRecord;
use lineindex_core::wordcount::{suggest_stopwords, WordCountJob};
use lineindex_core::IndexError;
use std::collections::HashMap;
use std::fs;
use std::io::Cursor;
use std::sync::Arc;
use tempfile::TempDir;

const HAMLET: &str = "\
1 To be, or not to be: that is the question:
2 Whether 'tis nobler in the mind to suffer
3 The slings and arrows of outrageous fortune,
";

const SONNET: &str = "\
1 Shall I compare thee to a summer's day?
2 Thou art more lovely and more temperate:
";

fn write_corpus() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(dir.path().join("hamlet.txt"), HAMLET).unwrap();
    fs::write(dir.path().join("sonnet18.txt"), SONNET).unwrap();
    dir
}

fn run_index(job: &InvertedIndexJob, inputs: &[InputSplit]) -> String {
    let mut out: Vec<u8> = Vec::new();
    LocalRunner::new(4).run(job, inputs, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn parse_output(out: &str) -> HashMap<String, Vec<PostingId>> {
    out.lines()
        .map(|line| {
            let entry: IndexEntry = line.parse().unwrap();
            (entry.term, entry.postings.to_postings().unwrap())
        })
        .collect()
}

#[test]
fn test_index_directory() {
    let dir = write_corpus();
    let inputs = read_inputs(&[dir.path()]).unwrap();
    let job = InvertedIndexJob::new(Arc::new(StopwordSet::empty()));
    let index = parse_output(&run_index(&job, &inputs));

    let to: Vec<String> = index["to"].iter().map(|p| p.to_string()).collect();
    assert_eq!(
        to,
        vec![
            "hamlet.txt:1:1",
            "hamlet.txt:1:5",
            "hamlet.txt:2:7",
            "sonnet18.txt:1:5"
        ]
    );
    // "'tis" loses its apostrophe, "summer's" splits in two
    assert_eq!(index["tis"][0].to_string(), "hamlet.txt:2:2");
    assert_eq!(index["summer"][0].to_string(), "sonnet18.txt:1:7");
    assert_eq!(index["s"][0].to_string(), "sonnet18.txt:1:8");
    assert!(index.keys().all(|t| !t.is_empty()));
}

#[test]
fn test_index_output_is_sorted_and_well_formed() {
    let dir = write_corpus();
    let inputs = read_inputs(&[dir.path()]).unwrap();
    let job = InvertedIndexJob::new(Arc::new(StopwordSet::empty()));
    let out = run_index(&job, &inputs);

    let terms: Vec<&str> = out.lines().map(|l| l.split('\t').next().unwrap()).collect();
    let mut sorted = terms.clone();
    sorted.sort();
    assert_eq!(terms, sorted);

    for line in out.lines() {
        let (_, list) = line.split_once('\t').unwrap();
        assert!(!list.starts_with(','), "leading comma in {line:?}");
        assert!(!list.ends_with(','), "trailing comma in {line:?}");
        assert!(!list.contains(",,"), "empty posting in {line:?}");
    }
}

#[test]
fn test_stopword_file_shifts_positions() {
    let dir = write_corpus();
    let stop_path = dir.path().join("stop.txt");
    fs::write(&stop_path, "to\nthe\n\nbe\n").unwrap();
    let inputs = read_inputs(&[dir.path().join("hamlet.txt")]).unwrap();

    let filter = StopwordFilter::new(StopwordSource::File(stop_path), true);
    let job = InvertedIndexJob::from_filter(&filter).unwrap();
    let index = parse_output(&run_index(&job, &inputs));

    assert!(!index.contains_key("to"));
    assert!(!index.contains_key("the"));
    // "be" follows the blank line, so it is not a stopword
    assert_eq!(index["be"][0].to_string(), "hamlet.txt:1:1");
    assert_eq!(index["or"][0].to_string(), "hamlet.txt:1:2");
}

#[test]
fn test_strict_missing_stopwords_fails() {
    let dir = TempDir::new().unwrap();
    let filter = StopwordFilter::new(StopwordSource::File(dir.path().join("missing.txt")), true);
    let err = InvertedIndexJob::from_filter(&filter).unwrap_err();
    assert!(matches!(err, IndexError::Configuration(_)));
}

#[test]
fn test_malformed_and_undecodable_records_are_skipped() {
    let mut data = b"1 good line\nno-line-number\n\n".to_vec();
    data.extend_from_slice(b"4 bad \xff bytes\n5 last line\r\n");
    let inputs = vec![InputSplit::new("mixed.txt", data)];
    let job = InvertedIndexJob::new(Arc::new(StopwordSet::empty()));

    let mut out: Vec<u8> = Vec::new();
    let stats = LocalRunner::new(2).run(&job, &inputs, &mut out).unwrap();
    let out = String::from_utf8(out).unwrap();

    assert_eq!(stats.records_read, 5);
    assert_eq!(stats.records_mapped, 2);
    assert_eq!(stats.rejected_malformed, 2);
    assert_eq!(stats.rejected_encoding, 1);
    assert_eq!(
        out,
        "good\tmixed.txt:1:1\nlast\tmixed.txt:5:1\nline\tmixed.txt:1:2,mixed.txt:5:2\n"
    );
    assert!(!out.contains("bytes"));
}

#[test]
fn test_runs_are_deterministic() {
    let dir = write_corpus();
    let inputs = read_inputs(&[dir.path()]).unwrap();
    let job = InvertedIndexJob::from_filter(&StopwordFilter::new(StopwordSource::Embedded, false))
        .unwrap();
    let first = run_index(&job, &inputs);
    for workers in [1, 2, 8] {
        let mut out: Vec<u8> = Vec::new();
        LocalRunner::new(workers).run(&job, &inputs, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), first);
    }
}

#[test]
fn test_runner_matches_in_memory_index() {
    let job = InvertedIndexJob::new(Arc::new(StopwordSet::from_words(["the"])));
    let inputs = vec![InputSplit::new("hamlet.txt", HAMLET)];
    let batch = run_index(&job, &inputs);

    let mut index = InvertedIndex::with_stopwords(Arc::new(StopwordSet::from_words(["the"])));
    let file: Arc<str> = Arc::from("hamlet.txt");
    for (i, line) in HAMLET.lines().enumerate() {
        index.add_record(&RawRecord::parse(&file, i + 1, line).unwrap());
    }
    let memory: String = index
        .entries()
        .iter()
        .map(|e| format!("{e}\n"))
        .collect();
    assert_eq!(batch, memory);
}

#[test]
fn test_word_count_then_suggest_stopwords() {
    let mut text = String::new();
    for i in 0..40 {
        text.push_str(&format!("the word{i}\n"));
    }
    let inputs = vec![InputSplit::new("plain.txt", text)];
    let job = WordCountJob::new(Arc::new(StopwordSet::empty()));
    let mut out: Vec<u8> = Vec::new();
    LocalRunner::new(2).run(&job, &inputs, &mut out).unwrap();

    let counts = String::from_utf8(out).unwrap();
    assert!(counts.contains("the\t40\n"));
    assert!(counts.contains("word7\t1\n"));

    let suggested = suggest_stopwords(Cursor::new(counts)).unwrap();
    assert_eq!(suggested, vec!["the"]);
}

#[test]
fn test_output_written_to_file() {
    let dir = write_corpus();
    let inputs = read_inputs(&[dir.path().join("sonnet18.txt")]).unwrap();
    let job = InvertedIndexJob::new(Arc::new(StopwordSet::empty()));
    let out_path = dir.path().join("index.tsv");
    {
        let mut file = fs::File::create(&out_path).unwrap();
        LocalRunner::default().run(&job, &inputs, &mut file).unwrap();
    }
    let written = fs::read_to_string(&out_path).unwrap();
    assert!(written.contains("thou\tsonnet18.txt:2:1\n"));
    assert!(written.contains("more\tsonnet18.txt:2:3,sonnet18.txt:2:6\n"));
}
