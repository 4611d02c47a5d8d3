//! Integration tests for sequence frequency analysis (Sprint 2)
//!
//! Events go through the CSV reader so the grouping is checked end to end.

use senda::config::GeneratorConfig;
use senda::csv_input::{parse_events, read_corpus};
use senda::csv_output::{length_distribution_csv, EventsCsv, SequenceCsv};
use senda::generator::PathGenerator;
use senda::model::Corpus;
use senda::sequence::{length_distribution, summarize, SequenceFrequencyAnalyzer};
use std::io::Write;
use tempfile::NamedTempFile;

const EVENTS: &str = "\
id,event,date,pattern_base
2,A,2024-01-01,ACE
2,C,2024-01-05,ACE
2,E,2024-02-01,ACE
1,A,2024-01-03,ACE
1,C,2024-01-04,ACE
1,E,2024-01-09,ACE
3,A,2024-01-01,ADF
3,D,2024-01-02,ADF
";

fn corpus(content: &str) -> Corpus {
    Corpus::from_records(parse_events(content).unwrap()).unwrap()
}

#[test]
fn test_shared_sequence_from_csv() {
    let records = SequenceFrequencyAnalyzer::new().analyze(corpus(EVENTS).paths());

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].sequence, "A→C→E");
    assert_eq!(records[0].count, 2);
    assert_eq!(records[0].member_ids, vec![1, 2]);
    assert_eq!(records[0].length, 3);
    assert_eq!(records[1].sequence, "A→D");
}

#[test]
fn test_row_order_does_not_matter() {
    let mut lines: Vec<&str> = EVENTS.lines().collect();
    let header = lines.remove(0);
    lines.reverse();
    let shuffled = format!("{}\n{}\n", header, lines.join("\n"));

    let a = SequenceFrequencyAnalyzer::new().analyze(corpus(EVENTS).paths());
    let b = SequenceFrequencyAnalyzer::new().analyze(corpus(&shuffled).paths());
    assert_eq!(a, b);
}

#[test]
fn test_sequence_csv_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(EVENTS.as_bytes()).unwrap();

    let corpus = read_corpus(file.path()).unwrap();
    let records = SequenceFrequencyAnalyzer::new().analyze(corpus.paths());
    let csv = SequenceCsv::new(&records).to_csv();

    assert_eq!(
        csv,
        "sequence,count,ids,length\nA→C→E,2,\"1, 2\",3\nA→D,1,3,2\n"
    );
    assert_eq!(
        length_distribution_csv(&length_distribution(&records)),
        "length,count\n2,1\n3,2\n"
    );
}

#[test]
fn test_counts_cover_every_generated_id() {
    let config = GeneratorConfig {
        num_ids: 500,
        num_patterns: 4,
        seed: Some(21),
        ..GeneratorConfig::default()
    };
    let generated = PathGenerator::new(config).unwrap().generate().unwrap();

    let records = SequenceFrequencyAnalyzer::new().analyze(generated.corpus.paths());
    let total: usize = records.iter().map(|r| r.count).sum();
    assert_eq!(total, 500);
    assert!(records.windows(2).all(|w| w[0].count >= w[1].count));

    let summary = summarize(generated.corpus.paths(), &records);
    assert_eq!(summary.total_paths, 500);
    assert_eq!(summary.unique_sequences, records.len());
}

#[test]
fn test_generated_events_survive_csv_round_trip() {
    let config = GeneratorConfig {
        num_ids: 60,
        seed: Some(4),
        ..GeneratorConfig::default()
    };
    let generated = PathGenerator::new(config).unwrap().generate().unwrap();
    let reread = corpus(&EventsCsv::from_corpus(&generated.corpus).to_csv());

    let analyzer = SequenceFrequencyAnalyzer::new();
    assert_eq!(
        analyzer.analyze(generated.corpus.paths()),
        analyzer.analyze(reread.paths())
    );
}
