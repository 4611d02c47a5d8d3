use crate::model::{Path, SEQUENCE_SEPARATOR};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::info;

/// One distinct symbol sequence and the ids that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceRecord {
    /// Symbols joined with the analyzer's separator (e.g. `"A→C→E"`)
    pub sequence: String,
    /// Number of distinct ids with this sequence
    pub count: usize,
    /// Those ids, ascending
    pub member_ids: Vec<u64>,
    /// Number of symbols in the sequence
    pub length: usize,
}

/// Total ids per sequence length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthBucket {
    pub length: usize,
    pub count: usize,
}

/// Corpus-level totals for a frequency analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceSummary {
    pub total_paths: usize,
    pub unique_sequences: usize,
}

/// Groups paths by identical symbol sequence
#[derive(Debug, Clone)]
pub struct SequenceFrequencyAnalyzer {
    separator: String,
}

impl SequenceFrequencyAnalyzer {
    pub fn new() -> Self {
        Self::with_separator(SEQUENCE_SEPARATOR)
    }

    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Count distinct sequences across `paths`
    ///
    /// `paths` must hold one path per id, as a [`Corpus`](crate::model::Corpus)
    /// guarantees; otherwise an id is counted once per path it appears in.
    ///
    /// # Example
    /// ```
    /// use chrono::NaiveDate;
    /// use senda::model::{Corpus, EventRecord};
    /// use senda::sequence::SequenceFrequencyAnalyzer;
    ///
    /// let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap().and_hms_opt(0, 0, 0).unwrap();
    /// let corpus = Corpus::from_records(vec![
    ///     EventRecord::new(2, 'A', day(1)),
    ///     EventRecord::new(2, 'C', day(2)),
    ///     EventRecord::new(1, 'A', day(1)),
    ///     EventRecord::new(1, 'C', day(3)),
    /// ]).unwrap();
    ///
    /// let records = SequenceFrequencyAnalyzer::new().analyze(corpus.paths());
    /// assert_eq!(records.len(), 1);
    /// assert_eq!(records[0].sequence, "A→C");
    /// assert_eq!(records[0].member_ids, vec![1, 2]);
    /// ```
    pub fn analyze(&self, paths: &[Path]) -> Vec<SequenceRecord> {
        // Groups in first-seen order, indexed by sequence string
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut groups: Vec<(String, usize, BTreeSet<u64>)> = Vec::new();

        for path in paths {
            let sequence = path.sequence_string(&self.separator);
            let slot = match index.get(&sequence) {
                Some(&slot) => slot,
                None => {
                    index.insert(sequence.clone(), groups.len());
                    groups.push((sequence, path.len(), BTreeSet::new()));
                    groups.len() - 1
                }
            };
            groups[slot].2.insert(path.id());
        }

        let mut records: Vec<SequenceRecord> = groups
            .into_iter()
            .map(|(sequence, length, ids)| SequenceRecord {
                sequence,
                count: ids.len(),
                member_ids: ids.into_iter().collect(),
                length,
            })
            .collect();

        // Stable sort keeps first-seen order among equal counts
        records.sort_by(|a, b| b.count.cmp(&a.count));

        info!(
            paths = paths.len(),
            unique_sequences = records.len(),
            "sequence frequency analysis complete"
        );
        records
    }
}

impl Default for SequenceFrequencyAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Sum of `count` per sequence length, ascending by length
pub fn length_distribution(records: &[SequenceRecord]) -> Vec<LengthBucket> {
    let mut buckets: BTreeMap<usize, usize> = BTreeMap::new();
    for record in records {
        *buckets.entry(record.length).or_insert(0) += record.count;
    }

    buckets
        .into_iter()
        .map(|(length, count)| LengthBucket { length, count })
        .collect()
}

/// Totals for the analyzed `paths` and their `records`
pub fn summarize(paths: &[Path], records: &[SequenceRecord]) -> SequenceSummary {
    SequenceSummary {
        total_paths: paths.len(),
        unique_sequences: records.len(),
    }
}
