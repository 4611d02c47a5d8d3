use crate::model::Path;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::info;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// One adjacent pair of events inside a path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    /// `"FROM-TO"`
    pub segment_label: String,
    pub duration_hours: f64,
    pub id: u64,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Aggregate timing for one segment label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentStat {
    pub segment_label: String,
    /// Occurrences across all ids and positions
    pub frequency: usize,
    pub mean_hours: f64,
    pub min_hours: f64,
    pub max_hours: f64,
    /// Sample standard deviation, `None` below two occurrences
    pub std_hours: Option<f64>,
    pub distinct_id_count: usize,
}

impl SegmentStat {
    /// Copy with every hour value rounded to two decimals
    pub fn rounded(&self) -> Self {
        Self {
            segment_label: self.segment_label.clone(),
            frequency: self.frequency,
            mean_hours: round2(self.mean_hours),
            min_hours: round2(self.min_hours),
            max_hours: round2(self.max_hours),
            std_hours: self.std_hours.map(round2),
            distinct_id_count: self.distinct_id_count,
        }
    }
}

/// Corpus-level totals over a list of segment stats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingSummary {
    pub unique_segments: usize,
    pub total_transitions: usize,
    /// Mean of the per-segment means
    pub average_hours: Option<f64>,
    pub min_hours: Option<f64>,
    pub max_hours: Option<f64>,
}

/// Round half away from zero to two decimals
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Adjacent-pair transitions of one path, in path order
///
/// A path with a single event has no transitions.
pub fn extract_transitions(path: &Path) -> Vec<Transition> {
    path.events()
        .windows(2)
        .map(|pair| {
            let (from, to) = (&pair[0], &pair[1]);
            let elapsed = to.timestamp - from.timestamp;
            Transition {
                segment_label: format!("{}-{}", from.symbol, to.symbol),
                duration_hours: elapsed.num_milliseconds() as f64 / MILLIS_PER_HOUR,
                id: path.id(),
                start: from.timestamp,
                end: to.timestamp,
            }
        })
        .collect()
}

#[derive(Debug, Default)]
struct Accumulator {
    durations: Vec<f64>,
    ids: BTreeSet<u64>,
}

impl Accumulator {
    fn finish(self, segment_label: String) -> SegmentStat {
        let n = self.durations.len();
        let min = self.durations.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self
            .durations
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        // Float summation can push the mean a hair outside [min, max]
        let mean = (self.durations.iter().sum::<f64>() / n as f64).clamp(min, max);

        let std = if n >= 2 {
            let squares: f64 = self.durations.iter().map(|d| (d - mean).powi(2)).sum();
            Some((squares / (n - 1) as f64).sqrt())
        } else {
            None
        };

        SegmentStat {
            segment_label,
            frequency: n,
            mean_hours: mean,
            min_hours: min,
            max_hours: max,
            std_hours: std,
            distinct_id_count: self.ids.len(),
        }
    }
}

/// Aggregates transition durations per segment label
#[derive(Debug, Clone, Copy, Default)]
pub struct TransitionTimingAnalyzer;

impl TransitionTimingAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Segment statistics over `paths`, ascending by label
    ///
    /// # Example
    /// ```
    /// use chrono::NaiveDate;
    /// use senda::model::{Corpus, EventRecord};
    /// use senda::segment::TransitionTimingAnalyzer;
    ///
    /// let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap().and_hms_opt(0, 0, 0).unwrap();
    /// let corpus = Corpus::from_records(vec![
    ///     EventRecord::new(1, 'A', day(1)),
    ///     EventRecord::new(1, 'C', day(2)),
    /// ]).unwrap();
    ///
    /// let stats = TransitionTimingAnalyzer::new().analyze(corpus.paths());
    /// assert_eq!(stats[0].segment_label, "A-C");
    /// assert_eq!(stats[0].mean_hours, 24.0);
    /// assert_eq!(stats[0].std_hours, None);
    /// ```
    pub fn analyze(&self, paths: &[Path]) -> Vec<SegmentStat> {
        let mut by_label: BTreeMap<String, Accumulator> = BTreeMap::new();
        let mut transitions = 0usize;

        for path in paths {
            for transition in extract_transitions(path) {
                let acc = by_label.entry(transition.segment_label).or_default();
                acc.durations.push(transition.duration_hours);
                acc.ids.insert(transition.id);
                transitions += 1;
            }
        }

        let stats: Vec<SegmentStat> = by_label
            .into_iter()
            .map(|(label, acc)| acc.finish(label))
            .collect();

        info!(
            paths = paths.len(),
            transitions,
            segments = stats.len(),
            "transition timing analysis complete"
        );
        stats
    }
}

/// Totals over `stats`; hour fields are `None` when `stats` is empty
pub fn summarize(stats: &[SegmentStat]) -> TimingSummary {
    let total_transitions = stats.iter().map(|s| s.frequency).sum();

    if stats.is_empty() {
        return TimingSummary {
            unique_segments: 0,
            total_transitions,
            average_hours: None,
            min_hours: None,
            max_hours: None,
        };
    }

    let average = stats.iter().map(|s| s.mean_hours).sum::<f64>() / stats.len() as f64;
    let min = stats.iter().map(|s| s.min_hours).fold(f64::INFINITY, f64::min);
    let max = stats
        .iter()
        .map(|s| s.max_hours)
        .fold(f64::NEG_INFINITY, f64::max);

    TimingSummary {
        unique_segments: stats.len(),
        total_transitions,
        average_hours: Some(average),
        min_hours: Some(min),
        max_hours: Some(max),
    }
}
