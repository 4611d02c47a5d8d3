//! JSON output format for analysis results
//!
//! Field names follow the CSV column names so both formats read the same.

use crate::segment::{round2, SegmentStat, TimingSummary};
use crate::sequence::{LengthBucket, SequenceRecord, SequenceSummary};
use serde::{Deserialize, Serialize};

/// One distinct sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonSequence {
    pub sequence: String,
    pub count: usize,
    pub ids: Vec<u64>,
    pub length: usize,
}

impl From<&SequenceRecord> for JsonSequence {
    fn from(record: &SequenceRecord) -> Self {
        Self {
            sequence: record.sequence.clone(),
            count: record.count,
            ids: record.member_ids.clone(),
            length: record.length,
        }
    }
}

/// Root document for `senda sequences --format json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonSequenceReport {
    /// Format version identifier
    pub version: String,
    /// Format name
    pub format: String,
    pub summary: SequenceSummary,
    pub sequences: Vec<JsonSequence>,
    pub length_distribution: Vec<LengthBucket>,
}

impl JsonSequenceReport {
    pub fn new(
        summary: SequenceSummary,
        records: &[SequenceRecord],
        buckets: &[LengthBucket],
    ) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "senda-sequences-v1".to_string(),
            summary,
            sequences: records.iter().map(JsonSequence::from).collect(),
            length_distribution: buckets.to_vec(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Timing for one segment label, hours rounded to two decimals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonSegment {
    pub path_segment: String,
    pub frequency: usize,
    pub avg_hours: f64,
    pub min_hours: f64,
    pub max_hours: f64,
    /// `null` for single-occurrence segments
    pub std_hours: Option<f64>,
    pub unique_ids: usize,
}

impl From<&SegmentStat> for JsonSegment {
    fn from(stat: &SegmentStat) -> Self {
        let stat = stat.rounded();
        Self {
            path_segment: stat.segment_label,
            frequency: stat.frequency,
            avg_hours: stat.mean_hours,
            min_hours: stat.min_hours,
            max_hours: stat.max_hours,
            std_hours: stat.std_hours,
            unique_ids: stat.distinct_id_count,
        }
    }
}

/// Root document for `senda segments --format json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonSegmentReport {
    pub version: String,
    pub format: String,
    pub summary: TimingSummary,
    pub segments: Vec<JsonSegment>,
}

impl JsonSegmentReport {
    pub fn new(summary: TimingSummary, stats: &[SegmentStat]) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "senda-segments-v1".to_string(),
            summary: TimingSummary {
                average_hours: summary.average_hours.map(round2),
                min_hours: summary.min_hours.map(round2),
                max_hours: summary.max_hours.map(round2),
                ..summary
            },
            segments: stats.iter().map(JsonSegment::from).collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
