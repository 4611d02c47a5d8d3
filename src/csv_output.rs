//! CSV output formats for corpora and analysis results
//!
//! Column layouts:
//! - events: `id,event,date,pattern_base`
//! - sequences: `sequence,count,ids,length`
//! - sequence lengths: `length,count`
//! - segments: `path_segment,frequency,avg_hours,min_hours,max_hours,std_hours,unique_ids`

use crate::model::{Corpus, EventRecord};
use crate::segment::SegmentStat;
use crate::sequence::{LengthBucket, SequenceRecord};

/// Escape CSV field (handle commas, quotes, newlines)
pub fn escape_field(field: &str) -> String {
    // If field contains comma, quote, or newline, wrap in quotes and escape quotes
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Events CSV formatter
#[derive(Debug, Default)]
pub struct EventsCsv {
    events: Vec<EventRecord>,
}

impl EventsCsv {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events of `corpus`, path by path
    pub fn from_corpus(corpus: &Corpus) -> Self {
        Self {
            events: corpus.records().cloned().collect(),
        }
    }

    pub fn add_event(&mut self, event: EventRecord) {
        self.events.push(event);
    }

    fn format_event(event: &EventRecord) -> String {
        let mut symbol = [0u8; 4];
        format!(
            "{},{},{},{}",
            event.id,
            escape_field(event.symbol.encode_utf8(&mut symbol)),
            event.timestamp.format("%Y-%m-%d"),
            escape_field(event.pattern_label.as_deref().unwrap_or(""))
        )
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> String {
        let mut output = String::from("id,event,date,pattern_base\n");
        for event in &self.events {
            output.push_str(&Self::format_event(event));
            output.push('\n');
        }
        output
    }
}

/// Sequence frequency CSV formatter
#[derive(Debug)]
pub struct SequenceCsv<'a> {
    records: &'a [SequenceRecord],
}

impl<'a> SequenceCsv<'a> {
    pub fn new(records: &'a [SequenceRecord]) -> Self {
        Self { records }
    }

    /// Member ids as `"1, 2, 3"`
    fn format_ids(ids: &[u64]) -> String {
        ids.iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn to_csv(&self) -> String {
        let mut output = String::from("sequence,count,ids,length\n");
        for record in self.records {
            output.push_str(&format!(
                "{},{},{},{}\n",
                escape_field(&record.sequence),
                record.count,
                escape_field(&Self::format_ids(&record.member_ids)),
                record.length
            ));
        }
        output
    }
}

/// Sequence length distribution CSV
pub fn length_distribution_csv(buckets: &[LengthBucket]) -> String {
    let mut output = String::from("length,count\n");
    for bucket in buckets {
        output.push_str(&format!("{},{}\n", bucket.length, bucket.count));
    }
    output
}

/// Segment timing CSV formatter (hours rounded to two decimals)
#[derive(Debug)]
pub struct SegmentCsv<'a> {
    stats: &'a [SegmentStat],
}

impl<'a> SegmentCsv<'a> {
    pub fn new(stats: &'a [SegmentStat]) -> Self {
        Self { stats }
    }

    fn format_stat(stat: &SegmentStat) -> String {
        let stat = stat.rounded();
        let std = stat
            .std_hours
            .map(|s| format!("{:.2}", s))
            .unwrap_or_default();
        format!(
            "{},{},{:.2},{:.2},{:.2},{},{}",
            escape_field(&stat.segment_label),
            stat.frequency,
            stat.mean_hours,
            stat.min_hours,
            stat.max_hours,
            std,
            stat.distinct_id_count
        )
    }

    pub fn to_csv(&self) -> String {
        let mut output = String::from(
            "path_segment,frequency,avg_hours,min_hours,max_hours,std_hours,unique_ids\n",
        );
        for stat in self.stats {
            output.push_str(&Self::format_stat(stat));
            output.push('\n');
        }
        output
    }
}
