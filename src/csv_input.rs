//! Events CSV reader
//!
//! Reads the `id,event,date[,pattern_base]` layout written by
//! [`crate::csv_output::EventsCsv`]. Columns may appear in any order and
//! unknown columns are ignored. Every problem aborts the read with the
//! offending line number.

use crate::error::{Result, SendaError};
use crate::model::{Corpus, EventRecord};
use chrono::{NaiveDate, NaiveDateTime};
use std::fs;
use std::path::Path;
use tracing::debug;

const REQUIRED_COLUMNS: [&str; 3] = ["id", "event", "date"];
const PATTERN_COLUMN: &str = "pattern_base";

/// Split one CSV line, honouring double-quoted fields and `""` escapes
pub fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if quoted => {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    quoted = false;
                }
            }
            '"' if field.is_empty() => quoted = true,
            ',' if !quoted => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}

/// Parse `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS` or `YYYY-MM-DD HH:MM:SS`
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

struct Columns {
    id: usize,
    event: usize,
    date: usize,
    pattern: Option<usize>,
}

impl Columns {
    fn from_header(header: &[String]) -> Result<Self> {
        let find = |name: &str| header.iter().position(|h| h.trim() == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|c| find(c).is_none())
            .map(|c| c.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(SendaError::SchemaValidation { missing });
        }

        Ok(Self {
            id: find("id").unwrap_or_default(),
            event: find("event").unwrap_or_default(),
            date: find("date").unwrap_or_default(),
            pattern: find(PATTERN_COLUMN),
        })
    }
}

fn malformed(line: usize, field: &str, value: &str) -> SendaError {
    SendaError::MalformedValue {
        line,
        field: field.to_string(),
        value: value.to_string(),
    }
}

fn parse_row(columns: &Columns, fields: &[String], line: usize) -> Result<EventRecord> {
    let cell = |idx: usize, name: &str| {
        fields
            .get(idx)
            .map(|s| s.trim())
            .ok_or_else(|| malformed(line, name, "<missing cell>"))
    };

    let raw_id = cell(columns.id, "id")?;
    let id = raw_id
        .parse::<u64>()
        .map_err(|_| malformed(line, "id", raw_id))?;

    let raw_event = cell(columns.event, "event")?;
    let mut chars = raw_event.chars();
    let symbol = match (chars.next(), chars.next()) {
        (Some(symbol), None) => symbol,
        _ => return Err(malformed(line, "event", raw_event)),
    };

    let raw_date = cell(columns.date, "date")?;
    let timestamp = parse_timestamp(raw_date).ok_or_else(|| malformed(line, "date", raw_date))?;

    let mut record = EventRecord::new(id, symbol, timestamp);
    if let Some(label) = columns
        .pattern
        .and_then(|idx| fields.get(idx))
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
    {
        record = record.with_pattern_label(label);
    }
    Ok(record)
}

/// Parse events CSV text (header row first)
pub fn parse_events(content: &str) -> Result<Vec<EventRecord>> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim_end_matches('\r')))
        .filter(|(_, l)| !l.trim().is_empty());

    let header = match lines.next() {
        Some((_, header)) => split_line(header.trim_start_matches('\u{feff}')),
        None => {
            return Err(SendaError::SchemaValidation {
                missing: REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
            })
        }
    };
    let columns = Columns::from_header(&header)?;

    let records = lines
        .map(|(line, text)| parse_row(&columns, &split_line(text), line))
        .collect::<Result<Vec<_>>>()?;

    if records.is_empty() {
        return Err(SendaError::EmptyInput("events CSV has no data rows".to_string()));
    }

    debug!(records = records.len(), "events parsed");
    Ok(records)
}

/// Read an events CSV file
pub fn read_events<P: AsRef<Path>>(path: P) -> Result<Vec<EventRecord>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(SendaError::MissingInput {
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path)?;
    parse_events(&content)
}

/// Read an events CSV file and group it into a corpus
pub fn read_corpus<P: AsRef<Path>>(path: P) -> Result<Corpus> {
    Corpus::from_records(read_events(path)?)
}
