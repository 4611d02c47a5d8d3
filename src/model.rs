//! Core records: patterns, path templates, events, paths and corpora
//!
//! Patterns and events are created once per generation run and never
//! mutated afterwards. Analyzers only ever borrow a [`Corpus`].

use crate::alphabet::Symbol;
use crate::error::{Result, SendaError};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Separator used when printing a symbol sequence for humans
pub const SEQUENCE_SEPARATOR: &str = "→";

fn concat(symbols: &[Symbol]) -> String {
    symbols.iter().collect()
}

fn join_arrow(symbols: &[Symbol], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, symbol) in symbols.iter().enumerate() {
        if i > 0 {
            f.write_str(SEQUENCE_SEPARATOR)?;
        }
        write!(f, "{}", symbol)?;
    }
    Ok(())
}

/// Base pattern produced by the pattern library
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pattern(Vec<Symbol>);

impl Pattern {
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Self(symbols)
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Symbols concatenated without separator (`"ACE"`), used as provenance
    pub fn label(&self) -> String {
        concat(&self.0)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        join_arrow(&self.0, f)
    }
}

/// Owned copy of a pattern after variation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathTemplate(Vec<Symbol>);

impl PathTemplate {
    /// Copy of `pattern`; later edits never touch the original
    pub fn from_pattern(pattern: &Pattern) -> Self {
        Self(pattern.symbols().to_vec())
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn insert(&mut self, index: usize, symbol: Symbol) {
        self.0.insert(index, symbol);
    }

    pub(crate) fn replace(&mut self, index: usize, symbol: Symbol) {
        self.0[index] = symbol;
    }
}

impl From<Vec<Symbol>> for PathTemplate {
    fn from(symbols: Vec<Symbol>) -> Self {
        Self(symbols)
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        join_arrow(&self.0, f)
    }
}

/// One timestamped event of one identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: u64,
    pub symbol: Symbol,
    pub timestamp: NaiveDateTime,
    /// Base pattern (pre-variation) this event was generated from
    pub pattern_label: Option<String>,
}

impl EventRecord {
    pub fn new(id: u64, symbol: Symbol, timestamp: NaiveDateTime) -> Self {
        Self {
            id,
            symbol,
            timestamp,
            pattern_label: None,
        }
    }

    pub fn with_pattern_label(mut self, label: impl Into<String>) -> Self {
        self.pattern_label = Some(label.into());
        self
    }
}

/// Ordered events sharing one id
///
/// Events are kept ascending by timestamp, ties broken by symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Path {
    id: u64,
    events: Vec<EventRecord>,
}

impl Path {
    /// Build a path, ordering `events` by `(timestamp, symbol)`
    ///
    /// Fails when `events` is empty or carries an id other than `id`.
    pub fn new(id: u64, mut events: Vec<EventRecord>) -> Result<Self> {
        if events.is_empty() {
            return Err(SendaError::EmptyInput(format!("path {} has no events", id)));
        }
        if let Some(stray) = events.iter().find(|e| e.id != id) {
            return Err(SendaError::ForeignEvent {
                path_id: id,
                event_id: stray.id,
            });
        }
        events.sort_by(|a, b| {
            a.timestamp
                .cmp(&b.timestamp)
                .then_with(|| a.symbol.cmp(&b.symbol))
        });
        Ok(Self { id, events })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Symbols in path order
    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.events.iter().map(|e| e.symbol)
    }

    /// Symbols joined with `separator`
    pub fn sequence_string(&self, separator: &str) -> String {
        let mut out = String::with_capacity(self.events.len() * (1 + separator.len()));
        for (i, symbol) in self.symbols().enumerate() {
            if i > 0 {
                out.push_str(separator);
            }
            out.push(symbol);
        }
        out
    }

    fn backfill_pattern_label(&mut self) {
        let label: String = self.symbols().collect();
        for event in &mut self.events {
            if event.pattern_label.is_none() {
                event.pattern_label = Some(label.clone());
            }
        }
    }
}

/// Descriptive totals for a corpus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusSummary {
    pub total_events: usize,
    pub unique_ids: usize,
    pub first_timestamp: Option<NaiveDateTime>,
    pub last_timestamp: Option<NaiveDateTime>,
}

/// Fully materialized set of paths
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Corpus {
    paths: Vec<Path>,
}

impl Corpus {
    /// Wrap already-assembled paths, keeping their order
    ///
    /// Fails with [`SendaError::DuplicatePath`] when two paths share an id.
    pub fn new(paths: Vec<Path>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        if let Some(dup) = paths.iter().find(|p| !seen.insert(p.id())) {
            return Err(SendaError::DuplicatePath { id: dup.id() });
        }
        Ok(Self { paths })
    }

    /// Group flat records by id into paths (ascending id order)
    ///
    /// # Example
    /// ```
    /// use chrono::NaiveDate;
    /// use senda::model::{Corpus, EventRecord};
    ///
    /// let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap().and_hms_opt(0, 0, 0).unwrap();
    /// let corpus = Corpus::from_records(vec![
    ///     EventRecord::new(2, 'C', day(2)),
    ///     EventRecord::new(1, 'A', day(1)),
    ///     EventRecord::new(2, 'A', day(1)),
    /// ]).unwrap();
    ///
    /// assert_eq!(corpus.paths().len(), 2);
    /// assert_eq!(corpus.paths()[1].sequence_string("-"), "A-C");
    /// ```
    pub fn from_records(records: Vec<EventRecord>) -> Result<Self> {
        if records.is_empty() {
            return Err(SendaError::EmptyInput("no event records".to_string()));
        }

        let mut by_id: BTreeMap<u64, Vec<EventRecord>> = BTreeMap::new();
        for record in records {
            by_id.entry(record.id).or_default().push(record);
        }

        let paths = by_id
            .into_iter()
            .map(|(id, events)| Path::new(id, events))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { paths })
    }

    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Every event, path by path
    pub fn records(&self) -> impl Iterator<Item = &EventRecord> {
        self.paths.iter().flat_map(|p| p.events.iter())
    }

    pub fn event_count(&self) -> usize {
        self.paths.iter().map(Path::len).sum()
    }

    pub fn distinct_ids(&self) -> usize {
        self.paths.iter().map(Path::id).collect::<BTreeSet<_>>().len()
    }

    /// Fill missing provenance with each path's own symbol string
    pub fn backfill_pattern_labels(mut self) -> Self {
        for path in &mut self.paths {
            path.backfill_pattern_label();
        }
        self
    }

    pub fn summary(&self) -> CorpusSummary {
        let first_timestamp = self.records().map(|e| e.timestamp).min();
        let last_timestamp = self.records().map(|e| e.timestamp).max();

        CorpusSummary {
            total_events: self.event_count(),
            unique_ids: self.distinct_ids(),
            first_timestamp,
            last_timestamp,
        }
    }
}
