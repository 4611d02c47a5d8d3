use crate::error::{Result, SendaError};
use crate::model::{EventRecord, Path, PathTemplate, Pattern};
use chrono::NaiveDateTime;

/// Zips a template with sampled timestamps into a [`Path`]
#[derive(Debug, Clone, Copy, Default)]
pub struct PathAssembler;

impl PathAssembler {
    /// Build the path for `id`
    ///
    /// Every event carries `base_pattern`'s label (the pre-variation
    /// pattern), not the template's own symbols.
    ///
    /// # Example
    /// ```
    /// use chrono::NaiveDate;
    /// use senda::generator::PathAssembler;
    /// use senda::model::{PathTemplate, Pattern};
    ///
    /// let base = Pattern::new(vec!['A', 'C', 'E']);
    /// let template = PathTemplate::from(vec!['A', 'B', 'E']);
    /// let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap().and_hms_opt(0, 0, 0).unwrap();
    ///
    /// let path = PathAssembler.assemble(1, &base, &template, &[day(1), day(2), day(3)]).unwrap();
    /// assert_eq!(path.sequence_string(""), "ABE");
    /// assert_eq!(path.events()[0].pattern_label.as_deref(), Some("ACE"));
    /// ```
    pub fn assemble(
        &self,
        id: u64,
        base_pattern: &Pattern,
        template: &PathTemplate,
        timestamps: &[NaiveDateTime],
    ) -> Result<Path> {
        if template.len() != timestamps.len() {
            return Err(SendaError::TemplateLengthMismatch {
                symbols: template.len(),
                timestamps: timestamps.len(),
            });
        }

        let label = base_pattern.label();
        let events = template
            .symbols()
            .iter()
            .zip(timestamps)
            .map(|(&symbol, &timestamp)| {
                EventRecord::new(id, symbol, timestamp).with_pattern_label(label.clone())
            })
            .collect();

        Path::new(id, events)
    }
}
