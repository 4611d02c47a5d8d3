//! Generator configuration
//!
//! Loaded from an optional `senda.toml` and overridden by command line flags.
//!
//! # Example senda.toml
//!
//! ```toml
//! num_ids = 500
//! num_patterns = 4
//! min_hops = 3
//! max_hops = 8
//! start_date = "2024-01-01"
//! seed = 42
//! timestamp_mode = "jitter"
//! ```

use crate::alphabet::{Alphabet, DEFAULT_ALPHABET_SIZE, MAX_ALPHABET_SIZE};
use crate::error::{Result, SendaError};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// How timestamps are placed inside a path's window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampMode {
    /// `n` evenly spaced points across the window (no randomness)
    #[default]
    Grid,
    /// `n` distinct points drawn from an hourly grid over the window
    Jitter,
}

/// Configuration for a generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of ids (paths) to generate
    pub num_ids: u64,

    /// Number of distinct base patterns
    pub num_patterns: usize,

    /// Minimum base pattern length
    pub min_hops: usize,

    /// Maximum pattern length, also caps insertions during variation
    pub max_hops: usize,

    /// Origin of the generation window
    pub start_date: NaiveDate,

    /// Width of each path's timestamp window
    pub window_days: u32,

    /// Each id starts up to this many days after `start_date`
    pub start_offset_days: u32,

    pub alphabet_size: usize,

    /// Chance of inserting one extra symbol into a template
    pub insertion_probability: f64,

    /// Chance of replacing one interior symbol of a template
    pub substitution_probability: f64,

    /// Last pattern symbol is drawn from alphabet indices at or above this
    pub upper_subrange_start_index: usize,

    pub timestamp_mode: TimestampMode,

    /// Fixed seed for reproducible runs (entropy when absent)
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            num_ids: 1000,
            num_patterns: 10,
            min_hops: 3,
            max_hops: 10,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or(NaiveDate::MIN),
            window_days: 180,
            start_offset_days: 30,
            alphabet_size: DEFAULT_ALPHABET_SIZE,
            insertion_probability: 0.2,
            substitution_probability: 0.3,
            upper_subrange_start_index: 3,
            timestamp_mode: TimestampMode::Grid,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a TOML file
    ///
    /// ```no_run
    /// use senda::config::GeneratorConfig;
    ///
    /// # fn main() -> senda::error::Result<()> {
    /// let config = GeneratorConfig::from_file("senda.toml")?;
    /// println!("Generating {} ids", config.num_ids);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SendaError::MissingInput {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML; absent keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn alphabet(&self) -> Alphabet {
        Alphabet::latin(self.alphabet_size)
    }

    /// Latest instant any generated event can land on, `None` when
    /// `start_date + start_offset_days + window_days` leaves the calendar
    pub fn window_end(&self) -> Option<NaiveDateTime> {
        let days = i64::from(self.start_offset_days) + i64::from(self.window_days);
        self.start_date
            .and_hms_opt(0, 0, 0)?
            .checked_add_signed(Duration::days(days))
    }

    /// Validate configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.num_patterns == 0 {
            return Err("num_patterns must be >= 1".to_string());
        }

        if self.min_hops < 2 {
            return Err(format!(
                "min_hops must be >= 2 (first and last symbol), got {}",
                self.min_hops
            ));
        }

        if self.min_hops > self.max_hops {
            return Err(format!(
                "min_hops ({}) must not exceed max_hops ({})",
                self.min_hops, self.max_hops
            ));
        }

        if !(1..=MAX_ALPHABET_SIZE).contains(&self.alphabet_size) {
            return Err(format!(
                "alphabet_size must be in [1, {}], got {}",
                MAX_ALPHABET_SIZE, self.alphabet_size
            ));
        }

        if self.upper_subrange_start_index >= self.alphabet_size {
            return Err(format!(
                "upper_subrange_start_index ({}) must be below alphabet_size ({})",
                self.upper_subrange_start_index, self.alphabet_size
            ));
        }

        for (name, p) in [
            ("insertion_probability", self.insertion_probability),
            ("substitution_probability", self.substitution_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(format!("{} must be in [0, 1], got {}", name, p));
            }
        }

        if self.window_days == 0 {
            return Err("window_days must be >= 1".to_string());
        }

        if self.window_end().is_none() {
            return Err(format!(
                "start_date {} plus {} offset days and a {} day window is out of range",
                self.start_date, self.start_offset_days, self.window_days
            ));
        }

        if self.timestamp_mode == TimestampMode::Jitter {
            let pool = self.window_days as usize * 24 + 1;
            if self.max_hops > pool {
                return Err(format!(
                    "jitter mode needs at least {} hourly slots, window has {}",
                    self.max_hops, pool
                ));
            }
        }

        Ok(())
    }

    /// [`validate`](Self::validate) mapped into the crate error type
    pub fn validated(self) -> Result<Self> {
        self.validate().map_err(SendaError::InvalidConfig)?;
        Ok(self)
    }
}
