// Patterned path generation
//
// Pipeline, one direction only:
//   PatternLibrary -> PatternVariator -> TimestampSampler -> PathAssembler
//
// Base patterns are synthesized once per run. Every id then picks one of
// them, mutates a private copy into a template, gets a start offset inside
// the generation window and is timestamped and assembled into a Path.
//
// All randomness flows through one explicit `StdRng`, so a fixed seed
// reproduces the corpus exactly.

mod assembler;
mod pattern;
mod timestamps;
mod variation;

pub use assembler::PathAssembler;
pub use pattern::PatternLibrary;
pub use timestamps::{evenly_spaced, TimestampSampler, DEFAULT_WINDOW_DAYS};
pub use variation::PatternVariator;

use crate::config::GeneratorConfig;
use crate::error::{Result, SendaError};
use crate::model::{Corpus, Pattern};
use chrono::Duration;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

/// Output of a generation run
#[derive(Debug, Clone)]
pub struct GeneratedCorpus {
    /// Base patterns the paths were built from
    pub patterns: Vec<Pattern>,
    /// One path per id, ascending by id
    pub corpus: Corpus,
}

/// Drives the full generation pipeline for a [`GeneratorConfig`]
pub struct PathGenerator {
    config: GeneratorConfig,
    rng: StdRng,
    library: PatternLibrary,
    variator: PatternVariator,
    sampler: TimestampSampler,
    assembler: PathAssembler,
}

impl PathGenerator {
    /// Validate `config` and seed the random source
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        let config = config.validated()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self::with_rng(config, rng))
    }

    /// Use a caller-supplied random source (config must already be valid)
    pub fn with_rng(config: GeneratorConfig, rng: StdRng) -> Self {
        let alphabet = config.alphabet();
        Self {
            library: PatternLibrary::new(alphabet.clone(), config.upper_subrange_start_index),
            variator: PatternVariator::new(
                alphabet,
                config.insertion_probability,
                config.substitution_probability,
            ),
            sampler: TimestampSampler::new(config.timestamp_mode, config.window_days),
            assembler: PathAssembler,
            config,
            rng,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate the base patterns and one path per id `1..=num_ids`
    ///
    /// # Example
    /// ```
    /// use senda::config::GeneratorConfig;
    /// use senda::generator::PathGenerator;
    ///
    /// let config = GeneratorConfig { num_ids: 20, seed: Some(7), ..GeneratorConfig::default() };
    /// let generated = PathGenerator::new(config).unwrap().generate().unwrap();
    ///
    /// assert_eq!(generated.corpus.paths().len(), 20);
    /// assert_eq!(generated.patterns.len(), 10);
    /// ```
    pub fn generate(&mut self) -> Result<GeneratedCorpus> {
        let patterns = self.library.generate(
            &mut self.rng,
            self.config.num_patterns,
            self.config.min_hops,
            self.config.max_hops,
        );

        if patterns.is_empty() {
            return Err(SendaError::EmptyInput("no base patterns to draw from".to_string()));
        }

        let origin = self
            .config
            .start_date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| SendaError::InvalidConfig("start_date has no midnight".to_string()))?;
        let mut paths = Vec::with_capacity(self.config.num_ids as usize);

        for id in 1..=self.config.num_ids {
            let base = &patterns[self.rng.gen_range(0..patterns.len())];
            let template = self
                .variator
                .vary(&mut self.rng, base, self.config.max_hops);

            let offset_days = self.rng.gen_range(0..=self.config.start_offset_days);
            let start = origin
                .checked_add_signed(Duration::days(i64::from(offset_days)))
                .ok_or_else(|| {
                    SendaError::InvalidConfig(format!(
                        "start offset of {} days is out of range",
                        offset_days
                    ))
                })?;
            let timestamps = self.sampler.sample(&mut self.rng, template.len(), start);

            let path = self.assembler.assemble(id, base, &template, &timestamps)?;
            debug!(id, base = %base, template = %template, "path assembled");
            paths.push(path);
        }

        let corpus = Corpus::new(paths)?;
        info!(
            patterns = patterns.len(),
            ids = corpus.paths().len(),
            events = corpus.event_count(),
            "generation complete"
        );

        Ok(GeneratedCorpus { patterns, corpus })
    }
}
