use crate::alphabet::{Alphabet, Symbol};
use crate::model::Pattern;
use rand::Rng;
use tracing::debug;

/// Uniform pick from a non-empty slice
pub(crate) fn pick<R: Rng + ?Sized>(rng: &mut R, choices: &[Symbol]) -> Symbol {
    choices[rng.gen_range(0..choices.len())]
}

/// Synthesizes base patterns under the structural construction rules
///
/// - position 0 is always the alphabet's first symbol
/// - interior step `i` (0-based among the middle positions): even steps move
///   strictly forward from the previous symbol when possible, odd steps draw
///   from the whole alphabet
/// - the final symbol comes from the upper sub-range of the alphabet
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    alphabet: Alphabet,
    upper_start: usize,
}

impl PatternLibrary {
    pub fn new(alphabet: Alphabet, upper_start: usize) -> Self {
        Self {
            alphabet,
            upper_start,
        }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Generate `count` patterns with lengths drawn uniformly from
    /// `[min_len, max_len]`
    ///
    /// A pattern always holds at least its first and last symbol, so
    /// `min_len` is raised to 2 and `max_len` to `min_len` when needed.
    ///
    /// # Example
    /// ```
    /// use rand::rngs::StdRng;
    /// use rand::SeedableRng;
    /// use senda::alphabet::Alphabet;
    /// use senda::generator::PatternLibrary;
    ///
    /// let library = PatternLibrary::new(Alphabet::default(), 3);
    /// let mut rng = StdRng::seed_from_u64(1);
    /// let patterns = library.generate(&mut rng, 4, 3, 6);
    ///
    /// assert_eq!(patterns.len(), 4);
    /// assert!(patterns.iter().all(|p| p.symbols()[0] == 'A'));
    /// ```
    pub fn generate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        count: usize,
        min_len: usize,
        max_len: usize,
    ) -> Vec<Pattern> {
        let lo = min_len.max(2);
        let hi = max_len.max(lo);

        (0..count)
            .map(|n| {
                let len = rng.gen_range(lo..=hi);
                let pattern = self.build(rng, len);
                debug!(index = n, pattern = %pattern, "base pattern");
                pattern
            })
            .collect()
    }

    fn build<R: Rng + ?Sized>(&self, rng: &mut R, len: usize) -> Pattern {
        let all = self.alphabet.symbols();
        let mut symbols = Vec::with_capacity(len);
        symbols.push(self.alphabet.first());

        for step in 0..len.saturating_sub(2) {
            let prev = symbols[symbols.len() - 1];
            let next = if step % 2 == 0 {
                let forward = self.alphabet.greater_than(prev);
                if forward.is_empty() {
                    pick(rng, all)
                } else {
                    pick(rng, forward)
                }
            } else {
                pick(rng, all)
            };
            symbols.push(next);
        }

        symbols.push(pick(rng, self.alphabet.upper_subrange(self.upper_start)));
        Pattern::new(symbols)
    }
}
