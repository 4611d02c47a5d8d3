//! Ordered event alphabet
//!
//! Symbols are single characters. Their position in the alphabet defines the
//! "greater than" relation used during pattern construction.

use serde::{Deserialize, Serialize};

/// A single event symbol (e.g. `'A'`)
pub type Symbol = char;

/// Default number of symbols (`A` through `G`)
pub const DEFAULT_ALPHABET_SIZE: usize = 7;

/// Largest alphabet built from the Latin capitals
pub const MAX_ALPHABET_SIZE: usize = 26;

/// Fixed, ordered, finite set of symbols
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alphabet {
    symbols: Vec<Symbol>,
}

impl Alphabet {
    /// First `size` Latin capitals, `A` upwards (clamped to `1..=26`)
    ///
    /// # Example
    /// ```
    /// use senda::alphabet::Alphabet;
    ///
    /// let alphabet = Alphabet::latin(3);
    /// assert_eq!(alphabet.symbols(), &['A', 'B', 'C']);
    /// ```
    pub fn latin(size: usize) -> Self {
        let size = size.clamp(1, MAX_ALPHABET_SIZE);
        Self {
            symbols: ('A'..='Z').take(size).collect(),
        }
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// The symbol every pattern starts with
    pub fn first(&self) -> Symbol {
        self.symbols[0]
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        self.symbols.contains(&symbol)
    }

    /// Position of `symbol`, if it belongs to the alphabet
    pub fn index_of(&self, symbol: Symbol) -> Option<usize> {
        self.symbols.iter().position(|&s| s == symbol)
    }

    /// Symbols strictly after `symbol` in alphabet order
    pub fn greater_than(&self, symbol: Symbol) -> &[Symbol] {
        match self.index_of(symbol) {
            Some(idx) => &self.symbols[idx + 1..],
            // Foreign symbols compare by character value
            None => {
                let start = self.symbols.partition_point(|&s| s <= symbol);
                &self.symbols[start..]
            }
        }
    }

    /// Symbols at index `start` and above (falls back to the whole alphabet
    /// when `start` is out of range)
    pub fn upper_subrange(&self, start: usize) -> &[Symbol] {
        if start < self.symbols.len() {
            &self.symbols[start..]
        } else {
            &self.symbols
        }
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::latin(DEFAULT_ALPHABET_SIZE)
    }
}
