use super::pattern::pick;
use crate::alphabet::Alphabet;
use crate::model::{Pattern, PathTemplate};
use rand::Rng;

/// Mutates base patterns into path templates
///
/// Two independent rolls per template: an insertion at an internal index
/// `[1, len-1]` while the template is shorter than `max_len`, then a
/// substitution at `[1, len-2]` while it is longer than 3. The first and last
/// symbols are never substituted.
#[derive(Debug, Clone)]
pub struct PatternVariator {
    alphabet: Alphabet,
    insertion_probability: f64,
    substitution_probability: f64,
}

impl PatternVariator {
    pub fn new(
        alphabet: Alphabet,
        insertion_probability: f64,
        substitution_probability: f64,
    ) -> Self {
        Self {
            alphabet,
            insertion_probability,
            substitution_probability,
        }
    }

    /// Copy `pattern` and apply the mutation rolls to the copy
    pub fn vary<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        pattern: &Pattern,
        max_len: usize,
    ) -> PathTemplate {
        let mut template = PathTemplate::from_pattern(pattern);
        let symbols = self.alphabet.symbols();

        // Both rolls are drawn even when the length guard fails
        let insert_roll: f64 = rng.gen();
        if insert_roll < self.insertion_probability
            && template.len() < max_len
            && template.len() >= 2
        {
            let at = rng.gen_range(1..=template.len() - 1);
            template.insert(at, pick(rng, symbols));
        }

        let substitute_roll: f64 = rng.gen();
        if substitute_roll < self.substitution_probability && template.len() > 3 {
            let at = rng.gen_range(1..=template.len() - 2);
            template.replace(at, pick(rng, symbols));
        }

        template
    }
}
