// Sequence Frequency Analysis for Path Corpora
//
// Groups paths by their full symbol sequence and counts how many ids share
// each one. Timestamps and provenance labels play no part: two paths are the
// same sequence when their symbols match position by position.
//
// Output order is fixed so repeated runs over the same corpus are
// byte-for-byte identical:
// - records: count descending, ties in first-seen order of the sequence
// - length buckets: length ascending

mod frequency;

pub use frequency::{
    length_distribution, summarize, LengthBucket, SequenceFrequencyAnalyzer, SequenceRecord,
    SequenceSummary,
};
