// Transition Timing Analysis for Path Corpora
//
// Every adjacent pair of events inside a path is a transition ("segment")
// labelled FROM-TO. Durations are collected per label across the whole
// corpus and reduced to frequency, mean, min, max, sample standard deviation
// and the number of distinct contributing ids.
//
// Values are aggregated at full precision; rounding to two decimals happens
// only when a stat is presented (`SegmentStat::rounded`).

mod timing;

pub use timing::{
    extract_transitions, round2, summarize, SegmentStat, TimingSummary, Transition,
    TransitionTimingAnalyzer,
};
