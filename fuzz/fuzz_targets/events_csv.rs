#![no_main]

use libfuzzer_sys::fuzz_target;
use senda::csv_input::parse_events;
use senda::model::Corpus;
use senda::segment::TransitionTimingAnalyzer;
use senda::sequence::SequenceFrequencyAnalyzer;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Any accepted input must also survive both analyzers
        if let Ok(records) = parse_events(input) {
            if let Ok(corpus) = Corpus::from_records(records) {
                let _ = SequenceFrequencyAnalyzer::new().analyze(corpus.paths());
                let _ = TransitionTimingAnalyzer::new().analyze(corpus.paths());
            }
        }
    }
});
