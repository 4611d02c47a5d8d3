//! Integration tests for patterned path generation (Sprint 1)

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::rngs::StdRng;
use rand::SeedableRng;
use senda::alphabet::Alphabet;
use senda::config::{GeneratorConfig, TimestampMode};
use senda::error::SendaError;
use senda::generator::{
    evenly_spaced, PathAssembler, PathGenerator, PatternLibrary, PatternVariator,
    TimestampSampler,
};
use senda::model::{PathTemplate, Pattern};
use senda::segment::extract_transitions;

fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn config(num_ids: u64, seed: u64) -> GeneratorConfig {
    GeneratorConfig {
        num_ids,
        seed: Some(seed),
        ..GeneratorConfig::default()
    }
}

#[test]
fn test_fixed_pattern_assembles_into_one_day_segment() {
    // Pattern A,C,E with the first two events one day apart
    let base = Pattern::new(vec!['A', 'C', 'E']);
    let template = PathTemplate::from_pattern(&base);
    let times = [
        midnight(2024, 1, 1),
        midnight(2024, 1, 2),
        midnight(2024, 1, 10),
    ];

    let path = PathAssembler.assemble(1, &base, &template, &times).unwrap();
    let events = path.events();
    assert_eq!((events[0].symbol, events[0].timestamp), ('A', times[0]));
    assert_eq!((events[1].symbol, events[1].timestamp), ('C', times[1]));

    let first = &extract_transitions(&path)[0];
    assert_eq!(first.segment_label, "A-C");
    assert_eq!(first.duration_hours, 24.0);
}

#[test]
fn test_three_point_grid_over_default_window() {
    let sampler = TimestampSampler::default();
    let mut rng = StdRng::seed_from_u64(0);
    let start = midnight(2024, 1, 1);

    let times = sampler.sample(&mut rng, 3, start);
    assert_eq!(times.len(), 3);
    assert!(times[0] >= start);
    assert!(times[2] <= midnight(2024, 6, 29));
    assert_eq!(times[1] - times[0], times[2] - times[1]);
    assert_eq!(times, evenly_spaced(3, start, 180));
}

#[test]
fn test_grid_ignores_seed() {
    let sampler = TimestampSampler::new(TimestampMode::Grid, 180);
    let start = midnight(2024, 1, 1);
    let a = sampler.sample(&mut StdRng::seed_from_u64(1), 6, start);
    let b = sampler.sample(&mut StdRng::seed_from_u64(99), 6, start);
    assert_eq!(a, b);
}

#[test]
fn test_components_compose_by_hand() {
    let alphabet = Alphabet::default();
    let library = PatternLibrary::new(alphabet.clone(), 3);
    let variator = PatternVariator::new(alphabet, 0.2, 0.3);
    let sampler = TimestampSampler::default();
    let mut rng = StdRng::seed_from_u64(2024);

    let patterns = library.generate(&mut rng, 5, 3, 10);
    for (i, base) in patterns.iter().enumerate() {
        let template = variator.vary(&mut rng, base, 10);
        let times = sampler.sample(&mut rng, template.len(), midnight(2024, 1, 1));
        let path = PathAssembler
            .assemble(i as u64 + 1, base, &template, &times)
            .unwrap();

        assert_eq!(path.len(), template.len());
        assert!(path
            .events()
            .windows(2)
            .all(|w| w[0].timestamp < w[1].timestamp));
    }
}

#[test]
fn test_generated_corpus_is_reproducible() {
    let a = PathGenerator::new(config(200, 11)).unwrap().generate().unwrap();
    let b = PathGenerator::new(config(200, 11)).unwrap().generate().unwrap();
    assert_eq!(a.patterns, b.patterns);
    assert_eq!(a.corpus, b.corpus);
}

#[test]
fn test_generated_paths_respect_bounds() {
    let cfg = GeneratorConfig {
        min_hops: 4,
        max_hops: 7,
        ..config(300, 5)
    };
    let generated = PathGenerator::new(cfg).unwrap().generate().unwrap();

    for pattern in &generated.patterns {
        assert!((4..=7).contains(&pattern.len()));
        assert_eq!(pattern.symbols()[0], 'A');
        assert!(['D', 'E', 'F', 'G'].contains(pattern.symbols().last().unwrap()));
    }

    let window_end = midnight(2024, 1, 1) + Duration::days(30 + 180);
    for path in generated.corpus.paths() {
        assert!((4..=7).contains(&path.len()));
        let first = path.events()[0].timestamp;
        let last = path.events()[path.len() - 1].timestamp;
        assert!(first >= midnight(2024, 1, 1));
        assert!(last <= window_end);
    }
}

#[test]
fn test_provenance_names_a_base_pattern() {
    let generated = PathGenerator::new(config(100, 8)).unwrap().generate().unwrap();
    let labels: Vec<String> = generated.patterns.iter().map(Pattern::label).collect();

    for record in generated.corpus.records() {
        let label = record.pattern_label.as_deref().unwrap();
        assert!(labels.iter().any(|l| l == label));
    }
}

#[test]
fn test_jitter_mode_from_toml() {
    let cfg = GeneratorConfig::from_toml_str(
        r#"
        num_ids = 40
        num_patterns = 3
        seed = 3
        timestamp_mode = "jitter"
        "#,
    )
    .unwrap();
    assert_eq!(cfg.timestamp_mode, TimestampMode::Jitter);

    let generated = PathGenerator::new(cfg).unwrap().generate().unwrap();
    assert_eq!(generated.corpus.paths().len(), 40);
    for path in generated.corpus.paths() {
        assert!(path
            .events()
            .windows(2)
            .all(|w| w[0].timestamp < w[1].timestamp));
    }
}

#[test]
fn test_invalid_config_rejected() {
    let cfg = GeneratorConfig {
        min_hops: 9,
        max_hops: 4,
        ..GeneratorConfig::default()
    };
    assert!(matches!(
        PathGenerator::new(cfg),
        Err(SendaError::InvalidConfig(_))
    ));
}
