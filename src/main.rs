use anyhow::{Context, Result};
use clap::Parser;
use senda::cli::{Cli, Command, GenerateArgs, OutputFormat};
use senda::config::{GeneratorConfig, TimestampMode};
use senda::csv_input;
use senda::csv_output::{length_distribution_csv, EventsCsv, SegmentCsv, SequenceCsv};
use senda::generator::PathGenerator;
use senda::json_output::{JsonSegmentReport, JsonSequenceReport};
use senda::{segment, sequence};
use std::io::Write;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
///
/// `--debug` forces TRACE; without it `RUST_LOG` alone decides, and nothing
/// is installed when it is unset.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into())
    } else if std::env::var_os("RUST_LOG").is_some() {
        EnvFilter::from_default_env()
    } else {
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Write `content` to `output`, or stdout when no file was given
fn emit(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => std::io::stdout()
            .lock()
            .write_all(content.as_bytes())
            .context("Failed to write to stdout")?,
    }
    Ok(())
}

/// Config file first, then command line overrides
fn build_config(args: &GenerateArgs) -> Result<GeneratorConfig> {
    let mut config = match &args.config {
        Some(path) => GeneratorConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => GeneratorConfig::default(),
    };

    if let Some(n) = args.num_ids {
        config.num_ids = n;
    }
    if let Some(n) = args.num_patterns {
        config.num_patterns = n;
    }
    if let Some(n) = args.min_hops {
        config.min_hops = n;
    }
    if let Some(n) = args.max_hops {
        config.max_hops = n;
    }
    if let Some(date) = args.start_date {
        config.start_date = date;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.jitter {
        config.timestamp_mode = TimestampMode::Jitter;
    }
    Ok(config)
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    let config = build_config(&args)?;
    let generated = PathGenerator::new(config)?.generate()?;

    info!(
        patterns = generated.patterns.len(),
        ids = generated.corpus.paths().len(),
        events = generated.corpus.event_count(),
        "corpus generated"
    );

    emit(
        &EventsCsv::from_corpus(&generated.corpus).to_csv(),
        args.output.as_deref(),
    )
}

fn run_sequences(
    input: &Path,
    format: OutputFormat,
    lengths: bool,
    output: Option<&Path>,
) -> Result<()> {
    let corpus = csv_input::read_corpus(input)
        .with_context(|| format!("Failed to read events from {}", input.display()))?;

    let records = sequence::SequenceFrequencyAnalyzer::new().analyze(corpus.paths());
    let buckets = sequence::length_distribution(&records);

    let content = match format {
        OutputFormat::Csv if lengths => length_distribution_csv(&buckets),
        OutputFormat::Csv => SequenceCsv::new(&records).to_csv(),
        OutputFormat::Json => {
            let summary = sequence::summarize(corpus.paths(), &records);
            JsonSequenceReport::new(summary, &records, &buckets).to_json()?
        }
    };
    emit(&content, output)
}

fn run_segments(input: &Path, format: OutputFormat, output: Option<&Path>) -> Result<()> {
    let corpus = csv_input::read_corpus(input)
        .with_context(|| format!("Failed to read events from {}", input.display()))?;

    let stats = segment::TransitionTimingAnalyzer::new().analyze(corpus.paths());

    let content = match format {
        OutputFormat::Csv => SegmentCsv::new(&stats).to_csv(),
        OutputFormat::Json => {
            JsonSegmentReport::new(segment::summarize(&stats), &stats).to_json()?
        }
    };
    emit(&content, output)
}

fn run_inspect(input: &Path, backfill: bool, output: Option<&Path>) -> Result<()> {
    let mut corpus = csv_input::read_corpus(input)
        .with_context(|| format!("Failed to read events from {}", input.display()))?;

    let summary = corpus.summary();
    info!(
        events = summary.total_events,
        ids = summary.unique_ids,
        first = ?summary.first_timestamp,
        last = ?summary.last_timestamp,
        "corpus summary"
    );
    eprintln!(
        "{} events across {} ids",
        summary.total_events, summary.unique_ids
    );
    if let (Some(first), Some(last)) = (summary.first_timestamp, summary.last_timestamp) {
        eprintln!("date range: {} to {}", first.date(), last.date());
    }

    if backfill {
        corpus = corpus.backfill_pattern_labels();
    }

    emit(&EventsCsv::from_corpus(&corpus).to_csv(), output)
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug or RUST_LOG is set
    init_tracing(args.debug);

    match args.command {
        Command::Generate(generate) => run_generate(generate),
        Command::Sequences {
            input,
            format,
            lengths,
            output,
        } => run_sequences(&input, format, lengths, output.as_deref()),
        Command::Segments {
            input,
            format,
            output,
        } => run_segments(&input, format, output.as_deref()),
        Command::Inspect {
            input,
            backfill,
            output,
        } => run_inspect(&input, backfill, output.as_deref()),
    }
}
