//! CLI argument parsing for senda

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for analysis results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// CSV format for spreadsheet analysis (default)
    Csv,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "senda")]
#[command(version)]
#[command(about = "Patterned event-path synthesis and path analytics", long_about = None)]
pub struct Cli {
    /// Enable debug tracing output to stderr
    #[arg(long = "debug", global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a corpus of patterned paths as events CSV
    Generate(GenerateArgs),

    /// Count distinct full sequences in an events CSV
    Sequences {
        /// Events CSV (id,event,date[,pattern_base])
        #[arg(value_name = "EVENTS")]
        input: PathBuf,

        /// Output format
        #[arg(long = "format", value_enum, default_value = "csv")]
        format: OutputFormat,

        /// Emit the sequence length distribution instead of the sequences (CSV only)
        #[arg(long = "lengths")]
        lengths: bool,

        /// Write output to file instead of stdout
        #[arg(short = 'o', long = "output", value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Aggregate adjacent-transition timing in an events CSV
    Segments {
        /// Events CSV (id,event,date[,pattern_base])
        #[arg(value_name = "EVENTS")]
        input: PathBuf,

        /// Output format
        #[arg(long = "format", value_enum, default_value = "csv")]
        format: OutputFormat,

        /// Write output to file instead of stdout
        #[arg(short = 'o', long = "output", value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Validate and normalise an events CSV
    Inspect {
        /// Events CSV (id,event,date[,pattern_base])
        #[arg(value_name = "EVENTS")]
        input: PathBuf,

        /// Fill missing pattern_base values from each path's own symbols
        #[arg(long = "backfill")]
        backfill: bool,

        /// Write output to file instead of stdout
        #[arg(short = 'o', long = "output", value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

/// Flags for `senda generate`; each one overrides the config file
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// TOML configuration file
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of ids (paths) to generate
    #[arg(long = "num-ids", value_name = "N")]
    pub num_ids: Option<u64>,

    /// Number of distinct base patterns
    #[arg(long = "num-patterns", value_name = "N")]
    pub num_patterns: Option<usize>,

    /// Minimum base pattern length
    #[arg(long = "min-hops", value_name = "N")]
    pub min_hops: Option<usize>,

    /// Maximum pattern length
    #[arg(long = "max-hops", value_name = "N")]
    pub max_hops: Option<usize>,

    /// Start of the generation window (YYYY-MM-DD)
    #[arg(long = "start-date", value_name = "DATE")]
    pub start_date: Option<NaiveDate>,

    /// Seed for reproducible output
    #[arg(long = "seed", value_name = "N")]
    pub seed: Option<u64>,

    /// Draw timestamps from an hourly grid instead of spacing them evenly
    #[arg(long = "jitter")]
    pub jitter: bool,

    /// Write output to file instead of stdout
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_generate_defaults() {
        let cli = Cli::parse_from(["senda", "generate"]);
        assert!(!cli.debug);
        match cli.command {
            Command::Generate(args) => {
                assert!(args.config.is_none());
                assert!(args.num_ids.is_none());
                assert!(args.seed.is_none());
                assert!(!args.jitter);
                assert!(args.output.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_generate_overrides() {
        let cli = Cli::parse_from([
            "senda",
            "generate",
            "--num-ids",
            "50",
            "--num-patterns",
            "3",
            "--min-hops",
            "4",
            "--max-hops",
            "6",
            "--start-date",
            "2023-06-01",
            "--seed",
            "42",
            "--jitter",
            "-o",
            "events.csv",
        ]);
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.num_ids, Some(50));
        assert_eq!(args.num_patterns, Some(3));
        assert_eq!(args.min_hops, Some(4));
        assert_eq!(args.max_hops, Some(6));
        assert_eq!(args.start_date, NaiveDate::from_ymd_opt(2023, 6, 1));
        assert_eq!(args.seed, Some(42));
        assert!(args.jitter);
        assert_eq!(args.output, Some(PathBuf::from("events.csv")));
    }

    #[test]
    fn test_cli_rejects_bad_start_date() {
        assert!(Cli::try_parse_from(["senda", "generate", "--start-date", "June"]).is_err());
    }

    #[test]
    fn test_cli_sequences_format() {
        let cli = Cli::parse_from(["senda", "sequences", "events.csv", "--format", "json"]);
        match cli.command {
            Command::Sequences {
                input,
                format,
                lengths,
                output,
            } => {
                assert_eq!(input, PathBuf::from("events.csv"));
                assert_eq!(format, OutputFormat::Json);
                assert!(!lengths);
                assert!(output.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_segments_default_csv() {
        let cli = Cli::parse_from(["senda", "segments", "events.csv"]);
        assert!(matches!(
            cli.command,
            Command::Segments {
                format: OutputFormat::Csv,
                ..
            }
        ));
    }

    #[test]
    fn test_cli_debug_is_global() {
        let cli = Cli::parse_from(["senda", "inspect", "events.csv", "--backfill", "--debug"]);
        assert!(cli.debug);
        assert!(matches!(cli.command, Command::Inspect { backfill: true, .. }));
    }

    #[test]
    fn test_cli_requires_input() {
        assert!(Cli::try_parse_from(["senda", "segments"]).is_err());
        assert!(Cli::try_parse_from(["senda"]).is_err());
    }
}
