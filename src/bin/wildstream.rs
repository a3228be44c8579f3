mod cli_utils;
mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::{self as logger};
use std::path::PathBuf;

use cli_utils::PatternArgs;
use commands::{cmd_inspect, cmd_scan, cmd_search};

#[derive(Parser)]
#[command(name = "wildstream")]
#[command(
    about = "Streaming wildcard substring search",
    long_about = "wildstream - Streaming wildcard substring search\n\n\
    Finds every offset where a pattern with single-symbol wildcards occurs in a text,\n\
    reading the text once, symbol by symbol, in memory proportional to the pattern.\n\n\
    Examples:\n\
      wildstream search 'ab?d' corpus.txt\n\
      wildstream search 'ab??c' logs/*.gz --format summary -j auto\n\
      wildstream inspect 'ab?ba' --json\n\
      wildstream scan input.txt -o output.txt"
)]
#[command(version)]
struct Cli {
    /// Log construction details to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search text files or stdin for a wildcard pattern
    Search {
        /// Pattern; the wildcard matches any single symbol
        #[arg(value_name = "PATTERN")]
        pattern: String,

        /// Text files to search, or "-" for stdin (default: stdin)
        #[arg(value_name = "INPUT")]
        inputs: Vec<PathBuf>,

        #[command(flatten)]
        pattern_args: PatternArgs,

        /// Treat whitespace as text symbols instead of skipping it
        #[arg(long)]
        keep_whitespace: bool,

        /// Output format: json (default, NDJSON), text, csv, or summary
        #[arg(long, default_value = "json")]
        format: String,

        /// Number of worker threads (default: 1, use "auto" for all cores)
        #[arg(short = 'j', long)]
        threads: Option<String>,

        /// Show search statistics to stderr
        #[arg(short, long)]
        stats: bool,
    },

    /// Show how a pattern is split and compiled
    Inspect {
        /// Pattern to compile
        #[arg(value_name = "PATTERN")]
        pattern: String,

        #[command(flatten)]
        pattern_args: PatternArgs,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Read a pattern followed by its text from one input and print match offsets
    Scan {
        /// Input whose first token is the pattern, or "-" for stdin
        #[arg(value_name = "INPUT", default_value = "-")]
        input: PathBuf,

        /// Write offsets to this file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        pattern_args: PatternArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_millis()
        .init();

    match cli.command {
        Commands::Search {
            pattern,
            inputs,
            pattern_args,
            keep_whitespace,
            format,
            threads,
            stats,
        } => cmd_search(
            pattern,
            inputs,
            pattern_args,
            keep_whitespace,
            format,
            threads,
            stats,
        ),
        Commands::Inspect {
            pattern,
            pattern_args,
            json,
        } => cmd_inspect(pattern, pattern_args, json),
        Commands::Scan {
            input,
            output,
            pattern_args,
        } => cmd_scan(input, output, pattern_args),
    }
}
