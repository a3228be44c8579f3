use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use wildstream::input::{self, Symbols};
use wildstream::Automaton;

use crate::cli_utils::PatternArgs;

/// Task-format runner: the first token of the input is the pattern, every
/// following non-whitespace symbol is text. Offsets are written space-separated.
pub fn cmd_scan(input: PathBuf, output: Option<PathBuf>, pattern_args: PatternArgs) -> Result<()> {
    let options = pattern_args.options()?;
    let mut reader = input::open(&input)
        .with_context(|| format!("Failed to open input: {}", input.display()))?;

    let pattern = input::read_token(&mut reader)
        .with_context(|| format!("No pattern found in {}", input.display()))?;
    let automaton = Automaton::build(&pattern, options).with_context(|| {
        format!("Invalid pattern: {}", String::from_utf8_lossy(&pattern))
    })?;

    let mut out: Box<dyn Write> = match &output {
        Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
            format!("Failed to create output file: {}", path.display())
        })?)),
        None => Box::new(BufWriter::new(io::stdout())),
    };

    let symbols = Symbols::new(reader, true);
    for start in automaton.matcher().into_matches(symbols) {
        let start = start.with_context(|| format!("Scan failed in {}", input.display()))?;
        write!(out, "{} ", start)?;
    }
    writeln!(out)?;
    out.flush()?;

    Ok(())
}
