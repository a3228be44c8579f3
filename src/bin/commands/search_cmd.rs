use anyhow::{bail, Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use serde_json::json;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use wildstream::input::{self, Symbols};
use wildstream::Automaton;

use crate::cli_utils::{format_rate, parse_threads, PatternArgs};

/// Outcome of searching one input
#[derive(Debug, Serialize)]
struct InputReport {
    input: String,
    symbols: usize,
    matches: usize,
    interrupted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Text,
    Csv,
    Summary,
}

impl OutputFormat {
    fn parse(format: &str) -> Result<Self> {
        match format {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            "csv" => Ok(Self::Csv),
            "summary" => Ok(Self::Summary),
            other => bail!(
                "Unknown output format '{}' (expected json, text, csv, or summary)",
                other
            ),
        }
    }
}

/// Writes matches as they are found
struct Emitter {
    format: OutputFormat,
    label_inputs: bool,
    out: io::BufWriter<io::Stdout>,
    csv: Option<csv::Writer<io::Stdout>>,
}

impl Emitter {
    fn new(format: OutputFormat, label_inputs: bool) -> Result<Self> {
        let csv = if format == OutputFormat::Csv {
            let mut writer = csv::Writer::from_writer(io::stdout());
            writer.write_record(["input", "offset"])?;
            Some(writer)
        } else {
            None
        };
        Ok(Self {
            format,
            label_inputs,
            out: io::BufWriter::new(io::stdout()),
            csv,
        })
    }

    fn begin(&mut self, input: &str) -> Result<()> {
        if self.format == OutputFormat::Text && self.label_inputs {
            write!(self.out, "{}:", input)?;
        }
        Ok(())
    }

    fn emit(&mut self, input: &str, offset: usize) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                writeln!(self.out, "{}", json!({ "input": input, "offset": offset }))?
            }
            OutputFormat::Text => {
                if self.label_inputs {
                    write!(self.out, " {}", offset)?
                } else {
                    write!(self.out, "{} ", offset)?
                }
            }
            OutputFormat::Csv => {
                if let Some(writer) = self.csv.as_mut() {
                    writer.write_record([input, offset.to_string().as_str()])?;
                }
            }
            OutputFormat::Summary => {}
        }
        Ok(())
    }

    fn end(&mut self, report: &InputReport) -> Result<()> {
        match self.format {
            OutputFormat::Text => writeln!(self.out)?,
            OutputFormat::Summary => writeln!(self.out, "{}", serde_json::to_string(report)?)?,
            OutputFormat::Json | OutputFormat::Csv => {}
        }
        Ok(())
    }

    fn finish(mut self) -> Result<()> {
        self.out.flush()?;
        if let Some(mut writer) = self.csv.take() {
            writer.flush()?;
        }
        Ok(())
    }
}

fn open_input(path: &Path) -> Result<Box<dyn BufRead + Send>> {
    input::open(path).with_context(|| format!("Failed to open input: {}", path.display()))
}

/// Stream one opened input through a fresh matcher, calling `on_match` per offset
fn search_input(
    automaton: &Automaton,
    name: String,
    reader: Box<dyn BufRead + Send>,
    skip_whitespace: bool,
    interrupted: &AtomicBool,
    mut on_match: impl FnMut(usize) -> Result<()>,
) -> Result<InputReport> {
    let symbols = Symbols::new(reader, skip_whitespace)
        .take_while(|_| !interrupted.load(Ordering::Relaxed));

    let mut matches = automaton.matcher().into_matches(symbols);
    let mut count = 0;
    for start in matches.by_ref() {
        let start = start.with_context(|| format!("Search failed in {}", name))?;
        on_match(start)?;
        count += 1;
    }

    Ok(InputReport {
        input: name,
        symbols: matches.position(),
        matches: count,
        interrupted: interrupted.load(Ordering::Relaxed),
    })
}

pub fn cmd_search(
    pattern: String,
    inputs: Vec<PathBuf>,
    pattern_args: PatternArgs,
    keep_whitespace: bool,
    format: String,
    threads: Option<String>,
    show_stats: bool,
) -> Result<()> {
    let format = OutputFormat::parse(&format)?;
    let options = pattern_args.options()?;
    let automaton = Automaton::build(pattern.as_bytes(), options)
        .with_context(|| format!("Invalid pattern: {}", pattern))?;

    let inputs = if inputs.is_empty() {
        vec![PathBuf::from("-")]
    } else {
        inputs
    };
    let num_threads = parse_threads(threads.as_deref())?;
    let skip_whitespace = !keep_whitespace;

    // Ctrl-C stops pulling symbols and matches found so far are still
    // reported. A read blocked on a stalled input never sees the flag, so a
    // second Ctrl-C exits at once.
    let interrupted = Arc::new(AtomicBool::new(false));
    {
        let interrupted = Arc::clone(&interrupted);
        let installed = ctrlc::set_handler(move || {
            if interrupted.swap(true, Ordering::Relaxed) {
                eprintln!("\n[INFO] Interrupted again, exiting");
                std::process::exit(130);
            }
            eprintln!("\n[INFO] Shutting down... (press Ctrl-C again to exit now)");
        });
        if let Err(e) = installed {
            log::warn!("could not install Ctrl-C handler: {}", e);
        }
    }

    let started = Instant::now();
    let mut emitter = Emitter::new(format, inputs.len() > 1)?;
    let mut reports = Vec::with_capacity(inputs.len());

    if num_threads > 1 && inputs.len() > 1 {
        log::debug!("searching {} inputs on {} threads", inputs.len(), num_threads);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()
            .context("Failed to create thread pool")?;

        let results: Vec<Result<(InputReport, Vec<usize>)>> = pool.install(|| {
            inputs
                .par_iter()
                .map(|path| -> Result<(InputReport, Vec<usize>)> {
                    let mut offsets = Vec::new();
                    let report = search_input(
                        &automaton,
                        path.display().to_string(),
                        open_input(path)?,
                        skip_whitespace,
                        &interrupted,
                        |start| {
                            offsets.push(start);
                            Ok(())
                        },
                    )?;
                    Ok((report, offsets))
                })
                .collect()
        });

        // Print in input order
        for result in results {
            let (report, offsets) = result?;
            emitter.begin(&report.input)?;
            for offset in offsets {
                emitter.emit(&report.input, offset)?;
            }
            emitter.end(&report)?;
            reports.push(report);
        }
    } else {
        for path in &inputs {
            let name = path.display().to_string();
            let reader = open_input(path)?;
            emitter.begin(&name)?;
            let report = search_input(
                &automaton,
                name.clone(),
                reader,
                skip_whitespace,
                &interrupted,
                |start| emitter.emit(&name, start),
            )?;
            emitter.end(&report)?;
            reports.push(report);
        }
    }
    emitter.finish()?;

    let total_matches: usize = reports.iter().map(|r| r.matches).sum();
    let total_symbols: usize = reports.iter().map(|r| r.symbols).sum();

    if show_stats {
        let elapsed = started.elapsed().as_secs_f64();
        let stats = automaton.stats();
        eprintln!();
        eprintln!("[INFO] Search statistics:");
        eprintln!("  Inputs:          {}", reports.len());
        eprintln!("  Symbols:         {}", total_symbols);
        eprintln!("  Matches:         {}", total_matches);
        eprintln!("  Elapsed:         {:.3}s", elapsed);
        eprintln!("  Throughput:      {}", format_rate(total_symbols, elapsed));
        eprintln!(
            "  Transitions:     {} of {} cells computed",
            stats.transitions_resolved, stats.transition_cells
        );
        if interrupted.load(Ordering::Relaxed) {
            eprintln!("  Interrupted:     yes");
        }
    }

    std::process::exit(if total_matches > 0 { 0 } else { 1 });
}
