use anyhow::{bail, Context, Result};
use clap::Args;
use std::path::PathBuf;
use wildstream::{Alphabet, AutomatonOptions, MatchMode};

/// Options shared by every command that compiles a pattern
#[derive(Args, Debug, Clone)]
pub struct PatternArgs {
    /// Wildcard symbol (default: '?')
    #[arg(short = 'w', long, value_name = "CHAR")]
    pub wildcard: Option<char>,

    /// Alphabet as an inclusive range, e.g. "a-z" (default) or "0-9"
    #[arg(short = 'a', long, value_name = "RANGE")]
    pub alphabet: Option<String>,

    /// Fold ASCII letters to lower case in pattern and text
    #[arg(short = 'i', long)]
    pub case_insensitive: bool,

    /// JSON file with options; command-line flags take precedence
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl PatternArgs {
    /// Resolve the effective automaton options
    pub fn options(&self) -> Result<AutomatonOptions> {
        let mut options = match &self.config {
            Some(path) => AutomatonOptions::from_json_file(path)
                .with_context(|| format!("Failed to load options: {}", path.display()))?,
            None => AutomatonOptions::default(),
        };

        if let Some(wildcard) = self.wildcard {
            if !wildcard.is_ascii() {
                bail!("Wildcard must be an ASCII character, got {:?}", wildcard);
            }
            options.wildcard = wildcard as u8;
        }
        if let Some(alphabet) = &self.alphabet {
            options.alphabet = alphabet
                .parse::<Alphabet>()
                .with_context(|| format!("Invalid --alphabet {:?}", alphabet))?;
        }
        if self.case_insensitive {
            options.mode = MatchMode::CaseInsensitive;
        }

        options.validate()?;
        Ok(options)
    }
}

/// Parse a thread count: "auto" or "0" selects all cores
pub fn parse_threads(threads: Option<&str>) -> Result<usize> {
    match threads {
        None => Ok(1),
        Some("auto") | Some("0") => Ok(std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)),
        Some(n) => n
            .parse::<usize>()
            .with_context(|| format!("Invalid thread count: {}", n)),
    }
}

/// Human-readable rate for statistics output
pub fn format_rate(symbols: usize, seconds: f64) -> String {
    if seconds <= 0.0 {
        return "n/a".to_string();
    }
    let rate = symbols as f64 / seconds;
    if rate >= 1e9 {
        format!("{:.2} G symbols/s", rate / 1e9)
    } else if rate >= 1e6 {
        format!("{:.2} M symbols/s", rate / 1e6)
    } else if rate >= 1e3 {
        format!("{:.2} K symbols/s", rate / 1e3)
    } else {
        format!("{:.0} symbols/s", rate)
    }
}

/// Display form of a pattern fragment
pub fn fragment_text(text: &[u8]) -> String {
    String::from_utf8_lossy(text).into_owned()
}
