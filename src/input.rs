//! Symbol streams from files, stdin and gzip archives
//!
//! Inputs are opened the way the rest of the tooling opens them: `-` means
//! stdin, and files ending in `.gz` are decompressed on the fly. A
//! [`Symbols`] iterator then yields bytes one by one, optionally skipping
//! ASCII whitespace so that line breaks in a text file do not count as
//! positions.
//!
//! ```rust,no_run
//! use wildstream::{input, Automaton};
//!
//! let automaton = Automaton::new("ab?d")?;
//! let symbols = input::Symbols::new(input::open("corpus.txt.gz")?, true);
//! for start in automaton.matcher().into_matches(symbols) {
//!     println!("{}", start?);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::error::{Result, WildcardError};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{self, stdin, BufRead, BufReader};
use std::path::Path;

/// Buffer size for file reading (128KB)
const BUFFER_SIZE: usize = 128 * 1024;

/// Open a file with automatic gzip detection based on file extension
///
/// Files ending in `.gz` (case-insensitive) are decompressed. The path `-`
/// reads from stdin.
pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Box<dyn BufRead + Send>> {
    let path = path.as_ref();

    if path.to_str() == Some("-") {
        return Ok(Box::new(BufReader::with_capacity(BUFFER_SIZE, stdin())));
    }

    let file = File::open(path)?;
    let is_gzip = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false);

    Ok(from_file(file, is_gzip))
}

/// Create a reader from an already-opened file with explicit gzip flag
pub fn from_file(file: File, is_gzip: bool) -> Box<dyn BufRead + Send> {
    if is_gzip {
        Box::new(BufReader::with_capacity(BUFFER_SIZE, GzDecoder::new(file)))
    } else {
        Box::new(BufReader::with_capacity(BUFFER_SIZE, file))
    }
}

/// Single-pass iterator over the bytes of a reader
pub struct Symbols<R> {
    reader: R,
    skip_whitespace: bool,
    failed: bool,
}

impl<R: BufRead> Symbols<R> {
    /// Iterate over `reader`; with `skip_whitespace`, ASCII whitespace is
    /// dropped instead of yielded.
    pub fn new(reader: R, skip_whitespace: bool) -> Self {
        Self {
            reader,
            skip_whitespace,
            failed: false,
        }
    }

    /// Give back the underlying reader
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: BufRead> Iterator for Symbols<R> {
    type Item = Result<u8>;

    fn next(&mut self) -> Option<Result<u8>> {
        if self.failed {
            return None;
        }
        loop {
            let symbol = match self.reader.fill_buf() {
                Ok([]) => return None,
                Ok(buf) => buf[0],
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e.into()));
                }
            };
            self.reader.consume(1);
            if self.skip_whitespace && symbol.is_ascii_whitespace() {
                continue;
            }
            return Some(Ok(symbol));
        }
    }
}

/// Read the next whitespace-delimited token, skipping leading whitespace.
///
/// Stops right after the whitespace byte that ends the token, leaving the
/// rest of the reader untouched. Fails on a reader with no token at all.
pub fn read_token<R: BufRead>(reader: &mut R) -> Result<Vec<u8>> {
    let mut token = Vec::new();
    loop {
        let (used, finished) = {
            let buf = match reader.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            if buf.is_empty() {
                break;
            }

            let mut used = 0;
            let mut finished = false;
            for &byte in buf {
                used += 1;
                if byte.is_ascii_whitespace() {
                    if !token.is_empty() {
                        finished = true;
                        break;
                    }
                } else {
                    token.push(byte);
                }
            }
            (used, finished)
        };
        reader.consume(used);
        if finished {
            break;
        }
    }

    if token.is_empty() {
        return Err(WildcardError::EmptyPattern);
    }
    Ok(token)
}
