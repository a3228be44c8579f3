//! Symbol alphabet and match mode
//!
//! The automaton indexes children and transitions by symbol position, so every
//! pattern and text byte is first mapped into `0..alphabet.len()`. Alphabets are
//! contiguous byte ranges; the default is the 26 lowercase ASCII letters.

use crate::error::{Result, WildcardError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Matching mode for the automaton
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMode {
    /// Case-sensitive matching
    #[default]
    CaseSensitive,
    /// ASCII case-insensitive matching (letters folded to whichever case the
    /// alphabet holds, lower case first)
    CaseInsensitive,
}

/// A contiguous, inclusive range of byte symbols
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Alphabet {
    first: u8,
    last: u8,
}

impl Alphabet {
    /// Lowercase ASCII letters `a..=z`
    pub const LOWERCASE: Alphabet = Alphabet {
        first: b'a',
        last: b'z',
    };

    /// Create an alphabet spanning `first..=last`
    pub fn new(first: u8, last: u8) -> Result<Self> {
        if first > last {
            return Err(WildcardError::InvalidAlphabet(format!(
                "range start {:?} is after range end {:?}",
                first as char, last as char
            )));
        }
        Ok(Self { first, last })
    }

    /// Number of symbols
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        (self.last - self.first) as usize + 1
    }

    /// First symbol of the range
    pub fn first(&self) -> u8 {
        self.first
    }

    /// Last symbol of the range (inclusive)
    pub fn last(&self) -> u8 {
        self.last
    }

    /// Whether `symbol` belongs to the alphabet as-is
    pub fn contains(&self, symbol: u8) -> bool {
        (self.first..=self.last).contains(&symbol)
    }

    /// Map a symbol to its index.
    ///
    /// In [`MatchMode::CaseInsensitive`] a letter maps to its lower-case form
    /// when the alphabet contains it, otherwise to its upper-case form, so
    /// both cases of a letter always share one index.
    #[inline]
    pub fn index(&self, symbol: u8, mode: MatchMode) -> Option<u8> {
        let symbol = match mode {
            MatchMode::CaseSensitive => symbol,
            MatchMode::CaseInsensitive => {
                let lower = symbol.to_ascii_lowercase();
                if self.contains(lower) {
                    lower
                } else {
                    symbol.to_ascii_uppercase()
                }
            }
        };
        if self.contains(symbol) {
            Some(symbol - self.first)
        } else {
            None
        }
    }

    /// Like [`index`](Self::index) but reports the position of a rejected symbol.
    pub(crate) fn index_at(&self, symbol: u8, mode: MatchMode, position: usize) -> Result<u8> {
        self.index(symbol, mode)
            .ok_or(WildcardError::InvalidSymbol { symbol, position })
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::LOWERCASE
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.first as char, self.last as char)
    }
}

impl FromStr for Alphabet {
    type Err = WildcardError;

    /// Parse `"a-z"` style ranges; both ends must be single ASCII characters.
    fn from_str(s: &str) -> Result<Self> {
        match s.as_bytes() {
            [first, b'-', last] if first.is_ascii() && last.is_ascii() => {
                Alphabet::new(*first, *last)
            }
            _ => Err(WildcardError::InvalidAlphabet(format!(
                "expected a range like \"a-z\", got {:?}",
                s
            ))),
        }
    }
}

impl TryFrom<String> for Alphabet {
    type Error = WildcardError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Alphabet> for String {
    fn from(alphabet: Alphabet) -> Self {
        alphabet.to_string()
    }
}
