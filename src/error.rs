//! Error types for the wildstream library

use thiserror::Error;

/// Result type alias for automaton and matching operations
pub type Result<T> = std::result::Result<T, WildcardError>;

/// Main error type for wildcard automaton operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WildcardError {
    /// The pattern has no symbols at all
    #[error("Invalid pattern: pattern must contain at least one symbol")]
    EmptyPattern,

    /// A pattern or text symbol outside the declared alphabet
    #[error("Invalid symbol {} at position {position}", describe_symbol(.symbol))]
    InvalidSymbol {
        /// The offending byte
        symbol: u8,
        /// 0-based position in the pattern or in the text stream
        position: usize,
    },

    /// A symbol outside the alphabet, passed where no stream position applies
    #[error("Symbol {} is outside the alphabet", describe_symbol(.symbol))]
    UnknownSymbol {
        /// The offending byte
        symbol: u8,
    },

    /// Pattern too long to address its nodes with 32-bit ids
    #[error("Resource limit exceeded: pattern length {0} is too large")]
    PatternTooLong(usize),

    /// Alphabet range cannot be used
    #[error("Invalid alphabet: {0}")]
    InvalidAlphabet(String),

    /// Explicit fragment list is inconsistent with the pattern length
    #[error("Invalid fragments: {0}")]
    InvalidFragments(String),

    /// I/O errors while reading a symbol stream
    #[error("I/O error: {0}")]
    Io(String),

    /// Malformed configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

fn describe_symbol(symbol: &u8) -> String {
    if symbol.is_ascii_graphic() {
        format!("'{}'", *symbol as char)
    } else {
        format!("0x{:02x}", symbol)
    }
}

impl From<std::io::Error> for WildcardError {
    fn from(err: std::io::Error) -> Self {
        WildcardError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for WildcardError {
    fn from(err: serde_json::Error) -> Self {
        WildcardError::Config(err.to_string())
    }
}
