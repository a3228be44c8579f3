//! Construction options for the automaton
//!
//! Options can be built in code or loaded from a JSON document:
//!
//! ```json
//! { "wildcard": "?", "alphabet": "a-z", "mode": "case-insensitive" }
//! ```

use crate::alphabet::{Alphabet, MatchMode};
use crate::error::{Result, WildcardError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Wildcard marker, alphabet and match mode used to compile a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AutomatonOptions {
    /// Symbol that matches any single text symbol
    #[serde(with = "wildcard_char")]
    pub wildcard: u8,
    /// Symbols allowed in fragments and text
    pub alphabet: Alphabet,
    /// Case handling
    pub mode: MatchMode,
}

impl Default for AutomatonOptions {
    fn default() -> Self {
        Self {
            wildcard: b'?',
            alphabet: Alphabet::LOWERCASE,
            mode: MatchMode::CaseSensitive,
        }
    }
}

impl AutomatonOptions {
    /// Default options: `?` wildcard over `a-z`, case-sensitive
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the wildcard marker
    pub fn wildcard(mut self, wildcard: u8) -> Self {
        self.wildcard = wildcard;
        self
    }

    /// Set the alphabet
    pub fn alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    /// Set the match mode
    pub fn mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Load options from a JSON file; missing fields take their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            WildcardError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let options: Self = serde_json::from_str(&text)?;
        options.validate()?;
        Ok(options)
    }

    /// The wildcard must not be a symbol of the alphabet, or it could never be
    /// written as a literal fragment symbol.
    pub fn validate(&self) -> Result<()> {
        if self.alphabet.index(self.wildcard, self.mode).is_some() {
            return Err(WildcardError::Config(format!(
                "wildcard {:?} lies inside alphabet {}",
                self.wildcard as char, self.alphabet
            )));
        }
        Ok(())
    }
}

mod wildcard_char {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(wildcard: &u8, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_char(*wildcard as char)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
        let c = char::deserialize(deserializer)?;
        if c.is_ascii() {
            Ok(c as u8)
        } else {
            Err(D::Error::custom(format!("wildcard {:?} is not ASCII", c)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let options = AutomatonOptions::default();
        assert_eq!(options.wildcard, b'?');
        assert_eq!(options.alphabet, Alphabet::LOWERCASE);
        assert_eq!(options.mode, MatchMode::CaseSensitive);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_wildcard_inside_alphabet_rejected() {
        let options = AutomatonOptions::new().wildcard(b'x');
        assert!(matches!(options.validate(), Err(WildcardError::Config(_))));

        // Folding makes 'X' collide with 'x' as well
        let options = AutomatonOptions::new()
            .wildcard(b'X')
            .mode(MatchMode::CaseInsensitive);
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_load_partial_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "wildcard": "*", "mode": "case-insensitive" }}"#).unwrap();
        file.flush().unwrap();

        let options = AutomatonOptions::from_json_file(file.path()).unwrap();
        assert_eq!(options.wildcard, b'*');
        assert_eq!(options.alphabet, Alphabet::LOWERCASE);
        assert_eq!(options.mode, MatchMode::CaseInsensitive);
    }

    #[test]
    fn test_load_rejects_unknown_fields() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "wildcards": "*" }}"#).unwrap();
        file.flush().unwrap();

        let err = AutomatonOptions::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, WildcardError::Config(_)));
    }

    #[test]
    fn test_json_roundtrip() {
        let options = AutomatonOptions::new()
            .wildcard(b'.')
            .alphabet("0-9".parse().unwrap());
        let json = serde_json::to_string(&options).unwrap();
        let back: AutomatonOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, options);
    }
}
