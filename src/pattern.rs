//! Wildcard pattern fragmentation
//!
//! A pattern such as `ab??c?de` is split at its wildcards into maximal literal
//! fragments, each remembering where it starts inside the pattern:
//!
//! ```text
//! ab??c?de  ->  "ab"@0, "c"@4, "de"@6     (pattern length 8)
//! ```
//!
//! A text window matches the pattern when every fragment occurs at its offset
//! within the window; wildcard positions match anything.

use crate::error::{Result, WildcardError};
use crate::options::AutomatonOptions;
use rustc_hash::FxHashSet;

/// A maximal run of non-wildcard symbols
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Normalized symbols as they appear in the pattern
    text: Vec<u8>,
    /// Alphabet indices of `text`
    indices: Vec<u8>,
    /// 0-based start offset within the pattern
    offset: usize,
}

impl Fragment {
    /// Fragment symbols (after case normalization)
    pub fn text(&self) -> &[u8] {
        &self.text
    }

    /// Alphabet indices of the fragment symbols
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    /// Start offset within the pattern
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of symbols in the fragment (never zero)
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Offset one past the fragment's last symbol
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }
}

/// A parsed wildcard pattern: total length plus its literal fragments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WildcardPattern {
    len: usize,
    fragments: Vec<Fragment>,
}

impl WildcardPattern {
    /// Split `pattern` at every occurrence of the configured wildcard.
    ///
    /// Adjacent wildcards produce no fragment; a pattern without wildcards is a
    /// single fragment at offset 0; an all-wildcard pattern has no fragments.
    ///
    /// # Errors
    ///
    /// - [`WildcardError::EmptyPattern`] for an empty pattern
    /// - [`WildcardError::InvalidSymbol`] for a non-wildcard symbol outside the alphabet
    pub fn parse(pattern: &[u8], options: &AutomatonOptions) -> Result<Self> {
        if pattern.is_empty() {
            return Err(WildcardError::EmptyPattern);
        }

        let mut fragments = Vec::new();
        let mut current: Option<Fragment> = None;

        for (position, &symbol) in pattern.iter().enumerate() {
            if symbol == options.wildcard {
                if let Some(fragment) = current.take() {
                    fragments.push(fragment);
                }
                continue;
            }

            let index = options.alphabet.index_at(symbol, options.mode, position)?;
            let fragment = current.get_or_insert_with(|| Fragment {
                text: Vec::new(),
                indices: Vec::new(),
                offset: position,
            });
            fragment.text.push(options.alphabet.first() + index);
            fragment.indices.push(index);
        }

        if let Some(fragment) = current {
            fragments.push(fragment);
        }

        Ok(Self {
            len: pattern.len(),
            fragments,
        })
    }

    /// Build a pattern from fragments that were already split, together with
    /// the total pattern length. Positions not covered by a fragment act as
    /// wildcards.
    ///
    /// Fragments must be non-empty, listed by increasing offset, must not
    /// overlap and must end within `len`.
    pub fn from_fragments<S: AsRef<[u8]>>(
        fragments: &[(S, usize)],
        len: usize,
        options: &AutomatonOptions,
    ) -> Result<Self> {
        if len == 0 {
            return Err(WildcardError::EmptyPattern);
        }

        let mut parsed = Vec::with_capacity(fragments.len());
        let mut previous_end = 0usize;

        for (i, (text, offset)) in fragments.iter().enumerate() {
            let text = text.as_ref();
            let offset = *offset;
            if text.is_empty() {
                return Err(WildcardError::InvalidFragments(format!(
                    "fragment {} is empty",
                    i
                )));
            }
            if offset < previous_end {
                return Err(WildcardError::InvalidFragments(format!(
                    "fragment {} at offset {} overlaps or precedes the previous fragment ending at {}",
                    i, offset, previous_end
                )));
            }
            let end = offset + text.len();
            if end > len {
                return Err(WildcardError::InvalidFragments(format!(
                    "fragment {} ends at {} beyond pattern length {}",
                    i, end, len
                )));
            }

            let indices = text
                .iter()
                .enumerate()
                .map(|(j, &symbol)| options.alphabet.index_at(symbol, options.mode, offset + j))
                .collect::<Result<Vec<u8>>>()?;
            let text = indices
                .iter()
                .map(|&index| options.alphabet.first() + index)
                .collect();

            parsed.push(Fragment {
                text,
                indices,
                offset,
            });
            previous_end = end;
        }

        Ok(Self {
            len,
            fragments: parsed,
        })
    }

    /// Total pattern length `P`, wildcards included
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Fragments in offset order
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Number of fragments `K`
    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }

    /// Number of textually distinct fragments
    pub fn distinct_fragment_count(&self) -> usize {
        self.fragments
            .iter()
            .map(|f| f.text.as_slice())
            .collect::<FxHashSet<_>>()
            .len()
    }

    /// Number of wildcard positions
    pub fn wildcard_count(&self) -> usize {
        self.len - self.fragments.iter().map(Fragment::len).sum::<usize>()
    }

    /// Whether the pattern consists only of wildcards
    pub fn is_all_wildcards(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Check a text window against the pattern directly.
    ///
    /// `window` must hold exactly [`len`](Self::len) symbols. Used by callers
    /// that want to confirm a reported match.
    pub fn matches_window(&self, window: &[u8], options: &AutomatonOptions) -> bool {
        window.len() == self.len
            && self.fragments.iter().all(|f| {
                window[f.offset..f.end()]
                    .iter()
                    .zip(&f.indices)
                    .all(|(&symbol, &index)| {
                        options.alphabet.index(symbol, options.mode) == Some(index)
                    })
            })
    }
}
