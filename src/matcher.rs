//! Streaming matcher
//!
//! Consumes one symbol at a time and reports every offset where the whole
//! wildcard pattern matches. After symbol number `n` (1-based), the automaton
//! state tells which fragments end exactly at `n`. A fragment with pattern
//! offset `o` and length `d` ending there places the pattern start at
//! `n - (o + d)`, and that start's slot in the counting buffer gets one credit.
//! A start `s` is decided once `n == s + P`: it matches when its slot holds
//! one credit per fragment.
//!
//! Live starts always lie in `(n - P, n]`, so the buffer holds `2 * P` slots
//! indexed modulo its length, and each slot is cleared right after its start
//! is decided. Memory stays `O(P)` however long the stream runs.

use crate::automaton::Automaton;
use crate::error::Result;
use crate::trie::NodeId;

/// Matching state for one text stream over a shared [`Automaton`]
#[derive(Debug, Clone)]
pub struct StreamMatcher<'a> {
    automaton: &'a Automaton,
    state: NodeId,
    /// Symbols consumed so far
    position: usize,
    /// Credits per candidate start, slot `start % counts.len()`; empty when
    /// the pattern has no fragments
    counts: Box<[u32]>,
}

impl<'a> StreamMatcher<'a> {
    /// Fresh matcher positioned before the first symbol
    pub fn new(automaton: &'a Automaton) -> Self {
        let pattern = automaton.pattern();
        let slots = if pattern.is_all_wildcards() {
            0
        } else {
            2 * pattern.len()
        };
        Self {
            automaton,
            state: NodeId::ROOT,
            position: 0,
            counts: vec![0; slots].into_boxed_slice(),
        }
    }

    /// Consume one text symbol.
    ///
    /// Returns the start offset of the match completed by this symbol, if
    /// any. At most one match can complete per symbol.
    ///
    /// # Errors
    ///
    /// [`WildcardError::InvalidSymbol`](crate::WildcardError::InvalidSymbol)
    /// when `symbol` is outside the alphabet; the matcher does not advance.
    pub fn push(&mut self, symbol: u8) -> Result<Option<usize>> {
        let index = self
            .automaton
            .alphabet()
            .index_at(symbol, self.automaton.mode(), self.position)?;
        Ok(self.push_index(index))
    }

    /// Consume one symbol given as an alphabet index.
    ///
    /// # Panics
    ///
    /// When `index` is not below the alphabet length.
    pub fn push_index(&mut self, index: u8) -> Option<usize> {
        let automaton = self.automaton;
        let pattern = automaton.pattern();
        assert!(
            (index as usize) < automaton.trie().alphabet_len(),
            "symbol index {} outside alphabet",
            index
        );

        self.state = automaton.next_state(self.state, index);
        let consumed = self.position + 1;
        self.position = consumed;

        if pattern.is_all_wildcards() {
            return consumed.checked_sub(pattern.len());
        }

        let slots = self.counts.len();
        for node in automaton.trie().terminal_chain(self.state) {
            for &offset in node.terminal_offsets() {
                let span = offset + node.depth();
                if consumed >= span {
                    let start = consumed - span;
                    debug_assert!(start + pattern.len() >= consumed);
                    self.counts[start % slots] += 1;
                }
            }
        }

        let start = consumed.checked_sub(pattern.len())?;
        let slot = start % slots;
        let credits = std::mem::take(&mut self.counts[slot]);
        debug_assert!(credits as usize <= pattern.fragment_count());
        (credits as usize == pattern.fragment_count()).then_some(start)
    }

    /// Feed a slice of symbols, appending completed match offsets to `out`
    pub fn push_slice(&mut self, symbols: &[u8], out: &mut Vec<usize>) -> Result<()> {
        for &symbol in symbols {
            if let Some(start) = self.push(symbol)? {
                out.push(start);
            }
        }
        Ok(())
    }

    /// Turn the matcher into an iterator of match offsets over `symbols`
    pub fn into_matches<I>(self, symbols: I) -> Matches<'a, I::IntoIter>
    where
        I: IntoIterator<Item = Result<u8>>,
    {
        Matches::new(self, symbols.into_iter())
    }

    /// Number of symbols consumed so far
    pub fn position(&self) -> usize {
        self.position
    }

    /// Current automaton state
    pub fn state(&self) -> NodeId {
        self.state
    }

    /// Number of counting-buffer slots (fixed for the matcher's lifetime)
    pub fn buffer_len(&self) -> usize {
        self.counts.len()
    }

    /// The automaton this matcher runs on
    pub fn automaton(&self) -> &'a Automaton {
        self.automaton
    }

    /// Forget the consumed stream and start over
    pub fn reset(&mut self) {
        self.state = NodeId::ROOT;
        self.position = 0;
        self.counts.fill(0);
    }
}

/// Iterator of match offsets over a stream of symbols.
///
/// Pulls symbols from the inner iterator only as far as needed to produce the
/// next match. The first error (invalid symbol or failed read) is yielded once
/// and ends the iteration.
pub struct Matches<'a, I> {
    matcher: StreamMatcher<'a>,
    symbols: I,
    done: bool,
}

impl<'a, I> Matches<'a, I>
where
    I: Iterator<Item = Result<u8>>,
{
    /// Match `symbols` with `matcher`
    pub fn new(matcher: StreamMatcher<'a>, symbols: I) -> Self {
        Self {
            matcher,
            symbols,
            done: false,
        }
    }

    /// Symbols consumed so far
    pub fn position(&self) -> usize {
        self.matcher.position()
    }

    /// Give back the matcher, e.g. to inspect its final position
    pub fn into_matcher(self) -> StreamMatcher<'a> {
        self.matcher
    }
}

impl<I> Iterator for Matches<'_, I>
where
    I: Iterator<Item = Result<u8>>,
{
    type Item = Result<usize>;

    fn next(&mut self) -> Option<Result<usize>> {
        if self.done {
            return None;
        }
        for symbol in self.symbols.by_ref() {
            match symbol.and_then(|s| self.matcher.push(s)) {
                Ok(Some(start)) => return Some(Ok(start)),
                Ok(None) => {}
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
        self.done = true;
        None
    }
}
