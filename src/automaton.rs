//! Wildcard pattern automaton
//!
//! Construction runs once per pattern:
//!
//! ```text
//! pattern --split--> fragments --insert--> trie --BFS--> suffix/dictionary links
//! ```
//!
//! The finished automaton is immutable apart from its transition cache, which
//! fills in lazily as streams are matched. Any number of
//! [`StreamMatcher`]s can run over one automaton, also from several threads.

use crate::alphabet::{Alphabet, MatchMode};
use crate::error::{Result, WildcardError};
use crate::links::resolve_links;
use crate::matcher::{Matches, StreamMatcher};
use crate::options::AutomatonOptions;
use crate::pattern::WildcardPattern;
use crate::transitions::TransitionCache;
use crate::trie::{NodeId, Trie};
use serde::Serialize;

/// Compiled wildcard pattern ready for streaming
#[derive(Debug)]
pub struct Automaton {
    options: AutomatonOptions,
    pattern: WildcardPattern,
    trie: Trie,
    transitions: TransitionCache,
}

/// Size figures of a built automaton
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AutomatonStats {
    /// Pattern length `P`
    pub pattern_len: usize,
    /// Number of fragments `K`
    pub fragment_count: usize,
    /// Number of textually distinct fragments
    pub distinct_fragments: usize,
    /// Wildcard positions in the pattern
    pub wildcard_count: usize,
    /// Trie nodes, root included
    pub node_count: usize,
    /// Nodes terminating at least one fragment
    pub terminal_nodes: usize,
    /// Alphabet size
    pub alphabet_len: usize,
    /// Transition cells computed so far
    pub transitions_resolved: usize,
    /// Total transition cells
    pub transition_cells: usize,
}

impl Automaton {
    /// Compile `pattern` with default options (`?` over `a-z`, case-sensitive).
    ///
    /// # Example
    ///
    /// ```
    /// use wildstream::Automaton;
    ///
    /// let automaton = Automaton::new("a?b")?;
    /// assert_eq!(automaton.find_all(b"aabzaxb")?, vec![0, 4]);
    /// # Ok::<(), wildstream::WildcardError>(())
    /// ```
    pub fn new(pattern: &str) -> Result<Self> {
        Self::build(pattern.as_bytes(), AutomatonOptions::default())
    }

    /// Compile `pattern` with explicit options
    pub fn build(pattern: &[u8], options: AutomatonOptions) -> Result<Self> {
        options.validate()?;
        let parsed = WildcardPattern::parse(pattern, &options)?;
        Self::from_pattern(parsed, options)
    }

    /// Compile a pattern given as pre-split fragments plus total length
    pub fn from_fragments<S: AsRef<[u8]>>(
        fragments: &[(S, usize)],
        len: usize,
        options: AutomatonOptions,
    ) -> Result<Self> {
        options.validate()?;
        let parsed = WildcardPattern::from_fragments(fragments, len, &options)?;
        Self::from_pattern(parsed, options)
    }

    /// Compile an already parsed pattern
    pub fn from_pattern(pattern: WildcardPattern, options: AutomatonOptions) -> Result<Self> {
        // Node ids and counting-buffer slots are 32-bit
        if pattern.len() >= (u32::MAX / 2) as usize {
            return Err(WildcardError::PatternTooLong(pattern.len()));
        }

        let mut trie = Trie::new(options.alphabet.len());
        for fragment in pattern.fragments() {
            trie.insert(fragment);
        }

        let transitions = TransitionCache::new(&trie);
        resolve_links(&mut trie, &transitions);

        log::debug!(
            "built automaton: pattern length {}, {} fragments, {} nodes ({} terminal)",
            pattern.len(),
            pattern.fragment_count(),
            trie.len(),
            trie.terminal_count()
        );

        Ok(Self {
            options,
            pattern,
            trie,
            transitions,
        })
    }

    /// Start a new matching run over a fresh stream
    pub fn matcher(&self) -> StreamMatcher<'_> {
        StreamMatcher::new(self)
    }

    /// Iterate over match offsets while pulling symbols from `symbols`
    pub fn find_iter<I>(
        &self,
        symbols: I,
    ) -> Matches<'_, std::iter::Map<I::IntoIter, fn(u8) -> Result<u8>>>
    where
        I: IntoIterator<Item = u8>,
    {
        let ok: fn(u8) -> Result<u8> = Ok;
        Matches::new(self.matcher(), symbols.into_iter().map(ok))
    }

    /// All match offsets in `text`, in increasing order
    pub fn find_all(&self, text: &[u8]) -> Result<Vec<usize>> {
        self.find_iter(text.iter().copied()).collect()
    }

    /// Transition from `node` on the text symbol `symbol`
    ///
    /// # Errors
    ///
    /// [`WildcardError::UnknownSymbol`] when `symbol` is outside the alphabet.
    ///
    /// # Panics
    ///
    /// When `node` does not belong to this automaton's trie.
    pub fn transition(&self, node: NodeId, symbol: u8) -> Result<NodeId> {
        let index = self
            .alphabet()
            .index(symbol, self.mode())
            .ok_or(WildcardError::UnknownSymbol { symbol })?;
        Ok(self.next_state(node, index))
    }

    #[inline]
    pub(crate) fn next_state(&self, node: NodeId, index: u8) -> NodeId {
        self.transitions.next(&self.trie, node, index)
    }

    /// The parsed pattern
    pub fn pattern(&self) -> &WildcardPattern {
        &self.pattern
    }

    /// The fragment trie
    pub fn trie(&self) -> &Trie {
        &self.trie
    }

    /// Options the automaton was built with
    pub fn options(&self) -> &AutomatonOptions {
        &self.options
    }

    /// Symbol alphabet
    pub fn alphabet(&self) -> Alphabet {
        self.options.alphabet
    }

    /// Case handling
    pub fn mode(&self) -> MatchMode {
        self.options.mode
    }

    /// Size figures
    pub fn stats(&self) -> AutomatonStats {
        AutomatonStats {
            pattern_len: self.pattern.len(),
            fragment_count: self.pattern.fragment_count(),
            distinct_fragments: self.pattern.distinct_fragment_count(),
            wildcard_count: self.pattern.wildcard_count(),
            node_count: self.trie.len(),
            terminal_nodes: self.trie.terminal_count(),
            alphabet_len: self.trie.alphabet_len(),
            transitions_resolved: self.transitions.resolved_count(),
            transition_cells: self.transitions.capacity(),
        }
    }
}
