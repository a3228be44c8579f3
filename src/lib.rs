//! Wildstream - Streaming Wildcard Substring Search
//!
//! Wildstream finds every occurrence of a pattern with single-symbol
//! wildcards (`?` by default) in a text that is read exactly once, one symbol
//! at a time, with memory bounded by the pattern length.
//!
//! # Quick Start
//!
//! ```rust
//! use wildstream::Automaton;
//!
//! // "ab" at offset 0 and "d" at offset 3, anything in between
//! let automaton = Automaton::new("ab?d")?;
//!
//! assert_eq!(automaton.find_all(b"abcdxabzd")?, vec![0, 5]);
//! # Ok::<(), wildstream::WildcardError>(())
//! ```
//!
//! Texts that do not fit in memory are fed symbol by symbol:
//!
//! ```rust
//! use wildstream::Automaton;
//!
//! let automaton = Automaton::new("a?a")?;
//! let mut matcher = automaton.matcher();
//!
//! let mut found = Vec::new();
//! for &symbol in b"abacada" {
//!     if let Some(start) = matcher.push(symbol)? {
//!         found.push(start);
//!     }
//! }
//! assert_eq!(found, vec![0, 2, 4]);
//! # Ok::<(), wildstream::WildcardError>(())
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  Construction (once per pattern)             │
//! ├──────────────────────────────────────────────┤
//! │  1. Fragmenter    "ab?d" -> ab@0, d@3        │
//! │  2. Trie builder  fragments -> node arena    │
//! │  3. Link resolver BFS suffix/dictionary links│
//! └──────────────────────────────────────────────┘
//!          ↓
//! ┌──────────────────────────────────────────────┐
//! │  Streaming (per text)                        │
//! ├──────────────────────────────────────────────┤
//! │  goto (memoized) -> dictionary chain ->      │
//! │  credits in a 2P-slot circular buffer        │
//! └──────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod alphabet;
pub mod automaton;
/// Error types for automaton construction and matching
pub mod error;
pub mod input;
pub mod links;
pub mod matcher;
pub mod options;
pub mod pattern;
pub mod transitions;
pub mod trie;

pub use crate::alphabet::{Alphabet, MatchMode};
pub use crate::automaton::{Automaton, AutomatonStats};
pub use crate::error::{Result, WildcardError};
pub use crate::matcher::{Matches, StreamMatcher};
pub use crate::options::AutomatonOptions;
pub use crate::pattern::{Fragment, WildcardPattern};
pub use crate::trie::NodeId;
