//! Lazily memoized goto function
//!
//! `next(node, symbol)` is the automaton's transition: the trie child when one
//! exists, the root's self-loop at the root, and otherwise the transition of
//! the node's suffix link. Each `(node, symbol)` cell is computed once and then
//! served from the table.
//!
//! Cells are `AtomicU32`s so the table can be filled through a shared
//! reference. Two threads racing on the same cell compute and store the same
//! node id, so the race is benign and the automaton stays `Sync`.

use crate::trie::{NodeId, Trie};
use std::sync::atomic::{AtomicU32, Ordering};

const UNRESOLVED: u32 = u32::MAX;

/// Flat `node x symbol` transition table
#[derive(Debug)]
pub struct TransitionCache {
    cells: Box<[AtomicU32]>,
    alphabet_len: usize,
}

impl TransitionCache {
    /// Empty table sized for `trie`
    pub fn new(trie: &Trie) -> Self {
        let alphabet_len = trie.alphabet_len();
        let cells = (0..trie.len() * alphabet_len)
            .map(|_| AtomicU32::new(UNRESOLVED))
            .collect();
        Self {
            cells,
            alphabet_len,
        }
    }

    #[inline]
    fn cell(&self, node: NodeId, symbol: u8) -> &AtomicU32 {
        &self.cells[node.index() * self.alphabet_len + symbol as usize]
    }

    /// Cached transition, if it has been computed
    #[inline]
    pub fn cached(&self, node: NodeId, symbol: u8) -> Option<NodeId> {
        match self.cell(node, symbol).load(Ordering::Relaxed) {
            UNRESOLVED => None,
            raw => Some(NodeId::from_raw(raw)),
        }
    }

    #[inline]
    fn store(&self, node: NodeId, symbol: u8, target: NodeId) {
        self.cell(node, symbol).store(target.raw(), Ordering::Relaxed);
    }

    /// Transition from `node` on `symbol` (an alphabet index).
    ///
    /// Suffix links of every node on the walked chain must already be
    /// resolved; link resolution only asks for nodes shallower than the one
    /// being resolved, which breadth-first order guarantees.
    pub fn next(&self, trie: &Trie, node: NodeId, symbol: u8) -> NodeId {
        if let Some(target) = self.cached(node, symbol) {
            return target;
        }

        // Walk the suffix chain until an answer is known, then memoize it on
        // every node passed along the way.
        let mut pending = Vec::new();
        let mut current = node;
        let target = loop {
            if let Some(target) = self.cached(current, symbol) {
                break target;
            }
            let state = trie.node(current);
            if let Some(child) = state.child(symbol) {
                self.store(current, symbol, child);
                break child;
            }
            if current == NodeId::ROOT {
                self.store(current, symbol, NodeId::ROOT);
                break NodeId::ROOT;
            }
            pending.push(current);
            current = state.suffix_link();
        };

        for id in pending {
            self.store(id, symbol, target);
        }
        target
    }

    /// Number of cells computed so far
    pub fn resolved_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| c.load(Ordering::Relaxed) != UNRESOLVED)
            .count()
    }

    /// Total number of cells
    pub fn capacity(&self) -> usize {
        self.cells.len()
    }
}
