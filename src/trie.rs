//! Fragment trie
//!
//! All nodes live in a single arena (`Vec<Node>`) and refer to each other by
//! [`NodeId`]. Children are owned by position in the arena; parent, suffix and
//! dictionary links are plain ids, so the graph never holds owning cycles.

use crate::pattern::Fragment;
use std::fmt;

/// Stable handle of a node inside the automaton arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// The root node, present in every trie
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    pub(crate) fn from_raw(raw: u32) -> Self {
        NodeId(raw)
    }

    #[inline]
    pub(crate) fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One distinct fragment prefix
#[derive(Debug, Clone)]
pub struct Node {
    children: Box<[Option<NodeId>]>,
    parent: NodeId,
    symbol: u8,
    terminal_offsets: Vec<usize>,
    depth: usize,
    pub(crate) suffix_link: NodeId,
    pub(crate) dictionary_link: NodeId,
}

impl Node {
    fn new(alphabet_len: usize, parent: NodeId, symbol: u8, depth: usize) -> Self {
        Self {
            children: vec![None; alphabet_len].into_boxed_slice(),
            parent,
            symbol,
            terminal_offsets: Vec::new(),
            depth,
            // Links point at the root until resolved
            suffix_link: NodeId::ROOT,
            dictionary_link: NodeId::ROOT,
        }
    }

    /// Direct trie child for a symbol index
    #[inline]
    pub fn child(&self, symbol: u8) -> Option<NodeId> {
        self.children.get(symbol as usize).copied().flatten()
    }

    /// Children in symbol order
    pub fn children(&self) -> impl Iterator<Item = (u8, NodeId)> + '_ {
        self.children
            .iter()
            .enumerate()
            .filter_map(|(symbol, child)| child.map(|id| (symbol as u8, id)))
    }

    /// Parent node (the root is its own parent)
    pub fn parent(&self) -> NodeId {
        self.parent
    }

    /// Symbol index on the edge from the parent
    pub fn symbol(&self) -> u8 {
        self.symbol
    }

    /// Pattern offsets of the fragments that end at this node
    pub fn terminal_offsets(&self) -> &[usize] {
        &self.terminal_offsets
    }

    /// Whether at least one fragment ends here
    pub fn is_terminal(&self) -> bool {
        !self.terminal_offsets.is_empty()
    }

    /// Length of the prefix this node spells; equals the fragment length on
    /// terminal nodes
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Longest proper suffix that is also a trie node
    pub fn suffix_link(&self) -> NodeId {
        self.suffix_link
    }

    /// Nearest terminal node on the suffix-link chain, or the root
    pub fn dictionary_link(&self) -> NodeId {
        self.dictionary_link
    }
}

/// Arena-backed trie of pattern fragments
#[derive(Debug, Clone)]
pub struct Trie {
    nodes: Vec<Node>,
    alphabet_len: usize,
}

impl Trie {
    /// Create a trie holding only the root
    pub fn new(alphabet_len: usize) -> Self {
        Self {
            nodes: vec![Node::new(alphabet_len, NodeId::ROOT, 0, 0)],
            alphabet_len,
        }
    }

    /// Insert a fragment, creating nodes for prefixes not seen before, and
    /// record its offset on the node where it ends.
    ///
    /// Returns the terminal node.
    pub fn insert(&mut self, fragment: &Fragment) -> NodeId {
        let mut current = NodeId::ROOT;

        for (i, &symbol) in fragment.indices().iter().enumerate() {
            current = match self.nodes[current.index()].child(symbol) {
                Some(next) => next,
                None => {
                    let new_id = NodeId(self.nodes.len() as u32);
                    self.nodes
                        .push(Node::new(self.alphabet_len, current, symbol, i + 1));
                    self.nodes[current.index()].children[symbol as usize] = Some(new_id);
                    new_id
                }
            };
        }

        let terminal = &mut self.nodes[current.index()];
        debug_assert_eq!(terminal.depth, fragment.len());
        terminal.terminal_offsets.push(fragment.offset());
        current
    }

    /// Node by id
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Number of nodes, root included
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Alphabet size the trie was built for
    pub fn alphabet_len(&self) -> usize {
        self.alphabet_len
    }

    /// Number of nodes that terminate at least one fragment
    pub fn terminal_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_terminal()).count()
    }

    /// Terminal nodes reachable from `start` through dictionary links:
    /// `start` itself when terminal, then each dictionary link until the root.
    pub fn terminal_chain(&self, start: NodeId) -> TerminalChain<'_> {
        let node = self.node(start);
        let first = if node.is_terminal() {
            Some(start)
        } else if start == NodeId::ROOT {
            None
        } else {
            Some(node.dictionary_link).filter(|&id| id != NodeId::ROOT)
        };
        TerminalChain {
            trie: self,
            next: first,
        }
    }
}

/// Iterator returned by [`Trie::terminal_chain`]
pub struct TerminalChain<'a> {
    trie: &'a Trie,
    next: Option<NodeId>,
}

impl<'a> Iterator for TerminalChain<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<&'a Node> {
        let id = self.next?;
        let node = self.trie.node(id);
        self.next = Some(node.dictionary_link).filter(|&link| link != NodeId::ROOT);
        Some(node)
    }
}
