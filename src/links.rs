//! Suffix and dictionary link resolution
//!
//! Links are resolved breadth-first from the root: a node's suffix link is the
//! transition of its parent's suffix link on the node's incoming symbol, which
//! needs the parent (one level up) already resolved.

use crate::transitions::TransitionCache;
use crate::trie::{NodeId, Trie};
use std::collections::VecDeque;

/// Resolve `suffix_link` and `dictionary_link` for every node of `trie`.
///
/// The transition cache is filled along the way for every transition the
/// resolution needs.
pub fn resolve_links(trie: &mut Trie, transitions: &TransitionCache) {
    let mut queue = VecDeque::new();

    {
        let root = trie.node_mut(NodeId::ROOT);
        root.suffix_link = NodeId::ROOT;
        root.dictionary_link = NodeId::ROOT;
    }
    queue.extend(trie.node(NodeId::ROOT).children().map(|(_, child)| child));

    while let Some(id) = queue.pop_front() {
        let node = trie.node(id);
        let parent = node.parent();

        let suffix_link = if parent == NodeId::ROOT {
            NodeId::ROOT
        } else {
            let parent_suffix = trie.node(parent).suffix_link();
            transitions.next(trie, parent_suffix, node.symbol())
        };

        let suffix = trie.node(suffix_link);
        let dictionary_link = if suffix.is_terminal() {
            suffix_link
        } else if suffix_link == NodeId::ROOT {
            NodeId::ROOT
        } else {
            suffix.dictionary_link()
        };

        queue.extend(node.children().map(|(_, child)| child));

        log::trace!(
            "node {} (depth {}): suffix link {}, dictionary link {}",
            id,
            node.depth(),
            suffix_link,
            dictionary_link
        );

        let node = trie.node_mut(id);
        node.suffix_link = suffix_link;
        node.dictionary_link = dictionary_link;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::AutomatonOptions;
    use crate::pattern::WildcardPattern;

    fn build(pattern: &str) -> Trie {
        let pattern =
            WildcardPattern::parse(pattern.as_bytes(), &AutomatonOptions::default()).unwrap();
        let mut trie = Trie::new(26);
        for fragment in pattern.fragments() {
            trie.insert(fragment);
        }
        let cache = TransitionCache::new(&trie);
        resolve_links(&mut trie, &cache);
        trie
    }

    /// Follow symbol indices from the root
    fn walk(trie: &Trie, path: &str) -> NodeId {
        path.bytes().fold(NodeId::ROOT, |id, b| {
            trie.node(id).child(b - b'a').unwrap()
        })
    }

    #[test]
    fn test_classic_he_she_his_hers() {
        let trie = build("he?she?his?hers");

        // "she" -> "he"
        assert_eq!(trie.node(walk(&trie, "she")).suffix_link(), walk(&trie, "he"));
        // "sh" -> "h"
        assert_eq!(trie.node(walk(&trie, "sh")).suffix_link(), walk(&trie, "h"));
        // "hers" -> "s"
        assert_eq!(trie.node(walk(&trie, "hers")).suffix_link(), walk(&trie, "s"));
        // "his" -> "s"
        assert_eq!(trie.node(walk(&trie, "his")).suffix_link(), walk(&trie, "s"));
        // depth-one nodes fall back to the root
        assert_eq!(trie.node(walk(&trie, "h")).suffix_link(), NodeId::ROOT);
    }

    #[test]
    fn test_dictionary_links() {
        let trie = build("he?she?his?hers");

        // "she" is terminal itself; its dictionary link is the terminal "he"
        assert_eq!(trie.node(walk(&trie, "she")).dictionary_link(), walk(&trie, "he"));
        // "hers" suffix "s" is not terminal and leads to the root
        assert_eq!(trie.node(walk(&trie, "hers")).dictionary_link(), NodeId::ROOT);
        // "sh" -> "h" (not terminal) -> root
        assert_eq!(trie.node(walk(&trie, "sh")).dictionary_link(), NodeId::ROOT);
    }

    #[test]
    fn test_dictionary_link_skips_non_terminal() {
        // "abc" -> "bc" (prefix of "bcz", not terminal) -> "c" (terminal)
        let trie = build("c?bcz?abcd");
        let abc = walk(&trie, "abc");
        assert_eq!(trie.node(abc).suffix_link(), walk(&trie, "bc"));
        assert_eq!(trie.node(abc).dictionary_link(), walk(&trie, "c"));
    }

    #[test]
    fn test_root_links() {
        let trie = build("ab");
        let root = trie.node(NodeId::ROOT);
        assert_eq!(root.suffix_link(), NodeId::ROOT);
        assert_eq!(root.dictionary_link(), NodeId::ROOT);
    }

    #[test]
    fn test_terminal_chain_order() {
        // "aaa" ends with "aa" and "a"
        let trie = build("a?aa?aaa");
        let offsets: Vec<&[usize]> = trie
            .terminal_chain(walk(&trie, "aaa"))
            .map(|n| n.terminal_offsets())
            .collect();
        assert_eq!(offsets, vec![&[5][..], &[2][..], &[0][..]]);
    }

    #[test]
    fn test_terminal_chain_starts_at_dictionary_link_for_inner_node() {
        // "ab" is not terminal, its suffix "b" is
        let trie = build("abc?b");
        let offsets: Vec<&[usize]> = trie
            .terminal_chain(walk(&trie, "ab"))
            .map(|n| n.terminal_offsets())
            .collect();
        assert_eq!(offsets, vec![&[4][..]]);
    }
}
