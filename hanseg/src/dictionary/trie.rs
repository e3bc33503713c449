use bincode::{Decode, Encode};
use hashbrown::HashMap;

/// Result of matching a character sequence against a [`Trie`].
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum MatchState {
    /// The sequence is neither a word nor a prefix of a word.
    NoMatch,
    /// The sequence is a proper prefix of at least one word.
    PrefixOnly,
    /// The sequence is a word and no longer word starts with it.
    ExactOnly,
    /// The sequence is a word and also a prefix of a longer word.
    PrefixAndExact,
}

impl MatchState {
    #[inline(always)]
    const fn new(is_word: bool, has_children: bool) -> Self {
        match (is_word, has_children) {
            (false, false) => Self::NoMatch,
            (false, true) => Self::PrefixOnly,
            (true, false) => Self::ExactOnly,
            (true, true) => Self::PrefixAndExact,
        }
    }

    /// Checks if the sequence is a complete word.
    #[inline(always)]
    pub const fn is_match(self) -> bool {
        matches!(self, Self::ExactOnly | Self::PrefixAndExact)
    }

    /// Checks if a longer word may still follow.
    #[inline(always)]
    pub const fn is_prefix(self) -> bool {
        matches!(self, Self::PrefixOnly | Self::PrefixAndExact)
    }
}

/// Reference to a node of a [`Trie`].
///
/// A node reference stands for the character sequence walked from the root, so that
/// a walk can be continued one character at a time.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub struct NodeId(u32);

#[derive(Clone, Copy, Debug, Decode, Encode)]
struct Node {
    edge_start: u32,
    edge_len: u32,
    is_word: bool,
}

#[derive(Clone, Copy, Debug, Decode, Encode)]
struct Edge {
    label: u32,
    child: u32,
}

/// Immutable character trie stored in a flat arena.
///
/// Edges of each node are contiguous in one array and sorted by label.
#[derive(Debug, Decode, Encode)]
pub struct Trie {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    num_words: u32,
}

impl Default for Trie {
    fn default() -> Self {
        TrieBuilder::new().build()
    }
}

impl Trie {
    /// Creates a trie from words.
    pub fn from_words<I, W>(words: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: AsRef<str>,
    {
        let mut builder = TrieBuilder::new();
        for w in words {
            builder.insert(w.as_ref());
        }
        builder.build()
    }

    /// Gets the root node, standing for the empty sequence.
    #[inline(always)]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Gets the number of words.
    #[inline(always)]
    pub const fn num_words(&self) -> usize {
        self.num_words as usize
    }

    /// Continues a walk from `node` by one character.
    ///
    /// Returns `None` when the extended sequence is no prefix of any word.
    #[inline(always)]
    pub fn step(&self, node: NodeId, c: char) -> Option<NodeId> {
        let n = &self.nodes[node.0 as usize];
        let start = n.edge_start as usize;
        let edges = &self.edges[start..start + n.edge_len as usize];
        edges
            .binary_search_by_key(&u32::from(c), |e| e.label)
            .ok()
            .map(|i| NodeId(edges[i].child))
    }

    /// Gets the match state of the sequence that `node` stands for.
    #[inline(always)]
    pub fn state(&self, node: NodeId) -> MatchState {
        let n = &self.nodes[node.0 as usize];
        MatchState::new(n.is_word, n.edge_len != 0)
    }

    /// Continues a walk and reports the state of the extended sequence.
    #[inline(always)]
    pub fn step_state(&self, node: NodeId, c: char) -> (Option<NodeId>, MatchState) {
        match self.step(node, c) {
            Some(next) => (Some(next), self.state(next)),
            None => (None, MatchState::NoMatch),
        }
    }

    /// Matches a whole sequence from the root.
    #[inline(always)]
    pub fn query(&self, seq: &[char]) -> MatchState {
        self.query_chars(seq.iter().copied())
    }

    fn query_chars<I>(&self, seq: I) -> MatchState
    where
        I: IntoIterator<Item = char>,
    {
        let mut node = self.root();
        let mut empty = true;
        for c in seq {
            match self.step(node, c) {
                Some(next) => node = next,
                None => return MatchState::NoMatch,
            }
            empty = false;
        }
        if empty {
            return MatchState::NoMatch;
        }
        self.state(node)
    }

    /// Checks if the sequence is a word.
    #[inline(always)]
    pub fn contains(&self, seq: &[char]) -> bool {
        self.query(seq).is_match()
    }

    /// Checks if the text is a word.
    #[inline(always)]
    pub fn contains_str(&self, text: &str) -> bool {
        self.query_chars(text.chars()).is_match()
    }

    /// Checks the structural consistency of a decoded trie.
    pub(crate) fn verify(&self) -> bool {
        if self.nodes.is_empty() {
            return false;
        }
        let num_nodes = self.nodes.len() as u64;
        let num_edges = self.edges.len() as u64;
        let mut num_words = 0;
        for n in &self.nodes {
            if u64::from(n.edge_start) + u64::from(n.edge_len) > num_edges {
                return false;
            }
            let start = n.edge_start as usize;
            let edges = &self.edges[start..start + n.edge_len as usize];
            if edges.windows(2).any(|w| w[0].label >= w[1].label) {
                return false;
            }
            if edges.iter().any(|e| u64::from(e.child) >= num_nodes) {
                return false;
            }
            num_words += u32::from(n.is_word);
        }
        num_words == self.num_words
    }
}

#[derive(Default)]
struct BuilderNode {
    children: HashMap<char, usize>,
    is_word: bool,
}

/// Builder of [`Trie`].
pub struct TrieBuilder {
    nodes: Vec<BuilderNode>,
}

impl Default for TrieBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TrieBuilder {
    /// Creates a builder holding only the root.
    pub fn new() -> Self {
        Self {
            nodes: vec![BuilderNode::default()],
        }
    }

    /// Inserts a word. Empty words are ignored.
    pub fn insert(&mut self, word: &str) {
        if word.is_empty() {
            return;
        }
        let mut idx = 0;
        for c in word.chars() {
            idx = match self.nodes[idx].children.get(&c) {
                Some(&child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(BuilderNode::default());
                    self.nodes[idx].children.insert(c, child);
                    child
                }
            };
        }
        self.nodes[idx].is_word = true;
    }

    /// Freezes the builder into the arena layout, numbering nodes breadth first.
    pub fn build(self) -> Trie {
        let mut nodes = Vec::with_capacity(self.nodes.len());
        let mut edges = Vec::with_capacity(self.nodes.len().saturating_sub(1));
        let mut num_words = 0;

        let mut order = vec![0];
        let mut head = 0;
        while head < order.len() {
            let src = &self.nodes[order[head]];
            head += 1;

            let mut children: Vec<_> = src.children.iter().map(|(&c, &i)| (c, i)).collect();
            children.sort_unstable_by_key(|&(c, _)| c);

            nodes.push(Node {
                edge_start: edges.len() as u32,
                edge_len: children.len() as u32,
                is_word: src.is_word,
            });
            num_words += u32::from(src.is_word);

            for (c, i) in children {
                edges.push(Edge {
                    label: u32::from(c),
                    child: order.len() as u32,
                });
                order.push(i);
            }
        }

        Trie {
            nodes,
            edges,
            num_words,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_query() {
        let trie = Trie::from_words(["中华", "中华人民共和国", "人民", "华"]);
        assert_eq!(trie.num_words(), 4);
        assert_eq!(trie.query(&chars("中")), MatchState::PrefixOnly);
        assert_eq!(trie.query(&chars("中华")), MatchState::PrefixAndExact);
        assert_eq!(trie.query(&chars("中华人民共和国")), MatchState::ExactOnly);
        assert_eq!(trie.query(&chars("人民")), MatchState::ExactOnly);
        assert_eq!(trie.query(&chars("华")), MatchState::ExactOnly);
        assert_eq!(trie.query(&chars("民")), MatchState::NoMatch);
        assert_eq!(trie.query(&[]), MatchState::NoMatch);
        assert!(trie.contains(&chars("中华")));
        assert!(!trie.contains(&chars("中华人")));
        assert!(trie.contains_str("中华"));
        assert!(!trie.contains_str("中"));
        assert!(!trie.contains_str(""));
    }

    #[test]
    fn test_step() {
        let trie = Trie::from_words(["中华", "中华人民共和国"]);
        let mut node = trie.root();
        let mut states = vec![];
        for c in "中华人民共和国".chars() {
            let (next, state) = trie.step_state(node, c);
            states.push(state);
            node = next.unwrap();
        }
        assert_eq!(
            states,
            vec![
                MatchState::PrefixOnly,
                MatchState::PrefixAndExact,
                MatchState::PrefixOnly,
                MatchState::PrefixOnly,
                MatchState::PrefixOnly,
                MatchState::PrefixOnly,
                MatchState::ExactOnly,
            ]
        );
        assert_eq!(trie.step_state(node, '!'), (None, MatchState::NoMatch));
    }

    #[test]
    fn test_empty() {
        let trie = Trie::default();
        assert_eq!(trie.num_words(), 0);
        assert_eq!(trie.query(&chars("中")), MatchState::NoMatch);
        assert!(trie.verify());
    }

    #[test]
    fn test_duplicate_and_empty_words() {
        let trie = Trie::from_words(["本", "本", ""]);
        assert_eq!(trie.num_words(), 1);
        assert!(trie.verify());
    }
}
