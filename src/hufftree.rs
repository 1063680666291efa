use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use log::{debug, trace};

use crate::error::{HuffmanError, Result};
use crate::min_heap::MinHeap;

/// Symbol identifier: a byte value, or [`EOF_SYMBOL`].
pub type Symbol = u16;

/// Distinguished end-of-file symbol, one past the last byte value.
pub const EOF_SYMBOL: Symbol = 256;

/// Number of distinct symbols the alphabet can hold.
pub const ALPHABET_SIZE: usize = EOF_SYMBOL as usize + 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    Leaf {
        symbol: Symbol,
    },
    Internal {
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    pub fn leaf(symbol: Symbol) -> Self {
        HuffNode::Leaf { symbol }
    }

    pub fn merge(a: Self, b: Self) -> Self {
        HuffNode::Internal {
            left: Box::new(a),
            right: Box::new(b),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffNode::Leaf { .. })
    }

    pub fn symbol(&self) -> Option<Symbol> {
        match self {
            HuffNode::Leaf { symbol } => Some(*symbol),
            HuffNode::Internal { .. } => None,
        }
    }

    /// Child reached by following `bit` (false = left, true = right).
    pub fn child(&self, bit: bool) -> Option<&HuffNode> {
        match self {
            HuffNode::Leaf { .. } => None,
            HuffNode::Internal { left, right } => Some(if bit { right } else { left }),
        }
    }

    /// Calls `visit` for every leaf, left subtree first, with the path taken to reach it.
    pub(crate) fn visit_leaves<F>(&self, path: &mut String, visit: &mut F)
    where
        F: FnMut(Symbol, &str),
    {
        match self {
            HuffNode::Leaf { symbol } => visit(*symbol, path),
            HuffNode::Internal { left, right } => {
                path.push('0');
                left.visit_leaves(path, visit);
                path.pop();

                path.push('1');
                right.visit_leaves(path, visit);
                path.pop();
            }
        }
    }
}

/// Priority queue entry used only while the tree is being built.
///
/// Ordered by weight, then by creation order, so that among equal weights
/// the entry created first leaves the queue first.
#[derive(Debug)]
struct HeapEntry {
    weight: u64,
    order: usize,
    node: HuffNode,
}

impl HeapEntry {
    fn key(&self) -> (u64, usize) {
        (self.weight, self.order)
    }
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: HuffNode,
}

impl HuffmanTree {
    pub(crate) fn from_root(root: HuffNode) -> Self {
        HuffmanTree { root }
    }

    /// Builds the minimum-weight prefix-code tree for `frequencies`.
    ///
    /// Zero counts are skipped and repeated symbols are summed. Seed leaves
    /// are queued in ascending symbol order, and ties between equal weights
    /// are broken first-in first-out, so the result does not depend on the
    /// iteration order of the input.
    pub fn from_frequencies<I>(frequencies: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Symbol, u64)>,
    {
        let mut merged: BTreeMap<Symbol, u64> = BTreeMap::new();
        for (symbol, count) in frequencies {
            if count == 0 {
                trace!("skipping zero-frequency symbol {}", symbol);
                continue;
            }
            if symbol > EOF_SYMBOL {
                return Err(HuffmanError::SymbolOutOfRange(symbol.into()));
            }
            let weight = merged.entry(symbol).or_insert(0);
            *weight = weight
                .checked_add(count)
                .ok_or(HuffmanError::WeightOverflow)?;
        }

        if merged.is_empty() {
            return Err(HuffmanError::EmptyAlphabet);
        }

        let nodes: Vec<HeapEntry> = merged
            .into_iter()
            .enumerate()
            .map(|(order, (symbol, weight))| HeapEntry {
                weight,
                order,
                node: HuffNode::leaf(symbol),
            })
            .collect();

        let tree = HuffmanTree::build_from_heap(MinHeap::build(nodes)?)?;
        debug!(
            "built huffman tree: {} symbols, depth {}",
            tree.leaf_count(),
            tree.depth()
        );
        Ok(tree)
    }

    /// Builds a tree from a dense count array where the index is the symbol.
    pub fn from_counts(counts: &[u64]) -> Result<Self> {
        let mut frequencies = Vec::new();
        for (index, &count) in counts.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let symbol = Symbol::try_from(index).map_err(|_| {
                HuffmanError::SymbolOutOfRange(u32::try_from(index).unwrap_or(u32::MAX))
            })?;
            frequencies.push((symbol, count));
        }
        HuffmanTree::from_frequencies(frequencies)
    }

    fn build_from_heap(mut heap: MinHeap<HeapEntry>) -> Result<Self> {
        let mut next_order = heap.heap_size();
        while heap.heap_size() > 1 {
            let x = heap.extract_min()?;
            let y = heap.extract_min()?;

            let weight = x
                .weight
                .checked_add(y.weight)
                .ok_or(HuffmanError::WeightOverflow)?;
            trace!("merging weights {} + {} -> {}", x.weight, y.weight, weight);

            heap.insert(HeapEntry {
                weight,
                order: next_order,
                node: HuffNode::merge(x.node, y.node),
            });
            next_order += 1;
        }

        let root = heap.extract_min()?.node;
        Ok(HuffmanTree { root })
    }

    pub fn root(&self) -> &HuffNode {
        &self.root
    }

    /// The root symbol when the whole tree is a single leaf.
    pub fn single_symbol(&self) -> Option<Symbol> {
        self.root.symbol()
    }

    /// Maps every symbol to its path string (`'0'` = left, `'1'` = right).
    pub fn generate_table(&self) -> BTreeMap<Symbol, String> {
        let mut table = BTreeMap::new();
        self.root.visit_leaves(&mut String::new(), &mut |symbol, path| {
            table.insert(symbol, path.to_string());
        });
        table
    }

    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        self.root.visit_leaves(&mut String::new(), &mut |_, _| count += 1);
        count
    }

    /// Length of the longest code.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        self.root.visit_leaves(&mut String::new(), &mut |_, path| {
            depth = depth.max(path.len());
        });
        depth
    }

    fn fmt_node(
        f: &mut fmt::Formatter<'_>,
        node: &HuffNode,
        depth: usize,
        label: &str,
    ) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match node {
            HuffNode::Leaf { symbol } => {
                writeln!(f, "{}{}-> Leaf: {}", indent, label, SymbolLabel(*symbol))
            }
            HuffNode::Internal { left, right } => {
                writeln!(f, "{}{}-> Internal", indent, label)?;
                HuffmanTree::fmt_node(f, left, depth + 1, "L")?;
                HuffmanTree::fmt_node(f, right, depth + 1, "R")
            }
        }
    }
}

impl fmt::Display for HuffmanTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Huffman Tree Structure:")?;
        HuffmanTree::fmt_node(f, &self.root, 0, "root")
    }
}

struct SymbolLabel(Symbol);

impl fmt::Display for SymbolLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match u8::try_from(self.0) {
            Ok(byte) if byte.is_ascii_graphic() => write!(f, "'{}' ({})", byte as char, byte),
            Ok(byte) => write!(f, "({})", byte),
            Err(_) => write!(f, "EOF ({})", self.0),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashMap;

    fn classic() -> Vec<(Symbol, u64)> {
        vec![
            (b'a'.into(), 5),
            (b'b'.into(), 9),
            (b'c'.into(), 12),
            (b'd'.into(), 13),
            (b'e'.into(), 16),
            (b'f'.into(), 45),
        ]
    }

    fn code_len(table: &BTreeMap<Symbol, String>, byte: u8) -> usize {
        table[&Symbol::from(byte)].len()
    }

    fn assert_prefix_free(table: &BTreeMap<Symbol, String>) {
        for (a, pa) in table {
            for (b, pb) in table {
                if a != b {
                    assert!(!pb.starts_with(pa.as_str()), "{pa} is a prefix of {pb}");
                }
            }
        }
    }

    #[test]
    fn test_classic_frequencies() {
        let tree = HuffmanTree::from_frequencies(classic()).unwrap();
        let table = tree.generate_table();

        assert_eq!(table.len(), 6);
        assert_prefix_free(&table);

        let f = code_len(&table, b'f');
        let e = code_len(&table, b'e');
        let a = code_len(&table, b'a');
        assert_eq!(f, 1);
        for other in [b'a', b'b', b'c', b'd'] {
            assert!(e <= code_len(&table, other));
            assert!(f < code_len(&table, other));
        }
        assert_eq!(a, table.values().map(String::len).max().unwrap());

        let weighted: u64 = classic()
            .iter()
            .map(|(s, w)| w * table[s].len() as u64)
            .sum();
        assert_eq!(weighted, 224);
    }

    #[test]
    fn test_classic_codes_are_deterministic() {
        let tree = HuffmanTree::from_frequencies(classic()).unwrap();
        let table = tree.generate_table();

        assert_eq!(table[&Symbol::from(b'f')], "0");
        assert_eq!(table[&Symbol::from(b'c')], "100");
        assert_eq!(table[&Symbol::from(b'd')], "101");
        assert_eq!(table[&Symbol::from(b'a')], "1100");
        assert_eq!(table[&Symbol::from(b'b')], "1101");
        assert_eq!(table[&Symbol::from(b'e')], "111");
    }

    #[test]
    fn test_ties_are_first_in_first_out() {
        let tree = HuffmanTree::from_frequencies(vec![(3, 1), (0, 1), (2, 1), (1, 1)]).unwrap();
        let table = tree.generate_table();

        assert_eq!(table[&0], "00");
        assert_eq!(table[&1], "01");
        assert_eq!(table[&2], "10");
        assert_eq!(table[&3], "11");
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let forward = HuffmanTree::from_frequencies(classic()).unwrap();
        let map: HashMap<Symbol, u64> = classic().into_iter().rev().collect();
        let from_map = HuffmanTree::from_frequencies(map).unwrap();
        assert_eq!(forward, from_map);
    }

    #[test]
    fn test_single_symbol_is_a_leaf() {
        let tree = HuffmanTree::from_frequencies(vec![(b'z'.into(), 7)]).unwrap();
        assert!(tree.root().is_leaf());
        assert_eq!(tree.single_symbol(), Some(b'z'.into()));
        assert_eq!(tree.generate_table()[&Symbol::from(b'z')], "");
        assert_eq!(tree.depth(), 0);
    }

    #[test]
    fn test_empty_alphabet() {
        let err = HuffmanTree::from_frequencies(Vec::new()).unwrap_err();
        assert!(matches!(err, HuffmanError::EmptyAlphabet));

        let err = HuffmanTree::from_frequencies(vec![(1, 0), (2, 0)]).unwrap_err();
        assert!(matches!(err, HuffmanError::EmptyAlphabet));
    }

    #[test]
    fn test_zero_counts_never_become_leaves() {
        let tree = HuffmanTree::from_frequencies(vec![(1, 3), (2, 0), (3, 4)]).unwrap();
        let table = tree.generate_table();
        assert_eq!(table.keys().copied().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_repeated_symbols_are_summed() {
        let tree = HuffmanTree::from_frequencies(vec![(1, 1), (2, 2), (1, 2)]).unwrap();
        // symbol 1 weighs 3 now, so 2 leaves the queue first
        assert_eq!(tree.generate_table()[&2], "0");
    }

    #[test]
    fn test_from_counts_uses_index_as_symbol() {
        let mut counts = vec![0u64; ALPHABET_SIZE];
        counts[usize::from(b'x')] = 2;
        counts[usize::from(EOF_SYMBOL)] = 1;
        let tree = HuffmanTree::from_counts(&counts).unwrap();

        let table = tree.generate_table();
        assert_eq!(table[&EOF_SYMBOL], "0");
        assert_eq!(table[&Symbol::from(b'x')], "1");
    }

    #[test]
    fn test_out_of_range_symbol() {
        let err = HuffmanTree::from_frequencies(vec![(EOF_SYMBOL + 1, 4)]).unwrap_err();
        assert!(matches!(err, HuffmanError::SymbolOutOfRange(257)));

        let mut counts = vec![0u64; ALPHABET_SIZE + 1];
        counts[ALPHABET_SIZE] = 1;
        assert!(HuffmanTree::from_counts(&counts).is_err());
    }

    #[test]
    fn test_zero_counts_skipped_before_range_check() {
        let tree = HuffmanTree::from_frequencies(vec![(300, 0), (1, 2), (2, 3)]).unwrap();
        assert_eq!(tree.leaf_count(), 2);
        assert!(HuffmanTree::from_frequencies(vec![(300, 1), (1, 2)]).is_err());
    }

    #[test]
    fn test_weight_overflow() {
        let err = HuffmanTree::from_frequencies(vec![(1, u64::MAX), (2, 1)]).unwrap_err();
        assert!(matches!(err, HuffmanError::WeightOverflow));
    }

    #[test]
    fn test_display_structure() {
        let tree = HuffmanTree::from_frequencies(vec![(b'a'.into(), 1), (EOF_SYMBOL, 2)]).unwrap();
        let rendered = tree.to_string();
        assert!(rendered.contains("root-> Internal"));
        assert!(rendered.contains("L-> Leaf: 'a' (97)"));
        assert!(rendered.contains("R-> Leaf: EOF (256)"));
    }
}
