use log::debug;

use crate::bit_source::BitSource;
use crate::config::SingleSymbolPolicy;
use crate::error::{HuffmanError, Result};
use crate::hufftree::{HuffNode, HuffmanTree, Symbol};

/// Walks the tree one bit at a time, yielding a symbol at every leaf.
///
/// Decoding is lazy: bits are pulled from the source only as far as needed
/// to finish the next symbol. Bits left over when the source runs dry are
/// padding and are dropped.
#[derive(Debug)]
pub struct Decoder<'t, B> {
    root: &'t HuffNode,
    cursor: &'t HuffNode,
    bits: B,
    pending: usize,
    drained: bool,
}

impl<'t, B: BitSource> Decoder<'t, B> {
    pub fn new(tree: &'t HuffmanTree, bits: B) -> Result<Self> {
        Self::with_policy(tree, bits, SingleSymbolPolicy::default())
    }

    pub fn with_policy(
        tree: &'t HuffmanTree,
        bits: B,
        policy: SingleSymbolPolicy,
    ) -> Result<Self> {
        if let Some(symbol) = tree.single_symbol() {
            if policy == SingleSymbolPolicy::Reject {
                return Err(HuffmanError::InvalidSymbolAtRoot(symbol));
            }
        }
        Ok(Decoder {
            root: tree.root(),
            cursor: tree.root(),
            bits,
            pending: 0,
            drained: false,
        })
    }

    /// Bits consumed toward a symbol that is not complete yet.
    pub fn pending_bits(&self) -> usize {
        self.pending
    }
}

impl<B: BitSource> Iterator for Decoder<'_, B> {
    type Item = Symbol;

    fn next(&mut self) -> Option<Symbol> {
        if let Some(symbol) = self.root.symbol() {
            // one-bit-per-symbol: each bit is one occurrence
            return self.bits.next_bit().map(|_| symbol);
        }

        while self.bits.has_next_bit() {
            let bit = self.bits.next_bit()?;
            let next = self.cursor.child(bit)?;
            self.pending += 1;

            if let Some(symbol) = next.symbol() {
                self.cursor = self.root;
                self.pending = 0;
                return Some(symbol);
            }
            self.cursor = next;
        }

        if !self.drained {
            self.drained = true;
            if self.pending > 0 {
                debug!("dropping {} trailing padding bits", self.pending);
            }
        }
        None
    }
}

/// Decodes every bit of `bits` against `tree`.
pub fn decode_all<B: BitSource>(
    tree: &HuffmanTree,
    bits: B,
    policy: SingleSymbolPolicy,
) -> Result<Vec<Symbol>> {
    Ok(Decoder::with_policy(tree, bits, policy)?.collect())
}
