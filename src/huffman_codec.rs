use std::collections::BTreeMap;
use std::io::{BufRead, Write};

use crate::bit_source::BitSource;
use crate::bit_vec::BitVec;
use crate::code_table::{self, CodeEntry};
use crate::config::{CodecConfig, SingleSymbolPolicy};
use crate::decoder::Decoder;
use crate::error::{HuffmanError, Result};
use crate::hufftree::{HuffmanTree, Symbol, EOF_SYMBOL};

/// A tree together with its encode table and the options used to read and write it.
#[derive(Debug, Clone)]
pub struct HuffmanCodec {
    tree: HuffmanTree,
    encode_table: BTreeMap<Symbol, String>, // symbol -> path
    config: CodecConfig,
}

impl HuffmanCodec {
    pub fn new(tree: HuffmanTree) -> Self {
        Self::with_config(tree, CodecConfig::default())
    }

    pub fn with_config(tree: HuffmanTree, config: CodecConfig) -> Self {
        let encode_table = tree.generate_table();
        HuffmanCodec {
            tree,
            encode_table,
            config,
        }
    }

    pub fn from_frequencies<I>(frequencies: I, config: CodecConfig) -> Result<Self>
    where
        I: IntoIterator<Item = (Symbol, u64)>,
    {
        let tree = HuffmanTree::from_frequencies(frequencies)?;
        Ok(Self::with_config(tree, config))
    }

    pub fn from_table_lines<I, S>(lines: I, config: CodecConfig) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tree = code_table::import_with(lines, &config)?;
        Ok(Self::with_config(tree, config))
    }

    pub fn read_table<R: BufRead>(reader: R, config: CodecConfig) -> Result<Self> {
        let tree = code_table::read_table(reader, &config)?;
        Ok(Self::with_config(tree, config))
    }

    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Path for `symbol`, if the tree has a leaf for it.
    pub fn code(&self, symbol: Symbol) -> Option<&str> {
        self.encode_table.get(&symbol).map(String::as_str)
    }

    pub fn encode(&self, symbols: &[Symbol]) -> Result<BitVec> {
        if let Some(root_symbol) = self.tree.single_symbol() {
            return self.encode_single(root_symbol, symbols);
        }

        let mut bit_vec = BitVec::new();
        for &symbol in symbols {
            let path = self
                .encode_table
                .get(&symbol)
                .ok_or(HuffmanError::UnknownSymbol(symbol))?;
            bit_vec.push_path(path);
        }
        Ok(bit_vec)
    }

    fn encode_single(&self, root_symbol: Symbol, symbols: &[Symbol]) -> Result<BitVec> {
        if self.config.single_symbol == SingleSymbolPolicy::Reject {
            return Err(HuffmanError::InvalidSymbolAtRoot(root_symbol));
        }
        let mut bit_vec = BitVec::new();
        for &symbol in symbols {
            if symbol != root_symbol {
                return Err(HuffmanError::UnknownSymbol(symbol));
            }
            bit_vec.push_bit(false);
        }
        Ok(bit_vec)
    }

    /// Lazily decodes `bits` against this codec's tree.
    pub fn decoder<B: BitSource>(&self, bits: B) -> Result<Decoder<'_, B>> {
        Decoder::with_policy(&self.tree, bits, self.config.single_symbol)
    }

    pub fn decode<B: BitSource>(&self, bits: B) -> Result<Vec<Symbol>> {
        Ok(self.decoder(bits)?.collect())
    }

    /// Decodes byte symbols from `bits` into `writer`, stopping at [`EOF_SYMBOL`].
    ///
    /// Bits after the end-of-file code are left unread, so passing `&mut source`
    /// lets the caller continue with the rest of the stream. Returns the number
    /// of bytes written.
    pub fn decode_to<B, W>(&self, bits: B, writer: &mut W) -> Result<usize>
    where
        B: BitSource,
        W: Write,
    {
        let mut written = 0;
        for symbol in self.decoder(bits)? {
            if symbol == EOF_SYMBOL {
                break;
            }
            let byte = u8::try_from(symbol)
                .map_err(|_| HuffmanError::SymbolOutOfRange(symbol.into()))?;
            writer.write_all(&[byte])?;
            written += 1;
        }
        Ok(written)
    }

    pub fn export_table(&self) -> Vec<CodeEntry> {
        code_table::export(&self.tree)
    }

    pub fn write_table<W: Write>(&self, writer: &mut W) -> Result<()> {
        code_table::write_table(&self.tree, writer)
    }
}
