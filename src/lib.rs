//! # huffman_paths
//!
//! Huffman prefix codes: build the optimal tree from symbol frequencies,
//! persist it as a path table, and decode bitstreams with it.
//!
//! ## Quick Start
//!
//! ```rust
//! use huffman_paths::{code_table, CodecConfig, HuffmanCodec, HuffmanTree};
//!
//! let tree = HuffmanTree::from_frequencies(vec![(97, 3), (98, 1), (99, 1)])?;
//! let table = code_table::to_text(&tree);
//!
//! // later, from the persisted table
//! let codec = HuffmanCodec::from_table_lines(table.lines(), CodecConfig::default())?;
//! let bits = codec.encode(&[97, 98, 99, 97])?;
//! assert_eq!(codec.decode(bits.reader())?, vec![97, 98, 99, 97]);
//! # Ok::<(), huffman_paths::HuffmanError>(())
//! ```

pub mod bit_source;
pub mod bit_vec;
pub mod code_table;
pub mod config;
pub mod decoder;
pub mod error;
pub mod huffman_codec;
pub mod hufftree;

// Internal modules - not part of public API
mod min_heap;

// Re-export main types for convenience
pub use bit_source::{BitReader, BitSource, IterBits};
pub use bit_vec::BitVec;
pub use code_table::{CodeEntry, PathTreeBuilder};
pub use config::{CodecConfig, SingleSymbolPolicy};
pub use decoder::Decoder;
pub use error::{HuffmanError, Result};
pub use huffman_codec::HuffmanCodec;
pub use hufftree::{HuffNode, HuffmanTree, Symbol, EOF_SYMBOL};
pub use min_heap::HeapErr;
