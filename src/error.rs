use thiserror::Error;

use crate::hufftree::Symbol;
use crate::min_heap::HeapErr;

/// Everything that can go wrong while building, persisting or decoding a code.
#[derive(Error, Debug)]
pub enum HuffmanError {
    #[error("no symbol with a positive frequency was supplied")]
    EmptyAlphabet,

    #[error("malformed path {path:?}: only '0' and '1' are allowed")]
    MalformedPath { path: String },

    #[error("path {path:?} for symbol {symbol} collides with an existing code")]
    ConflictingPath { symbol: Symbol, path: String },

    #[error("symbol {0} appears more than once in the code table")]
    DuplicateSymbol(Symbol),

    #[error("code table does not describe a full tree: branch {path:?} is missing")]
    IncompleteTree { path: String },

    #[error("path of length {len} for symbol {symbol} exceeds the limit of {max}")]
    CodeTooLong { symbol: Symbol, len: usize, max: usize },

    #[error("truncated code table at line {line}: {detail}")]
    TruncatedInput { line: usize, detail: String },

    #[error("symbol {0} is outside the alphabet")]
    SymbolOutOfRange(u32),

    #[error("symbol {0} has no code in this tree")]
    UnknownSymbol(Symbol),

    #[error("tree is a single leaf holding symbol {0}; it has no bit codes")]
    InvalidSymbolAtRoot(Symbol),

    #[error("combined weight overflows u64")]
    WeightOverflow,

    #[error("priority queue error: {0}")]
    Heap(#[from] HeapErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse codec config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, HuffmanError>;
