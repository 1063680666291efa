//! Path-text persistence of a code tree.
//!
//! A table is a sequence of line pairs: the decimal symbol id, then the
//! symbol's path as a string of `'0'` (left) and `'1'` (right) characters.
//! Records appear in pre-order, left subtree first. A tree that is a single
//! leaf is stored with an empty path.

use std::collections::BTreeSet;
use std::fmt;
use std::io::{self, BufRead, Write};

use log::{debug, trace};

use crate::config::CodecConfig;
use crate::error::{HuffmanError, Result};
use crate::hufftree::{HuffNode, HuffmanTree, Symbol, EOF_SYMBOL};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeEntry {
    pub symbol: Symbol,
    pub path: String,
}

impl fmt::Display for CodeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.symbol, self.path)
    }
}

/// Lists every leaf of `tree` with its path, in table order.
pub fn export(tree: &HuffmanTree) -> Vec<CodeEntry> {
    let mut entries = Vec::new();
    tree.root().visit_leaves(&mut String::new(), &mut |symbol, path| {
        entries.push(CodeEntry {
            symbol,
            path: path.to_string(),
        });
    });
    entries
}

pub fn write_table<W: Write>(tree: &HuffmanTree, writer: &mut W) -> Result<()> {
    for entry in export(tree) {
        writeln!(writer, "{}", entry)?;
    }
    Ok(())
}

pub fn to_text(tree: &HuffmanTree) -> String {
    export(tree)
        .iter()
        .map(|entry| format!("{}\n", entry))
        .collect()
}

/// Rebuilds a tree from table lines using the default [`CodecConfig`].
pub fn import<I, S>(lines: I) -> Result<HuffmanTree>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    import_with(lines, &CodecConfig::default())
}

pub fn import_with<I, S>(lines: I, config: &CodecConfig) -> Result<HuffmanTree>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut builder = PathTreeBuilder::with_config(config);
    let mut lines = lines.into_iter().enumerate();

    while let Some((index, symbol_line)) = lines.next() {
        let line = index + 1;
        let symbol = parse_symbol(symbol_line.as_ref(), line)?;
        let (_, path) = lines
            .next()
            .ok_or_else(|| HuffmanError::TruncatedInput {
                line: line + 1,
                detail: format!("symbol {} has no path line", symbol),
            })?;
        builder.insert(symbol, path.as_ref())?;
    }

    builder.finish()
}

/// Reads a whole table from `reader`. Both `\n` and `\r\n` line endings are accepted.
pub fn read_table<R: BufRead>(reader: R, config: &CodecConfig) -> Result<HuffmanTree> {
    let lines = reader.lines().collect::<io::Result<Vec<String>>>()?;
    import_with(lines, config)
}

fn parse_symbol(text: &str, line: usize) -> Result<Symbol> {
    let value: u32 = text.parse().map_err(|_| HuffmanError::TruncatedInput {
        line,
        detail: format!("expected a symbol id, found {:?}", text),
    })?;
    if value > u32::from(EOF_SYMBOL) {
        return Err(HuffmanError::SymbolOutOfRange(value));
    }
    Ok(value as Symbol)
}

/// Deepest full tree the alphabet allows: 257 leaves in a single chain.
const MAX_TREE_DEPTH: usize = EOF_SYMBOL as usize;

#[derive(Debug)]
enum Partial {
    Leaf(Symbol),
    Branch {
        left: Option<Box<Partial>>,
        right: Option<Box<Partial>>,
    },
}

/// Assembles a tree one `(symbol, path)` record at a time.
///
/// Internal nodes are created on demand while walking a path. A rejected
/// insert leaves the partially built tree exactly as it was.
#[derive(Debug)]
pub struct PathTreeBuilder {
    root: Option<Box<Partial>>,
    seen: BTreeSet<Symbol>,
    max_code_length: usize,
}

impl PathTreeBuilder {
    pub fn new() -> Self {
        Self::with_config(&CodecConfig::default())
    }

    pub fn with_config(config: &CodecConfig) -> Self {
        PathTreeBuilder {
            root: None,
            seen: BTreeSet::new(),
            max_code_length: config.max_code_length.min(MAX_TREE_DEPTH),
        }
    }

    /// Number of leaves placed so far.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    pub fn insert(&mut self, symbol: Symbol, path: &str) -> Result<()> {
        if symbol > EOF_SYMBOL {
            return Err(HuffmanError::SymbolOutOfRange(symbol.into()));
        }
        if path.bytes().any(|c| c != b'0' && c != b'1') {
            return Err(HuffmanError::MalformedPath {
                path: path.to_string(),
            });
        }
        if path.len() > self.max_code_length {
            return Err(HuffmanError::CodeTooLong {
                symbol,
                len: path.len(),
                max: self.max_code_length,
            });
        }
        if self.seen.contains(&symbol) {
            return Err(HuffmanError::DuplicateSymbol(symbol));
        }

        let conflict = || HuffmanError::ConflictingPath {
            symbol,
            path: path.to_string(),
        };

        // Placeholders are only created below an empty slot, and everything
        // beneath a fresh placeholder is empty too, so no failure below can
        // leave a new node behind.
        let mut slot = &mut self.root;
        for step in path.bytes() {
            let node = slot.get_or_insert_with(|| {
                Box::new(Partial::Branch {
                    left: None,
                    right: None,
                })
            });
            slot = match node.as_mut() {
                Partial::Leaf(_) => return Err(conflict()),
                Partial::Branch { left, right } => {
                    if step == b'1' {
                        right
                    } else {
                        left
                    }
                }
            };
        }

        if slot.is_some() {
            return Err(conflict());
        }
        *slot = Some(Box::new(Partial::Leaf(symbol)));
        self.seen.insert(symbol);
        trace!("placed symbol {} at {:?}", symbol, path);
        Ok(())
    }

    /// Seals the tree; every internal node must have both children by now.
    pub fn finish(self) -> Result<HuffmanTree> {
        let leaves = self.seen.len();
        let root = self.root.ok_or(HuffmanError::EmptyAlphabet)?;
        let root = seal(root, &mut String::new())?;
        debug!("imported code table with {} symbols", leaves);
        Ok(HuffmanTree::from_root(root))
    }
}

impl Default for PathTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn seal(node: Box<Partial>, path: &mut String) -> Result<HuffNode> {
    match *node {
        Partial::Leaf(symbol) => Ok(HuffNode::leaf(symbol)),
        Partial::Branch { left, right } => {
            let left = seal_child(left, path, '0')?;
            let right = seal_child(right, path, '1')?;
            Ok(HuffNode::merge(left, right))
        }
    }
}

fn seal_child(child: Option<Box<Partial>>, path: &mut String, step: char) -> Result<HuffNode> {
    path.push(step);
    let node = child.ok_or_else(|| HuffmanError::IncompleteTree { path: path.clone() })?;
    let sealed = seal(node, path)?;
    path.pop();
    Ok(sealed)
}
