//! Codec options, loadable from a TOML file.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

/// How to treat a tree whose root is itself a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SingleSymbolPolicy {
    /// Refuse to encode or decode with `InvalidSymbolAtRoot`.
    #[default]
    Reject,
    /// Every bit stands for one occurrence of the root symbol.
    OneBitPerSymbol,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    /// Longest path accepted when importing a code table. Values above 256,
    /// the deepest tree the alphabet allows, act as 256.
    pub max_code_length: usize,
    pub single_symbol: SingleSymbolPolicy,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            // deepest tree a 257-symbol alphabet can produce
            max_code_length: 256,
            single_symbol: SingleSymbolPolicy::Reject,
        }
    }
}

impl CodecConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
