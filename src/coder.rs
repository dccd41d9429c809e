use std::fmt;

use log::{debug, info};

use crate::coding::{decode, encode};
use crate::error::{HuffmanError, Result};
use crate::huffman::{CodeTable, FreqTable, HuffmanTree, count_frequencies, entropy_from_freq};
use crate::tree_codec::{deserialize, serialize};

/// Holds the most recently built tree so that `compress` can be paired
/// with `serialize_tree`.
///
/// A failed `compress` or `decompress` leaves the previous tree in place.
#[derive(Debug, Default)]
pub struct HuffmanCoder {
    tree: Option<HuffmanTree>,
}

impl HuffmanCoder {
    pub fn new() -> Self {
        HuffmanCoder::default()
    }

    /// Builds a fresh tree from `text` and returns its `'0'`/`'1'` encoding.
    pub fn compress(&mut self, text: impl AsRef<[u8]>) -> Result<String> {
        let text = text.as_ref();
        let tree = HuffmanTree::from_bytes(text)?;
        let bits = encode(text, &tree.code_table())?;
        info!(
            "Compressed {} bytes into {} bits ({} symbols)",
            text.len(),
            bits.len(),
            tree.leaf_count()
        );
        self.tree = Some(tree);
        Ok(bits)
    }

    pub fn serialize_tree(&self) -> Result<Vec<u8>> {
        self.tree.as_ref().map(serialize).ok_or(HuffmanError::NoTree)
    }

    /// Rebuilds the tree from `tokens` and decodes `bits` against it.
    pub fn decompress(&mut self, bits: &str, tokens: &[u8]) -> Result<Vec<u8>> {
        let tree = deserialize(tokens)?;
        let decoded = decode(bits, &tree)?;
        info!(
            "Decompressed {} bits into {} bytes",
            bits.chars().count(),
            decoded.len()
        );
        self.tree = Some(tree);
        Ok(decoded)
    }

    pub fn tree(&self) -> Option<&HuffmanTree> {
        self.tree.as_ref()
    }

    pub fn code_table(&self) -> Result<CodeTable> {
        self.tree
            .as_ref()
            .map(HuffmanTree::code_table)
            .ok_or(HuffmanError::NoTree)
    }

    /// Measures `input` and its encoding `bits` against the retained tree.
    pub fn stats(&self, input: &[u8], bits: &str) -> Result<CompressionStats> {
        let tokens = self.serialize_tree()?;
        Ok(CompressionStats::measure(input, bits, &tokens))
    }

    /// Discards the retained tree.
    pub fn clear(&mut self) {
        if self.tree.take().is_some() {
            debug!("Dropped retained tree");
        }
    }
}

/// Size and entropy figures for one compression.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionStats {
    pub input_bytes: usize,
    pub encoded_bits: usize,
    pub tree_bytes: usize,
    pub unique_symbols: usize,
    /// Shannon entropy of the input, in bits per symbol.
    pub entropy: f64,
    pub average_code_length: f64,
}

impl CompressionStats {
    pub fn measure(input: &[u8], bits: &str, tokens: &[u8]) -> Self {
        let freq: FreqTable = count_frequencies(input);
        let average_code_length = if input.is_empty() {
            0.0
        } else {
            bits.len() as f64 / input.len() as f64
        };
        CompressionStats {
            input_bytes: input.len(),
            encoded_bits: bits.len(),
            tree_bytes: tokens.len(),
            unique_symbols: freq.len(),
            entropy: entropy_from_freq(&freq),
            average_code_length,
        }
    }

    /// Saved space against 8 bits per input byte, packing bits and counting the tree.
    pub fn ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            return 0.0;
        }
        let packed = self.encoded_bits.div_ceil(8) + self.tree_bytes;
        100.0 * (1.0 - packed as f64 / self.input_bytes as f64)
    }
}

impl fmt::Display for CompressionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "📂  Input:       {} bytes ({} unique)\n\
             💾  Encoded:     {} bits + {} tree bytes\n\
             ℹ️  Entropy:     {:.4} bits/symbol\n\
             📏  Avg code:    {:.4} bits/symbol\n\
             🗜️  Ratio:       {:.4}%",
            self.input_bytes,
            self.unique_symbols,
            self.encoded_bits,
            self.tree_bytes,
            self.entropy,
            self.average_code_length,
            self.ratio()
        )
    }
}
