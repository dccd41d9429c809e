//! # huffman_codec
//!
//! Builds a Huffman code for a byte string, encodes the string as a
//! `'0'`/`'1'` bitstring and writes the code tree as a compact token stream,
//! so a decoder with no other knowledge of the input can reverse it exactly.
//!
//! ```rust
//! use huffman_codec::HuffmanCoder;
//!
//! let mut coder = HuffmanCoder::new();
//! let bits = coder.compress("aaab")?;
//! let tokens = coder.serialize_tree()?;
//! assert_eq!(bits, "1110");
//! assert_eq!(tokens, b"LbLaB");
//!
//! let mut decoder = HuffmanCoder::new();
//! assert_eq!(decoder.decompress(&bits, &tokens)?, b"aaab");
//! # Ok::<(), huffman_codec::HuffmanError>(())
//! ```
//!
//! Ties between equal weights are broken by insertion order, with leaves
//! inserted in ascending byte order, so output is reproducible. Input with a
//! single distinct byte gets the one-bit code `0`.

pub mod coder;
pub mod coding;
pub mod error;
pub mod huffman;
pub mod queue;
pub mod tree_codec;

pub use coder::{CompressionStats, HuffmanCoder};
pub use error::{HuffmanError, Result};
pub use huffman::{CodeTable, FreqTable, HuffmanTree, Node};
pub use queue::PriorityQueue;
