use log::{debug, error, trace};

use crate::error::{HuffmanError, Result};
use crate::huffman::{CodeTable, HuffmanTree, Node};

/// Substitutes every input byte with its code, in order.
pub fn encode(input: &[u8], table: &CodeTable) -> Result<String> {
    debug!("Starting data encoding of {} bytes...", input.len());
    let mut bits = String::with_capacity(input.len() * 4);

    for &byte in input {
        match table.get(&byte) {
            Some(code) => bits.push_str(code),
            None => {
                error!("Symbol {:#04x} found in data but not in code table!", byte);
                return Err(HuffmanError::UnknownSymbol(byte));
            }
        }
    }

    debug!("Encoded into {} bits.", bits.len());
    Ok(bits)
}

/// Walks `bits` against `tree`, emitting a byte each time a leaf is reached.
///
/// `'0'` descends left and any other character descends right. The walk must
/// finish back at the root; a dangling partial code is reported as a
/// traversal error rather than dropped.
pub fn decode(bits: &str, tree: &HuffmanTree) -> Result<Vec<u8>> {
    debug!("Starting bitstream decoding...");
    let root = tree.root();

    if let Node::Leaf { byte, .. } = root {
        return decode_single_symbol(bits, *byte);
    }

    let mut result = Vec::new();
    let mut cursor = root;
    let mut consumed = 0usize;

    for (position, bit) in bits.chars().enumerate() {
        let (left, right) = cursor.children().ok_or(HuffmanError::Traversal {
            position,
            reason: "cursor has no child to descend into",
        })?;
        cursor = if bit == '0' { left } else { right };

        if let Some(byte) = cursor.character() {
            trace!("Decoded byte {:#04x} ending at bit {}", byte, position);
            result.push(byte);
            cursor = root;
        }
        consumed = position + 1;
    }

    if !std::ptr::eq(cursor, root) {
        return Err(HuffmanError::Traversal {
            position: consumed,
            reason: "bitstring ends in the middle of a code",
        });
    }

    debug!("Final decoded data size: {} bytes.", result.len());
    Ok(result)
}

fn decode_single_symbol(bits: &str, byte: u8) -> Result<Vec<u8>> {
    bits.chars()
        .enumerate()
        .map(|(position, bit)| {
            if bit == '0' {
                Ok(byte)
            } else {
                Err(HuffmanError::Traversal {
                    position,
                    reason: "single-symbol tree has no right branch",
                })
            }
        })
        .collect()
}
