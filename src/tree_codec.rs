//! Postorder token encoding of a tree's shape.
//!
//! A leaf is written as `L` followed by its byte verbatim, a branch as `B`.
//! Children always precede their parent, so the stream needs no lengths,
//! delimiters or escaping: `LaLbB` is a branch over leaves `a` and `b`.
//! Frequencies are not stored; rebuilt nodes carry a weight of zero.

use log::{debug, warn};

use crate::error::{HuffmanError, Result};
use crate::huffman::{HuffmanTree, Node};

pub const LEAF: u8 = b'L';
pub const BRANCH: u8 = b'B';

pub fn serialize(tree: &HuffmanTree) -> Vec<u8> {
    fn serialize_postorder(node: &Node, out: &mut Vec<u8>) {
        match node {
            Node::Leaf { byte, .. } => {
                out.push(LEAF);
                out.push(*byte);
            }
            Node::Internal { left, right, .. } => {
                serialize_postorder(left, out);
                serialize_postorder(right, out);
                out.push(BRANCH);
            }
        }
    }

    let mut out = Vec::with_capacity(tree.leaf_count() * 3);
    serialize_postorder(tree.root(), &mut out);
    debug!("Serialized tree into {} tokens", out.len());
    out
}

pub fn deserialize(tokens: &[u8]) -> Result<HuffmanTree> {
    if tokens.is_empty() {
        return Err(malformed(0, "empty token stream"));
    }

    let mut stack: Vec<Node> = Vec::new();
    let mut seen = [false; 256];
    let mut i = 0;

    while i < tokens.len() {
        match tokens[i] {
            LEAF => {
                let byte = *tokens
                    .get(i + 1)
                    .ok_or_else(|| malformed(i, "leaf marker without a symbol"))?;
                if seen[byte as usize] {
                    return Err(malformed(i + 1, "symbol appears in more than one leaf"));
                }
                seen[byte as usize] = true;
                stack.push(Node::leaf(byte, 0));
                i += 2;
            }
            BRANCH => {
                // postorder: the right subtree sits on top of the left one
                let right = stack
                    .pop()
                    .ok_or_else(|| malformed(i, "branch marker with no children"))?;
                let left = stack
                    .pop()
                    .ok_or_else(|| malformed(i, "branch marker with only one child"))?;
                stack.push(Node::merge(left, right));
                i += 1;
            }
            _ => return Err(malformed(i, "unrecognized marker")),
        }
    }

    if stack.len() != 1 {
        warn!("Token stream left {} roots on the stack", stack.len());
        return Err(malformed(tokens.len(), "token stream does not reduce to a single root"));
    }
    let root = stack
        .pop()
        .ok_or_else(|| malformed(tokens.len(), "token stream does not reduce to a single root"))?;

    Ok(HuffmanTree::from_root(root))
}

fn malformed(position: usize, reason: &'static str) -> HuffmanError {
    HuffmanError::MalformedTree { position, reason }
}
