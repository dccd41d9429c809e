use std::cmp::Ordering;
use std::collections::BTreeMap;

use log::{debug, trace};

use crate::error::{HuffmanError, Result};
use crate::queue::PriorityQueue;

pub type CodeTable = BTreeMap<u8, String>;
pub type FreqTable = BTreeMap<u8, u64>;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Node {
    Leaf {
        byte: u8,
        freq: u64,
    },
    Internal {
        freq: u64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn leaf(byte: u8, freq: u64) -> Self {
        Node::Leaf { byte, freq }
    }

    /// Joins two subtrees; `left` takes bit `0`, `right` takes bit `1`.
    pub fn merge(left: Node, right: Node) -> Self {
        Node::Internal {
            freq: left.freq() + right.freq(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn freq(&self) -> u64 {
        match self {
            Node::Leaf { freq, .. } => *freq,
            Node::Internal { freq, .. } => *freq,
        }
    }

    pub fn character(&self) -> Option<u8> {
        match self {
            Node::Leaf { byte, .. } => Some(*byte),
            Node::Internal { .. } => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    pub fn children(&self) -> Option<(&Node, &Node)> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => Some((&**left, &**right)),
        }
    }
}

/// Queue entry: ties on frequency fall back to insertion order.
struct Pending {
    node: Node,
    seq: u64,
}

fn by_freq_then_age(a: &Pending, b: &Pending) -> Ordering {
    a.node
        .freq()
        .cmp(&b.node.freq())
        .then(a.seq.cmp(&b.seq))
}

/// A strict binary code tree. Dropping it releases every node exactly once.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    pub fn from_root(root: Node) -> Self {
        HuffmanTree { root }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        HuffmanTree::from_frequencies(&count_frequencies(bytes))
    }

    pub fn from_frequencies(frequencies: &FreqTable) -> Result<Self> {
        debug!(
            "Building Huffman tree from {} unique symbols",
            frequencies.len()
        );

        let mut queue = PriorityQueue::with_capacity(frequencies.len(), by_freq_then_age);
        let mut seq = 0u64;
        for (&byte, &freq) in frequencies {
            queue.insert(Pending {
                node: Node::leaf(byte, freq),
                seq,
            });
            seq += 1;
        }

        while queue.size() > 1 {
            let left = queue.remove_min()?;
            let right = queue.remove_min()?;
            trace!(
                "Merging weights {} + {} (seq {} and {})",
                left.node.freq(),
                right.node.freq(),
                left.seq,
                right.seq
            );
            queue.insert(Pending {
                node: Node::merge(left.node, right.node),
                seq,
            });
            seq += 1;
        }

        if queue.size() != 1 {
            return Err(HuffmanError::Construction {
                remaining: queue.size(),
            });
        }
        let root = queue.remove_min()?.node;

        let tree = HuffmanTree { root };
        debug!(
            "Tree construction complete: {} leaves, depth {}, weight {}",
            tree.leaf_count(),
            tree.depth(),
            tree.root.freq()
        );
        Ok(tree)
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn leaf_count(&self) -> usize {
        fn count(node: &Node) -> usize {
            match node {
                Node::Leaf { .. } => 1,
                Node::Internal { left, right, .. } => count(left) + count(right),
            }
        }
        count(&self.root)
    }

    /// Length of the longest root-to-leaf path; a lone leaf has depth 0.
    pub fn depth(&self) -> usize {
        fn depth(node: &Node) -> usize {
            match node {
                Node::Leaf { .. } => 0,
                Node::Internal { left, right, .. } => 1 + depth(left).max(depth(right)),
            }
        }
        depth(&self.root)
    }

    /// Bytes held by the leaves, in left-to-right order.
    pub fn symbols(&self) -> Vec<u8> {
        fn collect(node: &Node, out: &mut Vec<u8>) {
            match node {
                Node::Leaf { byte, .. } => out.push(*byte),
                Node::Internal { left, right, .. } => {
                    collect(left, out);
                    collect(right, out);
                }
            }
        }
        let mut out = Vec::new();
        collect(&self.root, &mut out);
        out
    }

    pub fn code_table(&self) -> CodeTable {
        let mut table = CodeTable::new();
        match &self.root {
            // a lone symbol still needs one bit per occurrence
            Node::Leaf { byte, .. } => {
                trace!("Single-symbol tree: byte {:#04x} gets code '0'", byte);
                table.insert(*byte, String::from("0"));
            }
            Node::Internal { .. } => build_code_table(&self.root, String::new(), &mut table),
        }
        table
    }
}

pub fn count_frequencies(bytes: &[u8]) -> FreqTable {
    bytes.iter().fold(FreqTable::new(), |mut acc, &byte| {
        *acc.entry(byte).or_insert(0) += 1;
        acc
    })
}

pub fn entropy_from_freq(freq: &FreqTable) -> f64 {
    let total: u64 = freq.values().sum();
    if total == 0 {
        return 0.0;
    }
    let total_f = total as f64;

    let entropy: f64 = freq
        .values()
        .map(|&count| {
            let p = count as f64 / total_f;
            -p * p.log2()
        })
        .sum();

    debug!(
        "Calculated entropy: {:.4} bits/symbol (Total samples: {})",
        entropy, total
    );
    entropy
}

pub fn build_code_table(node: &Node, prefix: String, table: &mut CodeTable) {
    match node {
        Node::Leaf { byte, .. } => {
            trace!(
                "Assigning code to byte {:#04x} ('{}') : '{}'",
                byte,
                (*byte) as char,
                prefix
            );
            table.insert(*byte, prefix);
        }
        Node::Internal { left, right, .. } => {
            build_code_table(left, format!("{}0", prefix), table);
            build_code_table(right, format!("{}1", prefix), table);
        }
    }
}
