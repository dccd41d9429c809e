use thiserror::Error;

/// Errors raised while building, serializing or walking a Huffman tree.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HuffmanError {
    /// `peek_min` or `remove_min` on an empty priority queue.
    #[error("priority queue is empty")]
    EmptyQueue,

    /// Tree construction did not converge to a single root.
    #[error("tree construction ended with {remaining} nodes in the queue (expected 1)")]
    Construction {
        /// Nodes left in the queue when construction stopped.
        remaining: usize,
    },

    /// Encoding hit a byte the code table has no entry for.
    #[error("symbol {0:#04x} is not in the code table")]
    UnknownSymbol(u8),

    /// Token stream could not be turned back into a tree.
    #[error("malformed tree at token {position}: {reason}")]
    MalformedTree {
        /// Byte offset into the token stream.
        position: usize,
        /// What went wrong.
        reason: &'static str,
    },

    /// Bitstring does not fit the tree it is decoded against.
    #[error("traversal failed at bit {position}: {reason}")]
    Traversal {
        /// Bit offset into the bitstring.
        position: usize,
        /// What went wrong.
        reason: &'static str,
    },

    /// A tree was requested before one was built.
    #[error("no tree has been built yet")]
    NoTree,
}

/// Result type for Huffman operations.
pub type Result<T> = std::result::Result<T, HuffmanError>;
