//! # Radix Trie
//!
//! A mutable radix trie (also known as a patricia trie) keyed by byte strings.
//!
//! Edges carry multi-byte labels, so chains of single-child nodes are
//! collapsed into one edge. Inserting splits edges where two keys diverge
//! partway through a label; removing re-compresses a value-less node with a
//! single child into that child.
//!
//! ## Features
//!
//! - **Stable node handles**: operations hand out [`NodeId`]s; a handle to a
//!   node that has since been removed resolves to nothing
//! - **Parent links**: every node can reconstruct its full key and find its
//!   lexicographic successor without a stack
//! - **Ordered traversal**: children are kept sorted by byte, so iteration,
//!   key listing and [`Trie::next`] follow ascending byte order
//! - **Prefix queries**: enumerate every key under a prefix through a
//!   [`PrefixView`]
//!
//! ## Example
//!
//! ```rust
//! use radix_mut::Trie;
//!
//! let mut trie = Trie::new();
//! trie.insert("hello", 1).unwrap();
//! trie.insert("help", 2).unwrap();
//! trie.insert("world", 3).unwrap();
//!
//! assert_eq!(trie.get("hello"), Some(&1));
//! assert_eq!(trie.prefix_keys("hel").unwrap(), vec![b"hello".to_vec(), b"help".to_vec()]);
//!
//! // Walk the keys in byte order through successor links
//! let first = trie.first().unwrap();
//! let second = trie.next(first).unwrap();
//! assert_eq!(trie.key(second).unwrap(), b"help");
//!
//! assert_eq!(trie.remove("help"), Some(2));
//! assert_eq!(trie.len(), 2);
//! ```

mod node;
mod node_ref;
mod order;
mod prefix_view;
mod trie;
mod util;

// Re-export public types
pub use crate::node::NodeId;
pub use crate::node_ref::{Children, NodeRef};
pub use crate::order::Iter;
pub use crate::prefix_view::PrefixView;
pub use crate::trie::Trie;
pub use crate::util::{longest_common_prefix, prefix_match};

/// Errors that can occur in trie operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Key is invalid for the operation
    #[error("invalid key: keys must be non-empty")]
    InvalidKey,
    /// No entry or subtree matches the given key or prefix
    #[error("no entry matches the given key or prefix")]
    NotFound,
}
