//! Internal node implementation for the radix trie.
//!
//! Nodes live in a slot arena owned by the [`Trie`](crate::Trie). The owning
//! direction is strictly parent to children through the `children` map; the
//! `parent` link is a plain handle and never keeps a node alive.

use std::collections::BTreeMap;

use slotmap::new_key_type;

new_key_type! {
    /// Handle to a node of a [`Trie`](crate::Trie).
    ///
    /// Handles are generational: once the node behind a handle has been
    /// removed (or absorbed by a merge), lookups through that handle report
    /// absence instead of resolving to whatever node reuses the slot.
    pub struct NodeId;
}

/// Internal node type for the radix trie.
///
/// Each node holds the edge label consumed to reach it from its parent, an
/// optional value and its children indexed by the first byte of their label.
#[derive(Debug, Clone)]
pub(crate) struct Node<V> {
    /// The edge label; empty only for the root.
    pub label: Vec<u8>,

    /// The value stored at this node, if any
    pub value: Option<V>,

    /// Child nodes indexed by the first byte of their label, kept in byte order
    pub children: BTreeMap<u8, NodeId>,

    /// Back-reference to the parent; `None` only for the root
    pub parent: Option<NodeId>,
}

impl<V> Node<V> {
    /// Creates the root node: empty label, no value, no parent.
    pub fn root() -> Self {
        Node {
            label: Vec::new(),
            value: None,
            children: BTreeMap::new(),
            parent: None,
        }
    }

    /// Creates a leaf holding `value` below `parent`.
    pub fn leaf(label: Vec<u8>, value: V, parent: NodeId) -> Self {
        debug_assert!(!label.is_empty(), "non-root labels are never empty");
        Node {
            label,
            value: Some(value),
            children: BTreeMap::new(),
            parent: Some(parent),
        }
    }

    /// Creates a value-less branch node below `parent`, as produced by an edge split.
    pub fn branch(label: Vec<u8>, parent: NodeId) -> Self {
        debug_assert!(!label.is_empty(), "non-root labels are never empty");
        Node {
            label,
            value: None,
            children: BTreeMap::new(),
            parent: Some(parent),
        }
    }

    /// Returns whether this node is a leaf node (has no children)
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// The byte this node is filed under in its parent's children map.
    pub fn first_byte(&self) -> Option<u8> {
        self.label.first().copied()
    }

    /// The only child of this node, if it has exactly one.
    pub fn single_child(&self) -> Option<NodeId> {
        if self.children.len() != 1 {
            return None;
        }
        self.children.values().next().copied()
    }
}
