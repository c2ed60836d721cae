//! Lexicographic order over the trie.
//!
//! A node's full key is a prefix of every key below it, and siblings are
//! ordered by the first byte of their labels. Pre-order traversal with
//! children visited in ascending byte order is therefore ascending key order.

use std::ops::Bound::{Excluded, Unbounded};

use crate::node::NodeId;
use crate::Trie;

impl<V> Trie<V> {
    /// The node holding the smallest key, if the trie is not empty.
    pub fn first(&self) -> Option<NodeId> {
        self.first_valued(self.root)
    }

    /// The node holding the largest key, if the trie is not empty.
    pub fn last(&self) -> Option<NodeId> {
        let mut at = self.root;
        let mut last = None;
        loop {
            let node = self.slot(at);
            if node.value.is_some() {
                last = Some(at);
            }
            match node.children.values().next_back() {
                Some(&child) => at = child,
                None => return last,
            }
        }
    }

    /// The node holding the next larger key after the node behind `id`.
    ///
    /// Descends into the children of `id` first, then climbs the parent
    /// links looking at siblings with a larger first byte. Value-less
    /// branches are never returned; the walk continues until a node with a
    /// value turns up or the trie is exhausted. Returns `None` when `id`
    /// holds the largest key or was removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_mut::Trie;
    ///
    /// let trie: Trie<u32> = vec![("b", 2), ("a", 1), ("ab", 3)].into_iter().collect();
    ///
    /// let mut keys = Vec::new();
    /// let mut at = trie.first();
    /// while let Some(id) = at {
    ///     keys.push(trie.key(id).unwrap());
    ///     at = trie.next(id);
    /// }
    /// assert_eq!(keys, vec![b"a".to_vec(), b"ab".to_vec(), b"b".to_vec()]);
    /// ```
    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        let mut current = self.nodes.get(id)?;

        if let Some(found) = current
            .children
            .values()
            .find_map(|&child| self.first_valued(child))
        {
            return Some(found);
        }

        while let Some(parent) = current.parent {
            let byte = current.first_byte()?;
            let found = self
                .slot(parent)
                .children
                .range((Excluded(byte), Unbounded))
                .find_map(|(_, &sibling)| self.first_valued(sibling));
            if found.is_some() {
                return found;
            }
            current = self.slot(parent);
        }
        None
    }

    /// The first node holding a value in the subtree at `id`, `id` included.
    fn first_valued(&self, id: NodeId) -> Option<NodeId> {
        let mut stack = vec![id];
        while let Some(at) = stack.pop() {
            let node = self.slot(at);
            if node.value.is_some() {
                return Some(at);
            }
            stack.extend(node.children.values().rev());
        }
        None
    }

    /// Iterates over all entries in ascending key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_mut::Trie;
    ///
    /// let trie: Trie<u32> = vec![("zebra", 1), ("apple", 2)].into_iter().collect();
    /// let keys: Vec<Vec<u8>> = trie.iter().map(|(key, _)| key).collect();
    /// assert_eq!(keys, vec![b"apple".to_vec(), b"zebra".to_vec()]);
    /// ```
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(self, Some((self.root, Vec::new())))
    }
}

/// An iterator over the entries of a trie or of one of its subtrees.
///
/// Performs a depth-first traversal with children in ascending byte order
/// and yields each stored value with its full key.
pub struct Iter<'a, V> {
    trie: &'a Trie<V>,

    /// Nodes still to visit, each with its full key
    stack: Vec<(NodeId, Vec<u8>)>,
}

impl<'a, V> Iter<'a, V> {
    /// Starts at `start`, a node handle paired with that node's full key.
    pub(crate) fn new(trie: &'a Trie<V>, start: Option<(NodeId, Vec<u8>)>) -> Self {
        Iter {
            trie,
            stack: start.into_iter().collect(),
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (Vec<u8>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let trie = self.trie;
        while let Some((id, key)) = self.stack.pop() {
            let node = trie.slot(id);

            for &child in node.children.values().rev() {
                let mut child_key = key.clone();
                child_key.extend_from_slice(&trie.slot(child).label);
                self.stack.push((child, child_key));
            }

            if let Some(value) = node.value.as_ref() {
                return Some((key, value));
            }
        }
        None
    }
}

impl<'a, V> IntoIterator for &'a Trie<V> {
    type Item = (Vec<u8>, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
