//! Read-only views of single nodes.

use std::collections::btree_map;
use std::fmt;

use crate::node::{Node, NodeId};
use crate::order::Iter;
use crate::{Error, Trie};

/// A borrowed view of one node of a [`Trie`].
///
/// Gives access to the node's label, value, full key, parent and children,
/// and runs the ordered and prefix queries that start at a node.
pub struct NodeRef<'a, V> {
    trie: &'a Trie<V>,
    id: NodeId,
    node: &'a Node<V>,
}

impl<'a, V> Clone for NodeRef<'a, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, V> Copy for NodeRef<'a, V> {}

impl<'a, V> NodeRef<'a, V> {
    pub(crate) fn new(trie: &'a Trie<V>, id: NodeId) -> Option<Self> {
        let node = trie.nodes.get(id)?;
        Some(NodeRef { trie, id, node })
    }

    /// View of a node the trie links to, which is always live.
    pub(crate) fn at(trie: &'a Trie<V>, id: NodeId) -> Self {
        NodeRef {
            trie,
            id,
            node: trie.slot(id),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The edge label leading to this node; empty for the root.
    pub fn label(&self) -> &'a [u8] {
        &self.node.label
    }

    pub fn value(&self) -> Option<&'a V> {
        self.node.value.as_ref()
    }

    pub fn is_root(&self) -> bool {
        self.node.parent.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.node.is_leaf()
    }

    /// The full key of this node, rebuilt from the labels on the path up to
    /// the root.
    pub fn key(&self) -> Vec<u8> {
        let mut labels = vec![self.node.label.as_slice()];
        let mut at = self.node;
        while let Some(parent) = at.parent {
            at = self.trie.slot(parent);
            labels.push(at.label.as_slice());
        }
        labels.into_iter().rev().flatten().copied().collect()
    }

    pub fn parent(&self) -> Option<NodeRef<'a, V>> {
        self.node.parent.map(|parent| NodeRef::at(self.trie, parent))
    }

    /// The child whose label starts with `byte`.
    pub fn child(&self, byte: u8) -> Option<NodeRef<'a, V>> {
        self.node
            .children
            .get(&byte)
            .map(|&child| NodeRef::at(self.trie, child))
    }

    /// The children of this node keyed by the first byte of their label, in
    /// ascending byte order.
    pub fn children(&self) -> Children<'a, V> {
        Children {
            trie: self.trie,
            inner: self.node.children.iter(),
        }
    }

    /// Number of values stored in this node's subtree, this node included.
    pub fn len(&self) -> usize {
        self.trie.subtree_size(self.id)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The node holding the next larger key, see [`Trie::next`].
    pub fn next(&self) -> Option<NodeRef<'a, V>> {
        self.trie
            .next(self.id)
            .map(|found| NodeRef::at(self.trie, found))
    }

    /// Entries of this subtree in ascending key order.
    pub fn iter(&self) -> Iter<'a, V> {
        Iter::new(self.trie, Some((self.id, self.key())))
    }

    /// Full keys of the values stored in this subtree, in ascending order.
    pub fn keys(&self) -> Vec<Vec<u8>> {
        self.iter().map(|(key, _)| key).collect()
    }

    /// Keys starting with `prefix`, looked up from this node, see [`Trie::prefix`].
    pub fn prefix<P: AsRef<[u8]>>(&self, prefix: P) -> Result<Vec<Vec<u8>>, Error> {
        self.trie.prefix(self.id, prefix)
    }
}

impl<'a, V: fmt::Debug> fmt::Debug for NodeRef<'a, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("key", &String::from_utf8_lossy(&self.key()))
            .field("value", &self.node.value)
            .field("children", &self.node.children.len())
            .finish()
    }
}

/// Iterator over the children of a node, see [`NodeRef::children`].
pub struct Children<'a, V> {
    trie: &'a Trie<V>,
    inner: btree_map::Iter<'a, u8, NodeId>,
}

impl<'a, V> Iterator for Children<'a, V> {
    type Item = (u8, NodeRef<'a, V>);

    fn next(&mut self) -> Option<Self::Item> {
        let trie = self.trie;
        self.inner
            .next()
            .map(|(&byte, &child)| (byte, NodeRef::at(trie, child)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, V> DoubleEndedIterator for Children<'a, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let trie = self.trie;
        self.inner
            .next_back()
            .map(|(&byte, &child)| (byte, NodeRef::at(trie, child)))
    }
}

impl<'a, V> ExactSizeIterator for Children<'a, V> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Trie<&'static str> {
        let mut trie = Trie::new();
        for key in ["test", "slow", "water", "watsol", "tester", "testering"] {
            trie.insert(key, key).unwrap();
        }
        trie
    }

    #[test]
    fn test_root_view() {
        let trie = sample();
        let root = trie.root();

        assert!(root.is_root());
        assert!(root.label().is_empty());
        assert!(root.value().is_none());
        assert!(root.parent().is_none());
        assert_eq!(root.len(), 6);
        assert!(root.key().is_empty());
    }

    #[test]
    fn test_children_are_sorted() {
        let trie = sample();
        let bytes: Vec<u8> = trie.root().children().map(|(byte, _)| byte).collect();
        assert_eq!(bytes, vec![b's', b't', b'w']);

        let labels: Vec<&[u8]> = trie.root().children().rev().map(|(_, child)| child.label()).collect();
        assert_eq!(labels, vec![&b"wat"[..], &b"test"[..], &b"slow"[..]]);
        assert_eq!(trie.root().children().len(), 3);
    }

    #[test]
    fn test_child_parent_and_key() {
        let trie = sample();
        let test = trie.root().child(b't').unwrap();
        assert_eq!(test.label(), b"test");
        assert_eq!(test.value(), Some(&"test"));

        let er = test.child(b'e').unwrap();
        assert_eq!(er.label(), b"er");
        assert_eq!(er.key(), b"tester");
        assert_eq!(er.parent().unwrap().id(), test.id());
        assert!(test.child(b'x').is_none());
    }

    #[test]
    fn test_subtree_keys_and_len() {
        let trie = sample();
        let test = trie.node(trie.find("test").unwrap()).unwrap();

        assert_eq!(test.len(), 3);
        assert_eq!(
            test.keys(),
            vec![b"test".to_vec(), b"tester".to_vec(), b"testering".to_vec()]
        );
        let leaf = trie.node(trie.find("testering").unwrap()).unwrap();
        assert!(leaf.is_leaf());
        assert_eq!(leaf.keys(), vec![b"testering".to_vec()]);
    }

    #[test]
    fn test_next_through_view() {
        let trie = sample();
        let slow = trie.node(trie.find("slow").unwrap()).unwrap();
        assert_eq!(slow.next().unwrap().key(), b"test");

        let watsol = trie.node(trie.find("watsol").unwrap()).unwrap();
        assert!(watsol.next().is_none());
    }

    #[test]
    fn test_stale_handle_has_no_view() {
        let mut trie = sample();
        let id = trie.find("slow").unwrap();
        trie.remove("slow").unwrap();

        assert!(trie.node(id).is_none());
        assert!(trie.key(id).is_none());
        assert!(trie.children(id).is_none());
        assert!(trie.next(id).is_none());
    }
}
