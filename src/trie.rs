//! The main trie implementation.
//!
//! This module contains the `Trie` type, which provides the primary API for
//! working with the radix trie: insertion with edge splitting, exact lookup,
//! removal with re-compression, and whole-tree traversal.

use std::fmt;

use slotmap::SlotMap;
use tracing::{debug, trace};

use crate::node::{Node, NodeId};
use crate::node_ref::{Children, NodeRef};
use crate::util::{prefix_match, show};
use crate::Error;

/// A mutable radix trie keyed by byte strings.
///
/// This Radix Trie (also known as a Patricia Trie) stores values under
/// non-empty byte-string keys. Nodes are addressed through [`NodeId`]
/// handles, which stay valid until the node they name is removed.
#[derive(Clone)]
pub struct Trie<V> {
    /// Arena owning every node, the root included
    pub(crate) nodes: SlotMap<NodeId, Node<V>>,

    /// The root node: empty label, never holds a value
    pub(crate) root: NodeId,

    /// The number of values stored in the trie
    size: usize,
}

impl<V> Trie<V> {
    /// Creates a new, empty trie.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_mut::Trie;
    ///
    /// let trie = Trie::<i32>::new();
    /// assert!(trie.is_empty());
    /// ```
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::root());
        Trie {
            nodes,
            root,
            size: 0,
        }
    }

    /// Returns the number of values stored in the trie.
    ///
    /// Value-less branch nodes are not counted.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_mut::Trie;
    ///
    /// let mut trie = Trie::new();
    /// assert_eq!(trie.len(), 0);
    ///
    /// trie.insert("hello", 42).unwrap();
    /// assert_eq!(trie.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the trie contains no values.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Removes every entry. The root survives, so its handle stays valid.
    pub fn clear(&mut self) {
        let root = self.root;
        self.nodes.retain(|id, _| id == root);
        self.nodes[root].children.clear();
        self.size = 0;
    }

    /// Handle of the root node.
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// Read-only view of the root node.
    pub fn root(&self) -> NodeRef<'_, V> {
        NodeRef::at(self, self.root)
    }

    /// Read-only view of the node behind `id`, or `None` if it was removed.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, V>> {
        NodeRef::new(self, id)
    }

    pub(crate) fn slot(&self, id: NodeId) -> &Node<V> {
        &self.nodes[id]
    }

    /// Inserts `value` under `key`, replacing any value already stored there.
    ///
    /// Returns the handle of the node that now holds the value.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidKey`] if `key` is empty; the trie is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_mut::{Error, Trie};
    ///
    /// let mut trie = Trie::new();
    /// let id = trie.insert("alphabet", 1).unwrap();
    /// assert_eq!(trie.key(id).unwrap(), b"alphabet");
    ///
    /// assert_eq!(trie.insert("", 2), Err(Error::InvalidKey));
    /// ```
    pub fn insert<K: AsRef<[u8]>>(&mut self, key: K, value: V) -> Result<NodeId, Error> {
        self.insert_entry(key.as_ref(), value).map(|(id, _)| id)
    }

    /// Like [`insert`](Self::insert) but returns the value previously stored
    /// under `key`, if any.
    pub fn replace<K: AsRef<[u8]>>(&mut self, key: K, value: V) -> Result<Option<V>, Error> {
        self.insert_entry(key.as_ref(), value).map(|(_, old)| old)
    }

    fn insert_entry(&mut self, key: &[u8], value: V) -> Result<(NodeId, Option<V>), Error> {
        if key.is_empty() {
            debug!("rejected insert with an empty key");
            return Err(Error::InvalidKey);
        }
        let (id, old) = self.insert_at(self.root, key, value);
        if old.is_none() {
            self.size += 1;
        }
        Ok((id, old))
    }

    // Descends from `at`, consuming whole edge labels, until the key either
    // ends on an existing node, runs off into a missing child, or diverges
    // partway through an edge (which is then split).
    fn insert_at(&mut self, mut at: NodeId, mut key: &[u8], value: V) -> (NodeId, Option<V>) {
        loop {
            let first = key[0];
            let Some(&child) = self.nodes[at].children.get(&first) else {
                let leaf = self.nodes.insert(Node::leaf(key.to_vec(), value, at));
                self.nodes[at].children.insert(first, leaf);
                return (leaf, None);
            };

            let label = &self.nodes[child].label;
            if key == label.as_slice() {
                let old = self.nodes[child].value.replace(value);
                return (child, old);
            }

            let common = prefix_match(key, label);
            if common == label.len() {
                at = child;
                key = &key[common..];
                continue;
            }

            let branch = self.split_edge(at, child, common);
            if common == key.len() {
                self.nodes[branch].value = Some(value);
                return (branch, None);
            }
            at = branch;
            key = &key[common..];
        }
    }

    /// Splits the edge leading to `child` after `at` bytes and returns the
    /// new value-less node that now sits between `parent` and `child`.
    fn split_edge(&mut self, parent: NodeId, child: NodeId, at: usize) -> NodeId {
        debug_assert!(at > 0 && at < self.nodes[child].label.len());

        let suffix = self.nodes[child].label.split_off(at);
        let prefix = std::mem::replace(&mut self.nodes[child].label, suffix);
        trace!(
            prefix = %show(&prefix),
            suffix = %show(&self.nodes[child].label),
            "splitting edge"
        );

        let (prefix_first, suffix_first) = (prefix[0], self.nodes[child].label[0]);
        let branch = self.nodes.insert(Node::branch(prefix, parent));
        self.nodes[branch].children.insert(suffix_first, child);
        self.nodes[child].parent = Some(branch);
        let replaced = self.nodes[parent].children.insert(prefix_first, branch);
        debug_assert_eq!(replaced, Some(child));

        branch
    }

    /// Finds the node whose full key is exactly `key`, with or without a value.
    pub(crate) fn locate(&self, mut key: &[u8]) -> Option<NodeId> {
        if key.is_empty() {
            return None;
        }
        let mut at = self.root;
        loop {
            let &child = self.nodes[at].children.get(&key[0])?;
            let label = self.nodes[child].label.as_slice();
            if key == label {
                return Some(child);
            }
            // The key diverges partway through this edge.
            if !key.starts_with(label) {
                return None;
            }
            key = &key[label.len()..];
            at = child;
        }
    }

    /// Returns the handle of the node storing a value under `key`.
    ///
    /// A key that only exists as a shared prefix of longer keys holds no
    /// value and is reported as absent. Never modifies the trie.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_mut::Trie;
    ///
    /// let mut trie = Trie::new();
    /// trie.insert("tester", 1).unwrap();
    /// trie.insert("testing", 2).unwrap();
    ///
    /// let id = trie.find("tester").unwrap();
    /// assert_eq!(trie.key(id).unwrap(), b"tester");
    ///
    /// // "test" is only a branch point
    /// assert!(trie.find("test").is_none());
    /// ```
    pub fn find<K: AsRef<[u8]>>(&self, key: K) -> Option<NodeId> {
        self.locate(key.as_ref())
            .filter(|&id| self.nodes[id].value.is_some())
    }

    /// Retrieves a reference to the value stored for the given key, if any.
    pub fn get<K: AsRef<[u8]>>(&self, key: K) -> Option<&V> {
        let id = self.locate(key.as_ref())?;
        self.nodes[id].value.as_ref()
    }

    /// Retrieves a mutable reference to the value stored for the given key, if any.
    pub fn get_mut<K: AsRef<[u8]>>(&mut self, key: K) -> Option<&mut V> {
        let id = self.locate(key.as_ref())?;
        self.nodes[id].value.as_mut()
    }

    /// Returns `true` if the trie contains a value for the given key.
    pub fn contains_key<K: AsRef<[u8]>>(&self, key: K) -> bool {
        self.get(key).is_some()
    }

    /// The value held by the node behind `id`.
    pub fn value(&self, id: NodeId) -> Option<&V> {
        self.nodes.get(id)?.value.as_ref()
    }

    /// Mutable access to the value held by the node behind `id`.
    pub fn value_mut(&mut self, id: NodeId) -> Option<&mut V> {
        self.nodes.get_mut(id)?.value.as_mut()
    }

    /// Removes the value stored under `key` and returns it.
    ///
    /// A leaf is detached outright. A node with a single child absorbs that
    /// child, keeping its own handle. A node with several children stays as a
    /// value-less branch. Returns `None` and leaves the trie untouched when no
    /// value is stored under `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_mut::Trie;
    ///
    /// let mut trie = Trie::new();
    /// trie.insert("test", "aa").unwrap();
    /// trie.insert("slow", "bb").unwrap();
    ///
    /// assert_eq!(trie.remove("slow"), Some("bb"));
    /// assert_eq!(trie.remove("slow"), None);
    /// ```
    pub fn remove<K: AsRef<[u8]>>(&mut self, key: K) -> Option<V> {
        let target = self.locate(key.as_ref())?;
        let node = &self.nodes[target];
        if node.value.is_none() {
            return None;
        }
        let parent = node.parent?;

        let removed = match node.children.len() {
            0 => self.detach(parent, target),
            1 => {
                let value = self.nodes[target].value.take();
                self.recompress(target);
                value
            }
            _ => self.nodes[target].value.take(),
        };
        self.size -= 1;
        removed
    }

    fn detach(&mut self, parent: NodeId, leaf: NodeId) -> Option<V> {
        let node = self.nodes.remove(leaf)?;
        let unlinked = self.nodes[parent].children.remove(&node.label[0]);
        debug_assert_eq!(unlinked, Some(leaf));
        trace!(label = %show(&node.label), "detached leaf");

        self.recompress(parent);
        node.value
    }

    /// Merges a value-less node that has exactly one child with that child.
    ///
    /// The node keeps its handle and its place in the parent's map; the
    /// child's handle goes stale.
    fn recompress(&mut self, id: NodeId) {
        if id == self.root {
            return;
        }
        let node = &self.nodes[id];
        if node.value.is_some() {
            return;
        }
        let Some(only) = node.single_child() else {
            return;
        };
        let Some(child) = self.nodes.remove(only) else {
            return;
        };

        for &grandchild in child.children.values() {
            self.nodes[grandchild].parent = Some(id);
        }

        let node = &mut self.nodes[id];
        trace!(
            label = %show(&node.label),
            suffix = %show(&child.label),
            "merging node with its only child"
        );
        node.label.extend_from_slice(&child.label);
        node.value = child.value;
        node.children = child.children;
    }

    /// Calls `f` with the value slot of every node, the root and value-less
    /// branches included, in pre-order with children in ascending byte order.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_mut::Trie;
    ///
    /// let mut trie = Trie::new();
    /// trie.insert("water", 1).unwrap();
    /// trie.insert("watsol", 2).unwrap();
    ///
    /// let mut seen = Vec::new();
    /// trie.visit(|value| seen.push(value.copied()));
    /// // root, the "wat" branch, then both leaves
    /// assert_eq!(seen, vec![None, None, Some(1), Some(2)]);
    /// ```
    pub fn visit<F>(&self, mut f: F)
    where
        F: FnMut(Option<&V>),
    {
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            f(node.value.as_ref());
            stack.extend(node.children.values().rev());
        }
    }

    /// The full key of the node behind `id`: its labels from the root down.
    ///
    /// Computed on every call by walking the parent links.
    pub fn key(&self, id: NodeId) -> Option<Vec<u8>> {
        self.node(id).map(|node| node.key())
    }

    /// The children of the node behind `id`, in ascending byte order.
    pub fn children(&self, id: NodeId) -> Option<Children<'_, V>> {
        self.node(id).map(|node| node.children())
    }

    /// Full keys of every stored value, in ascending byte order.
    pub fn keys(&self) -> Vec<Vec<u8>> {
        self.iter().map(|(key, _)| key).collect()
    }

    /// Number of values stored in the subtree rooted at `id`, `id` included.
    pub(crate) fn subtree_size(&self, id: NodeId) -> usize {
        let mut count = 0;
        let mut stack = vec![id];
        while let Some(at) = stack.pop() {
            let node = &self.nodes[at];
            if node.value.is_some() {
                count += 1;
            }
            stack.extend(node.children.values());
        }
        count
    }

    /// Checks every structural invariant of the trie.
    ///
    /// Returns `false` if any child is filed under a byte other than the
    /// first byte of its label, a parent link disagrees with the children
    /// map, a non-root label is empty, a non-root node without a value has
    /// fewer than two children, the root carries a label or value, or the
    /// stored count disagrees with the values present.
    pub fn is_well_formed(&self) -> bool {
        let Some(root) = self.nodes.get(self.root) else {
            return false;
        };
        if !root.label.is_empty() || root.parent.is_some() || root.value.is_some() {
            return false;
        }

        let mut reached = 0;
        let mut values = 0;
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            reached += 1;
            if node.value.is_some() {
                values += 1;
            }
            if id != self.root
                && (node.label.is_empty() || (node.value.is_none() && node.children.len() < 2))
            {
                return false;
            }
            for (&byte, &child_id) in &node.children {
                let Some(child) = self.nodes.get(child_id) else {
                    return false;
                };
                if child.parent != Some(id) || child.first_byte() != Some(byte) {
                    return false;
                }
                stack.push(child_id);
            }
        }

        reached == self.nodes.len() && values == self.size
    }
}

impl<V> Default for Trie<V> {
    fn default() -> Self {
        Self::new()
    }
}

// Prints one node per line, indented by depth
impl<V: fmt::Debug> fmt::Debug for Trie<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            let node = &self.nodes[id];
            writeln!(
                f,
                "{:indent$}{:?} value: {:?}",
                "",
                show(&node.label),
                node.value,
                indent = depth * 2
            )?;
            stack.extend(node.children.values().rev().map(|&child| (child, depth + 1)));
        }
        Ok(())
    }
}

// Two tries are equal when they store the same entries
impl<V: PartialEq> PartialEq for Trie<V> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.iter().eq(other.iter())
    }
}

impl<V: Eq> Eq for Trie<V> {}

impl<K: AsRef<[u8]>, V> Extend<(K, V)> for Trie<V> {
    /// Inserts every pair; pairs with an empty key are skipped.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            if self.insert(key, value).is_err() {
                debug!("skipped an entry with an empty key");
            }
        }
    }
}

impl<K: AsRef<[u8]>, V> FromIterator<(K, V)> for Trie<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut trie = Trie::new();
        trie.extend(iter);
        trie
    }
}
