//! Prefix view into a radix trie.
//!
//! This module provides the `PrefixView` type, which resolves a key prefix to
//! the subtree holding every key that starts with it, and the prefix queries
//! built on top of it.

use std::fmt;

use crate::node::NodeId;
use crate::order::Iter;
use crate::{Error, Trie};

/// A lightweight view into the subtrie holding every key with a given prefix.
///
/// The view is anchored at the best-fit node: the shallowest node whose full
/// key starts with the prefix. That node may sit partway down an edge the
/// prefix only partially covers, since every key below such an edge still
/// starts with the prefix.
///
/// # Examples
///
/// ```
/// use radix_mut::Trie;
///
/// let trie: Trie<i32> = vec![("hello", 1), ("help", 2), ("world", 3)]
///     .into_iter()
///     .collect();
///
/// let view = trie.view_subtrie("he");
/// assert!(view.exists());
/// assert_eq!(view.len(), 2);
/// assert!(view.contains_key("hello"));
/// assert!(!view.contains_key("world"));
/// ```
pub struct PrefixView<'a, V> {
    /// The source trie for this view
    trie: &'a Trie<V>,

    /// The key prefix defining this view
    prefix: Vec<u8>,

    /// The best-fit node and its full key, if the prefix resolves
    subtrie_node: Option<(NodeId, Vec<u8>)>,
}

impl<'a, V> PrefixView<'a, V> {
    /// Creates a view of the keys starting with `prefix`, resolved from `from`.
    pub(crate) fn new(trie: &'a Trie<V>, from: NodeId, prefix: &[u8]) -> Self {
        PrefixView {
            trie,
            prefix: prefix.to_vec(),
            subtrie_node: Self::find_subtrie_node(trie, from, prefix),
        }
    }

    /// Returns the key prefix for this view.
    pub fn prefix(&self) -> &[u8] {
        &self.prefix
    }

    /// Returns the underlying trie.
    pub fn trie(&self) -> &'a Trie<V> {
        self.trie
    }

    /// Returns whether the prefix resolves to a subtree of the trie.
    pub fn exists(&self) -> bool {
        self.subtrie_node.is_some()
    }

    /// The best-fit node anchoring this view.
    pub fn node(&self) -> Option<NodeId> {
        self.subtrie_node.as_ref().map(|(id, _)| *id)
    }

    /// Returns the number of entries in this subtrie view.
    pub fn len(&self) -> usize {
        self.node().map_or(0, |id| self.trie.subtree_size(id))
    }

    /// Returns whether this view is empty (contains no entries).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks if the view contains a key.
    ///
    /// Only returns true if the key is in the trie and lies under this view.
    pub fn contains_key<K: AsRef<[u8]>>(&self, key: K) -> bool {
        self.get(key).is_some()
    }

    /// Gets the value for a key if it exists in this prefix view.
    pub fn get<K: AsRef<[u8]>>(&self, key: K) -> Option<&'a V> {
        let (_, anchor) = self.subtrie_node.as_ref()?;
        let key = key.as_ref();
        if !key.starts_with(anchor) {
            return None;
        }
        self.trie.get(key)
    }

    /// Returns an iterator over the entries of the view in ascending key order.
    pub fn iter(&self) -> Iter<'a, V> {
        Iter::new(self.trie, self.subtrie_node.clone())
    }

    /// Full keys of the entries in the view, in ascending order.
    pub fn keys(&self) -> Vec<Vec<u8>> {
        self.iter().map(|(key, _)| key).collect()
    }

    // Resolves `prefix` against full keys, starting the descent at `from`.
    fn find_subtrie_node(trie: &Trie<V>, from: NodeId, prefix: &[u8]) -> Option<(NodeId, Vec<u8>)> {
        let mut path = trie.key(from)?;

        // The prefix ends at or above `from`: the whole subtree qualifies
        // exactly when `from` itself lies under the prefix.
        if prefix.len() <= path.len() {
            return path.starts_with(prefix).then(|| (from, path));
        }
        if !prefix.starts_with(&path) {
            return None;
        }

        let mut at = from;
        let mut remaining = &prefix[path.len()..];
        loop {
            let &child = trie.slot(at).children.get(&remaining[0])?;
            let label = trie.slot(child).label.as_slice();
            path.extend_from_slice(label);

            // The prefix runs out inside this edge
            if remaining.len() <= label.len() {
                return label.starts_with(remaining).then(|| (child, path));
            }
            if !remaining.starts_with(label) {
                return None;
            }
            remaining = &remaining[label.len()..];
            at = child;
        }
    }
}

impl<'a, V> Clone for PrefixView<'a, V> {
    fn clone(&self) -> Self {
        PrefixView {
            trie: self.trie,
            prefix: self.prefix.clone(),
            subtrie_node: self.subtrie_node.clone(),
        }
    }
}

impl<'a, V> fmt::Debug for PrefixView<'a, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrefixView")
            .field("prefix", &String::from_utf8_lossy(&self.prefix))
            .field("node", &self.node())
            .finish()
    }
}

impl<'a, 'v, V> IntoIterator for &'v PrefixView<'a, V> {
    type Item = (Vec<u8>, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V> Trie<V> {
    /// Creates a view of the subtrie holding every key that starts with `prefix`.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_mut::Trie;
    ///
    /// let trie: Trie<i32> = vec![("hello", 1), ("help", 2)].into_iter().collect();
    ///
    /// let view = trie.view_subtrie("hel");
    /// assert_eq!(view.get("hello"), Some(&1));
    /// assert!(!trie.view_subtrie("hex").exists());
    /// ```
    pub fn view_subtrie<P: AsRef<[u8]>>(&self, prefix: P) -> PrefixView<'_, V> {
        PrefixView::new(self, self.root, prefix.as_ref())
    }

    /// Full keys of the stored values that start with `prefix`, in ascending
    /// order, resolving the prefix from the node behind `from`.
    ///
    /// `prefix` is compared against full keys, not against the part of the
    /// key below `from`. If `prefix` ends at or above `from`, the result is
    /// all of `from`'s subtree when `from`'s key starts with `prefix`.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when the prefix leaves the trie (or `from`'s
    /// subtree) partway, or `from` was removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_mut::{Error, Trie};
    ///
    /// let trie: Trie<()> = vec![("tester", ()), ("testering", ()), ("te", ()), ("testeringandmore", ())]
    ///     .into_iter()
    ///     .collect();
    ///
    /// let tester = trie.find("tester").unwrap();
    /// assert_eq!(
    ///     trie.prefix(tester, "tester").unwrap(),
    ///     vec![b"tester".to_vec(), b"testering".to_vec(), b"testeringandmore".to_vec()]
    /// );
    /// assert_eq!(trie.prefix(tester, "tea"), Err(Error::NotFound));
    /// ```
    pub fn prefix<P: AsRef<[u8]>>(&self, from: NodeId, prefix: P) -> Result<Vec<Vec<u8>>, Error> {
        let view = PrefixView::new(self, from, prefix.as_ref());
        if !view.exists() {
            return Err(Error::NotFound);
        }
        Ok(view.keys())
    }

    /// Full keys of the stored values that start with `prefix`, in ascending order.
    pub fn prefix_keys<P: AsRef<[u8]>>(&self, prefix: P) -> Result<Vec<Vec<u8>>, Error> {
        self.prefix(self.root, prefix)
    }
}
