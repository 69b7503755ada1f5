//! Insertion with collision resolution by relocating sibling sets.
use log::{debug, trace};

use super::TrieMap;
use crate::errors::{DartError, Result};
use crate::utils::FromU32;
use crate::Node;
use crate::{END_CODE, END_MARKER, MAX_NUM_NODES, ROOT_IDX};

impl<V> TrieMap<V> {
    /// Inserts a key-value pair, returning the value previously associated with the key.
    ///
    /// # Arguments
    ///
    /// - `key`: Key to insert.
    /// - `value`: Value to associate with `key`.
    ///
    /// An empty key is ignored and `None` is returned, since no query can match it.
    ///
    /// # Panics
    ///
    /// Panics if `key` contains [`END_MARKER`] or the number of nodes would exceed
    /// [`MAX_NUM_NODES`].
    ///
    /// # Examples
    ///
    /// ```
    /// use dartmap::TrieMap;
    ///
    /// let mut map = TrieMap::new();
    /// assert_eq!(map.insert("世界", 1), None);
    /// assert_eq!(map.insert("世界", 2), Some(1));
    /// assert_eq!(map.get("世界"), Some(&2));
    ///
    /// assert_eq!(map.insert("", 3), None);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert<K>(&mut self, key: K, value: V) -> Option<V>
    where
        K: AsRef<str>,
    {
        let key = key.as_ref();
        if key.is_empty() {
            return None;
        }
        match self.try_insert(key, value) {
            Ok(prev) => prev,
            Err(e) => panic!("{}", e),
        }
    }

    /// Inserts a key-value pair, returning the value previously associated with the key.
    ///
    /// # Arguments
    ///
    /// - `key`: Key to insert.
    /// - `value`: Value to associate with `key`.
    ///
    /// # Errors
    ///
    /// [`DartError`] will be returned when
    ///
    /// - `key` is empty,
    /// - `key` contains [`END_MARKER`], or
    /// - the number of nodes would exceed [`MAX_NUM_NODES`].
    ///
    /// Keys are validated before the map is modified. On a scale error, nodes already
    /// claimed for the prefix of `key` remain reserved, but no query can observe them.
    ///
    /// # Examples
    ///
    /// ```
    /// use dartmap::TrieMap;
    ///
    /// let mut map = TrieMap::new();
    /// assert!(map.try_insert("", 1).is_err());
    /// assert!(map.try_insert("a\u{0}", 1).is_err());
    /// assert_eq!(map.try_insert("a", 1).unwrap(), None);
    /// ```
    pub fn try_insert<K>(&mut self, key: K, value: V) -> Result<Option<V>>
    where
        K: AsRef<str>,
    {
        let key = key.as_ref();
        if key.is_empty() {
            return Err(DartError::input("key must not be empty."));
        }
        if key.contains(END_MARKER) {
            return Err(DartError::input("END_MARKER must not be contained."));
        }

        let mut node_idx = ROOT_IDX;
        for c in key.chars() {
            let mc = self.mapper.get_or_insert(c);
            node_idx = self.insert_child(node_idx, mc)?;
        }
        let leaf_idx = self.insert_child(node_idx, END_CODE)?;

        let prev = self.values[usize::from_u32(leaf_idx)].replace(value);
        if prev.is_none() {
            self.num_keys += 1;
        }
        Ok(prev)
    }

    /// Returns the child of `node_idx` labeled by `mc`, creating it if needed.
    fn insert_child(&mut self, node_idx: u32, mc: u32) -> Result<u32> {
        let base = match self.get_base(node_idx) {
            0 => 1,
            base => base,
        };

        let child_idx = base + mc - 1;
        self.reserve_nodes(child_idx)?;

        if self.is_vacant(child_idx) {
            self.nodes[usize::from_u32(node_idx)].base = base;
            self.nodes[usize::from_u32(child_idx)].check = node_idx + 1;
            return Ok(child_idx);
        }
        if self.nodes[usize::from_u32(child_idx)].is_child_of(node_idx) {
            return Ok(child_idx);
        }

        self.relocate_children(node_idx, mc)
    }

    /// Moves all the children of `node_idx` to a new base where a child labeled by
    /// `mc` can also be placed, and returns the index of the new child.
    fn relocate_children(&mut self, node_idx: u32, mc: u32) -> Result<u32> {
        let old_base = self.get_base(node_idx);
        let children = self.fetch_children(node_idx);

        // The new label comes first; the others are recovered from the old base.
        let mut labels = Vec::with_capacity(children.len() + 1);
        labels.push(mc);
        labels.extend(children.iter().map(|&child_idx| child_idx + 1 - old_base));

        // All destinations are verified vacant before anything is moved.
        let new_base = self.find_base(old_base.max(1), &labels)?;

        for &old_idx in &children {
            let new_idx = new_base + old_idx - old_base;
            let old = self.nodes[usize::from_u32(old_idx)];
            debug_assert!(self.is_vacant(new_idx));

            self.nodes[usize::from_u32(new_idx)] = Node {
                base: old.base,
                check: node_idx + 1,
            };
            self.values[usize::from_u32(new_idx)] = self.values[usize::from_u32(old_idx)].take();

            // Grandchildren only exist under non-leaf nodes.
            if !old.is_leaf() {
                for nd in self.nodes.iter_mut() {
                    if nd.is_child_of(old_idx) {
                        nd.check = new_idx + 1;
                    }
                }
            }

            self.nodes[usize::from_u32(old_idx)] = Node::default();
        }

        self.nodes[usize::from_u32(node_idx)].base = new_base;
        let child_idx = new_base + mc - 1;
        debug_assert!(self.is_vacant(child_idx));
        self.nodes[usize::from_u32(child_idx)].check = node_idx + 1;

        debug!(
            "relocated {} children of node {} from base {} to base {}",
            children.len(),
            node_idx,
            old_base,
            new_base
        );
        Ok(child_idx)
    }

    /// Collects the indices of all the children of `node_idx`.
    fn fetch_children(&self, node_idx: u32) -> Vec<u32> {
        let base = self.get_base(node_idx);
        if base == 0 {
            return vec![];
        }
        // Children are placed at or after `base - 1`, which the end marker maps to.
        let start = usize::from_u32(base - 1);
        self.nodes
            .iter()
            .enumerate()
            .skip(start)
            .filter(|(_, nd)| nd.is_child_of(node_idx))
            .map(|(i, _)| i as u32)
            .collect()
    }

    /// Finds the smallest base greater than `after` that maps all `labels` to vacant slots.
    fn find_base(&mut self, after: u32, labels: &[u32]) -> Result<u32> {
        debug_assert!(!labels.is_empty());

        let max_label = labels.iter().copied().max().unwrap_or(END_CODE);
        let mut base = after;
        loop {
            base += 1;
            self.reserve_nodes(base + max_label - 1)?;
            if self.verify_base(base, labels) {
                return Ok(base);
            }
        }
    }

    #[inline(always)]
    fn verify_base(&self, base: u32, labels: &[u32]) -> bool {
        labels
            .iter()
            .all(|&label| self.is_vacant(base + label - 1))
    }

    #[inline(always)]
    fn is_vacant(&self, node_idx: u32) -> bool {
        self.nodes[usize::from_u32(node_idx)].is_vacant()
    }

    /// Extends the arrays so that `node_idx` becomes a valid index.
    fn reserve_nodes(&mut self, node_idx: u32) -> Result<()> {
        if MAX_NUM_NODES <= node_idx {
            return Err(DartError::scale("num_nodes", MAX_NUM_NODES));
        }
        let new_len = usize::from_u32(node_idx) + 1;
        if self.nodes.len() < new_len {
            trace!("enlarging arrays from {} to {}", self.nodes.len(), new_len);
            self.nodes.resize(new_len, Node::default());
            self.values.resize_with(new_len, || None);
        }
        Ok(())
    }
}
