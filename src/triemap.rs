//! A dynamic double-array trie map.
mod insert;
mod search;

use crate::builder::Builder;
use crate::errors::Result;
use crate::mapper::{CodeMapper, SymbolMode};
use crate::utils::FromU32;
use crate::{Node, Statistics};

use crate::{END_CODE, ROOT_IDX};

pub use search::{CommonPrefixSearchIter, CommonPrefixSearcher};

/// A map from string keys to values on a dynamic double-array trie.
///
/// Keys are handled as sequences of Unicode scalar values, and
/// [`END_MARKER`](crate::END_MARKER) is implicitly appended to every key to
/// distinguish a key from its prefixes.
#[derive(Clone)]
pub struct TrieMap<V> {
    pub(crate) mapper: CodeMapper,
    pub(crate) nodes: Vec<Node>,
    pub(crate) values: Vec<Option<V>>,
    pub(crate) num_keys: usize,
}

impl<V> TrieMap<V> {
    /// Creates an empty [`TrieMap`].
    ///
    /// # Examples
    ///
    /// ```
    /// use dartmap::TrieMap;
    ///
    /// let map: TrieMap<u32> = TrieMap::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn new() -> Self {
        Builder::new().build()
    }

    /// Creates a new [`TrieMap`] from input records.
    ///
    /// # Arguments
    ///
    /// - `records`: List of key-value pairs in any order.
    ///
    /// # Errors
    ///
    /// [`DartError`](crate::errors::DartError) will be returned when
    ///
    /// - `records` contains empty strings,
    /// - `records` contains [`END_MARKER`](crate::END_MARKER), or
    /// - the scale of the resulting map exceeds [`MAX_NUM_NODES`](crate::MAX_NUM_NODES).
    ///
    /// # Examples
    ///
    /// ```
    /// use dartmap::TrieMap;
    ///
    /// let records = vec![("世界", 2), ("世界中", 3), ("国民", 2)];
    /// let map = TrieMap::from_records(records).unwrap();
    ///
    /// assert_eq!(map.len(), 3);
    /// ```
    pub fn from_records<I, K>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
    {
        Builder::new().build_from_records(records)
    }

    /// Returns the number of stored keys.
    #[inline]
    pub const fn len(&self) -> usize {
        self.num_keys
    }

    /// Checks if no key is stored.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.num_keys == 0
    }

    /// Returns the encoding of characters used by this map.
    #[inline]
    pub const fn symbol_mode(&self) -> SymbolMode {
        self.mapper.mode()
    }

    /// Returns a reference to the value associated with an input key if exists.
    ///
    /// An empty key never matches.
    ///
    /// # Arguments
    ///
    /// - `key`: Search key.
    ///
    /// # Examples
    ///
    /// ```
    /// use dartmap::TrieMap;
    ///
    /// let mut map = TrieMap::new();
    /// map.insert("pine", "foo");
    ///
    /// assert_eq!(map.get("pine"), Some(&"foo"));
    /// assert_eq!(map.get("pin"), None);
    /// assert_eq!(map.get(""), None);
    /// ```
    #[inline(always)]
    pub fn get(&self, key: &str) -> Option<&V> {
        let leaf_idx = self.find_terminal(key)?;
        self.values[usize::from_u32(leaf_idx)].as_ref()
    }

    /// Returns a mutable reference to the value associated with an input key if exists.
    ///
    /// # Arguments
    ///
    /// - `key`: Search key.
    ///
    /// # Examples
    ///
    /// ```
    /// use dartmap::TrieMap;
    ///
    /// let mut map = TrieMap::new();
    /// map.insert("pine", 1);
    /// if let Some(v) = map.get_mut("pine") {
    ///     *v += 1;
    /// }
    ///
    /// assert_eq!(map.get("pine"), Some(&2));
    /// ```
    #[inline(always)]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let leaf_idx = self.find_terminal(key)?;
        self.values[usize::from_u32(leaf_idx)].as_mut()
    }

    /// Checks if an input key is stored as a whole.
    ///
    /// An empty key never matches.
    ///
    /// # Arguments
    ///
    /// - `key`: Search key.
    ///
    /// # Examples
    ///
    /// ```
    /// use dartmap::TrieMap;
    ///
    /// let mut map = TrieMap::new();
    /// map.insert("pineapple", ());
    ///
    /// assert!(map.contains_exact("pineapple"));
    /// assert!(!map.contains_exact("pine"));
    /// ```
    #[inline(always)]
    pub fn contains_exact(&self, key: &str) -> bool {
        self.find_terminal(key)
            .map_or(false, |leaf_idx| self.is_leaf(leaf_idx))
    }

    /// Walks `key` followed by the end marker, returning the terminal node.
    #[inline(always)]
    fn find_terminal(&self, key: &str) -> Option<u32> {
        if key.is_empty() {
            return None;
        }
        let mut node_idx = ROOT_IDX;
        for c in key.chars() {
            let mc = self.mapper.get(c)?;
            node_idx = self.get_child_idx(node_idx, mc)?;
        }
        self.get_child_idx(node_idx, END_CODE)
    }

    #[inline(always)]
    pub(crate) fn get_child_idx(&self, node_idx: u32, mc: u32) -> Option<u32> {
        let base = self.get_base(node_idx);
        if base == 0 {
            return None;
        }
        let child_idx = base + mc - 1;
        let child = self.nodes.get(usize::from_u32(child_idx))?;
        if child.is_child_of(node_idx) {
            Some(child_idx)
        } else {
            None
        }
    }

    /// Returns the terminal reached from `node_idx` by the end marker,
    /// i.e., the leaf holding the value of the key ending at `node_idx`.
    #[inline(always)]
    pub(crate) fn get_leaf_idx(&self, node_idx: u32) -> Option<u32> {
        self.get_child_idx(node_idx, END_CODE)
            .filter(|&leaf_idx| self.is_leaf(leaf_idx))
    }

    #[inline(always)]
    fn get_base(&self, node_idx: u32) -> u32 {
        self.nodes[usize::from_u32(node_idx)].base
    }

    #[inline(always)]
    fn is_leaf(&self, node_idx: u32) -> bool {
        self.nodes[usize::from_u32(node_idx)].is_leaf()
    }
}

impl<V> Default for TrieMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Statistics for TrieMap<V> {
    fn heap_bytes(&self) -> usize {
        self.mapper.heap_bytes()
            + self.nodes.capacity() * std::mem::size_of::<Node>()
            + self.values.capacity() * std::mem::size_of::<Option<V>>()
    }

    fn num_elems(&self) -> usize {
        self.nodes.len()
    }

    fn num_vacants(&self) -> usize {
        // The root is never vacant even before it gets a child.
        self.nodes.iter().skip(1).filter(|nd| nd.is_vacant()).count()
    }
}

impl<K, V> Extend<(K, V)> for TrieMap<V>
where
    K: AsRef<str>,
{
    /// # Panics
    ///
    /// Panics like [`TrieMap::insert`]. Records with empty keys are skipped.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, records: I) {
        for (key, value) in records {
            self.insert(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for TrieMap<V>
where
    K: AsRef<str>,
{
    /// # Panics
    ///
    /// Panics like [`TrieMap::insert`]. Records with empty keys are skipped.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(records: I) -> Self {
        let mut map = Self::new();
        map.extend(records);
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOREM: &[&str] = &[
        "Lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed",
        "do", "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna",
        "aliqua", "Ut", "enim", "ad", "minim", "veniam", "quis", "nostrud", "exercitation",
        "ullamco", "laboris", "nisi", "ut", "aliquip", "ex", "ea", "commodo", "consequat",
        "Duis", "aute", "irure", "dolor", "in", "reprehenderit", "in", "voluptate", "velit",
        "esse", "cillum", "dolore", "eu", "fugiat", "nulla", "pariatur", "Excepteur", "sint",
        "occaecat", "cupidatat", "non", "proident", "sunt", "in", "culpa", "qui", "officia",
        "deserunt", "mollit", "anim", "id", "est", "laborum",
    ];

    #[test]
    fn test_contains_exact() {
        let mut map = TrieMap::new();
        for &key in LOREM {
            map.insert(key, ());
        }
        for &key in LOREM {
            assert!(map.contains_exact(key), "{key}");
        }
        assert!(!map.contains_exact("Lore"));
        assert!(!map.contains_exact("lorem"));
        assert!(!map.contains_exact("ipsu"));
        assert!(!map.contains_exact("olor"));
        assert!(!map.contains_exact("i"));
        assert!(!map.contains_exact("laborumx"));
        assert!(!map.contains_exact(""));
    }

    #[test]
    fn test_get() {
        let keys = vec!["世界", "世界中", "世論調査", "統計調査"];
        let map: TrieMap<_> = keys.iter().enumerate().map(|(i, k)| (k, i)).collect();
        for (i, key) in keys.iter().enumerate() {
            assert_eq!(map.get(key), Some(&i));
        }
        assert_eq!(map.get("世"), None);
        assert_eq!(map.get("世論"), None);
        assert_eq!(map.get("世界中で"), None);
        assert_eq!(map.get("統計"), None);
        assert_eq!(map.get("統計調"), None);
        assert_eq!(map.get("日本"), None);
        assert_eq!(map.get(""), None);
    }

    #[test]
    fn test_prefix_is_not_a_key() {
        let mut map = TrieMap::new();
        map.insert("pine", "foo");
        assert_eq!(map.get("pin"), None);
        assert!(!map.contains_exact("pin"));
        assert_eq!(map.get("pine"), Some(&"foo"));
    }

    #[test]
    fn test_overwrite() {
        let mut map = TrieMap::new();
        assert_eq!(map.insert("apple", 1), None);
        assert_eq!(map.insert("apple", 2), Some(1));
        assert_eq!(map.get("apple"), Some(&2));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_get_mut() {
        let mut map = TrieMap::new();
        map.insert("a", vec![1]);
        map.insert("ab", vec![2]);
        map.get_mut("a").unwrap().push(3);
        assert_eq!(map.get("a"), Some(&vec![1, 3]));
        assert_eq!(map.get("ab"), Some(&vec![2]));
        assert!(map.get_mut("abc").is_none());
        assert!(map.get_mut("").is_none());
    }

    #[test]
    fn test_empty_map() {
        let map: TrieMap<u32> = TrieMap::default();
        assert_eq!(map.get("a"), None);
        assert!(!map.contains_exact("a"));
        assert_eq!(map.get(""), None);
        assert_eq!(map.num_vacants(), 0);
        assert_eq!(map.vacant_ratio(), 0.);
    }

    #[test]
    fn test_unknown_chars_in_query() {
        let mut map = TrieMap::new();
        map.insert("a", 1);
        assert_eq!(map.get("a\u{0}"), None);
        assert_eq!(map.get("\u{0}"), None);
        assert_eq!(map.get("\u{10ffff}"), None);
        assert!(!map.contains_exact("a\u{0}"));
    }

    #[test]
    fn test_len() {
        let mut map = TrieMap::new();
        for &key in LOREM {
            map.insert(key, ());
        }
        let mut distinct = LOREM.to_vec();
        distinct.sort_unstable();
        distinct.dedup();
        assert_eq!(map.len(), distinct.len());
        assert!(!map.is_empty());
    }

    #[test]
    fn test_collect_skips_empty_keys() {
        let mut map: TrieMap<_> = [("", 0), ("a", 1)].into_iter().collect();
        map.extend([("", 2), ("b", 3)]);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(""), None);
        assert_eq!(map.get("a"), Some(&1));
        assert_eq!(map.get("b"), Some(&3));
    }
}
