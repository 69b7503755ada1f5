//! Common prefix search.
use super::TrieMap;
use crate::utils::FromU32;
use crate::{MappedChar, Match, ROOT_IDX};

impl<V> TrieMap<V> {
    /// Finds all occurrences of stored keys in a haystack.
    ///
    /// Matches are ordered by starting position, and matches starting at the same
    /// position are ordered by length.
    ///
    /// # Arguments
    ///
    /// - `haystack`: Search haystack.
    ///
    /// # Examples
    ///
    /// ```
    /// use dartmap::TrieMap;
    ///
    /// let mut map = TrieMap::new();
    /// map.insert("pine", "foo");
    /// map.insert("apple", "bar");
    /// map.insert("pineapple", "foobar");
    ///
    /// let matches: Vec<_> = map
    ///     .common_prefix_search("I have a pineapple.")
    ///     .into_iter()
    ///     .map(|m| (m.start_chars(), m.key(), *m.value()))
    ///     .collect();
    ///
    /// assert_eq!(
    ///     matches,
    ///     vec![(9, "pine", "foo"), (9, "pineapple", "foobar"), (13, "apple", "bar")]
    /// );
    /// ```
    pub fn common_prefix_search<'h>(&self, haystack: &'h str) -> Vec<Match<'_, 'h, V>> {
        let searcher = self.common_prefix_searcher(haystack);
        let mut matches = vec![];
        for i in 0..searcher.len_chars() {
            matches.extend(searcher.search(i));
        }
        matches
    }

    /// Returns a common prefix searcher.
    ///
    /// The searcher finds all occurrences of keys starting from a given position in the
    /// haystack, and the occurrences are reported as a sequence of [`Match`](crate::Match).
    ///
    /// # Examples
    ///
    /// ```
    /// use dartmap::TrieMap;
    ///
    /// let map: TrieMap<_> = [("世界", 0), ("世界中", 1), ("国民", 2)]
    ///     .into_iter()
    ///     .collect();
    ///
    /// let searcher = map.common_prefix_searcher("国民が世界中にて");
    ///
    /// let mut matches = vec![];
    /// for i in 0..searcher.len_chars() {
    ///     for m in searcher.search(i) {
    ///         matches.push((
    ///             *m.value(),
    ///             m.start_chars(), m.end_chars(),
    ///             m.start_bytes(), m.end_bytes(),
    ///         ));
    ///     }
    /// }
    ///
    /// assert_eq!(
    ///     matches,
    ///     vec![(2, 0, 2, 0, 6), (0, 3, 5, 9, 15), (1, 3, 6, 9, 18)]
    /// );
    /// ```
    pub fn common_prefix_searcher<'h>(
        &self,
        haystack: &'h str,
    ) -> CommonPrefixSearcher<'_, 'h, V> {
        let mut searcher = CommonPrefixSearcher {
            map: self,
            haystack: "",
            mapped: vec![],
        };
        searcher.update_haystack(haystack);
        searcher
    }

    /// Prepares a search haystack for common prefix search.
    ///
    /// # Arguments
    ///
    /// - `haystack`: Search haystack.
    /// - `mapped`: Mapped haystack.
    #[inline(always)]
    fn map_haystack(&self, haystack: &str, mapped: &mut Vec<MappedChar>) {
        mapped.clear();
        let mut end_bytes = 0;
        for c in haystack.chars() {
            end_bytes += c.len_utf8();
            mapped.push(MappedChar {
                c: self.mapper.get(c),
                end_bytes,
            });
        }
    }
}

/// Common prefix searcher created by [`TrieMap::common_prefix_searcher`].
pub struct CommonPrefixSearcher<'t, 'h, V> {
    map: &'t TrieMap<V>,
    haystack: &'h str,
    mapped: Vec<MappedChar>,
}

impl<'t, 'h, V> CommonPrefixSearcher<'t, 'h, V> {
    /// Sets a search haystack, reusing the internal buffer.
    pub fn update_haystack(&mut self, haystack: &'h str) {
        self.haystack = haystack;
        self.map.map_haystack(haystack, &mut self.mapped);
    }

    /// Gets the haystack length in characters.
    pub fn len_chars(&self) -> usize {
        self.mapped.len()
    }

    /// Creates an iterator of matches starting at the `start`-th character.
    ///
    /// # Panics
    ///
    /// Panics if `start` is greater than [`len_chars`](Self::len_chars).
    pub fn search(&self, start: usize) -> CommonPrefixSearchIter<'_, 't, 'h, V> {
        let start_chars = start;
        let start_bytes = if start_chars == 0 {
            0
        } else {
            self.mapped[start_chars - 1].end_bytes
        };
        CommonPrefixSearchIter {
            haystack: self.haystack,
            mapped: &self.mapped,
            haystack_pos: start_chars,
            map: self.map,
            node_idx: ROOT_IDX,
            start_chars,
            start_bytes,
        }
    }
}

/// Iterator for common prefix search.
pub struct CommonPrefixSearchIter<'s, 't, 'h, V> {
    haystack: &'h str,
    mapped: &'s [MappedChar],
    haystack_pos: usize,
    map: &'t TrieMap<V>,
    node_idx: u32,
    start_chars: usize,
    start_bytes: usize,
}

impl<'t, 'h, V> Iterator for CommonPrefixSearchIter<'_, 't, 'h, V> {
    type Item = Match<'t, 'h, V>;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        let map = self.map;
        while self.haystack_pos < self.mapped.len() {
            let mc = self.mapped[self.haystack_pos];
            let child_idx = mc.c.and_then(|c| map.get_child_idx(self.node_idx, c));
            if let Some(child_idx) = child_idx {
                self.node_idx = child_idx;
            } else {
                self.haystack_pos = self.mapped.len();
                return None;
            }

            self.haystack_pos += 1;

            if let Some(leaf_idx) = map.get_leaf_idx(self.node_idx) {
                if let Some(value) = map.values[usize::from_u32(leaf_idx)].as_ref() {
                    let end_chars = self.haystack_pos;
                    let end_bytes = self.mapped[end_chars - 1].end_bytes;
                    let haystack = self.haystack;
                    return Some(Match {
                        value,
                        key: &haystack[self.start_bytes..end_bytes],
                        range_chars: self.start_chars..end_chars,
                        range_bytes: self.start_bytes..end_bytes,
                    });
                }
            }
        }
        None
    }
}
