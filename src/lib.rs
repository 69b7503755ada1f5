//! 🎯 Dartmap: Dynamic double-ARray Trie MAP
//!
//! Dartmap is an associative container from Unicode string keys to arbitrary values,
//! implemented as a character-wise double-array trie that grows as keys are inserted.
//! Each step of a lookup is a single array access, so queries run in time linear in
//! the length of the key, and all registered keys occurring in a text can be found
//! with common prefix search.
//!
//! # Data structures
//!
//! - [`TrieMap`] maps string keys to values of any type and supports insertion,
//!   exact lookup and common prefix search.
//! - [`Builder`] configures how characters are encoded before a map is built.
//!
//! # Examples
//!
//! ## Looking up an input key
//!
//! To get a value associated with an input key, use [`TrieMap::get()`].
//!
//! ```
//! use dartmap::TrieMap;
//!
//! let mut map = TrieMap::new();
//! map.insert("世界", 0);
//! map.insert("世界中", 1);
//! map.insert("国民", 2);
//!
//! assert_eq!(map.get("世界中"), Some(&1));
//! assert_eq!(map.get("日本中"), None);
//! assert!(map.contains_exact("国民"));
//! ```
//!
//! ## Finding all occurrences of keys in an input text
//!
//! To search for all occurrences of registered keys in an input text,
//! use [`TrieMap::common_prefix_search()`].
//!
//! ```
//! use dartmap::TrieMap;
//!
//! let map: TrieMap<_> = [("世界", 0), ("世界中", 1), ("国民", 2)]
//!     .into_iter()
//!     .collect();
//!
//! let matches: Vec<_> = map
//!     .common_prefix_search("国民が世界中にて")
//!     .into_iter()
//!     .map(|m| (*m.value(), m.key(), m.start_chars()..m.end_chars()))
//!     .collect();
//!
//! assert_eq!(
//!     matches,
//!     vec![(2, "国民", 0..2), (0, "世界", 3..5), (1, "世界中", 3..6)]
//! );
//! ```
#![deny(missing_docs)]

#[cfg(target_pointer_width = "16")]
compile_error!("`target_pointer_width` must be larger than or equal to 32");

mod builder;
pub mod errors;
mod mapper;
pub mod triemap;
mod utils;

#[cfg(test)]
mod proptests;

use std::ops::Range;

pub(crate) const ROOT_IDX: u32 = 0;
pub(crate) const END_CODE: u32 = 0;

/// Upper bound of the number of nodes (i.e., the array length) of a map.
pub const MAX_NUM_NODES: u32 = 0x7fff_ffff;

/// Special terminator, which must not be contained in keys.
pub const END_MARKER: char = '\u{0}';

pub use builder::Builder;
pub use mapper::SymbolMode;
pub use triemap::TrieMap;

/// Result of common prefix search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Match<'t, 'h, V> {
    value: &'t V,
    key: &'h str,
    range_chars: Range<usize>,
    range_bytes: Range<usize>,
}

impl<'t, 'h, V> Match<'t, 'h, V> {
    /// Value associated with the matched key.
    #[inline(always)]
    pub const fn value(&self) -> &'t V {
        self.value
    }

    /// Matched key, as a slice of the haystack.
    #[inline(always)]
    pub const fn key(&self) -> &'h str {
        self.key
    }

    /// Starting position of the match in characters.
    #[inline(always)]
    pub const fn start_chars(&self) -> usize {
        self.range_chars.start
    }

    /// Ending position of the match in characters.
    #[inline(always)]
    pub const fn end_chars(&self) -> usize {
        self.range_chars.end
    }

    /// Starting position of the match in bytes.
    #[inline(always)]
    pub const fn start_bytes(&self) -> usize {
        self.range_bytes.start
    }

    /// Ending position of the match in bytes.
    #[inline(always)]
    pub const fn end_bytes(&self) -> usize {
        self.range_bytes.end
    }
}

/// Handler for a mapped character.
#[derive(Default, Clone, Copy)]
struct MappedChar {
    c: Option<u32>,
    end_bytes: usize,
}

/// Element of the double array.
///
/// `check` holds the parent index plus one, so that zero can denote a free slot
/// even though the root is indexed by zero.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
struct Node {
    base: u32,
    check: u32,
}

impl Node {
    #[inline(always)]
    pub const fn is_vacant(&self) -> bool {
        self.base == 0 && self.check == 0
    }

    #[inline(always)]
    pub const fn is_leaf(&self) -> bool {
        self.base == 0
    }

    #[inline(always)]
    pub const fn is_child_of(&self, parent_idx: u32) -> bool {
        self.check == parent_idx + 1
    }
}

/// Trait to provide statistics of the data structure.
pub trait Statistics {
    /// Returns the total amount of heap used by the data structure in bytes.
    fn heap_bytes(&self) -> usize;

    /// Returns the number of reserved elements.
    fn num_elems(&self) -> usize;

    /// Returns the number of vacant elements.
    ///
    /// # Note
    ///
    /// It takes `O(num_elems)` time.
    fn num_vacants(&self) -> usize;

    /// Returns the ratio of vacant elements.
    ///
    /// # Note
    ///
    /// It takes `O(num_elems)` time.
    fn vacant_ratio(&self) -> f64 {
        let num_elems = self.num_elems();
        if num_elems == 0 {
            0.
        } else {
            self.num_vacants() as f64 / num_elems as f64
        }
    }
}
