use crate::errors::Result;
use crate::mapper::{CodeMapper, SymbolMode};
use crate::{Node, TrieMap};

/// Builder of [`TrieMap`].
///
/// # Examples
///
/// ```
/// use dartmap::{Builder, Statistics, SymbolMode};
///
/// let map = Builder::new()
///     .symbol_mode(SymbolMode::Dense)
///     .build_from_records([("世界", 0), ("世界中", 1), ("国民", 2)])
///     .unwrap();
///
/// assert_eq!(map.len(), 3);
/// assert_eq!(map.get("世界中"), Some(&1));
/// assert!(map.num_elems() < 16);
/// ```
#[derive(Default, Clone, Debug)]
pub struct Builder {
    mode: SymbolMode,
    capacity: usize,
}

impl Builder {
    /// Creates a builder with the default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how characters are encoded into transition codes.
    ///
    /// The default is [`SymbolMode::CodePoint`].
    #[allow(clippy::missing_const_for_fn)]
    pub fn symbol_mode(mut self, mode: SymbolMode) -> Self {
        self.mode = mode;
        self
    }

    /// Reserves room for at least `capacity` nodes in advance.
    #[allow(clippy::missing_const_for_fn)]
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Creates an empty [`TrieMap`].
    pub fn build<V>(self) -> TrieMap<V> {
        let capacity = self.capacity.max(1);
        let mut nodes = Vec::with_capacity(capacity);
        nodes.push(Node::default());
        let mut values = Vec::with_capacity(capacity);
        values.push(None);
        TrieMap {
            mapper: CodeMapper::new(self.mode),
            nodes,
            values,
            num_keys: 0,
        }
    }

    /// Creates a [`TrieMap`] from key-value pairs.
    ///
    /// Records can be given in any order. If a key appears more than once,
    /// the last value is kept.
    ///
    /// # Errors
    ///
    /// [`DartError`](crate::errors::DartError) will be returned when
    ///
    /// - `records` contains empty strings,
    /// - `records` contains [`END_MARKER`](crate::END_MARKER), or
    /// - the scale of the resulting map exceeds [`MAX_NUM_NODES`](crate::MAX_NUM_NODES).
    pub fn build_from_records<I, K, V>(self, records: I) -> Result<TrieMap<V>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
    {
        let mut map = self.build();
        for (key, value) in records {
            map.try_insert(key, value)?;
        }
        Ok(map)
    }
}
