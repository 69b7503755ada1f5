use crate::{END_CODE, END_MARKER};

const INVALID_CODE: u32 = u32::MAX;

/// Encoding of characters into the integer codes used for transitions.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SymbolMode {
    /// Uses the Unicode scalar value as the code.
    ///
    /// The array length scales with the largest code point ever inserted.
    #[default]
    CodePoint,

    /// Assigns codes `1, 2, ...` to characters in the order they first appear in
    /// inserted keys.
    ///
    /// The array length scales with the number of distinct characters instead,
    /// at the cost of one table lookup per character. The code table itself is
    /// indexed by character value, so it grows to the largest code point seen,
    /// at four bytes per entry.
    Dense,
}

#[derive(Default, Clone)]
pub struct CodeMapper {
    mode: SymbolMode,
    table: Vec<u32>,
    // Number of characters mapped in the dense mode, excluding END_MARKER.
    alphabet_size: u32,
}

impl CodeMapper {
    pub fn new(mode: SymbolMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    #[inline]
    pub const fn mode(&self) -> SymbolMode {
        self.mode
    }

    #[inline(always)]
    pub fn get(&self, c: char) -> Option<u32> {
        if c == END_MARKER {
            return Some(END_CODE);
        }
        match self.mode {
            SymbolMode::CodePoint => Some(u32::from(c)),
            SymbolMode::Dense => self
                .table
                .get(c as usize)
                .copied()
                .filter(|&code| code != INVALID_CODE),
        }
    }

    pub fn get_or_insert(&mut self, c: char) -> u32 {
        if let Some(code) = self.get(c) {
            return code;
        }
        debug_assert_eq!(self.mode, SymbolMode::Dense);
        let c = c as usize;
        if self.table.len() <= c {
            self.table.resize(c + 1, INVALID_CODE);
        }
        self.alphabet_size += 1;
        self.table[c] = self.alphabet_size;
        self.alphabet_size
    }

    #[inline]
    pub fn heap_bytes(&self) -> usize {
        self.table.capacity() * std::mem::size_of::<u32>()
    }
}
