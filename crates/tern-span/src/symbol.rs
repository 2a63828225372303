use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::{HashTable, KeyHasher};

/// An interned string. Two symbols produced by the same [`StringTable`] with
/// equal content are the same allocation.
#[derive(Clone, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(Arc<str>);

impl Symbol {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Reference equality.
    #[inline]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl PartialEq for Symbol {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other) || self.0 == other.0
    }
}

impl Deref for Symbol {
    type Target = str;

    #[inline]
    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hash used by the string table. Mixes two bytes per step; the scanner
/// interns lots of short lexemes, so the loop is kept short.
pub fn rolling_hash(bytes: &[u8]) -> u32 {
    let mut hash = 0x811c_9dc5_u32 ^ bytes.len() as u32;
    let mut pairs = bytes.chunks_exact(2);
    for pair in &mut pairs {
        let unit = u32::from(pair[0]) | (u32::from(pair[1]) << 8);
        hash = (hash.rotate_left(5) ^ unit).wrapping_mul(0x0100_0193);
    }
    if let [last] = pairs.remainder() {
        hash = (hash.rotate_left(5) ^ u32::from(*last)).wrapping_mul(0x0100_0193);
    }
    hash
}

struct SymbolHasher;

impl KeyHasher<Symbol> for SymbolHasher {
    fn hash(&self, key: &Symbol) -> u32 {
        rolling_hash(key.as_bytes())
    }

    fn eq(&self, a: &Symbol, b: &Symbol) -> bool {
        a == b
    }
}

/// Canonicalizes lexeme text.
pub struct StringTable {
    table: HashTable<Symbol, (), SymbolHasher>,
}

const DEFAULT_CAPACITY: usize = 256;

impl StringTable {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { table: HashTable::with_hasher(capacity, SymbolHasher) }
    }

    /// Returns the canonical symbol for `buffer[start..start + len]`,
    /// allocating only when the content was never seen before.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds of `buffer`.
    pub fn intern(&mut self, buffer: &[u8], start: usize, len: usize) -> Symbol {
        let bytes = &buffer[start..start + len];
        match std::str::from_utf8(bytes) {
            Ok(text) => self.intern_str(text),
            Err(_) => self.intern_str(&String::from_utf8_lossy(bytes)),
        }
    }

    pub fn intern_str(&mut self, text: &str) -> Symbol {
        let hash = rolling_hash(text.as_bytes());
        if let Some((symbol, ())) = self.table.find(hash, |symbol| symbol.as_str() == text) {
            return symbol.clone();
        }

        let symbol = Symbol(Arc::from(text));
        self.table.insert_hashed(hash, symbol.clone(), ());
        symbol
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn bucket_count(&self) -> usize {
        self.table.bucket_count()
    }
}

impl Default for StringTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StringTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringTable").field("len", &self.len()).finish_non_exhaustive()
    }
}
