//! Open-chaining hash table over an entry arena.
//!
//! Buckets hold the index of the first entry of their chain and every entry
//! links to the next one by index, so growing the table only rewrites links:
//! hash codes are computed once, at insertion.

use std::fmt;
use std::hash::{BuildHasher, Hash};

use rustc_hash::FxBuildHasher;

/// Bucket-array lengths, ascending. Composite lengths cluster badly with
/// weak hash functions, so the table only ever uses one of these.
pub const PRIMES: &[u32] = &[
    3, 7, 11, 17, 23, 29, 37, 47, 59, 71, 89, 107, 131, 163, 197, 239, 293, 353, 431, 521, 631,
    761, 919, 1103, 1327, 1597, 1931, 2333, 2801, 3371, 4049, 4861, 5839, 7013, 8419, 10103,
    12143, 14591, 17519, 21023, 25229, 30293, 36353, 43627, 52361, 62851, 75431, 90523, 108631,
    130363, 156437, 187751, 225307, 270371, 324449, 389357, 467237, 560689, 672827, 807403,
    968897, 1162687, 1395263, 1674319, 2009191, 2411033, 2893249, 3471899, 4166287, 4999559,
    5999471, 7199369,
];

const NO_ENTRY: u32 = u32::MAX;
const DEFAULT_CAPACITY: usize = 16;

/// Smallest curated prime that is `>= min`, or the largest one.
fn prime_at_least(min: usize) -> u32 {
    PRIMES.iter().copied().find(|&prime| prime as usize >= min).unwrap_or(PRIMES[PRIMES.len() - 1])
}

/// Largest curated prime that is `<= max`, or the smallest one.
fn prime_at_most(max: usize) -> u32 {
    PRIMES.iter().copied().take_while(|&prime| prime as usize <= max).last().unwrap_or(PRIMES[0])
}

/// Hash and equality used by a [`HashTable`].
pub trait KeyHasher<K: ?Sized> {
    fn hash(&self, key: &K) -> u32;
    fn eq(&self, a: &K, b: &K) -> bool;
}

/// Content hashing through `FxHash` and `Eq`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ContentHasher;

impl<K: Hash + Eq + ?Sized> KeyHasher<K> for ContentHasher {
    #[inline]
    fn hash(&self, key: &K) -> u32 {
        let hash = FxBuildHasher.hash_one(key);
        (hash ^ (hash >> 32)) as u32
    }

    #[inline]
    fn eq(&self, a: &K, b: &K) -> bool {
        a == b
    }
}

struct Entry<K, V> {
    key: K,
    value: V,
    hash: u32,
    next: u32,
}

pub struct HashTable<K, V, H = ContentHasher> {
    buckets: Box<[u32]>,
    entries: Vec<Entry<K, V>>,
    hasher: H,
}

impl<K: Hash + Eq, V> HashTable<K, V> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_hasher(capacity, ContentHasher)
    }
}

impl<K: Hash + Eq, V> Default for HashTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, H: KeyHasher<K>> HashTable<K, V, H> {
    /// Creates a table whose bucket array is the largest curated prime not
    /// above `capacity`, so a table asked for `capacity` slots grows before it
    /// holds more than that many entries.
    pub fn with_hasher(capacity: usize, hasher: H) -> Self {
        let buckets = prime_at_most(capacity) as usize;
        Self {
            buckets: vec![NO_ENTRY; buckets].into_boxed_slice(),
            entries: Vec::with_capacity(buckets),
            hasher,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current length of the bucket array; always one of [`PRIMES`].
    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        let index = self.index_of(self.hasher.hash(key), key)?;
        Some(&self.entries[index].value)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let index = self.index_of(self.hasher.hash(key), key)?;
        Some(&mut self.entries[index].value)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index_of(self.hasher.hash(key), key).is_some()
    }

    /// Inserts or overwrites, returning the previous value.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.hasher.hash(&key);
        match self.index_of(hash, &key) {
            Some(index) => Some(std::mem::replace(&mut self.entries[index].value, value)),
            None => {
                self.push(hash, key, value);
                None
            }
        }
    }

    /// Inserts a key that must not be present yet.
    ///
    /// # Panics
    ///
    /// Panics if an equal key is already in the table.
    #[track_caller]
    pub fn add(&mut self, key: K, value: V) {
        let hash = self.hasher.hash(&key);
        if self.index_of(hash, &key).is_some() {
            panic!("key is already present in the hash table");
        }
        self.push(hash, key, value);
    }

    /// Looks up an entry by a precomputed hash and a matcher, which lets
    /// callers probe with a borrowed form of the key without building one.
    pub fn find(&self, hash: u32, mut is_match: impl FnMut(&K) -> bool) -> Option<(&K, &V)> {
        let mut index = self.buckets[self.bucket_of(hash)];
        while index != NO_ENTRY {
            let entry = &self.entries[index as usize];
            if entry.hash == hash && is_match(&entry.key) {
                return Some((&entry.key, &entry.value));
            }
            index = entry.next;
        }
        None
    }

    /// Inserts with a precomputed hash. The caller guarantees that `hash`
    /// agrees with the table's hasher and that the key is absent.
    pub fn insert_hashed(&mut self, hash: u32, key: K, value: V) {
        debug_assert_eq!(hash, self.hasher.hash(&key));
        self.push(hash, key, value);
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.entries.iter().map(|entry| (&entry.key, &entry.value))
    }

    #[inline]
    fn bucket_of(&self, hash: u32) -> usize {
        hash as usize % self.buckets.len()
    }

    fn index_of(&self, hash: u32, key: &K) -> Option<usize> {
        let mut index = self.buckets[self.bucket_of(hash)];
        while index != NO_ENTRY {
            let entry = &self.entries[index as usize];
            if entry.hash == hash && self.hasher.eq(&entry.key, key) {
                return Some(index as usize);
            }
            index = entry.next;
        }
        None
    }

    fn push(&mut self, hash: u32, key: K, value: V) {
        let bucket = self.bucket_of(hash);
        let index = self.entries.len() as u32;
        self.entries.push(Entry { key, value, hash, next: self.buckets[bucket] });
        self.buckets[bucket] = index;

        if self.entries.len() == self.buckets.len() {
            self.grow();
        }
    }

    fn grow(&mut self) {
        let new_len = prime_at_least(self.buckets.len() * 2) as usize;
        if new_len <= self.buckets.len() {
            // Out of curated primes; chains just get longer.
            return;
        }

        self.buckets = vec![NO_ENTRY; new_len].into_boxed_slice();
        for index in 0..self.entries.len() {
            let bucket = self.entries[index].hash as usize % new_len;
            self.entries[index].next = self.buckets[bucket];
            self.buckets[bucket] = index as u32;
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, H> fmt::Debug for HashTable<K, V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter().map(|entry| (&entry.key, &entry.value))).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_survive_growth() {
        let mut table = HashTable::with_capacity(3);
        let mut seen_buckets = vec![table.bucket_count()];

        for n in 0..5_000u32 {
            assert_eq!(table.insert(n, n * 2), None);
            if seen_buckets.last() != Some(&table.bucket_count()) {
                seen_buckets.push(table.bucket_count());
            }
        }

        assert!(seen_buckets.len() > 5, "expected several growth events: {seen_buckets:?}");
        for buckets in seen_buckets {
            assert!(PRIMES.contains(&(buckets as u32)), "{buckets} is not a curated prime");
        }
        for n in 0..5_000u32 {
            assert_eq!(table.get(&n), Some(&(n * 2)));
        }
        assert_eq!(table.get(&5_000), None);
        assert_eq!(table.len(), 5_000);
    }

    #[test]
    fn insert_overwrites() {
        let mut table = HashTable::new();
        assert_eq!(table.insert("a", 1), None);
        assert_eq!(table.insert("a", 2), Some(1));
        assert_eq!(table.get(&"a"), Some(&2));
        assert_eq!(table.len(), 1);
        assert!(table.contains(&"a"));
        assert!(!table.contains(&"b"));
    }

    #[test]
    #[should_panic(expected = "already present")]
    fn add_rejects_duplicates() {
        let mut table = HashTable::new();
        table.add(7, ());
        table.add(7, ());
    }

    #[test]
    fn initial_bucket_count_is_prime() {
        assert_eq!(HashTable::<u32, ()>::with_capacity(256).bucket_count(), 239);
        assert_eq!(HashTable::<u32, ()>::with_capacity(0).bucket_count(), 3);
        assert_eq!(HashTable::<u32, ()>::with_capacity(7).bucket_count(), 7);
    }

    struct Collide;

    impl KeyHasher<u32> for Collide {
        fn hash(&self, _: &u32) -> u32 {
            42
        }

        fn eq(&self, a: &u32, b: &u32) -> bool {
            a == b
        }
    }

    #[test]
    fn colliding_keys_chain() {
        let mut table = HashTable::with_hasher(16, Collide);
        for n in 0..100 {
            table.add(n, n + 1);
        }
        for n in 0..100 {
            assert_eq!(table.get(&n), Some(&(n + 1)));
        }
        assert_eq!(table.find(42, |&k| k == 50), Some((&50, &51)));
    }
}
