//! Memoization caches for the recursive operations.
//!
//! A [`Cache`] is a plain key-to-result store backed by [`HashMap`]. It never
//! evicts, so a hit always returns the value a fresh recomputation would
//! produce. A disabled cache accepts inserts and drops them, which turns every
//! lookup into a miss while leaving results untouched.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::hash::Hash;

/// A memoization cache backed by [HashMap].
pub struct Cache<K, V> {
    map: HashMap<K, V>,
    enabled: bool,
    hits: usize,
    misses: usize,
}

impl<K, V> Default for Cache<K, V> {
    fn default() -> Self {
        Self::new(12)
    }
}

impl<K, V> Cache<K, V> {
    /// Creates a new cache with room for `2^bits` entries before resizing.
    pub fn new(bits: usize) -> Self {
        assert!(bits <= 31, "Cache bits must be in range 0..=31, got {}", bits);
        Self {
            map: HashMap::with_capacity(1 << bits),
            enabled: true,
            hits: 0,
            misses: 0,
        }
    }

    /// Creates a cache that never stores anything.
    pub fn disabled() -> Self {
        Self {
            map: HashMap::new(),
            enabled: false,
            hits: 0,
            misses: 0,
        }
    }

    /// Returns the number of entries in the cache.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the number of cache hits.
    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Returns the number of cache misses.
    pub fn misses(&self) -> usize {
        self.misses
    }

    /// Snapshot of the counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.map.len(),
        }
    }

    /// Clears all entries from the cache. Counters are kept.
    pub fn clear(&mut self) {
        self.map.clear();
    }
}

impl<K, V> Cache<K, V>
where
    K: Hash + Eq,
    V: Copy,
{
    /// Looks up a key in the cache.
    #[inline]
    pub fn get(&mut self, key: &K) -> Option<V> {
        match self.map.get(key) {
            Some(&v) => {
                self.hits += 1;
                Some(v)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Inserts a key-value pair into the cache.
    #[inline]
    pub fn insert(&mut self, key: K, value: V) {
        if self.enabled {
            self.map.insert(key, value);
        }
    }
}

/// Counters of a single cache.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub entries: usize,
}

impl std::ops::Add for CacheStats {
    type Output = CacheStats;

    fn add(self, rhs: Self) -> Self::Output {
        CacheStats {
            hits: self.hits + rhs.hits,
            misses: self.misses + rhs.misses,
            entries: self.entries + rhs.entries,
        }
    }
}

impl Display for CacheStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} entries, {} hits, {} misses",
            self.entries, self.hits, self.misses
        )
    }
}
