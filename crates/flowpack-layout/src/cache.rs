//! Width-keyed memoization of packing results.

use crate::pack::ColumnPartition;
use std::collections::VecDeque;

/// Cache key for an allocated width.
///
/// Widths are compared bit for bit, with `-0.0` folded onto `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidthKey(u32);

impl WidthKey {
    /// Key for the given width.
    #[must_use]
    pub fn new(width: f32) -> Self {
        let width = if width == 0.0 { 0.0 } else { width };
        Self(width.to_bits())
    }

    /// The width this key was made from.
    #[must_use]
    pub fn width(self) -> f32 {
        f32::from_bits(self.0)
    }
}

/// Cached packing result.
#[derive(Debug, Clone)]
pub(crate) struct CacheEntry {
    /// Allocated width the partition was computed for
    pub(crate) key: WidthKey,
    /// Packing result
    pub(crate) partition: ColumnPartition,
}

/// Snapshot of cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Entries currently held
    pub entries: usize,
    /// Lookups that found an entry
    pub hits: usize,
    /// Lookups that found nothing
    pub misses: usize,
}

/// Bounded cache of column partitions keyed by allocated width.
///
/// Entries are kept in recency order: the front is the least recently used.
/// A hit moves the entry to the back, an insert into a full cache drops the
/// front.
#[derive(Debug)]
pub struct WidthCache {
    entries: VecDeque<CacheEntry>,
    capacity: usize,
    hits: usize,
    misses: usize,
}

impl Default for WidthCache {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_CACHE_CAPACITY)
    }
}

impl WidthCache {
    /// Create an empty cache holding at most `capacity` entries.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            hits: 0,
            misses: 0,
        }
    }

    /// Look up a partition, promoting it to most recently used.
    pub fn get(&mut self, width: f32) -> Option<&ColumnPartition> {
        let key = WidthKey::new(width);
        let Some(pos) = self.entries.iter().position(|e| e.key == key) else {
            self.misses += 1;
            return None;
        };
        self.hits += 1;
        if let Some(entry) = self.entries.remove(pos) {
            self.entries.push_back(entry);
        }
        self.entries.back().map(|e| &e.partition)
    }

    /// Store a partition, evicting the least recently used entry when full.
    pub fn insert(&mut self, width: f32, partition: ColumnPartition) {
        let key = WidthKey::new(width);
        if let Some(pos) = self.entries.iter().position(|e| e.key == key) {
            self.entries.remove(pos);
        }
        while self.entries.len() >= self.capacity {
            if let Some(evicted) = self.entries.pop_front() {
                tracing::debug!(width = evicted.key.width(), "evicted cached partition");
            }
        }
        self.entries.push_back(CacheEntry { key, partition });
    }

    /// Check for an entry without touching recency or counters.
    #[must_use]
    pub fn contains(&self, width: f32) -> bool {
        let key = WidthKey::new(width);
        self.entries.iter().any(|e| e.key == key)
    }

    /// Cached widths from least to most recently used.
    pub fn widths(&self) -> impl Iterator<Item = f32> + '_ {
        self.entries.iter().map(|e| e.key.width())
    }

    /// Clear the entire cache.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }

    /// Maximum number of entries.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get the number of cache hits.
    #[must_use]
    pub const fn hits(&self) -> usize {
        self.hits
    }

    /// Get the number of cache misses.
    #[must_use]
    pub const fn misses(&self) -> usize {
        self.misses
    }

    /// Counters and size in one value.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
        }
    }

    /// Get the number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
