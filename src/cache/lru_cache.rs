//! Bounded, size-accounted LRU cache of [`CacheEntry`] values.
//!
//! Grounded on `_openslide_cache` in the original C: one mutex guards the
//! recency list, the key→value index, and `total_size` together; eviction
//! pops from the tail until the incoming entry fits. We use the `lru` crate
//! (already reached for by the teacher, in `tile/cache.rs`) as the combined
//! recency-list + index, and size-account manually the same way
//! `tile/cache.rs`'s `put()` does, rather than relying on `lru`'s own
//! entry-count capacity.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use lru::LruCache;
use tracing::warn;

use super::entry::CacheEntry;
use super::key::{CacheKey, PlaneId};

/// Default cache capacity, matching `DEFAULT_CACHE_SIZE` (32 MiB).
pub const DEFAULT_CACHE_CAPACITY: u64 = 1024 * 1024 * 32;

/// Upper bound on the number of distinct keys the recency list tracks.
/// Real eviction is size-driven; this only bounds bookkeeping overhead for
/// pathological many-tiny-tiles workloads.
const MAX_TRACKED_ENTRIES: usize = 1 << 20;

struct Inner {
    lru: LruCache<CacheKey, CacheEntry>,
    total_size: u64,
}

/// A bounded, reference-counted tile cache.
///
/// Always held behind an `Arc` (see [`Cache::create`]) so it can be shared
/// by multiple [`super::binding::CacheBinding`]s; the `Arc`'s strong count
/// plays the role the original's manual `cache_ref`/`cache_unref` played.
pub struct Cache {
    capacity: u64,
    inner: Mutex<Inner>,
    warned_overlarge: AtomicBool,
}

impl Cache {
    /// Create a cache with the given byte capacity, refcount 1 (the `Arc`).
    pub fn create(capacity_bytes: u64) -> Arc<Cache> {
        Arc::new(Cache {
            capacity: capacity_bytes,
            inner: Mutex::new(Inner {
                lru: LruCache::new(NonZeroUsize::new(MAX_TRACKED_ENTRIES).unwrap()),
                total_size: 0,
            }),
            warned_overlarge: AtomicBool::new(false),
        })
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Current resident size, for tests and diagnostics.
    pub fn total_size(&self) -> u64 {
        self.inner.lock().unwrap().total_size
    }

    /// Number of resident entries, for tests and diagnostics.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().lru.len()
    }

    /// Insert `data` under `(plane, x, y)`, returning a caller-owned entry
    /// regardless of whether the insert actually happened.
    ///
    /// If `data.len()` exceeds capacity, the entry is not inserted and a
    /// performance warning latches exactly once for this cache's lifetime.
    /// Otherwise LRU values are evicted from the tail until the incoming
    /// entry fits, then it is inserted at the MRU head.
    pub fn put(&self, plane: PlaneId, x: i64, y: i64, data: Vec<u8>) -> CacheEntry {
        let size = data.len() as u64;
        let caller_entry = CacheEntry::new(data, size);

        if size > self.capacity {
            if !self.warned_overlarge.swap(true, Ordering::Relaxed) {
                warn!(
                    size,
                    capacity = self.capacity,
                    "rejecting overlarge cache entry"
                );
            }
            return caller_entry;
        }

        let key = CacheKey::new(plane, x, y);
        // A second reference is what the cache itself holds; the first
        // stays with the caller regardless of insertion outcome.
        let cache_held = caller_entry.clone_ref();

        let mut inner = self.inner.lock().unwrap();

        // put() on an existing key replaces the prior value; account for
        // its release before accounting for the new size.
        if let Some(old) = inner.lru.pop(&key) {
            inner.total_size = inner.total_size.saturating_sub(old.size());
        }

        while inner.total_size + size > self.capacity {
            match inner.lru.pop_lru() {
                Some((_, evicted)) => {
                    inner.total_size = inner.total_size.saturating_sub(evicted.size());
                }
                None => break,
            }
        }

        inner.lru.put(key, cache_held);
        inner.total_size += size;

        caller_entry
    }

    /// Look up `(plane, x, y)`. On hit, moves the entry to the MRU head and
    /// returns a fresh reference to it. Never allocates, never fails.
    pub fn get(&self, plane: PlaneId, x: i64, y: i64) -> Option<CacheEntry> {
        let key = CacheKey::new(plane, x, y);
        let mut inner = self.inner.lock().unwrap();
        inner.lru.get(&key).map(CacheEntry::clone_ref)
    }
}
