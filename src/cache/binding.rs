//! Indirection from an open slide to its currently installed cache.
//!
//! Grounded on `_openslide_cache_binding` in the original C. Two mutexes:
//! the binding's own (held only long enough to identify, and delegate to,
//! the installed cache) and the cache's (governing all content mutation).
//! This lets [`CacheBinding::set`] swap in a new cache without blocking a
//! reader already inside a `get`/`put` on the old one.

use std::sync::{Arc, Mutex};

use super::entry::CacheEntry;
use super::key::PlaneId;
use super::lru_cache::{Cache, DEFAULT_CACHE_CAPACITY};

pub struct CacheBinding {
    mutex: Mutex<Arc<Cache>>,
}

impl CacheBinding {
    /// Allocate a private cache at the default capacity (32 MiB) and bind
    /// to it.
    pub fn create() -> Self {
        CacheBinding {
            mutex: Mutex::new(Cache::create(DEFAULT_CACHE_CAPACITY)),
        }
    }

    /// Bind to an already-existing cache, e.g. one shared across slides.
    pub fn with_cache(cache: Arc<Cache>) -> Self {
        CacheBinding {
            mutex: Mutex::new(cache),
        }
    }

    /// Install `new_cache`, releasing the reference to whichever cache was
    /// installed before.
    pub fn set(&self, new_cache: Arc<Cache>) {
        let mut guard = self.mutex.lock().unwrap();
        *guard = new_cache;
    }

    /// The currently installed cache, for callers that want to operate on
    /// it directly (e.g. to hold it past a later `set`).
    pub fn current(&self) -> Arc<Cache> {
        Arc::clone(&self.mutex.lock().unwrap())
    }

    pub fn put(&self, plane: PlaneId, x: i64, y: i64, data: Vec<u8>) -> CacheEntry {
        let guard = self.mutex.lock().unwrap();
        guard.put(plane, x, y, data)
    }

    pub fn get(&self, plane: PlaneId, x: i64, y: i64) -> Option<CacheEntry> {
        let guard = self.mutex.lock().unwrap();
        guard.get(plane, x, y)
    }
}
