//! Refcounted holder of a decoded tile's pixel buffer.
//!
//! The original keeps this refcount atomic and separate from the cache
//! mutex specifically so a reader can keep using a tile after it has been
//! evicted, without holding the cache lock for the duration of its use.
//! `Arc` gives us exactly that: cloning is the atomic increment, dropping
//! the last handle is the atomic decrement-and-free.

use std::sync::Arc;

#[derive(Debug)]
struct Inner {
    data: Vec<u8>,
    size: u64,
}

/// An owning handle to a cached tile's pixel buffer.
///
/// Cloning acquires a new reference (`clone_ref`); dropping releases one
/// (`release`). The buffer is freed once the last handle — caller or
/// cache — is dropped.
#[derive(Debug, Clone)]
pub struct CacheEntry(Arc<Inner>);

impl CacheEntry {
    /// Construct a fresh entry with refcount 1, owned by the caller.
    pub fn new(data: Vec<u8>, size: u64) -> Self {
        CacheEntry(Arc::new(Inner { data, size }))
    }

    /// Atomically acquire a new reference to the same entry.
    pub fn clone_ref(&self) -> Self {
        self.clone()
    }

    /// Atomically release this reference. Equivalent to dropping the
    /// handle; spelled out for parity with the explicit refcount API.
    pub fn release(self) {
        drop(self)
    }

    /// The decoded pixel bytes.
    pub fn data(&self) -> &[u8] {
        &self.0.data
    }

    /// The entry's declared size in bytes (what counted against capacity).
    pub fn size(&self) -> u64 {
        self.0.size
    }

    /// Current reference count, for tests and diagnostics.
    pub fn refcount(&self) -> usize {
        Arc::strong_count(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_entry_has_refcount_one() {
        let e = CacheEntry::new(vec![1, 2, 3], 3);
        assert_eq!(e.refcount(), 1);
        assert_eq!(e.data(), &[1, 2, 3]);
    }

    #[test]
    fn clone_ref_increments_and_release_decrements() {
        let e = CacheEntry::new(vec![0u8; 16], 16);
        let e2 = e.clone_ref();
        assert_eq!(e.refcount(), 2);
        e2.release();
        assert_eq!(e.refcount(), 1);
    }

    #[test]
    fn outlives_original_handle() {
        let e = CacheEntry::new(vec![9u8; 4], 4);
        let e2 = e.clone_ref();
        e.release();
        assert_eq!(e2.data(), &[9, 9, 9, 9]);
    }
}
