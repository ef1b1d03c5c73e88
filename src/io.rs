//! Synchronous, scope-held file access and little-endian integer helpers.
//!
//! VSF is read entirely on caller threads (no background I/O, no shared
//! descriptors — spec §5): every locator and decoder call opens its
//! sidecar, reads, and lets the handle drop before returning. Grounded on
//! the teacher's `io/range_reader.rs`, whose `RangeReader` trait and
//! endian helpers this module narrows to a synchronous, file-backed
//! equivalent (VSF has no use for the teacher's S3/HTTP range-reading or
//! big-endian support, since every numeric field in the format is
//! little-endian).

use std::fs::File;
use std::os::unix::fs::FileExt;
use std::path::Path;

use crate::error::IoError;

/// A byte-addressable, read-only file opened for the duration of a single
/// call. Never shared across threads or retained past the call that
/// created it.
pub struct FileSource {
    file: File,
    len: u64,
    path: String,
}

impl FileSource {
    pub fn open(path: &Path) -> Result<Self, IoError> {
        let file = File::open(path).map_err(|source| IoError::Os {
            path: path.display().to_string(),
            source,
        })?;
        let len = file
            .metadata()
            .map_err(|source| IoError::Os {
                path: path.display().to_string(),
                source,
            })?
            .len();
        Ok(FileSource {
            file,
            len,
            path: path.display().to_string(),
        })
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    /// Read exactly `buf.len()` bytes starting at `offset`.
    pub fn read_exact_at(&self, offset: u64, buf: &mut [u8]) -> Result<(), IoError> {
        let end = offset
            .checked_add(buf.len() as u64)
            .unwrap_or(u64::MAX);
        if end > self.len {
            return Err(IoError::RangeOutOfBounds {
                offset,
                requested: buf.len() as u64,
                size: self.len,
            });
        }
        self.file
            .read_exact_at(buf, offset)
            .map_err(|source| IoError::Os {
                path: self.path.clone(),
                source,
            })
    }

    /// Read exactly `n` bytes starting at `offset` into a fresh buffer.
    pub fn read_vec_at(&self, offset: u64, n: usize) -> Result<Vec<u8>, IoError> {
        let mut buf = vec![0u8; n];
        self.read_exact_at(offset, &mut buf)?;
        Ok(buf)
    }
}

/// True if `path` can be opened for reading.
pub fn exists_and_readable(path: &Path) -> bool {
    File::open(path).is_ok()
}

// =============================================================================
// Little-endian integer helpers
// =============================================================================
//
// VSF's numeric fields are packed little-endian throughout (§6); these are
// the synchronous analogue of the teacher's `read_u32_le`/`read_u64_le`.

/// Read a little-endian u32 from the front of a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 4 bytes.
#[inline]
pub fn read_u32_le(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Read a little-endian i32 from the front of a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 4 bytes.
#[inline]
pub fn read_i32_le(bytes: &[u8]) -> i32 {
    i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Read a little-endian u64 from the front of a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 8 bytes.
#[inline]
pub fn read_u64_le(bytes: &[u8]) -> u64 {
    u64::from_le_bytes([
        bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
    ])
}

/// Read a little-endian f32 from the front of a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 4 bytes.
#[inline]
pub fn read_f32_le(bytes: &[u8]) -> f32 {
    f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Read `n` (1..=8) little-endian bytes into the low end of a `u64`.
///
/// Used by the major-1 tile locator, where the offset field's width
/// (`off_bytes`) varies by minor version (4 or 8 bytes).
///
/// # Panics
/// Panics if `n` is 0, greater than 8, or exceeds the slice length.
#[inline]
pub fn read_uint_le(bytes: &[u8], n: usize) -> u64 {
    assert!(n >= 1 && n <= 8);
    let mut buf = [0u8; 8];
    buf[..n].copy_from_slice(&bytes[..n]);
    u64::from_le_bytes(buf)
}
