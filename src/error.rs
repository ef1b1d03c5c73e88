//! Error taxonomy for the cache and VSF backend.
//!
//! Mirrors the teacher's per-concern `thiserror` enums (`src/error.rs` in
//! the original WSI Streamer), but scoped to what the CORE actually needs:
//! no HTTP status mapping, no S3/network errors.

use thiserror::Error;

/// I/O errors reading sidecar or index files from local disk.
#[derive(Debug, Error)]
pub enum IoError {
    /// Underlying OS error opening, seeking, or reading a file.
    #[error("I/O error on {path}: {source}")]
    Os {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Requested range exceeds the file's bounds.
    #[error("range out of bounds: requested {requested} bytes at offset {offset}, size is {size}")]
    RangeOutOfBounds {
        offset: u64,
        requested: u64,
        size: u64,
    },

    /// A sidecar file predicted by the naming scheme does not exist or
    /// cannot be opened for reading.
    #[error("missing asset: {0}")]
    MissingAsset(String),
}

/// Errors parsing the VSF index header or a sidecar tile directory.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Io(#[from] IoError),

    /// Filename does not end in `.vsf` (case-insensitive).
    #[error("not a VSF file: bad extension on {0}")]
    BadExtension(String),

    /// Magic bytes didn't match `VSF<M>.<m>` or encoded an unsupported
    /// (major, minor) combination.
    #[error("not a VSF file: unsupported version bytes {0:?}")]
    BadMagic([u8; 6]),

    /// Header or tile directory was shorter than required for its version.
    #[error("truncated {what}: needed {needed} bytes, file/segment had {available}")]
    Truncated {
        what: &'static str,
        needed: u64,
        available: u64,
    },

    /// A tile index fell outside `[0, tile_count)` for its layer.
    #[error("tile index {index} out of range (layer has {count} tiles)")]
    TileIndexOutOfRange { index: u64, count: u64 },

    /// Requested pyramid level does not exist.
    #[error("level {0} out of range")]
    LevelOutOfRange(usize),
}

/// Errors from a tile codec (JPEG/JPEG2000/PNG/BMP).
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error(transparent)]
    Io(#[from] IoError),

    /// The underlying codec rejected the bytes.
    #[error("codec {codec} failed to decode: {message}")]
    CodecRejected { codec: &'static str, message: String },

    /// Decoded dimensions didn't match what the caller expected.
    #[error("decoded dimensions {decoded_w}x{decoded_h} do not match expected {expected_w}x{expected_h}")]
    DimensionMismatch {
        decoded_w: u32,
        decoded_h: u32,
        expected_w: u32,
        expected_h: u32,
    },
}

/// Uninhabited marker for the cache's own error surface.
///
/// The cache never actually returns errors (spec.md §7): `get` cannot
/// fail, and `put` either inserts or silently drops an overlarge entry
/// behind a one-time warning. This variant-less enum documents that by
/// construction rather than by convention — nothing in `cache/` ever
/// constructs one.
#[derive(Debug, Error)]
pub enum CacheError {}

/// Top-level error returned by slide `detect`, `open`, and `read_tile`.
///
/// Aggregates the taxonomy the way the teacher's `FormatError` aggregates
/// `IoError`/`TiffError`. The cache itself never returns errors (spec.md
/// §7): `Cache::get` cannot fail and `Cache::put` never fails, it only
/// silently drops over-large entries behind a one-time warning.
#[derive(Debug, Error)]
pub enum VsfError {
    #[error(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Raised by `detect`/`open` when the file is structurally not VSF.
    #[error("format rejected: {0}")]
    FormatRejected(String),
}
