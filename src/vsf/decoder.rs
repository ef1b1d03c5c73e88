//! Dispatches a resolved tile extent to the right codec and produces RGBA8
//! pixels, per §4.6.
//!
//! Grounded on `_get_tile_data_version1`/`_get_tile_data_version2` and
//! `_get_tile_dimension` in `openslide-vendor-vsf.c`.

use std::path::Path;

use crate::error::DecodeError;
use crate::io::FileSource;
use crate::vsf::codec::{bmp, jp2k, jpeg, png};
use crate::vsf::header::TileFormat;
use crate::vsf::locator::TileExtent;

/// The fixed 10-byte SOI+APP0 preamble major-1 tiles omit on disk (§6).
const JFIF_PREFIX: [u8; 10] = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];

/// Expected tile dimensions before decode: peeked from the JPEG SOF
/// marker for JPEG tiles, clipped against the image bounds otherwise.
#[allow(clippy::too_many_arguments)]
pub fn tile_dimensions(
    format: TileFormat,
    sidecar: &Path,
    extent: TileExtent,
    image_w: i64,
    image_h: i64,
    tile_w: i64,
    tile_h: i64,
    col: i64,
    row: i64,
) -> Result<(u32, u32), DecodeError> {
    if format == TileFormat::Jpeg {
        let source = FileSource::open(sidecar).map_err(DecodeError::Io)?;
        let raw = source
            .read_vec_at(extent.offset, extent.size as usize)
            .map_err(DecodeError::Io)?;
        jpeg::peek_dimensions(&raw)
    } else {
        let w = tile_w.min(image_w - col * tile_w).max(0) as u32;
        let h = tile_h.min(image_h - row * tile_h).max(0) as u32;
        Ok((w, h))
    }
}

/// Decode the tile bytes at `extent` in `sidecar` into RGBA8 pixels.
pub fn decode_tile(
    major: u8,
    format: TileFormat,
    sidecar: &Path,
    extent: TileExtent,
) -> Result<(u32, u32, Vec<u8>), DecodeError> {
    if major == 1 {
        decode_major1(sidecar, extent)
    } else {
        decode_major2(format, sidecar, extent)
    }
}

fn decode_major1(sidecar: &Path, extent: TileExtent) -> Result<(u32, u32, Vec<u8>), DecodeError> {
    let source = FileSource::open(sidecar).map_err(DecodeError::Io)?;
    let raw = source
        .read_vec_at(extent.offset, extent.size as usize)
        .map_err(DecodeError::Io)?;

    let mut buf = Vec::with_capacity(JFIF_PREFIX.len() + raw.len());
    buf.extend_from_slice(&JFIF_PREFIX);
    buf.extend_from_slice(&raw);
    jpeg::decode(&buf)
}

fn decode_major2(
    format: TileFormat,
    sidecar: &Path,
    extent: TileExtent,
) -> Result<(u32, u32, Vec<u8>), DecodeError> {
    let source = FileSource::open(sidecar).map_err(DecodeError::Io)?;
    match format {
        TileFormat::Jpeg => {
            let raw = source
                .read_vec_at(extent.offset, extent.size as usize)
                .map_err(DecodeError::Io)?;
            jpeg::decode(&raw)
        }
        TileFormat::Jpeg2000 => {
            let raw = source
                .read_vec_at(extent.offset, extent.size as usize)
                .map_err(DecodeError::Io)?;
            jp2k::decode(&raw)
        }
        TileFormat::Png => png::decode(&source, extent.offset, extent.size),
        TileFormat::Bmp => bmp::decode(&source, extent.offset, extent.size),
    }
}
