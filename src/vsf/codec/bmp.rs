//! BMP tile codec: decode directly from the sidecar file via a pixbuf-style
//! reader.
//!
//! Grounded on `_openslide_gdkpixbuf_read("bmp", filename, offset, size,
//! ...)` in the original: read exactly the located byte range and decode
//! it as a standalone BMP.

use crate::error::DecodeError;
use crate::io::FileSource;

pub fn decode(source: &FileSource, offset: u64, size: u64) -> Result<(u32, u32, Vec<u8>), DecodeError> {
    let bytes = source
        .read_vec_at(offset, size as usize)
        .map_err(DecodeError::Io)?;

    let img = image::load_from_memory_with_format(&bytes, image::ImageFormat::Bmp).map_err(
        |e| DecodeError::CodecRejected {
            codec: "bmp",
            message: e.to_string(),
        },
    )?;
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();
    Ok((w, h, rgba.into_raw()))
}
