//! PNG tile codec: decode directly from the sidecar file.
//!
//! PNG is self-delimiting (terminated by its `IEND` chunk), so reading
//! exactly the located `size` bytes at `offset` and handing them to the
//! `image` crate's PNG decoder is equivalent to the original's
//! `_openslide_png_read(filename, offset, ...)`, which opens its own file
//! descriptor and reads from that position.

use crate::error::DecodeError;
use crate::io::FileSource;

pub fn decode(source: &FileSource, offset: u64, size: u64) -> Result<(u32, u32, Vec<u8>), DecodeError> {
    let bytes = source
        .read_vec_at(offset, size as usize)
        .map_err(DecodeError::Io)?;

    let img = image::load_from_memory_with_format(&bytes, image::ImageFormat::Png).map_err(
        |e| DecodeError::CodecRejected {
            codec: "png",
            message: e.to_string(),
        },
    )?;
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();
    Ok((w, h, rgba.into_raw()))
}
