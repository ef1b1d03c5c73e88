//! JPEG2000 tile codec via the `jpeg2k` crate.

use jpeg2k::Image as J2kImage;

use crate::error::DecodeError;

/// Decode a complete JPEG2000 codestream into RGBA8.
pub fn decode(bytes: &[u8]) -> Result<(u32, u32, Vec<u8>), DecodeError> {
    let image = J2kImage::from_bytes(bytes).map_err(|e| DecodeError::CodecRejected {
        codec: "jpeg2000",
        message: e.to_string(),
    })?;

    let rgb = image
        .get_pixels(None)
        .map_err(|e| DecodeError::CodecRejected {
            codec: "jpeg2000",
            message: e.to_string(),
        })?;

    let w = rgb.width;
    let h = rgb.height;
    let channels = rgb.num_components.max(1) as usize;

    let mut out = Vec::with_capacity((w * h * 4) as usize);
    for px in rgb.data.chunks_exact(channels) {
        match channels {
            1 => out.extend_from_slice(&[px[0], px[0], px[0], 255]),
            3 => out.extend_from_slice(&[px[0], px[1], px[2], 255]),
            4 => out.extend_from_slice(&[px[0], px[1], px[2], px[3]]),
            _ => {
                return Err(DecodeError::CodecRejected {
                    codec: "jpeg2000",
                    message: format!("unsupported component count {channels}"),
                })
            }
        }
    }

    Ok((w, h, out))
}
