//! JPEG tile codec: SOF dimension peek plus full decode via `image`.
//!
//! The dimension peek is a direct port of the marker-scanning idiom the
//! teacher already uses for JPEGTables detection (`format/jpeg.rs`'s SOF0/
//! SOF2/DHT marker constants), narrowed to the one thing the VSF decoder
//! needs: width/height out of the SOF segment, without running the
//! decoder twice.

use crate::error::DecodeError;

const MARKER_PREFIX: u8 = 0xFF;

/// Scan raw JPEG-marker bytes (no SOI required — major-1 tiles are stored
/// without one) for the first SOF0/SOF1/SOF2/SOF3 segment and return its
/// (width, height).
pub fn peek_dimensions(bytes: &[u8]) -> Result<(u32, u32), DecodeError> {
    let mut i = 0usize;
    while i + 1 < bytes.len() {
        if bytes[i] != MARKER_PREFIX {
            i += 1;
            continue;
        }
        let marker = bytes[i + 1];
        i += 2;

        match marker {
            // Fill bytes and standalone markers carry no length field.
            0x00 | 0xFF | 0x01 | 0xD0..=0xD9 => continue,
            0xC0..=0xCF if marker != 0xC4 && marker != 0xC8 && marker != 0xCC => {
                if i + 7 > bytes.len() {
                    break;
                }
                let height = u16::from_be_bytes([bytes[i + 3], bytes[i + 4]]) as u32;
                let width = u16::from_be_bytes([bytes[i + 5], bytes[i + 6]]) as u32;
                return Ok((width, height));
            }
            _ => {
                if i + 2 > bytes.len() {
                    break;
                }
                let seg_len = u16::from_be_bytes([bytes[i], bytes[i + 1]]) as usize;
                if seg_len < 2 {
                    break;
                }
                i += seg_len;
            }
        }
    }

    Err(DecodeError::CodecRejected {
        codec: "jpeg",
        message: "no SOF marker found".to_string(),
    })
}

/// Decode a complete JPEG byte stream into RGBA8, returning (width,
/// height, pixels).
pub fn decode(bytes: &[u8]) -> Result<(u32, u32, Vec<u8>), DecodeError> {
    let img = image::load_from_memory_with_format(bytes, image::ImageFormat::Jpeg).map_err(
        |e| DecodeError::CodecRejected {
            codec: "jpeg",
            message: e.to_string(),
        },
    )?;
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();
    Ok((w, h, rgba.into_raw()))
}
