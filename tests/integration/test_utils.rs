//! Builds synthetic single-level VSF fixtures (major 2, minor 0) for the
//! integration tests: a `.vsf` index file plus its `-level00.img` sidecar,
//! with tiles encoded through the real codec the format byte selects.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbaImage};

/// Builds a `tiles_per_side x tiles_per_side` grid of `tile` x `tile`
/// solid-color tiles (pixel value `10 * tile_index`, clamped), encodes
/// each with `image_format`, and writes the index + sidecar files under
/// `dir`. Returns the `.vsf` path.
pub fn build_single_level_slide(
    dir: &Path,
    format_byte: u8,
    image_format: ImageFormat,
    tiles_per_side: u32,
    tile: u32,
) -> PathBuf {
    let size = tiles_per_side * tile;
    let tile_count = (tiles_per_side * tiles_per_side) as u64;

    let mut tiles = Vec::with_capacity(tile_count as usize);
    for i in 0..tile_count {
        tiles.push(encode_tile(image_format, tile, tile, (10 * i).min(255) as u8));
    }

    let dir_len = tile_count * 8;
    let data_start = 16 + dir_len;
    let mut sidecar = vec![0u8; data_start as usize];
    sidecar[8..16].copy_from_slice(&tile_count.to_le_bytes());

    let mut offset = data_start;
    for (i, tile_bytes) in tiles.iter().enumerate() {
        let pos = 16 + i * 8;
        sidecar[pos..pos + 8].copy_from_slice(&offset.to_le_bytes());
        offset += tile_bytes.len() as u64;
    }
    for tile_bytes in &tiles {
        sidecar.extend_from_slice(tile_bytes);
    }

    let mut header = vec![0u8; 60];
    header[0..6].copy_from_slice(b"VSF2.0");
    header[30] = 1; // level_count
    header[31..34].copy_from_slice(&[255, 255, 255]);
    header[34..38].copy_from_slice(&(size as i32).to_le_bytes());
    header[38..42].copy_from_slice(&(size as i32).to_le_bytes());
    header[50] = format_byte;
    header[51] = 90;
    header[52..56].copy_from_slice(&(tile as i32).to_le_bytes());
    header[56..60].copy_from_slice(&(tile as i32).to_le_bytes());

    let vsf_path = dir.join("sample.vsf");
    let sidecar_path = dir.join("sample-level00.img");
    std::fs::write(&vsf_path, &header).unwrap();
    std::fs::write(&sidecar_path, &sidecar).unwrap();

    vsf_path
}

fn encode_tile(format: ImageFormat, w: u32, h: u32, value: u8) -> Vec<u8> {
    let img = RgbaImage::from_pixel(w, h, image::Rgba([value, value, value, 255]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format).unwrap();
    buf.into_inner()
}
