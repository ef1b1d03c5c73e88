use image::ImageFormat;
use tempfile::tempdir;

use vsf_slide::VsfSlide;

use super::test_utils::build_single_level_slide;

#[test]
fn open_reports_header_and_level_geometry() {
    let dir = tempdir().unwrap();
    let path = build_single_level_slide(dir.path(), 2, ImageFormat::Png, 2, 10);

    let slide = VsfSlide::open(&path).unwrap();
    assert_eq!(slide.level_count(), 1);

    let level = slide.level(0).unwrap();
    assert_eq!(level.width, 20);
    assert_eq!(level.height, 20);
    assert_eq!(level.tiles_across, 2);
    assert_eq!(level.tiles_down, 2);
}

#[test]
fn paint_region_reassembles_png_tiles() {
    let dir = tempdir().unwrap();
    let path = build_single_level_slide(dir.path(), 2, ImageFormat::Png, 2, 10);
    let slide = VsfSlide::open(&path).unwrap();

    let canvas = slide.paint_region(0, 0, 0, 20, 20).unwrap();
    assert_eq!(canvas.width, 20);
    assert_eq!(canvas.height, 20);

    // Tile (0,0) is index 0 -> value 0; tile (1,1) is index 3 -> value 30.
    assert_eq!(&canvas.pixels[0..4], &[0, 0, 0, 255]);
    let last_px = ((19 * 20 + 19) * 4) as usize;
    assert_eq!(&canvas.pixels[last_px..last_px + 4], &[30, 30, 30, 255]);
}

#[test]
fn paint_region_reassembles_jpeg_tiles_within_tolerance() {
    let dir = tempdir().unwrap();
    let path = build_single_level_slide(dir.path(), 0, ImageFormat::Jpeg, 2, 16);
    let slide = VsfSlide::open(&path).unwrap();

    let canvas = slide.paint_region(0, 0, 0, 32, 32).unwrap();
    let top_left = &canvas.pixels[0..4];
    assert!(top_left[0] < 10, "expected near-black, got {top_left:?}");

    let bottom_right_px = ((31 * 32 + 31) * 4) as usize;
    let bottom_right = &canvas.pixels[bottom_right_px..bottom_right_px + 4];
    // Tile index 3 was encoded at value 30; JPEG is lossy, allow slack.
    assert!(
        (bottom_right[0] as i32 - 30).abs() <= 12,
        "expected near 30, got {bottom_right:?}"
    );
}

#[test]
fn open_rejects_file_with_bad_magic() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.vsf");
    std::fs::write(&path, vec![0u8; 60]).unwrap();

    assert!(VsfSlide::open(&path).is_err());
    assert!(!VsfSlide::detect(&path));
}
