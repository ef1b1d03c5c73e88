use image::ImageFormat;
use tempfile::tempdir;

use vsf_slide::VsfSlide;

use super::test_utils::build_single_level_slide;

/// Once every tile in a region has been painted (and therefore cached),
/// the sidecar backing it can disappear and a repaint still succeeds,
/// served entirely out of the cache.
#[test]
fn repaint_survives_sidecar_removal_once_cached() {
    let dir = tempdir().unwrap();
    let path = build_single_level_slide(dir.path(), 2, ImageFormat::Png, 2, 10);
    let slide = VsfSlide::open(&path).unwrap();

    let first = slide.paint_region(0, 0, 0, 20, 20).unwrap();

    let sidecar = dir.path().join("sample-level00.img");
    std::fs::remove_file(&sidecar).unwrap();

    let second = slide.paint_region(0, 0, 0, 20, 20).unwrap();
    assert_eq!(first.pixels, second.pixels);
}

/// Without a prior read, a missing sidecar surfaces as an I/O error
/// instead of silently painting a blank region.
#[test]
fn paint_region_without_cache_warm_errors_on_missing_sidecar() {
    let dir = tempdir().unwrap();
    let path = build_single_level_slide(dir.path(), 2, ImageFormat::Png, 2, 10);

    let sidecar = dir.path().join("sample-level00.img");
    std::fs::remove_file(&sidecar).unwrap();

    let slide = VsfSlide::open(&path).unwrap();
    assert!(slide.paint_region(0, 0, 0, 20, 20).is_err());
}
