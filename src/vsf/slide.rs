//! The VSF façade: `open`, `paint_region`, `read_tile`, `destroy`, plus the
//! published properties a host application reads off an opened slide.
//!
//! Grounded on `vsf_open`/`paint_region`/`read_tile`/`destroy` in
//! `openslide-vendor-vsf.c`. Levels are built once at `open` and sorted by
//! descending width; ties are broken by ascending layer index (a
//! deliberate, recorded deviation from the original's non-stable sort —
//! see DESIGN.md).

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, trace};

use crate::cache::{CacheBinding, PlaneId};
use crate::error::{DecodeError, VsfError};
use crate::vsf::grid::{Canvas, DecodedTile, Grid};
use crate::vsf::header::{self, VsfHeader};
use crate::vsf::locator::{locate_major1, locate_major2, TileExtent};
use crate::vsf::decoder;

#[derive(Debug, Clone, Copy)]
struct TileDescriptor {
    extent: TileExtent,
    width: u32,
    height: u32,
}

/// A single pyramid level: dimensions, its backing sidecar file, and a
/// lazily-populated per-tile descriptor array.
pub struct Level {
    pub layer: u8,
    pub width: i64,
    pub height: i64,
    pub tile_w: i64,
    pub tile_h: i64,
    pub downsample: i64,
    pub tiles_across: i64,
    pub tiles_down: i64,
    pub filename: PathBuf,
    descriptors: Mutex<Vec<Option<TileDescriptor>>>,
}

impl Level {
    fn descriptor(&self, tile_index: usize) -> Option<TileDescriptor> {
        self.descriptors.lock().unwrap()[tile_index]
    }

    fn set_descriptor(&self, tile_index: usize, desc: TileDescriptor) {
        self.descriptors.lock().unwrap()[tile_index] = Some(desc);
    }
}

fn ceil_div(a: i64, b: i64) -> i64 {
    (a + b - 1) / b
}

/// Bounding box derived from the top (widest) level's grid, published as
/// the slide's bounds property.
#[derive(Debug, Clone, Copy)]
pub struct Bounds {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

/// An opened VSF slide.
pub struct VsfSlide {
    header: VsfHeader,
    filename: PathBuf,
    levels: Vec<Level>,
    binding: CacheBinding,
}

impl VsfSlide {
    /// `detect()`: see [`header::detect`].
    pub fn detect(filename: &Path) -> bool {
        header::detect(filename)
    }

    /// `open(filename) -> slide`: reads the header, builds every level's
    /// grid geometry, sorts levels widest-first, and publishes properties.
    pub fn open(filename: &Path) -> Result<Self, VsfError> {
        let header = header::read_index(filename)?;

        let mut levels = Vec::with_capacity(header.level_count as usize);
        for layer in 0..header.level_count {
            let width = (header.size_x >> layer) as i64;
            let height = (header.size_y >> layer) as i64;
            let tile_w = header.tile_size_x as i64;
            let tile_h = header.tile_size_y as i64;
            let tiles_across = ceil_div(width, tile_w);
            let tiles_down = ceil_div(height, tile_h);
            let sidecar = header::sidecar_filename(filename, header.major, layer, 0);

            levels.push(Level {
                layer,
                width,
                height,
                tile_w,
                tile_h,
                downsample: 1i64 << layer,
                tiles_across,
                tiles_down,
                filename: PathBuf::from(sidecar),
                descriptors: Mutex::new(vec![None; (tiles_across * tiles_down).max(0) as usize]),
            });
        }

        // Stable sort by descending width; ties keep ascending layer
        // order (spec §9 open question, resolved in DESIGN.md).
        levels.sort_by(|a, b| b.width.cmp(&a.width));

        debug!(
            file = %filename.display(),
            major = header.major,
            minor = header.minor,
            levels = levels.len(),
            "opened VSF slide"
        );

        Ok(VsfSlide {
            header,
            filename: filename.to_path_buf(),
            levels,
            binding: CacheBinding::create(),
        })
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn level(&self, index: usize) -> Option<&Level> {
        self.levels.get(index)
    }

    pub fn filename_property(&self) -> &str {
        self.filename.to_str().unwrap_or_default()
    }

    pub fn comment_property(&self) -> &str {
        &self.header.comment
    }

    pub fn mpp_x(&self) -> f64 {
        self.header.mpp_x()
    }

    pub fn mpp_y(&self) -> f64 {
        self.header.mpp_y()
    }

    pub fn background_rgb(&self) -> (u8, u8, u8) {
        self.header.background_rgb
    }

    /// Bounding box derived from the widest (top) level's grid.
    pub fn bounds(&self) -> Bounds {
        let top = &self.levels[0];
        Bounds {
            x: 0,
            y: 0,
            width: top.tiles_across * top.tile_w,
            height: top.tiles_down * top.tile_h,
        }
    }

    /// Install a shared cache for this slide, replacing its private one.
    pub fn set_cache(&self, cache: std::sync::Arc<crate::cache::Cache>) {
        self.binding.set(cache);
    }

    /// `paint_region(cr, x, y, level, w, h)`: divide source coordinates by
    /// the level's downsample and delegate to its grid.
    pub fn paint_region(
        &self,
        level_index: usize,
        x: i64,
        y: i64,
        w: i64,
        h: i64,
    ) -> Result<Canvas, VsfError> {
        let level = self
            .levels
            .get(level_index)
            .ok_or(crate::error::ParseError::LevelOutOfRange(level_index))?;

        if w <= 0 || h <= 0 {
            return Ok(Canvas::new(0, 0));
        }

        let grid = Grid::new(
            level.tiles_across,
            level.tiles_down,
            level.tile_w,
            level.tile_h,
            |col, row| self.read_tile(level, col, row),
        );

        let mut canvas = Canvas::new(w as u32, h as u32);
        grid.paint_region(
            &mut canvas,
            x / level.downsample,
            y / level.downsample,
            w,
            h,
        )?;
        Ok(canvas)
    }

    /// `read_tile(level, col, row)`: cache lookup, miss path resolves
    /// offsets, decodes, inserts, and returns a paintable tile.
    fn read_tile(&self, level: &Level, col: i64, row: i64) -> Result<DecodedTile, VsfError> {
        let plane = PlaneId::from_ptr(level);
        let tile_index = (row * level.tiles_across + col) as usize;

        if let Some(entry) = self.binding.get(plane, col, row) {
            trace!(col, row, layer = level.layer, "tile cache hit");
            let desc = level
                .descriptor(tile_index)
                .expect("cached tile always has a populated descriptor");
            let tile = DecodedTile {
                width: desc.width,
                height: desc.height,
                pixels: entry.data().to_vec(),
            };
            entry.release();
            return Ok(tile);
        }

        trace!(col, row, layer = level.layer, "tile cache miss");

        let extent = if self.header.major == 1 {
            locate_major1(&level.filename, self.header.minor, level.layer, tile_index as u64)?
        } else {
            locate_major2(&level.filename, tile_index as u64)?
        };

        let (width, height, pixels) = if extent.is_empty() {
            let w = level
                .tile_w
                .min(level.width - col * level.tile_w)
                .max(0) as u32;
            let h = level
                .tile_h
                .min(level.height - row * level.tile_h)
                .max(0) as u32;
            (w, h, vec![0u8; (w as usize) * (h as usize) * 4])
        } else {
            let (expected_w, expected_h) = decoder::tile_dimensions(
                self.header.format,
                &level.filename,
                extent,
                level.width,
                level.height,
                level.tile_w,
                level.tile_h,
                col,
                row,
            )?;
            let (w, h, pixels) =
                decoder::decode_tile(self.header.major, self.header.format, &level.filename, extent)?;
            if w != expected_w || h != expected_h {
                return Err(DecodeError::DimensionMismatch {
                    decoded_w: w,
                    decoded_h: h,
                    expected_w,
                    expected_h,
                }
                .into());
            }
            (w, h, pixels)
        };

        level.set_descriptor(
            tile_index,
            TileDescriptor {
                extent,
                width,
                height,
            },
        );

        let entry = self.binding.put(plane, col, row, pixels.clone());
        let tile = DecodedTile {
            width,
            height,
            pixels,
        };
        entry.release();
        Ok(tile)
    }
}
