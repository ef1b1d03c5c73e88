//! # vsf-slide
//!
//! A concurrent, reference-counted, bounded tile cache and a VSF vendor
//! backend for pyramidal whole-slide microscopy images.
//!
//! This library provides the core primitives a whole-slide-image reader
//! needs to serve tiles from the VSF container format: a versioned binary
//! index parser, tile byte-extent resolution, multi-codec tile decoding
//! (JPEG, JPEG2000, PNG, BMP), and a bounded LRU cache for decoded tiles
//! shared across readers.
//!
//! ## Architecture
//!
//! - [`cache`] — the reference-counted, bounded LRU tile cache.
//! - [`vsf`] — the VSF format parser, tile locator, codecs, and slide façade.
//! - [`io`] — synchronous, scope-held file access and little-endian helpers.
//! - [`error`] — the shared error taxonomy.
//! - [`config`] — CLI argument parsing for the `vsf-tool` binary.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use vsf_slide::vsf::VsfSlide;
//!
//! let slide = VsfSlide::open(Path::new("sample.vsf")).expect("open slide");
//! let canvas = slide.paint_region(0, 0, 0, 256, 256).expect("paint region");
//! println!("painted {}x{} pixels", canvas.width, canvas.height);
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod io;
pub mod vsf;

pub use cache::{Cache, CacheBinding, CacheEntry, CacheKey, PlaneId, DEFAULT_CACHE_CAPACITY};
pub use config::{Cli, Command, InfoArgs, RenderArgs};
pub use error::{CacheError, DecodeError, IoError, ParseError, VsfError};
pub use vsf::{Bounds, Canvas, DecodedTile, Level, TileFormat, VsfHeader, VsfSlide};
