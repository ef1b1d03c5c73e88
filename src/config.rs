//! Configuration for the `vsf-tool` binary.
//!
//! Two subcommands:
//!
//! - `info <path>` — print the parsed header and per-level geometry.
//! - `render <path>` — decode a region of a level and write it to a PNG.
//!
//! # Environment Variables
//!
//! - `VSF_CACHE_BYTES` - tile cache capacity in bytes (default: 32 MiB)
//! - `VSF_LOG` - `tracing-subscriber` env-filter directive (default: `info`)

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::cache::DEFAULT_CACHE_CAPACITY;

/// `vsf-tool` - inspect and render tiles from VSF whole-slide images.
#[derive(Parser, Debug, Clone)]
#[command(name = "vsf-tool")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Tile cache capacity in bytes, shared across every slide this
    /// invocation opens.
    #[arg(long, default_value_t = DEFAULT_CACHE_CAPACITY, env = "VSF_CACHE_BYTES", global = true)]
    pub cache_bytes: u64,

    /// Enable verbose (debug level) logging.
    #[arg(short, long, default_value_t = false, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the parsed header and level geometry for a `.vsf` file.
    Info(InfoArgs),
    /// Decode a region of a level and write it to a PNG.
    Render(RenderArgs),
}

#[derive(Args, Debug, Clone)]
pub struct InfoArgs {
    /// Path to the `.vsf` index file.
    pub path: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    /// Path to the `.vsf` index file.
    pub path: PathBuf,

    /// Pyramid level to render from, 0 is the widest.
    #[arg(short, long, default_value_t = 0)]
    pub level: usize,

    /// X origin within the level, in level-local pixels.
    #[arg(short, long, default_value_t = 0)]
    pub x: i64,

    /// Y origin within the level, in level-local pixels.
    #[arg(short, long, default_value_t = 0)]
    pub y: i64,

    /// Region width in pixels.
    #[arg(short, long, default_value_t = 512)]
    pub width: i64,

    /// Region height in pixels.
    #[arg(long, default_value_t = 512)]
    pub height: i64,

    /// Output PNG path.
    #[arg(short, long, default_value = "out.png")]
    pub out: PathBuf,
}
