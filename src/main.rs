//! `vsf-tool` - inspect and render tiles from VSF whole-slide images.

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vsf_slide::cache::Cache;
use vsf_slide::config::{Cli, Command, InfoArgs, RenderArgs};
use vsf_slide::vsf::VsfSlide;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match &cli.command {
        Command::Info(args) => run_info(args),
        Command::Render(args) => run_render(args, cli.cache_bytes),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_env("VSF_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn run_info(args: &InfoArgs) -> Result<(), vsf_slide::VsfError> {
    let slide = VsfSlide::open(&args.path)?;

    println!("file:      {}", slide.filename_property());
    println!("comment:   {}", slide.comment_property());
    println!("mpp-x:     {}", slide.mpp_x());
    println!("mpp-y:     {}", slide.mpp_y());
    println!("levels:    {}", slide.level_count());

    for i in 0..slide.level_count() {
        let level = slide.level(i).expect("index within level_count");
        println!(
            "  level {i}: {}x{} px, {} x {} tiles ({}x{} each), layer {}, downsample {}",
            level.width,
            level.height,
            level.tiles_across,
            level.tiles_down,
            level.tile_w,
            level.tile_h,
            level.layer,
            level.downsample,
        );
    }

    Ok(())
}

fn run_render(args: &RenderArgs, cache_bytes: u64) -> Result<(), vsf_slide::VsfError> {
    let slide = VsfSlide::open(&args.path)?;
    slide.set_cache(Cache::create(cache_bytes));

    info!(
        level = args.level,
        x = args.x,
        y = args.y,
        w = args.width,
        h = args.height,
        "rendering region"
    );

    let canvas = slide.paint_region(args.level, args.x, args.y, args.width, args.height)?;

    let buffer = image::RgbaImage::from_raw(canvas.width, canvas.height, canvas.pixels)
        .expect("canvas buffer matches its declared dimensions");
    buffer
        .save(&args.out)
        .map_err(|e| vsf_slide::DecodeError::CodecRejected {
            codec: "png",
            message: e.to_string(),
        })?;

    println!("wrote {}", args.out.display());
    Ok(())
}
