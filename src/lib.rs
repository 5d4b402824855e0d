//! kitti-resize: resize images together with their KITTI labels.
//!
//! A resize moves pixels, so every 2D box in the image's label file has to
//! move with them. This crate computes one [`geometry::ResizePlan`] per
//! image and applies it to both, for two policies: stretch to an exact
//! size, or letterbox into it with padding.
//!
//! # Modules
//!
//! - [`ir`]: the KITTI object record, boxes, and the label text codec
//! - [`geometry`]: resize plans and the stretch/letterbox transforms
//! - [`report`]: per-unit diagnostics written by the codec and transforms
//! - [`pipeline`]: directory batch processing on a worker pool
//! - [`error`]: error types for the batch layer

pub mod error;
pub mod geometry;
pub mod ir;
pub mod pipeline;
pub mod report;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Parser;
use image::Rgb;
use tracing_subscriber::EnvFilter;

pub use error::ResizeError;
use geometry::{Interpolation, ResizeMode, ResizeOptions};
use pipeline::BatchConfig;

/// The kitti-resize CLI application.
#[derive(Parser)]
#[command(name = "kitti-resize")]
#[command(version, about)]
struct Cli {
    /// Input images directory.
    #[arg(long = "in-img", default_value = "data/images")]
    in_img: PathBuf,

    /// Input KITTI labels directory.
    #[arg(long = "in-lbl", default_value = "data/kitti_annotations")]
    in_lbl: PathBuf,

    /// Output directory; images/ and labels/ are created inside it.
    #[arg(long, default_value = "results")]
    out: PathBuf,

    /// Target size.
    #[arg(
        long,
        num_args = 2,
        value_names = ["W", "H"],
        default_values_t = [284u32, 284u32],
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    size: Vec<u32>,

    /// Resize mode.
    #[arg(long, value_enum, default_value_t = ResizeMode::Letterbox)]
    mode: ResizeMode,

    /// Image file extension (matched case-insensitively).
    #[arg(long = "img-ext", default_value = "jpg")]
    img_ext: String,

    /// Letterbox fill colour.
    #[arg(
        long,
        num_args = 3,
        value_names = ["R", "G", "B"],
        default_values_t = [114u8, 114u8, 114u8]
    )]
    fill: Vec<u8>,

    /// Pixel interpolation.
    #[arg(long, value_enum, default_value_t = Interpolation::Bilinear)]
    filter: Interpolation,

    /// Number of worker threads (defaults to one per core).
    #[arg(long, short = 'j')]
    jobs: Option<usize>,

    /// Output format for the run summary ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,

    /// Log per-image details.
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// Run the kitti-resize CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), ResizeError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = BatchConfig {
        images_dir: cli.in_img,
        labels_dir: cli.in_lbl,
        output_dir: cli.out,
        image_extension: cli.img_ext,
        options: ResizeOptions {
            mode: cli.mode,
            width: cli.size[0],
            height: cli.size[1],
            fill: Rgb([cli.fill[0], cli.fill[1], cli.fill[2]]),
            filter: cli.filter.into(),
        },
        jobs: cli.jobs,
        show_progress: std::io::stderr().is_terminal(),
    };

    tracing::info!(
        "Using {:?} mode, target size: {}x{}",
        config.options.mode,
        config.options.width,
        config.options.height
    );

    let summary = pipeline::run_batch(&config)?;

    match cli.output.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&summary).map_err(ResizeError::SummaryJson)?;
            println!("{json}");
        }
        _ => print!("{}", summary),
    }

    if summary.is_success() {
        tracing::info!("All images processed successfully");
        Ok(())
    } else {
        Err(ResizeError::BatchFailed {
            failed: summary.failed,
            total: summary.total,
        })
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A subscriber may already be installed when embedded; keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
