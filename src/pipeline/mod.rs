//! Batch resizing of an image directory and its label directory.
//!
//! Every image `<stem>.<ext>` in the images directory is paired with
//! `<stem>.txt` in the labels directory (a missing label file means no
//! objects). Each pair is an independent unit: it is decoded, transformed
//! and written to `<out>/images/` and `<out>/labels/` on a rayon worker,
//! and its outcome is folded into a [`BatchSummary`].

mod summary;

pub use summary::{BatchSummary, UnitFailure};

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::error::ResizeError;
use crate::geometry::ResizeOptions;
use crate::ir::io_kitti::{read_kitti_labels, write_kitti_labels};
use crate::report::{ResizeReport, Severity};

const LABEL_EXTENSION: &str = "txt";

/// Inputs, outputs and transform settings for one batch run.
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Directory holding the input images.
    pub images_dir: PathBuf,
    /// Directory holding the input KITTI label files.
    pub labels_dir: PathBuf,
    /// Output root; `images/` and `labels/` are created below it.
    pub output_dir: PathBuf,
    /// Image extension to pick up, matched case-insensitively.
    pub image_extension: String,
    /// The transform applied to every unit.
    pub options: ResizeOptions,
    /// Worker count. `None` uses the global rayon pool.
    pub jobs: Option<usize>,
    /// Draw a progress bar on stderr.
    pub show_progress: bool,
}

impl BatchConfig {
    pub fn output_images_dir(&self) -> PathBuf {
        self.output_dir.join("images")
    }

    pub fn output_labels_dir(&self) -> PathBuf {
        self.output_dir.join("labels")
    }
}

/// A successfully written unit.
#[derive(Debug)]
pub struct UnitOutput {
    /// Objects written to the output label file.
    pub objects_written: usize,
    /// Warnings raised while reading, transforming and writing.
    pub report: ResizeReport,
}

/// Resize every image in `config.images_dir` with its labels.
///
/// Fails up front when an input directory is missing, no image matches the
/// extension, or the output directories cannot be created. Per-image
/// failures are counted in the summary; the caller decides whether they
/// make the run fail.
pub fn run_batch(config: &BatchConfig) -> Result<BatchSummary, ResizeError> {
    check_input_dir("Images", &config.images_dir)?;
    check_input_dir("Labels", &config.labels_dir)?;

    let images = discover_images(&config.images_dir, &config.image_extension)?;
    if images.is_empty() {
        return Err(ResizeError::NoImagesFound {
            path: config.images_dir.clone(),
            extension: config.image_extension.clone(),
        });
    }
    tracing::info!("Found {} image(s) to process", images.len());

    fs::create_dir_all(config.output_images_dir())?;
    fs::create_dir_all(config.output_labels_dir())?;
    tracing::info!("Writing results under {}", config.output_dir.display());

    let progress = progress_bar(images.len(), config.show_progress);
    let start = Instant::now();

    let run = || -> Vec<Result<UnitOutput, ResizeError>> {
        images
            .par_iter()
            .map(|image_path| {
                let outcome = process_unit(image_path, config);
                progress.inc(1);
                outcome
            })
            .collect()
    };

    let outcomes = match config.jobs {
        Some(jobs) if jobs > 0 => rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()?
            .install(run),
        _ => run(),
    };
    progress.finish_and_clear();

    let mut summary = BatchSummary {
        mode: config.options.mode,
        width: config.options.width,
        height: config.options.height,
        total: images.len(),
        processed: 0,
        failed: 0,
        objects_written: 0,
        warnings: 0,
        elapsed_secs: 0.0,
        failures: Vec::new(),
    };

    for (image_path, outcome) in images.iter().zip(outcomes) {
        let name = display_name(image_path);
        match outcome {
            Ok(unit) => {
                log_issues(&name, &unit.report);
                summary.processed += 1;
                summary.objects_written += unit.objects_written;
                summary.warnings += unit.report.warning_count();
                tracing::debug!("Processed {name}: {} object(s)", unit.objects_written);
            }
            Err(err) => {
                tracing::warn!("{name}: {err}");
                summary.failed += 1;
                summary.failures.push(UnitFailure {
                    image: name,
                    reason: err.to_string(),
                });
            }
        }
    }

    summary.elapsed_secs = start.elapsed().as_secs_f64();
    Ok(summary)
}

/// Resize one image and its label file into the output directories.
///
/// Nothing is written for a unit whose labels cannot be read or whose
/// transform fails. If the label file cannot be written, the image already
/// saved for the unit is removed again, so a failed unit never leaves a
/// half-written pair.
pub fn process_unit(image_path: &Path, config: &BatchConfig) -> Result<UnitOutput, ResizeError> {
    let mut report = ResizeReport::new();

    let image = image::open(image_path).map_err(|source| ResizeError::ImageDecode {
        path: image_path.to_path_buf(),
        source,
    })?;

    let label_name = label_file_name(image_path);
    let label_path = config.labels_dir.join(&label_name);
    let objects = read_kitti_labels(&label_path, &mut report);
    if !report.is_ok() {
        log_issues(&display_name(image_path), &report);
        return Err(ResizeError::LabelRead { path: label_path });
    }
    tracing::debug!(
        "Loaded {} object(s) from {}",
        objects.len(),
        label_path.display()
    );

    let (image, objects) = config.options.apply(image, objects, &mut report);
    if let Some(issue) = report
        .issues
        .iter()
        .find(|issue| issue.severity == Severity::Error)
    {
        return Err(ResizeError::Transform {
            path: image_path.to_path_buf(),
            message: issue.message.clone(),
        });
    }

    let file_name = image_path.file_name().unwrap_or_default();
    let out_image = config.output_images_dir().join(file_name);
    image
        .save(&out_image)
        .map_err(|source| ResizeError::ImageEncode {
            path: out_image.clone(),
            source,
        })?;

    let out_labels = config.output_labels_dir().join(&label_name);
    let warnings_before = report.warning_count();
    if !write_kitti_labels(&out_labels, &objects, &mut report) {
        log_issues(&display_name(image_path), &report);
        if let Err(err) = fs::remove_file(&out_image) {
            tracing::warn!("could not remove {}: {err}", out_image.display());
        }
        return Err(ResizeError::LabelWrite { path: out_labels });
    }
    let skipped = report.warning_count() - warnings_before;

    Ok(UnitOutput {
        objects_written: objects.len() - skipped,
        report,
    })
}

/// List files in `dir` (not recursive) whose extension matches, sorted.
pub fn discover_images(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, ResizeError> {
    let extension = extension.trim_start_matches('.');
    let mut images = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
        let entry = entry.map_err(|source| ResizeError::Traversal {
            path: dir.to_path_buf(),
            message: source.to_string(),
        })?;

        let matches = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
        if entry.file_type().is_file() && matches {
            images.push(entry.into_path());
        }
    }

    images.sort();
    Ok(images)
}

/// `<stem>.txt` for an image path. Dots inside the stem are kept.
fn label_file_name(image_path: &Path) -> OsString {
    let mut name = image_path.file_stem().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(LABEL_EXTENSION);
    name
}

fn check_input_dir(kind: &'static str, path: &Path) -> Result<(), ResizeError> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(ResizeError::InputDirMissing {
            kind,
            path: path.to_path_buf(),
        })
    }
}

fn progress_bar(len: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new(len as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)")
            .expect("template is compile-time constant")
            .progress_chars("█▓▒░  "),
    );
    bar
}

fn log_issues(name: &str, report: &ResizeReport) {
    for issue in &report.issues {
        match issue.severity {
            Severity::Warning => tracing::warn!("{name}: {issue}"),
            Severity::Error => tracing::error!("{name}: {issue}"),
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
