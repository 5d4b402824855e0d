use std::path::PathBuf;
use thiserror::Error;

/// The main error type for kitti-resize operations.
///
/// The codec and transform functions never return these; they record
/// per-line and per-record problems in a
/// [`ResizeReport`](crate::report::ResizeReport). This type covers the
/// batch layer: missing inputs, undecodable images, unwritable outputs.
#[derive(Debug, Error)]
pub enum ResizeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{kind} directory not found: {path}")]
    InputDirMissing { kind: &'static str, path: PathBuf },

    #[error("No images with extension .{extension} found in {path}")]
    NoImagesFound { path: PathBuf, extension: String },

    #[error("Failed while traversing {path}: {message}")]
    Traversal { path: PathBuf, message: String },

    #[error("Failed to decode image {path}: {source}")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to encode image {path}: {source}")]
    ImageEncode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to read labels {path}")]
    LabelRead { path: PathBuf },

    #[error("Failed to transform {path}: {message}")]
    Transform { path: PathBuf, message: String },

    #[error("Failed to write labels {path}")]
    LabelWrite { path: PathBuf },

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Failed to render summary as JSON: {0}")]
    SummaryJson(#[source] serde_json::Error),

    #[error("{failed} of {total} image(s) failed")]
    BatchFailed { failed: usize, total: usize },
}
