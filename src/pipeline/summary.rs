//! Batch run summary.

use serde::Serialize;
use std::fmt;

use crate::geometry::ResizeMode;

/// What happened during one batch run.
#[derive(Clone, Debug, Serialize)]
pub struct BatchSummary {
    /// Resize policy used.
    pub mode: ResizeMode,
    /// Target canvas width.
    pub width: u32,
    /// Target canvas height.
    pub height: u32,
    /// Images found in the input directory.
    pub total: usize,
    /// Images whose image and label outputs were both written.
    pub processed: usize,
    /// Images that failed at any step.
    pub failed: usize,
    /// Objects written across all label files.
    pub objects_written: usize,
    /// Warnings recorded across all units (skipped lines and records).
    pub warnings: usize,
    /// Wall-clock duration of the run.
    pub elapsed_secs: f64,
    /// One entry per failed image, in input order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<UnitFailure>,
}

impl BatchSummary {
    /// Returns true if every image was processed.
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// A failed image and the reason.
#[derive(Clone, Debug, Serialize)]
pub struct UnitFailure {
    pub image: String,
    pub reason: String,
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Resized {}/{} image(s) to {}x{} ({:?}) in {:.1}s",
            self.processed, self.total, self.width, self.height, self.mode, self.elapsed_secs
        )?;
        writeln!(
            f,
            "  {} object(s) written, {} warning(s)",
            self.objects_written, self.warnings
        )?;

        if !self.failures.is_empty() {
            writeln!(f)?;
            writeln!(f, "Failures ({}):", self.failures.len())?;
            for failure in &self.failures {
                writeln!(f, "  - {}: {}", failure.image, failure.reason)?;
            }
        }

        Ok(())
    }
}
