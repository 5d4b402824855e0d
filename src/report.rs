//! Structured diagnostics for codec and transform calls.
//!
//! Every core operation takes a `&mut ResizeReport` and records what it
//! skipped or could not do, instead of failing. Callers decide what to do
//! with the issues: the pipeline logs them and counts error-level issues
//! as failed units.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Diagnostics collected while processing one unit of work.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ResizeReport {
    /// All issues in the order they were recorded.
    pub issues: Vec<ResizeIssue>,
}

impl ResizeReport {
    /// Creates a new empty report.
    pub fn new() -> Self {
        Self { issues: Vec::new() }
    }

    /// Adds an issue to the report.
    pub fn add(&mut self, issue: ResizeIssue) {
        self.issues.push(issue);
    }

    /// Records a warning.
    pub fn warn(&mut self, code: IssueCode, message: impl Into<String>, context: IssueContext) {
        self.add(ResizeIssue::warning(code, message, context));
    }

    /// Records an error.
    pub fn error(&mut self, code: IssueCode, message: impl Into<String>, context: IssueContext) {
        self.add(ResizeIssue::error(code, message, context));
    }

    /// Returns the number of errors in the report.
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    /// Returns the number of warnings in the report.
    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    /// Returns how many issues carry the given code.
    pub fn count(&self, code: IssueCode) -> usize {
        self.issues.iter().filter(|i| i.code == code).count()
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.error_count() == 0
    }

    /// Returns true if there are no issues at all.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

impl fmt::Display for ResizeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return writeln!(f, "No issues");
        }

        writeln!(
            f,
            "{} error(s) and {} warning(s):",
            self.error_count(),
            self.warning_count()
        )?;

        for issue in &self.issues {
            writeln!(f, "  {}", issue)?;
        }

        Ok(())
    }
}

/// A single recorded issue.
#[derive(Clone, Debug, Serialize)]
pub struct ResizeIssue {
    /// The severity of the issue.
    pub severity: Severity,

    /// A stable code for the issue type.
    pub code: IssueCode,

    /// A human-readable description of the issue.
    pub message: String,

    /// Where the issue occurred.
    pub context: IssueContext,
}

impl ResizeIssue {
    /// Creates a new issue.
    pub fn new(
        severity: Severity,
        code: IssueCode,
        message: impl Into<String>,
        context: IssueContext,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            context,
        }
    }

    /// Creates a new error.
    pub fn error(code: IssueCode, message: impl Into<String>, context: IssueContext) -> Self {
        Self::new(Severity::Error, code, message, context)
    }

    /// Creates a new warning.
    pub fn warning(code: IssueCode, message: impl Into<String>, context: IssueContext) -> Self {
        Self::new(Severity::Warning, code, message, context)
    }
}

impl fmt::Display for ResizeIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN ",
        };
        write!(
            f,
            "[{}] {:?} in {}: {}",
            severity, self.code, self.context, self.message
        )
    }
}

/// The severity of an issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Something was skipped; the rest of the unit is still usable.
    Warning,
    /// The unit's result is a fallback (empty, unchanged, or not written).
    Error,
}

/// A stable code identifying the type of issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum IssueCode {
    // Per-line (reading)
    /// A label line has fewer than 15 fields.
    TooFewFields,
    /// A label field could not be parsed as its numeric type.
    InvalidNumber,

    // Per-record (writing, transforming)
    /// A record lacks a required field (the 2D box).
    MissingField,
    /// A class name is empty or contains whitespace.
    InvalidClassName,

    // Per-batch
    /// Box scale factors were not strictly positive.
    InvalidScale,

    // Per-unit
    /// An existing label file could not be read.
    ReadFailed,
    /// A label file could not be written.
    WriteFailed,
    /// The input image has no pixels.
    EmptyImage,
    /// The resize could not be planned or performed.
    ResizeFailed,
}

/// Where an issue occurred.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum IssueContext {
    /// A 1-based line of a label file.
    Line { line: usize },
    /// A 0-based position in a record list.
    Object { index: usize },
    /// A record list as a whole.
    Batch,
    /// A file on disk.
    File { path: PathBuf },
    /// The image being transformed.
    Image,
}

impl fmt::Display for IssueContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueContext::Line { line } => write!(f, "line {}", line),
            IssueContext::Object { index } => write!(f, "object {}", index),
            IssueContext::Batch => write!(f, "batch"),
            IssueContext::File { path } => write!(f, "{}", path.display()),
            IssueContext::Image => write!(f, "image"),
        }
    }
}
