//! KITTI object label reader and writer.
//!
//! A KITTI label file holds one object per line, as 15 space-separated
//! fields, optionally followed by a 16th detection score:
//!
//! ```text
//! type truncated occluded alpha x1 y1 x2 y2 h w l x y z rotation_y [score]
//! ```
//!
//! Reading is lenient: a malformed line is skipped and reported, never the
//! whole file. Writing is lenient per record: an unwritable record is
//! skipped and reported, and only a failure to write the destination file
//! makes the call fail.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use super::object::{KittiObject, KITTI_FIELD_COUNT};
use super::BBoxXYXY;
use crate::report::{IssueCode, IssueContext, ResizeReport};

/// Read a KITTI label file.
///
/// A missing file is an image without labels and yields an empty list. An
/// existing file that cannot be read (permissions, invalid UTF-8) also
/// yields an empty list, with a `ReadFailed` error in `report`.
pub fn read_kitti_labels(path: &Path, report: &mut ResizeReport) -> Vec<KittiObject> {
    match fs::read_to_string(path) {
        Ok(content) => from_kitti_str(&content, report),
        Err(source) if source.kind() == ErrorKind::NotFound => Vec::new(),
        Err(source) => {
            report.error(
                IssueCode::ReadFailed,
                format!("failed to read label file: {source}"),
                IssueContext::File {
                    path: path.to_path_buf(),
                },
            );
            Vec::new()
        }
    }
}

/// Parse KITTI label text into objects, in line order.
///
/// Lines end in `\n`, `\r\n` or a bare `\r`. Blank lines are ignored.
/// Lines with too few fields or a field of the wrong numeric type are
/// skipped with a warning in `report`.
pub fn from_kitti_str(text: &str, report: &mut ResizeReport) -> Vec<KittiObject> {
    let mut objects = Vec::new();

    for (line_idx, line) in label_lines(text).enumerate() {
        let line_num = line_idx + 1;
        match parse_label_line(line) {
            Ok(Some(object)) => objects.push(object),
            Ok(None) => {}
            Err(skip) => report.warn(skip.code, skip.message, IssueContext::Line { line: line_num }),
        }
    }

    objects
}

fn label_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .flat_map(|line| line.strip_suffix('\r').unwrap_or(line).split('\r'))
}

/// Write objects to a KITTI label file, creating parent directories.
///
/// Returns `false` only when the destination cannot be written; the cause
/// is recorded as a `WriteFailed` error. Records skipped by
/// [`to_kitti_string`] do not affect the result.
pub fn write_kitti_labels(path: &Path, objects: &[KittiObject], report: &mut ResizeReport) -> bool {
    let contents = to_kitti_string(objects, report);

    let written = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
    .and_then(|()| fs::write(path, contents));

    match written {
        Ok(()) => true,
        Err(source) => {
            report.error(
                IssueCode::WriteFailed,
                format!("failed to write label file: {source}"),
                IssueContext::File {
                    path: path.to_path_buf(),
                },
            );
            false
        }
    }
}

/// Render objects as KITTI label text.
///
/// Each written record ends with a newline. A record with an invalid class
/// name or no 2D box is skipped with a warning in `report`.
pub fn to_kitti_string(objects: &[KittiObject], report: &mut ResizeReport) -> String {
    let mut out = String::new();

    for (index, object) in objects.iter().enumerate() {
        let Some(bbox) = check_writable(object, index, report) else {
            continue;
        };

        let [x1, y1, x2, y2] = bbox.to_array();
        let [h, w, l] = object.dimensions;
        let [x, y, z] = object.location;

        let mut fields = vec![
            object.class_name.clone(),
            fixed(object.truncation, 2),
            object.occlusion.to_string(),
            fixed(object.alpha, 6),
        ];
        fields.extend([x1, y1, x2, y2, h, w, l, x, y, z].map(|value| fixed(value, 2)));
        fields.push(fixed(object.rotation_y, 6));
        if let Some(score) = object.score {
            fields.push(fixed(score, 4));
        }

        out.push_str(&fields.join(" "));
        out.push('\n');
    }

    out
}

/// Fixed-point text for a label field. NaN is written as `nan`.
fn fixed(value: f64, precision: usize) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else {
        format!("{value:.precision$}")
    }
}

fn check_writable(
    object: &KittiObject,
    index: usize,
    report: &mut ResizeReport,
) -> Option<BBoxXYXY<super::Pixel>> {
    if object.class_name.is_empty() || object.class_name.chars().any(char::is_whitespace) {
        report.warn(
            IssueCode::InvalidClassName,
            format!(
                "class name '{}' must be a single non-empty token; skipping",
                object.class_name
            ),
            IssueContext::Object { index },
        );
        return None;
    }

    if object.bbox.is_none() {
        report.warn(
            IssueCode::MissingField,
            "missing bounding box; skipping",
            IssueContext::Object { index },
        );
    }

    object.bbox
}

/// Why a single label line was skipped.
#[derive(Debug, PartialEq)]
struct LineSkip {
    code: IssueCode,
    message: String,
}

fn parse_label_line(line: &str) -> Result<Option<KittiObject>, LineSkip> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    // Anything past the score column is ignored, so stop collecting there.
    let tokens: Vec<&str> = trimmed
        .split_whitespace()
        .take(KITTI_FIELD_COUNT + 1)
        .collect();

    if tokens.len() < KITTI_FIELD_COUNT {
        return Err(LineSkip {
            code: IssueCode::TooFewFields,
            message: format!(
                "expected at least {} fields, found {}",
                KITTI_FIELD_COUNT,
                tokens.len()
            ),
        });
    }

    let occlusion = tokens[2].parse::<i32>().map_err(|_| LineSkip {
        code: IssueCode::InvalidNumber,
        message: format!("invalid occlusion '{}'; expected integer", tokens[2]),
    })?;

    let score = match tokens.get(KITTI_FIELD_COUNT) {
        Some(raw) => Some(parse_f64_token(raw, "score")?),
        None => None,
    };

    Ok(Some(KittiObject {
        class_name: tokens[0].to_string(),
        truncation: parse_f64_token(tokens[1], "truncation")?,
        occlusion,
        alpha: parse_f64_token(tokens[3], "alpha")?,
        bbox: Some(BBoxXYXY::from_xyxy(
            parse_f64_token(tokens[4], "bbox x1")?,
            parse_f64_token(tokens[5], "bbox y1")?,
            parse_f64_token(tokens[6], "bbox x2")?,
            parse_f64_token(tokens[7], "bbox y2")?,
        )),
        dimensions: [
            parse_f64_token(tokens[8], "height")?,
            parse_f64_token(tokens[9], "width")?,
            parse_f64_token(tokens[10], "length")?,
        ],
        location: [
            parse_f64_token(tokens[11], "location x")?,
            parse_f64_token(tokens[12], "location y")?,
            parse_f64_token(tokens[13], "location z")?,
        ],
        rotation_y: parse_f64_token(tokens[14], "rotation_y")?,
        score,
    }))
}

/// Fuzz-only entrypoint for KITTI single-line parsing.
#[cfg(feature = "fuzzing")]
pub fn fuzz_parse_label_line(input: &str) -> Option<KittiObject> {
    parse_label_line(input).ok().flatten()
}

fn parse_f64_token(raw: &str, field_name: &str) -> Result<f64, LineSkip> {
    raw.parse::<f64>().map_err(|_| LineSkip {
        code: IssueCode::InvalidNumber,
        message: format!("invalid {field_name} '{raw}'; expected floating-point number"),
    })
}
