//! Image + label geometry transforms.
//!
//! Two policies move an image to a target size:
//!
//! - **Stretch** resizes to exactly the target, scaling each axis on its own.
//! - **Letterbox** scales uniformly to fit, then pads the rest of the canvas
//!   with a fill colour.
//!
//! Each call computes one [`ResizePlan`] and hands it to both the pixel
//! resampler and the box mapping, so labels always follow the pixels.
//! Calls never fail: problems are recorded in the [`ResizeReport`] and the
//! inputs are handed back unchanged.

mod canvas;
mod plan;

pub use canvas::{Interpolation, DEFAULT_FILL};
pub use plan::{PlanError, ResizePlan};

use image::imageops::FilterType;
use image::{DynamicImage, Rgb};
use serde::Serialize;

use crate::ir::KittiObject;
use crate::report::{IssueCode, IssueContext, ResizeReport};

/// Which resize policy to apply.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeMode {
    Stretch,
    #[default]
    Letterbox,
}

impl ResizeMode {
    /// Plans this policy for a `width x height` source.
    pub fn plan(
        self,
        width: u32,
        height: u32,
        new_width: u32,
        new_height: u32,
    ) -> Result<ResizePlan, PlanError> {
        match self {
            ResizeMode::Stretch => ResizePlan::stretch(width, height, new_width, new_height),
            ResizeMode::Letterbox => ResizePlan::letterbox(width, height, new_width, new_height),
        }
    }
}

/// A fully configured resize: policy, target size, fill and filter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizeOptions {
    pub mode: ResizeMode,
    pub width: u32,
    pub height: u32,
    pub fill: Rgb<u8>,
    pub filter: FilterType,
}

impl ResizeOptions {
    /// Options for `mode` at `width x height` with the default fill and
    /// bilinear filtering.
    pub fn new(mode: ResizeMode, width: u32, height: u32) -> Self {
        Self {
            mode,
            width,
            height,
            fill: DEFAULT_FILL,
            filter: Interpolation::default().into(),
        }
    }

    /// Applies the configured policy to one image and its labels.
    pub fn apply(
        &self,
        image: DynamicImage,
        objects: Vec<KittiObject>,
        report: &mut ResizeReport,
    ) -> (DynamicImage, Vec<KittiObject>) {
        match self.mode {
            ResizeMode::Stretch => {
                apply_stretch(image, objects, self.width, self.height, self.filter, report)
            }
            ResizeMode::Letterbox => apply_letterbox(
                image,
                objects,
                self.width,
                self.height,
                self.fill,
                self.filter,
                report,
            ),
        }
    }
}

/// Map every object's 2D box by `scale` then `offset`.
///
/// Unless both scales are strictly positive, the list is returned untouched
/// with an `InvalidScale` warning. Objects without a 2D box are dropped
/// from the result with a `MissingField` warning; all other fields are
/// copied verbatim.
pub fn scale_objects(
    objects: Vec<KittiObject>,
    scale_x: f64,
    scale_y: f64,
    offset_x: f64,
    offset_y: f64,
    report: &mut ResizeReport,
) -> Vec<KittiObject> {
    if !(scale_x > 0.0 && scale_y > 0.0) {
        report.warn(
            IssueCode::InvalidScale,
            format!("invalid scale factors: x={scale_x}, y={scale_y}"),
            IssueContext::Batch,
        );
        return objects;
    }

    let mut scaled = Vec::with_capacity(objects.len());
    for (index, object) in objects.into_iter().enumerate() {
        let Some(bbox) = object.bbox else {
            report.warn(
                IssueCode::MissingField,
                "missing bounding box; dropping object",
                IssueContext::Object { index },
            );
            continue;
        };

        scaled.push(object.with_bbox(bbox.scale_offset(scale_x, scale_y, offset_x, offset_y)));
    }
    scaled
}

/// Stretch an image to exactly `new_width x new_height` and move its labels.
///
/// On an empty image or an impossible target the inputs come back
/// unchanged, with an error in `report`.
pub fn apply_stretch(
    image: DynamicImage,
    objects: Vec<KittiObject>,
    new_width: u32,
    new_height: u32,
    filter: FilterType,
    report: &mut ResizeReport,
) -> (DynamicImage, Vec<KittiObject>) {
    let Some(plan) = plan_or_report(
        ResizeMode::Stretch,
        &image,
        new_width,
        new_height,
        report,
    ) else {
        return (image, objects);
    };

    let resized = canvas::resize_content(&image, &plan, filter);
    let objects = scale_objects(objects, plan.scale_x, plan.scale_y, 0.0, 0.0, report);
    (resized, objects)
}

/// Letterbox an image into `new_width x new_height` and move its labels.
///
/// The content keeps its aspect ratio and is placed at `(pad_x, pad_y)`;
/// the rest of the canvas is `fill`. On an empty image or an impossible
/// target the inputs come back unchanged, with an error in `report`.
pub fn apply_letterbox(
    image: DynamicImage,
    objects: Vec<KittiObject>,
    new_width: u32,
    new_height: u32,
    fill: Rgb<u8>,
    filter: FilterType,
    report: &mut ResizeReport,
) -> (DynamicImage, Vec<KittiObject>) {
    let Some(plan) = plan_or_report(
        ResizeMode::Letterbox,
        &image,
        new_width,
        new_height,
        report,
    ) else {
        return (image, objects);
    };

    let canvas = canvas::letterbox_content(&image, &plan, fill, filter);
    let objects = scale_objects(
        objects,
        plan.scale_x,
        plan.scale_y,
        f64::from(plan.pad_x),
        f64::from(plan.pad_y),
        report,
    );
    (canvas, objects)
}

fn plan_or_report(
    mode: ResizeMode,
    image: &DynamicImage,
    new_width: u32,
    new_height: u32,
    report: &mut ResizeReport,
) -> Option<ResizePlan> {
    match mode.plan(image.width(), image.height(), new_width, new_height) {
        Ok(plan) => Some(plan),
        Err(err @ PlanError::EmptySource { .. }) => {
            report.error(IssueCode::EmptyImage, err.to_string(), IssueContext::Image);
            None
        }
        Err(err) => {
            report.error(
                IssueCode::ResizeFailed,
                format!("{mode:?} resize failed: {err}"),
                IssueContext::Image,
            );
            None
        }
    }
}
