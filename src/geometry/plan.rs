//! Resize plans: the one place where scale and padding are computed.
//!
//! Pixels and boxes are both moved through a [`ResizePlan`], so the image
//! and its labels can never disagree about the mapping.

use thiserror::Error;

use crate::ir::{BBoxXYXY, Pixel};

/// Why a plan could not be built.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum PlanError {
    #[error("source image is {width}x{height}; both sides must be non-zero")]
    EmptySource { width: u32, height: u32 },

    #[error("target size {width}x{height} is invalid; both sides must be non-zero")]
    ZeroTarget { width: u32, height: u32 },

    #[error("letterboxed content would be {width}x{height} pixels")]
    Degenerate { width: u32, height: u32 },
}

/// Geometry of one resize: canvas size, content size, scale and padding.
///
/// The content (the resized source) occupies
/// `[pad_x, pad_x + scaled_width) x [pad_y, pad_y + scaled_height)` on a
/// canvas of `target_width x target_height`. A source pixel coordinate
/// `(x, y)` lands at `(x * scale_x + pad_x, y * scale_y + pad_y)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizePlan {
    pub target_width: u32,
    pub target_height: u32,
    pub scaled_width: u32,
    pub scaled_height: u32,
    pub scale_x: f64,
    pub scale_y: f64,
    pub pad_x: u32,
    pub pad_y: u32,
}

impl ResizePlan {
    /// Plan a stretch: each axis scaled independently to fill the target.
    pub fn stretch(
        width: u32,
        height: u32,
        new_width: u32,
        new_height: u32,
    ) -> Result<Self, PlanError> {
        check_sizes(width, height, new_width, new_height)?;

        Ok(Self {
            target_width: new_width,
            target_height: new_height,
            scaled_width: new_width,
            scaled_height: new_height,
            scale_x: f64::from(new_width) / f64::from(width),
            scale_y: f64::from(new_height) / f64::from(height),
            pad_x: 0,
            pad_y: 0,
        })
    }

    /// Plan a letterbox: one uniform scale, remainder padded.
    ///
    /// The content size is truncated toward zero, and the padding is the
    /// floor of half the leftover, so an odd leftover puts the extra pixel
    /// on the right/bottom edge.
    pub fn letterbox(
        width: u32,
        height: u32,
        new_width: u32,
        new_height: u32,
    ) -> Result<Self, PlanError> {
        check_sizes(width, height, new_width, new_height)?;

        let scale = (f64::from(new_width) / f64::from(width))
            .min(f64::from(new_height) / f64::from(height));
        // `as` truncates toward zero, matching integer conversion of the product.
        let scaled_width = (f64::from(width) * scale) as u32;
        let scaled_height = (f64::from(height) * scale) as u32;

        if scaled_width == 0 || scaled_height == 0 {
            return Err(PlanError::Degenerate {
                width: scaled_width,
                height: scaled_height,
            });
        }

        Ok(Self {
            target_width: new_width,
            target_height: new_height,
            scaled_width,
            scaled_height,
            scale_x: scale,
            scale_y: scale,
            pad_x: new_width.saturating_sub(scaled_width) / 2,
            pad_y: new_height.saturating_sub(scaled_height) / 2,
        })
    }

    /// Maps a source-space box into canvas space.
    #[inline]
    pub fn map_bbox(&self, bbox: &BBoxXYXY<Pixel>) -> BBoxXYXY<Pixel> {
        bbox.scale_offset(
            self.scale_x,
            self.scale_y,
            f64::from(self.pad_x),
            f64::from(self.pad_y),
        )
    }
}

fn check_sizes(width: u32, height: u32, new_width: u32, new_height: u32) -> Result<(), PlanError> {
    if width == 0 || height == 0 {
        return Err(PlanError::EmptySource { width, height });
    }
    if new_width == 0 || new_height == 0 {
        return Err(PlanError::ZeroTarget {
            width: new_width,
            height: new_height,
        });
    }
    Ok(())
}
