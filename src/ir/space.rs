//! Coordinate space marker types.
//!
//! Zero-sized types used as type parameters so that coordinates from
//! different spaces cannot be mixed at compile time.

use std::fmt;

/// Marker type for pixel coordinates (absolute values).
///
/// KITTI boxes are stored in pixel space, where (0, 0) is the top-left
/// corner of the image. A resize produces boxes in the pixel space of the
/// output canvas.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pixel {}

impl fmt::Debug for Pixel {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {} // This is unreachable since Pixel has no variants
    }
}
