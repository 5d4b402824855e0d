//! Bounding box types in canonical XYXY format.

use super::coord::Coord;

/// An axis-aligned bounding box in XYXY format (x1, y1, x2, y2).
///
/// The constructor does NOT enforce that min < max. KITTI files in the wild
/// carry degenerate boxes, and a resize must carry them through exactly as
/// it carries well-formed ones.
#[derive(Clone, Copy, PartialEq)]
pub struct BBoxXYXY<TSpace> {
    pub min: Coord<TSpace>,
    pub max: Coord<TSpace>,
}

impl<TSpace> BBoxXYXY<TSpace> {
    /// Creates a new bounding box from explicit coordinates.
    #[inline]
    pub fn from_xyxy(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            min: Coord::new(xmin, ymin),
            max: Coord::new(xmax, ymax),
        }
    }

    /// Returns the box as `[x1, y1, x2, y2]`.
    #[inline]
    pub fn to_array(&self) -> [f64; 4] {
        [self.min.x, self.min.y, self.max.x, self.max.y]
    }

    /// Maps both corners by a per-axis scale followed by an offset.
    ///
    /// `[x1*sx+ox, y1*sy+oy, x2*sx+ox, y2*sy+oy]`. This is the single box
    /// mapping shared by every resize policy.
    #[inline]
    pub fn scale_offset(&self, scale_x: f64, scale_y: f64, offset_x: f64, offset_y: f64) -> Self {
        Self {
            min: self.min.scale_offset(scale_x, scale_y, offset_x, offset_y),
            max: self.max.scale_offset(scale_x, scale_y, offset_x, offset_y),
        }
    }
}

impl<TSpace> std::fmt::Debug for BBoxXYXY<TSpace> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BBoxXYXY")
            .field("xmin", &self.min.x)
            .field("ymin", &self.min.y)
            .field("xmax", &self.max.x)
            .field("ymax", &self.max.y)
            .finish()
    }
}

impl<TSpace> Default for BBoxXYXY<TSpace> {
    fn default() -> Self {
        Self::from_xyxy(0.0, 0.0, 0.0, 0.0)
    }
}

impl<TSpace> From<[f64; 4]> for BBoxXYXY<TSpace> {
    fn from(value: [f64; 4]) -> Self {
        Self::from_xyxy(value[0], value[1], value[2], value[3])
    }
}
