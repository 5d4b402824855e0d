//! The KITTI object record.

use super::bbox::BBoxXYXY;
use super::space::Pixel;

/// Number of whitespace-separated fields in a ground-truth KITTI row.
pub const KITTI_FIELD_COUNT: usize = 15;

/// One annotated (or detected) object in a KITTI label file.
///
/// Fields follow the KITTI object development kit column order. Array
/// lengths are fixed by type; the only optional parts are the 2D box and
/// the detection score.
#[derive(Clone, Debug, PartialEq)]
pub struct KittiObject {
    /// Object type, e.g. `Car` or `Pedestrian`. A single token.
    pub class_name: String,

    /// Fraction of the object leaving the image bounds, nominally 0..=1.
    pub truncation: f64,

    /// Occlusion state code.
    pub occlusion: i32,

    /// Observation angle in radians.
    pub alpha: f64,

    /// 2D box in image pixels.
    ///
    /// Always present on records read from text. `None` marks a record
    /// that was built without a 2D box (3D-only objects); such records are
    /// dropped by box transforms and skipped by the writer.
    pub bbox: Option<BBoxXYXY<Pixel>>,

    /// 3D object dimensions: height, width, length (metres).
    pub dimensions: [f64; 3],

    /// 3D location x, y, z in camera coordinates (metres).
    pub location: [f64; 3],

    /// Rotation around the camera Y axis in radians.
    pub rotation_y: f64,

    /// Detection confidence. `None` for ground truth.
    pub score: Option<f64>,
}

impl KittiObject {
    /// Creates a ground-truth object with a 2D box and zeroed 3D fields.
    pub fn new(class_name: impl Into<String>, bbox: BBoxXYXY<Pixel>) -> Self {
        Self {
            class_name: class_name.into(),
            truncation: 0.0,
            occlusion: 0,
            alpha: 0.0,
            bbox: Some(bbox),
            dimensions: [0.0; 3],
            location: [0.0; 3],
            rotation_y: 0.0,
            score: None,
        }
    }

    /// Returns a copy of this object carrying a detection score.
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    /// Returns this object with its 2D box replaced.
    ///
    /// Every other field is carried over verbatim.
    pub fn with_bbox(mut self, bbox: BBoxXYXY<Pixel>) -> Self {
        self.bbox = Some(bbox);
        self
    }
}
