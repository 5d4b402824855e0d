//! In-memory representation of KITTI object labels.
//!
//! Boxes are stored as XYXY in pixel space, behind a coordinate-space
//! marker so that the only way to move a box between image sizes is the
//! explicit [`BBoxXYXY::scale_offset`] mapping.
//!
//! # Example
//!
//! ```
//! use kitti_resize::ir::{BBoxXYXY, KittiObject, Pixel};
//!
//! let car = KittiObject::new("Car", BBoxXYXY::<Pixel>::from_xyxy(10.0, 20.0, 100.0, 200.0));
//! assert_eq!(car.score, None);
//! ```

mod bbox;
mod coord;
pub mod io_kitti;
mod object;
mod space;

// Re-export core types for convenient access
pub use bbox::BBoxXYXY;
pub use coord::Coord;
pub use object::{KittiObject, KITTI_FIELD_COUNT};
pub use space::Pixel;
