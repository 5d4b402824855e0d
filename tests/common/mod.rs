#![allow(dead_code)]

use std::fs;
use std::path::Path;

use image::{Rgb, RgbImage};

pub const CAR_LINE: &str =
    "Car 0.00 0 -1.58 587.01 173.33 614.12 200.12 1.65 1.67 3.64 -0.65 1.71 46.70 -1.59";

/// A ground-truth KITTI row with the given class and 2D box.
pub fn kitti_line(class_name: &str, bbox: [f64; 4]) -> String {
    format!(
        "{} 0.00 1 0.250000 {:.2} {:.2} {:.2} {:.2} 1.50 1.60 3.90 2.00 1.70 30.00 -0.500000",
        class_name, bbox[0], bbox[1], bbox[2], bbox[3]
    )
}

pub fn write_image(path: &Path, width: u32, height: u32, color: [u8; 3]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    RgbImage::from_pixel(width, height, Rgb(color))
        .save(path)
        .expect("write image file");
}

pub fn write_labels(path: &Path, lines: &[String]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    let mut contents = lines.join("\n");
    contents.push('\n');
    fs::write(path, contents).expect("write label file");
}
