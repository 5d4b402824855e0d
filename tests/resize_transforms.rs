//! End-to-end checks of the stretch and letterbox transforms on real pixels.

use image::imageops::FilterType;
use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
use kitti_resize::geometry::{
    apply_letterbox, apply_stretch, scale_objects, ResizeMode, ResizeOptions, DEFAULT_FILL,
};
use kitti_resize::ir::io_kitti::from_kitti_str;
use kitti_resize::report::{IssueCode, ResizeReport};

mod common;
use common::kitti_line;

fn boxes(objects: &[kitti_resize::ir::KittiObject]) -> Vec<[f64; 4]> {
    objects
        .iter()
        .map(|o| o.bbox.expect("bbox").to_array())
        .collect()
}

#[test]
fn letterbox_wide_image_into_square() {
    let mut report = ResizeReport::new();
    let objects = from_kitti_str(&kitti_line("Car", [10.0, 10.0, 20.0, 20.0]), &mut report);
    let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(100, 50, Rgb([0, 200, 0])));

    let (canvas, out) = apply_letterbox(
        image,
        objects,
        200,
        200,
        DEFAULT_FILL,
        FilterType::Triangle,
        &mut report,
    );

    assert_eq!(boxes(&out), vec![[20.0, 70.0, 40.0, 90.0]]);
    let canvas = canvas.to_rgb8();
    assert_eq!(*canvas.get_pixel(30, 49), DEFAULT_FILL);
    assert_eq!(*canvas.get_pixel(30, 80), Rgb([0, 200, 0]));
    assert_eq!(*canvas.get_pixel(30, 150), DEFAULT_FILL);
    assert!(report.is_clean());
}

#[test]
fn stretch_changes_aspect_ratio() {
    let mut report = ResizeReport::new();
    let objects = from_kitti_str(&kitti_line("Van", [10.0, 10.0, 20.0, 20.0]), &mut report);
    let image = DynamicImage::ImageRgb8(RgbImage::new(100, 50));

    let (resized, out) = apply_stretch(image, objects, 50, 100, FilterType::Triangle, &mut report);

    assert_eq!((resized.width(), resized.height()), (50, 100));
    assert_eq!(boxes(&out), vec![[5.0, 20.0, 10.0, 40.0]]);
}

#[test]
fn letterbox_grayscale_uses_single_fill_channel() {
    let image = DynamicImage::ImageLuma8(GrayImage::from_pixel(40, 80, Luma([0])));
    let mut report = ResizeReport::new();

    let (canvas, _) = apply_letterbox(
        image,
        Vec::new(),
        81,
        80,
        Rgb([90, 1, 2]),
        FilterType::Nearest,
        &mut report,
    );

    let DynamicImage::ImageLuma8(canvas) = canvas else {
        panic!("letterbox must keep the luma colour type");
    };
    // 41 leftover columns: 20 on the left, 21 on the right.
    assert_eq!(*canvas.get_pixel(19, 0), Luma([90]));
    assert_eq!(*canvas.get_pixel(20, 0), Luma([0]));
    assert_eq!(*canvas.get_pixel(59, 0), Luma([0]));
    assert_eq!(*canvas.get_pixel(60, 0), Luma([90]));
    assert_eq!(*canvas.get_pixel(80, 79), Luma([90]));
}

#[test]
fn empty_image_is_returned_with_original_records() {
    let mut report = ResizeReport::new();
    let objects = from_kitti_str(&kitti_line("Car", [1.0, 2.0, 3.0, 4.0]), &mut report);

    let options = ResizeOptions::new(ResizeMode::Stretch, 32, 32);
    let (image, out) = options.apply(
        DynamicImage::ImageRgb8(RgbImage::new(0, 12)),
        objects.clone(),
        &mut report,
    );

    assert_eq!((image.width(), image.height()), (0, 12));
    assert_eq!(out, objects);
    assert_eq!(report.count(IssueCode::EmptyImage), 1);
}

#[test]
fn zero_scale_leaves_batch_untouched() {
    let mut report = ResizeReport::new();
    let objects = from_kitti_str(
        &[
            kitti_line("Car", [1.0, 2.0, 3.0, 4.0]),
            kitti_line("Tram", [5.0, 6.0, 7.0, 8.0]),
        ]
        .join("\n"),
        &mut report,
    );

    let out = scale_objects(objects.clone(), 0.0, 1.0, 0.0, 0.0, &mut report);

    assert_eq!(out, objects);
    assert_eq!(report.count(IssueCode::InvalidScale), 1);
}
