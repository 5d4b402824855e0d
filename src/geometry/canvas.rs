//! Pixel side of a resize plan.

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageBuffer, Luma, LumaA, Pixel, Rgb, Rgba};

use super::plan::ResizePlan;

/// Default letterbox fill, mid-gray on every channel.
pub const DEFAULT_FILL: Rgb<u8> = Rgb([114, 114, 114]);

/// Interpolation used when resampling pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Interpolation {
    Nearest,
    #[default]
    Bilinear,
    Bicubic,
    Gaussian,
    Lanczos3,
}

impl From<Interpolation> for FilterType {
    fn from(value: Interpolation) -> Self {
        match value {
            Interpolation::Nearest => FilterType::Nearest,
            Interpolation::Bilinear => FilterType::Triangle,
            Interpolation::Bicubic => FilterType::CatmullRom,
            Interpolation::Gaussian => FilterType::Gaussian,
            Interpolation::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Resample to exactly the plan's content size, keeping the colour type.
pub fn resize_content(image: &DynamicImage, plan: &ResizePlan, filter: FilterType) -> DynamicImage {
    image.resize_exact(plan.scaled_width, plan.scaled_height, filter)
}

/// Resample into the plan's content area and paste onto a filled canvas.
///
/// The canvas keeps the source colour type. Luma canvases take the first
/// fill channel, alpha channels are opaque, and 16-bit or float buffers
/// get the same intensity at their own depth.
pub fn letterbox_content(
    image: &DynamicImage,
    plan: &ResizePlan,
    fill: Rgb<u8>,
    filter: FilterType,
) -> DynamicImage {
    let [r, g, b] = fill.0;

    match resize_content(image, plan, filter) {
        DynamicImage::ImageLuma8(content) => {
            DynamicImage::ImageLuma8(paste(&content, plan, Luma([r])))
        }
        DynamicImage::ImageLumaA8(content) => {
            DynamicImage::ImageLumaA8(paste(&content, plan, LumaA([r, u8::MAX])))
        }
        DynamicImage::ImageRgb8(content) => DynamicImage::ImageRgb8(paste(&content, plan, fill)),
        DynamicImage::ImageRgba8(content) => {
            DynamicImage::ImageRgba8(paste(&content, plan, Rgba([r, g, b, u8::MAX])))
        }
        DynamicImage::ImageLuma16(content) => {
            DynamicImage::ImageLuma16(paste(&content, plan, Luma([widen(r)])))
        }
        DynamicImage::ImageLumaA16(content) => DynamicImage::ImageLumaA16(paste(
            &content,
            plan,
            LumaA([widen(r), u16::MAX]),
        )),
        DynamicImage::ImageRgb16(content) => DynamicImage::ImageRgb16(paste(
            &content,
            plan,
            Rgb([widen(r), widen(g), widen(b)]),
        )),
        DynamicImage::ImageRgba16(content) => DynamicImage::ImageRgba16(paste(
            &content,
            plan,
            Rgba([widen(r), widen(g), widen(b), u16::MAX]),
        )),
        DynamicImage::ImageRgb32F(content) => DynamicImage::ImageRgb32F(paste(
            &content,
            plan,
            Rgb([unit(r), unit(g), unit(b)]),
        )),
        DynamicImage::ImageRgba32F(content) => DynamicImage::ImageRgba32F(paste(
            &content,
            plan,
            Rgba([unit(r), unit(g), unit(b), 1.0]),
        )),
        other => DynamicImage::ImageRgba8(paste(
            &other.to_rgba8(),
            plan,
            Rgba([r, g, b, u8::MAX]),
        )),
    }
}

fn paste<P: Pixel>(
    content: &ImageBuffer<P, Vec<P::Subpixel>>,
    plan: &ResizePlan,
    fill: P,
) -> ImageBuffer<P, Vec<P::Subpixel>> {
    let mut canvas = ImageBuffer::from_pixel(plan.target_width, plan.target_height, fill);
    imageops::replace(
        &mut canvas,
        content,
        i64::from(plan.pad_x),
        i64::from(plan.pad_y),
    );
    canvas
}

fn widen(channel: u8) -> u16 {
    u16::from(channel) * 257
}

fn unit(channel: u8) -> f32 {
    f32::from(channel) / 255.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, RgbImage};

    #[test]
    fn letterbox_content_fills_padding_and_keeps_content() {
        let source = RgbImage::from_pixel(100, 50, Rgb([200, 10, 10]));
        let plan = ResizePlan::letterbox(100, 50, 200, 200).expect("plan");

        let canvas = letterbox_content(
            &DynamicImage::ImageRgb8(source),
            &plan,
            DEFAULT_FILL,
            FilterType::Triangle,
        )
        .to_rgb8();

        assert_eq!(canvas.dimensions(), (200, 200));
        assert_eq!(*canvas.get_pixel(0, 0), DEFAULT_FILL);
        assert_eq!(*canvas.get_pixel(100, 49), DEFAULT_FILL);
        assert_eq!(*canvas.get_pixel(100, 50), Rgb([200, 10, 10]));
        assert_eq!(*canvas.get_pixel(199, 149), Rgb([200, 10, 10]));
        assert_eq!(*canvas.get_pixel(100, 150), DEFAULT_FILL);
    }

    #[test]
    fn letterbox_content_uses_first_fill_channel_for_luma() {
        let source = GrayImage::from_pixel(10, 20, Luma([255]));
        let plan = ResizePlan::letterbox(10, 20, 20, 20).expect("plan");

        let canvas = letterbox_content(
            &DynamicImage::ImageLuma8(source),
            &plan,
            Rgb([7, 8, 9]),
            FilterType::Nearest,
        );

        let DynamicImage::ImageLuma8(canvas) = canvas else {
            panic!("expected a luma canvas");
        };
        assert_eq!((plan.pad_x, plan.pad_y), (5, 0));
        assert_eq!(*canvas.get_pixel(0, 0), Luma([7]));
        assert_eq!(*canvas.get_pixel(5, 0), Luma([255]));
        assert_eq!(*canvas.get_pixel(15, 19), Luma([7]));
    }

    #[test]
    fn letterbox_content_keeps_sixteen_bit_depth() {
        let source = ImageBuffer::<Rgb<u16>, _>::from_pixel(4, 2, Rgb([1000, 2000, 3000]));
        let plan = ResizePlan::letterbox(4, 2, 4, 4).expect("plan");

        let canvas = letterbox_content(
            &DynamicImage::ImageRgb16(source),
            &plan,
            DEFAULT_FILL,
            FilterType::Nearest,
        );

        let DynamicImage::ImageRgb16(canvas) = canvas else {
            panic!("expected a 16-bit canvas");
        };
        assert_eq!(*canvas.get_pixel(0, 0), Rgb([114 * 257; 3]));
        assert_eq!(*canvas.get_pixel(0, 1), Rgb([1000, 2000, 3000]));
    }

    #[test]
    fn interpolation_maps_to_filters() {
        assert_eq!(FilterType::from(Interpolation::default()), FilterType::Triangle);
        assert_eq!(FilterType::from(Interpolation::Nearest), FilterType::Nearest);
    }
}
