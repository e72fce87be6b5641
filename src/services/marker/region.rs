use super::hsv::rgb_to_hsv;
use crate::models::bbox::BoundingBox;
use crate::models::color::RegionAverage;
use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};

/// Pixels with alpha below this are treated as background
pub const MIN_ALPHA: u8 = 10;
/// A pixel counts toward the average only above these bounds
pub const MIN_PIXEL_SATURATION: f64 = 0.5;
pub const MIN_PIXEL_VALUE: f64 = 0.35;

/// Synchronous read access to a decoded raster
pub trait PixelSource {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Pixel at `(x, y)`; callers guarantee the coordinate is in bounds
    fn pixel(&self, x: u32, y: u32) -> Rgba<u8>;
}

impl PixelSource for RgbaImage {
    fn width(&self) -> u32 {
        self.width()
    }

    fn height(&self) -> u32 {
        self.height()
    }

    fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.get_pixel(x, y)
    }
}

impl PixelSource for DynamicImage {
    fn width(&self) -> u32 {
        GenericImageView::width(self)
    }

    fn height(&self) -> u32 {
        GenericImageView::height(self)
    }

    fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        self.get_pixel(x, y)
    }
}

/// Average HSV of the vividly colored pixels inside `rect`.
///
/// `rect` is half-open and clipped to the image. Near-transparent pixels are
/// skipped, and only pixels with `s > 0.5 && v > 0.35` are averaged. An empty
/// or colorless region returns [`RegionAverage::EMPTY`].
pub fn average_saturated_hsv<P: PixelSource + ?Sized>(pixels: &P, rect: BoundingBox) -> RegionAverage {
    let area = rect.clip_to(pixels.width(), pixels.height());
    if area.is_empty() {
        return RegionAverage::EMPTY;
    }

    let (mut sum_h, mut sum_s, mut sum_v) = (0.0, 0.0, 0.0);
    let mut count = 0usize;

    for y in area.y0..area.y1 {
        for x in area.x0..area.x1 {
            let Rgba([r, g, b, a]) = pixels.pixel(x as u32, y as u32);
            if a < MIN_ALPHA {
                continue;
            }

            let hsv = rgb_to_hsv(r, g, b);
            if hsv.s > MIN_PIXEL_SATURATION && hsv.v > MIN_PIXEL_VALUE {
                sum_h += hsv.h;
                sum_s += hsv.s;
                sum_v += hsv.v;
                count += 1;
            }
        }
    }

    if count == 0 {
        return RegionAverage::EMPTY;
    }

    let n = count as f64;
    RegionAverage {
        h: sum_h / n,
        s: sum_s / n,
        v: sum_v / n,
        count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba(color))
    }

    #[test]
    fn test_uniform_region_matches_single_pixel() {
        let img = solid(20, 20, [0, 255, 0, 255]);
        let avg = average_saturated_hsv(&img, BoundingBox::new(2, 3, 12, 8));

        assert_eq!(avg.count, 50);
        assert_eq!(avg.h, 120.0);
        assert_eq!(avg.s, 1.0);
        assert_eq!(avg.v, 1.0);
    }

    #[test]
    fn test_uniform_region_non_trivial_color() {
        let color = [0x8E, 0x44, 0xAD, 255];
        let img = solid(10, 10, color);
        let expected = rgb_to_hsv(color[0], color[1], color[2]);

        let avg = average_saturated_hsv(&img, BoundingBox::new(0, 0, 10, 10));
        assert_eq!(avg.count, 100);
        assert!((avg.h - expected.h).abs() < 1e-9);
        assert!((avg.s - expected.s).abs() < 1e-9);
        assert!((avg.v - expected.v).abs() < 1e-9);
    }

    #[test]
    fn test_transparent_region_has_no_signal() {
        let img = solid(10, 10, [255, 0, 0, 9]);
        let avg = average_saturated_hsv(&img, BoundingBox::new(0, 0, 10, 10));
        assert_eq!(avg, RegionAverage::EMPTY);
    }

    #[test]
    fn test_gray_and_dark_pixels_are_filtered() {
        let img = RgbaImage::from_fn(4, 1, |x, _| match x {
            0 => Rgba([128, 128, 128, 255]), // gray
            1 => Rgba([60, 0, 0, 255]),      // too dark
            2 => Rgba([255, 200, 200, 255]), // pastel, low saturation
            _ => Rgba([255, 0, 0, 255]),     // vivid red
        });

        let avg = average_saturated_hsv(&img, BoundingBox::new(0, 0, 4, 1));
        assert_eq!(avg.count, 1);
        assert_eq!(avg.h, 0.0);
    }

    #[test]
    fn test_mixed_region_counts_only_opaque_pixels() {
        let img = RgbaImage::from_fn(10, 10, |x, _| {
            if x < 5 {
                Rgba([0, 255, 0, 255])
            } else {
                Rgba([0, 255, 0, 0])
            }
        });

        let avg = average_saturated_hsv(&img, BoundingBox::new(0, 0, 10, 10));
        assert_eq!(avg.count, 50);
    }

    #[test]
    fn test_rect_is_clipped_to_image() {
        let img = solid(10, 10, [0, 255, 0, 255]);

        let avg = average_saturated_hsv(&img, BoundingBox::new(-5, -5, 3, 3));
        assert_eq!(avg.count, 9);

        let outside = average_saturated_hsv(&img, BoundingBox::new(12, 0, 20, 10));
        assert_eq!(outside, RegionAverage::EMPTY);
    }

    #[test]
    fn test_degenerate_rect_is_empty() {
        let img = solid(10, 10, [0, 255, 0, 255]);
        let avg = average_saturated_hsv(&img, BoundingBox::new(4, 6, 8, 6));
        assert_eq!(avg, RegionAverage::EMPTY);
    }

    #[test]
    fn test_dynamic_image_source() {
        let img = DynamicImage::ImageRgba8(solid(6, 6, [0, 0, 255, 255]));
        let avg = average_saturated_hsv(&img, BoundingBox::new(0, 0, 6, 6));
        assert_eq!(avg.count, 36);
        assert_eq!(avg.h, 240.0);
    }
}
