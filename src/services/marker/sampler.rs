use super::classify::classify_hue;
use super::region::{average_saturated_hsv, PixelSource};
use crate::models::bbox::BoundingBox;
use crate::models::color::ColorClass;
use crate::models::config::SamplerConfig;
use tracing::trace;

/// Where a marker square is looked for, relative to the text box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerSide {
    Right,
    Left,
    InnerRight,
}

/// The three candidate marker squares for a text line, in probe order
pub fn marker_regions(
    bbox: BoundingBox,
    width: u32,
    height: u32,
    config: &SamplerConfig,
) -> [(MarkerSide, BoundingBox); 3] {
    let b = bbox.clamp_to(width, height);

    let line_height = b.y1.saturating_sub(b.y0).max(1);
    let pad = (line_height as f64 * config.pad_fraction).floor() as i32;
    let box_width = config
        .min_box
        .max((line_height as f64 * config.box_fraction).floor() as i32);
    let mid_y = (i64::from(b.y0) + i64::from(b.y1)).div_euclid(2) as i32;
    // Odd squares lose one row: the band is 2 * floor(box_width / 2) tall
    let half = box_width / 2;

    let (top, bottom) = (mid_y.saturating_sub(half), mid_y.saturating_add(half));
    let right_x0 = b.x1.saturating_add(pad);
    let left_x1 = b.x0.saturating_sub(pad);

    [
        (
            MarkerSide::Right,
            BoundingBox::new(right_x0, top, right_x0.saturating_add(box_width), bottom),
        ),
        (
            MarkerSide::Left,
            BoundingBox::new(left_x1.saturating_sub(box_width), top, left_x1, bottom),
        ),
        (
            MarkerSide::InnerRight,
            BoundingBox::new(b.x1.saturating_sub(box_width), top, b.x1, bottom),
        ),
    ]
}

/// Classify the status marker next to a text line.
///
/// Probes right of the box, then left, then just inside its right edge, and
/// returns the first class that is not `Unknown`. Layout direction decides
/// which side the marker ends up on, so all three are tried.
pub fn sample_status_color<P: PixelSource + ?Sized>(
    bbox: BoundingBox,
    pixels: &P,
    config: &SamplerConfig,
) -> ColorClass {
    for (side, rect) in marker_regions(bbox, pixels.width(), pixels.height(), config) {
        let avg = average_saturated_hsv(pixels, rect);
        let class = classify_hue(&avg);
        if class != ColorClass::Unknown {
            trace!(?side, ?class, hue = avg.h, count = avg.count, "marker found");
            return class;
        }
    }

    ColorClass::Unknown
}
