use crate::models::color::{ColorClass, RegionAverage};

/// Minimum average saturation and value for a region to carry a color
pub const MIN_REGION_SATURATION: f64 = 0.35;
pub const MIN_REGION_VALUE: f64 = 0.3;

/// Map a region's average color to a marker class using fixed hue bands.
///
/// Red wraps across 0 degrees. Hues outside every band (orange, yellow,
/// blue) are `Unknown`.
pub fn classify_hue(avg: &RegionAverage) -> ColorClass {
    if avg.s < MIN_REGION_SATURATION || avg.v < MIN_REGION_VALUE {
        return ColorClass::Unknown;
    }

    let h = avg.h;
    if (70.0..=170.0).contains(&h) {
        ColorClass::Green
    } else if (260.0..=320.0).contains(&h) {
        ColorClass::Purple
    } else if h <= 20.0 || h >= 340.0 {
        ColorClass::Red
    } else {
        ColorClass::Unknown
    }
}
