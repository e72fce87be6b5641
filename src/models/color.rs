use serde::{Deserialize, Serialize};

/// HSV color with hue in degrees `[0, 360)` and saturation/value in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

/// Mean HSV over the qualifying pixels of a sampled region
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RegionAverage {
    pub h: f64,
    pub s: f64,
    pub v: f64,
    /// Number of pixels that passed the alpha and saturation/value filters
    pub count: usize,
}

impl RegionAverage {
    /// The "no signal" result of an empty or grayscale region
    pub const EMPTY: RegionAverage = RegionAverage {
        h: 0.0,
        s: 0.0,
        v: 0.0,
        count: 0,
    };
}

/// Marker color class inferred from a region's hue
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ColorClass {
    Green,
    Purple,
    Red,
    Unknown,
}
