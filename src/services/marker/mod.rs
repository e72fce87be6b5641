//! Status marker color inference: HSV conversion, region averaging, hue
//! bands, and the three-sided probe around a text line.

pub mod classify;
pub mod hsv;
pub mod region;
pub mod sampler;

pub use classify::classify_hue;
pub use hsv::rgb_to_hsv;
pub use region::{average_saturated_hsv, PixelSource};
pub use sampler::{marker_regions, sample_status_color, MarkerSide};
