use serde::{Deserialize, Serialize};

/// Pixel rectangle in source-image coordinates, corners `(x0, y0)` and `(x1, y1)`.
///
/// Coordinates are signed so sample rectangles may extend past the image edge
/// before clipping.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl BoundingBox {
    /// Create a box from corner coordinates
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Create a box from origin + size (`{x, y, w, h}` style OCR output).
    ///
    /// Returns None when a far corner does not fit in `i32`.
    pub fn from_xywh(x: i32, y: i32, width: i32, height: i32) -> Option<Self> {
        Some(Self {
            x0: x,
            y0: y,
            x1: x.checked_add(width)?,
            y1: y.checked_add(height)?,
        })
    }

    /// Create the axis-aligned box enclosing a polygon of `[x, y]` points.
    ///
    /// Fractional coordinates are floored. Points with fewer than two
    /// components are ignored; returns None when no usable point remains.
    pub fn from_polygon(points: &[Vec<f64>]) -> Option<Self> {
        let mut x_min = f64::INFINITY;
        let mut y_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_max = f64::NEG_INFINITY;

        for point in points.iter().filter(|p| p.len() >= 2) {
            x_min = x_min.min(point[0]);
            x_max = x_max.max(point[0]);
            y_min = y_min.min(point[1]);
            y_max = y_max.max(point[1]);
        }

        if !x_min.is_finite() || !y_min.is_finite() {
            return None;
        }

        Some(Self {
            x0: x_min.floor() as i32,
            y0: y_min.floor() as i32,
            x1: x_max.floor() as i32,
            y1: y_max.floor() as i32,
        })
    }

    pub fn width(&self) -> i32 {
        self.x1.saturating_sub(self.x0)
    }

    pub fn height(&self) -> i32 {
        self.y1.saturating_sub(self.y0)
    }

    /// True when the box covers no pixel (half-open semantics)
    pub fn is_empty(&self) -> bool {
        self.x1 <= self.x0 || self.y1 <= self.y0
    }

    /// Clamp every corner into the inclusive pixel grid `[0, width-1] x [0, height-1]`
    pub fn clamp_to(&self, width: u32, height: u32) -> Self {
        let max_x = (pixel_extent(width) - 1).max(0);
        let max_y = (pixel_extent(height) - 1).max(0);

        Self {
            x0: self.x0.clamp(0, max_x),
            y0: self.y0.clamp(0, max_y),
            x1: self.x1.clamp(0, max_x),
            y1: self.y1.clamp(0, max_y),
        }
    }

    /// Intersect with the half-open image area `[0, width) x [0, height)`
    pub fn clip_to(&self, width: u32, height: u32) -> Self {
        Self {
            x0: self.x0.max(0),
            y0: self.y0.max(0),
            x1: self.x1.min(pixel_extent(width)),
            y1: self.y1.min(pixel_extent(height)),
        }
    }
}

fn pixel_extent(size: u32) -> i32 {
    i32::try_from(size).unwrap_or(i32::MAX)
}
