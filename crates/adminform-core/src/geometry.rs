//! Geometry used by the paint model: `Point`, `Size`, `Rect`.

use serde::{Deserialize, Serialize};

/// A position in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Size {
    /// Zero size.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a new size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner.
    #[must_use]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Dimensions of the rectangle.
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Check whether a point lies inside (edges inclusive).
    #[must_use]
    pub fn contains_point(&self, point: &Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// Split off a horizontal band of `height` from the top.
    ///
    /// Returns `(band, rest)`; the band is clamped to the available height.
    #[must_use]
    pub fn split_top(&self, height: f32) -> (Self, Self) {
        let h = height.clamp(0.0, self.height);
        (
            Self::new(self.x, self.y, self.width, h),
            Self::new(self.x, self.y + h, self.width, self.height - h),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains_point_edges() {
        let r = Rect::new(10.0, 10.0, 100.0, 20.0);
        assert!(r.contains_point(&Point::new(10.0, 10.0)));
        assert!(r.contains_point(&Point::new(110.0, 30.0)));
        assert!(!r.contains_point(&Point::new(9.0, 15.0)));
    }

    #[test]
    fn test_rect_split_top() {
        let r = Rect::new(0.0, 0.0, 200.0, 60.0);
        let (label, rest) = r.split_top(20.0);
        assert_eq!(label, Rect::new(0.0, 0.0, 200.0, 20.0));
        assert_eq!(rest, Rect::new(0.0, 20.0, 200.0, 40.0));
    }

    #[test]
    fn test_rect_split_top_clamps() {
        let r = Rect::new(0.0, 0.0, 50.0, 10.0);
        let (band, rest) = r.split_top(25.0);
        assert_eq!(band.height, 10.0);
        assert_eq!(rest.height, 0.0);
    }

    #[test]
    fn test_rect_origin_and_size() {
        let r = Rect::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(r.origin(), Point::new(1.0, 2.0));
        assert_eq!(r.size(), Size::new(3.0, 4.0));
    }
}
