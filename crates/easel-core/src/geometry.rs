#![forbid(unsafe_code)]

//! Geometric primitives for the Easel canvas.
//!
//! Coordinates are `f64` canvas units with the origin at the top-left and the
//! y axis growing downward. [`Bounds`] is an axis-aligned rectangle stored as
//! origin plus extent; negative extents are never produced by Easel itself.

/// A point on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns this point shifted by `(dx, dy)`.
    #[inline]
    #[must_use]
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// An axis-aligned rectangle on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    #[must_use]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Returns these bounds shifted by `(dx, dy)` without changing the extent.
    #[inline]
    #[must_use]
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Returns `true` if `point` lies inside or on the edge of these bounds.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translated_preserves_extent() {
        let b = Bounds::new(10.0, 20.0, 30.0, 40.0);
        let moved = b.translated(5.0, -5.0);
        assert_eq!(moved, Bounds::new(15.0, 15.0, 30.0, 40.0));
        assert_eq!(moved.width, b.width);
        assert_eq!(moved.height, b.height);
    }

    #[test]
    fn contains_is_edge_inclusive() {
        let b = Bounds::new(0.0, 0.0, 10.0, 10.0);
        assert!(b.contains(Point::new(0.0, 0.0)));
        assert!(b.contains(Point::new(10.0, 10.0)));
        assert!(b.contains(b.center()));
        assert!(!b.contains(Point::new(10.1, 5.0)));
    }

    #[test]
    fn center_of_origin_rect() {
        let b = Bounds::new(0.0, 0.0, 100.0, 50.0);
        assert_eq!(b.center(), Point::new(50.0, 25.0));
    }
}
