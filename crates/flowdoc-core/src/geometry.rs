//! Geometric primitives for page placement.
//!
//! This module provides the geometric types used throughout Flowdoc for
//! positioning shapes, arrows and text on a page.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in page space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular bounding box anchored at its bottom-left corner
//! - [`Side`] - A named edge (or the center) of a bounding box
//!
//! # Coordinate System
//!
//! Flowdoc uses the PDF page coordinate system, measured in points
//! (1/72 inch):
//!
//! ```text
//!    +Y
//!     ▲
//!     │
//!     │
//!     │
//!   (0,0) ────────► +X
//! ```
//!
//! - **Origin**: Bottom-left corner of the page at `(0, 0)`
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases upward
//!
//! Exporters targeting top-left systems (SVG) flip the y-axis themselves.

use serde::Deserialize;

/// A 2D point representing a position in page coordinate space.
///
/// # Examples
///
/// ```
/// # use flowdoc_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
///
/// let mid = p1.midpoint(p2);
/// assert_eq!(mid.x(), 7.5);
/// assert_eq!(mid.y(), 12.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Calculates the hypotenuse (Euclidean distance from origin)
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Returns the direction angle (radians) of the vector from this point to `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use flowdoc_core::geometry::Point;
    /// let angle = Point::new(0.0, 0.0).angle_to(Point::new(0.0, 10.0));
    /// assert!((angle - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    /// ```
    pub fn angle_to(self, other: Point) -> f32 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// Returns the point reached by walking `distance` from this point along `angle` (radians).
    pub fn offset_polar(self, distance: f32, angle: f32) -> Self {
        Self {
            x: distance.mul_add(angle.cos(), self.x),
            y: distance.mul_add(angle.sin(), self.y),
        }
    }

    /// Multiplies both coordinates by the given factor
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Returns true if both coordinates are finite
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Multiplies both dimensions by the given factor
    pub fn scale(self, factor: f32) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
        }
    }

}

/// Represents a rectangular bounding box anchored at its bottom-left corner.
///
/// The origin and size are stored as given, so derived points such as
/// `x + w/2` are computed exactly the way drawing commands specify them.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    origin: Point,
    size: Size,
}

impl Bounds {
    /// Creates a new bounds from its bottom-left corner and a size.
    ///
    /// This is how drawing commands address shapes: `(x, y)` is the
    /// lower-left corner of the bounding box.
    ///
    /// # Examples
    ///
    /// ```
    /// # use flowdoc_core::geometry::{Bounds, Point, Size};
    /// let bounds = Bounds::new_from_origin(Point::new(10.0, 20.0), Size::new(100.0, 40.0));
    /// assert_eq!(bounds.max_x(), 110.0);
    /// assert_eq!(bounds.max_y(), 60.0);
    /// assert_eq!(bounds.center(), Point::new(60.0, 40.0));
    /// ```
    pub fn new_from_origin(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.origin.x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.origin.y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.origin.x + self.size.width
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.origin.y + self.size.height
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.size.width
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.size.height
    }

    /// Returns the center point of the bounds: `(x + w/2, y + h/2)`.
    pub fn center(self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    /// Returns the midpoint of the given side of the bounds
    ///
    /// # Examples
    ///
    /// ```
    /// # use flowdoc_core::geometry::{Bounds, Point, Side, Size};
    /// let bounds = Bounds::new_from_origin(Point::new(0.0, 0.0), Size::new(40.0, 20.0));
    /// assert_eq!(bounds.side_midpoint(Side::Top), Point::new(20.0, 20.0));
    /// assert_eq!(bounds.side_midpoint(Side::Left), Point::new(0.0, 10.0));
    /// ```
    pub fn side_midpoint(self, side: Side) -> Point {
        let center = self.center();
        match side {
            Side::Top => Point::new(center.x, self.max_y()),
            Side::Right => Point::new(self.max_x(), center.y),
            Side::Bottom => Point::new(center.x, self.min_y()),
            Side::Left => Point::new(self.min_x(), center.y),
            Side::Center => center,
        }
    }
}

/// A named side of a bounding box, used to anchor connectors to shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
    Center,
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_point_new() {
        let point = Point::new(3.5, 4.2);
        assert_eq!(point.x(), 3.5);
        assert_eq!(point.y(), 4.2);
    }

    #[test]
    fn test_point_add_sub() {
        let p1 = Point::new(1.0, 2.0);
        let p2 = Point::new(3.0, 4.0);
        assert_eq!(p1.add_point(p2), Point::new(4.0, 6.0));
        assert_eq!(p2.sub_point(p1), Point::new(2.0, 2.0));
    }

    #[test]
    fn test_point_angle_to() {
        let origin = Point::new(0.0, 0.0);
        assert_approx_eq!(f32, origin.angle_to(Point::new(10.0, 0.0)), 0.0);
        assert_approx_eq!(
            f32,
            origin.angle_to(Point::new(-10.0, 0.0)),
            std::f32::consts::PI
        );
        assert_approx_eq!(
            f32,
            origin.angle_to(Point::new(0.0, -5.0)),
            -std::f32::consts::FRAC_PI_2
        );
    }

    #[test]
    fn test_point_offset_polar() {
        let moved = Point::new(1.0, 1.0).offset_polar(2.0, std::f32::consts::FRAC_PI_2);
        assert_approx_eq!(f32, moved.x(), 1.0, epsilon = 1e-6);
        assert_approx_eq!(f32, moved.y(), 3.0, epsilon = 1e-6);
    }

    #[test]
    fn test_point_is_finite() {
        assert!(Point::new(1.0, 2.0).is_finite());
        assert!(!Point::new(f32::NAN, 2.0).is_finite());
        assert!(!Point::new(1.0, f32::INFINITY).is_finite());
    }

    #[test]
    fn test_bounds_from_origin() {
        let bounds = Bounds::new_from_origin(Point::new(10.0, 20.0), Size::new(30.0, 40.0));
        assert_eq!(bounds.min_x(), 10.0);
        assert_eq!(bounds.min_y(), 20.0);
        assert_eq!(bounds.max_x(), 40.0);
        assert_eq!(bounds.max_y(), 60.0);
        assert_eq!(bounds.center(), Point::new(25.0, 40.0));
    }

    #[test]
    fn test_bounds_side_midpoints() {
        let bounds = Bounds::new_from_origin(Point::new(0.0, 0.0), Size::new(10.0, 6.0));
        assert_eq!(bounds.side_midpoint(Side::Top), Point::new(5.0, 6.0));
        assert_eq!(bounds.side_midpoint(Side::Right), Point::new(10.0, 3.0));
        assert_eq!(bounds.side_midpoint(Side::Bottom), Point::new(5.0, 0.0));
        assert_eq!(bounds.side_midpoint(Side::Left), Point::new(0.0, 3.0));
        assert_eq!(bounds.side_midpoint(Side::Center), Point::new(5.0, 3.0));
    }
}
