//! Geometric primitives for mind map layout and positioning.
//!
//! This module provides the geometric types used throughout Mindtree for
//! calculating positions, sizes, and bounding boxes of mind map nodes.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in canvas space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular bounding box defined by minimum and maximum coordinates
//!
//! # Coordinate System
//!
//! Mindtree uses a coordinate system consistent with SVG and the browser canvas:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner at `(0, 0)`
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases downward
//!
//! Node positions are always the top-left corner of the node's box.

use serde::{Deserialize, Serialize};

/// A 2D point representing a position in canvas coordinate space.
///
/// # Examples
///
/// ```
/// # use mindtree_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
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

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Returns the point with x and y swapped.
    ///
    /// Used to mirror a layout between the two orientations.
    pub fn transpose(self) -> Self {
        Self {
            x: self.y,
            y: self.x,
        }
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
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

    /// Returns a new Size with the maximum width and height between this size and another
    pub fn max(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    /// Returns true if either dimension is zero, negative, or not a finite number.
    ///
    /// A degenerate size cannot be used to separate boxes from each other.
    pub fn is_degenerate(self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }

    /// Replaces every degenerate dimension with `min_extent`.
    ///
    /// Valid dimensions are kept as they are.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mindtree_core::geometry::Size;
    /// let size = Size::new(-3.0, 40.0).clamp_degenerate(1.0);
    /// assert_eq!(size, Size::new(1.0, 40.0));
    /// ```
    pub fn clamp_degenerate(self, min_extent: f32) -> Self {
        let fix = |value: f32| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                min_extent
            }
        };
        Self {
            width: fix(self.width),
            height: fix(self.height),
        }
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Merges two bounds to create a larger bounds that contains both.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mindtree_core::geometry::{Bounds, Point, Size};
    /// let question = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 30.0));
    /// let answer = Bounds::new_from_top_left(Point::new(10.0, 40.0), Size::new(120.0, 80.0));
    ///
    /// let combined = question.merge(&answer);
    /// assert_eq!(combined.min_x(), 0.0);
    /// assert_eq!(combined.min_y(), 0.0);
    /// assert_eq!(combined.width(), 130.0);
    /// assert_eq!(combined.height(), 120.0);
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Returns true if the interiors of the two bounds overlap.
    ///
    /// Boxes that only touch along an edge do not intersect.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mindtree_core::geometry::{Bounds, Point, Size};
    /// let a = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
    /// let b = Bounds::new_from_top_left(Point::new(10.0, 0.0), Size::new(10.0, 10.0));
    /// let c = Bounds::new_from_top_left(Point::new(5.0, 5.0), Size::new(10.0, 10.0));
    ///
    /// assert!(!a.intersects(&b));
    /// assert!(a.intersects(&c));
    /// ```
    pub fn intersects(&self, other: &Self) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_new() {
        let point = Point::new(3.5, 4.2);
        assert_eq!(point.x(), 3.5);
        assert_eq!(point.y(), 4.2);
    }

    #[test]
    fn test_point_add() {
        let p1 = Point::new(5.0, 8.0);
        let p2 = Point::new(2.0, 3.0);
        assert_eq!(p1.add_point(p2), Point::new(7.0, 11.0));
    }

    #[test]
    fn test_point_transpose() {
        assert_eq!(Point::new(1.0, 2.0).transpose(), Point::new(2.0, 1.0));
    }

    #[test]
    fn test_size_max() {
        let max_size = Size::new(10.0, 20.0).max(Size::new(15.0, 18.0));
        assert_eq!(max_size.width(), 15.0);
        assert_eq!(max_size.height(), 20.0);
    }

    #[test]
    fn test_size_is_degenerate() {
        assert!(!Size::new(1.0, 1.0).is_degenerate());
        assert!(Size::new(0.0, 1.0).is_degenerate());
        assert!(Size::new(1.0, -4.0).is_degenerate());
        assert!(Size::new(f32::NAN, 1.0).is_degenerate());
        assert!(Size::new(1.0, f32::INFINITY).is_degenerate());
    }

    #[test]
    fn test_size_clamp_degenerate() {
        assert_eq!(
            Size::new(0.0, f32::NAN).clamp_degenerate(2.0),
            Size::new(2.0, 2.0)
        );
        assert_eq!(
            Size::new(30.0, 40.0).clamp_degenerate(2.0),
            Size::new(30.0, 40.0)
        );
    }

    #[test]
    fn test_bounds_new_from_top_left() {
        let top_left = Point::new(10.0, 20.0);
        let bounds = Bounds::new_from_top_left(top_left, Size::new(30.0, 40.0));

        assert_eq!(bounds.min_x(), 10.0);
        assert_eq!(bounds.min_y(), 20.0);
        assert_eq!(bounds.max_x(), 40.0);
        assert_eq!(bounds.max_y(), 60.0);
        assert_eq!(bounds.width(), 30.0);
        assert_eq!(bounds.height(), 40.0);
    }

    #[test]
    fn test_bounds_merge() {
        let bounds1 = Bounds {
            min_x: 1.0,
            min_y: 2.0,
            max_x: 5.0,
            max_y: 6.0,
        };
        let bounds2 = Bounds {
            min_x: 3.0,
            min_y: 0.0,
            max_x: 8.0,
            max_y: 4.0,
        };

        let merged = bounds1.merge(&bounds2);
        assert_eq!(merged.min_x(), 1.0);
        assert_eq!(merged.min_y(), 0.0);
        assert_eq!(merged.max_x(), 8.0);
        assert_eq!(merged.max_y(), 6.0);
    }

    #[test]
    fn test_bounds_intersects() {
        let a = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
        let below = Bounds::new_from_top_left(Point::new(0.0, 10.0), Size::new(10.0, 10.0));
        let inside = Bounds::new_from_top_left(Point::new(2.0, 2.0), Size::new(2.0, 2.0));
        let far = Bounds::new_from_top_left(Point::new(50.0, 50.0), Size::new(1.0, 1.0));

        assert!(!a.intersects(&below));
        assert!(a.intersects(&inside));
        assert!(inside.intersects(&a));
        assert!(!a.intersects(&far));
    }
}
