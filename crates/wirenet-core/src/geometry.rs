//! Geometric primitives for network layout.
//!
//! This module provides the geometric types and segment predicates used by the
//! layout engine to place nodes and to detect visual defects in a drawing.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in canvas space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular bounding box defined by minimum and maximum coordinates
//! - [`orientation`], [`segments_cross`], [`is_point_on_segment`],
//!   [`distance_to_segment`] - Pure segment predicates
//!
//! # Coordinate System
//!
//! Wirenet uses a coordinate system consistent with SVG canvases:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```

/// Visual radius of a drawn node.
pub const NODE_RADIUS: f64 = 17.0;

/// Stroke width of a drawn node outline.
pub const NODE_STROKE_WIDTH: f64 = 3.0;

/// Minimum distance between a node center and any segment it is not an endpoint of.
pub const MIN_SEGMENT_NODE_CLEARANCE: f64 = NODE_RADIUS + NODE_STROKE_WIDTH;

/// Tolerance used by [`is_point_on_segment`] when callers have no better value.
pub const DEFAULT_ON_SEGMENT_EPSILON: f64 = 0.01;

/// A 2D point representing a position in canvas space.
///
/// # Examples
///
/// ```
/// # use wirenet_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
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

    /// Calculates the hypotenuse (Euclidean distance from origin)
    pub fn hypot(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Point) -> f64 {
        self.sub_point(other).hypot()
    }

    /// Multiplies both coordinates by the given factor
    pub fn scale(self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Rounds both coordinates to the nearest multiple of `step`.
    ///
    /// A non-positive or non-finite step leaves the point unchanged.
    ///
    /// ```
    /// # use wirenet_core::geometry::Point;
    /// let snapped = Point::new(29.0, 51.0).snap(20.0);
    /// assert_eq!(snapped, Point::new(20.0, 60.0));
    /// ```
    pub fn snap(self, step: f64) -> Self {
        if !(step.is_finite() && step > 0.0) {
            return self;
        }
        Self {
            x: (self.x / step).round() * step,
            y: (self.y / step).round() * step,
        }
    }

    /// Clamps both coordinates into the given bounds.
    ///
    /// Never panics, even for inverted bounds; the maximum wins in that case.
    pub fn clamp_within(self, bounds: Bounds) -> Self {
        Self {
            x: self.x.max(bounds.min_x).min(bounds.max_x),
            y: self.y.max(bounds.min_y).min(bounds.max_y),
        }
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f64,
    height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f64 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f64 {
        self.height
    }

    /// Multiplies both dimensions by the given factor
    pub fn scale(self, factor: f64) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
        }
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Bounds {
    /// Creates bounds from explicit minimum and maximum corners.
    pub fn new(min: Point, max: Point) -> Self {
        Self {
            min_x: min.x,
            min_y: min.y,
            max_x: max.x,
            max_y: max.y,
        }
    }

    /// Creates bounds starting at `top_left` and extending by `size`.
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Smallest bounds containing every point, or `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        points.into_iter().fold(None, |bounds, point| {
            let single = Bounds::new(point, point);
            Some(match bounds {
                Some(bounds) => bounds.merge(&single),
                None => single,
            })
        })
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f64 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f64 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f64 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f64 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f64 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f64 {
        self.max_y - self.min_y
    }

    /// Returns the top-left corner as a Point
    pub fn min_point(self) -> Point {
        Point {
            x: self.min_x,
            y: self.min_y,
        }
    }

    /// Converts the bounds to a Size
    pub fn to_size(self) -> Size {
        Size {
            width: self.width(),
            height: self.height(),
        }
    }

    /// Returns true when the point lies inside the bounds (edges included)
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Merges this bounds with another, returning the smallest bounds containing both
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Shrinks the bounds by `margin` on every side
    pub fn shrink(&self, margin: f64) -> Self {
        Self {
            min_x: self.min_x + margin,
            min_y: self.min_y + margin,
            max_x: self.max_x - margin,
            max_y: self.max_y - margin,
        }
    }
}

/// Signed area of the triangle `(a, b, c)`, doubled.
///
/// Positive for a counter-clockwise turn in a y-up frame, negative for
/// clockwise, zero when the three points are collinear.
pub fn orientation(a: Point, b: Point, c: Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Returns true iff segments `a` and `b` properly cross.
///
/// Touching endpoints and collinear overlaps are not crossings; those are
/// reported by the overlap and clearance checks instead.
///
/// ```
/// # use wirenet_core::geometry::{Point, segments_cross};
/// let crossing = segments_cross(
///     Point::new(0.0, 0.0),
///     Point::new(10.0, 10.0),
///     Point::new(0.0, 10.0),
///     Point::new(10.0, 0.0),
/// );
/// assert!(crossing);
/// ```
pub fn segments_cross(a_start: Point, a_end: Point, b_start: Point, b_end: Point) -> bool {
    let o1 = orientation(a_start, a_end, b_start);
    let o2 = orientation(a_start, a_end, b_end);
    let o3 = orientation(b_start, b_end, a_start);
    let o4 = orientation(b_start, b_end, a_end);

    opposite_sides(o1, o2) && opposite_sides(o3, o4)
}

fn opposite_sides(first: f64, second: f64) -> bool {
    (first > 0.0 && second < 0.0) || (first < 0.0 && second > 0.0)
}

/// Returns true iff `point` is collinear with the segment (within `epsilon`)
/// and inside its bounding box (widened by `epsilon`).
pub fn is_point_on_segment(start: Point, end: Point, point: Point, epsilon: f64) -> bool {
    if orientation(start, end, point).abs() > epsilon {
        return false;
    }

    point.x >= start.x.min(end.x) - epsilon
        && point.x <= start.x.max(end.x) + epsilon
        && point.y >= start.y.min(end.y) - epsilon
        && point.y <= start.y.max(end.y) + epsilon
}

/// Euclidean distance from `point` to the closest point of the segment.
///
/// A zero-length segment degrades to the distance between two points.
pub fn distance_to_segment(point: Point, start: Point, end: Point) -> f64 {
    let direction = end.sub_point(start);
    let length_squared = direction.x * direction.x + direction.y * direction.y;
    if length_squared <= f64::EPSILON {
        return point.distance(start);
    }

    let offset = point.sub_point(start);
    let t = ((offset.x * direction.x + offset.y * direction.y) / length_squared).clamp(0.0, 1.0);
    let projection = start.add_point(direction.scale(t));
    point.distance(projection)
}
