//! Geometry value types and primitive predicates.
//!
//! All coordinates are in a y-down space (SVG convention): `top` is the
//! smallest y of a rectangle.

use nalgebra::{Matrix2, Vector2};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// Determinant threshold below which a 2x2 system is treated as singular.
pub const EPS_DET: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Unit vector in the same direction, `None` for a (near) zero vector.
    pub fn normalized(&self) -> Option<Point> {
        let len = self.length();
        if len < 1e-12 {
            return None;
        }
        Some(Point::new(self.x / len, self.y / len))
    }

    /// Rotate a direction vector a quarter turn (y-down: clockwise on screen).
    pub fn perpendicular(&self) -> Point {
        Point::new(-self.y, self.x)
    }

    pub fn lerp(&self, other: &Point, t: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// Angle of this vector in degrees, `atan2` convention.
    pub fn angle_degrees(&self) -> f64 {
        self.y.atan2(self.x).to_degrees()
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Axis-aligned rectangle `{left, top, width, height}`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Bounds spanning two corner coordinates in any order.
    pub fn from_corners(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        let left = x1.min(x2);
        let top = y1.min(y2);
        Self::new(left, top, (x1 - x2).abs(), (y1 - y2).abs())
    }

    /// Tight bounds of a point set, `None` when empty.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in iter {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Self::from_corners(min_x, min_y, max_x, max_y))
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn min_side(&self) -> f64 {
        self.width.min(self.height)
    }

    pub fn max_side(&self) -> f64 {
        self.width.max(self.height)
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// True when both dimensions are strictly positive.
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds::from_corners(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right().max(other.right()),
            self.bottom().max(other.bottom()),
        )
    }

    /// Grow by `margin` on every side (negative shrinks).
    pub fn expanded(&self, margin: f64) -> Bounds {
        self.expanded_by(margin, margin, margin, margin)
    }

    pub fn expanded_by(&self, top: f64, right: f64, bottom: f64, left: f64) -> Bounds {
        Bounds::new(
            self.left - left,
            self.top - top,
            self.width + left + right,
            self.height + top + bottom,
        )
    }

    pub fn contains(&self, p: &Point) -> bool {
        p.x >= self.left && p.x <= self.right() && p.y >= self.top && p.y <= self.bottom()
    }

    /// Corners in order top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.left, self.top),
            Point::new(self.right(), self.top),
            Point::new(self.right(), self.bottom()),
            Point::new(self.left, self.bottom()),
        ]
    }
}

/// Intersection point of segments `a0-a1` and `b0-b1`, if they cross.
pub fn segment_intersection(a0: Point, a1: Point, b0: Point, b1: Point) -> Option<Point> {
    let r = a1 - a0;
    let s = b1 - b0;
    let denom = r.x * s.y - r.y * s.x;
    if denom.abs() < 1e-12 {
        return None;
    }
    let qp = b0 - a0;
    let t = (qp.x * s.y - qp.y * s.x) / denom;
    let u = (qp.x * r.y - qp.y * r.x) / denom;
    const SLACK: f64 = 1e-9;
    if (-SLACK..=1.0 + SLACK).contains(&t) && (-SLACK..=1.0 + SLACK).contains(&u) {
        Some(a0 + r * t)
    } else {
        None
    }
}

/// Intersection of the infinite lines `p + t*d` and `q + s*e`.
///
/// Returns `None` for parallel lines (determinant below [`EPS_DET`]).
pub fn line_intersection(p: Point, d: Point, q: Point, e: Point) -> Option<Point> {
    let m = Matrix2::new(d.x, -e.x, d.y, -e.y);
    if m.determinant().abs() < EPS_DET {
        return None;
    }
    let ts = m.try_inverse()? * Vector2::new(q.x - p.x, q.y - p.y);
    Some(p + d * ts.x)
}

/// Circle through three points as `(center, radius)`.
///
/// Collinear (or coincident) points give a singular system and return `None`.
pub fn circumcircle(a: Point, b: Point, c: Point) -> Option<(Point, f64)> {
    let m = Matrix2::new(
        2.0 * (b.x - a.x),
        2.0 * (b.y - a.y),
        2.0 * (c.x - a.x),
        2.0 * (c.y - a.y),
    );
    if m.determinant().abs() < EPS_DET {
        return None;
    }
    let rhs = Vector2::new(
        b.x * b.x + b.y * b.y - a.x * a.x - a.y * a.y,
        c.x * c.x + c.y * c.y - a.x * a.x - a.y * a.y,
    );
    let sol = m.try_inverse()? * rhs;
    let center = Point::new(sol.x, sol.y);
    let radius = center.distance_to(&a);
    if !radius.is_finite() {
        return None;
    }
    Some((center, radius))
}

const INSIDE: u8 = 0;
const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const BOTTOM: u8 = 4;
const TOP: u8 = 8;

fn outcode(x: f64, y: f64, xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> u8 {
    let mut code = INSIDE;
    if x < xmin {
        code |= LEFT;
    } else if x > xmax {
        code |= RIGHT;
    }
    if y < ymin {
        code |= TOP;
    } else if y > ymax {
        code |= BOTTOM;
    }
    code
}

/// Cohen–Sutherland clipping of a segment against an axis-aligned rectangle.
///
/// Returns the clipped endpoints `[x1, y1, x2, y2]`, or `None` when the segment
/// lies entirely outside. Each pass moves one endpoint onto an edge, so at most
/// four passes are needed.
#[allow(clippy::too_many_arguments)]
pub fn clip_line_to_rect(
    mut x1: f64,
    mut y1: f64,
    mut x2: f64,
    mut y2: f64,
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
) -> Option<[f64; 4]> {
    let mut code1 = outcode(x1, y1, xmin, ymin, xmax, ymax);
    let mut code2 = outcode(x2, y2, xmin, ymin, xmax, ymax);

    for _ in 0..4 {
        if code1 | code2 == INSIDE {
            return Some([x1, y1, x2, y2]);
        }
        if code1 & code2 != INSIDE {
            return None;
        }

        let out = if code1 != INSIDE { code1 } else { code2 };
        let (x, y) = if out & TOP != 0 {
            (x1 + (x2 - x1) * (ymin - y1) / (y2 - y1), ymin)
        } else if out & BOTTOM != 0 {
            (x1 + (x2 - x1) * (ymax - y1) / (y2 - y1), ymax)
        } else if out & RIGHT != 0 {
            (xmax, y1 + (y2 - y1) * (xmax - x1) / (x2 - x1))
        } else {
            (xmin, y1 + (y2 - y1) * (xmin - x1) / (x2 - x1))
        };

        if out == code1 {
            x1 = x;
            y1 = y;
            code1 = outcode(x1, y1, xmin, ymin, xmax, ymax);
        } else {
            x2 = x;
            y2 = y;
            code2 = outcode(x2, y2, xmin, ymin, xmax, ymax);
        }
    }

    if code1 | code2 == INSIDE {
        Some([x1, y1, x2, y2])
    } else {
        None
    }
}
