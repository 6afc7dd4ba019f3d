//! Artwork path capability interface.
//!
//! Every overlay renderer talks to imported artwork only through [`ArtPath`].
//! The production implementation is backed by lyon beziers in the overlay
//! crate; [`PolylinePath`] is a deterministic stand-in built from straight
//! edges, used wherever analysis must run without a real vector runtime.

use crate::geometry::{segment_intersection, Bounds, Point};
use serde::{Deserialize, Serialize};

/// One control point of a bezier path with its handles.
///
/// Handles are stored relative to the anchor, so a zero handle means the
/// adjoining segment leaves the anchor as a straight line.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BezierSegment {
    pub anchor: Point,
    pub handle_in: Point,
    pub handle_out: Point,
    pub has_handle_in: bool,
    pub has_handle_out: bool,
}

impl BezierSegment {
    /// Handle magnitude (per axis) above which an anchor counts as smooth.
    pub const SMOOTH_THRESHOLD: f64 = 0.1;

    pub fn corner(anchor: Point) -> Self {
        Self {
            anchor,
            ..Default::default()
        }
    }

    /// True if either handle has a component larger than
    /// [`Self::SMOOTH_THRESHOLD`].
    pub fn is_smooth(&self) -> bool {
        let big = |h: &Point| {
            h.x.abs() > Self::SMOOTH_THRESHOLD || h.y.abs() > Self::SMOOTH_THRESHOLD
        };
        big(&self.handle_in) || big(&self.handle_out)
    }

    /// Apply a uniform scale followed by a translation; handles only scale.
    pub fn transformed(&self, scale: f64, dx: f64, dy: f64) -> Self {
        Self {
            anchor: Point::new(self.anchor.x * scale + dx, self.anchor.y * scale + dy),
            handle_in: self.handle_in * scale,
            handle_out: self.handle_out * scale,
            ..*self
        }
    }
}

/// A flattened candidate shape: one or more polylines.
///
/// Closed shapes repeat their first point at the end of the chain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outline {
    pub chains: Vec<Vec<Point>>,
}

impl Outline {
    pub fn new(chains: Vec<Vec<Point>>) -> Self {
        Self { chains }
    }

    pub fn single(chain: Vec<Point>) -> Self {
        Self {
            chains: vec![chain],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.chains.iter().all(|c| c.len() < 2)
    }

    /// Every straight edge of every chain.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.chains
            .iter()
            .flat_map(|c| c.windows(2).map(|w| (w[0], w[1])))
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.chains.iter().flatten())
    }
}

/// Capability interface over one imported artwork path.
///
/// Offsets are arc lengths from the start of the path; curve-local queries
/// take the index of a bezier segment and a parameter `t` in `[0, 1]`.
/// Queries return `None` for out-of-range input or degenerate geometry.
pub trait ArtPath {
    fn bounds(&self) -> Bounds;

    fn length(&self) -> f64;

    fn point_at(&self, offset: f64) -> Option<Point>;

    /// Unit tangent at `offset`.
    fn tangent_at(&self, offset: f64) -> Option<Point>;

    /// Unit normal at `offset` (tangent rotated a quarter turn).
    fn normal_at(&self, offset: f64) -> Option<Point> {
        self.tangent_at(offset).map(|t| t.perpendicular())
    }

    /// Signed curvature at `offset`.
    fn curvature_at(&self, offset: f64) -> Option<f64>;

    fn curve_count(&self) -> usize;

    fn curve_point(&self, index: usize, t: f64) -> Option<Point>;

    /// Unit tangent of curve `index` at parameter `t`.
    fn curve_tangent(&self, index: usize, t: f64) -> Option<Point>;

    /// Anchors with their handles, in path order.
    fn anchors(&self) -> Vec<BezierSegment>;

    /// All crossing points between this path and `outline`.
    fn intersections(&self, outline: &Outline) -> Vec<Point>;

    /// True if this path crosses `outline` at least once.
    fn intersects(&self, outline: &Outline) -> bool {
        !self.intersections(outline).is_empty()
    }
}

/// Straight-edged [`ArtPath`] with deterministic sampling.
///
/// Each edge is one "curve". Curvature is a constant supplied by the caller
/// (zero by default) so analysis code can be exercised without real beziers.
#[derive(Debug, Clone, PartialEq)]
pub struct PolylinePath {
    points: Vec<Point>,
    closed: bool,
    curvature: f64,
}

impl PolylinePath {
    pub fn new(points: Vec<Point>, closed: bool) -> Self {
        Self {
            points,
            closed,
            curvature: 0.0,
        }
    }

    /// Closed axis-aligned rectangle path.
    pub fn rect(bounds: Bounds) -> Self {
        Self::new(bounds.corners().to_vec(), true)
    }

    /// Closed regular polygon approximating a circle.
    pub fn circle(center: Point, radius: f64, sides: usize) -> Self {
        let sides = sides.max(3);
        let points = (0..sides)
            .map(|i| {
                let a = std::f64::consts::TAU * i as f64 / sides as f64;
                Point::new(center.x + radius * a.cos(), center.y + radius * a.sin())
            })
            .collect();
        Self::new(points, true).with_curvature(1.0 / radius)
    }

    pub fn with_curvature(mut self, curvature: f64) -> Self {
        self.curvature = curvature;
        self
    }

    fn edge_list(&self) -> Vec<(Point, Point)> {
        let mut edges: Vec<(Point, Point)> =
            self.points.windows(2).map(|w| (w[0], w[1])).collect();
        if self.closed && self.points.len() > 2 {
            if let (Some(&last), Some(&first)) = (self.points.last(), self.points.first()) {
                edges.push((last, first));
            }
        }
        edges
    }

    /// Edge containing `offset` and the distance into that edge.
    fn locate(&self, offset: f64) -> Option<((Point, Point), f64)> {
        if !(0.0..=self.length()).contains(&offset) {
            return None;
        }
        let mut remaining = offset;
        let edges = self.edge_list();
        let count = edges.len();
        for (i, (a, b)) in edges.into_iter().enumerate() {
            let len = a.distance_to(&b);
            if remaining <= len || i + 1 == count {
                return Some(((a, b), remaining.min(len)));
            }
            remaining -= len;
        }
        None
    }
}

impl ArtPath for PolylinePath {
    fn bounds(&self) -> Bounds {
        Bounds::from_points(&self.points).unwrap_or_default()
    }

    fn length(&self) -> f64 {
        self.edge_list().iter().map(|(a, b)| a.distance_to(b)).sum()
    }

    fn point_at(&self, offset: f64) -> Option<Point> {
        let ((a, b), d) = self.locate(offset)?;
        let len = a.distance_to(&b);
        if len < 1e-12 {
            return Some(a);
        }
        Some(a.lerp(&b, d / len))
    }

    fn tangent_at(&self, offset: f64) -> Option<Point> {
        let ((a, b), _) = self.locate(offset)?;
        (b - a).normalized()
    }

    fn curvature_at(&self, offset: f64) -> Option<f64> {
        self.locate(offset).map(|_| self.curvature)
    }

    fn curve_count(&self) -> usize {
        self.edge_list().len()
    }

    fn curve_point(&self, index: usize, t: f64) -> Option<Point> {
        let (a, b) = *self.edge_list().get(index)?;
        Some(a.lerp(&b, t))
    }

    fn curve_tangent(&self, index: usize, _t: f64) -> Option<Point> {
        let (a, b) = *self.edge_list().get(index)?;
        (b - a).normalized()
    }

    fn anchors(&self) -> Vec<BezierSegment> {
        self.points.iter().copied().map(BezierSegment::corner).collect()
    }

    fn intersections(&self, outline: &Outline) -> Vec<Point> {
        let edges = self.edge_list();
        let mut hits = Vec::new();
        for (b0, b1) in outline.edges() {
            for (a0, a1) in &edges {
                if let Some(p) = segment_intersection(*a0, *a1, b0, b1) {
                    hits.push(p);
                }
            }
        }
        hits
    }

    fn intersects(&self, outline: &Outline) -> bool {
        let edges = self.edge_list();
        outline.edges().any(|(b0, b1)| {
            edges
                .iter()
                .any(|(a0, a1)| segment_intersection(*a0, *a1, b0, b1).is_some())
        })
    }
}
