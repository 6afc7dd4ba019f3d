//! Lyon-backed vector paths
//!
//! Imported artwork is stored as contours of cubic bezier curves
//! (`lyon::geom::CubicBezierSegment<f64>`). Straight edges are kept as
//! degenerate cubics flagged `straight`, so anchors can tell a real handle from
//! a line. Arc-length lookup tables are built once per path so that offset
//! queries used by the analysis overlays are cheap.

pub mod data;
pub mod transform;

use brandgeom_core::{ArtPath, BezierSegment, Bounds, Outline, Point};
use lyon::geom::{point, CubicBezierSegment, LineSegment};
use transform::Affine;

pub use data::parse_path_data;
pub use transform::parse_transform;

/// Arc-length samples per curve.
const LUT_SAMPLES: usize = 32;

/// Circle-to-cubic handle ratio.
const KAPPA: f64 = 0.552_284_749_830_793_4;

pub(crate) fn to_lyon(p: Point) -> lyon::geom::Point<f64> {
    point(p.x, p.y)
}

pub(crate) fn from_lyon(p: lyon::geom::Point<f64>) -> Point {
    Point::new(p.x, p.y)
}

/// One cubic piece of a contour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Curve {
    pub bezier: CubicBezierSegment<f64>,
    /// Created from a straight command; control points carry no handle.
    pub straight: bool,
}

impl Curve {
    pub fn line(from: Point, to: Point) -> Self {
        Self {
            bezier: CubicBezierSegment {
                from: to_lyon(from),
                ctrl1: to_lyon(from.lerp(&to, 1.0 / 3.0)),
                ctrl2: to_lyon(from.lerp(&to, 2.0 / 3.0)),
                to: to_lyon(to),
            },
            straight: true,
        }
    }

    pub fn cubic(from: Point, ctrl1: Point, ctrl2: Point, to: Point) -> Self {
        Self {
            bezier: CubicBezierSegment {
                from: to_lyon(from),
                ctrl1: to_lyon(ctrl1),
                ctrl2: to_lyon(ctrl2),
                to: to_lyon(to),
            },
            straight: false,
        }
    }

    pub fn from(&self) -> Point {
        from_lyon(self.bezier.from)
    }

    pub fn to(&self) -> Point {
        from_lyon(self.bezier.to)
    }

    fn sample(&self, t: f64) -> Point {
        from_lyon(self.bezier.sample(t))
    }

    fn first_derivative(&self, t: f64) -> Point {
        let d = self.bezier.derivative(t);
        Point::new(d.x, d.y)
    }

    fn second_derivative(&self, t: f64) -> Point {
        let b = &self.bezier;
        let a = (b.ctrl2.x - 2.0 * b.ctrl1.x + b.from.x, b.ctrl2.y - 2.0 * b.ctrl1.y + b.from.y);
        let c = (b.to.x - 2.0 * b.ctrl2.x + b.ctrl1.x, b.to.y - 2.0 * b.ctrl2.y + b.ctrl1.y);
        Point::new(
            6.0 * ((1.0 - t) * a.0 + t * c.0),
            6.0 * ((1.0 - t) * a.1 + t * c.1),
        )
    }

    /// Unit tangent; falls back to the chord where the derivative vanishes
    /// (coincident control points at an end).
    fn tangent(&self, t: f64) -> Option<Point> {
        self.first_derivative(t)
            .normalized()
            .or_else(|| (self.to() - self.from()).normalized())
    }

    fn curvature(&self, t: f64) -> Option<f64> {
        let d1 = self.first_derivative(t);
        let speed = d1.length();
        if speed < 1e-9 {
            return None;
        }
        let d2 = self.second_derivative(t);
        Some((d1.x * d2.y - d1.y * d2.x) / (speed * speed * speed))
    }

    fn handle_out(&self) -> Option<Point> {
        (!self.straight).then(|| from_lyon(self.bezier.ctrl1) - self.from())
    }

    fn handle_in(&self) -> Option<Point> {
        (!self.straight).then(|| from_lyon(self.bezier.ctrl2) - self.to())
    }

    fn transformed(&self, t: &Affine) -> Self {
        Self {
            bezier: self.bezier.transformed(t),
            straight: self.straight,
        }
    }
}

/// A connected run of curves starting at `start`.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    pub start: Point,
    pub curves: Vec<Curve>,
    pub closed: bool,
}

impl Contour {
    fn anchors(&self) -> Vec<BezierSegment> {
        let n = self.curves.len();
        if n == 0 {
            return vec![BezierSegment::corner(self.start)];
        }

        let anchor = |at: Point, handle_in: Option<Point>, handle_out: Option<Point>| {
            let nonzero = |h: &Option<Point>| h.map(|v| v.length() > 1e-12).unwrap_or(false);
            BezierSegment {
                anchor: at,
                has_handle_in: nonzero(&handle_in),
                has_handle_out: nonzero(&handle_out),
                handle_in: handle_in.unwrap_or(Point::ZERO),
                handle_out: handle_out.unwrap_or(Point::ZERO),
            }
        };

        if self.closed {
            (0..n)
                .map(|k| {
                    let prev = &self.curves[(k + n - 1) % n];
                    let curve = &self.curves[k];
                    anchor(curve.from(), prev.handle_in(), curve.handle_out())
                })
                .collect()
        } else {
            let mut anchors = Vec::with_capacity(n + 1);
            anchors.push(anchor(self.start, None, self.curves[0].handle_out()));
            for k in 1..=n {
                let prev = &self.curves[k - 1];
                let out = self.curves.get(k).and_then(Curve::handle_out);
                anchors.push(anchor(prev.to(), prev.handle_in(), out));
            }
            anchors
        }
    }
}

/// Incremental contour construction, mirroring the SVG pen model.
#[derive(Debug, Default)]
pub struct PathBuilder {
    contours: Vec<Contour>,
    current: Option<Contour>,
    cursor: Point,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> Point {
        self.cursor
    }

    pub fn move_to(&mut self, p: Point) {
        self.end_contour();
        self.current = Some(Contour {
            start: p,
            curves: Vec::new(),
            closed: false,
        });
        self.cursor = p;
    }

    fn push(&mut self, curve: Curve) {
        let cursor = self.cursor;
        let contour = self.current.get_or_insert_with(|| Contour {
            start: cursor,
            curves: Vec::new(),
            closed: false,
        });
        contour.curves.push(curve);
        self.cursor = curve.to();
    }

    pub fn line_to(&mut self, p: Point) {
        self.push(Curve::line(self.cursor, p));
    }

    pub fn cubic_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        self.push(Curve::cubic(self.cursor, ctrl1, ctrl2, to));
    }

    /// Quadratic segment, elevated to a cubic.
    pub fn quad_to(&mut self, ctrl: Point, to: Point) {
        let from = self.cursor;
        let c1 = from + (ctrl - from) * (2.0 / 3.0);
        let c2 = to + (ctrl - to) * (2.0 / 3.0);
        self.cubic_to(c1, c2, to);
    }

    pub fn close(&mut self) {
        if let Some(mut contour) = self.current.take() {
            if self.cursor.distance_to(&contour.start) > 1e-9 {
                contour.curves.push(Curve::line(self.cursor, contour.start));
            }
            contour.closed = true;
            self.cursor = contour.start;
            if !contour.curves.is_empty() {
                self.contours.push(contour);
            }
        }
    }

    fn end_contour(&mut self) {
        if let Some(contour) = self.current.take() {
            if !contour.curves.is_empty() {
                self.contours.push(contour);
            }
        }
    }

    /// Closed axis-aligned rectangle, optionally with rounded corners.
    pub fn add_rect(&mut self, b: Bounds, rx: f64, ry: f64) {
        let rx = rx.clamp(0.0, b.width / 2.0);
        let ry = ry.clamp(0.0, b.height / 2.0);
        if rx <= 0.0 || ry <= 0.0 {
            let [tl, tr, br, bl] = b.corners();
            self.move_to(tl);
            self.line_to(tr);
            self.line_to(br);
            self.line_to(bl);
            self.close();
            return;
        }

        let (l, t, r, bo) = (b.left, b.top, b.right(), b.bottom());
        let (kx, ky) = (rx * KAPPA, ry * KAPPA);
        self.move_to(Point::new(l + rx, t));
        self.line_to(Point::new(r - rx, t));
        self.cubic_to(
            Point::new(r - rx + kx, t),
            Point::new(r, t + ry - ky),
            Point::new(r, t + ry),
        );
        self.line_to(Point::new(r, bo - ry));
        self.cubic_to(
            Point::new(r, bo - ry + ky),
            Point::new(r - rx + kx, bo),
            Point::new(r - rx, bo),
        );
        self.line_to(Point::new(l + rx, bo));
        self.cubic_to(
            Point::new(l + rx - kx, bo),
            Point::new(l, bo - ry + ky),
            Point::new(l, bo - ry),
        );
        self.line_to(Point::new(l, t + ry));
        self.cubic_to(
            Point::new(l, t + ry - ky),
            Point::new(l + rx - kx, t),
            Point::new(l + rx, t),
        );
        self.close();
    }

    /// Closed axis-aligned ellipse made of four quarter cubics.
    pub fn add_ellipse(&mut self, center: Point, rx: f64, ry: f64) {
        let (cx, cy) = (center.x, center.y);
        let (kx, ky) = (rx * KAPPA, ry * KAPPA);
        self.move_to(Point::new(cx + rx, cy));
        self.cubic_to(
            Point::new(cx + rx, cy + ky),
            Point::new(cx + kx, cy + ry),
            Point::new(cx, cy + ry),
        );
        self.cubic_to(
            Point::new(cx - kx, cy + ry),
            Point::new(cx - rx, cy + ky),
            Point::new(cx - rx, cy),
        );
        self.cubic_to(
            Point::new(cx - rx, cy - ky),
            Point::new(cx - kx, cy - ry),
            Point::new(cx, cy - ry),
        );
        self.cubic_to(
            Point::new(cx + kx, cy - ry),
            Point::new(cx + rx, cy - ky),
            Point::new(cx + rx, cy),
        );
        self.close();
    }

    pub fn add_polyline(&mut self, points: &[Point], closed: bool) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.move_to(*first);
        for p in rest {
            self.line_to(*p);
        }
        if closed {
            self.close();
        }
    }

    pub fn build(mut self) -> VectorPath {
        self.end_contour();
        VectorPath::from_contours(self.contours)
    }
}

/// Imported artwork path with cached arc-length tables.
#[derive(Debug, Clone)]
pub struct VectorPath {
    contours: Vec<Contour>,
    curves: Vec<Curve>,
    /// Arc length at `k / LUT_SAMPLES` for each curve.
    luts: Vec<[f64; LUT_SAMPLES + 1]>,
    /// Offset at which each curve ends.
    ends: Vec<f64>,
}

impl VectorPath {
    pub fn from_contours(contours: Vec<Contour>) -> Self {
        let curves: Vec<Curve> = contours.iter().flat_map(|c| c.curves.iter().copied()).collect();
        let luts: Vec<_> = curves.iter().map(length_table).collect();
        let mut ends = Vec::with_capacity(curves.len());
        let mut total = 0.0;
        for lut in &luts {
            total += lut[LUT_SAMPLES];
            ends.push(total);
        }
        Self {
            contours,
            curves,
            luts,
            ends,
        }
    }

    pub fn contours(&self) -> &[Contour] {
        &self.contours
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Apply an affine transform to every control point.
    pub fn transformed(&self, t: &Affine) -> Self {
        let contours = self
            .contours
            .iter()
            .map(|c| Contour {
                start: from_lyon(t.transform_point(to_lyon(c.start))),
                curves: c.curves.iter().map(|curve| curve.transformed(t)).collect(),
                closed: c.closed,
            })
            .collect();
        Self::from_contours(contours)
    }

    /// Uniform scale followed by a translation.
    pub fn scaled(&self, scale: f64, dx: f64, dy: f64) -> Self {
        self.transformed(&Affine::new(scale, 0.0, 0.0, scale, dx, dy))
    }

    /// SVG path data (`d` attribute) for this path.
    pub fn to_svg_data(&self) -> String {
        let mut d = String::new();
        for contour in &self.contours {
            d.push_str(&format!("M{} {}", fmt_num(contour.start.x), fmt_num(contour.start.y)));
            for curve in &contour.curves {
                let b = &curve.bezier;
                if curve.straight {
                    d.push_str(&format!(" L{} {}", fmt_num(b.to.x), fmt_num(b.to.y)));
                } else {
                    d.push_str(&format!(
                        " C{} {} {} {} {} {}",
                        fmt_num(b.ctrl1.x),
                        fmt_num(b.ctrl1.y),
                        fmt_num(b.ctrl2.x),
                        fmt_num(b.ctrl2.y),
                        fmt_num(b.to.x),
                        fmt_num(b.to.y)
                    ));
                }
            }
            if contour.closed {
                d.push_str(" Z");
            }
            d.push(' ');
        }
        d.trim_end().to_string()
    }

    /// Curve index and parameter for an arc-length offset.
    fn locate(&self, offset: f64) -> Option<(usize, f64)> {
        let total = self.length();
        if self.curves.is_empty() || !(0.0..=total).contains(&offset) {
            return None;
        }
        let index = self
            .ends
            .iter()
            .position(|end| offset <= *end)
            .unwrap_or(self.curves.len() - 1);
        let start = if index == 0 { 0.0 } else { self.ends[index - 1] };
        Some((index, param_at(&self.luts[index], offset - start)))
    }

    fn curve(&self, index: usize, t: f64) -> Option<&Curve> {
        if !(0.0..=1.0).contains(&t) {
            return None;
        }
        self.curves.get(index)
    }
}

pub(crate) fn fmt_num(v: f64) -> String {
    let rounded = (v * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        format!("{}", rounded)
    }
}

fn length_table(curve: &Curve) -> [f64; LUT_SAMPLES + 1] {
    let mut lut = [0.0; LUT_SAMPLES + 1];
    let mut prev = curve.sample(0.0);
    for (k, slot) in lut.iter_mut().enumerate().skip(1) {
        let p = curve.sample(k as f64 / LUT_SAMPLES as f64);
        *slot = prev.distance_to(&p);
        prev = p;
    }
    for k in 1..=LUT_SAMPLES {
        lut[k] += lut[k - 1];
    }
    lut
}

/// Invert a length table by linear interpolation.
fn param_at(lut: &[f64; LUT_SAMPLES + 1], s: f64) -> f64 {
    let total = lut[LUT_SAMPLES];
    if total < 1e-12 {
        return 0.0;
    }
    let s = s.clamp(0.0, total);
    let k = lut.partition_point(|v| *v < s).clamp(1, LUT_SAMPLES);
    let (a, b) = (lut[k - 1], lut[k]);
    let frac = if b - a < 1e-12 { 0.0 } else { (s - a) / (b - a) };
    ((k - 1) as f64 + frac) / LUT_SAMPLES as f64
}

impl ArtPath for VectorPath {
    fn bounds(&self) -> Bounds {
        self.curves
            .iter()
            .map(|c| {
                let bb = c.bezier.bounding_box();
                Bounds::from_corners(bb.min.x, bb.min.y, bb.max.x, bb.max.y)
            })
            .reduce(|a, b| a.union(&b))
            .unwrap_or_default()
    }

    fn length(&self) -> f64 {
        self.ends.last().copied().unwrap_or(0.0)
    }

    fn point_at(&self, offset: f64) -> Option<Point> {
        let (i, t) = self.locate(offset)?;
        Some(self.curves[i].sample(t))
    }

    fn tangent_at(&self, offset: f64) -> Option<Point> {
        let (i, t) = self.locate(offset)?;
        self.curves[i].tangent(t)
    }

    fn curvature_at(&self, offset: f64) -> Option<f64> {
        let (i, t) = self.locate(offset)?;
        self.curves[i].curvature(t)
    }

    fn curve_count(&self) -> usize {
        self.curves.len()
    }

    fn curve_point(&self, index: usize, t: f64) -> Option<Point> {
        self.curve(index, t).map(|c| c.sample(t))
    }

    fn curve_tangent(&self, index: usize, t: f64) -> Option<Point> {
        self.curve(index, t).and_then(|c| c.tangent(t))
    }

    fn anchors(&self) -> Vec<BezierSegment> {
        self.contours.iter().flat_map(Contour::anchors).collect()
    }

    fn intersections(&self, outline: &Outline) -> Vec<Point> {
        let mut hits = Vec::new();
        for (a, b) in outline.edges() {
            if a.distance_to(&b) < 1e-12 {
                continue;
            }
            let edge = LineSegment {
                from: to_lyon(a),
                to: to_lyon(b),
            };
            for curve in &self.curves {
                if curve.straight {
                    let line = LineSegment {
                        from: curve.bezier.from,
                        to: curve.bezier.to,
                    };
                    if let Some(p) = line.intersection(&edge) {
                        hits.push(from_lyon(p));
                    }
                } else {
                    hits.extend(
                        curve
                            .bezier
                            .line_segment_intersections(&edge)
                            .into_iter()
                            .map(from_lyon),
                    );
                }
            }
        }
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: f64) -> VectorPath {
        let mut b = PathBuilder::new();
        b.add_rect(Bounds::new(0.0, 0.0, size, size), 0.0, 0.0);
        b.build()
    }

    #[test]
    fn test_square_sampling() {
        let path = square(10.0);
        assert_eq!(path.curve_count(), 4);
        assert!((path.length() - 40.0).abs() < 1e-9);

        let p = path.point_at(15.0).unwrap();
        assert!((p.x - 10.0).abs() < 1e-9 && (p.y - 5.0).abs() < 1e-9);
        let t = path.tangent_at(15.0).unwrap();
        assert!(t.x.abs() < 1e-9 && (t.y - 1.0).abs() < 1e-9);
        assert!(path.curvature_at(15.0).unwrap().abs() < 1e-9);
        assert!(path.point_at(40.5).is_none());
    }

    #[test]
    fn test_square_anchors_are_corners() {
        let anchors = square(10.0).anchors();
        assert_eq!(anchors.len(), 4);
        assert!(anchors.iter().all(|a| !a.is_smooth()));
        assert_eq!(anchors[2].anchor, Point::new(10.0, 10.0));
    }

    #[test]
    fn test_circle_curvature_and_smooth_anchors() {
        let mut b = PathBuilder::new();
        b.add_ellipse(Point::new(0.0, 0.0), 20.0, 20.0);
        let path = b.build();

        assert!((path.length() - std::f64::consts::TAU * 20.0).abs() < 0.2);
        let k = path.curvature_at(path.length() / 8.0).unwrap();
        assert!((k.abs() - 0.05).abs() < 0.005);
        assert!(path.anchors().iter().all(|a| a.is_smooth()));

        let bounds = path.bounds();
        assert!((bounds.width - 40.0).abs() < 1e-6);
    }

    #[test]
    fn test_intersections_with_outline() {
        let path = square(10.0);
        let crossing = Outline::single(vec![Point::new(-5.0, 5.0), Point::new(15.0, 5.0)]);
        assert_eq!(path.intersections(&crossing).len(), 2);

        let crossing = Outline::single(vec![Point::new(-5.0, 3.0), Point::new(15.0, 3.0)]);
        let mut b = PathBuilder::new();
        b.add_ellipse(Point::new(5.0, 5.0), 5.0, 5.0);
        let circle = b.build();
        assert_eq!(circle.intersections(&crossing).len(), 2);

        let inside = Outline::single(vec![Point::new(4.0, 4.0), Point::new(6.0, 6.0)]);
        assert!(!circle.intersects(&inside));
    }

    #[test]
    fn test_scaled_path() {
        let path = square(10.0).scaled(2.0, 5.0, 5.0);
        let b = path.bounds();
        assert!((b.left - 5.0).abs() < 1e-9 && (b.top - 5.0).abs() < 1e-9);
        assert!((b.width - 20.0).abs() < 1e-9 && (b.height - 20.0).abs() < 1e-9);
        assert!((path.length() - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_open_contour_anchor_handles() {
        let mut b = PathBuilder::new();
        b.move_to(Point::new(0.0, 0.0));
        b.cubic_to(Point::new(0.0, 5.0), Point::new(5.0, 10.0), Point::new(10.0, 10.0));
        b.line_to(Point::new(20.0, 10.0));
        let anchors = b.build().anchors();
        assert_eq!(anchors.len(), 3);
        assert!(anchors[0].has_handle_out && !anchors[0].has_handle_in);
        assert_eq!(anchors[1].handle_in, Point::new(-5.0, 0.0));
        assert!(!anchors[1].has_handle_out);
        assert!(!anchors[2].is_smooth());
    }

    #[test]
    fn test_svg_data_output() {
        assert_eq!(square(10.0).to_svg_data(), "M0 0 L10 0 L10 10 L0 10 L0 0 Z");
    }
}
