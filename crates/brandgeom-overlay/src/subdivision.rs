//! Recursive square subdivision
//!
//! Cuts a square of side `min(w, h)` off the longer dimension of the remaining
//! rectangle on each step. The cut edge rotates left, top, right, bottom; when
//! the next edge in the rotation lies across the short dimension it is skipped
//! for the following one. Each step carries the quarter arc that traces the
//! golden spiral through its square. The sequence is lazy, finite, and
//! restartable by cloning.

use brandgeom_core::{Bounds, Point};

/// Maximum number of steps produced.
pub const MAX_STEPS: usize = 12;

/// Steps stop once the remaining rectangle's short side falls below this.
pub const MIN_SIDE: f64 = 0.5;

/// Edge of the remaining rectangle a square is cut from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Top,
    Right,
    Bottom,
}

impl Edge {
    fn next(self) -> Self {
        match self {
            Edge::Left => Edge::Top,
            Edge::Top => Edge::Right,
            Edge::Right => Edge::Bottom,
            Edge::Bottom => Edge::Left,
        }
    }

    /// Left and right cuts shorten the width.
    fn cuts_width(self) -> bool {
        matches!(self, Edge::Left | Edge::Right)
    }
}

/// Quarter arc in surface angle convention (degrees, +x towards +y).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuarterArc {
    pub center: Point,
    pub radius: f64,
    pub start_deg: f64,
    pub sweep_deg: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubdivisionStep {
    pub index: usize,
    pub square: Bounds,
    pub edge: Edge,
    pub arc: QuarterArc,
}

#[derive(Debug, Clone)]
pub struct SquareSubdivision {
    remaining: Bounds,
    edge: Edge,
    index: usize,
}

impl SquareSubdivision {
    pub fn new(rect: Bounds) -> Self {
        Self {
            remaining: rect,
            edge: Edge::Left,
            index: 0,
        }
    }
}

impl Iterator for SquareSubdivision {
    type Item = SubdivisionStep;

    fn next(&mut self) -> Option<SubdivisionStep> {
        let r = self.remaining;
        if self.index >= MAX_STEPS || !(r.min_side() >= MIN_SIDE) {
            return None;
        }
        let s = r.min_side();
        let (x, y) = (r.left, r.top);
        let edge = if self.edge.cuts_width() == (r.width >= r.height) {
            self.edge
        } else {
            self.edge.next()
        };

        let (square, arc_center, start_deg, remaining) = match edge {
            Edge::Left => (
                Bounds::new(x, y, s, s),
                Point::new(x + s, y + s),
                180.0,
                Bounds::new(x + s, y, r.width - s, r.height),
            ),
            Edge::Top => (
                Bounds::new(r.right() - s, y, s, s),
                Point::new(r.right() - s, y + s),
                270.0,
                Bounds::new(x, y + s, r.width, r.height - s),
            ),
            Edge::Right => (
                Bounds::new(r.right() - s, r.bottom() - s, s, s),
                Point::new(r.right() - s, r.bottom() - s),
                0.0,
                Bounds::new(x, y, r.width - s, r.height),
            ),
            Edge::Bottom => (
                Bounds::new(x, r.bottom() - s, s, s),
                Point::new(x + s, r.bottom() - s),
                90.0,
                Bounds::new(x, y, r.width, r.height - s),
            ),
        };

        let step = SubdivisionStep {
            index: self.index,
            square,
            edge,
            arc: QuarterArc {
                center: arc_center,
                radius: s,
                start_deg,
                sweep_deg: 90.0,
            },
        };
        self.remaining = remaining;
        self.edge = edge.next();
        self.index += 1;
        Some(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandgeom_core::PHI;
    use proptest::prelude::*;

    #[test]
    fn test_golden_rectangle_cycles_edges() {
        let steps: Vec<_> = SquareSubdivision::new(Bounds::new(0.0, 0.0, 100.0 * PHI, 100.0)).collect();
        assert_eq!(steps.len(), MAX_STEPS);
        assert_eq!(steps[0].edge, Edge::Left);
        assert_eq!(steps[1].edge, Edge::Top);
        assert_eq!(steps[2].edge, Edge::Right);
        assert_eq!(steps[3].edge, Edge::Bottom);
        assert_eq!(steps[4].edge, Edge::Left);
        assert_eq!(steps[0].square, Bounds::new(0.0, 0.0, 100.0, 100.0));
        assert!((steps[1].square.width - 100.0 / PHI).abs() < 1e-9);
    }

    #[test]
    fn test_arcs_connect_square_corners() {
        for step in SquareSubdivision::new(Bounds::new(0.0, 0.0, 161.8, 100.0)).take(4) {
            let QuarterArc {
                center,
                radius,
                start_deg,
                sweep_deg,
            } = step.arc;
            let at = |deg: f64| {
                let a = f64::to_radians(deg);
                Point::new(center.x + radius * a.cos(), center.y + radius * a.sin())
            };
            let corners = step.square.corners();
            let near_corner =
                |p: Point| corners.iter().any(|c| c.distance_to(&p) < 1e-6);
            assert!(near_corner(at(start_deg)));
            assert!(near_corner(at(start_deg + sweep_deg)));
        }
    }

    fn assert_tiles_within(rect: Bounds, steps: &[SubdivisionStep]) {
        for (i, a) in steps.iter().enumerate() {
            let sq = a.square;
            assert!(sq.left >= rect.left - 1e-9 && sq.top >= rect.top - 1e-9);
            assert!(sq.right() <= rect.right() + 1e-9 && sq.bottom() <= rect.bottom() + 1e-9);
            for b in &steps[i + 1..] {
                let o = b.square;
                let overlap_w = sq.right().min(o.right()) - sq.left.max(o.left);
                let overlap_h = sq.bottom().min(o.bottom()) - sq.top.max(o.top);
                assert!(overlap_w <= 1e-9 || overlap_h <= 1e-9);
            }
        }
    }

    #[test]
    fn test_wide_rect_cuts_width() {
        let rect = Bounds::new(0.0, 0.0, 300.0, 100.0);
        let steps: Vec<_> = SquareSubdivision::new(rect).collect();
        let edges: Vec<_> = steps.iter().map(|s| s.edge).collect();
        assert_eq!(edges, vec![Edge::Left, Edge::Right, Edge::Left]);
        assert!(steps.iter().all(|s| s.square.width == 100.0));
        assert_tiles_within(rect, &steps);
    }

    #[test]
    fn test_portrait_rect_cuts_height() {
        let rect = Bounds::new(0.0, 0.0, 100.0, 300.0);
        let steps: Vec<_> = SquareSubdivision::new(rect).collect();
        let edges: Vec<_> = steps.iter().map(|s| s.edge).collect();
        assert_eq!(edges, vec![Edge::Top, Edge::Bottom, Edge::Left]);
        assert_tiles_within(rect, &steps);
    }

    #[test]
    fn test_golden_portrait_runs_full_length() {
        let rect = Bounds::new(10.0, 20.0, 100.0, 100.0 * PHI);
        let steps: Vec<_> = SquareSubdivision::new(rect).collect();
        assert_eq!(steps.len(), MAX_STEPS);
        assert_eq!(steps[0].edge, Edge::Top);
        assert_eq!(steps[0].square, Bounds::new(10.0, 20.0, 100.0, 100.0));
        assert!((steps[1].square.width - 100.0 / PHI).abs() < 1e-9);
        assert!(steps.windows(2).all(|w| w[1].square.width <= w[0].square.width + 1e-9));
        assert_tiles_within(rect, &steps);
    }

    #[test]
    fn test_square_rect_is_one_step() {
        let steps: Vec<_> = SquareSubdivision::new(Bounds::new(0.0, 0.0, 100.0, 100.0)).collect();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].square, Bounds::new(0.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn test_degenerate_rect_yields_nothing() {
        assert_eq!(SquareSubdivision::new(Bounds::new(0.0, 0.0, 100.0, 0.2)).count(), 0);
        assert_eq!(SquareSubdivision::new(Bounds::default()).count(), 0);
    }

    #[test]
    fn test_restartable_by_clone() {
        let seq = SquareSubdivision::new(Bounds::new(0.0, 0.0, 30.0, 20.0));
        let first: Vec<_> = seq.clone().collect();
        let second: Vec<_> = seq.collect();
        assert_eq!(first, second);
    }

    proptest! {
        #[test]
        fn prop_terminates_within_limit(w in 0.0f64..5000.0, h in 0.0f64..5000.0) {
            let steps: Vec<_> = SquareSubdivision::new(Bounds::new(0.0, 0.0, w, h)).collect();
            prop_assert!(steps.len() <= MAX_STEPS);
            for s in &steps {
                prop_assert!(s.square.width >= MIN_SIDE);
                prop_assert_eq!(s.square.width, s.square.height);
            }
        }
    }
}
