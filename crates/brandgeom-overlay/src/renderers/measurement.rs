//! Measurement overlays: symmetry, angles, spacing and alignment between
//! components.
//!
//! Spacing and alignment describe the gaps between components, so they are
//! drawn whether or not they touch the artwork.

use super::{chevron, gated, label, OverlayInput};
use crate::gate::RenderContext;
use crate::surface::{OverlaySurface, Primitive};
use brandgeom_core::{Bounds, Point};

/// Gaps at or below this are not annotated.
const MIN_GAP: f64 = 5.0;

/// Edges closer than this count as aligned.
const ALIGN_TOLERANCE: f64 = 3.0;

const ARROW_SIZE: f64 = 4.0;

const GUIDE_OVERHANG: f64 = 10.0;

pub fn symmetry_axes(surface: &mut OverlaySurface, input: &OverlayInput, ctx: Option<&RenderContext>) {
    let b = input.bounds;
    let c = b.center();
    let axis = input.base().dashed(8.0, 4.0);
    gated(
        surface,
        Primitive::line(Point::new(c.x, b.top), Point::new(c.x, b.bottom())),
        ctx,
        axis,
    );
    gated(
        surface,
        Primitive::line(Point::new(b.left, c.y), Point::new(b.right(), c.y)),
        ctx,
        axis,
    );
    for comp in input.components {
        let x = comp.center().x;
        gated(
            surface,
            Primitive::line(Point::new(x, comp.top), Point::new(x, comp.bottom())),
            ctx,
            axis.faded(0.7),
        );
    }
}

pub fn angle_measurements(
    surface: &mut OverlaySurface,
    input: &OverlayInput,
    ctx: Option<&RenderContext>,
) {
    let base = input.base();
    for comp in input.components {
        let origin = Point::new(comp.left, comp.bottom());
        let diagonal = Primitive::line(origin, Point::new(comp.right(), comp.top));
        if gated(surface, diagonal, ctx, base).is_none() {
            continue;
        }
        let theta = comp.height.atan2(comp.width).to_degrees();
        let radius = comp.min_side() * 0.2;
        surface.add(
            Primitive::Arc {
                center: origin,
                radius,
                start_deg: -theta,
                sweep_deg: theta,
            },
            base,
        );
        label(
            surface,
            Point::new(origin.x + radius + 4.0, origin.y - 4.0),
            format!("{:.1}°", theta),
            base,
        );
    }
}

/// Dimension line from `a` to `b` with arrowheads at both ends.
fn dimension(surface: &mut OverlaySurface, a: Point, b: Point, text: String, input: &OverlayInput) {
    let style = input.base();
    surface.add(Primitive::line(a, b), style);
    if let Some(head) = chevron(a, a - b, ARROW_SIZE) {
        surface.add(head, style);
    }
    if let Some(head) = chevron(b, b - a, ARROW_SIZE) {
        surface.add(head, style);
    }
    let mid = a.lerp(&b, 0.5);
    label(surface, Point::new(mid.x + 3.0, mid.y - 3.0), text, style);
}

pub fn spacing_guides(surface: &mut OverlaySurface, input: &OverlayInput, _ctx: Option<&RenderContext>) {
    let comps = input.components;
    for (i, a) in comps.iter().enumerate() {
        for b in &comps[i + 1..] {
            let (first, second) = if a.left <= b.left { (a, b) } else { (b, a) };
            let gap = second.left - first.right();
            if gap > MIN_GAP {
                let y = (a.center().y + b.center().y) / 2.0;
                dimension(
                    surface,
                    Point::new(first.right(), y),
                    Point::new(second.left, y),
                    format!("{}", gap.round()),
                    input,
                );
            }

            let (upper, lower) = if a.top <= b.top { (a, b) } else { (b, a) };
            let gap = lower.top - upper.bottom();
            if gap > MIN_GAP {
                let x = (a.center().x + b.center().x) / 2.0;
                dimension(
                    surface,
                    Point::new(x, upper.bottom()),
                    Point::new(x, lower.top),
                    format!("{}", gap.round()),
                    input,
                );
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Axis {
    Vertical,
    Horizontal,
}

fn alignments(a: &Bounds, b: &Bounds) -> [(Axis, f64, f64); 6] {
    use Axis::*;
    [
        (Vertical, a.left, b.left),
        (Vertical, a.right(), b.right()),
        (Vertical, a.center().x, b.center().x),
        (Horizontal, a.top, b.top),
        (Horizontal, a.bottom(), b.bottom()),
        (Horizontal, a.center().y, b.center().y),
    ]
}

pub fn alignment_guides(
    surface: &mut OverlaySurface,
    input: &OverlayInput,
    _ctx: Option<&RenderContext>,
) {
    let style = input.base().dashed(2.0, 2.0);
    let comps = input.components;
    for (i, a) in comps.iter().enumerate() {
        for b in &comps[i + 1..] {
            let span = a.union(b).expanded(GUIDE_OVERHANG);
            for (axis, u, v) in alignments(a, b) {
                if (u - v).abs() > ALIGN_TOLERANCE {
                    continue;
                }
                let at = (u + v) / 2.0;
                let line = match axis {
                    Axis::Vertical => {
                        Primitive::line(Point::new(at, span.top), Point::new(at, span.bottom()))
                    }
                    Axis::Horizontal => {
                        Primitive::line(Point::new(span.left, at), Point::new(span.right(), at))
                    }
                };
                surface.add(line, style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderers::test_support::*;

    #[test]
    fn test_symmetry_axes_count() {
        let style = style();
        let comps = [Bounds::new(0.0, 0.0, 10.0, 10.0), Bounds::new(20.0, 0.0, 10.0, 10.0)];
        let b = comps[0].union(&comps[1]);
        let mut surface = OverlaySurface::new();
        symmetry_axes(&mut surface, &input(b, &comps, &style), None);
        assert_eq!(surface.len(), 4);
        assert!(surface.items().all(|i| i.style.dash == Some([8.0, 4.0])));
    }

    #[test]
    fn test_angle_label_for_square_is_45() {
        let style = style();
        let comps = [Bounds::new(0.0, 0.0, 50.0, 50.0)];
        let mut surface = OverlaySurface::new();
        angle_measurements(&mut surface, &input(comps[0], &comps, &style), None);
        let text: Vec<_> = surface
            .items()
            .filter_map(|i| match &i.primitive {
                Primitive::Text { content, .. } => Some(content.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(text, vec!["45.0°".to_string()]);
    }

    #[test]
    fn test_spacing_skips_small_gaps() {
        let style = style();
        let comps = [
            Bounds::new(0.0, 0.0, 10.0, 10.0),
            Bounds::new(14.0, 0.0, 10.0, 10.0),
            Bounds::new(50.0, 0.0, 10.0, 10.0),
        ];
        let b = Bounds::new(0.0, 0.0, 60.0, 10.0);
        let mut surface = OverlaySurface::new();
        spacing_guides(&mut surface, &input(b, &comps, &style), None);
        let labels: Vec<_> = surface
            .items()
            .filter_map(|i| match &i.primitive {
                Primitive::Text { content, .. } => Some(content.clone()),
                _ => None,
            })
            .collect();
        // 0-1 gap is 4 (skipped), 0-2 is 40, 1-2 is 26
        assert_eq!(labels, vec!["40".to_string(), "26".to_string()]);
    }

    #[test]
    fn test_alignment_within_tolerance() {
        let style = style();
        let comps = [Bounds::new(0.0, 0.0, 10.0, 10.0), Bounds::new(2.0, 40.0, 10.0, 30.0)];
        let b = comps[0].union(&comps[1]);
        let mut surface = OverlaySurface::new();
        alignment_guides(&mut surface, &input(b, &comps, &style), None);
        // left, right and centre x align; nothing horizontal does
        assert_eq!(surface.len(), 3);
        match &surface.items().next().unwrap().primitive {
            Primitive::Line { from, .. } => assert_eq!(from.x, 1.0),
            other => panic!("unexpected {:?}", other),
        };
    }
}
