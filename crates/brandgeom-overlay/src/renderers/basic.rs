//! Basic shapes: bounding rectangles, circles, centre lines, diagonals and
//! tangent lines.

use super::{gated, OverlayInput};
use crate::gate::RenderContext;
use crate::surface::{OverlaySurface, Primitive};
use brandgeom_core::{Bounds, Point};

/// Centre lines run this far past each edge.
const CENTER_LINE_OVERHANG: f64 = 30.0;

/// Tangent lines span the bounds plus this margin.
const TANGENT_OVERHANG: f64 = 20.0;

pub fn bounding_rects(surface: &mut OverlaySurface, input: &OverlayInput, ctx: Option<&RenderContext>) {
    let base = input.base();
    gated(
        surface,
        Primitive::Rect(input.bounds),
        ctx,
        base.faded(0.7).dashed(4.0, 4.0),
    );
    for b in input.components {
        gated(surface, Primitive::Rect(*b), ctx, base);
    }
}

pub fn circles(surface: &mut OverlaySurface, input: &OverlayInput, ctx: Option<&RenderContext>) {
    let base = input.base();
    for b in input.components {
        let center = b.center();
        gated(surface, Primitive::circle(center, b.min_side() / 2.0), ctx, base);
        gated(
            surface,
            Primitive::circle(center, b.width.hypot(b.height) / 2.0),
            ctx,
            base.faded(0.6).dashed(4.0, 4.0),
        );
    }
}

pub fn center_lines(surface: &mut OverlaySurface, input: &OverlayInput, ctx: Option<&RenderContext>) {
    let b = input.bounds;
    let c = b.center();
    let base = input.base();
    gated(
        surface,
        Primitive::line(
            Point::new(c.x, b.top - CENTER_LINE_OVERHANG),
            Point::new(c.x, b.bottom() + CENTER_LINE_OVERHANG),
        ),
        ctx,
        base,
    );
    gated(
        surface,
        Primitive::line(
            Point::new(b.left - CENTER_LINE_OVERHANG, c.y),
            Point::new(b.right() + CENTER_LINE_OVERHANG, c.y),
        ),
        ctx,
        base,
    );
}

fn diagonals_of(b: &Bounds) -> [Primitive; 2] {
    let [tl, tr, br, bl] = b.corners();
    [Primitive::line(tl, br), Primitive::line(tr, bl)]
}

pub fn diagonals(surface: &mut OverlaySurface, input: &OverlayInput, ctx: Option<&RenderContext>) {
    let style = input.base().faded(0.5).dashed(6.0, 4.0);
    for b in std::iter::once(&input.bounds).chain(input.components) {
        for line in diagonals_of(b) {
            gated(surface, line, ctx, style);
        }
    }
}

pub fn tangent_lines(surface: &mut OverlaySurface, input: &OverlayInput, ctx: Option<&RenderContext>) {
    let span = input.bounds.expanded(TANGENT_OVERHANG);
    let style = input.base().faded(0.6);
    for b in input.components {
        for y in [b.top, b.bottom()] {
            gated(
                surface,
                Primitive::line(Point::new(span.left, y), Point::new(span.right(), y)),
                ctx,
                style,
            );
        }
        for x in [b.left, b.right()] {
            gated(
                surface,
                Primitive::line(Point::new(x, span.top), Point::new(x, span.bottom())),
                ctx,
                style,
            );
        }
    }
}
