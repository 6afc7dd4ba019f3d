//! Proportion overlays built on φ and thirds.

use super::{gated, label, OverlayInput};
use crate::gate::RenderContext;
use crate::subdivision::SquareSubdivision;
use crate::surface::{OverlaySurface, Primitive};
use brandgeom_core::{Bounds, Point, PHI};
use tracing::trace;

const GOLDEN_CIRCLE_COUNT: i32 = 5;

/// Typographic guides reach this far past the bounds.
const TYPO_OVERHANG: f64 = 10.0;

fn vertical(x: f64, b: &Bounds) -> Primitive {
    Primitive::line(Point::new(x, b.top), Point::new(x, b.bottom()))
}

fn horizontal(y: f64, b: &Bounds) -> Primitive {
    Primitive::line(Point::new(b.left, y), Point::new(b.right(), y))
}

pub fn golden_ratio(surface: &mut OverlaySurface, input: &OverlayInput, ctx: Option<&RenderContext>) {
    let b = input.bounds;
    let base = input.base();
    let (dx, dy) = (b.width / PHI, b.height / PHI);
    let candidates = [
        vertical(b.left + dx, &b),
        vertical(b.right() - dx, &b),
        horizontal(b.top + dy, &b),
        horizontal(b.bottom() - dy, &b),
    ];
    let kept = candidates
        .into_iter()
        .filter_map(|line| gated(surface, line, ctx, base))
        .count();
    if kept > 0 {
        label(
            surface,
            Point::new(b.left + dx + 4.0, b.top - 4.0),
            "φ",
            base.faded(0.8),
        );
    }
}

/// Largest landscape golden rectangle that fits the bounds, centred.
fn golden_rect(b: &Bounds) -> Bounds {
    let width = b.width.min(b.height * PHI);
    let height = width / PHI;
    let c = b.center();
    Bounds::new(c.x - width / 2.0, c.y - height / 2.0, width, height)
}

pub fn golden_spiral(surface: &mut OverlaySurface, input: &OverlayInput, ctx: Option<&RenderContext>) {
    let base = input.base();
    let outer = golden_rect(&input.bounds);
    if !outer.has_area() {
        trace!("Golden spiral skipped for degenerate bounds");
        return;
    }
    surface.add(Primitive::Rect(outer), base);

    let square_style = base.faded(0.3);
    for step in SquareSubdivision::new(outer) {
        surface.add(Primitive::Rect(step.square), square_style);
        gated(
            surface,
            Primitive::Arc {
                center: step.arc.center,
                radius: step.arc.radius,
                start_deg: step.arc.start_deg,
                sweep_deg: step.arc.sweep_deg,
            },
            ctx,
            base,
        );
    }
}

pub fn rule_of_thirds(surface: &mut OverlaySurface, input: &OverlayInput, ctx: Option<&RenderContext>) {
    let b = input.bounds;
    let base = input.base();
    let xs = [b.left + b.width / 3.0, b.left + 2.0 * b.width / 3.0];
    let ys = [b.top + b.height / 3.0, b.top + 2.0 * b.height / 3.0];
    for x in xs {
        gated(surface, vertical(x, &b), ctx, base);
    }
    for y in ys {
        gated(surface, horizontal(y, &b), ctx, base);
    }

    let radius = b.min_side() * 0.02;
    let dot = base.faded(0.5).filled(1.0);
    for x in xs {
        for y in ys {
            surface.add(Primitive::circle(Point::new(x, y), radius), dot);
        }
    }
}

pub fn golden_circles(surface: &mut OverlaySurface, input: &OverlayInput, ctx: Option<&RenderContext>) {
    let center = input.bounds.center();
    let base = input.base();
    let mut radius = input.bounds.min_side() / 2.0;
    for k in 0..GOLDEN_CIRCLE_COUNT {
        gated(
            surface,
            Primitive::circle(center, radius),
            ctx,
            base.faded(0.8f64.powi(k)),
        );
        radius /= PHI;
    }
}

pub fn typographic_proportions(
    surface: &mut OverlaySurface,
    input: &OverlayInput,
    ctx: Option<&RenderContext>,
) {
    let b = input.bounds;
    let base = input.base();
    let guides = [
        ("Cap height", b.top),
        ("x-height", b.bottom() - b.height / PHI),
        ("Median", b.center().y),
        ("Baseline", b.bottom()),
    ];
    let (x0, x1) = (b.left - TYPO_OVERHANG, b.right() + TYPO_OVERHANG);
    for (name, y) in guides {
        let line = Primitive::line(Point::new(x0, y), Point::new(x1, y));
        if gated(surface, line, ctx, base).is_some() {
            label(surface, Point::new(x1 + 4.0, y + 3.0), name, base.faded(0.8));
        }
    }
}
