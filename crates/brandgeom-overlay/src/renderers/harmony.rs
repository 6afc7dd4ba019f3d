//! Harmony overlays: root rectangles, modular scale, Fibonacci squares,
//! vesica piscis and the column/baseline divisions.

use super::{gated, label, major, OverlayInput};
use crate::gate::RenderContext;
use crate::subdivision::SquareSubdivision;
use crate::surface::{OverlaySurface, Primitive};
use brandgeom_core::{Bounds, Point, FIBONACCI, PHI};
use tracing::trace;

/// Modular scale stops once a circle exceeds the max side by this factor.
const SCALE_LIMIT: f64 = 1.2;

/// Hard stop for the modular scale when the base is tiny.
const MAX_SCALE_STEPS: i32 = 32;

const BASELINE_DIVISIONS: f64 = 12.0;

/// Every n-th baseline is major.
const BASELINE_MAJOR_EVERY: usize = 4;

fn vertical(x: f64, b: &Bounds) -> Primitive {
    Primitive::line(Point::new(x, b.top), Point::new(x, b.bottom()))
}

pub fn root_rectangles(surface: &mut OverlaySurface, input: &OverlayInput, ctx: Option<&RenderContext>) {
    let b = input.bounds;
    let c = b.center();
    let style = input.base().faded(0.6);
    for n in 2..=5u32 {
        let width = f64::from(n).sqrt() * b.height;
        let rect = Bounds::new(c.x - width / 2.0, b.top, width, b.height);
        if gated(surface, Primitive::Rect(rect), ctx, style).is_some() {
            label(surface, Point::new(rect.left + 2.0, rect.top - 3.0), format!("√{}", n), style);
        }
    }
}

pub fn modular_scale(surface: &mut OverlaySurface, input: &OverlayInput, _ctx: Option<&RenderContext>) {
    let b = input.bounds;
    let base_size = b.min_side() / PHI.powi(3);
    if !(base_size > 0.0) {
        trace!("Modular scale skipped for degenerate bounds");
        return;
    }
    let c = b.center();
    let limit = b.max_side() * SCALE_LIMIT;
    let style = input.base();
    for k in 0..MAX_SCALE_STEPS {
        let diameter = base_size * PHI.powi(k);
        if diameter > limit {
            break;
        }
        let radius = diameter / 2.0;
        if k % 2 == 0 {
            surface.add(Primitive::circle(c, radius), major(style));
            label(
                surface,
                Point::new(c.x + radius + 3.0, c.y),
                format!("{:.0}", diameter),
                style,
            );
        } else {
            surface.add(Primitive::circle(c, radius), style.faded(0.5));
        }
    }
}

pub fn fibonacci_overlay(surface: &mut OverlaySurface, input: &OverlayInput, ctx: Option<&RenderContext>) {
    let style = input.base();
    for step in SquareSubdivision::new(input.bounds) {
        if gated(surface, Primitive::Rect(step.square), ctx, style).is_some() {
            let n = FIBONACCI[step.index % FIBONACCI.len()];
            label(
                surface,
                Point::new(step.square.left + 3.0, step.square.top + 10.0),
                n.to_string(),
                style,
            );
        }
    }
}

pub fn vesica_piscis(surface: &mut OverlaySurface, input: &OverlayInput, ctx: Option<&RenderContext>) {
    let c = input.bounds.center();
    let r = input.bounds.min_side() / 2.0;
    if !(r > 0.0) {
        return;
    }
    let style = input.base();
    gated(surface, Primitive::circle(Point::new(c.x - r / 2.0, c.y), r), ctx, style);
    gated(surface, Primitive::circle(Point::new(c.x + r / 2.0, c.y), r), ctx, style);

    let half = r * 3f64.sqrt() / 2.0;
    gated(
        surface,
        Primitive::line(Point::new(c.x, c.y - half), Point::new(c.x, c.y + half)),
        ctx,
        style.faded(0.6),
    );
}

fn gcd(a: u32, b: u32) -> u32 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// Reduced fractions `k/n` for `n` in `2..=6`, first denominator wins.
fn harmonic_fractions() -> Vec<(u32, u32)> {
    (2..=6u32)
        .flat_map(|n| (1..n).map(move |k| (k, n)))
        .filter(|&(k, n)| gcd(k, n) == 1)
        .collect()
}

pub fn harmonic_divisions(
    surface: &mut OverlaySurface,
    input: &OverlayInput,
    _ctx: Option<&RenderContext>,
) {
    let b = input.bounds;
    let style = input.base();
    for (k, n) in harmonic_fractions() {
        let x = b.left + b.width * f64::from(k) / f64::from(n);
        match n {
            2 => {
                surface.add(vertical(x, &b), major(style));
                label(surface, Point::new(x + 3.0, b.top - 3.0), "1/2", style);
            }
            3 => {
                surface.add(vertical(x, &b), style);
            }
            _ => {
                surface.add(vertical(x, &b), style.faded(0.4));
            }
        }
    }
}

pub fn rule_of_odds(surface: &mut OverlaySurface, input: &OverlayInput, _ctx: Option<&RenderContext>) {
    let b = input.bounds;
    let style = input.base();
    let third = b.width / 3.0;
    surface.add(
        Primitive::Rect(Bounds::new(b.left + third, b.top, third, b.height)),
        style.filled(0.3),
    );
    for k in 1..3 {
        surface.add(vertical(b.left + third * f64::from(k), &b), style);
    }
    let fifth = b.width / 5.0;
    for k in 1..5 {
        surface.add(vertical(b.left + fifth * f64::from(k), &b), style.faded(0.5));
    }
}

pub fn dynamic_baseline(surface: &mut OverlaySurface, input: &OverlayInput, _ctx: Option<&RenderContext>) {
    let b = input.bounds;
    let step = b.min_side() / BASELINE_DIVISIONS;
    if !(step > 0.0) {
        trace!("Baseline grid skipped for degenerate bounds");
        return;
    }
    let style = input.base();
    let count = (b.height / step + 1e-9).floor() as usize;
    for i in 0..=count {
        let y = b.bottom() - step * i as f64;
        let line = Primitive::line(Point::new(b.left, y), Point::new(b.right(), y));
        if i % BASELINE_MAJOR_EVERY == 0 {
            surface.add(line, major(style));
            label(surface, Point::new(b.right() + 4.0, y + 3.0), i.to_string(), style);
        } else {
            surface.add(line, style.faded(0.4));
        }
    }
}
