//! Grid and safe-zone overlays.

use super::{clipped_line, direction, label, major, OverlayInput};
use crate::gate::RenderContext;
use crate::surface::{OverlaySurface, Primitive};
use brandgeom_core::{Bounds, Point};
use tracing::trace;

const ISO_ANGLES: [f64; 3] = [30.0, 90.0, 150.0];
const ISO_DIVISIONS: f64 = 8.0;
const PIXEL_DIVISIONS: f64 = 16.0;
const MAJOR_EVERY: i64 = 4;

/// Optical centre sits this fraction of the height above the geometric one.
const OPTICAL_LIFT: f64 = 0.05;

pub fn isometric_grid(surface: &mut OverlaySurface, input: &OverlayInput, _ctx: Option<&RenderContext>) {
    let b = input.bounds;
    let step = b.min_side() / ISO_DIVISIONS;
    if !(step > 0.0) {
        trace!("Isometric grid skipped for degenerate bounds");
        return;
    }
    let c = b.center();
    let style = input.base();

    for angle in ISO_ANGLES {
        let dir = direction(-angle);
        let normal = dir.perpendicular();

        let projections = b.corners().map(|p| {
            let v = p - c;
            v.x * normal.x + v.y * normal.y
        });
        let lo = projections.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = projections.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let first = (lo / step).ceil() as i64;
        let last = (hi / step).floor() as i64;
        for k in first..=last {
            let Some(line) = clipped_line(c + normal * (k as f64 * step), dir, &b) else {
                continue;
            };
            if k.rem_euclid(MAJOR_EVERY) == 0 {
                surface.add(line, major(style));
            } else {
                surface.add(line, style.faded(0.5));
            }
        }
    }
}

pub fn pixel_grid(surface: &mut OverlaySurface, input: &OverlayInput, _ctx: Option<&RenderContext>) {
    let b = input.bounds;
    let step = b.min_side() / PIXEL_DIVISIONS;
    if !(step > 0.0) {
        trace!("Pixel grid skipped for degenerate bounds");
        return;
    }
    let style = input.base();
    let minor = style.faded(0.35).dashed(1.0, 2.0);

    let columns = (b.width / step + 1e-9).floor() as i64;
    for i in 0..=columns {
        let x = b.left + step * i as f64;
        let line = Primitive::line(Point::new(x, b.top), Point::new(x, b.bottom()));
        if i % MAJOR_EVERY == 0 {
            surface.add(line, major(style));
            label(surface, Point::new(x + 2.0, b.top - 3.0), i.to_string(), style);
        } else {
            surface.add(line, minor);
        }
    }
    let rows = (b.height / step + 1e-9).floor() as i64;
    for i in 0..=rows {
        let y = b.top + step * i as f64;
        let line = Primitive::line(Point::new(b.left, y), Point::new(b.right(), y));
        if i % MAJOR_EVERY == 0 {
            surface.add(line, major(style));
            label(surface, Point::new(b.left - 14.0, y + 3.0), i.to_string(), style);
        } else {
            surface.add(line, minor);
        }
    }
}

pub fn safe_zones(surface: &mut OverlaySurface, input: &OverlayInput, _ctx: Option<&RenderContext>) {
    let b = input.bounds;
    let style = input.base();
    for (fraction, name, zone_style) in [
        (0.05, "Action safe", style),
        (0.10, "Title safe", style.dashed(4.0, 4.0)),
    ] {
        let (dx, dy) = (b.width * fraction, b.height * fraction);
        let zone = b.expanded_by(-dy, -dx, -dy, -dx);
        if !zone.has_area() {
            continue;
        }
        surface.add(Primitive::Rect(zone), zone_style);
        label(surface, Point::new(zone.left + 3.0, zone.top + 10.0), name, style);
    }
}

pub fn optical_center(surface: &mut OverlaySurface, input: &OverlayInput, _ctx: Option<&RenderContext>) {
    let b = input.bounds;
    let style = input.base();
    let geometric = b.center();
    let optical = Point::new(geometric.x, geometric.y - b.height * OPTICAL_LIFT);
    let arm = b.min_side() * 0.1;

    surface.add(
        Primitive::line(
            Point::new(optical.x - arm, optical.y),
            Point::new(optical.x + arm, optical.y),
        ),
        style,
    );
    surface.add(
        Primitive::line(
            Point::new(optical.x, optical.y - arm),
            Point::new(optical.x, optical.y + arm),
        ),
        style,
    );
    surface.add(Primitive::circle(optical, arm / 2.0), style);
    surface.add(
        Primitive::circle(geometric, 2.0),
        style.faded(0.4).filled(1.0),
    );
}

/// Area-weighted centre of `components`.
fn weighted_centroid(components: &[Bounds]) -> Option<(Point, f64)> {
    let total: f64 = components.iter().map(Bounds::area).sum();
    if !(total > 0.0) {
        return None;
    }
    let sum = components
        .iter()
        .fold(Point::ZERO, |acc, c| acc + c.center() * c.area());
    Some((sum * (1.0 / total), total))
}

pub fn visual_weight_map(
    surface: &mut OverlaySurface,
    input: &OverlayInput,
    _ctx: Option<&RenderContext>,
) {
    let Some((centroid, total)) = weighted_centroid(input.components) else {
        trace!("Visual weight map skipped without components");
        return;
    };
    let style = input.base();
    let scale = input.bounds.min_side() / 2.0;
    for comp in input.components {
        let weight = comp.area() / total;
        surface.add(
            Primitive::circle(comp.center(), weight.sqrt() * scale),
            style.filled(0.3),
        );
        surface.add(Primitive::line(comp.center(), centroid), style.faded(0.35));
    }
    surface.add(Primitive::circle(centroid, 4.0), style.filled(1.0));
}
