//! Path analysis overlays
//!
//! These read the imported paths through [`ArtPath`] and only draw when the
//! render context is in real-data mode with at least one path. The one
//! exception is [`bezier_handles`], which works from the anchor list alone.

use super::{chevron, clipped_line, direction, label, OverlayInput};
use crate::gate::RenderContext;
use crate::surface::{OverlaySurface, Primitive};
use brandgeom_core::{circumcircle, line_intersection, ArtPath, Bounds, Outline, Point};
use std::collections::BTreeMap;
use tracing::trace;

/// Tangent samples per path for flow and diagonal detection.
const TANGENT_SAMPLES: usize = 64;

/// Angle bucket width in degrees.
const ANGLE_BUCKET: f64 = 3.0;

const MIN_GROUP_SIZE: usize = 3;

/// Flow-line offsets closer than this collapse into one line.
const OFFSET_MERGE: f64 = 1.0;

/// Diagonals within this many degrees of an axis are ignored.
const AXIS_EXCLUSION: f64 = 10.0;

/// Fitted circles closer than this in centre and radius are duplicates.
const CIRCLE_MERGE: f64 = 3.0;

const MIN_FIT_RADIUS: f64 = 2.0;

const COMB_SAMPLES: usize = 48;

/// Longest comb tooth as a fraction of the bounds' short side.
const COMB_SCALE: f64 = 0.15;

const SKELETON_SCANLINES: usize = 24;

/// Anchor cluster tolerance as a fraction of the bounds.
const CLUSTER_TOLERANCE: f64 = 0.015;

const DIRECTION_ARROWS: usize = 5;

const ARROW_SIZE: f64 = 6.0;

const MARKER_RADIUS: f64 = 3.0;

fn active_paths<'c, 'p>(ctx: Option<&'c RenderContext<'p>>) -> Option<&'c [&'p dyn ArtPath]> {
    ctx.filter(|c| c.is_active()).map(|c| c.actual_paths.as_slice())
}

pub fn bezier_handles(surface: &mut OverlaySurface, input: &OverlayInput) {
    let style = input.base();
    let arm = style.faded(0.6);
    let dot = style.filled(1.0);
    for seg in input.segments {
        for (present, handle) in [
            (seg.has_handle_in, seg.handle_in),
            (seg.has_handle_out, seg.handle_out),
        ] {
            if !present || handle.length() < 1e-9 {
                continue;
            }
            let end = seg.anchor + handle;
            surface.add(Primitive::line(seg.anchor, end), arm);
            surface.add(Primitive::circle(end, 2.0), dot);
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct TangentSample {
    point: Point,
    /// Direction in `[0, 180)` degrees
    angle: f64,
}

fn sample_tangents(paths: &[&dyn ArtPath]) -> Vec<TangentSample> {
    let mut samples = Vec::new();
    for path in paths {
        let length = path.length();
        if !(length > 0.0) {
            continue;
        }
        for i in 0..TANGENT_SAMPLES {
            let offset = length * i as f64 / TANGENT_SAMPLES as f64;
            let (Some(point), Some(t)) = (path.point_at(offset), path.tangent_at(offset)) else {
                continue;
            };
            samples.push(TangentSample {
                point,
                angle: t.angle_degrees().rem_euclid(180.0),
            });
        }
    }
    samples
}

/// Samples grouped by 3° bucket, largest groups first; ties keep the lower
/// angle first. Groups smaller than the minimum are dropped.
fn group_by_angle<'s>(samples: impl Iterator<Item = &'s TangentSample>) -> Vec<(f64, Vec<Point>)> {
    let buckets = (180.0 / ANGLE_BUCKET) as i64;
    let mut groups: BTreeMap<i64, Vec<Point>> = BTreeMap::new();
    for s in samples {
        let key = ((s.angle / ANGLE_BUCKET).round() as i64).rem_euclid(buckets);
        groups.entry(key).or_default().push(s.point);
    }
    let mut groups: Vec<(f64, Vec<Point>)> = groups
        .into_iter()
        .filter(|(_, members)| members.len() >= MIN_GROUP_SIZE)
        .map(|(key, members)| (key as f64 * ANGLE_BUCKET, members))
        .collect();
    groups.sort_by(|a, b| b.1.len().cmp(&a.1.len()));
    groups
}

pub fn parallel_flow_lines(
    surface: &mut OverlaySurface,
    input: &OverlayInput,
    ctx: Option<&RenderContext>,
) {
    let Some(paths) = active_paths(ctx) else {
        return;
    };
    let samples = sample_tangents(paths);
    let style = input.base();
    for (rank, (angle, members)) in group_by_angle(samples.iter()).into_iter().take(3).enumerate() {
        let dir = direction(angle);
        let normal = dir.perpendicular();
        let mut offsets: Vec<f64> = members
            .iter()
            .map(|p| p.x * normal.x + p.y * normal.y)
            .collect();
        offsets.sort_by(|a, b| a.total_cmp(b));
        offsets.dedup_by(|a, b| (*a - *b).abs() < OFFSET_MERGE);

        let line_style = if rank == 0 { style } else { style.faded(0.5) };
        for offset in offsets {
            if let Some(line) = clipped_line(normal * offset, dir, &input.bounds) {
                surface.add(line, line_style);
            }
        }
    }
}

pub fn underlying_circles(
    surface: &mut OverlaySurface,
    input: &OverlayInput,
    ctx: Option<&RenderContext>,
) {
    let Some(paths) = active_paths(ctx) else {
        return;
    };
    let max_radius = input.bounds.max_side() * 2.0;
    let style = input.base().faded(0.6).dashed(4.0, 4.0);
    let mut found: Vec<(Point, f64)> = Vec::new();

    for path in paths {
        for i in 0..path.curve_count() {
            let (Some(a), Some(b), Some(c)) = (
                path.curve_point(i, 0.05),
                path.curve_point(i, 0.5),
                path.curve_point(i, 0.95),
            ) else {
                continue;
            };
            let Some((center, radius)) = circumcircle(a, b, c) else {
                trace!("Curve {} is straight, no circle fit", i);
                continue;
            };
            if !(MIN_FIT_RADIUS..=max_radius).contains(&radius) {
                continue;
            }
            let duplicate = found.iter().any(|(fc, fr)| {
                fc.distance_to(&center) < CIRCLE_MERGE && (fr - radius).abs() < CIRCLE_MERGE
            });
            if duplicate {
                continue;
            }
            found.push((center, radius));
            surface.add(Primitive::circle(center, radius), style);
        }
    }
}

fn near_axis(angle: f64) -> bool {
    let m = angle.rem_euclid(90.0);
    m.min(90.0 - m) < AXIS_EXCLUSION
}

pub fn dominant_diagonals(
    surface: &mut OverlaySurface,
    input: &OverlayInput,
    ctx: Option<&RenderContext>,
) {
    let Some(paths) = active_paths(ctx) else {
        return;
    };
    let samples = sample_tangents(paths);
    let style = input.base();
    let diagonal = samples.iter().filter(|s| !near_axis(s.angle));
    for (angle, members) in group_by_angle(diagonal).into_iter().take(2) {
        let sum = members.iter().fold(Point::ZERO, |acc, p| acc + *p);
        let mean = sum * (1.0 / members.len() as f64);
        if let Some(line) = clipped_line(mean, direction(angle), &input.bounds) {
            surface.add(line, style);
            label(
                surface,
                Point::new(mean.x + 4.0, mean.y - 4.0),
                format!("{:.0}°", angle),
                style,
            );
        }
    }
}

pub fn curvature_comb(surface: &mut OverlaySurface, input: &OverlayInput, ctx: Option<&RenderContext>) {
    let Some(paths) = active_paths(ctx) else {
        return;
    };
    let style = input.base();
    let reach = input.bounds.min_side() * COMB_SCALE;

    for path in paths {
        let length = path.length();
        let samples: Vec<(Point, Point, f64)> = (0..COMB_SAMPLES)
            .filter_map(|i| {
                let offset = length * i as f64 / COMB_SAMPLES as f64;
                Some((
                    path.point_at(offset)?,
                    path.normal_at(offset)?,
                    path.curvature_at(offset)?,
                ))
            })
            .collect();
        let peak = samples.iter().map(|(_, _, k)| k.abs()).fold(0.0, f64::max);
        if !(peak > 1e-12) {
            trace!("Flat path, no curvature comb");
            continue;
        }
        let scale = reach / peak;
        let tips: Vec<Point> = samples
            .iter()
            .map(|(p, n, k)| *p + *n * (k * scale))
            .collect();
        for ((p, _, _), tip) in samples.iter().zip(&tips) {
            surface.add(Primitive::line(*p, *tip), style.faded(0.5));
        }
        surface.add(
            Primitive::Polyline {
                points: tips,
                closed: false,
            },
            style,
        );
    }
}

/// Midpoint of the widest inside span along a scanline.
fn widest_span_midpoint(mut xs: Vec<f64>) -> Option<f64> {
    xs.sort_by(|a, b| a.total_cmp(b));
    xs.dedup_by(|a, b| (*a - *b).abs() < 1e-6);
    xs.chunks_exact(2)
        .map(|pair| (pair[1] - pair[0], (pair[0] + pair[1]) / 2.0))
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, mid)| mid)
}

pub fn skeleton_centerline(
    surface: &mut OverlaySurface,
    input: &OverlayInput,
    ctx: Option<&RenderContext>,
) {
    let Some(paths) = active_paths(ctx) else {
        return;
    };
    let style = input.base();
    for path in paths {
        let pb = path.bounds();
        if !pb.has_area() {
            continue;
        }
        let mut spine = Vec::new();
        for i in 1..=SKELETON_SCANLINES {
            let y = pb.top + pb.height * i as f64 / (SKELETON_SCANLINES + 1) as f64;
            let scan = Outline::single(vec![
                Point::new(pb.left - 1.0, y),
                Point::new(pb.right() + 1.0, y),
            ]);
            let xs = path.intersections(&scan).into_iter().map(|p| p.x).collect();
            if let Some(x) = widest_span_midpoint(xs) {
                spine.push(Point::new(x, y));
            }
        }
        if spine.len() >= 2 {
            surface.add(
                Primitive::Polyline {
                    points: spine,
                    closed: false,
                },
                style,
            );
        }
    }
}

/// Mean of each run of sorted values whose neighbours are within `tolerance`,
/// keeping runs with at least two members. A run never spans more than
/// `2 * tolerance`, so evenly spaced values do not chain into one cluster.
fn clusters(mut values: Vec<f64>, tolerance: f64) -> Vec<f64> {
    values.sort_by(|a, b| a.total_cmp(b));
    let mut out = Vec::new();
    let mut run: Vec<f64> = Vec::new();
    for v in values {
        if let (Some(first), Some(last)) = (run.first(), run.last()) {
            if v - last > tolerance || v - first > 2.0 * tolerance {
                if run.len() >= 2 {
                    out.push(run.iter().sum::<f64>() / run.len() as f64);
                }
                run.clear();
            }
        }
        run.push(v);
    }
    if run.len() >= 2 {
        out.push(run.iter().sum::<f64>() / run.len() as f64);
    }
    out
}

pub fn anchor_clusters(surface: &mut OverlaySurface, input: &OverlayInput, ctx: Option<&RenderContext>) {
    let Some(paths) = active_paths(ctx) else {
        return;
    };
    let b = input.bounds;
    let anchors: Vec<Point> = paths
        .iter()
        .flat_map(|p| p.anchors())
        .map(|s| s.anchor)
        .collect();
    let style = input.base().dashed(3.0, 3.0);

    let xs = anchors.iter().map(|p| p.x).collect();
    for x in clusters(xs, b.width * CLUSTER_TOLERANCE) {
        surface.add(
            Primitive::line(Point::new(x, b.top), Point::new(x, b.bottom())),
            style,
        );
    }
    let ys = anchors.iter().map(|p| p.y).collect();
    for y in clusters(ys, b.height * CLUSTER_TOLERANCE) {
        surface.add(
            Primitive::line(Point::new(b.left, y), Point::new(b.right(), y)),
            style,
        );
    }
}

pub fn path_direction(surface: &mut OverlaySurface, input: &OverlayInput, ctx: Option<&RenderContext>) {
    let Some(paths) = active_paths(ctx) else {
        return;
    };
    let style = input.base();
    for path in paths {
        let length = path.length();
        if !(length > 0.0) {
            continue;
        }
        if let Some(start) = path.point_at(0.0) {
            surface.add(Primitive::circle(start, MARKER_RADIUS), style.filled(1.0));
        }
        for j in 0..DIRECTION_ARROWS {
            let offset = length * (j as f64 + 0.5) / DIRECTION_ARROWS as f64;
            let (Some(p), Some(t)) = (path.point_at(offset), path.tangent_at(offset)) else {
                continue;
            };
            if let Some(head) = chevron(p + t * (ARROW_SIZE / 2.0), t, ARROW_SIZE) {
                surface.add(head, style);
            }
        }
    }
}

pub fn tangent_intersections(
    surface: &mut OverlaySurface,
    input: &OverlayInput,
    ctx: Option<&RenderContext>,
) {
    let Some(paths) = active_paths(ctx) else {
        return;
    };
    let b = input.bounds;
    let limit = b.expanded_by(b.height * 0.25, b.width * 0.25, b.height * 0.25, b.width * 0.25);
    let style = input.base();
    let leg = style.faded(0.5).dashed(2.0, 3.0);

    for path in paths {
        for i in 0..path.curve_count() {
            let (Some(p0), Some(t0), Some(p1), Some(t1)) = (
                path.curve_point(i, 0.05),
                path.curve_tangent(i, 0.05),
                path.curve_point(i, 0.95),
                path.curve_tangent(i, 0.95),
            ) else {
                continue;
            };
            let Some(apex) = line_intersection(p0, t0, p1, t1) else {
                continue;
            };
            if !limit.contains(&apex) {
                trace!("Tangent apex of curve {} outside limits", i);
                continue;
            }
            surface.add(Primitive::line(p0, apex), leg);
            surface.add(Primitive::line(p1, apex), leg);
            surface.add(Primitive::circle(apex, 2.5), style.filled(1.0));
        }
    }
}

pub fn anchor_points(surface: &mut OverlaySurface, input: &OverlayInput, ctx: Option<&RenderContext>) {
    let Some(paths) = active_paths(ctx) else {
        return;
    };
    let style = input.base();
    for seg in paths.iter().flat_map(|p| p.anchors()) {
        let a = seg.anchor;
        if seg.is_smooth() {
            surface.add(Primitive::circle(a, MARKER_RADIUS), style);
        } else {
            let s = MARKER_RADIUS;
            surface.add(
                Primitive::Rect(Bounds::new(a.x - s, a.y - s, 2.0 * s, 2.0 * s)),
                style,
            );
        }
    }
}
