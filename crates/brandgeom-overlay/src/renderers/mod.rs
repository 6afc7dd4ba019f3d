//! Overlay renderers
//!
//! One function per [`OverlayKind`], grouped by family. A renderer reads the
//! framed artwork measurements from [`OverlayInput`], builds candidate
//! primitives and adds them to the surface, either directly (decorative
//! elements) or through the real-data gate.

pub mod analysis;
pub mod basic;
pub mod grid;
pub mod guides;
pub mod harmony;
pub mod measurement;
pub mod proportion;

use crate::gate::{show_if_intersects, RenderContext};
use crate::surface::{ItemId, OverlaySurface, Primitive, PrimitiveStyle};
use brandgeom_core::{clip_line_to_rect, BezierSegment, Bounds, Point};
use brandgeom_settings::{OverlayKind, StyleConfig};
use tracing::debug;

const MAJOR_WEIGHT: f64 = 1.5;

/// Everything a renderer reads, in surface coordinates.
#[derive(Debug, Clone, Copy)]
pub struct OverlayInput<'a> {
    /// Union of all component bounds
    pub bounds: Bounds,
    /// Per-component bounds, in document order
    pub components: &'a [Bounds],
    /// Anchors of every component
    pub segments: &'a [BezierSegment],
    pub style: &'a StyleConfig,
}

impl OverlayInput<'_> {
    /// Solid stroke in the configured style.
    pub fn base(&self) -> PrimitiveStyle {
        PrimitiveStyle::from_config(self.style)
    }
}

/// Run the renderer for `kind`.
pub fn render_overlay(
    kind: OverlayKind,
    surface: &mut OverlaySurface,
    input: &OverlayInput,
    ctx: Option<&RenderContext>,
) {
    let before = surface.len();
    use OverlayKind::*;
    match kind {
        BoundingRects => basic::bounding_rects(surface, input, ctx),
        Circles => basic::circles(surface, input, ctx),
        CenterLines => basic::center_lines(surface, input, ctx),
        Diagonals => basic::diagonals(surface, input, ctx),
        TangentLines => basic::tangent_lines(surface, input, ctx),
        GoldenRatio => proportion::golden_ratio(surface, input, ctx),
        GoldenSpiral => proportion::golden_spiral(surface, input, ctx),
        RuleOfThirds => proportion::rule_of_thirds(surface, input, ctx),
        GoldenCircles => proportion::golden_circles(surface, input, ctx),
        TypographicProportions => proportion::typographic_proportions(surface, input, ctx),
        SymmetryAxes => measurement::symmetry_axes(surface, input, ctx),
        AngleMeasurements => measurement::angle_measurements(surface, input, ctx),
        SpacingGuides => measurement::spacing_guides(surface, input, ctx),
        AlignmentGuides => measurement::alignment_guides(surface, input, ctx),
        RootRectangles => harmony::root_rectangles(surface, input, ctx),
        ModularScale => harmony::modular_scale(surface, input, ctx),
        FibonacciOverlay => harmony::fibonacci_overlay(surface, input, ctx),
        VesicaPiscis => harmony::vesica_piscis(surface, input, ctx),
        HarmonicDivisions => harmony::harmonic_divisions(surface, input, ctx),
        RuleOfOdds => harmony::rule_of_odds(surface, input, ctx),
        DynamicBaseline => harmony::dynamic_baseline(surface, input, ctx),
        IsometricGrid => grid::isometric_grid(surface, input, ctx),
        PixelGrid => grid::pixel_grid(surface, input, ctx),
        SafeZones => grid::safe_zones(surface, input, ctx),
        OpticalCenter => grid::optical_center(surface, input, ctx),
        VisualWeightMap => grid::visual_weight_map(surface, input, ctx),
        BezierHandles => analysis::bezier_handles(surface, input),
        ParallelFlowLines => analysis::parallel_flow_lines(surface, input, ctx),
        UnderlyingCircles => analysis::underlying_circles(surface, input, ctx),
        DominantDiagonals => analysis::dominant_diagonals(surface, input, ctx),
        CurvatureComb => analysis::curvature_comb(surface, input, ctx),
        SkeletonCenterline => analysis::skeleton_centerline(surface, input, ctx),
        AnchorClusters => analysis::anchor_clusters(surface, input, ctx),
        PathDirection => analysis::path_direction(surface, input, ctx),
        TangentIntersections => analysis::tangent_intersections(surface, input, ctx),
        AnchorPoints => analysis::anchor_points(surface, input, ctx),
    }
    debug!("{} added {} items", kind, surface.len() - before);
}

/// Gate `primitive` with a fixed style.
pub(crate) fn gated(
    surface: &mut OverlaySurface,
    primitive: Primitive,
    ctx: Option<&RenderContext>,
    style: PrimitiveStyle,
) -> Option<ItemId> {
    show_if_intersects(surface, primitive, ctx, || style)
}

/// Add a text label in the label variant of `style`.
pub(crate) fn label(
    surface: &mut OverlaySurface,
    position: Point,
    content: impl Into<String>,
    style: PrimitiveStyle,
) -> ItemId {
    surface.add(Primitive::text(position, content), style.label())
}

/// Heavier stroke for major grid and scale lines.
pub(crate) fn major(style: PrimitiveStyle) -> PrimitiveStyle {
    style.width(style.stroke_width * MAJOR_WEIGHT)
}

/// Unit vector at `deg` degrees; exact on the axes.
pub(crate) fn direction(deg: f64) -> Point {
    let a = deg.to_radians();
    let snap = |v: f64| if v.abs() < 1e-12 { 0.0 } else { v };
    Point::new(snap(a.cos()), snap(a.sin()))
}

/// Line through `through` along `dir`, clipped to `bounds`.
pub(crate) fn clipped_line(through: Point, dir: Point, bounds: &Bounds) -> Option<Primitive> {
    let reach = bounds.width.hypot(bounds.height) + through.distance_to(&bounds.center());
    let (p0, p1) = (through - dir * reach, through + dir * reach);
    let [x1, y1, x2, y2] = clip_line_to_rect(
        p0.x,
        p0.y,
        p1.x,
        p1.y,
        bounds.left,
        bounds.top,
        bounds.right(),
        bounds.bottom(),
    )?;
    Some(Primitive::line(Point::new(x1, y1), Point::new(x2, y2)))
}

/// Short open chevron at `tip` pointing along `dir`.
pub(crate) fn chevron(tip: Point, dir: Point, size: f64) -> Option<Primitive> {
    let d = dir.normalized()?;
    let n = d.perpendicular();
    let back = tip - d * size;
    Some(Primitive::Polyline {
        points: vec![back + n * (size * 0.5), tip, back - n * (size * 0.5)],
        closed: false,
    })
}
