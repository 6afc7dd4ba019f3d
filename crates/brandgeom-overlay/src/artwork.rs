//! Parsed artwork and the derived measurements the overlays build on.

use crate::path::VectorPath;
use brandgeom_core::{BezierSegment, Bounds, ClearspaceUnit, FALLBACK_LOGOMARK_SIZE};
use serde::Serialize;
use tracing::debug;

/// Upper bound on grid lines per axis, guarding against tiny steps.
const MAX_GRID_LINES: usize = 4096;

/// One leaf shape of the imported artwork.
#[derive(Debug, Clone)]
pub struct VectorComponent {
    /// `comp-N`, in document order
    pub id: String,
    pub path: VectorPath,
    /// Tight bounds; always has positive area
    pub bounds: Bounds,
    pub is_icon: bool,
}

/// Result of ingesting one vector source.
#[derive(Debug, Clone)]
pub struct ParsedArtwork {
    pub components: Vec<VectorComponent>,
    /// Union of all component bounds
    pub full_bounds: Bounds,
    pub original_source: String,
    /// Every anchor of every component, in component order
    pub segments: Vec<BezierSegment>,
}

impl ParsedArtwork {
    pub(crate) fn new(components: Vec<VectorComponent>, original_source: String) -> Self {
        let full_bounds = components
            .iter()
            .map(|c| c.bounds)
            .reduce(|a, b| a.union(&b))
            .unwrap_or_default();
        let segments = components
            .iter()
            .flat_map(|c| brandgeom_core::ArtPath::anchors(&c.path))
            .collect();
        Self {
            components,
            full_bounds,
            original_source,
            segments,
        }
    }

    /// First component flagged as icon.
    pub fn icon(&self) -> Option<&VectorComponent> {
        self.components.iter().find(|c| c.is_icon)
    }

    pub fn icon_bounds(&self) -> Option<Bounds> {
        self.icon().map(|c| c.bounds)
    }

    /// Components not flagged as icon.
    pub fn wordmark(&self) -> impl Iterator<Item = &VectorComponent> {
        self.components.iter().filter(|c| !c.is_icon)
    }

    pub fn logomark_size(&self) -> f64 {
        get_logomark_size(&self.components)
    }

    /// Flip every component's icon flag.
    pub fn invert_icons(&mut self) {
        self.components = invert_components(&self.components);
    }
}

/// Flag the component closest to square as the icon.
///
/// Minimises `|w/h - 1|`; the first minimal component wins.
pub fn classify_icons(components: &mut [VectorComponent]) {
    let mut best: Option<(usize, f64)> = None;
    for (i, c) in components.iter().enumerate() {
        let score = (c.bounds.width / c.bounds.height - 1.0).abs();
        if best.map(|(_, s)| score < s).unwrap_or(true) {
            best = Some((i, score));
        }
    }
    for (i, c) in components.iter_mut().enumerate() {
        c.is_icon = best.map(|(b, _)| b == i).unwrap_or(false);
    }
    if let Some((i, score)) = best {
        debug!("Classified {} as icon (squareness {:.3})", components[i].id, score);
    }
}

/// Copy of `components` with every icon flag negated.
///
/// With more than two components this yields several icons at once.
pub fn invert_components(components: &[VectorComponent]) -> Vec<VectorComponent> {
    components
        .iter()
        .map(|c| VectorComponent {
            is_icon: !c.is_icon,
            ..c.clone()
        })
        .collect()
}

/// `min(w, h)` of the icon, or the fallback size when none is flagged.
pub fn get_logomark_size(components: &[VectorComponent]) -> f64 {
    components
        .iter()
        .find(|c| c.is_icon)
        .map(|c| c.bounds.min_side())
        .unwrap_or(FALLBACK_LOGOMARK_SIZE)
}

/// Clearspace margins in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClearspaceZones {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl ClearspaceZones {
    /// `bounds` grown by the margins.
    pub fn outer(&self, bounds: &Bounds) -> Bounds {
        bounds.expanded_by(self.top, self.right, self.bottom, self.left)
    }
}

pub fn compute_clearspace_zones(
    _bounds: &Bounds,
    value: f64,
    unit: ClearspaceUnit,
    logomark_size: f64,
) -> ClearspaceZones {
    let margin = unit.to_pixels(value, logomark_size);
    ClearspaceZones {
        top: margin,
        right: margin,
        bottom: margin,
        left: margin,
    }
}

/// Construction grid coordinates, ascending.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GridLines {
    /// y coordinates of horizontal lines
    pub horizontal: Vec<f64>,
    /// x coordinates of vertical lines
    pub vertical: Vec<f64>,
}

/// Grid anchored on the icon's top-left edge, spaced at the icon size divided
/// by `subdivisions`, covering `bounds` plus one step on every side.
pub fn generate_construction_grid_lines(
    bounds: &Bounds,
    components: &[VectorComponent],
    subdivisions: u32,
) -> GridLines {
    if subdivisions == 0 {
        return GridLines::default();
    }
    let icon = components
        .iter()
        .find(|c| c.is_icon)
        .map(|c| c.bounds)
        .unwrap_or(*bounds);
    let n = f64::from(subdivisions);

    GridLines {
        horizontal: axis_lines(icon.top, icon.height / n, bounds.top, bounds.bottom()),
        vertical: axis_lines(icon.left, icon.width / n, bounds.left, bounds.right()),
    }
}

fn axis_lines(anchor: f64, step: f64, min: f64, max: f64) -> Vec<f64> {
    if !(step > 0.0 && step.is_finite()) {
        return Vec::new();
    }
    let (lo, hi) = (min - step, max + step);
    let mut lines = Vec::new();

    let mut k = 0.0;
    while lines.len() < MAX_GRID_LINES {
        let v = anchor - k * step;
        if v < lo {
            break;
        }
        if v <= hi {
            lines.push(v);
        }
        k += 1.0;
    }
    lines.reverse();

    let mut k = 1.0;
    while lines.len() < MAX_GRID_LINES {
        let v = anchor + k * step;
        if v > hi {
            break;
        }
        if v >= lo {
            lines.push(v);
        }
        k += 1.0;
    }
    lines
}
