//! Overlay kinds and the per-kind enable switches.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Overlay family; determines draw order and default styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayFamily {
    Basic,
    Proportion,
    Measurement,
    Harmony,
    Grid,
    Analysis,
}

/// Every overlay the engine can draw.
///
/// Declaration order is the composition order within the overlay pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayKind {
    // Basic shapes
    BoundingRects,
    Circles,
    CenterLines,
    Diagonals,
    TangentLines,
    // Proportions
    GoldenRatio,
    GoldenSpiral,
    RuleOfThirds,
    GoldenCircles,
    TypographicProportions,
    // Measurement
    SymmetryAxes,
    AngleMeasurements,
    SpacingGuides,
    AlignmentGuides,
    // Harmony
    RootRectangles,
    ModularScale,
    FibonacciOverlay,
    VesicaPiscis,
    HarmonicDivisions,
    RuleOfOdds,
    DynamicBaseline,
    // Grid and safe zones
    IsometricGrid,
    PixelGrid,
    SafeZones,
    OpticalCenter,
    VisualWeightMap,
    // Path analysis
    BezierHandles,
    ParallelFlowLines,
    UnderlyingCircles,
    DominantDiagonals,
    CurvatureComb,
    SkeletonCenterline,
    AnchorClusters,
    PathDirection,
    TangentIntersections,
    AnchorPoints,
}

impl OverlayKind {
    pub const ALL: [OverlayKind; 36] = [
        Self::BoundingRects,
        Self::Circles,
        Self::CenterLines,
        Self::Diagonals,
        Self::TangentLines,
        Self::GoldenRatio,
        Self::GoldenSpiral,
        Self::RuleOfThirds,
        Self::GoldenCircles,
        Self::TypographicProportions,
        Self::SymmetryAxes,
        Self::AngleMeasurements,
        Self::SpacingGuides,
        Self::AlignmentGuides,
        Self::RootRectangles,
        Self::ModularScale,
        Self::FibonacciOverlay,
        Self::VesicaPiscis,
        Self::HarmonicDivisions,
        Self::RuleOfOdds,
        Self::DynamicBaseline,
        Self::IsometricGrid,
        Self::PixelGrid,
        Self::SafeZones,
        Self::OpticalCenter,
        Self::VisualWeightMap,
        Self::BezierHandles,
        Self::ParallelFlowLines,
        Self::UnderlyingCircles,
        Self::DominantDiagonals,
        Self::CurvatureComb,
        Self::SkeletonCenterline,
        Self::AnchorClusters,
        Self::PathDirection,
        Self::TangentIntersections,
        Self::AnchorPoints,
    ];

    pub fn family(self) -> OverlayFamily {
        use OverlayKind::*;
        match self {
            BoundingRects | Circles | CenterLines | Diagonals | TangentLines => OverlayFamily::Basic,
            GoldenRatio | GoldenSpiral | RuleOfThirds | GoldenCircles | TypographicProportions => {
                OverlayFamily::Proportion
            }
            SymmetryAxes | AngleMeasurements | SpacingGuides | AlignmentGuides => {
                OverlayFamily::Measurement
            }
            RootRectangles | ModularScale | FibonacciOverlay | VesicaPiscis | HarmonicDivisions
            | RuleOfOdds | DynamicBaseline => OverlayFamily::Harmony,
            IsometricGrid | PixelGrid | SafeZones | OpticalCenter | VisualWeightMap => {
                OverlayFamily::Grid
            }
            BezierHandles | ParallelFlowLines | UnderlyingCircles | DominantDiagonals
            | CurvatureComb | SkeletonCenterline | AnchorClusters | PathDirection
            | TangentIntersections | AnchorPoints => OverlayFamily::Analysis,
        }
    }

    /// True for overlays that sample the real artwork paths and draw nothing
    /// in decorative mode. Bezier handles read the parsed segments instead.
    pub fn requires_real_data(self) -> bool {
        self.family() == OverlayFamily::Analysis && self != OverlayKind::BezierHandles
    }
}

impl fmt::Display for OverlayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use OverlayKind::*;
        let label = match self {
            BoundingRects => "Bounding Rectangles",
            Circles => "Circles",
            CenterLines => "Center Lines",
            Diagonals => "Diagonals",
            TangentLines => "Tangent Lines",
            GoldenRatio => "Golden Ratio",
            GoldenSpiral => "Golden Spiral",
            RuleOfThirds => "Rule of Thirds",
            GoldenCircles => "Golden Circles",
            TypographicProportions => "Typographic Proportions",
            SymmetryAxes => "Symmetry Axes",
            AngleMeasurements => "Angle Measurements",
            SpacingGuides => "Spacing Guides",
            AlignmentGuides => "Alignment Guides",
            RootRectangles => "Root Rectangles",
            ModularScale => "Modular Scale",
            FibonacciOverlay => "Fibonacci Overlay",
            VesicaPiscis => "Vesica Piscis",
            HarmonicDivisions => "Harmonic Divisions",
            RuleOfOdds => "Rule of Odds",
            DynamicBaseline => "Dynamic Baseline",
            IsometricGrid => "Isometric Grid",
            PixelGrid => "Pixel Grid",
            SafeZones => "Safe Zones",
            OpticalCenter => "Optical Center",
            VisualWeightMap => "Visual Weight Map",
            BezierHandles => "Bezier Handles",
            ParallelFlowLines => "Parallel Flow Lines",
            UnderlyingCircles => "Underlying Circles",
            DominantDiagonals => "Dominant Diagonals",
            CurvatureComb => "Curvature Comb",
            SkeletonCenterline => "Skeleton Centerline",
            AnchorClusters => "Anchor Clusters",
            PathDirection => "Path Direction",
            TangentIntersections => "Tangent Intersections",
            AnchorPoints => "Anchor Points",
        };
        write!(f, "{}", label)
    }
}

/// Enable switch per overlay kind. Kinds missing from the map are disabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeometryOptions {
    flags: BTreeMap<OverlayKind, bool>,
}

impl Default for GeometryOptions {
    fn default() -> Self {
        Self::none()
            .with(OverlayKind::BoundingRects, true)
            .with(OverlayKind::CenterLines, true)
    }
}

impl GeometryOptions {
    /// All overlays disabled.
    pub fn none() -> Self {
        Self {
            flags: BTreeMap::new(),
        }
    }

    /// All overlays enabled.
    pub fn all() -> Self {
        Self {
            flags: OverlayKind::ALL.iter().map(|k| (*k, true)).collect(),
        }
    }

    pub fn is_enabled(&self, kind: OverlayKind) -> bool {
        self.flags.get(&kind).copied().unwrap_or(false)
    }

    /// Copy with `kind` switched to `enabled`.
    pub fn with(&self, kind: OverlayKind, enabled: bool) -> Self {
        let mut next = self.clone();
        next.flags.insert(kind, enabled);
        next
    }

    /// Enabled kinds in composition order.
    pub fn enabled(&self) -> impl Iterator<Item = OverlayKind> + '_ {
        OverlayKind::ALL
            .iter()
            .copied()
            .filter(move |k| self.is_enabled(*k))
    }
}
