//! # BrandGeom
//!
//! Geometric construction overlays for vector brand marks:
//! - Golden ratio, golden spiral, rule of thirds and related proportion guides
//! - Clearspace zones and logomark-derived construction grids
//! - Path analysis driven by the real artwork (tangent flow, curvature, anchors)
//!
//! ## Architecture
//!
//! BrandGeom is organized as a workspace with multiple crates:
//!
//! 1. **brandgeom-core** - Geometry value types, errors, the `ArtPath` trait
//! 2. **brandgeom-settings** - Overlay configuration, styles and presets
//! 3. **brandgeom-overlay** - SVG ingest, overlay renderers, drawing surface
//! 4. **brandgeom** - This facade, re-exporting the public API

pub use brandgeom_core as geom;
pub use brandgeom_overlay as overlay;
pub use brandgeom_settings as settings;

pub use brandgeom_core::{
    hex_to_color, ArtPath, BezierSegment, Bounds, ClearspaceUnit, Color, Error, ParseError, Point,
    RenderError, Result,
};

pub use brandgeom_settings::{
    builtin_presets, ClearspaceSettings, GeometryOptions, GeometryPreset, GeometryStyles,
    GridSettings, MemoryPresetStore, OverlayConfig, OverlayFamily, OverlayKind, PresetStore,
    StyleConfig,
};

pub use brandgeom_overlay::{
    export_svg, parse_source, render_overlays, ArtworkFrame, Layer, OverlayPipeline,
    OverlaySurface, ParsedArtwork, Primitive, PrimitiveStyle, Viewport,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
///
/// Fails if a global subscriber is already installed.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
