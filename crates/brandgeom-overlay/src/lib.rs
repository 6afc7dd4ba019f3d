//! # BrandGeom Overlay
//!
//! This crate turns an uploaded vector logo into a stack of geometric
//! construction overlays. It combines SVG ingest, artwork framing, the overlay
//! renderers and the drawing surface they paint on.
//!
//! ## Core Components
//!
//! ### Ingest
//! - **Import**: SVG source to [`ParsedArtwork`] with icon classification
//! - **Paths**: lyon-backed [`VectorPath`] implementing [`ArtPath`](brandgeom_core::ArtPath)
//!
//! ### Overlays
//! - **Renderers**: one function per [`OverlayKind`](brandgeom_settings::OverlayKind)
//! - **Gate**: hides candidates that miss the real artwork
//! - **Subdivision**: golden-rectangle square iterator for the spiral
//!
//! ### Output
//! - **Surface**: ordered, layered primitives with SVG export
//! - **Renderer**: tiny-skia rasterization and PNG encoding
//! - **Pipeline**: cached artwork, config and viewport with full redraws
//!
//! ## Architecture
//!
//! ```text
//! parse_source ──> ParsedArtwork
//!                     │
//!        Viewport ──> ArtworkFrame ──> render_overlays ──> OverlaySurface
//!                                          │                   ├── to_svg
//!                                 OverlayConfig                └── rasterize
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use brandgeom_overlay::{OverlayPipeline, Viewport};
//! use brandgeom_settings::OverlayConfig;
//!
//! let mut pipeline = OverlayPipeline::new(OverlayConfig::default(), Viewport::new(800.0, 600.0));
//! pipeline.load_source(&svg)?;
//! let svg = pipeline.export_svg();
//! ```

pub mod artwork;
pub mod compose;
pub mod gate;
pub mod import;
pub mod path;
pub mod pipeline;
pub mod renderer;
pub mod renderers;
pub mod subdivision;
pub mod surface;
pub mod viewport;

pub use artwork::{
    classify_icons, compute_clearspace_zones, generate_construction_grid_lines, get_logomark_size,
    invert_components, ClearspaceZones, GridLines, ParsedArtwork, VectorComponent,
};
pub use compose::{export_svg, render_into, render_overlays};
pub use gate::{intersects_any_path, is_gated_out, show_if_intersects, RenderContext};
pub use import::parse_source;
pub use path::{Contour, Curve, PathBuilder, VectorPath};
pub use pipeline::OverlayPipeline;
pub use renderer::{encode_png, rasterize};
pub use renderers::{render_overlay, OverlayInput};
pub use subdivision::{Edge, QuarterArc, SquareSubdivision, SubdivisionStep};
pub use surface::{ItemId, Layer, OverlaySurface, Primitive, PrimitiveStyle, SurfaceItem};
pub use viewport::{ArtworkFrame, Viewport};
