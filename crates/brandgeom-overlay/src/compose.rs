//! Overlay composition
//!
//! Runs every enabled renderer once against one shared frame, in a fixed
//! order: clearspace, construction grid, then the overlay kinds in family
//! order. Later items draw on top.

use crate::gate::RenderContext;
use crate::renderers::{guides, render_overlay, OverlayInput};
use crate::surface::{svg_document, Layer, OverlaySurface};
use crate::viewport::ArtworkFrame;
use brandgeom_core::ArtPath;
use brandgeom_settings::{OverlayConfig, OverlayKind};
use tracing::debug;

/// Render every enabled overlay for `frame` onto a fresh surface.
pub fn render_overlays(frame: &ArtworkFrame, config: &OverlayConfig) -> OverlaySurface {
    let mut surface = OverlaySurface::new();
    render_into(&mut surface, frame, config);
    surface
}

/// Append the composition for `frame` to `surface`.
pub fn render_into(surface: &mut OverlaySurface, frame: &ArtworkFrame, config: &OverlayConfig) {
    let paths: Vec<&dyn ArtPath> = frame.paths().map(|p| p as &dyn ArtPath).collect();
    let ctx = RenderContext::new(paths, config.use_real_data);
    let component_bounds = frame.component_bounds();

    surface.set_layer(Layer::Clearspace);
    guides::clearspace(
        surface,
        &frame.bounds,
        &config.clearspace,
        frame.logomark_size(),
        &config.styles.clearspace,
    );

    surface.set_layer(Layer::ConstructionGrid);
    guides::construction_grid(
        surface,
        &frame.bounds,
        &frame.components,
        &config.grid,
        &config.styles.construction_grid,
    );

    let enabled: Vec<OverlayKind> = config.options.enabled().collect();
    for &kind in &enabled {
        let style = config.styles.get(kind);
        let input = OverlayInput {
            bounds: frame.bounds,
            components: &component_bounds,
            segments: &frame.segments,
            style: &style,
        };
        surface.set_layer(Layer::Overlay(kind));
        render_overlay(kind, surface, &input, Some(&ctx));
    }
    debug!(
        "Composed {} overlays into {} items (real data: {})",
        enabled.len(),
        surface.len(),
        ctx.is_active()
    );
}

/// SVG document with the framed artwork beneath the overlay surface.
pub fn export_svg(frame: &ArtworkFrame, surface: &OverlaySurface) -> String {
    let mut body = String::from("<g class=\"artwork\">\n");
    for path in frame.paths() {
        body.push_str(&format!("  <path d=\"{}\" fill=\"#000000\"/>\n", path.to_svg_data()));
    }
    body.push_str("</g>\n");
    body.push_str(&surface.svg_body());
    svg_document(
        frame.viewport.width().round() as u32,
        frame.viewport.height().round() as u32,
        &body,
    )
}
