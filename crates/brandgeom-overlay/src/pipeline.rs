//! Redraw pipeline.
//!
//! Holds the artwork of the current upload together with the configuration
//! and viewport. Every state change ends in a full redraw: the surface is
//! cleared and rebuilt from scratch. Only [`OverlayPipeline::load_source`]
//! parses; resizing or zooming reuses the cached artwork.

use crate::artwork::ParsedArtwork;
use crate::compose::{self, render_into};
use crate::import::parse_source;
use crate::renderer;
use crate::surface::OverlaySurface;
use crate::viewport::{ArtworkFrame, Viewport};
use brandgeom_core::{ParseError, RenderError};
use brandgeom_settings::OverlayConfig;
use image::RgbaImage;
use tracing::{info, warn};

/// Stateful driver from uploaded source to overlay surface.
#[derive(Debug, Clone, Default)]
pub struct OverlayPipeline {
    artwork: Option<ParsedArtwork>,
    config: OverlayConfig,
    viewport: Viewport,
    surface: OverlaySurface,
    ingest_count: usize,
    redraw_count: usize,
}

impl OverlayPipeline {
    pub fn new(config: OverlayConfig, viewport: Viewport) -> Self {
        Self {
            config,
            viewport,
            ..Self::default()
        }
    }

    /// Parse a new upload and redraw.
    ///
    /// On error the previously loaded artwork stays in place.
    pub fn load_source(&mut self, source: &str) -> Result<&OverlaySurface, ParseError> {
        let artwork = parse_source(source).inspect_err(|e| warn!("Upload rejected: {}", e))?;
        self.ingest_count += 1;
        self.artwork = Some(artwork);
        Ok(self.redraw())
    }

    /// Flip the icon/wordmark classification of the loaded artwork.
    pub fn invert_icons(&mut self) -> &OverlaySurface {
        if let Some(artwork) = self.artwork.as_mut() {
            artwork.invert_icons();
        }
        self.redraw()
    }

    pub fn set_config(&mut self, config: OverlayConfig) -> &OverlaySurface {
        self.config = config;
        self.redraw()
    }

    pub fn resize(&mut self, width: f64, height: f64) -> &OverlaySurface {
        self.viewport.set_canvas_size(width, height);
        self.redraw()
    }

    pub fn set_zoom(&mut self, zoom: f64) -> &OverlaySurface {
        self.viewport.set_zoom(zoom);
        self.redraw()
    }

    /// Clear the surface and compose every enabled overlay again.
    pub fn redraw(&mut self) -> &OverlaySurface {
        self.surface.clear();
        self.redraw_count += 1;
        if let Some(frame) = self.frame() {
            render_into(&mut self.surface, &frame, &self.config);
        }
        info!(
            "Redraw #{} at {}: {} items",
            self.redraw_count,
            self.viewport,
            self.surface.len()
        );
        &self.surface
    }

    /// Loaded artwork fitted to the current viewport.
    pub fn frame(&self) -> Option<ArtworkFrame> {
        self.artwork
            .as_ref()
            .map(|artwork| ArtworkFrame::fit(artwork, self.viewport))
    }

    pub fn artwork(&self) -> Option<&ParsedArtwork> {
        self.artwork.as_ref()
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn surface(&self) -> &OverlaySurface {
        &self.surface
    }

    /// Number of successful parses so far.
    pub fn ingest_count(&self) -> usize {
        self.ingest_count
    }

    pub fn redraw_count(&self) -> usize {
        self.redraw_count
    }

    /// Artwork plus overlays as one SVG document, if artwork is loaded.
    pub fn export_svg(&self) -> Option<String> {
        self.frame()
            .map(|frame| compose::export_svg(&frame, &self.surface))
    }

    /// Overlays at the viewport size times `scale`.
    pub fn rasterize(&self, scale: u32) -> Result<RgbaImage, RenderError> {
        renderer::rasterize(
            &self.surface,
            self.viewport.width().round() as u32,
            self.viewport.height().round() as u32,
            scale,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandgeom_settings::{GeometryOptions, OverlayKind};

    const SQUARE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
        <rect x="10" y="10" width="80" height="80"/>
    </svg>"#;

    fn pipeline() -> OverlayPipeline {
        OverlayPipeline::new(OverlayConfig::default(), Viewport::new(100.0, 100.0))
    }

    #[test]
    fn test_empty_pipeline_draws_nothing() {
        let mut p = pipeline();
        assert!(p.redraw().is_empty());
        assert!(p.frame().is_none());
        assert!(p.export_svg().is_none());
        assert_eq!(p.redraw_count(), 1);
    }

    #[test]
    fn test_resize_reuses_artwork() {
        let mut p = pipeline();
        p.load_source(SQUARE).unwrap();
        let before = p.frame().unwrap().bounds;
        p.resize(200.0, 200.0);
        p.set_zoom(2.0);
        assert_eq!(p.ingest_count(), 1);
        assert_eq!(p.redraw_count(), 3);
        let after = p.frame().unwrap().bounds;
        assert!((after.width - before.width * 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_failed_upload_keeps_previous_artwork() {
        let mut p = pipeline();
        p.load_source(SQUARE).unwrap();
        assert!(p.load_source("<html></html>").is_err());
        assert!(p.artwork().is_some());
        assert_eq!(p.ingest_count(), 1);
    }

    #[test]
    fn test_redraw_rebuilds_instead_of_appending() {
        let mut p = pipeline();
        let first = p.load_source(SQUARE).unwrap().len();
        assert!(first > 0);
        assert_eq!(p.redraw().len(), first);

        let none = p.config().with_options(GeometryOptions::none());
        let fewer = p.set_config(none).len();
        assert!(fewer < first);

        let more = p.config().with_option(OverlayKind::GoldenRatio, true);
        assert!(p.set_config(more).len() > fewer);
    }

    #[test]
    fn test_invert_flips_single_icon() {
        let mut p = pipeline();
        p.load_source(SQUARE).unwrap();
        assert!(p.artwork().unwrap().components[0].is_icon);
        p.invert_icons();
        assert!(!p.artwork().unwrap().components[0].is_icon);
    }

    #[test]
    fn test_exports() {
        let mut p = pipeline();
        p.load_source(SQUARE).unwrap();
        let svg = p.export_svg().unwrap();
        assert!(svg.contains("class=\"artwork\""));
        let img = p.rasterize(2).unwrap();
        assert_eq!(img.dimensions(), (200, 200));
    }
}
