//! Viewport and artwork framing.
//!
//! The overlays are computed in surface coordinates: the artwork is scaled
//! uniformly and centred in the canvas, leaving a fixed padding on every side.
//! Both axes point the same way as the source (y grows downward), so the
//! mapping is a uniform scale followed by a translation:
//!
//! ```text
//! surface = artwork * scale + (dx, dy)
//! ```

use crate::artwork::{ParsedArtwork, VectorComponent};
use crate::path::VectorPath;
use brandgeom_core::{BezierSegment, Bounds, Point};
use std::fmt;

/// Fraction of the canvas reserved as padding on each side.
pub const FRAME_PADDING: f64 = 0.15;

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 50.0;

/// Canvas size and zoom multiplier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: f64,
    height: f64,
    zoom: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            zoom: 1.0,
        }
    }

    /// Builder form of [`Viewport::set_zoom`].
    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.set_zoom(zoom);
        self
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Sets the canvas dimensions (typically called when the host resizes).
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Gets the current zoom level (1.0 = 100%).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom level; values outside `[MIN_ZOOM, MAX_ZOOM]` are ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if (MIN_ZOOM..=MAX_ZOOM).contains(&zoom) {
            self.zoom = zoom;
        }
    }

    /// Zooms in by multiplying current zoom by 1.2.
    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * 1.2);
    }

    /// Zooms out by dividing current zoom by 1.2.
    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / 1.2);
    }

    pub fn reset_zoom(&mut self) {
        self.zoom = 1.0;
    }

    /// Scale that fits `bounds` inside the padded canvas, times the zoom.
    ///
    /// Bounds without area keep their size (scale 1).
    pub fn fit_scale(&self, bounds: &Bounds) -> f64 {
        if !bounds.has_area() {
            return 1.0;
        }
        let available = 1.0 - FRAME_PADDING * 2.0;
        let scale_x = self.width * available / bounds.width;
        let scale_y = self.height * available / bounds.height;
        scale_x.min(scale_y) * self.zoom
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} @ {:.2}x", self.width, self.height, self.zoom)
    }
}

/// Artwork mapped into surface coordinates.
#[derive(Debug, Clone)]
pub struct ArtworkFrame {
    pub viewport: Viewport,
    pub scale: f64,
    pub dx: f64,
    pub dy: f64,
    /// Full artwork bounds on the surface
    pub bounds: Bounds,
    pub components: Vec<VectorComponent>,
    pub segments: Vec<BezierSegment>,
}

impl ArtworkFrame {
    /// Scale and centre `artwork` in `viewport`.
    pub fn fit(artwork: &ParsedArtwork, viewport: Viewport) -> Self {
        let source = artwork.full_bounds;
        let scale = viewport.fit_scale(&source);
        let center = source.center();
        let dx = viewport.width() / 2.0 - center.x * scale;
        let dy = viewport.height() / 2.0 - center.y * scale;

        let components = artwork
            .components
            .iter()
            .map(|c| VectorComponent {
                id: c.id.clone(),
                path: c.path.scaled(scale, dx, dy),
                bounds: scale_bounds(&c.bounds, scale, dx, dy),
                is_icon: c.is_icon,
            })
            .collect();
        let segments = artwork
            .segments
            .iter()
            .map(|s| s.transformed(scale, dx, dy))
            .collect();

        Self {
            viewport,
            scale,
            dx,
            dy,
            bounds: scale_bounds(&source, scale, dx, dy),
            components,
            segments,
        }
    }

    /// Artwork point to surface point.
    pub fn to_surface(&self, p: Point) -> Point {
        Point::new(p.x * self.scale + self.dx, p.y * self.scale + self.dy)
    }

    /// Surface point back to artwork coordinates.
    pub fn to_artwork(&self, p: Point) -> Point {
        Point::new((p.x - self.dx) / self.scale, (p.y - self.dy) / self.scale)
    }

    pub fn component_bounds(&self) -> Vec<Bounds> {
        self.components.iter().map(|c| c.bounds).collect()
    }

    pub fn paths(&self) -> impl Iterator<Item = &VectorPath> {
        self.components.iter().map(|c| &c.path)
    }

    /// `min(w, h)` of the framed icon, or the fallback size.
    pub fn logomark_size(&self) -> f64 {
        crate::artwork::get_logomark_size(&self.components)
    }
}

fn scale_bounds(b: &Bounds, scale: f64, dx: f64, dy: f64) -> Bounds {
    Bounds::new(b.left * scale + dx, b.top * scale + dy, b.width * scale, b.height * scale)
}
