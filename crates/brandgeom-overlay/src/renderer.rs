//! Raster output of an [`OverlaySurface`] via tiny-skia.
//!
//! Text items are not rasterized; labels only exist in the SVG output.

use crate::surface::{OverlaySurface, Primitive, PrimitiveStyle};
use brandgeom_core::{Color, RenderError};
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;
use tiny_skia::{
    FillRule, Paint, Path, PathBuilder, Pixmap, Rect, Stroke, StrokeDash, Transform,
};
use tracing::{debug, trace};

fn skia_color(color: &Color) -> Option<tiny_skia::Color> {
    if color.is_nan() {
        return None;
    }
    tiny_skia::Color::from_rgba(
        color.r.clamp(0.0, 1.0) as f32,
        color.g.clamp(0.0, 1.0) as f32,
        color.b.clamp(0.0, 1.0) as f32,
        color.a.clamp(0.0, 1.0) as f32,
    )
}

fn paint_for(color: &Color) -> Option<Paint<'static>> {
    let mut paint = Paint::default();
    paint.set_color(skia_color(color)?);
    paint.anti_alias = true;
    Some(paint)
}

fn polyline_path(points: &[brandgeom_core::Point], closed: bool) -> Option<Path> {
    let (first, rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.x as f32, first.y as f32);
    for p in rest {
        pb.line_to(p.x as f32, p.y as f32);
    }
    if closed {
        pb.close();
    }
    pb.finish()
}

/// tiny-skia path for a primitive; `None` for text and degenerate shapes.
fn primitive_path(primitive: &Primitive) -> Option<Path> {
    match primitive {
        Primitive::Line { from, to } => polyline_path(&[*from, *to], false),
        Primitive::Polyline { points, closed } => polyline_path(points, *closed),
        Primitive::Rect(b) => Rect::from_xywh(
            b.left as f32,
            b.top as f32,
            b.width as f32,
            b.height as f32,
        )
        .map(PathBuilder::from_rect),
        Primitive::Circle { center, radius } => {
            PathBuilder::from_circle(center.x as f32, center.y as f32, *radius as f32)
        }
        Primitive::Arc { .. } => {
            let outline = primitive.outline();
            polyline_path(outline.chains.first()?, false)
        }
        Primitive::Text { .. } => None,
    }
}

fn draw_item(pixmap: &mut Pixmap, primitive: &Primitive, style: &PrimitiveStyle, transform: Transform) {
    let Some(path) = primitive_path(primitive) else {
        trace!("Nothing to rasterize for {:?}", primitive);
        return;
    };

    if let Some(fill) = style.fill {
        match paint_for(&fill) {
            Some(paint) => pixmap.fill_path(&path, &paint, FillRule::Winding, transform, None),
            None => trace!("Skipping fill with unusable color {:?}", fill),
        }
    }

    let Some(paint) = paint_for(&style.stroke) else {
        trace!("Skipping stroke with unusable color {:?}", style.stroke);
        return;
    };
    let stroke = Stroke {
        width: style.stroke_width as f32,
        dash: style
            .dash
            .and_then(|[on, off]| StrokeDash::new(vec![on as f32, off as f32], 0.0)),
        ..Default::default()
    };
    pixmap.stroke_path(&path, &paint, &stroke, transform, None);
}

/// Rasterize `surface` onto a transparent `width` x `height` canvas, scaled
/// by the integer multiple `scale`.
pub fn rasterize(
    surface: &OverlaySurface,
    width: u32,
    height: u32,
    scale: u32,
) -> Result<RgbaImage, RenderError> {
    let (out_w, out_h) = (width.saturating_mul(scale), height.saturating_mul(scale));
    let mut pixmap = Pixmap::new(out_w, out_h).ok_or(RenderError::InvalidCanvasSize {
        width: out_w,
        height: out_h,
    })?;
    let transform = Transform::from_scale(scale as f32, scale as f32);

    for item in surface.items() {
        draw_item(&mut pixmap, &item.primitive, &item.style, transform);
    }

    let mut data = Vec::with_capacity(pixmap.pixels().len() * 4);
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    debug!("Rasterized {} items at {}x{}", surface.len(), out_w, out_h);
    RgbaImage::from_raw(out_w, out_h, data).ok_or(RenderError::InvalidCanvasSize {
        width: out_w,
        height: out_h,
    })
}

/// PNG bytes of a rasterized surface.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, RenderError> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| RenderError::Encode(e.to_string()))?;
    Ok(bytes)
}

impl OverlaySurface {
    /// See [`rasterize`].
    pub fn rasterize(&self, width: u32, height: u32, scale: u32) -> Result<RgbaImage, RenderError> {
        rasterize(self, width, height, scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandgeom_core::{Bounds, Point};
    use brandgeom_settings::StyleConfig;

    fn red() -> PrimitiveStyle {
        PrimitiveStyle::from_config(&StyleConfig::new("ff0000", 1.0, 2.0))
    }

    #[test]
    fn test_zero_size_is_rejected() {
        let surface = OverlaySurface::new();
        assert_eq!(
            surface.rasterize(0, 10, 1).unwrap_err(),
            RenderError::InvalidCanvasSize {
                width: 0,
                height: 10
            }
        );
        assert!(surface.rasterize(10, 10, 0).is_err());
    }

    #[test]
    fn test_line_is_drawn() {
        let mut surface = OverlaySurface::new();
        surface.add(
            Primitive::line(Point::new(0.0, 10.0), Point::new(20.0, 10.0)),
            red(),
        );
        let img = surface.rasterize(20, 20, 1).unwrap();
        let px = img.get_pixel(10, 10);
        assert!(px[0] > 200 && px[3] > 100);
        assert_eq!(img.get_pixel(10, 2)[3], 0);
    }

    #[test]
    fn test_scale_multiplies_size() {
        let mut surface = OverlaySurface::new();
        surface.add(Primitive::Rect(Bounds::new(2.0, 2.0, 6.0, 6.0)), red().filled(1.0));
        let img = surface.rasterize(10, 10, 3).unwrap();
        assert_eq!(img.dimensions(), (30, 30));
        assert!(img.get_pixel(15, 15)[3] > 200);
    }

    #[test]
    fn test_invalid_color_and_text_are_skipped() {
        let mut surface = OverlaySurface::new();
        let bad = PrimitiveStyle::from_config(&StyleConfig::new("zz", 1.0, 4.0));
        surface.add(Primitive::line(Point::new(0.0, 5.0), Point::new(10.0, 5.0)), bad);
        surface.add(Primitive::text(Point::new(2.0, 5.0), "x"), red().label());
        let img = surface.rasterize(10, 10, 1).unwrap();
        assert!(img.pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn test_png_signature() {
        let img = OverlaySurface::new().rasterize(4, 4, 1).unwrap();
        let png = encode_png(&img).unwrap();
        assert_eq!(&png[..4], b"\x89PNG");
    }
}
