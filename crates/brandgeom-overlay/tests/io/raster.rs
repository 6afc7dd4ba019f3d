use brandgeom_overlay::{
    encode_png, import::parse_source, render_overlays, ArtworkFrame, OverlaySurface, Primitive,
    PrimitiveStyle, Viewport,
};
use brandgeom_core::{Point, RenderError};
use brandgeom_settings::{OverlayConfig, StyleConfig};

#[test]
fn test_dashed_line_leaves_gaps() {
    let mut surface = OverlaySurface::new();
    let style = PrimitiveStyle::from_config(&StyleConfig::new("000000", 1.0, 2.0)).dashed(4.0, 4.0);
    surface.add(Primitive::line(Point::new(0.0, 5.0), Point::new(40.0, 5.0)), style);
    let img = surface.rasterize(40, 10, 1).unwrap();
    let row: Vec<u8> = (0..40).map(|x| img.get_pixel(x, 5)[3]).collect();
    assert!(row.iter().any(|a| *a > 200));
    assert!(row.iter().any(|a| *a == 0));
}

#[test]
fn test_rendered_logo_to_png() {
    let art = parse_source(
        r#"<svg xmlns="http://www.w3.org/2000/svg"><rect x="0" y="0" width="60" height="30"/></svg>"#,
    )
    .unwrap();
    let frame = ArtworkFrame::fit(&art, Viewport::new(120.0, 80.0));
    let surface = render_overlays(&frame, &OverlayConfig::default());
    let img = surface.rasterize(120, 80, 2).unwrap();
    assert_eq!(img.dimensions(), (240, 160));
    assert!(img.pixels().any(|p| p[3] > 0));

    let png = encode_png(&img).unwrap();
    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded, img);
}

#[test]
fn test_oversized_canvas_errors() {
    let surface = OverlaySurface::new();
    assert!(matches!(
        surface.rasterize(u32::MAX, 2, 1),
        Err(RenderError::InvalidCanvasSize { .. })
    ));
}
