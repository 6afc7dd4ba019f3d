use brandgeom_overlay::{
    export_svg, import::parse_source, render_overlays, ArtworkFrame, OverlaySurface, Primitive,
    PrimitiveStyle, Viewport,
};
use brandgeom_core::{Bounds, Point};
use brandgeom_settings::{OverlayConfig, OverlayKind, StyleConfig};

#[test]
fn test_surface_svg_is_layered_document() {
    let mut surface = OverlaySurface::new();
    let style = PrimitiveStyle::from_config(&StyleConfig::new("ff8800", 0.5, 2.0));
    surface.add(Primitive::Rect(Bounds::new(1.0, 2.0, 3.0, 4.0)), style.dashed(4.0, 4.0));
    surface.add(Primitive::text(Point::new(5.0, 5.0), "a<b"), style.label());

    let svg = surface.to_svg(64, 32);
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("width=\"64\" height=\"32\""));
    assert!(svg.contains("<rect x=\"1\" y=\"2\" width=\"3\" height=\"4\""));
    assert!(svg.contains("stroke=\"#ff8800\""));
    assert!(svg.contains("stroke-dasharray=\"4 4\""));
    assert!(svg.contains("a&lt;b"));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn test_export_writes_to_disk() {
    let art = parse_source(
        r#"<svg xmlns="http://www.w3.org/2000/svg"><circle cx="20" cy="20" r="20"/></svg>"#,
    )
    .unwrap();
    let frame = ArtworkFrame::fit(&art, Viewport::new(200.0, 200.0));
    let config = OverlayConfig::default().with_option(OverlayKind::GoldenCircles, true);
    let surface = render_overlays(&frame, &config);
    let svg = export_svg(&frame, &surface);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("overlay.svg");
    std::fs::write(&path, &svg).unwrap();
    let back = std::fs::read_to_string(&path).unwrap();
    assert_eq!(back, svg);
    assert!(back.contains("class=\"golden-circles\""));

    // the export parses back as artwork
    let again = parse_source(&back).unwrap();
    assert!(!again.components.is_empty());
}
