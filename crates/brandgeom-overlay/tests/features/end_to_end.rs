use brandgeom_core::ClearspaceUnit;
use brandgeom_overlay::{
    import::parse_source, render_overlays, ArtworkFrame, Layer, Primitive, Viewport,
};
use brandgeom_settings::{GeometryOptions, OverlayConfig, OverlayKind};

const SQUARE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
    <rect x="10" y="10" width="80" height="80"/>
</svg>"#;

fn scenario() -> (ArtworkFrame, OverlayConfig) {
    let art = parse_source(SQUARE).unwrap();
    let frame = ArtworkFrame::fit(&art, Viewport::new(100.0, 100.0));
    let config = OverlayConfig::default()
        .with_options(GeometryOptions::none())
        .with_option(OverlayKind::BoundingRects, true)
        .with_option(OverlayKind::CenterLines, true)
        .with_clearspace(1.0, ClearspaceUnit::Logomark);
    (frame, config)
}

#[test]
fn test_square_bounding_rects() {
    let (frame, config) = scenario();
    assert!(!config.use_real_data);
    let surface = render_overlays(&frame, &config);

    let rects: Vec<_> = surface
        .items_in(Layer::Overlay(OverlayKind::BoundingRects))
        .collect();
    assert_eq!(rects.len(), 2);
    for item in &rects {
        assert_eq!(item.primitive, Primitive::Rect(frame.bounds));
    }

    let base_alpha = config.styles.get(OverlayKind::BoundingRects).color().a;
    let outer = rects[0].style;
    assert!((outer.stroke.a - base_alpha * 0.7).abs() < 1e-12);
    assert!(outer.dash.is_some());
    assert!((rects[1].style.stroke.a - base_alpha).abs() < 1e-12);
}

#[test]
fn test_square_center_lines_overhang() {
    let (frame, config) = scenario();
    let surface = render_overlays(&frame, &config);
    let b = frame.bounds;
    let c = b.center();

    let lines: Vec<&Primitive> = surface
        .items_in(Layer::Overlay(OverlayKind::CenterLines))
        .map(|item| &item.primitive)
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        *lines[0],
        Primitive::line(
            brandgeom_core::Point::new(c.x, b.top - 30.0),
            brandgeom_core::Point::new(c.x, b.bottom() + 30.0)
        )
    );
    assert_eq!(
        *lines[1],
        Primitive::line(
            brandgeom_core::Point::new(b.left - 30.0, c.y),
            brandgeom_core::Point::new(b.right() + 30.0, c.y)
        )
    );
}

#[test]
fn test_square_clearspace_one_logomark() {
    let (frame, config) = scenario();
    let surface = render_overlays(&frame, &config);
    let zone: Vec<_> = surface.items_in(Layer::Clearspace).collect();
    assert_eq!(zone.len(), 1);

    let margin = frame.bounds.min_side();
    let Primitive::Rect(outer) = zone[0].primitive else {
        panic!("clearspace should be a rectangle");
    };
    assert!((outer.left - (frame.bounds.left - margin)).abs() < 1e-9);
    assert!((outer.width - (frame.bounds.width + 2.0 * margin)).abs() < 1e-9);
    assert!(surface.items_in(Layer::ConstructionGrid).next().is_none());
}

#[test]
fn test_composition_order_is_stable() {
    let (frame, config) = scenario();
    let first = render_overlays(&frame, &config);
    let second = render_overlays(&frame, &config);
    let layers = |s: &brandgeom_overlay::OverlaySurface| -> Vec<Layer> {
        s.items().map(|i| i.layer).collect()
    };
    assert_eq!(layers(&first), layers(&second));
    assert_eq!(layers(&first)[0], Layer::Clearspace);
}
