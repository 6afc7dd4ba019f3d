use brandgeom_overlay::{import::parse_source, render_overlays, ArtworkFrame, Layer, Primitive, Viewport};
use brandgeom_settings::{GeometryOptions, OverlayConfig, OverlayKind};

const LOGO: &str = r#"<svg xmlns="http://www.w3.org/2000/svg">
    <circle cx="50" cy="50" r="40"/>
    <rect x="120" y="30" width="160" height="40"/>
</svg>"#;

fn frame() -> ArtworkFrame {
    ArtworkFrame::fit(&parse_source(LOGO).unwrap(), Viewport::new(600.0, 300.0))
}

fn count(frame: &ArtworkFrame, kind: OverlayKind, real_data: bool) -> usize {
    let config = OverlayConfig::default()
        .with_options(GeometryOptions::none())
        .with_option(kind, true)
        .with_real_data(real_data);
    render_overlays(frame, &config)
        .items_in(Layer::Overlay(kind))
        .count()
}

#[test]
fn test_real_data_overlays_need_real_data() {
    let frame = frame();
    for kind in OverlayKind::ALL.iter().copied().filter(|k| k.requires_real_data()) {
        assert_eq!(count(&frame, kind, false), 0, "{kind} drew in decorative mode");
    }
    assert!(count(&frame, OverlayKind::AnchorPoints, true) > 0);
    assert!(count(&frame, OverlayKind::PathDirection, true) > 0);
}

#[test]
fn test_gate_only_removes() {
    let frame = frame();
    for kind in OverlayKind::ALL.iter().copied().filter(|k| !k.requires_real_data()) {
        assert!(
            count(&frame, kind, true) <= count(&frame, kind, false),
            "{kind} grew under the gate"
        );
    }
}

#[test]
fn test_anchor_markers_by_smoothness() {
    let frame = frame();
    let config = OverlayConfig::default()
        .with_options(GeometryOptions::none())
        .with_option(OverlayKind::AnchorPoints, true)
        .with_real_data(true);
    let surface = render_overlays(&frame, &config);
    let items: Vec<_> = surface
        .items_in(Layer::Overlay(OverlayKind::AnchorPoints))
        .collect();
    let circles = items
        .iter()
        .filter(|i| matches!(i.primitive, Primitive::Circle { .. }))
        .count();
    let squares = items
        .iter()
        .filter(|i| matches!(i.primitive, Primitive::Rect(_)))
        .count();
    // the circle's anchors are smooth, the rectangle's corners are not
    assert!(circles >= 4);
    assert!(squares >= 4);
}

#[test]
fn test_bezier_handles_work_without_real_data() {
    let frame = frame();
    assert!(count(&frame, OverlayKind::BezierHandles, false) > 0);
}
