use brandgeom_overlay::{Layer, OverlayPipeline, Viewport};
use brandgeom_settings::{GeometryOptions, OverlayConfig, OverlayKind};

const TWO_PARTS: &str = r#"<svg xmlns="http://www.w3.org/2000/svg">
    <rect x="0" y="0" width="50" height="50"/>
    <rect x="70" y="15" width="120" height="20"/>
</svg>"#;

#[test]
fn test_viewport_changes_do_not_reparse() {
    let mut pipeline = OverlayPipeline::new(OverlayConfig::default(), Viewport::new(400.0, 200.0));
    pipeline.load_source(TWO_PARTS).unwrap();
    for (w, h) in [(800.0, 400.0), (300.0, 300.0), (1024.0, 768.0)] {
        pipeline.resize(w, h);
    }
    assert_eq!(pipeline.ingest_count(), 1);
    assert_eq!(pipeline.redraw_count(), 4);
    assert_eq!(pipeline.viewport().width(), 1024.0);
}

#[test]
fn test_config_change_replaces_layers() {
    let mut pipeline = OverlayPipeline::new(OverlayConfig::default(), Viewport::new(400.0, 200.0));
    pipeline.load_source(TWO_PARTS).unwrap();
    assert!(pipeline
        .surface()
        .items_in(Layer::Overlay(OverlayKind::CenterLines))
        .next()
        .is_some());

    let config = OverlayConfig::default()
        .with_options(GeometryOptions::none())
        .with_option(OverlayKind::SafeZones, true);
    let surface = pipeline.set_config(config);
    assert!(surface
        .items_in(Layer::Overlay(OverlayKind::CenterLines))
        .next()
        .is_none());
    assert!(surface
        .items_in(Layer::Overlay(OverlayKind::SafeZones))
        .next()
        .is_some());
}

#[test]
fn test_inversion_flips_every_flag() {
    let mut pipeline = OverlayPipeline::default();
    pipeline.load_source(TWO_PARTS).unwrap();
    let before: Vec<bool> = pipeline
        .artwork()
        .unwrap()
        .components
        .iter()
        .map(|c| c.is_icon)
        .collect();
    assert_eq!(before, vec![true, false]);

    pipeline.invert_icons();
    let after: Vec<bool> = pipeline
        .artwork()
        .unwrap()
        .components
        .iter()
        .map(|c| c.is_icon)
        .collect();
    assert_eq!(after, vec![false, true]);
}
