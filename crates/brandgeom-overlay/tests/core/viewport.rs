use brandgeom_overlay::import::parse_source;
use brandgeom_overlay::viewport::{ArtworkFrame, Viewport, FRAME_PADDING, MAX_ZOOM, MIN_ZOOM};

#[test]
fn test_default_viewport() {
    let vp = Viewport::default();
    assert_eq!((vp.width(), vp.height(), vp.zoom()), (800.0, 600.0, 1.0));
    assert_eq!(vp.to_string(), "800x600 @ 1.00x");
}

#[test]
fn test_zoom_clamps_by_ignoring() {
    let mut vp = Viewport::new(100.0, 100.0);
    vp.set_zoom(MAX_ZOOM);
    vp.zoom_in();
    assert_eq!(vp.zoom(), MAX_ZOOM);
    vp.set_zoom(MIN_ZOOM);
    vp.zoom_out();
    assert_eq!(vp.zoom(), MIN_ZOOM);
}

#[test]
fn test_wide_artwork_fits_width() {
    let art = parse_source(
        r#"<svg xmlns="http://www.w3.org/2000/svg"><rect x="0" y="0" width="400" height="100"/></svg>"#,
    )
    .unwrap();
    let frame = ArtworkFrame::fit(&art, Viewport::new(200.0, 200.0));
    let expected = 200.0 * (1.0 - 2.0 * FRAME_PADDING);
    assert!((frame.bounds.width - expected).abs() < 1e-9);
    assert!((frame.bounds.left - 200.0 * FRAME_PADDING).abs() < 1e-9);
    assert!((frame.bounds.center().y - 100.0).abs() < 1e-9);
}
