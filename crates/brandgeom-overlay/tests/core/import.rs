use brandgeom_core::{ArtPath, ParseError};
use brandgeom_overlay::import::parse_source;

const LOGO: &str = r#"<?xml version="1.0"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 300 100">
  <!-- mark -->
  <g transform="translate(10 10)">
    <circle cx="40" cy="40" r="40"/>
  </g>
  <rect x="100" y="30" width="180" height="40"/>
  <defs><rect x="0" y="0" width="999" height="999"/></defs>
</svg>"#;

#[test]
fn test_parse_logo_components() {
    let art = parse_source(LOGO).unwrap();
    assert_eq!(art.components.len(), 2);
    assert_eq!(art.components[0].id, "comp-0");
    assert_eq!(art.components[1].id, "comp-1");

    let circle = art.components[0].bounds;
    assert!((circle.left - 10.0).abs() < 1e-6);
    assert!((circle.width - 80.0).abs() < 1e-6);
    assert!((art.full_bounds.right() - 280.0).abs() < 1e-6);
}

#[test]
fn test_squarest_component_is_icon() {
    let art = parse_source(LOGO).unwrap();
    assert!(art.components[0].is_icon);
    assert!(!art.components[1].is_icon);
    assert_eq!(art.wordmark().count(), 1);
    assert!((art.logomark_size() - 80.0).abs() < 1e-6);
}

#[test]
fn test_parse_is_idempotent() {
    let a = parse_source(LOGO).unwrap();
    let b = parse_source(LOGO).unwrap();
    assert_eq!(a.full_bounds, b.full_bounds);
    assert_eq!(a.segments, b.segments);
    let flags = |art: &brandgeom_overlay::ParsedArtwork| -> Vec<bool> {
        art.components.iter().map(|c| c.is_icon).collect()
    };
    assert_eq!(flags(&a), flags(&b));
    assert_eq!(a.original_source, LOGO);
}

#[test]
fn test_segments_cover_every_component() {
    let art = parse_source(LOGO).unwrap();
    let total: usize = art.components.iter().map(|c| c.path.anchors().len()).sum();
    assert_eq!(art.segments.len(), total);
}

#[test]
fn test_missing_root_is_rejected() {
    assert_eq!(
        parse_source("<html><rect width=\"1\" height=\"1\"/></html>").unwrap_err(),
        ParseError::MissingSvgRoot
    );
}

#[test]
fn test_empty_svg_falls_back_to_default_logomark() {
    let art = parse_source(r#"<svg xmlns="http://www.w3.org/2000/svg"></svg>"#).unwrap();
    assert!(art.components.is_empty());
    assert_eq!(art.logomark_size(), brandgeom_core::FALLBACK_LOGOMARK_SIZE);
}
