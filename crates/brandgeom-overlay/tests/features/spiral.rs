use brandgeom_core::Bounds;
use brandgeom_overlay::renderers::{proportion::golden_spiral, OverlayInput};
use brandgeom_overlay::{OverlaySurface, Primitive, SquareSubdivision};
use brandgeom_settings::StyleConfig;
use proptest::prelude::*;

fn spiral(bounds: Bounds) -> OverlaySurface {
    let style = StyleConfig::default();
    let input = OverlayInput {
        bounds,
        components: &[],
        segments: &[],
        style: &style,
    };
    let mut surface = OverlaySurface::new();
    golden_spiral(&mut surface, &input, None);
    surface
}

fn arcs(surface: &OverlaySurface) -> usize {
    surface
        .items()
        .filter(|i| matches!(i.primitive, Primitive::Arc { .. }))
        .count()
}

#[test]
fn test_spiral_on_logo_sized_bounds() {
    let surface = spiral(Bounds::new(100.0, 100.0, 300.0, 200.0));
    let n = arcs(&surface);
    assert!(n > 0 && n <= 12);
    // outer rectangle is the only one at full opacity
    let first = surface.items().next().unwrap();
    assert!(matches!(first.primitive, Primitive::Rect(_)));
}

#[test]
fn test_subdivision_squares_shrink() {
    let outer = Bounds::new(0.0, 0.0, 161.8, 100.0);
    let sides: Vec<f64> = SquareSubdivision::new(outer)
        .map(|s| s.square.width)
        .collect();
    assert!(!sides.is_empty());
    assert!(sides.windows(2).all(|w| w[1] <= w[0] + 1e-9));
}

proptest! {
    #[test]
    fn prop_spiral_is_bounded(
        left in -500.0f64..500.0,
        top in -500.0f64..500.0,
        width in 1.0f64..2000.0,
        height in 1.0f64..2000.0,
    ) {
        let surface = spiral(Bounds::new(left, top, width, height));
        prop_assert!(arcs(&surface) <= 12);
        let full_alpha = StyleConfig::default().color().a;
        let outer_rects = surface
            .items()
            .filter(|i| matches!(i.primitive, Primitive::Rect(_)))
            .filter(|i| (i.style.stroke.a - full_alpha).abs() < 1e-12)
            .count();
        prop_assert_eq!(outer_rects, 1);
    }
}
