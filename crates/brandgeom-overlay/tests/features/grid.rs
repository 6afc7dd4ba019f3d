use brandgeom_overlay::{generate_construction_grid_lines, import::parse_source, ParsedArtwork};
use proptest::prelude::*;

fn icon_and_wordmark() -> ParsedArtwork {
    parse_source(
        r#"<svg xmlns="http://www.w3.org/2000/svg">
            <rect x="0" y="0" width="100" height="100"/>
            <rect x="100" y="100" width="100" height="100"/>
        </svg>"#,
    )
    .unwrap()
}

#[test]
fn test_grid_evenness_eight_subdivisions() {
    let art = icon_and_wordmark();
    assert_eq!(art.full_bounds.width, 200.0);
    let grid = generate_construction_grid_lines(&art.full_bounds, &art.components, 8);

    assert_eq!(grid.vertical.len(), 19);
    assert_eq!(grid.vertical.first(), Some(&-12.5));
    assert_eq!(grid.vertical.last(), Some(&212.5));
    assert!(grid.vertical.windows(2).all(|w| w[1] - w[0] == 12.5));
    assert_eq!(grid.horizontal, grid.vertical);
}

proptest! {
    #[test]
    fn prop_grid_is_even_and_covers_bounds(subdivisions in 1u32..=64) {
        let art = icon_and_wordmark();
        let b = art.full_bounds;
        let grid = generate_construction_grid_lines(&b, &art.components, subdivisions);
        let step = 100.0 / f64::from(subdivisions);

        for w in grid.vertical.windows(2) {
            prop_assert!((w[1] - w[0] - step).abs() < 1e-9);
        }
        prop_assert!(grid.vertical.contains(&0.0));
        prop_assert!(grid.vertical[0] <= b.left + 1e-9);
        prop_assert!(*grid.vertical.last().unwrap() >= b.right() - 1e-9);
    }
}
