//! Clearspace zone and construction grid, drawn beneath every overlay.

use crate::artwork::{compute_clearspace_zones, generate_construction_grid_lines, VectorComponent};
use crate::surface::{OverlaySurface, Primitive, PrimitiveStyle};
use brandgeom_core::{Bounds, Point};
use brandgeom_settings::{ClearspaceSettings, GridSettings, StyleConfig};
use tracing::trace;

/// Dashed rectangle around `bounds` at the clearspace margin.
///
/// Nothing is drawn for a zero margin.
pub fn clearspace(
    surface: &mut OverlaySurface,
    bounds: &Bounds,
    settings: &ClearspaceSettings,
    logomark_size: f64,
    style: &StyleConfig,
) {
    if !(settings.value > 0.0) {
        trace!("Clearspace hidden");
        return;
    }
    let zones = compute_clearspace_zones(bounds, settings.value, settings.unit, logomark_size);
    surface.add(
        Primitive::Rect(zones.outer(bounds)),
        PrimitiveStyle::from_config(style).dashed(6.0, 4.0),
    );
}

/// Construction grid lines spanning the grid's own extent.
pub fn construction_grid(
    surface: &mut OverlaySurface,
    bounds: &Bounds,
    components: &[VectorComponent],
    settings: &GridSettings,
    style: &StyleConfig,
) {
    if !settings.visible {
        return;
    }
    let grid = generate_construction_grid_lines(bounds, components, settings.subdivisions);
    let (Some(&x0), Some(&x1), Some(&y0), Some(&y1)) = (
        grid.vertical.first(),
        grid.vertical.last(),
        grid.horizontal.first(),
        grid.horizontal.last(),
    ) else {
        trace!("Construction grid is empty");
        return;
    };
    let style = PrimitiveStyle::from_config(style);
    for y in &grid.horizontal {
        surface.add(Primitive::line(Point::new(x0, *y), Point::new(x1, *y)), style);
    }
    for x in &grid.vertical {
        surface.add(Primitive::line(Point::new(*x, y0), Point::new(*x, y1)), style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandgeom_core::ClearspaceUnit;

    #[test]
    fn test_clearspace_rect() {
        let mut surface = OverlaySurface::new();
        let b = Bounds::new(10.0, 10.0, 80.0, 80.0);
        let settings = ClearspaceSettings {
            value: 0.5,
            unit: ClearspaceUnit::Logomark,
        };
        clearspace(&mut surface, &b, &settings, 80.0, &StyleConfig::default());
        let item = surface.items().next().unwrap();
        assert_eq!(item.primitive, Primitive::Rect(Bounds::new(-30.0, -30.0, 160.0, 160.0)));
        assert_eq!(item.style.dash, Some([6.0, 4.0]));
    }

    #[test]
    fn test_zero_clearspace_hidden() {
        let mut surface = OverlaySurface::new();
        let settings = ClearspaceSettings {
            value: 0.0,
            unit: ClearspaceUnit::Pixels,
        };
        clearspace(
            &mut surface,
            &Bounds::new(0.0, 0.0, 10.0, 10.0),
            &settings,
            10.0,
            &StyleConfig::default(),
        );
        assert!(surface.is_empty());
    }

    #[test]
    fn test_grid_lines_follow_settings() {
        let b = Bounds::new(0.0, 0.0, 80.0, 40.0);
        let mut surface = OverlaySurface::new();
        let hidden = GridSettings {
            visible: false,
            subdivisions: 4,
        };
        construction_grid(&mut surface, &b, &[], &hidden, &StyleConfig::default());
        assert!(surface.is_empty());

        let shown = GridSettings {
            visible: true,
            subdivisions: 4,
        };
        construction_grid(&mut surface, &b, &[], &shown, &StyleConfig::default());
        assert_eq!(surface.len(), 14);
        let first = &surface.items().next().unwrap().primitive;
        assert_eq!(
            *first,
            Primitive::line(Point::new(-20.0, -10.0), Point::new(100.0, -10.0))
        );
    }
}
