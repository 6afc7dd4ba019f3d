//! Real-data visibility gate.
//!
//! In real-data mode an overlay element is only kept when it touches the
//! imported artwork. Candidates are tested before insertion, so a rejected
//! candidate never reaches the surface.

use crate::surface::{ItemId, OverlaySurface, Primitive, PrimitiveStyle};
use brandgeom_core::{ArtPath, Outline};
use tracing::trace;

/// Optional input threaded into every renderer.
pub struct RenderContext<'a> {
    pub actual_paths: Vec<&'a dyn ArtPath>,
    pub use_real_data: bool,
}

impl<'a> RenderContext<'a> {
    pub fn new(actual_paths: Vec<&'a dyn ArtPath>, use_real_data: bool) -> Self {
        Self {
            actual_paths,
            use_real_data,
        }
    }

    /// Gating applies only in real-data mode with at least one path.
    pub fn is_active(&self) -> bool {
        self.use_real_data && !self.actual_paths.is_empty()
    }
}

impl std::fmt::Debug for RenderContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderContext")
            .field("actual_paths", &self.actual_paths.len())
            .field("use_real_data", &self.use_real_data)
            .finish()
    }
}

/// True if `outline` crosses any of `paths`; stops at the first hit.
pub fn intersects_any_path(outline: &Outline, paths: &[&dyn ArtPath]) -> bool {
    paths.iter().any(|p| p.intersects(outline))
}

/// True when `ctx` is gating and `primitive` touches none of its paths.
pub fn is_gated_out(primitive: &Primitive, ctx: Option<&RenderContext>) -> bool {
    match ctx {
        Some(ctx) if ctx.is_active() => {
            !intersects_any_path(&primitive.outline(), &ctx.actual_paths)
        }
        _ => false,
    }
}

/// Add `primitive` with the style from `style_fn` unless gated out.
///
/// Returns the id of the kept item. `style_fn` is not called for a rejected
/// candidate.
pub fn show_if_intersects<F>(
    surface: &mut OverlaySurface,
    primitive: Primitive,
    ctx: Option<&RenderContext>,
    style_fn: F,
) -> Option<ItemId>
where
    F: FnOnce() -> PrimitiveStyle,
{
    if is_gated_out(&primitive, ctx) {
        trace!("Gated out {:?}", primitive);
        return None;
    }
    Some(surface.add(primitive, style_fn()))
}
