//! # BrandGeom Core
//!
//! Core types and utilities for BrandGeom.
//! Provides the geometry value types, error types, clearspace units, and the
//! [`ArtPath`] capability trait through which overlay renderers read imported
//! artwork.

pub mod color;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod path;
pub mod units;

pub use color::{hex_to_color, Color};
pub use constants::{FALLBACK_LOGOMARK_SIZE, FIBONACCI, PHI};
pub use error::{Error, ParseError, RenderError, Result};
pub use geometry::{
    circumcircle, clip_line_to_rect, line_intersection, segment_intersection, Bounds, Point,
};
pub use path::{ArtPath, BezierSegment, Outline, PolylinePath};
pub use units::ClearspaceUnit;
