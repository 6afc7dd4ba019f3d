//! BrandGeom Settings Crate
//!
//! Handles overlay configuration, per-overlay styles, and geometry presets.

pub mod config;
pub mod error;
pub mod options;
pub mod presets;
pub mod styles;

pub use config::{ClearspaceSettings, GridSettings, OverlayConfig, MAX_GRID_SUBDIVISIONS};
pub use error::{ConfigError, PresetError, SettingsError, SettingsResult};
pub use options::{GeometryOptions, OverlayFamily, OverlayKind};
pub use presets::{builtin_presets, GeometryPreset, MemoryPresetStore, PresetStore};
pub use styles::{default_style, GeometryStyles, StyleConfig};
