//! Overlay configuration management for BrandGeom
//!
//! Provides the configuration object consumed by the composition layer,
//! its file handling (JSON or TOML, chosen by extension), and validation.
//!
//! Configuration is organized into logical sections:
//! - Overlay switches (which renderers run)
//! - Styles (color, opacity, stroke width per overlay)
//! - Clearspace (margin value and unit)
//! - Construction grid (visibility and subdivisions)
//!
//! A configuration is a value: every mutation helper returns a new config and
//! leaves the receiver untouched.

use crate::error::{ConfigError, SettingsError, SettingsResult};
use crate::options::{GeometryOptions, OverlayKind};
use crate::presets::GeometryPreset;
use crate::styles::{GeometryStyles, StyleConfig};
use brandgeom_core::ClearspaceUnit;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Maximum construction-grid subdivisions accepted by validation.
pub const MAX_GRID_SUBDIVISIONS: u32 = 64;

/// Clearspace margin around the artwork
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClearspaceSettings {
    /// Margin value in `unit`; zero hides the clearspace zone
    pub value: f64,
    /// Unit of `value`
    pub unit: ClearspaceUnit,
}

impl Default for ClearspaceSettings {
    fn default() -> Self {
        Self {
            value: 1.0,
            unit: ClearspaceUnit::Logomark,
        }
    }
}

/// Construction grid derived from the logomark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSettings {
    /// Whether the grid is drawn
    pub visible: bool,
    /// Number of cells across the logomark
    pub subdivisions: u32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            visible: false,
            subdivisions: 8,
        }
    }
}

/// Complete overlay configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct OverlayConfig {
    /// Suppress overlay elements that do not touch the real artwork
    #[serde(default)]
    pub use_real_data: bool,
    /// Which overlays are enabled
    #[serde(default)]
    pub options: GeometryOptions,
    /// Visual parameters
    #[serde(default)]
    pub styles: GeometryStyles,
    /// Clearspace zone
    #[serde(default)]
    pub clearspace: ClearspaceSettings,
    /// Construction grid
    #[serde(default)]
    pub grid: GridSettings,
}

impl OverlayConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default location: `<config dir>/brandgeom/overlay.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDirectory)?;
        Ok(dir.join("brandgeom").join("overlay.toml"))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match extension(path) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into())
            }
        };

        config.validate()?;
        debug!("Loaded overlay config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match extension(path) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into())
            }
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.styles.validate()?;

        if !(self.clearspace.value >= 0.0 && self.clearspace.value.is_finite()) {
            return Err(ConfigError::ValueOutOfRange {
                key: "clearspace.value".to_string(),
                value: self.clearspace.value.to_string(),
            });
        }

        if self.grid.subdivisions == 0 || self.grid.subdivisions > MAX_GRID_SUBDIVISIONS {
            return Err(ConfigError::ValueOutOfRange {
                key: "grid.subdivisions".to_string(),
                value: self.grid.subdivisions.to_string(),
            });
        }

        Ok(())
    }

    pub fn with_option(&self, kind: OverlayKind, enabled: bool) -> Self {
        Self {
            options: self.options.with(kind, enabled),
            ..self.clone()
        }
    }

    pub fn with_options(&self, options: GeometryOptions) -> Self {
        Self {
            options,
            ..self.clone()
        }
    }

    pub fn with_style(&self, kind: OverlayKind, style: StyleConfig) -> Self {
        Self {
            styles: self.styles.with(kind, style),
            ..self.clone()
        }
    }

    pub fn with_clearspace(&self, value: f64, unit: ClearspaceUnit) -> Self {
        Self {
            clearspace: ClearspaceSettings { value, unit },
            ..self.clone()
        }
    }

    pub fn with_grid(&self, visible: bool, subdivisions: u32) -> Self {
        Self {
            grid: GridSettings {
                visible,
                subdivisions,
            },
            ..self.clone()
        }
    }

    pub fn with_real_data(&self, use_real_data: bool) -> Self {
        Self {
            use_real_data,
            ..self.clone()
        }
    }

    /// Replace options, styles, clearspace, and grid with the preset's bundle.
    ///
    /// No merging: anything the preset carries wins wholesale. The real-data
    /// mode is an analysis switch, not part of a preset, and is kept.
    pub fn apply_preset(&self, preset: &GeometryPreset) -> Self {
        debug!("Applying preset '{}'", preset.name);
        Self {
            use_real_data: self.use_real_data,
            options: preset.options.clone(),
            styles: preset.styles.clone(),
            clearspace: preset.clearspace,
            grid: preset.grid,
        }
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|e| e.to_str())
}
