//! Per-overlay visual parameters.

use crate::error::ConfigError;
use crate::options::{OverlayFamily, OverlayKind};
use brandgeom_core::{hex_to_color, Color};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stroke color, opacity, and width for one overlay kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    /// Six hex digits, optionally prefixed with `#`
    pub color: String,
    /// Opacity in `[0, 1]`
    pub opacity: f64,
    /// Stroke width in surface units, strictly positive
    pub stroke_width: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self::new("3b82f6", 0.8, 1.0)
    }
}

impl StyleConfig {
    pub fn new(color: impl Into<String>, opacity: f64, stroke_width: f64) -> Self {
        Self {
            color: color.into(),
            opacity,
            stroke_width,
        }
    }

    /// Decoded color carrying this style's opacity.
    pub fn color(&self) -> Color {
        hex_to_color(&self.color, self.opacity)
    }

    /// Range checks only; hex digits are not inspected.
    pub fn validate(&self, key: &str) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(ConfigError::ValueOutOfRange {
                key: format!("{}.opacity", key),
                value: self.opacity.to_string(),
            });
        }
        if self.stroke_width <= 0.0 || !self.stroke_width.is_finite() {
            return Err(ConfigError::ValueOutOfRange {
                key: format!("{}.stroke_width", key),
                value: self.stroke_width.to_string(),
            });
        }
        if self.color.trim_start_matches('#').len() != 6 {
            return Err(ConfigError::ValueOutOfRange {
                key: format!("{}.color", key),
                value: self.color.clone(),
            });
        }
        Ok(())
    }
}

/// Default style for an overlay kind, keyed off its family.
pub fn default_style(kind: OverlayKind) -> StyleConfig {
    match kind.family() {
        OverlayFamily::Basic => StyleConfig::new("3b82f6", 0.8, 1.0),
        OverlayFamily::Proportion => StyleConfig::new("f59e0b", 0.8, 1.0),
        OverlayFamily::Measurement => StyleConfig::new("10b981", 0.8, 1.0),
        OverlayFamily::Harmony => StyleConfig::new("8b5cf6", 0.7, 1.0),
        OverlayFamily::Grid => StyleConfig::new("6b7280", 0.5, 0.5),
        OverlayFamily::Analysis => StyleConfig::new("ef4444", 0.9, 1.0),
    }
}

/// Style map for every overlay plus the clearspace and construction grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryStyles {
    pub clearspace: StyleConfig,
    pub construction_grid: StyleConfig,
    /// Overrides per kind; kinds not present use [`default_style`].
    #[serde(default)]
    pub overlays: BTreeMap<OverlayKind, StyleConfig>,
}

impl Default for GeometryStyles {
    fn default() -> Self {
        Self {
            clearspace: StyleConfig::new("ec4899", 0.6, 1.0),
            construction_grid: StyleConfig::new("94a3b8", 0.4, 0.5),
            overlays: BTreeMap::new(),
        }
    }
}

impl GeometryStyles {
    pub fn get(&self, kind: OverlayKind) -> StyleConfig {
        self.overlays
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| default_style(kind))
    }

    /// Copy with the style for `kind` replaced.
    pub fn with(&self, kind: OverlayKind, style: StyleConfig) -> Self {
        let mut next = self.clone();
        next.overlays.insert(kind, style);
        next
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.clearspace.validate("styles.clearspace")?;
        self.construction_grid.validate("styles.construction_grid")?;
        for (kind, style) in &self.overlays {
            style.validate(&format!("styles.{:?}", kind))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style_lookup() {
        let styles = GeometryStyles::default();
        assert_eq!(styles.get(OverlayKind::PixelGrid).opacity, 0.5);
        let custom = styles.with(OverlayKind::PixelGrid, StyleConfig::new("000000", 1.0, 2.0));
        assert_eq!(custom.get(OverlayKind::PixelGrid).stroke_width, 2.0);
        assert_eq!(styles.get(OverlayKind::PixelGrid).stroke_width, 0.5);
    }

    #[test]
    fn test_style_validation() {
        assert!(StyleConfig::default().validate("s").is_ok());
        assert!(StyleConfig::new("#ffffff", 1.2, 1.0).validate("s").is_err());
        assert!(StyleConfig::new("ffffff", 0.5, 0.0).validate("s").is_err());
        assert!(StyleConfig::new("fff", 0.5, 1.0).validate("s").is_err());
        // Content is not checked: six characters pass even if not hex.
        assert!(StyleConfig::new("zzzzzz", 0.5, 1.0).validate("s").is_ok());
    }
}
