//! Geometry presets
//!
//! A preset is a named, atomic bundle of options, styles, clearspace, and grid
//! settings. Builtin presets are generated in code at startup and are never
//! persisted; user presets live behind the [`PresetStore`] boundary, whose
//! durable implementations belong to the host application.

use crate::config::{ClearspaceSettings, GridSettings, OverlayConfig};
use crate::error::PresetError;
use crate::options::{GeometryOptions, OverlayKind};
use crate::styles::GeometryStyles;
use brandgeom_core::ClearspaceUnit;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryPreset {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub builtin: bool,
    pub options: GeometryOptions,
    pub styles: GeometryStyles,
    pub clearspace: ClearspaceSettings,
    pub grid: GridSettings,
    pub created_at: DateTime<Utc>,
}

impl GeometryPreset {
    /// Capture the current configuration as a new user preset.
    pub fn from_config(
        name: impl Into<String>,
        description: Option<String>,
        config: &OverlayConfig,
    ) -> Result<Self, PresetError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PresetError::EmptyName);
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name,
            description,
            builtin: false,
            options: config.options.clone(),
            styles: config.styles.clone(),
            clearspace: config.clearspace,
            grid: config.grid,
            created_at: Utc::now(),
        })
    }

    fn builtin(id: &str, name: &str, description: &str, kinds: &[OverlayKind]) -> Self {
        let options = kinds
            .iter()
            .fold(GeometryOptions::none(), |opts, k| opts.with(*k, true));
        Self {
            id: format!("builtin-{}", id),
            name: name.to_string(),
            description: Some(description.to_string()),
            builtin: true,
            options,
            styles: GeometryStyles::default(),
            clearspace: ClearspaceSettings::default(),
            grid: GridSettings::default(),
            created_at: DateTime::<Utc>::default(),
        }
    }
}

/// The builtin presets, in display order.
pub fn builtin_presets() -> Vec<GeometryPreset> {
    use OverlayKind::*;
    let mut construction = GeometryPreset::builtin(
        "construction",
        "Construction Analysis",
        "Path-driven analysis of the real artwork",
        &[
            BezierHandles,
            UnderlyingCircles,
            ParallelFlowLines,
            AnchorClusters,
            AnchorPoints,
            TangentIntersections,
        ],
    );
    construction.grid = GridSettings {
        visible: true,
        subdivisions: 8,
    };

    let mut clearspace = GeometryPreset::builtin(
        "clearspace",
        "Clearspace Audit",
        "Clearspace zone with safe areas and bounding boxes",
        &[BoundingRects, SafeZones, CenterLines],
    );
    clearspace.clearspace = ClearspaceSettings {
        value: 0.5,
        unit: ClearspaceUnit::Logomark,
    };

    vec![
        GeometryPreset::builtin(
            "minimal",
            "Minimal",
            "Bounding boxes and center lines",
            &[BoundingRects, CenterLines],
        ),
        GeometryPreset::builtin(
            "golden",
            "Golden Proportions",
            "Golden ratio, spiral, circles, and Fibonacci squares",
            &[GoldenRatio, GoldenSpiral, GoldenCircles, FibonacciOverlay],
        ),
        construction,
        clearspace,
        GeometryPreset::builtin(
            "full",
            "Full Audit",
            "Every overlay at once",
            &OverlayKind::ALL,
        ),
    ]
}

/// Persistence boundary for user presets.
///
/// Builtin presets are always listed first and can never be saved over or
/// deleted through a store.
pub trait PresetStore {
    /// User presets currently stored.
    fn user_presets(&self) -> Vec<GeometryPreset>;

    fn save(&mut self, preset: GeometryPreset) -> Result<(), PresetError>;

    fn delete(&mut self, id: &str) -> Result<(), PresetError>;

    /// Builtin presets followed by user presets.
    fn list(&self) -> Vec<GeometryPreset> {
        let mut all = builtin_presets();
        all.extend(self.user_presets());
        all
    }

    fn get(&self, id: &str) -> Result<GeometryPreset, PresetError> {
        self.list()
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| PresetError::NotFound(id.to_string()))
    }
}

/// Process-local store, used by hosts without durable storage and in tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryPresetStore {
    presets: Vec<GeometryPreset>,
}

impl MemoryPresetStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PresetStore for MemoryPresetStore {
    fn user_presets(&self) -> Vec<GeometryPreset> {
        self.presets.clone()
    }

    fn save(&mut self, preset: GeometryPreset) -> Result<(), PresetError> {
        if preset.builtin || builtin_presets().iter().any(|b| b.id == preset.id) {
            return Err(PresetError::Builtin(preset.name));
        }
        debug!("Saving preset '{}' ({})", preset.name, preset.id);
        match self.presets.iter_mut().find(|p| p.id == preset.id) {
            Some(existing) => *existing = preset,
            None => self.presets.push(preset),
        }
        Ok(())
    }

    fn delete(&mut self, id: &str) -> Result<(), PresetError> {
        if let Some(b) = builtin_presets().into_iter().find(|b| b.id == id) {
            return Err(PresetError::Builtin(b.name));
        }
        let before = self.presets.len();
        self.presets.retain(|p| p.id != id);
        if self.presets.len() == before {
            return Err(PresetError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_presets_are_flagged_and_unique() {
        let presets = builtin_presets();
        assert!(presets.iter().all(|p| p.builtin));
        let mut ids: Vec<_> = presets.iter().map(|p| p.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), presets.len());
    }

    #[test]
    fn test_store_round_trip() {
        let mut store = MemoryPresetStore::new();
        let config = OverlayConfig::new().with_option(OverlayKind::VesicaPiscis, true);
        let preset = GeometryPreset::from_config("Mine", None, &config).unwrap();
        let id = preset.id.clone();

        store.save(preset).unwrap();
        assert_eq!(store.list().len(), builtin_presets().len() + 1);
        assert!(store
            .get(&id)
            .unwrap()
            .options
            .is_enabled(OverlayKind::VesicaPiscis));

        store.delete(&id).unwrap();
        assert_eq!(store.get(&id), Err(PresetError::NotFound(id.clone())));
        assert_eq!(store.delete(&id), Err(PresetError::NotFound(id)));
    }

    #[test]
    fn test_builtins_are_immutable() {
        let mut store = MemoryPresetStore::new();
        let builtin = builtin_presets().remove(0);
        assert!(matches!(
            store.save(builtin.clone()),
            Err(PresetError::Builtin(_))
        ));
        assert!(matches!(
            store.delete(&builtin.id),
            Err(PresetError::Builtin(_))
        ));
    }

    #[test]
    fn test_empty_name_rejected() {
        assert_eq!(
            GeometryPreset::from_config("  ", None, &OverlayConfig::new()),
            Err(PresetError::EmptyName)
        );
    }

    #[test]
    fn test_apply_preset_replaces_wholesale() {
        let config = OverlayConfig::new()
            .with_option(OverlayKind::PixelGrid, true)
            .with_clearspace(3.0, ClearspaceUnit::Inches)
            .with_real_data(true);
        let golden = builtin_presets()
            .into_iter()
            .find(|p| p.id == "builtin-golden")
            .unwrap();
        let applied = config.apply_preset(&golden);
        assert!(!applied.options.is_enabled(OverlayKind::PixelGrid));
        assert!(applied.options.is_enabled(OverlayKind::GoldenSpiral));
        assert_eq!(applied.clearspace, ClearspaceSettings::default());
        assert!(applied.use_real_data);
    }
}
