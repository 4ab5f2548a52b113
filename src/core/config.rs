//! Sculptor configuration.
//!
//! Loaded from a JSON file; every section falls back to its defaults so a
//! partial file only needs the values it overrides.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::Result;
use crate::terrain::triangulation::checked_sample_count;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Full sculptor configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SculptConfig {
    /// Height grid dimensions and elevation limits.
    pub grid: GridConfig,
    /// Brush parameter ranges and starting values.
    pub brush: BrushConfig,
    /// Where history files are written.
    pub storage: StorageConfig,
}

impl SculptConfig {
    /// Load from a JSON file and validate.
    pub fn load_sync(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save to a JSON file, creating parent directories.
    pub fn save_sync(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, json)?;
        Ok(())
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<()> {
        let grid = &self.grid;
        if grid.width == 0 || grid.height == 0 {
            return Err(Error::Config(format!(
                "grid must be at least 1x1, got {}x{}",
                grid.width, grid.height
            )));
        }
        if checked_sample_count(grid.width, grid.height).is_none() {
            return Err(Error::Config(format!(
                "{}x{} grid exceeds the u32 sample index range",
                grid.width, grid.height
            )));
        }
        if !(grid.min_elevation <= grid.max_elevation) {
            return Err(Error::Config(format!(
                "min_elevation {} exceeds max_elevation {}",
                grid.min_elevation, grid.max_elevation
            )));
        }

        check_range("size_range", self.brush.size_range, self.brush.default_size)?;
        check_range("weight_range", self.brush.weight_range, self.brush.default_weight)?;

        if self.storage.extension.contains(['.', '/', '\\']) {
            return Err(Error::Config(format!(
                "extension {:?} must be a bare extension",
                self.storage.extension
            )));
        }

        Ok(())
    }
}

fn check_range(name: &str, range: [f32; 2], default: f32) -> Result<()> {
    let [min, max] = range;
    if !(min > 0.0 && min <= max) {
        return Err(Error::Config(format!(
            "{} must be positive and ordered, got [{}, {}]",
            name, min, max
        )));
    }
    if !(min..=max).contains(&default) {
        return Err(Error::Config(format!(
            "default for {} ({}) lies outside [{}, {}]",
            name, default, min, max
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Height grid shape. Width and height count cells, so the grid holds
/// `(width + 1) * (height + 1)` samples.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub width: u32,
    pub height: u32,
    pub min_elevation: f32,
    pub max_elevation: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            min_elevation: -10.0,
            max_elevation: 10.0,
        }
    }
}

/// Brush size (radius) and weight (strength) limits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushConfig {
    /// Inclusive [min, max] radius.
    pub size_range: [f32; 2],
    /// Inclusive [min, max] strength.
    pub weight_range: [f32; 2],
    pub default_size: f32,
    pub default_weight: f32,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            size_range: [1.0, 50.0],
            weight_range: [1.0, 50.0],
            default_size: 5.0,
            default_weight: 1.0,
        }
    }
}

/// History file location.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory that history file names are resolved against.
    pub data_dir: PathBuf,
    /// Extension appended to names given without one.
    pub extension: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("sculpt_data"),
            extension: "rksh".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_is_valid() {
        let config = SculptConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.grid.width, 20);
        assert_eq!(config.brush.size_range, [1.0, 50.0]);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SculptConfig =
            serde_json::from_str(r#"{ "grid": { "width": 4, "height": 4 } }"#).unwrap();
        assert_eq!(config.grid.width, 4);
        assert_eq!(config.grid.max_elevation, 10.0);
        assert_eq!(config.brush.default_size, 5.0);
    }

    #[test]
    fn test_rejects_empty_grid() {
        let mut config = SculptConfig::default();
        config.grid.width = 0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_rejects_unindexable_grid() {
        let mut config = SculptConfig::default();
        config.grid.width = u32::MAX;
        config.grid.height = u32::MAX;
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        config.grid.width = 65535;
        config.grid.height = 65535;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_inverted_elevation() {
        let mut config = SculptConfig::default();
        config.grid.min_elevation = 5.0;
        config.grid.max_elevation = -5.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_default_outside_range() {
        let mut config = SculptConfig::default();
        config.brush.default_weight = 80.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_dir.path().join("nested").join("sculpt.json");

        let mut config = SculptConfig::default();
        config.grid.width = 32;
        config.storage.data_dir = temp_dir.path().join("histories");
        config.save_sync(&path).expect("save failed");

        let loaded = SculptConfig::load_sync(&path).expect("load failed");
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_invalid_json() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(SculptConfig::load_sync(&path), Err(Error::Config(_))));
    }
}
