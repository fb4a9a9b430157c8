//! Configuration of the demo, optionally loaded from a TOML file.

use std::path::Path;

use anyhow::{ensure, Context, Result};
use octbox_index::OctreeConfig;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Half the side length of the cubic root region centered at the origin.
    pub half_extent: f64,
    /// Side length of the inserted cubes.
    pub object_size: f64,
    pub octree: OctreeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            half_extent: 500.0,
            object_size: 1.0,
            octree: OctreeConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content).context("Failed to parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.half_extent.is_finite() && self.half_extent > 0.0,
            "half_extent must be positive, got {}",
            self.half_extent
        );
        ensure!(
            self.object_size.is_finite()
                && self.object_size >= 0.0
                && self.object_size <= self.half_extent,
            "object_size must be between 0 and half_extent, got {}",
            self.object_size
        );
        self.octree.validate().context("Invalid [octree] table")?;
        Ok(())
    }
}
