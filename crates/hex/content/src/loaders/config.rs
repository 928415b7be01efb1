//! Map configuration loader.

use std::path::Path;

use hex_core::MapConfig;

use crate::loaders::{LoadResult, read_file};

/// Reads sight settings (`eye_height`, `sight_step`) from TOML.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Keys absent from the file keep their [`MapConfig::default`] values;
    /// an empty file yields the defaults.
    pub fn load(path: &Path) -> LoadResult<MapConfig> {
        let content = read_file(path)?;
        let config: MapConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse map config {}: {}", path.display(), e))?;

        Ok(config)
    }
}
