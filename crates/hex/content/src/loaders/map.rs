//! Map text loader.
//!
//! Map files hold the grid text format verbatim; descriptor ids are resolved
//! through a catalog loaded beforehand.

use std::path::Path;

use hex_core::{Gamemap, TerrainOracle};
use tracing::debug;

use crate::loaders::{LoadResult, read_file, write_file};

/// Loader for map grids from text files.
pub struct MapLoader;

impl MapLoader {
    /// Load a map from a text file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the map text file
    /// * `oracle` - Catalog resolving terrain and feature ids
    ///
    /// # Returns
    ///
    /// Returns a Gamemap with fully computed geometry.
    pub fn load(path: &Path, oracle: &dyn TerrainOracle) -> LoadResult<Gamemap> {
        let content = read_file(path)?;
        let map = Gamemap::parse(&content, oracle)
            .map_err(|e| anyhow::anyhow!("Failed to parse map {}: {}", path.display(), e))?;

        let dims = map.dimensions();
        debug!(path = %path.display(), width = dims.width, height = dims.height, "loaded map");
        Ok(map)
    }

    /// Write a map back to a text file. Geometry is not stored.
    pub fn save(path: &Path, map: &Gamemap) -> LoadResult<()> {
        write_file(path, &map.write())
    }
}
