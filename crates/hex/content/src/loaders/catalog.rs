//! Terrain and feature catalog loader.

use std::path::Path;

use hex_core::{Catalog, FeatureDescriptor, TerrainDescriptor};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::loaders::{LoadResult, read_file};

/// Catalog structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogFile {
    pub terrains: Vec<TerrainDescriptor>,
    pub features: Vec<FeatureDescriptor>,
}

impl CatalogFile {
    /// Builds the in-memory catalog. Later entries replace earlier ones with
    /// the same id.
    pub fn into_catalog(self) -> Catalog {
        let mut catalog = Catalog::new();

        for terrain in self.terrains {
            if catalog.terrain_ids().any(|id| id == terrain.id) {
                warn!(terrain = %terrain.id, "duplicate terrain id, keeping the later entry");
            }
            catalog.add_terrain(terrain);
        }

        for feature in self.features {
            if catalog.feature_ids().any(|id| id == feature.id) {
                warn!(feature = %feature.id, "duplicate feature id, keeping the later entry");
            }
            catalog.add_feature(feature);
        }

        catalog
    }
}

/// Loader for terrain/feature catalogs from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load a catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing a CatalogFile
    ///
    /// # Returns
    ///
    /// Returns a Catalog ready to resolve map ids.
    pub fn load(path: &Path) -> LoadResult<Catalog> {
        let content = read_file(path)?;
        let file: CatalogFile = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse catalog RON: {}", e))?;

        let catalog = file.into_catalog();
        debug!(
            path = %path.display(),
            terrains = catalog.terrain_count(),
            features = catalog.feature_count(),
            "loaded catalog"
        );
        Ok(catalog)
    }
}
