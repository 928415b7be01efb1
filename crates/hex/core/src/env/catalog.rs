use std::collections::BTreeMap;
use std::sync::Arc;

use super::{FeatureDescriptor, FeatureHandle, TerrainDescriptor, TerrainHandle, TerrainOracle};

/// In-memory [`TerrainOracle`] keyed by descriptor id.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    terrains: BTreeMap<String, TerrainHandle>,
    features: BTreeMap<String, FeatureHandle>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a terrain, replacing any previous descriptor with the same id.
    pub fn add_terrain(&mut self, terrain: TerrainDescriptor) -> TerrainHandle {
        let handle = Arc::new(terrain);
        self.terrains.insert(handle.id.clone(), Arc::clone(&handle));
        handle
    }

    /// Registers a feature, replacing any previous descriptor with the same id.
    pub fn add_feature(&mut self, feature: FeatureDescriptor) -> FeatureHandle {
        let handle = Arc::new(feature);
        self.features.insert(handle.id.clone(), Arc::clone(&handle));
        handle
    }

    pub fn with_terrain(mut self, terrain: TerrainDescriptor) -> Self {
        self.add_terrain(terrain);
        self
    }

    pub fn with_feature(mut self, feature: FeatureDescriptor) -> Self {
        self.add_feature(feature);
        self
    }

    /// Terrain ids in sorted order (used by the editor palette).
    pub fn terrain_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.terrains.keys().map(String::as_str)
    }

    /// Feature ids in sorted order.
    pub fn feature_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.features.keys().map(String::as_str)
    }

    pub fn terrain_count(&self) -> usize {
        self.terrains.len()
    }

    pub fn feature_count(&self) -> usize {
        self.features.len()
    }
}

impl TerrainOracle for Catalog {
    fn terrain(&self, id: &str) -> Option<TerrainHandle> {
        self.terrains.get(id).cloned()
    }

    fn feature(&self, id: &str) -> Option<FeatureHandle> {
        self.features.get(id).cloned()
    }
}
