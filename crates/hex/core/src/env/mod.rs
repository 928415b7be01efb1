//! Read-only terrain and feature catalogs.
//!
//! Descriptors are loaded once, before any map, and tiles keep shared
//! immutable handles into them. The catalog is passed explicitly to every
//! operation that resolves an id, so there is no process-wide registry.
mod catalog;
mod terrain;

pub use catalog::Catalog;
pub use terrain::{FeatureDescriptor, FeatureHandle, TerrainDescriptor, TerrainHandle, variant_seed};

/// Lookup interface for terrain and feature descriptors keyed by string id.
///
/// Unknown ids are not an error: they resolve to `None` and the tile simply
/// carries no descriptor.
pub trait TerrainOracle: Send + Sync {
    fn terrain(&self, id: &str) -> Option<TerrainHandle>;

    fn feature(&self, id: &str) -> Option<FeatureHandle>;
}
