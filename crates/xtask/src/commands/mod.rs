//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod inspect_map;
mod sight;

pub use inspect_map::InspectMap;
pub use sight::Sight;

use std::path::Path;

use anyhow::Result;
use hex_content::{CatalogLoader, MapLoader};
use hex_core::{Catalog, Gamemap};

/// Loads the catalog first, then the map that refers to it.
fn load_world(map: &Path, catalog: &Path) -> Result<(Catalog, Gamemap)> {
    let catalog = CatalogLoader::load(catalog)?;
    let map = MapLoader::load(map, &catalog)?;
    Ok((catalog, map))
}
