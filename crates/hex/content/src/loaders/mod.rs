//! Content loaders for reading world data from files.

pub mod catalog;
pub mod config;
pub mod map;

pub use catalog::{CatalogFile, CatalogLoader};
pub use config::ConfigLoader;
pub use map::MapLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Helper function to write file contents.
pub(crate) fn write_file(path: &Path, contents: &str) -> LoadResult<()> {
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write file {}: {}", path.display(), e))
}
