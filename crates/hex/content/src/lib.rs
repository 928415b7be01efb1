//! Data-driven content for the hex world.
//!
//! Loaders turn files on disk into `hex-core` values:
//! - Terrain and feature catalogs (RON)
//! - Map text files (the comma/whitespace grid format)
//! - Map configuration (TOML)
//!
//! Catalogs must be loaded before any map, since map parsing resolves its
//! terrain and feature ids through them.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{CatalogFile, CatalogLoader, ConfigLoader, LoadResult, MapLoader};
