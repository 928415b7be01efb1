//! Hex-grid spatial model shared by every world subsystem.
//!
//! `hex-core` owns the coordinate math of the offset-column hex layout, the
//! per-tile corner/normal geometry derived from elevation, the cliff/neighbour
//! classification kept consistent across edits, and the line-of-sight march.
//! Rendering, pathfinding, combat and the editor consume the read-only views
//! exposed here and mutate the grid only through [`map::Gamemap`].
pub mod config;
pub mod coords;
pub mod env;
pub mod error;
pub mod map;
pub mod sight;

pub use config::MapConfig;
pub use coords::{
    Direction, Location, adjacent_direction, adjacent_tiles, distance_between, main_direction,
    tile_in_direction, tile_ring, tile_strip, tiles_adjacent, tiles_in_radius,
};
pub use env::{
    Catalog, FeatureDescriptor, FeatureHandle, TerrainDescriptor, TerrainHandle, TerrainOracle,
    variant_seed,
};
pub use error::{ErrorSeverity, HexError};
pub use map::{
    Border, CacheFlags, Gamemap, Invalidation, Link, MapDimensions, MapParseError, Point,
    Relation, Tile, TileCache, TileId,
};
pub use sight::{SightOptions, SightOutcome, line_of_sight, tile_in_the_way, trace_sight};
