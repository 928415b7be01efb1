//! Tile storage, geometry and the mutation operations that keep it consistent.
//!
//! A [`Gamemap`] owns every [`Tile`] in one row-major vector. Relations between
//! tiles are stored as [`Location`]s and resolved through the map on demand, so
//! cloning or rebuilding the vector never leaves dangling references behind.
mod cache;
mod gamemap;
pub mod geometry;
mod parse;
mod tile;

pub use cache::{CacheFlags, Invalidation, TileCache};
pub use gamemap::{Border, Gamemap};
pub use parse::MapParseError;
pub use tile::{Link, Point, Relation, Tile, TileId};

use crate::coords::Location;

/// Width and height of a map, in tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn contains(&self, loc: Location) -> bool {
        loc.col >= 0
            && loc.row >= 0
            && (loc.col as u32) < self.width
            && (loc.row as u32) < self.height
    }

    /// Row-major index of an in-bounds location.
    pub(crate) fn index_of(&self, loc: Location) -> Option<usize> {
        self.contains(loc)
            .then(|| loc.row as usize * self.width as usize + loc.col as usize)
    }

    /// Location of the tile stored at a row-major index.
    pub(crate) fn location_of(&self, index: usize) -> Location {
        let width = self.width as usize;
        Location::new((index % width) as i32, (index / width) as i32)
    }
}
