use arrayvec::ArrayVec;
use tracing::{debug, warn};

use super::geometry::{self, CornerSide};
use super::parse::{self, MapParseError};
use super::{CacheFlags, Invalidation, Link, MapDimensions, Point, Relation, Tile};
use crate::config::MapConfig;
use crate::coords::{Direction, Location};
use crate::env::TerrainOracle;

/// What [`Gamemap::closest_tile`] does with points outside the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Border {
    /// Off-grid points resolve to no tile.
    #[default]
    Reject,
    /// Off-grid points resolve to the nearest edge tile.
    Clamp,
}

/// Rectangular grid of tiles in row-major order.
///
/// Every public operation leaves all tiles with fully computed geometry and
/// with relations that mirror each other across every shared edge.
///
/// A clone is a separate map: its tiles get fresh ids and its invalidation
/// queue starts empty.
#[derive(Debug)]
pub struct Gamemap {
    tiles: Vec<Tile>,
    dims: MapDimensions,
    pending: Vec<Invalidation>,
}

impl Clone for Gamemap {
    fn clone(&self) -> Self {
        Self {
            tiles: self.tiles.clone(),
            dims: self.dims,
            pending: Vec::new(),
        }
    }
}

impl Gamemap {
    /// Parses map text, resolving terrain and feature ids through `oracle`.
    pub fn parse(text: &str, oracle: &dyn TerrainOracle) -> Result<Self, MapParseError> {
        let (tiles, dims) = parse::read_tiles(text, oracle)?;
        debug!(width = dims.width, height = dims.height, "parsed map");
        Ok(Self::from_tiles(tiles, dims))
    }

    /// Builds a map from tiles already in row-major order.
    ///
    /// # Panics
    ///
    /// If the number of tiles does not match `dims`.
    pub fn from_tiles(mut tiles: Vec<Tile>, dims: MapDimensions) -> Self {
        assert_eq!(
            tiles.len(),
            dims.area(),
            "tile count does not match {}x{} map",
            dims.width,
            dims.height
        );

        for (index, tile) in tiles.iter_mut().enumerate() {
            tile.relocate(dims.location_of(index));
        }

        let mut map = Self {
            tiles,
            dims,
            pending: Vec::new(),
        };
        map.init_tiles();
        map
    }

    /// Serializes heights and descriptor ids; geometry is never written.
    pub fn write(&self) -> String {
        parse::write_tiles(&self.tiles, self.dims)
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dims
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn contains(&self, loc: Location) -> bool {
        self.dims.contains(loc)
    }

    /// # Panics
    ///
    /// If `loc` is off the map; check with [`contains`](Self::contains) first.
    pub fn tile(&self, loc: Location) -> &Tile {
        &self.tiles[self.index(loc)]
    }

    pub fn try_tile(&self, loc: Location) -> Option<&Tile> {
        self.dims.index_of(loc).map(|index| &self.tiles[index])
    }

    /// Resolves a planar world point to the cell containing it.
    ///
    /// Each axis rounds to the nearer cell, with exact halves going to the
    /// lower one; odd columns are shifted half a row before rounding rows.
    pub fn closest_tile(&self, x: f32, y: f32, border: Border) -> Option<&Tile> {
        let max_col = self.dims.width.saturating_sub(1) as i32;
        let max_row = self.dims.height.saturating_sub(1) as i32;

        let mut col = round_half_down(x / MapConfig::X_RATIO);
        if border == Border::Clamp {
            col = col.clamp(0, max_col);
        }

        let y = if Location::new(col, 0).is_odd_column() { y - 0.5 } else { y };
        let mut row = round_half_down(y);
        if border == Border::Clamp {
            row = row.clamp(0, max_row);
        }

        self.try_tile(Location::new(col, row))
    }

    /// Changes one tile's elevation and rebuilds everything that depends on it.
    ///
    /// The tile and its on-map neighbours are swept three times: relations
    /// first, then invalidation, then corners followed by normals. Corners
    /// read neighbouring heights and shared corners, so no tile may be
    /// rebuilt before every relation in the set is settled.
    pub fn adjust_height(&mut self, loc: Location, delta: i32) {
        let target = self.index(loc);
        self.tiles[target].height = self.tiles[target].height.saturating_add(delta);
        debug!(location = %loc, delta, height = self.tiles[target].height, "adjusted height");

        let mut affected: ArrayVec<usize, 7> = ArrayVec::new();
        affected.push(target);
        affected.extend(loc.adjacent().into_iter().filter_map(|adj| self.dims.index_of(adj)));

        for &index in &affected {
            self.relink(index);
        }

        for &index in &affected {
            self.tiles[index].invalidate();
            self.notify(index, CacheFlags::GEOMETRY | CacheFlags::TEXTURE);
        }

        for &index in &affected {
            self.init_corners(index);
        }
        for &index in &affected {
            self.tiles[index].init_normals();
        }
    }

    /// Replaces the terrain of one tile. Edge blending of the neighbours
    /// depends on it, so their textures are invalidated as well.
    pub fn set_terrain(&mut self, loc: Location, id: &str, oracle: &dyn TerrainOracle) {
        let terrain = oracle.terrain(id);
        if terrain.is_none() {
            warn!(location = %loc, terrain = id, "unknown terrain id");
        }

        let index = self.index(loc);
        let tile = &mut self.tiles[index];
        tile.unresolved_terrain = terrain.is_none().then(|| id.into());
        tile.terrain = terrain;
        self.notify(index, CacheFlags::TEXTURE);

        for adj in loc.adjacent() {
            if let Some(index) = self.dims.index_of(adj) {
                self.notify(index, CacheFlags::TEXTURE);
            }
        }
    }

    /// Replaces or, with `None`, removes the feature of one tile.
    pub fn set_feature(&mut self, loc: Location, id: Option<&str>, oracle: &dyn TerrainOracle) {
        let feature = id.and_then(|id| {
            let feature = oracle.feature(id);
            if feature.is_none() {
                warn!(location = %loc, feature = id, "unknown feature id");
            }
            feature
        });

        let index = self.index(loc);
        let tile = &mut self.tiles[index];
        tile.unresolved_feature = id.filter(|_| feature.is_none()).map(Into::into);
        tile.feature = feature;
        self.notify(index, CacheFlags::MODEL);
    }

    pub fn relation(&self, loc: Location, dir: Direction) -> Relation {
        self.tile(loc).relation(dir)
    }

    /// Whether a unit may step from `loc` towards `dir`.
    ///
    /// Both sides of the edge have to agree on the walkable relation.
    pub fn is_passable(&self, loc: Location, dir: Direction) -> bool {
        let Some(adj) = self.tile(loc).neighbour(dir) else {
            return false;
        };
        self.try_tile(adj)
            .is_some_and(|other| other.link(dir.opposite()) == Some(Link::Neighbour(loc)))
    }

    /// Drains render-cache notifications queued by mutations so far.
    pub fn take_invalidations(&mut self) -> Vec<Invalidation> {
        core::mem::take(&mut self.pending)
    }

    fn index(&self, loc: Location) -> usize {
        match self.dims.index_of(loc) {
            Some(index) => index,
            None => panic!(
                "{loc} is outside the {}x{} map",
                self.dims.width, self.dims.height
            ),
        }
    }

    fn notify(&mut self, index: usize, flags: CacheFlags) {
        let tile = &self.tiles[index];
        self.pending.push(Invalidation {
            tile: tile.id,
            location: tile.loc,
            flags,
        });
    }

    /// Full topology pass: every relation, then every corner, then every normal.
    fn init_tiles(&mut self) {
        for index in 0..self.tiles.len() {
            self.relink(index);
        }
        for index in 0..self.tiles.len() {
            self.init_corners(index);
        }
        for tile in &mut self.tiles {
            tile.init_normals();
        }
    }

    /// Reclassifies all six edges of a tile, writing both sides of each edge.
    fn relink(&mut self, index: usize) {
        let loc = self.tiles[index].loc;
        let height = self.tiles[index].height;

        for dir in Direction::ALL {
            let adj = loc.neighbour(dir);
            let Some(other) = self.dims.index_of(adj) else {
                self.tiles[index].set_link(dir, None);
                continue;
            };

            let diff = height.saturating_sub(self.tiles[other].height);
            let link = if diff > MapConfig::CLIFF_HEIGHT {
                Link::CliffDown(adj)
            } else if diff < -MapConfig::CLIFF_HEIGHT {
                Link::CliffUp(adj)
            } else {
                Link::Neighbour(adj)
            };

            self.tiles[index].set_link(dir, Some(link));
            self.tiles[other].set_link(dir.opposite(), Some(link.mirrored(loc)));
        }
    }

    fn init_corners(&mut self, index: usize) {
        for n in 0..6 {
            if !self.tiles[index].corners[n].is_computed() {
                let position = self.calculate_corner(index, n);
                self.tiles[index].corners[n] = Point::computed(position);
            }
        }
    }

    /// Reuses a corner already computed by a walkable neighbour sharing it,
    /// otherwise blends it from scratch.
    ///
    /// A fresh blend averages the cells walkably connected to this tile at
    /// the corner, either directly or through the third cell. Every member
    /// of that group sees the same group, so each of them would compute the
    /// same corner.
    fn calculate_corner(&self, index: usize, n: usize) -> glam::Vec3 {
        let tile = &self.tiles[index];
        let dir = Direction::from_index(n);
        let leading = tile.neighbour(dir).map(|adj| self.tile(adj));
        let trailing = tile.neighbour(dir.clockwise()).map(|adj| self.tile(adj));

        for (adj, side) in [(leading, CornerSide::Leading), (trailing, CornerSide::Trailing)] {
            let Some(adj) = adj else { continue };
            let shared = &adj.corners[geometry::mirrored_corner(n, side)];
            if shared.is_computed() {
                return shared.position;
            }
        }

        let cells = geometry::corner_cells(tile.loc, n);
        let across = dir.rotate(2);
        let bridge = |via: Option<&Tile>, towards: Direction| {
            via.is_some_and(|via| via.neighbour(towards).is_some())
        };
        // The leading cell sees the trailing one in direction n + 2.
        let leading_via_trailing = bridge(trailing, across.opposite());
        let trailing_via_leading = bridge(leading, across);

        let mut heights: ArrayVec<i32, 3> = ArrayVec::new();
        heights.push(tile.height);
        if let Some(lead) = self.joined(cells[1], leading.is_some() || leading_via_trailing) {
            heights.push(lead);
        }
        if let Some(trail) = self.joined(cells[2], trailing.is_some() || trailing_via_leading) {
            heights.push(trail);
        }

        geometry::blend_corner(cells, &heights)
    }

    /// Height of the on-map cell at `loc` when it belongs to a corner group.
    fn joined(&self, loc: Location, connected: bool) -> Option<i32> {
        if !connected {
            return None;
        }
        self.try_tile(loc).map(Tile::height)
    }
}

/// Nearest integer, resolving exact halves downwards.
fn round_half_down(value: f32) -> i32 {
    (value - 0.5).ceil() as i32
}
