use core::fmt;
use core::sync::atomic::{AtomicU32, Ordering};

use glam::{Vec2, Vec3};

use super::geometry;
use crate::coords::{Direction, Location};
use crate::env::{FeatureHandle, TerrainHandle};

static NEXT_TILE_ID: AtomicU32 = AtomicU32::new(1);

/// Process-unique identity of a constructed tile.
///
/// Renderer caches key on this value; see [`TileCache`](super::TileCache).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileId(pub u32);

impl TileId {
    fn next() -> Self {
        Self(NEXT_TILE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tile#{}", self.0)
    }
}

/// Directional relation from one tile to an adjacent, on-map tile.
///
/// Relations are stored on both tiles and always mirror each other: a
/// `Neighbour` is answered by a `Neighbour`, a `CliffDown` by a `CliffUp`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Link {
    /// Heights within the cliff threshold; movement and corner blending allowed.
    Neighbour(Location),
    /// This tile sits more than the threshold above the other one.
    CliffDown(Location),
    /// This tile sits more than the threshold below the other one.
    CliffUp(Location),
}

impl Link {
    pub fn location(self) -> Location {
        match self {
            Link::Neighbour(loc) | Link::CliffDown(loc) | Link::CliffUp(loc) => loc,
        }
    }

    /// The link the other tile must hold back towards `origin`.
    pub fn mirrored(self, origin: Location) -> Link {
        match self {
            Link::Neighbour(_) => Link::Neighbour(origin),
            Link::CliffDown(_) => Link::CliffUp(origin),
            Link::CliffUp(_) => Link::CliffDown(origin),
        }
    }

    pub fn relation(self) -> Relation {
        match self {
            Link::Neighbour(_) => Relation::Neighbour,
            Link::CliffDown(_) | Link::CliffUp(_) => Relation::Cliff,
        }
    }
}

/// Side-agnostic classification of a direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Relation {
    Neighbour,
    Cliff,
    /// Off the map edge.
    None,
}

/// Geometry sample on a tile's top face.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub position: Vec3,
    pub normal: Vec3,
    computed: bool,
}

impl Point {
    pub(crate) fn stale(position: Vec3) -> Self {
        Self {
            position,
            normal: Vec3::Z,
            computed: false,
        }
    }

    pub(crate) fn computed(position: Vec3) -> Self {
        Self {
            position,
            normal: Vec3::Z,
            computed: true,
        }
    }

    pub fn is_computed(&self) -> bool {
        self.computed
    }
}

/// One hex cell: elevation, descriptors, relations to its six neighbours and
/// the derived top-face geometry.
///
/// Geometry is computed by the owning [`Gamemap`](super::Gamemap), which is
/// the only place that can see neighbouring tiles. Outside of a mutation in
/// progress every tile is fully computed.
///
/// A clone receives a fresh [`TileId`], so renderer caches keyed on the
/// source never react to the copy's invalidations.
#[derive(Debug)]
pub struct Tile {
    pub(crate) id: TileId,
    pub(crate) loc: Location,
    pub(crate) height: i32,
    pub(crate) terrain: Option<TerrainHandle>,
    pub(crate) feature: Option<FeatureHandle>,
    /// Ids read from map text that the oracle did not know; kept for writing.
    pub(crate) unresolved_terrain: Option<Box<str>>,
    pub(crate) unresolved_feature: Option<Box<str>>,
    pub(crate) links: [Option<Link>; 6],
    pub(crate) center: Point,
    pub(crate) corners: [Point; 6],
}

impl Tile {
    pub fn new(
        loc: Location,
        height: i32,
        terrain: Option<TerrainHandle>,
        feature: Option<FeatureHandle>,
    ) -> Self {
        let mut tile = Self {
            id: TileId::next(),
            loc,
            height: 0,
            terrain: None,
            feature: None,
            unresolved_terrain: None,
            unresolved_feature: None,
            links: [None; 6],
            center: Point::default(),
            corners: [Point::default(); 6],
        };
        tile.init(height, terrain, feature);
        tile
    }

    /// Resets relations, stores the attributes and marks geometry stale.
    pub(crate) fn init(
        &mut self,
        height: i32,
        terrain: Option<TerrainHandle>,
        feature: Option<FeatureHandle>,
    ) {
        self.links = [None; 6];
        self.height = height;
        self.terrain = terrain;
        self.feature = feature;
        self.unresolved_terrain = None;
        self.unresolved_feature = None;
        self.invalidate();
    }

    /// Re-places the center from the current height and marks every point stale.
    pub(crate) fn invalidate(&mut self) {
        self.center = Point::stale(geometry::world_center(self.loc, self.height));
        for corner in &mut self.corners {
            corner.computed = false;
        }
    }

    /// Moves the tile to a new location; relations and geometry become stale.
    pub(crate) fn relocate(&mut self, loc: Location) {
        if self.loc != loc {
            self.loc = loc;
            self.links = [None; 6];
        }
        self.invalidate();
    }

    /// Derives every normal from the current corner positions.
    pub(crate) fn init_normals(&mut self) {
        let positions = self.corners.map(|c| c.position);
        let faces = geometry::fan_normals(self.center.position, &positions);

        for (n, corner) in self.corners.iter_mut().enumerate() {
            let before = faces[(n + 5) % 6];
            corner.normal = (before + faces[n]).normalize_or(Vec3::Z);
        }

        let sum: Vec3 = faces.iter().copied().sum();
        self.center.normal = sum.normalize_or(Vec3::Z);
        self.center.computed = true;
    }

    pub(crate) fn set_link(&mut self, dir: Direction, link: Option<Link>) {
        self.links[dir.index()] = link;
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn location(&self) -> Location {
        self.loc
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn terrain(&self) -> Option<&TerrainHandle> {
        self.terrain.as_ref()
    }

    pub fn feature(&self) -> Option<&FeatureHandle> {
        self.feature.as_ref()
    }

    pub fn terrain_id(&self) -> Option<&str> {
        self.terrain.as_deref().map(|t| t.id.as_str())
    }

    pub fn feature_id(&self) -> Option<&str> {
        self.feature.as_deref().map(|f| f.id.as_str())
    }

    pub fn link(&self, dir: Direction) -> Option<Link> {
        self.links[dir.index()]
    }

    pub fn relation(&self, dir: Direction) -> Relation {
        self.link(dir).map_or(Relation::None, Link::relation)
    }

    /// Walkable neighbour in `dir`.
    pub fn neighbour(&self, dir: Direction) -> Option<Location> {
        match self.link(dir) {
            Some(Link::Neighbour(loc)) => Some(loc),
            _ => None,
        }
    }

    /// Lower tile in `dir` when this tile stands on top of a cliff.
    ///
    /// Only the upper tile reports the cliff; wall quads are drawn from it.
    pub fn cliff(&self, dir: Direction) -> Option<Location> {
        match self.link(dir) {
            Some(Link::CliffDown(loc)) => Some(loc),
            _ => None,
        }
    }

    pub fn has_neighbour(&self, dir: Direction) -> bool {
        self.neighbour(dir).is_some()
    }

    pub fn num_neighbours(&self) -> usize {
        Direction::ALL
            .into_iter()
            .filter(|dir| self.has_neighbour(*dir))
            .count()
    }

    pub fn has_cliffs(&self) -> bool {
        Direction::ALL.into_iter().any(|dir| self.cliff(dir).is_some())
    }

    pub fn is_stale(&self) -> bool {
        !self.center.computed || self.corners.iter().any(|c| !c.computed)
    }

    pub fn center(&self) -> &Point {
        debug_assert!(!self.is_stale(), "{} queried while stale", self.loc);
        &self.center
    }

    pub fn corner(&self, n: usize) -> &Point {
        debug_assert!(!self.is_stale(), "{} queried while stale", self.loc);
        &self.corners[n % 6]
    }

    pub fn corners(&self) -> &[Point; 6] {
        debug_assert!(!self.is_stale(), "{} queried while stale", self.loc);
        &self.corners
    }

    /// Terrain elevation at a planar point inside this tile.
    ///
    /// Blends between the center and the nearest corner by inverse distance.
    pub fn height_at_point(&self, x: f32, y: f32) -> f32 {
        let point = Vec2::new(x, y);
        let nearest = self
            .corners
            .iter()
            .min_by(|a, b| {
                let da = a.position.truncate().distance_squared(point);
                let db = b.position.truncate().distance_squared(point);
                da.total_cmp(&db)
            })
            .map_or(self.center.position, |c| c.position);

        geometry::blend_height(point, self.center.position, nearest)
    }

    /// Sight-blocking height anywhere on this tile.
    ///
    /// Deliberately flat: the center height plus the feature's vision block.
    pub fn height_at_point_vision(&self, _x: f32, _y: f32) -> f32 {
        let bonus = self.feature.as_deref().map_or(0.0, |f| f.vision_block);
        self.center.position.z + bonus
    }
}

impl Clone for Tile {
    fn clone(&self) -> Self {
        Self {
            id: TileId::next(),
            loc: self.loc,
            height: self.height,
            terrain: self.terrain.clone(),
            feature: self.feature.clone(),
            unresolved_terrain: self.unresolved_terrain.clone(),
            unresolved_feature: self.unresolved_feature.clone(),
            links: self.links,
            center: self.center,
            corners: self.corners,
        }
    }
}
