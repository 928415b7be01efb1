//! World-space mapping and the pure geometry helpers behind tile corners.
//!
//! Planar coordinates put column centers `√3/2` apart and shift odd columns
//! half a row down; elevation is divided by [`MapConfig::HEIGHT_SCALE`].

use glam::{Vec2, Vec3};

use crate::config::MapConfig;
use crate::coords::{Direction, Location};

#[inline]
pub fn translate_x(loc: Location) -> f32 {
    loc.col as f32 * MapConfig::X_RATIO
}

#[inline]
pub fn translate_y(loc: Location) -> f32 {
    loc.row as f32 + if loc.is_odd_column() { 0.5 } else { 0.0 }
}

#[inline]
pub fn translate_height(height: i32) -> f32 {
    height as f32 / MapConfig::HEIGHT_SCALE
}

/// Planar center of the cell at `loc`.
#[inline]
pub fn planar_center(loc: Location) -> Vec2 {
    Vec2::new(translate_x(loc), translate_y(loc))
}

/// World-space center of the cell at `loc` raised to `height`.
#[inline]
pub fn world_center(loc: Location, height: i32) -> Vec3 {
    planar_center(loc).extend(translate_height(height))
}

/// Index of the matching corner on the tile in direction `dir`.
///
/// Corner `n` of a tile lies between its directions `n` and `n + 1`. The
/// neighbour in direction `n` sees the same point as its corner `n + 2`, the
/// neighbour in direction `n + 1` as its corner `n + 4`.
#[inline]
pub fn mirrored_corner(corner: usize, side: CornerSide) -> usize {
    match side {
        CornerSide::Leading => (corner + 2) % 6,
        CornerSide::Trailing => (corner + 4) % 6,
    }
}

/// Which of the two neighbours spanning a corner is meant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CornerSide {
    /// Neighbour in direction `n`.
    Leading,
    /// Neighbour in direction `n + 1`.
    Trailing,
}

/// The three cells meeting at corner `corner` of the tile at `loc`, in the
/// order tile, leading neighbour, trailing neighbour.
#[inline]
pub fn corner_cells(loc: Location, corner: usize) -> [Location; 3] {
    let dir = Direction::from_index(corner);
    [loc, loc.neighbour(dir), loc.neighbour(dir.clockwise())]
}

/// Blends a corner from scratch.
///
/// The result depends only on the set of cells and heights passed in, never
/// on their order, so every tile sharing the corner arrives at the same bits.
/// The planar position is the mean of the three cell centers meeting at the
/// corner, whether or not those cells exist on the map. The elevation is the
/// mean of `heights`, the cells walkably connected to the tile at that corner.
pub fn blend_corner(cells: [Location; 3], heights: &[i32]) -> Vec3 {
    let mut cells = cells;
    cells.sort_unstable();
    let planar = cells.iter().fold(Vec2::ZERO, |sum, &loc| sum + planar_center(loc)) / 3.0;

    let sum: i64 = heights.iter().map(|&h| i64::from(h)).sum();
    let mean = if heights.is_empty() {
        0.0
    } else {
        sum as f32 / heights.len() as f32
    };

    planar.extend(mean / MapConfig::HEIGHT_SCALE)
}

/// Face normals of the triangle fan `(center, corner i, corner i + 1)`.
pub fn fan_normals(center: Vec3, corners: &[Vec3; 6]) -> [Vec3; 6] {
    core::array::from_fn(|i| {
        let a = corners[i] - center;
        let b = corners[(i + 1) % 6] - center;
        a.cross(b).normalize_or(Vec3::Z)
    })
}

/// Inverse-distance blend between a corner height and the center height.
///
/// The closer `point` is to one of the two, the more that height dominates.
pub fn blend_height(point: Vec2, center: Vec3, corner: Vec3) -> f32 {
    let dist_corner = point.distance(corner.truncate());
    let dist_center = point.distance(center.truncate());
    let total = dist_corner + dist_center;
    if total <= f32::EPSILON {
        return center.z;
    }
    (dist_corner * center.z + dist_center * corner.z) / total
}
