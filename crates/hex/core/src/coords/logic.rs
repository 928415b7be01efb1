//! Adjacency, distance and area queries over [`Location`]s.

use super::{Direction, Location};

/// Returns the cell one step from `loc` in `dir`.
///
/// North and south only change the row. The diagonals step one column and,
/// depending on the parity of `loc.col`, zero or one row.
pub fn tile_in_direction(loc: Location, dir: Direction) -> Location {
    let odd = loc.is_odd_column();
    let Location { col, row } = loc;
    match dir {
        Direction::North => Location::new(col, row - 1),
        Direction::NorthEast => Location::new(col + 1, if odd { row } else { row - 1 }),
        Direction::SouthEast => Location::new(col + 1, if odd { row + 1 } else { row }),
        Direction::South => Location::new(col, row + 1),
        Direction::SouthWest => Location::new(col - 1, if odd { row + 1 } else { row }),
        Direction::NorthWest => Location::new(col - 1, if odd { row } else { row - 1 }),
    }
}

/// Returns the six neighbouring cells in [`Direction::ALL`] order.
pub fn adjacent_tiles(loc: Location) -> [Location; 6] {
    Direction::ALL.map(|dir| tile_in_direction(loc, dir))
}

/// Returns true if `a` and `b` share an edge.
pub fn tiles_adjacent(a: Location, b: Location) -> bool {
    adjacent_direction(a, b).is_some()
}

/// Returns the direction leading from `from` to the adjacent cell `to`.
pub fn adjacent_direction(from: Location, to: Location) -> Option<Direction> {
    Direction::ALL
        .into_iter()
        .find(|dir| tile_in_direction(from, *dir) == to)
}

/// Number of steps between `a` and `b` on the hex grid.
pub fn distance_between(a: Location, b: Location) -> u32 {
    let hdistance = (a.col - b.col).unsigned_abs();
    let vdistance = (a.row - b.row).unsigned_abs() + vertical_penalty(a, b);

    // Each column step can absorb half a row of vertical travel.
    hdistance.max(vdistance + hdistance / 2)
}

/// Extra row of travel needed when moving between columns of different
/// parity against the half-row shift.
fn vertical_penalty(a: Location, b: Location) -> u32 {
    let even_to_odd_down = !a.is_odd_column() && b.is_odd_column() && a.row < b.row;
    let odd_to_even_up = a.is_odd_column() && !b.is_odd_column() && b.row < a.row;
    u32::from(even_to_odd_down || odd_to_even_up)
}

/// Best-approximating direction from `a` towards `b`.
///
/// Exact for adjacent cells. For distant cells the horizontal or vertical
/// component with the greater extent wins. Returns `None` when `a == b`.
pub fn main_direction(a: Location, b: Location) -> Option<Direction> {
    if a == b {
        return None;
    }

    if let Some(dir) = adjacent_direction(a, b) {
        return Some(dir);
    }

    let hdistance = (a.col - b.col).unsigned_abs();
    let vdistance = (a.row - b.row).unsigned_abs() + vertical_penalty(a, b);
    let south = a.row < b.row;

    let dir = if hdistance > vdistance {
        match (a.col < b.col, south) {
            (true, true) => Direction::SouthEast,
            (true, false) => Direction::NorthEast,
            (false, true) => Direction::SouthWest,
            (false, false) => Direction::NorthWest,
        }
    } else if south {
        Direction::South
    } else {
        Direction::North
    };

    Some(dir)
}

/// Appends every cell exactly `radius` steps from `center`.
///
/// Produces `6 * radius` cells (just `center` for radius 0), starting at the
/// south-west extreme of the ring and walking clockwise. Results are not
/// filtered against any map.
pub fn tile_ring(center: Location, radius: u32, res: &mut Vec<Location>) {
    if radius == 0 {
        res.push(center);
        return;
    }

    let mut loc = center;
    for _ in 0..radius {
        loc = tile_in_direction(loc, Direction::SouthWest);
    }

    for dir in Direction::ALL {
        for _ in 0..radius {
            res.push(loc);
            loc = tile_in_direction(loc, dir);
        }
    }
}

/// Appends `center` followed by every ring up to and including `radius`.
pub fn tiles_in_radius(center: Location, radius: u32, res: &mut Vec<Location>) {
    res.push(center);
    for n in 1..=radius {
        tile_ring(center, n, res);
    }
}

/// Appends a strip of cells aligned with `dir`.
///
/// The strip runs `back` cells behind `center` to `forward` cells ahead of
/// it, widened by `side` zig-zag columns to either side. Used for breath and
/// charge style area targeting.
pub fn tile_strip(
    center: Location,
    dir: Direction,
    forward: u32,
    back: u32,
    side: u32,
    res: &mut Vec<Location>,
) {
    let mut loc = center;
    for _ in 0..back {
        loc = tile_in_direction(loc, dir.opposite());
    }

    let left = [dir.rotate(4), dir.rotate(5)];
    let right = [dir.rotate(1), dir.rotate(2)];
    for n in 0..side as usize {
        loc = tile_in_direction(loc, left[n % 2]);
    }

    let length = (forward + back) as usize;

    res.push(loc);
    for _ in 0..length {
        let last = tile_in_direction(loc, dir);
        res.push(last);
        loc = last;
    }

    // Each sideways pass copies the previous line shifted one column right.
    let line = length + 1;
    for n in 0..(side as usize * 2) {
        let begin = res.len() - line;
        for m in begin..begin + line {
            let shifted = tile_in_direction(res[m], right[n % 2]);
            res.push(shifted);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn sample_grid() -> Vec<Location> {
        let mut locs = Vec::new();
        for col in -3..5 {
            for row in -3..5 {
                locs.push(Location::new(col, row));
            }
        }
        locs
    }

    #[test]
    fn even_and_odd_columns_mirror_diagonals() {
        let even = Location::new(2, 2);
        assert_eq!(
            adjacent_tiles(even),
            [
                Location::new(2, 1),
                Location::new(3, 1),
                Location::new(3, 2),
                Location::new(2, 3),
                Location::new(1, 2),
                Location::new(1, 1),
            ]
        );

        let odd = Location::new(3, 2);
        assert_eq!(
            adjacent_tiles(odd),
            [
                Location::new(3, 1),
                Location::new(4, 2),
                Location::new(4, 3),
                Location::new(3, 3),
                Location::new(2, 3),
                Location::new(2, 2),
            ]
        );
    }

    #[test]
    fn stepping_back_returns_home() {
        for loc in sample_grid() {
            for dir in Direction::ALL {
                let there = tile_in_direction(loc, dir);
                assert_eq!(tile_in_direction(there, dir.opposite()), loc);
                assert_eq!(adjacent_direction(loc, there), Some(dir));
                assert_eq!(adjacent_direction(there, loc), Some(dir.opposite()));
            }
        }
    }

    #[test]
    fn distance_is_a_metric() {
        let grid = sample_grid();
        for &a in &grid {
            assert_eq!(distance_between(a, a), 0);
            for &b in &grid {
                let ab = distance_between(a, b);
                assert_eq!(ab, distance_between(b, a));
                assert_eq!(ab == 0, a == b);
            }
        }

        // Triangle inequality over a coarser subset to keep the test fast.
        let subset: Vec<_> = grid.iter().copied().step_by(3).collect();
        for &a in &subset {
            for &b in &subset {
                for &c in &subset {
                    assert!(
                        distance_between(a, b) <= distance_between(a, c) + distance_between(c, b),
                        "triangle inequality violated for {a} {b} via {c}"
                    );
                }
            }
        }
    }

    #[test]
    fn neighbours_are_one_step_away() {
        for loc in sample_grid() {
            for adj in adjacent_tiles(loc) {
                assert_eq!(distance_between(loc, adj), 1);
                assert!(tiles_adjacent(loc, adj));
            }
        }
        assert!(!tiles_adjacent(Location::new(0, 0), Location::new(0, 0)));
        assert!(!tiles_adjacent(Location::new(0, 0), Location::new(2, 0)));
    }

    #[test]
    fn ring_has_expected_size_and_distance() {
        let center = Location::new(1, 2);
        let mut zero = Vec::new();
        tile_ring(center, 0, &mut zero);
        assert_eq!(zero, vec![center]);

        for radius in 1..5 {
            let mut ring = Vec::new();
            tile_ring(center, radius, &mut ring);
            assert_eq!(ring.len(), 6 * radius as usize);

            let distinct: BTreeSet<_> = ring.iter().copied().collect();
            assert_eq!(distinct.len(), ring.len());
            for loc in ring {
                assert_eq!(distance_between(center, loc), radius);
            }
        }
    }

    #[test]
    fn radius_covers_every_ring() {
        let mut area = Vec::new();
        tiles_in_radius(Location::new(4, 4), 2, &mut area);
        assert_eq!(area.len(), 1 + 6 + 12);
        let distinct: BTreeSet<_> = area.iter().copied().collect();
        assert_eq!(distinct.len(), area.len());
    }

    #[test]
    fn main_direction_matches_adjacency_and_axes() {
        let a = Location::new(4, 4);
        for dir in Direction::ALL {
            assert_eq!(main_direction(a, tile_in_direction(a, dir)), Some(dir));
        }
        assert_eq!(main_direction(a, a), None);
        assert_eq!(main_direction(a, Location::new(4, 9)), Some(Direction::South));
        assert_eq!(main_direction(a, Location::new(4, 0)), Some(Direction::North));
        assert_eq!(main_direction(a, Location::new(9, 5)), Some(Direction::SouthEast));
        assert_eq!(main_direction(a, Location::new(0, 3)), Some(Direction::NorthWest));
    }

    #[test]
    fn strip_covers_length_and_width() {
        let mut strip = Vec::new();
        tile_strip(Location::new(5, 5), Direction::North, 2, 1, 0, &mut strip);
        assert_eq!(
            strip,
            vec![
                Location::new(5, 6),
                Location::new(5, 5),
                Location::new(5, 4),
                Location::new(5, 3),
            ]
        );

        let mut wide = Vec::new();
        tile_strip(Location::new(5, 5), Direction::North, 2, 1, 1, &mut wide);
        assert_eq!(wide.len(), 4 * 3);
        let distinct: BTreeSet<_> = wide.iter().copied().collect();
        assert_eq!(distinct.len(), wide.len());
        assert!(wide.contains(&Location::new(5, 5)));
    }
}
