use core::fmt;

use super::{Direction, logic};

/// Grid position of a tile, expressed as column and row.
///
/// Ordering is by column, then row, so locations can key ordered maps and
/// sets. A location carries no map reference: whether it is "valid" depends
/// on the map it is checked against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub col: i32,
    pub row: i32,
}

impl Location {
    pub const ORIGIN: Self = Self { col: 0, row: 0 };

    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    #[inline]
    pub const fn is_odd_column(self) -> bool {
        self.col & 1 == 1
    }

    pub fn neighbour(self, dir: Direction) -> Location {
        logic::tile_in_direction(self, dir)
    }

    pub fn adjacent(self) -> [Location; 6] {
        logic::adjacent_tiles(self)
    }

    pub fn is_adjacent_to(self, other: Location) -> bool {
        logic::tiles_adjacent(self, other)
    }

    pub fn distance_to(self, other: Location) -> u32 {
        logic::distance_between(self, other)
    }

    /// Direction leading to `other` if it is adjacent.
    pub fn direction_to(self, other: Location) -> Option<Direction> {
        logic::adjacent_direction(self, other)
    }

    pub fn ring(self, radius: u32) -> Vec<Location> {
        let mut res = Vec::with_capacity((radius as usize * 6).max(1));
        logic::tile_ring(self, radius, &mut res);
        res
    }
}

impl From<(i32, i32)> for Location {
    fn from((col, row): (i32, i32)) -> Self {
        Self::new(col, row)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.col, self.row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn orders_by_column_then_row() {
        let set: BTreeSet<Location> = [
            Location::new(1, 0),
            Location::new(0, 5),
            Location::new(0, 2),
            Location::new(1, -1),
        ]
        .into_iter()
        .collect();

        let ordered: Vec<_> = set.into_iter().collect();
        assert_eq!(
            ordered,
            vec![
                Location::new(0, 2),
                Location::new(0, 5),
                Location::new(1, -1),
                Location::new(1, 0),
            ]
        );
    }

    #[test]
    fn parity_handles_negative_columns() {
        assert!(Location::new(-1, 0).is_odd_column());
        assert!(!Location::new(-2, 0).is_odd_column());
        assert!(Location::new(3, 0).is_odd_column());
    }

    #[test]
    fn displays_as_pair() {
        assert_eq!(Location::new(3, -2).to_string(), "(3,-2)");
    }
}
