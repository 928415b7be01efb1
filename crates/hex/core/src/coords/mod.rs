//! Offset-column hex coordinates.
//!
//! Tiles are addressed by `(col, row)`. Odd columns sit half a row lower than
//! even columns, so the row offset of the diagonal directions depends on the
//! parity of the column being stepped from. Nothing here knows about map
//! bounds: results may lie off any particular map and callers check them with
//! [`Gamemap::contains`](crate::map::Gamemap::contains).
mod direction;
mod location;
mod logic;

pub use direction::Direction;
pub use location::Location;
pub use logic::{
    adjacent_direction, adjacent_tiles, distance_between, main_direction, tile_in_direction,
    tile_ring, tile_strip, tiles_adjacent, tiles_in_radius,
};
