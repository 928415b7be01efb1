//! Map text format.
//!
//! One line per row, cells separated by commas, and inside a cell the
//! whitespace separated tokens `<height> <terrain-id> [<feature-id>]`. A
//! terrain id of `-` marks a tile without terrain that still has a feature.
use core::fmt::Write as _;

use tracing::warn;

use super::{MapDimensions, Tile};
use crate::coords::Location;
use crate::env::TerrainOracle;
use crate::error::{ErrorSeverity, HexError};

const NO_TERRAIN: &str = "-";

/// Structural failure while reading map text.
///
/// A failed parse never yields a partially built map.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MapParseError {
    #[error("map text contains no rows")]
    Empty,

    #[error("inconsistent number of tiles in rows: row {row} has {found}, expected {expected}")]
    InconsistentRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid height `{token}` at {location}")]
    InvalidHeight { location: Location, token: String },
}

impl HexError for MapParseError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "MAP_PARSE_EMPTY",
            Self::InconsistentRow { .. } => "MAP_PARSE_INCONSISTENT_ROW",
            Self::InvalidHeight { .. } => "MAP_PARSE_INVALID_HEIGHT",
        }
    }
}

/// Reads every cell into a fresh, unlinked tile in row-major order.
pub(super) fn read_tiles(
    text: &str,
    oracle: &dyn TerrainOracle,
) -> Result<(Vec<Tile>, MapDimensions), MapParseError> {
    let mut tiles = Vec::new();
    let mut columns: Option<usize> = None;
    let mut rows = 0usize;

    for line in text.lines().filter(|line| !line.trim().is_empty()) {
        let cells: Vec<&str> = line.split(',').collect();
        match columns {
            Some(expected) if expected != cells.len() => {
                return Err(MapParseError::InconsistentRow {
                    row: rows,
                    expected,
                    found: cells.len(),
                });
            }
            _ => columns = Some(cells.len()),
        }

        for (col, cell) in cells.into_iter().enumerate() {
            let loc = Location::new(col as i32, rows as i32);
            tiles.push(read_cell(loc, cell, oracle)?);
        }
        rows += 1;
    }

    let columns = columns.ok_or(MapParseError::Empty)?;
    Ok((tiles, MapDimensions::new(columns as u32, rows as u32)))
}

fn read_cell(loc: Location, cell: &str, oracle: &dyn TerrainOracle) -> Result<Tile, MapParseError> {
    let mut tokens = cell.split_whitespace();

    let height = match tokens.next() {
        Some(token) => token
            .parse::<i32>()
            .map_err(|_| MapParseError::InvalidHeight {
                location: loc,
                token: token.to_owned(),
            })?,
        None => 0,
    };

    let Some(terrain_id) = tokens.next() else {
        return Ok(Tile::new(loc, height, None, None));
    };

    let terrain = match terrain_id {
        NO_TERRAIN => None,
        id => {
            let terrain = oracle.terrain(id);
            if terrain.is_none() {
                warn!(location = %loc, terrain = id, "unknown terrain id");
            }
            terrain
        }
    };

    let feature_id = tokens.next();
    let feature = feature_id.and_then(|id| {
        let feature = oracle.feature(id);
        if feature.is_none() {
            warn!(location = %loc, feature = id, "unknown feature id");
        }
        feature
    });

    let mut tile = Tile::new(loc, height, terrain, feature);
    if tile.terrain.is_none() && terrain_id != NO_TERRAIN {
        tile.unresolved_terrain = Some(terrain_id.into());
    }
    if tile.feature.is_none() {
        tile.unresolved_feature = feature_id.map(Into::into);
    }
    Ok(tile)
}

/// Serializes tiles back into map text.
pub(super) fn write_tiles(tiles: &[Tile], dims: MapDimensions) -> String {
    let width = dims.width as usize;
    let mut out = String::with_capacity(tiles.len() * 12);

    for (n, tile) in tiles.iter().enumerate() {
        let _ = write!(out, " {}", tile.height());
        let terrain = tile.terrain_id().or(tile.unresolved_terrain.as_deref());
        let feature = tile.feature_id().or(tile.unresolved_feature.as_deref());
        if terrain.is_some() || feature.is_some() {
            let _ = write!(out, " {}", terrain.unwrap_or(NO_TERRAIN));
        }
        if let Some(feature) = feature {
            let _ = write!(out, " {feature}");
        }
        out.push(if (n + 1) % width == 0 { '\n' } else { ',' });
    }

    out
}
