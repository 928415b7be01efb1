//! Line of sight between tile centers.
//!
//! The sightline runs between both centers raised by the eye height and is
//! sampled at a fixed physical spacing, so short and long lines have the same
//! spatial resolution. Each sample is resolved to the tile below it and
//! compared against that tile's flat vision height.
use tracing::trace;

use crate::config::MapConfig;
use crate::coords::Location;
use crate::map::{Border, Gamemap, geometry};

/// Parameters of a sight query.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SightOptions {
    /// Maximum planar distance, in world units, the line may cover.
    pub range: Option<u32>,
    /// Elevation units added to both endpoints.
    pub eye_height: i32,
    /// World units between two samples.
    pub step_length: f32,
}

impl SightOptions {
    pub fn with_range(mut self, range: Option<u32>) -> Self {
        self.range = range;
        self
    }
}

impl Default for SightOptions {
    fn default() -> Self {
        Self::from(&MapConfig::default())
    }
}

impl From<&MapConfig> for SightOptions {
    fn from(config: &MapConfig) -> Self {
        Self {
            range: None,
            eye_height: config.eye_height,
            step_length: config.sight_step,
        }
    }
}

/// Result of tracing a sightline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SightOutcome {
    Visible,
    /// A tile's vision height rises above the line.
    Blocked(Location),
    /// The range ran out while over this tile.
    OutOfRange(Location),
    /// This endpoint is not on the map.
    OffMap(Location),
}

impl SightOutcome {
    pub fn is_visible(self) -> bool {
        matches!(self, SightOutcome::Visible)
    }

    /// Location that stopped the line, if any.
    pub fn obstruction(self) -> Option<Location> {
        match self {
            SightOutcome::Visible => None,
            SightOutcome::Blocked(loc) | SightOutcome::OutOfRange(loc) | SightOutcome::OffMap(loc) => {
                Some(loc)
            }
        }
    }
}

/// Marches from `from` towards `to` and reports what, if anything, stops it.
///
/// When `tiles` is given, every newly entered tile is appended in march
/// order. The starting tile is included, the destination never is.
pub fn trace_sight(
    map: &Gamemap,
    from: Location,
    to: Location,
    options: &SightOptions,
    mut tiles: Option<&mut Vec<Location>>,
) -> SightOutcome {
    for endpoint in [from, to] {
        if !map.contains(endpoint) {
            return SightOutcome::OffMap(endpoint);
        }
    }
    if from == to {
        return SightOutcome::Visible;
    }

    let start = geometry::world_center(from, map.tile(from).height() + options.eye_height);
    let end = geometry::world_center(to, map.tile(to).height() + options.eye_height);
    let distance = start.truncate().distance(end.truncate());

    let step_length = if options.step_length > 0.0 {
        options.step_length
    } else {
        MapConfig::DEFAULT_SIGHT_STEP
    };
    let increment = step_length / distance;

    let mut sample = 0u32;
    loop {
        let step = sample as f32 * increment;
        if step >= 1.0 {
            break;
        }
        sample += 1;

        let point = start.lerp(end, step);
        let Some(tile) = map.closest_tile(point.x, point.y, Border::Clamp) else {
            continue;
        };
        let loc = tile.location();
        if options.range.is_some_and(|range| distance * step > range as f32) {
            return SightOutcome::OutOfRange(loc);
        }

        if loc == to {
            break;
        }

        if let Some(tiles) = tiles.as_deref_mut() {
            if tiles.last() != Some(&loc) {
                tiles.push(loc);
            }
        }

        let blocking = tile.height_at_point_vision(point.x, point.y);
        trace!(location = %loc, step, line = point.z, blocking, "sight sample");
        if point.z < blocking {
            return SightOutcome::Blocked(loc);
        }
    }

    SightOutcome::Visible
}

/// First location obstructing the view from `from` to `to`, `None` when the
/// view is clear.
pub fn tile_in_the_way(
    map: &Gamemap,
    from: Location,
    to: Location,
    tiles: Option<&mut Vec<Location>>,
    range: Option<u32>,
) -> Option<Location> {
    let options = SightOptions::default().with_range(range);
    trace_sight(map, from, to, &options, tiles).obstruction()
}

pub fn line_of_sight(
    map: &Gamemap,
    from: Location,
    to: Location,
    tiles: Option<&mut Vec<Location>>,
    range: Option<u32>,
) -> bool {
    tile_in_the_way(map, from, to, tiles, range).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::Catalog;

    fn flat(width: usize, height: usize) -> Gamemap {
        let row = vec!["0"; width].join(",");
        let text = vec![row; height].join("\n");
        Gamemap::parse(&text, &Catalog::new()).unwrap()
    }

    #[test]
    fn options_follow_config() {
        let config = MapConfig::new().with_eye_height(6).with_sight_step(0.25);
        let options = SightOptions::from(&config).with_range(Some(4));
        assert_eq!(options.eye_height, 6);
        assert_eq!(options.step_length, 0.25);
        assert_eq!(options.range, Some(4));
        assert_eq!(SightOptions::default().eye_height, MapConfig::DEFAULT_EYE_HEIGHT);
    }

    #[test]
    fn outcome_obstruction() {
        let loc = Location::new(1, 2);
        assert_eq!(SightOutcome::Visible.obstruction(), None);
        assert_eq!(SightOutcome::Blocked(loc).obstruction(), Some(loc));
        assert_eq!(SightOutcome::OffMap(loc).obstruction(), Some(loc));
        assert!(!SightOutcome::OutOfRange(loc).is_visible());
    }

    #[test]
    fn adjacent_tiles_see_each_other() {
        let map = flat(3, 3);
        let mut crossed = Vec::new();
        let outcome = trace_sight(
            &map,
            Location::new(1, 1),
            Location::new(1, 2),
            &SightOptions::default(),
            Some(&mut crossed),
        );
        assert_eq!(outcome, SightOutcome::Visible);
        assert_eq!(crossed, [Location::new(1, 1)]);
    }

    #[test]
    fn off_map_endpoint_is_reported() {
        let map = flat(3, 3);
        let outside = Location::new(3, 0);
        assert_eq!(
            tile_in_the_way(&map, Location::ORIGIN, outside, None, None),
            Some(outside)
        );
        assert!(!line_of_sight(&map, outside, Location::ORIGIN, None, None));
    }

    #[test]
    fn higher_eye_sees_over_a_ridge() {
        let mut map = flat(1, 5);
        map.adjust_height(Location::new(0, 2), 6);

        let low = SightOptions::default();
        let from = Location::new(0, 0);
        let to = Location::new(0, 4);
        assert_eq!(
            trace_sight(&map, from, to, &low, None),
            SightOutcome::Blocked(Location::new(0, 2))
        );

        let tall = SightOptions::from(&MapConfig::new().with_eye_height(9));
        assert_eq!(trace_sight(&map, from, to, &tall, None), SightOutcome::Visible);
    }
}
