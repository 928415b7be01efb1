use std::sync::Arc;

use crate::coords::Location;

/// Shared handle to an immutable terrain descriptor.
pub type TerrainHandle = Arc<TerrainDescriptor>;

/// Shared handle to an immutable feature descriptor.
pub type FeatureHandle = Arc<FeatureDescriptor>;

/// Base ground type of a tile (grass, water, rock, ...).
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TerrainDescriptor {
    pub id: String,
    pub name: String,
    /// Catalog value carried for game logic. Tile sight heights only add the
    /// feature's block, never this one.
    pub vision_block: f32,
    /// Movement cost used by pathfinding when no feature overrides it.
    pub default_cost: i32,
    /// Higher priority terrain blends over its neighbours at shared edges.
    pub overlap_priority: i32,
    pub textures: Vec<String>,
    pub models: Vec<String>,
    pub cliff_textures: Vec<String>,
    pub battle_style: String,
}

impl TerrainDescriptor {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Texture variant for the tile at `loc` with the given height.
    pub fn texture_variant(&self, loc: Location, height: i32) -> Option<&str> {
        pick(&self.textures, loc, height)
    }

    /// Decoration model variant for the tile at `loc` with the given height.
    pub fn model_variant(&self, loc: Location, height: i32) -> Option<&str> {
        pick(&self.models, loc, height)
    }

    /// Rotation in whole degrees applied to the terrain model.
    pub fn rotation(&self, loc: Location, height: i32) -> f32 {
        (variant_seed(loc, height) % 360) as f32
    }
}

/// Optional decorative/gameplay overlay on a tile (vegetation, structures).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FeatureDescriptor {
    pub id: String,
    pub name: String,
    pub models: Vec<String>,
    /// World units added to the tile's sight-blocking height.
    pub vision_block: f32,
    /// Movement cost override, `-1` when the feature does not change it.
    pub default_cost: i32,
}

impl FeatureDescriptor {
    pub fn new(id: impl Into<String>, name: impl Into<String>, vision_block: f32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            vision_block,
            ..Self::default()
        }
    }

    pub fn model_variant(&self, loc: Location, height: i32) -> Option<&str> {
        pick(&self.models, loc, height)
    }

    /// Rotation in whole degrees applied to the feature model.
    pub fn rotation(&self, loc: Location, height: i32) -> f32 {
        (variant_seed(loc, height) % 360) as f32
    }
}

impl Default for FeatureDescriptor {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            models: Vec::new(),
            vision_block: 0.0,
            default_cost: -1,
        }
    }
}

fn pick(options: &[String], loc: Location, height: i32) -> Option<&str> {
    if options.is_empty() {
        return None;
    }
    let index = variant_seed(loc, height) as usize % options.len();
    Some(options[index].as_str())
}

/// Seed-free hash of a tile's coordinates and height.
///
/// Repeated queries for the same tile always return the same value, which
/// lets renderers pick texture/model variants and rotations without storing
/// per-tile state. Changing the height reshuffles the variant.
pub fn variant_seed(loc: Location, height: i32) -> u32 {
    let a = (loc.col.wrapping_add(92_872_973) ^ 918_273) as u32;
    let b = (loc.row.wrapping_add(1_672_517) ^ 128_123) as u32;
    let c = (height.wrapping_add(127_390) ^ 13_923_787) as u32;

    let ab = a.wrapping_mul(b);
    let bc = b.wrapping_mul(c);
    let ac = a.wrapping_mul(c);
    ab.wrapping_mul(c)
        .wrapping_add(ab)
        .wrapping_add(bc)
        .wrapping_add(ac)
        .wrapping_add(a)
        .wrapping_add(b)
        .wrapping_add(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_seed_is_stable_per_tile() {
        let loc = Location::new(7, 3);
        assert_eq!(variant_seed(loc, 4), variant_seed(loc, 4));
        assert_ne!(variant_seed(loc, 4), variant_seed(loc, 5));
        assert_ne!(variant_seed(loc, 4), variant_seed(Location::new(3, 7), 4));
    }

    #[test]
    fn variants_come_from_the_descriptor_lists() {
        let mut grass = TerrainDescriptor::new("grass", "Grass");
        assert_eq!(grass.texture_variant(Location::ORIGIN, 0), None);

        grass.textures = vec!["grass-1.png".into(), "grass-2.png".into()];
        for col in 0..6 {
            let loc = Location::new(col, 2);
            let texture = grass.texture_variant(loc, 1).expect("texture");
            assert!(grass.textures.iter().any(|t| t == texture));
            assert_eq!(grass.texture_variant(loc, 1), Some(texture));
        }
    }

    #[test]
    fn rotation_stays_within_a_turn() {
        let tree = FeatureDescriptor::new("oak", "Oak", 2.0);
        for col in -5..5 {
            for height in -20..20 {
                let r = tree.rotation(Location::new(col, 1), height);
                assert!((0.0..360.0).contains(&r));
                assert_eq!(r.fract(), 0.0);
            }
        }
        assert_eq!(tree.default_cost, -1);
    }
}
