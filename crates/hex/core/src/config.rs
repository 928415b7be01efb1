/// Map geometry constants and tunable sight parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MapConfig {
    /// Elevation added to both endpoints of a sightline (roughly head height).
    pub eye_height: i32,
    /// Physical distance between two sight samples, in world units.
    pub sight_step: f32,
}

impl MapConfig {
    // ===== compile-time constants shared by all maps =====
    /// Height difference above which two adjacent tiles are separated by a cliff.
    pub const CLIFF_HEIGHT: i32 = 10;
    /// Elevation units per world unit on the z axis.
    pub const HEIGHT_SCALE: f32 = 3.0;
    /// Horizontal distance between column centers (√3 / 2).
    pub const X_RATIO: f32 = 0.866_025_4;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_EYE_HEIGHT: i32 = 3;
    pub const DEFAULT_SIGHT_STEP: f32 = 0.5;

    pub fn new() -> Self {
        Self {
            eye_height: Self::DEFAULT_EYE_HEIGHT,
            sight_step: Self::DEFAULT_SIGHT_STEP,
        }
    }

    pub fn with_eye_height(mut self, eye_height: i32) -> Self {
        self.eye_height = eye_height;
        self
    }

    pub fn with_sight_step(mut self, sight_step: f32) -> Self {
        self.sight_step = sight_step;
        self
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self::new()
    }
}
