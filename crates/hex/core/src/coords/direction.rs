/// One of the six hex directions, in clockwise order starting at north.
///
/// Directions are cyclic modulo 6. The "no direction" case is expressed as
/// `Option<Direction>::None`.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
#[repr(u8)]
pub enum Direction {
    #[strum(serialize = "n")]
    North = 0,
    #[strum(serialize = "ne")]
    NorthEast = 1,
    #[strum(serialize = "se")]
    SouthEast = 2,
    #[strum(serialize = "s")]
    South = 3,
    #[strum(serialize = "sw")]
    SouthWest = 4,
    #[strum(serialize = "nw")]
    NorthWest = 5,
}

impl Direction {
    pub const COUNT: usize = 6;

    pub const ALL: [Direction; 6] = [
        Direction::North,
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Maps any index onto a direction, wrapping modulo 6.
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::COUNT]
    }

    /// Rotates clockwise by `steps` sixths of a turn.
    #[inline]
    pub const fn rotate(self, steps: usize) -> Self {
        Self::from_index(self.index() + steps)
    }

    #[inline]
    pub const fn clockwise(self) -> Self {
        self.rotate(1)
    }

    #[inline]
    pub const fn counter_clockwise(self) -> Self {
        self.rotate(5)
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        self.rotate(3)
    }

    /// Short lowercase name used in logs and map tooling (`n`, `ne`, ...).
    pub fn abbreviation(self) -> &'static str {
        match self {
            Direction::North => "n",
            Direction::NorthEast => "ne",
            Direction::SouthEast => "se",
            Direction::South => "s",
            Direction::SouthWest => "sw",
            Direction::NorthWest => "nw",
        }
    }
}
