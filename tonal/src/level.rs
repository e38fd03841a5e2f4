use std::fmt;

use serde::{Deserialize, Serialize};

pub const LEVEL_COUNT: usize = 11;

/// A shade level such as `50` or `600`. Only the values in [`LEVELS`] are part
/// of a ramp; anything else can be expressed (for example by a hand-written
/// catalog) but has no index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Level(pub u16);

/// Every level of a ramp, lightest first.
pub const LEVELS: [Level; LEVEL_COUNT] = [
    Level(50),
    Level(100),
    Level(200),
    Level(300),
    Level(400),
    Level(500),
    Level(600),
    Level(700),
    Level(800),
    Level(900),
    Level(950),
];

impl Level {
    pub const LIGHTEST: Level = LEVELS[0];
    pub const DARKEST: Level = LEVELS[LEVEL_COUNT - 1];

    /// Position of this level in [`LEVELS`].
    pub fn index(self) -> Option<usize> {
        LEVELS.iter().position(|level| *level == self)
    }

    pub fn value(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
