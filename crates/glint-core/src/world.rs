//! World selector - the biome identifier driving every per-world table

use serde::{Deserialize, Serialize};
use std::fmt;

/// A biome/level theme. Recognized indices are 0..=9.
///
/// Per-world behavior lives in fixed tables indexed by `World::index()`, each
/// exactly `World::COUNT` long. Anything outside the recognized range resolves
/// to `None` via [`World::from_index`], which every consumer treats as the
/// neutral default.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum World {
    Meadow = 0,
    Desert = 1,
    Cavern = 2,
    Glacier = 3,
    Swamp = 4,
    Volcano = 5,
    Reef = 6,
    Foundry = 7,
    Temple = 8,
    Void = 9,
}

impl World {
    pub const COUNT: usize = 10;

    pub const ALL: [World; World::COUNT] = [
        World::Meadow,
        World::Desert,
        World::Cavern,
        World::Glacier,
        World::Swamp,
        World::Volcano,
        World::Reef,
        World::Foundry,
        World::Temple,
        World::Void,
    ];

    /// Resolve a raw world index; unknown values yield `None`
    pub fn from_index(index: i32) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            World::Meadow => "meadow",
            World::Desert => "desert",
            World::Cavern => "cavern",
            World::Glacier => "glacier",
            World::Swamp => "swamp",
            World::Volcano => "volcano",
            World::Reef => "reef",
            World::Foundry => "foundry",
            World::Temple => "temple",
            World::Void => "void",
        }
    }
}

impl fmt::Display for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
