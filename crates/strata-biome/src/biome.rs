//! The biome taxonomy.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The fixed set of biomes a generator can emit.
///
/// Consumers must match exhaustively; the compiler then enforces that a new
/// variant is handled everywhere, which is the point of keeping this a closed
/// enum rather than a string tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Biome {
    Ocean,
    Beach,
    Plains,
    Forest,
    Taiga,
    Tundra,
    Desert,
    Mountains,
}

impl Biome {
    /// Every biome, in declaration order.
    pub const ALL: [Biome; 8] = [
        Biome::Ocean,
        Biome::Beach,
        Biome::Plains,
        Biome::Forest,
        Biome::Taiga,
        Biome::Tundra,
        Biome::Desert,
        Biome::Mountains,
    ];

    /// Stable lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Biome::Ocean => "ocean",
            Biome::Beach => "beach",
            Biome::Plains => "plains",
            Biome::Forest => "forest",
            Biome::Taiga => "taiga",
            Biome::Tundra => "tundra",
            Biome::Desert => "desert",
            Biome::Mountains => "mountains",
        }
    }
}

impl fmt::Display for Biome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
