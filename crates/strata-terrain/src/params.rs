//! Engine parameters.
//!
//! Plain serde-derived data with per-field defaults, so collaborators can
//! persist a parameter set (RON or similar) and round-trip it unchanged.
//! Validation happens at engine construction, not here.

use serde::{Deserialize, Serialize};

use strata_biome::Biome;

/// Relative frequency of one biome in the weight table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiomeWeight {
    /// The biome tag.
    pub biome: Biome,
    /// Replication count relative to the other entries.
    pub weight: u32,
}

/// Everything that determines a generator's output besides the query
/// coordinates. Two engines built from equal parameters produce
/// bit-identical signals forever.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainParams {
    /// World seed. String seeds should be collapsed with
    /// [`strata_rand::Seed::from`] before they land here.
    pub seed: u64,
    /// Extent of the fractal height domain. World queries are re-centered so
    /// the origin sits in the middle of the domain.
    pub domain_size: i64,
    /// Fractal displacement multiplier. The conventional choice is
    /// `domain_size / 500`, which saturates the coarse octaves into
    /// continents and leaves fine detail to the small blocks.
    pub roughness: f64,
    /// Worley point density for the biome partition, in points per square
    /// unit.
    pub cell_density: f64,
    /// Expected Worley points per generation cell.
    pub expected_cell_points: f64,
    /// Octave count for the wave field.
    pub wave_octaves: usize,
    /// Logistic temperature for the wave field.
    pub wave_temperature: f64,
    /// Scaled height of the world: elevations map to `[0, world_height)`.
    pub world_height: i64,
    /// Scaled height of the water surface.
    pub waterline: i64,
    /// Shore threshold for the ocean override, in normalized elevation units.
    pub shore_threshold: f64,
    /// Relative biome frequencies for the weight table.
    pub biome_weights: Vec<BiomeWeight>,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            seed: 0,
            domain_size: 10_000_000,
            roughness: 20_000.0,
            cell_density: 0.0001,
            expected_cell_points: 10.0,
            wave_octaves: 5,
            wave_temperature: 2.0,
            world_height: 80,
            waterline: 20,
            shore_threshold: 0.0,
            biome_weights: default_biome_weights(),
        }
    }
}

/// Default relative biome frequencies. Ocean is absent on purpose: it is
/// produced by the waterline override, not by the table.
pub fn default_biome_weights() -> Vec<BiomeWeight> {
    [
        (Biome::Plains, 5),
        (Biome::Forest, 4),
        (Biome::Desert, 2),
        (Biome::Taiga, 2),
        (Biome::Mountains, 2),
        (Biome::Tundra, 1),
        (Biome::Beach, 1),
    ]
    .into_iter()
    .map(|(biome, weight)| BiomeWeight { biome, weight })
    .collect()
}
