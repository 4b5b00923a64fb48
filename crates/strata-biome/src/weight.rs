//! Weighted biome replication table.

use crate::{Biome, BiomeError};

/// Ordered sequence of biome tags, each replicated proportionally to its
/// desired relative frequency. Read-only after construction.
///
/// Flat replication is deliberate: at tens of entries a direct index beats a
/// cumulative-weight search, and the table is built once per generator.
#[derive(Clone, Debug)]
pub struct BiomeWeightTable {
    entries: Vec<Biome>,
}

impl BiomeWeightTable {
    /// Build the table from `(biome, weight)` pairs. Zero-weight pairs are
    /// allowed and contribute no entries.
    ///
    /// # Errors
    ///
    /// Returns [`BiomeError::EmptyWeightTable`] if no entries result.
    pub fn new(weights: &[(Biome, u32)]) -> Result<Self, BiomeError> {
        let mut entries = Vec::new();
        for &(biome, weight) in weights {
            entries.extend(std::iter::repeat_n(biome, weight as usize));
        }
        if entries.is_empty() {
            return Err(BiomeError::EmptyWeightTable);
        }
        Ok(Self { entries })
    }

    /// Number of replicated entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: construction rejects empty tables.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry a draw lands on, by modular indexing.
    pub fn get(&self, draw: u64) -> Biome {
        self.entries[(draw % self.entries.len() as u64) as usize]
    }
}
