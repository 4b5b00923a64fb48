//! Biome selection from cellular point identity and elevation.

use strata_field::PointId;

use crate::{Biome, BiomeWeightTable};

/// Maps a cellular point identity to a weighted categorical biome, with an
/// elevation-based water override.
///
/// Because the point identity is constant across a Voronoi region, the same
/// region always yields the same base biome, giving contiguous biome areas
/// whose size distribution follows the cellular field's point statistics.
/// Selection is total: it never fails, and the override takes precedence over
/// whatever the table would have said.
#[derive(Clone, Debug)]
pub struct BiomeSelector {
    table: BiomeWeightTable,
    shore_threshold: f64,
}

impl BiomeSelector {
    /// Selector with the default shore threshold of `0.0`: everything below
    /// the waterline is ocean, everything at or above it keeps its base biome.
    pub fn new(table: BiomeWeightTable) -> Self {
        Self::with_shore_threshold(table, 0.0)
    }

    /// Selector that forces ocean while `elevation - waterline` is below the
    /// given threshold. A positive threshold drowns low-lying shores too.
    pub fn with_shore_threshold(table: BiomeWeightTable, shore_threshold: f64) -> Self {
        Self {
            table,
            shore_threshold,
        }
    }

    /// Select the biome for a column.
    ///
    /// `elevation` and `waterline` are in the same normalized units; the
    /// elevation rule takes precedence over the table draw.
    pub fn select(&self, point: PointId, elevation: f64, waterline: f64) -> Biome {
        if elevation - waterline < self.shore_threshold {
            return Biome::Ocean;
        }
        self.table.get(point.to_u64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(cell_x: i64, cell_y: i64, index: u32) -> PointId {
        PointId {
            cell_x,
            cell_y,
            index,
        }
    }

    fn selector() -> BiomeSelector {
        BiomeSelector::new(
            BiomeWeightTable::new(&[
                (Biome::Plains, 4),
                (Biome::Forest, 3),
                (Biome::Desert, 2),
                (Biome::Taiga, 1),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn test_same_point_same_biome() {
        let s = selector();
        let point = id(316, -632, 4);
        assert_eq!(
            s.select(point, 0.7, 0.25),
            s.select(point, 0.9, 0.25),
            "Base biome must depend only on point identity"
        );
    }

    #[test]
    fn test_below_waterline_is_ocean() {
        let s = selector();
        for index in 0..50 {
            let point = id(0, 0, index);
            assert_eq!(
                s.select(point, 0.1, 0.25),
                Biome::Ocean,
                "Elevation below waterline must override the table"
            );
        }
    }

    #[test]
    fn test_override_precedence_at_threshold() {
        let s = BiomeSelector::with_shore_threshold(
            BiomeWeightTable::new(&[(Biome::Plains, 1)]).unwrap(),
            0.05,
        );
        let point = id(0, 0, 0);
        assert_eq!(s.select(point, 0.29, 0.25), Biome::Ocean);
        assert_eq!(s.select(point, 0.31, 0.25), Biome::Plains);
    }

    #[test]
    fn test_distribution_follows_weights() {
        let s = selector();
        let mut counts: std::collections::HashMap<Biome, usize> = Default::default();
        let samples = 10_000;
        for i in 0..samples {
            let point = id((i % 100) * 316, (i / 100) * 316, (i % 7) as u32);
            *counts.entry(s.select(point, 0.9, 0.25)).or_default() += 1;
        }
        let share = |b: Biome| *counts.get(&b).unwrap_or(&0) as f64 / samples as f64;
        assert!(
            (share(Biome::Plains) - 0.4).abs() < 0.05,
            "Plains should get ~40%, got {}",
            share(Biome::Plains)
        );
        assert!(
            (share(Biome::Taiga) - 0.1).abs() < 0.05,
            "Taiga should get ~10%, got {}",
            share(Biome::Taiga)
        );
        assert_eq!(share(Biome::Ocean), 0.0, "No ocean above the waterline");
    }
}
