//! Cellular (Worley) distance field.
//!
//! The plane is tiled into square cells; each cell lazily generates a
//! Poisson-distributed batch of points from a PRNG keyed to its anchor, and
//! queries report the distance to the nearest point and its identity. Point identity is spatially coherent:
//! every generated point owns the Voronoi region nearer to it than to any
//! other point, which is what makes the field usable for region partitioning
//! rather than per-coordinate noise.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use dashmap::DashMap;
use glam::DVec2;
use rand::Rng;

use strata_rand::{Seed, det_sqrt, keyed_rng, poisson_draw};

use crate::FieldError;

/// Default expected point count per cell.
const EXPECTED_POINTS: f64 = 10.0;

/// Structurally unique identity of a generated point: the anchor of the cell
/// that owns it plus its index in that cell's ordered point list.
///
/// Two distinct points can never share an id, unlike schemes that fold raw
/// coordinates into a single sum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PointId {
    /// Anchor x of the owning cell.
    pub cell_x: i64,
    /// Anchor y of the owning cell.
    pub cell_y: i64,
    /// Position in the owning cell's point list.
    pub index: u32,
}

impl PointId {
    /// Collapse the identity to a well-distributed u64, e.g. for indexing a
    /// weighted table. SipHash over all three fields, so distinct ids map to
    /// distinct draws for any practical table size.
    pub fn to_u64(self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.cell_x.hash(&mut hasher);
        self.cell_y.hash(&mut hasher);
        self.index.hash(&mut hasher);
        hasher.finish()
    }
}

/// One query's result: normalized nearest-point distance and that point's id.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellSample {
    /// `sqrt(nearest squared distance / max pairwise squared distance)` over
    /// the gathered neighborhood. Near 0 on top of a point, growing toward 1
    /// in the empty space between points.
    pub value: f64,
    /// Identity of the nearest point. Constant across a Voronoi region.
    pub point: PointId,
}

/// Batched, lazily-memoized Worley point field.
pub struct CellularDistanceField {
    seed: Seed,
    batch_size: i64,
    expected_points: f64,
    cells: DashMap<(i64, i64), Arc<Vec<DVec2>>>,
}

impl CellularDistanceField {
    /// Create a field with the default expected points per cell.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::Density`] if `density` is not positive.
    pub fn new(seed: Seed, density: f64) -> Result<Self, FieldError> {
        Self::with_expected_points(seed, density, EXPECTED_POINTS)
    }

    /// Create a field sized so each cell is expected to hold
    /// `expected_points` points at the given density:
    /// `batch_size = round_to_even(sqrt(expected_points / density))`.
    pub fn with_expected_points(
        seed: Seed,
        density: f64,
        expected_points: f64,
    ) -> Result<Self, FieldError> {
        if density <= 0.0 {
            return Err(FieldError::Density(density));
        }
        if expected_points <= 0.0 {
            return Err(FieldError::ExpectedPoints(expected_points));
        }
        let batch_size = round_to_even(det_sqrt(expected_points / density));
        Ok(Self {
            seed,
            batch_size,
            expected_points,
            cells: DashMap::new(),
        })
    }

    /// Side length of one point-generation cell.
    pub fn batch_size(&self) -> i64 {
        self.batch_size
    }

    /// Normalized distance to the nearest point.
    pub fn value(&self, x: i64, y: i64) -> f64 {
        self.sample(x, y).value
    }

    /// Identity of the nearest point.
    pub fn point_id(&self, x: i64, y: i64) -> PointId {
        self.sample(x, y).point
    }

    /// Nearest-point distance and identity in one pass.
    pub fn sample(&self, x: i64, y: i64) -> CellSample {
        let anchor_x = self.anchor(x);
        let anchor_y = self.anchor(y);
        let query = DVec2::new(x as f64, y as f64);

        // The 3x3 neighborhood always suffices in practice; the widening
        // fallback keeps the query total even for a neighborhood that drew
        // no points (normalization needs at least two candidates).
        let mut radius = 1_i64;
        let candidates = loop {
            let gathered = self.gather(anchor_x, anchor_y, radius);
            if gathered.len() >= 2 {
                break gathered;
            }
            radius += 1;
        };

        let mut nearest = candidates[0];
        let mut nearest_sq = query.distance_squared(nearest.1);
        for &(id, position) in &candidates[1..] {
            let sq = query.distance_squared(position);
            if sq < nearest_sq {
                nearest_sq = sq;
                nearest = (id, position);
            }
        }

        let mut max_pairwise_sq = 0.0_f64;
        for i in 0..candidates.len() {
            for j in (i + 1)..candidates.len() {
                let sq = candidates[i].1.distance_squared(candidates[j].1);
                if sq > max_pairwise_sq {
                    max_pairwise_sq = sq;
                }
            }
        }

        let value = if max_pairwise_sq > 0.0 {
            det_sqrt(nearest_sq / max_pairwise_sq)
        } else {
            0.0
        };

        CellSample {
            value,
            point: nearest.0,
        }
    }

    /// Number of cells whose point batches have been generated.
    pub fn cached_cells(&self) -> usize {
        self.cells.len()
    }

    /// Floor-align a coordinate to its cell anchor.
    fn anchor(&self, c: i64) -> i64 {
        c.div_euclid(self.batch_size) * self.batch_size
    }

    /// All points within `radius` cells (Chebyshev) of the anchored cell,
    /// tagged with their structural identities. Iteration order is fixed, so
    /// distance ties resolve identically on every evaluation.
    fn gather(&self, anchor_x: i64, anchor_y: i64, radius: i64) -> Vec<(PointId, DVec2)> {
        let mut candidates = Vec::new();
        for dx in -radius..=radius {
            for dy in -radius..=radius {
                let cell_x = anchor_x + dx * self.batch_size;
                let cell_y = anchor_y + dy * self.batch_size;
                let points = self.cell_points(cell_x, cell_y);
                for (index, &position) in points.iter().enumerate() {
                    candidates.push((
                        PointId {
                            cell_x,
                            cell_y,
                            index: index as u32,
                        },
                        position,
                    ));
                }
            }
        }
        candidates
    }

    /// The ordered point list for a cell, generating and caching it on first
    /// access. Write-once: for a fixed seed and anchor the list is identical
    /// irrespective of evaluation order, so a racing duplicate generation
    /// produces the same list and either copy may be kept.
    fn cell_points(&self, cell_x: i64, cell_y: i64) -> Arc<Vec<DVec2>> {
        if let Some(points) = self.cells.get(&(cell_x, cell_y)) {
            return Arc::clone(&points);
        }

        let mut rng = keyed_rng(self.seed, "cell-points", &[cell_x, cell_y]);
        let count = poisson_draw(&mut rng, self.expected_points);
        let extent = self.batch_size as f64;
        let points: Vec<DVec2> = (0..count)
            .map(|_| {
                let px = cell_x as f64 + rng.random::<f64>() * extent;
                let py = cell_y as f64 + rng.random::<f64>() * extent;
                DVec2::new(px, py)
            })
            .collect();

        let entry = self
            .cells
            .entry((cell_x, cell_y))
            .or_insert_with(|| Arc::new(points));
        Arc::clone(entry.value())
    }
}

/// Round to the nearest even integer, with a floor of 2.
fn round_to_even(v: f64) -> i64 {
    ((v / 2.0).round() as i64 * 2).max(2)
}
