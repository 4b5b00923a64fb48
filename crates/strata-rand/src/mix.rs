//! Pure coordinate-mixing hash.
//!
//! Maps a coordinate pair plus the world seed to a unit-interval value with
//! no table lookups and no state, so it can be called from any thread in any
//! order. This is the displacement source for midpoint-displacement terrain.

use crate::Seed;

/// Number of mixing rounds. Enough for the remainders to decorrelate from
/// the input lattice; the cost is a handful of integer ops per round.
const MIX_ROUNDS: usize = 80;

/// Normalization divisor: slightly above the largest possible remainder sum,
/// keeping the result strictly below 1.
const UNIT_DIVISOR: f64 = 1_520_972.0;

/// Hash a coordinate pair and seed to a value in `[0, 1)`.
///
/// Each round folds the seed additively into the coordinates and accumulates
/// six modular remainders; the final remainder sum is normalized to the unit
/// interval. Identical inputs always produce identical output, independent of
/// call order or prior calls.
///
/// Remainders are Euclidean, so negative coordinates stay in range.
pub fn unit_from_pair(seed: Seed, x: i64, y: i64) -> f64 {
    let fold = seed.fold_value();
    let (mut x, mut y) = (x, y);
    let mut rems = [0_i64; 6];

    for _ in 0..MIX_ROUNDS {
        rems = [
            x.rem_euclid(7),
            x.rem_euclid(13),
            x.rem_euclid(1_301_081),
            y.rem_euclid(8_461),
            y.rem_euclid(105_467),
            y.rem_euclid(105_943),
        ];
        y = x.wrapping_add(fold);
        x = x.wrapping_add(rems.iter().sum::<i64>());
    }

    rems.iter().sum::<i64>() as f64 / UNIT_DIVISOR
}
