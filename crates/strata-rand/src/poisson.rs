//! Poisson-distributed integer draws.

use rand::Rng;

use crate::det_exp;

/// Draw a Poisson-distributed count with the given mean by inverse-CDF
/// search: take one uniform draw, then subtract the probability mass at
/// 0, 1, 2, ... until the remainder crosses zero. The stopping index is the
/// count.
///
/// Consumes exactly one value from `rng`, so the caller's stream layout does
/// not depend on the drawn count.
pub fn poisson_draw<R: Rng>(rng: &mut R, mean: f64) -> usize {
    let mut remainder: f64 = rng.random();
    let mut pmf = det_exp(-mean);
    let mut count = 0;

    loop {
        remainder -= pmf;
        if remainder <= 0.0 {
            return count;
        }
        count += 1;
        pmf *= mean / count as f64;
        // The pmf tail underflows long before the uniform draw can exceed the
        // accumulated mass; stop rather than loop on denormals.
        if pmf < 1e-300 {
            return count;
        }
    }
}
