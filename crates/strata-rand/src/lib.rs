//! Deterministic randomness primitives for terrain generation.
//!
//! Everything the terrain fields draw on funnels through this crate: a world
//! seed type, a pure coordinate-mixing hash, composite-key RNG derivation,
//! Poisson draws, and libm-backed math so results are bit-identical across
//! platforms, threads, and query orders.

mod key;
mod math;
mod mix;
mod poisson;
mod seed;

pub use key::{derive_key, keyed_rng};
pub use math::{det_exp, det_sin, det_sqrt};
pub use mix::unit_from_pair;
pub use poisson::poisson_draw;
pub use seed::Seed;
