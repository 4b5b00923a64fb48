//! Terrain signal fields: fractal heights, sinusoidal waves, cellular distance.
//!
//! Each field is constructed once per seed, owns its cache exclusively, and
//! answers point queries that are bit-reproducible regardless of query order
//! or concurrency. There is no I/O and no ambient state: distinct seeds mean
//! distinct field instances.

mod cellular;
mod error;
mod fractal;
mod wave;

pub use cellular::{CellSample, CellularDistanceField, PointId};
pub use error::FieldError;
pub use fractal::FractalHeightField;
pub use wave::MultiOctaveWaveField;
