//! Terrain query facade.
//!
//! Composes the fractal height field, wave field, cellular field, and biome
//! selector behind per-coordinate queries for the chunk-building collaborator,
//! plus a background worker pool that batch-samples whole column regions.

mod engine;
mod error;
mod params;
mod region;

pub use engine::{ColumnSample, TerrainEngine};
pub use error::TerrainError;
pub use params::{BiomeWeight, TerrainParams, default_biome_weights};
pub use region::{REGION_SIZE, RegionCoord, RegionSampler, RegionTask, SampledRegion};
