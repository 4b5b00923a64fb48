//! Facade construction errors.

use strata_biome::BiomeError;
use strata_field::FieldError;

/// Errors raised when assembling a terrain engine. Construction is the only
/// fallible surface: every query on a built engine is total.
#[derive(Debug, thiserror::Error)]
pub enum TerrainError {
    /// A field rejected its parameters.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// The biome configuration was unusable or inconsistent with the
    /// collaborator's capability set.
    #[error(transparent)]
    Biome(#[from] BiomeError),

    /// Surface heights are elevations scaled by the world height.
    #[error("world height must be positive, got {0}")]
    WorldHeight(i64),
}
