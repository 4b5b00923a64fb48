//! Biome configuration errors.

use crate::{Biome, DecorKind};

/// Errors raised while assembling biome configuration. All are fatal at
/// construction; selection itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum BiomeError {
    /// A weight table with no entries cannot select anything.
    #[error("biome weight table is empty")]
    EmptyWeightTable,

    /// Two definitions were supplied for the same biome.
    #[error("duplicate definition for biome {0}")]
    DuplicateBiome(Biome),

    /// A biome references a decoration kind the painting collaborator's data
    /// set does not provide. Caught once at construction so the drift between
    /// generator and painter can never surface mid-generation.
    #[error("biome {biome} decorates with {kind:?}, which the target data set does not provide")]
    MissingDecor {
        /// The biome whose definition references the missing kind.
        biome: Biome,
        /// The unavailable decoration kind.
        kind: DecorKind,
    },
}
