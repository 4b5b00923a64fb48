//! Biome taxonomy and selection.
//!
//! Maps cellular point identities to a weighted categorical biome, with an
//! elevation override for water, and describes per-biome decoration so the
//! painting collaborator can be validated against its data set once, up
//! front, instead of failing per query.

mod biome;
mod decor;
mod error;
mod selector;
mod weight;

pub use biome::Biome;
pub use decor::{BiomeDef, BiomeRegistry, DecorKind, DecorSet, default_biome_defs};
pub use error::BiomeError;
pub use selector::BiomeSelector;
pub use weight::BiomeWeightTable;
