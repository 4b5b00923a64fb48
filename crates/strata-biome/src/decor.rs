//! Per-biome decoration descriptors and the painter capability set.
//!
//! The painting collaborator declares which decorative kinds its target data
//! set actually provides, once, at generator construction. The registry is
//! then validated against that set, so a biome referencing an unavailable
//! kind is caught before any terrain is generated rather than per query.

use hashbrown::{HashMap, HashSet};

use crate::{Biome, BiomeError};

/// Decorative placements a painting layer may support.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DecorKind {
    TallGrass,
    OakTree,
    SpruceTree,
    Shrub,
    Cactus,
    Boulder,
    SnowLayer,
    Kelp,
}

impl DecorKind {
    /// Every decoration kind, in declaration order.
    pub const ALL: [DecorKind; 8] = [
        DecorKind::TallGrass,
        DecorKind::OakTree,
        DecorKind::SpruceTree,
        DecorKind::Shrub,
        DecorKind::Cactus,
        DecorKind::Boulder,
        DecorKind::SnowLayer,
        DecorKind::Kelp,
    ];
}

/// The decoration kinds available in the active target data set.
#[derive(Clone, Debug, Default)]
pub struct DecorSet {
    kinds: HashSet<DecorKind>,
}

impl DecorSet {
    /// A set holding exactly the given kinds.
    pub fn new(kinds: impl IntoIterator<Item = DecorKind>) -> Self {
        Self {
            kinds: kinds.into_iter().collect(),
        }
    }

    /// A set holding every known kind.
    pub fn full() -> Self {
        Self::new(DecorKind::ALL)
    }

    /// Whether the data set provides this kind.
    pub fn contains(&self, kind: DecorKind) -> bool {
        self.kinds.contains(&kind)
    }
}

/// Description of one biome for the painting layer: which decorations it
/// places and how densely, per surface column.
#[derive(Clone, Debug)]
pub struct BiomeDef {
    /// The biome being described.
    pub biome: Biome,
    /// `(kind, per-column placement probability)` pairs.
    pub decorations: Vec<(DecorKind, f64)>,
}

/// All biome definitions for a generator variant, keyed by biome.
#[derive(Clone, Debug)]
pub struct BiomeRegistry {
    defs: HashMap<Biome, BiomeDef>,
}

impl BiomeRegistry {
    /// Build a registry from definitions.
    ///
    /// # Errors
    ///
    /// Returns [`BiomeError::DuplicateBiome`] if two definitions describe the
    /// same biome.
    pub fn new(defs: Vec<BiomeDef>) -> Result<Self, BiomeError> {
        let mut map = HashMap::with_capacity(defs.len());
        for def in defs {
            let biome = def.biome;
            if map.insert(biome, def).is_some() {
                return Err(BiomeError::DuplicateBiome(biome));
            }
        }
        Ok(Self { defs: map })
    }

    /// The definition for a biome, if one was registered.
    pub fn get(&self, biome: Biome) -> Option<&BiomeDef> {
        self.defs.get(&biome)
    }

    /// Number of registered definitions.
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Whether the registry holds no definitions.
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Check every referenced decoration kind against the collaborator's
    /// capability set. Called once at generator construction.
    ///
    /// # Errors
    ///
    /// Returns [`BiomeError::MissingDecor`] naming the first biome whose
    /// definition references an unavailable kind.
    pub fn validate_decor(&self, available: &DecorSet) -> Result<(), BiomeError> {
        for biome in Biome::ALL {
            let Some(def) = self.defs.get(&biome) else {
                continue;
            };
            for &(kind, _density) in &def.decorations {
                if !available.contains(kind) {
                    return Err(BiomeError::MissingDecor { biome, kind });
                }
            }
        }
        Ok(())
    }
}

/// Default definitions covering the whole taxonomy. Densities follow the
/// usual voxel-world conventions (about one tall-grass per ten plains
/// columns, sparser trees, near-total snow cover on tundra).
pub fn default_biome_defs() -> Vec<BiomeDef> {
    vec![
        BiomeDef {
            biome: Biome::Ocean,
            decorations: vec![(DecorKind::Kelp, 0.05)],
        },
        BiomeDef {
            biome: Biome::Beach,
            decorations: vec![(DecorKind::Shrub, 0.01)],
        },
        BiomeDef {
            biome: Biome::Plains,
            decorations: vec![(DecorKind::TallGrass, 0.1), (DecorKind::OakTree, 0.005)],
        },
        BiomeDef {
            biome: Biome::Forest,
            decorations: vec![(DecorKind::OakTree, 0.08), (DecorKind::TallGrass, 0.04)],
        },
        BiomeDef {
            biome: Biome::Taiga,
            decorations: vec![(DecorKind::SpruceTree, 0.06)],
        },
        BiomeDef {
            biome: Biome::Tundra,
            decorations: vec![(DecorKind::SnowLayer, 0.9), (DecorKind::Boulder, 0.01)],
        },
        BiomeDef {
            biome: Biome::Desert,
            decorations: vec![(DecorKind::Cactus, 0.02), (DecorKind::Shrub, 0.01)],
        },
        BiomeDef {
            biome: Biome::Mountains,
            decorations: vec![(DecorKind::Boulder, 0.03), (DecorKind::SnowLayer, 0.2)],
        },
    ]
}
