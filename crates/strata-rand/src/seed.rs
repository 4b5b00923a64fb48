//! World seed accepted as either a number or a string.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Immutable world seed. All randomness derived by the terrain fields flows
/// from this single value.
///
/// String seeds are hashed to a `u64` with SipHash (std's `DefaultHasher`),
/// so `"abc"` names the same world on every run and platform. Numeric seeds
/// pass through unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Seed(u64);

impl Seed {
    /// Create a seed from a raw numeric value.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// The underlying numeric value.
    pub fn value(self) -> u64 {
        self.0
    }

    /// The seed reinterpreted as a signed value, for additive folding into
    /// coordinates by the mixing hash.
    pub fn fold_value(self) -> i64 {
        self.0 as i64
    }
}

impl From<u64> for Seed {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<&str> for Seed {
    fn from(value: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        Self(hasher.finish())
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
