//! Construction parameters for an [`AssociativeMemory`](super::AssociativeMemory).

use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_DENSITY, DEFAULT_HASH_SEED, DEFAULT_VEC_LEN};
use crate::error::{MemoryError, Result};

/// Shape and seed of a memory. Fixed once the memory is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Vector length; a non-zero power of two.
    pub vec_len: usize,

    /// Number of hash rows summed per recall; at least one.
    pub density: usize,

    /// Base seed. Row `i` projects with `hash_seed + i` (wrapping).
    pub hash_seed: u32,
}

impl MemoryConfig {
    pub fn new(vec_len: usize, density: usize, hash_seed: u32) -> Self {
        Self {
            vec_len,
            density,
            hash_seed,
        }
    }

    pub fn with_vec_len(mut self, vec_len: usize) -> Self {
        self.vec_len = vec_len;
        self
    }

    pub fn with_density(mut self, density: usize) -> Self {
        self.density = density;
        self
    }

    pub fn with_hash_seed(mut self, hash_seed: u32) -> Self {
        self.hash_seed = hash_seed;
        self
    }

    /// Seed of projection row `row`.
    #[inline]
    pub fn row_seed(&self, row: usize) -> u32 {
        self.hash_seed.wrapping_add(row as u32)
    }

    /// Check the invariants the transform and the training rule depend on.
    pub fn validate(&self) -> Result<()> {
        if !self.vec_len.is_power_of_two() {
            return Err(MemoryError::Configuration(format!(
                "vec_len must be a non-zero power of two, got {}",
                self.vec_len
            )));
        }
        if self.density == 0 {
            return Err(MemoryError::Configuration(
                "density must be at least 1".to_string(),
            ));
        }
        if self.vec_len.checked_mul(self.density).is_none() {
            return Err(MemoryError::Configuration(format!(
                "weight matrix {}x{} overflows usize",
                self.density, self.vec_len
            )));
        }
        Ok(())
    }

    /// Number of weights (and cached sign bits) held by the memory.
    pub fn weight_count(&self) -> usize {
        self.vec_len * self.density
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self::new(DEFAULT_VEC_LEN, DEFAULT_DENSITY, DEFAULT_HASH_SEED)
    }
}
