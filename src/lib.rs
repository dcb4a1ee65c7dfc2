//! # lshmem
//!
//! A vector-to-vector associative memory built on locality-sensitive hashing.
//!
//! Given an input vector the memory recalls a previously associated target
//! vector, and it can be trained incrementally on new `(target, input)` pairs
//! without catastrophically forgetting earlier ones.
//!
//! ## Components
//!
//! 1. **Vector kernels** — checked elementwise arithmetic over `f32` slices
//! 2. **Random projection** — seeded sign flip + orthonormal Walsh–Hadamard transform
//! 3. **Associative memory** — `density` hash rows of weights, delta-rule training
//! 4. **Block codec** — 32×32 RGB pixel blocks ⇄ 4096-element vectors
//! 5. **Training session** — bounded sample set, training cycles, recall metrics
//!
//! ## Example
//!
//! ```
//! use lshmem::memory::{AssociativeMemory, MemoryConfig};
//!
//! let mut am = AssociativeMemory::new(MemoryConfig::new(8, 4, 0)).unwrap();
//! let input = [1.0, -2.0, 0.5, 0.0, 3.0, -1.0, 0.25, 2.0];
//! let target = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
//! am.train(&target, &input).unwrap();
//!
//! let mut out = [0.0; 8];
//! am.recall(&mut out, &input).unwrap();
//! assert!(out.iter().zip(&target).all(|(a, b)| (a - b).abs() < 1e-4));
//! ```

pub mod codec;
pub mod error;
pub mod kernels;
pub mod memory;
pub mod training;

pub use error::{MemoryError, Result};

/// Crate-wide constants.
pub mod config {
    /// Default vector length: one 32×32 block at 4 channels per pixel.
    pub const DEFAULT_VEC_LEN: usize = 4096;

    /// Default number of hash rows summed per recall.
    pub const DEFAULT_DENSITY: usize = 32;

    /// Default base seed for the projection rows.
    pub const DEFAULT_HASH_SEED: u32 = 0;

    /// Side length of a pixel block in pixels.
    pub const BLOCK_SIDE: usize = 32;

    /// Vector components emitted per pixel (r, g, b, padding).
    pub const CHANNELS_PER_PIXEL: usize = 4;

    /// Offset subtracted from each 8-bit colour channel to centre it on zero.
    pub const PIXEL_OFFSET: f32 = 127.5;

    /// Maximum number of samples held by a training set.
    pub const SAMPLE_CAPACITY: usize = 32;

    /// Additive guard inside the square root of variance adjustment.
    pub const VARIANCE_EPSILON: f64 = 1e-20;

    /// Vector length for a block of the given side, or `None` on overflow.
    pub const fn block_vec_len(side: usize) -> Option<usize> {
        match side.checked_mul(side) {
            Some(pixels) => pixels.checked_mul(CHANNELS_PER_PIXEL),
            None => None,
        }
    }
}
