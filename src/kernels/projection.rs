//! Random projection: seeded sign flip followed by an orthonormal FWHT.
//!
//! Flipping signs with a pseudo-random ±1 pattern and then applying the fixed
//! Walsh–Hadamard transform approximates a dense random orthogonal matrix in
//! `O(n log n)` with no stored matrix. The sign of each projected component is
//! one LSH bit.
//!
//! The sign pattern is a pure function of `(seed, position)` and is computed
//! with explicit wrapping `u32` arithmetic so it is reproducible bit-for-bit.

use crate::error::{MemoryError, Result};
use crate::kernels::vector_ops;

/// Additive constant of the seed mixer.
pub const MIX_INCREMENT: u32 = 0x3C6E_F35F;

/// Multiplier of the seed mixer.
pub const MIX_MULTIPLIER: u32 = 0x0019_660D;

/// Golden-ratio constant used to derive the flip decision from the state.
pub const MIX_GOLDEN: u32 = 0x9E37_79B9;

/// Seeded ±1 sequence driving the sign flip.
///
/// Each step advances `state = (state + 0x3C6EF35F) * 0x19660D (mod 2³²)`,
/// then negates the element when the high bit of `state * 0x9E3779B9` is clear.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignHash {
    state: u32,
}

impl SignHash {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Current mixer state.
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Advance one position; `true` means the element is negated.
    #[inline]
    pub fn next_flip(&mut self) -> bool {
        self.state = self
            .state
            .wrapping_add(MIX_INCREMENT)
            .wrapping_mul(MIX_MULTIPLIER);
        self.state.wrapping_mul(MIX_GOLDEN) & 0x8000_0000 == 0
    }
}

impl Iterator for SignHash {
    type Item = f32;

    /// Yields the multiplier applied at the next position (`-1.0` or `+1.0`).
    fn next(&mut self) -> Option<f32> {
        Some(if self.next_flip() { -1.0 } else { 1.0 })
    }
}

/// The first `n` multipliers of the sign pattern for `seed`.
pub fn sign_pattern(seed: u32, n: usize) -> Vec<f32> {
    SignHash::new(seed).take(n).collect()
}

/// Negate elements of `v` in place according to the pattern for `seed`.
pub fn sign_flip(v: &mut [f32], seed: u32) {
    let mut hash = SignHash::new(seed);
    for x in v.iter_mut() {
        if hash.next_flip() {
            *x = -*x;
        }
    }
}

fn check_power_of_two(n: usize) -> Result<()> {
    if n.is_power_of_two() {
        Ok(())
    } else {
        Err(MemoryError::Configuration(format!(
            "transform length must be a non-zero power of two, got {}",
            n
        )))
    }
}

/// In-place Walsh–Hadamard butterflies without normalisation.
pub fn fwht_unnormalized(v: &mut [f32]) -> Result<()> {
    let n = v.len();
    check_power_of_two(n)?;

    let mut hs = 1;
    while hs < n {
        for block in v.chunks_exact_mut(2 * hs) {
            let (lo, hi) = block.split_at_mut(hs);
            for (a, b) in lo.iter_mut().zip(hi.iter_mut()) {
                let (x, y) = (*a, *b);
                *a = x + y;
                *b = x - y;
            }
        }
        hs *= 2;
    }
    Ok(())
}

/// Orthonormal Walsh–Hadamard transform: butterflies, then scale by `1/sqrt(n)`.
///
/// The normalised transform is its own inverse.
pub fn fwht(v: &mut [f32]) -> Result<()> {
    fwht_unnormalized(v)?;
    let norm = 1.0 / (v.len() as f32).sqrt();
    vector_ops::scale_assign(v, norm);
    Ok(())
}

/// Apply the seeded random projection to `v` in place.
pub fn random_project(v: &mut [f32], seed: u32) -> Result<()> {
    check_power_of_two(v.len())?;
    sign_flip(v, seed);
    fwht(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(v: &[f32]) -> f64 {
        vector_ops::sum_of_squares(v).sqrt()
    }

    #[test]
    fn test_seed_zero_reference_pattern() {
        // Reference values of the wrapping u32 recurrence.
        assert_eq!(
            sign_pattern(0, 8),
            vec![-1.0, -1.0, -1.0, -1.0, -1.0, 1.0, -1.0, -1.0]
        );
        assert_eq!(
            sign_pattern(1, 8),
            vec![-1.0, 1.0, 1.0, 1.0, 1.0, -1.0, 1.0, -1.0]
        );
        assert_eq!(
            sign_pattern(42, 8),
            vec![-1.0, 1.0, -1.0, -1.0, -1.0, -1.0, 1.0, -1.0]
        );
    }

    #[test]
    fn test_mixer_state_wraps() {
        let mut h = SignHash::new(0);
        h.next_flip();
        assert_eq!(h.state(), 0x3C6E_F35Fu32.wrapping_mul(0x0019_660D));

        let mut h = SignHash::new(u32::MAX);
        h.next_flip();
        assert_eq!(
            h.state(),
            u32::MAX.wrapping_add(0x3C6E_F35F).wrapping_mul(0x0019_660D)
        );
    }

    #[test]
    fn test_sign_flip_matches_pattern() {
        let mut v = vec![1.0f32; 16];
        sign_flip(&mut v, 7);
        assert_eq!(v, sign_pattern(7, 16));

        let mut z = vec![0.0f32; 4];
        sign_flip(&mut z, 0);
        assert!(z.iter().all(|x| *x == 0.0));
    }

    #[test]
    fn test_fwht_known_values() {
        let mut v = [1.0, 0.0, 0.0, 0.0];
        fwht_unnormalized(&mut v).unwrap();
        assert_eq!(v, [1.0, 1.0, 1.0, 1.0]);

        let mut v = [1.0, 2.0, 3.0, 4.0];
        fwht_unnormalized(&mut v).unwrap();
        assert_eq!(v, [10.0, -2.0, -4.0, 0.0]);

        let mut v = [1.0, 2.0, 3.0, 4.0];
        fwht(&mut v).unwrap();
        assert_eq!(v, [5.0, -1.0, -2.0, 0.0]);
    }

    #[test]
    fn test_fwht_self_inverse() {
        let original: Vec<f32> = (0..64).map(|i| ((i * 37 % 11) as f32) - 5.0).collect();
        let mut v = original.clone();
        fwht(&mut v).unwrap();
        fwht(&mut v).unwrap();
        for (a, b) in v.iter().zip(&original) {
            assert!((a - b).abs() < 1e-4, "{} vs {}", a, b);
        }
    }

    #[test]
    fn test_fwht_length_one_is_identity() {
        let mut v = [3.5];
        fwht(&mut v).unwrap();
        assert_eq!(v, [3.5]);
    }

    #[test]
    fn test_rejects_non_power_of_two() {
        let mut v = vec![1.0; 6];
        assert!(matches!(fwht(&mut v), Err(MemoryError::Configuration(_))));
        assert!(random_project(&mut v, 0).is_err());
        assert_eq!(v, vec![1.0; 6]);
        let mut empty: [f32; 0] = [];
        assert!(fwht(&mut empty).is_err());
    }

    #[test]
    fn test_projection_preserves_norm() {
        let mut v: Vec<f32> = (0..256).map(|i| (i as f32 * 0.37).sin()).collect();
        let before = norm(&v);
        random_project(&mut v, 12345).unwrap();
        assert!((norm(&v) - before).abs() < 1e-3 * before);
    }

    #[test]
    fn test_projection_deterministic() {
        let input: Vec<f32> = (0..32).map(|i| i as f32 - 16.0).collect();
        let mut a = input.clone();
        let mut b = input.clone();
        random_project(&mut a, 99).unwrap();
        random_project(&mut b, 99).unwrap();
        assert_eq!(a, b);

        let mut c = input;
        random_project(&mut c, 100).unwrap();
        assert_ne!(a, c);
    }
}
