//! The LSH associative memory.
//!
//! A memory holds `density` rows of `vec_len` weights. To recall, the input is
//! pushed through `density` random projections in sequence (row `i` projects
//! the output of row `i - 1` with seed `hash_seed + i`). The signs of each
//! projected vector are that row's LSH bits, and the recall is
//!
//! ```text
//! result = Σ_i sign(P_i(input)) ⊙ weights[i]
//! ```
//!
//! Training is a one-step delta rule: the correction `(target - recall) / density`
//! is added to every row, multiplied by that row's cached sign bits. Because
//! every bit is ±1, one step makes the recall of the trained input exact.

use std::fmt;

use ndarray::{Array2, ArrayView1, ArrayView2, ArrayViewMut2, Zip};
use rayon::prelude::*;
use tracing::debug;

use crate::error::{check_len, Result};
use crate::kernels::{projection, vector_ops};
use crate::memory::config::MemoryConfig;

/// Vector-to-vector associative memory.
///
/// `train`, `recall` and `recall_lsh` reuse scratch buffers owned by the
/// instance and take `&mut self`; share one instance across threads behind a
/// lock. [`recall_batch`](Self::recall_batch) takes `&self` and runs in parallel.
#[derive(Clone)]
pub struct AssociativeMemory {
    config: MemoryConfig,

    /// Weights, `density × vec_len`, zero-initialised.
    weights: Array2<f32>,

    /// LSH bits (±1) from the most recent `recall_lsh`, same shape as `weights`.
    sign_cache: Array2<i8>,

    /// Projection scratch: holds the running projected input.
    work: Vec<f32>,

    /// Recall scratch used by `train` and `recall_error`.
    recalled: Vec<f32>,
}

impl AssociativeMemory {
    /// Build a zeroed memory after validating `config`.
    pub fn new(config: MemoryConfig) -> Result<Self> {
        config.validate()?;
        let shape = (config.density, config.vec_len);
        debug!(
            vec_len = config.vec_len,
            density = config.density,
            hash_seed = config.hash_seed,
            "associative memory created"
        );
        Ok(Self {
            config,
            weights: Array2::zeros(shape),
            sign_cache: Array2::ones(shape),
            work: vec![0.0; config.vec_len],
            recalled: vec![0.0; config.vec_len],
        })
    }

    /// Shorthand for `new(MemoryConfig::new(vec_len, density, hash_seed))`.
    pub fn with_params(vec_len: usize, density: usize, hash_seed: u32) -> Result<Self> {
        Self::new(MemoryConfig::new(vec_len, density, hash_seed))
    }

    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    pub fn vec_len(&self) -> usize {
        self.config.vec_len
    }

    pub fn density(&self) -> usize {
        self.config.density
    }

    pub fn hash_seed(&self) -> u32 {
        self.config.hash_seed
    }

    /// Read-only view of the weight matrix.
    pub fn weights(&self) -> ArrayView2<'_, f32> {
        self.weights.view()
    }

    /// Read-only view of the LSH bits cached by the last `recall_lsh`.
    pub fn sign_cache(&self) -> ArrayView2<'_, i8> {
        self.sign_cache.view()
    }

    /// Recall the vector associated with `input` into `result`.
    ///
    /// `input` is copied to private scratch before `result` is written. To
    /// recall into the input buffer itself use [`recall_in_place`](Self::recall_in_place).
    pub fn recall(&mut self, result: &mut [f32], input: &[f32]) -> Result<()> {
        self.check_io(result.len(), input.len())?;
        vector_ops::copy(&mut self.work, input)?;
        project_rows(&self.config, self.weights.view(), &mut self.work, result, None)
    }

    /// Like [`recall`](Self::recall), additionally caching every row's LSH bits
    /// for the `train` call that follows.
    pub fn recall_lsh(&mut self, result: &mut [f32], input: &[f32]) -> Result<()> {
        self.check_io(result.len(), input.len())?;
        vector_ops::copy(&mut self.work, input)?;
        project_rows(
            &self.config,
            self.weights.view(),
            &mut self.work,
            result,
            Some(self.sign_cache.view_mut()),
        )
    }

    /// Replace the contents of `buf` with its own recall.
    pub fn recall_in_place(&mut self, buf: &mut [f32]) -> Result<()> {
        check_len(self.config.vec_len, buf.len())?;
        vector_ops::copy(&mut self.work, buf)?;
        project_rows(&self.config, self.weights.view(), &mut self.work, buf, None)
    }

    /// Recall many inputs in parallel without touching instance scratch.
    ///
    /// Every input is length-checked before any work starts. Results are
    /// identical to calling [`recall`](Self::recall) on each input in turn.
    pub fn recall_batch<V>(&self, inputs: &[V]) -> Result<Vec<Vec<f32>>>
    where
        V: AsRef<[f32]> + Sync,
    {
        for input in inputs {
            check_len(self.config.vec_len, input.as_ref().len())?;
        }
        inputs
            .par_iter()
            .map(|input| {
                let mut work = input.as_ref().to_vec();
                let mut out = vec![0.0; self.config.vec_len];
                project_rows(&self.config, self.weights.view(), &mut work, &mut out, None)?;
                Ok(out)
            })
            .collect()
    }

    /// One delta-rule step pulling the recall of `input` toward `target`.
    pub fn train(&mut self, target: &[f32], input: &[f32]) -> Result<()> {
        check_len(self.config.vec_len, target.len())?;
        check_len(self.config.vec_len, input.len())?;

        let Self {
            config,
            weights,
            sign_cache,
            work,
            recalled,
        } = self;

        vector_ops::copy(work, input)?;
        project_rows(
            config,
            weights.view(),
            work,
            recalled,
            Some(sign_cache.view_mut()),
        )?;

        // `work` is free again; reuse it for the per-row correction.
        vector_ops::subtract(work, target, recalled)?;
        vector_ops::scale_assign(work, 1.0 / config.density as f32);

        let correction = ArrayView1::from(&work[..]);
        for (w_row, s_row) in weights.outer_iter_mut().zip(sign_cache.outer_iter()) {
            Zip::from(w_row)
                .and(s_row)
                .and(&correction)
                .for_each(|w, &s, &e| *w += e * s as f32);
        }
        Ok(())
    }

    /// Euclidean distance between the current recall of `input` and `target`.
    pub fn recall_error(&mut self, target: &[f32], input: &[f32]) -> Result<f32> {
        check_len(self.config.vec_len, target.len())?;
        check_len(self.config.vec_len, input.len())?;

        let Self {
            config,
            weights,
            work,
            recalled,
            ..
        } = self;
        vector_ops::copy(work, input)?;
        project_rows(config, weights.view(), work, recalled, None)?;
        vector_ops::distance(recalled, target)
    }

    /// Forget everything. Shape and seed are kept.
    pub fn clear(&mut self) {
        self.weights.fill(0.0);
        debug!(
            vec_len = self.config.vec_len,
            density = self.config.density,
            "associative memory cleared"
        );
    }

    fn check_io(&self, result_len: usize, input_len: usize) -> Result<()> {
        check_len(self.config.vec_len, input_len)?;
        check_len(self.config.vec_len, result_len)
    }
}

impl fmt::Debug for AssociativeMemory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let norm = self.weights.iter().map(|w| w * w).sum::<f32>().sqrt();
        write!(
            f,
            "AssociativeMemory(vec_len={}, density={}, hash_seed={}, |W|={:.3})",
            self.config.vec_len, self.config.density, self.config.hash_seed, norm
        )
    }
}

/// Project `work` through every row and accumulate the weighted LSH bits.
///
/// `work` must already hold the input; it is left holding the final projection.
fn project_rows(
    config: &MemoryConfig,
    weights: ArrayView2<'_, f32>,
    work: &mut [f32],
    result: &mut [f32],
    mut cache: Option<ArrayViewMut2<'_, i8>>,
) -> Result<()> {
    vector_ops::zero(result);
    for (i, w_row) in weights.outer_iter().enumerate() {
        projection::random_project(work, config.row_seed(i))?;
        match cache.as_mut() {
            Some(cache) => {
                let bits = cache.row_mut(i);
                for (((r, &w), &x), bit) in result
                    .iter_mut()
                    .zip(w_row.iter())
                    .zip(work.iter())
                    .zip(bits)
                {
                    let s = vector_ops::sign(x);
                    *bit = s as i8;
                    *r += s * w;
                }
            }
            None => {
                for ((r, &w), &x) in result.iter_mut().zip(w_row.iter()).zip(work.iter()) {
                    *r += vector_ops::sign(x) * w;
                }
            }
        }
    }
    Ok(())
}
