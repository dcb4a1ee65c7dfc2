//! Elementwise arithmetic over equal-length `f32` slices.
//!
//! Every function that takes more than one operand checks lengths first and
//! fails with [`MemoryError::DimensionMismatch`](crate::MemoryError) instead of
//! truncating. The result slice `r` is always the reference length.
//!
//! Rust's borrow rules keep `r` from aliasing `x` or `y`; the few in-place
//! forms the memory needs are provided as `*_assign` functions.

use crate::config::VARIANCE_EPSILON;
use crate::error::{check_len, Result};

/// `r[i] = x[i] * c`
pub fn scale(r: &mut [f32], x: &[f32], c: f32) -> Result<()> {
    check_len(r.len(), x.len())?;
    for (r, &x) in r.iter_mut().zip(x) {
        *r = x * c;
    }
    Ok(())
}

/// `x[i] *= c`
pub fn scale_assign(x: &mut [f32], c: f32) {
    for v in x.iter_mut() {
        *v *= c;
    }
}

/// `r[i] = x[i] * y[i]`
pub fn multiply(r: &mut [f32], x: &[f32], y: &[f32]) -> Result<()> {
    check_len(r.len(), x.len())?;
    check_len(r.len(), y.len())?;
    for ((r, &x), &y) in r.iter_mut().zip(x).zip(y) {
        *r = x * y;
    }
    Ok(())
}

/// `r[i] += x[i] * y[i]`
pub fn multiply_add(r: &mut [f32], x: &[f32], y: &[f32]) -> Result<()> {
    check_len(r.len(), x.len())?;
    check_len(r.len(), y.len())?;
    for ((r, &x), &y) in r.iter_mut().zip(x).zip(y) {
        *r += x * y;
    }
    Ok(())
}

/// `r[i] = x[i] - y[i]`
pub fn subtract(r: &mut [f32], x: &[f32], y: &[f32]) -> Result<()> {
    check_len(r.len(), x.len())?;
    check_len(r.len(), y.len())?;
    for ((r, &x), &y) in r.iter_mut().zip(x).zip(y) {
        *r = x - y;
    }
    Ok(())
}

/// `r[i] = x[i] + y[i]`
pub fn add(r: &mut [f32], x: &[f32], y: &[f32]) -> Result<()> {
    check_len(r.len(), x.len())?;
    check_len(r.len(), y.len())?;
    for ((r, &x), &y) in r.iter_mut().zip(x).zip(y) {
        *r = x + y;
    }
    Ok(())
}

/// `r[i] = x[i]`
pub fn copy(r: &mut [f32], x: &[f32]) -> Result<()> {
    check_len(r.len(), x.len())?;
    r.copy_from_slice(x);
    Ok(())
}

/// `r[i] = 0`
pub fn zero(r: &mut [f32]) {
    r.fill(0.0);
}

/// Sign of a single value as ±1. Zero (and NaN) counts as positive.
#[inline]
pub fn sign(x: f32) -> f32 {
    if x < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// `r[i] = sign(x[i])`, with `0.0` mapped to `+1.0`.
pub fn sign_of(r: &mut [f32], x: &[f32]) -> Result<()> {
    check_len(r.len(), x.len())?;
    for (r, &x) in r.iter_mut().zip(x) {
        *r = sign(x);
    }
    Ok(())
}

/// Soft threshold: shrink each magnitude by `t`, clamp at zero, keep the sign.
pub fn truncate(r: &mut [f32], x: &[f32], t: f32) -> Result<()> {
    check_len(r.len(), x.len())?;
    for (r, &x) in r.iter_mut().zip(x) {
        let shrunk = x.abs() - t;
        *r = if shrunk < 0.0 {
            0.0
        } else if x < 0.0 {
            -shrunk
        } else {
            shrunk
        };
    }
    Ok(())
}

/// `Σ x[i]²`, accumulated in `f64`.
pub fn sum_of_squares(x: &[f32]) -> f64 {
    x.iter().map(|&v| (v as f64) * (v as f64)).sum()
}

/// Euclidean distance `‖x − y‖₂`.
pub fn distance(x: &[f32], y: &[f32]) -> Result<f32> {
    check_len(x.len(), y.len())?;
    let sq: f64 = x
        .iter()
        .zip(y)
        .map(|(&a, &b)| {
            let d = (a - b) as f64;
            d * d
        })
        .sum();
    Ok(sq.sqrt() as f32)
}

/// Rescale `x` into `r` so its root-mean-square equals `target_scale`.
///
/// `r = x · target_scale / sqrt(mean(x²) + 1e-20)`; an all-zero input stays zero.
pub fn adjust_variance(r: &mut [f32], x: &[f32], target_scale: f32) -> Result<()> {
    check_len(r.len(), x.len())?;
    if x.is_empty() {
        return Ok(());
    }
    let mean_sq = sum_of_squares(x) / x.len() as f64;
    let adj = target_scale as f64 / (mean_sq + VARIANCE_EPSILON).sqrt();
    scale(r, x, adj as f32)
}
