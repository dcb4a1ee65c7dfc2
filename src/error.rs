//! Error type shared by every module in the crate.

/// Failures reported by the memory, its vector kernels and the codecs.
///
/// All of these are input-validation failures detected before any state is
/// touched, so a call that returns an error has not mutated anything.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MemoryError {
    /// Invalid construction parameters (non-power-of-two length, zero density, ...).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Operand lengths disagree.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// A bounded collection is full.
    #[error("capacity exceeded: at most {capacity} entries")]
    CapacityExceeded { capacity: usize },

    /// A pixel block does not fit inside the raster it is read from.
    #[error("block of side {side} at ({x}, {y}) lies outside a {width}x{height} raster")]
    OutOfBounds {
        x: usize,
        y: usize,
        side: usize,
        width: usize,
        height: usize,
    },
}

pub type Result<T> = std::result::Result<T, MemoryError>;

/// Fail with [`MemoryError::DimensionMismatch`] unless `got == expected`.
#[inline]
pub(crate) fn check_len(expected: usize, got: usize) -> Result<()> {
    if expected == got {
        Ok(())
    } else {
        Err(MemoryError::DimensionMismatch { expected, got })
    }
}
