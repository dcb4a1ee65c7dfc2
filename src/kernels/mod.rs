//! Numeric kernels the memory is built from.
//!
//! - **vector_ops**: checked elementwise arithmetic over `f32` slices
//! - **projection**: seeded sign flip + fast Walsh–Hadamard transform

pub mod projection;
pub mod vector_ops;
