//! LSH associative memory.
//!
//! - **config**: validated construction parameters
//! - **associative**: weights, recall and delta-rule training

pub mod associative;
pub mod config;

pub use associative::AssociativeMemory;
pub use config::MemoryConfig;
