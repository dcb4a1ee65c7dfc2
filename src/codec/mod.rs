//! Pixel-block codec at the boundary between images and memory vectors.
//!
//! - **block**: square RGB blocks ⇄ centred `f32` vectors (4 components per pixel)
//! - **raster**: in-memory RGB image with block extraction and pasting

pub mod block;
pub mod raster;

pub use block::{block_to_vec, decode_block, encode_block, PixelBlock, Rgb};
pub use raster::Raster;
