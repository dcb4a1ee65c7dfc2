//! Square RGB pixel blocks and their vector encoding.
//!
//! A block of side `s` encodes to `s * s * 4` floats. Pixels are visited
//! column by column (outer loop over `px`, inner over `py`), and each emits
//! `r - 127.5, g - 127.5, b - 127.5, 0`. The fourth component pads each pixel
//! to a power-of-two stride so a 32×32 block fills exactly 4096 elements.
//!
//! Decoding adds the offset back, rounds, clamps to `[0, 255]` and ignores the
//! padding component.

use crate::config::{block_vec_len, CHANNELS_PER_PIXEL, PIXEL_OFFSET};
use crate::error::{check_len, MemoryError, Result};

/// An 8-bit RGB pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }
}

/// A square block of pixels, stored row-major (`pixels[py * side + px]`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBlock {
    side: usize,
    pixels: Vec<Rgb>,
}

impl PixelBlock {
    /// A block filled with one colour. Fails if `side * side * 4` overflows.
    pub fn filled(side: usize, colour: Rgb) -> Result<Self> {
        block_vec_len(side).ok_or_else(|| too_large(side))?;
        Ok(Self {
            side,
            pixels: vec![colour; side * side],
        })
    }

    /// Wrap row-major pixels; `pixels.len()` must be `side * side`.
    pub fn from_pixels(side: usize, pixels: Vec<Rgb>) -> Result<Self> {
        block_vec_len(side).ok_or_else(|| too_large(side))?;
        check_len(side * side, pixels.len())?;
        Ok(Self { side, pixels })
    }

    pub fn side(&self) -> usize {
        self.side
    }

    /// Length of the vector this block encodes to.
    pub fn vec_len(&self) -> usize {
        self.pixels.len() * CHANNELS_PER_PIXEL
    }

    /// Pixel at `(px, py)`, or `None` outside the block.
    pub fn get(&self, px: usize, py: usize) -> Option<Rgb> {
        self.index(px, py).map(|i| self.pixels[i])
    }

    pub fn set(&mut self, px: usize, py: usize, colour: Rgb) -> Result<()> {
        let i = self.index(px, py).ok_or(MemoryError::OutOfBounds {
            x: px,
            y: py,
            side: 1,
            width: self.side,
            height: self.side,
        })?;
        self.pixels[i] = colour;
        Ok(())
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    fn index(&self, px: usize, py: usize) -> Option<usize> {
        (px < self.side && py < self.side).then(|| py * self.side + px)
    }
}

fn too_large(side: usize) -> MemoryError {
    MemoryError::Configuration(format!("block side {} is too large", side))
}

/// Write the column-major encoding of `block`; `out` has the right length.
fn write_encoded(block: &PixelBlock, out: &mut [f32]) {
    let side = block.side;
    for (idx, chunk) in out.chunks_exact_mut(CHANNELS_PER_PIXEL).enumerate() {
        let (px, py) = (idx / side, idx % side);
        let Rgb(rgb) = block.pixels[py * side + px];
        chunk[0] = rgb[0] as f32 - PIXEL_OFFSET;
        chunk[1] = rgb[1] as f32 - PIXEL_OFFSET;
        chunk[2] = rgb[2] as f32 - PIXEL_OFFSET;
        chunk[3] = 0.0;
    }
}

/// Encode `block` into `out`, which must be exactly `block.vec_len()` long.
pub fn encode_block(block: &PixelBlock, out: &mut [f32]) -> Result<()> {
    check_len(block.vec_len(), out.len())?;
    write_encoded(block, out);
    Ok(())
}

/// Encode `block` into a freshly allocated vector.
pub fn block_to_vec(block: &PixelBlock) -> Vec<f32> {
    let mut v = vec![0.0; block.vec_len()];
    write_encoded(block, &mut v);
    v
}

#[inline]
fn channel(v: f32) -> u8 {
    (v + PIXEL_OFFSET).round().clamp(0.0, 255.0) as u8
}

/// Decode a vector of length `side * side * 4` back into a block.
pub fn decode_block(v: &[f32], side: usize) -> Result<PixelBlock> {
    if side == 0 {
        return Err(MemoryError::Configuration(
            "block side must be at least 1".to_string(),
        ));
    }
    let len = block_vec_len(side).ok_or_else(|| too_large(side))?;
    check_len(len, v.len())?;
    let mut block = PixelBlock::filled(side, Rgb::default())?;
    for (idx, chunk) in v.chunks_exact(CHANNELS_PER_PIXEL).enumerate() {
        let (px, py) = (idx / side, idx % side);
        block.pixels[py * side + px] =
            Rgb([channel(chunk[0]), channel(chunk[1]), channel(chunk[2])]);
    }
    Ok(block)
}
