//! In-memory RGB image that blocks are cut from and pasted back into.

use ndarray::Array3;

use crate::codec::block::{PixelBlock, Rgb};
use crate::error::{MemoryError, Result};

/// An RGB image stored as `height × width × 3` bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    pixels: Array3<u8>,
}

impl Raster {
    /// A raster filled with one colour.
    pub fn filled(width: usize, height: usize, colour: Rgb) -> Self {
        let pixels = Array3::from_shape_fn((height, width, 3), |(_, _, c)| colour.0[c]);
        Self { pixels }
    }

    /// Build a raster by evaluating `f(x, y)` at every pixel.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> Rgb,
    {
        let mut raster = Self::filled(width, height, Rgb::default());
        for y in 0..height {
            for x in 0..width {
                raster.set(x, y, f(x, y));
            }
        }
        raster
    }

    pub fn width(&self) -> usize {
        self.pixels.dim().1
    }

    pub fn height(&self) -> usize {
        self.pixels.dim().0
    }

    /// Pixel at `(x, y)`, or `None` outside the raster.
    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(Rgb([
            self.pixels[[y, x, 0]],
            self.pixels[[y, x, 1]],
            self.pixels[[y, x, 2]],
        ]))
    }

    /// Write a pixel; writes outside the raster are dropped.
    pub fn set(&mut self, x: usize, y: usize, colour: Rgb) {
        if x >= self.width() || y >= self.height() {
            return;
        }
        for (c, &v) in colour.0.iter().enumerate() {
            self.pixels[[y, x, c]] = v;
        }
    }

    /// Copy the `side × side` block whose top-left corner is `(x, y)`.
    pub fn block_at(&self, x: usize, y: usize, side: usize) -> Result<PixelBlock> {
        let fits = x
            .checked_add(side)
            .zip(y.checked_add(side))
            .map_or(false, |(x_end, y_end)| x_end <= self.width() && y_end <= self.height());
        if !fits {
            return Err(MemoryError::OutOfBounds {
                x,
                y,
                side,
                width: self.width(),
                height: self.height(),
            });
        }

        let mut block = PixelBlock::filled(side, Rgb::default())?;
        for py in 0..side {
            for px in 0..side {
                if let Some(colour) = self.get(x + px, y + py) {
                    block.set(px, py, colour)?;
                }
            }
        }
        Ok(block)
    }

    /// Paste `block` with its top-left corner at `(x, y)`, clipped to the raster.
    pub fn put_block(&mut self, x: usize, y: usize, block: &PixelBlock) {
        let side = block.side();
        let cols = side.min(self.width().saturating_sub(x));
        let rows = side.min(self.height().saturating_sub(y));
        for py in 0..rows {
            for px in 0..cols {
                if let Some(colour) = block.get(px, py) {
                    self.set(x + px, y + py, colour);
                }
            }
        }
    }

    /// Raw `height × width × 3` pixel array.
    pub fn as_array(&self) -> &Array3<u8> {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(width: usize, height: usize) -> Raster {
        Raster::from_fn(width, height, |x, y| {
            Rgb::new((x % 256) as u8, (y % 256) as u8, ((x ^ y) % 256) as u8)
        })
    }

    #[test]
    fn test_dimensions_and_pixels() {
        let r = checker(10, 6);
        assert_eq!((r.width(), r.height()), (10, 6));
        assert_eq!(r.as_array().dim(), (6, 10, 3));
        assert_eq!(r.get(3, 5), Some(Rgb::new(3, 5, 6)));
        assert_eq!(r.get(10, 0), None);
    }

    #[test]
    fn test_block_round_trip_through_raster() {
        let src = checker(40, 40);
        let block = src.block_at(5, 7, 8).unwrap();
        assert_eq!(block.get(0, 0), src.get(5, 7));
        assert_eq!(block.get(7, 2), src.get(12, 9));

        let mut dst = Raster::filled(20, 20, Rgb::default());
        dst.put_block(2, 3, &block);
        assert_eq!(dst.block_at(2, 3, 8).unwrap(), block);
        assert_eq!(dst.get(0, 0), Some(Rgb::default()));
    }

    #[test]
    fn test_block_out_of_bounds() {
        let r = checker(16, 16);
        assert!(r.block_at(8, 8, 8).is_ok());
        assert!(matches!(
            r.block_at(9, 0, 8),
            Err(MemoryError::OutOfBounds { x: 9, side: 8, .. })
        ));
        assert!(r.block_at(usize::MAX, 0, 2).is_err());
    }

    #[test]
    fn test_put_block_clips() {
        let mut r = Raster::filled(4, 4, Rgb::default());
        let block = PixelBlock::filled(4, Rgb::new(9, 9, 9)).unwrap();
        r.put_block(2, 2, &block);
        assert_eq!(r.get(3, 3), Some(Rgb::new(9, 9, 9)));
        assert_eq!(r.get(1, 1), Some(Rgb::default()));

        let before = r.clone();
        r.put_block(usize::MAX - 1, 0, &block);
        r.put_block(0, usize::MAX, &block);
        assert_eq!(r, before);
    }
}
