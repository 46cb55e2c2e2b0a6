//! Pixel access functions
//!
//! Low-level functions for getting and setting individual pixels.
//! Coordinates are `(x, y)` = `(column, row)` throughout.

use super::{Pix, PixMut, PixelDepth};
use crate::color;
use crate::error::{Error, Result};

#[inline]
fn index(width: u32, x: u32, y: u32) -> usize {
    y as usize * width as usize + x as usize
}

impl Pix {
    /// Get a pixel value at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.data()[index(self.width(), x, y)])
    }

    /// Get RGB values at (x, y).
    ///
    /// Only valid for 32-bit color images.
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        if self.depth() != PixelDepth::Bit32 {
            return None;
        }
        self.get_pixel(x, y).map(color::extract_rgb)
    }
}

impl PixMut {
    /// Get a pixel value at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.data()[index(self.width(), x, y)])
    }

    /// Set a pixel value at (x, y).
    ///
    /// The value is masked to the pixel depth.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u32) -> Result<()> {
        if x >= self.width() || y >= self.height() {
            return Err(Error::IndexOutOfBounds {
                index: index(self.width(), x, y),
                len: self.data().len(),
            });
        }
        self.set_pixel_unchecked(x, y, val);
        Ok(())
    }

    /// Set a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `y * width + x` falls outside the image buffer.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u32) {
        let max = self.depth().max_value();
        let idx = index(self.width(), x, y);
        self.data_mut()[idx] = val & max;
    }

    /// Set an RGB pixel at (x, y).
    ///
    /// Only valid for 32-bit images.
    pub fn set_rgb(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8) -> Result<()> {
        if self.depth() != PixelDepth::Bit32 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        self.set_pixel(x, y, color::compose_rgb(r, g, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_roundtrip() {
        let mut pix = PixMut::new(4, 3, PixelDepth::Bit8).unwrap();
        pix.set_pixel(3, 2, 200).unwrap();
        assert_eq!(pix.get_pixel(3, 2), Some(200));
        let pix: Pix = pix.into();
        assert_eq!(pix.get_pixel(3, 2), Some(200));
        assert_eq!(pix.get_pixel(4, 0), None);
    }

    #[test]
    fn test_set_masks_to_depth() {
        let mut pix = PixMut::new(2, 2, PixelDepth::Bit1).unwrap();
        pix.set_pixel_unchecked(0, 0, 3);
        assert_eq!(pix.get_pixel(0, 0), Some(1));
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut pix = PixMut::new(2, 2, PixelDepth::Bit8).unwrap();
        assert!(matches!(
            pix.set_pixel(2, 0, 1),
            Err(Error::IndexOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_rgb_access() {
        let mut pix = PixMut::new(2, 1, PixelDepth::Bit32).unwrap();
        pix.set_rgb(1, 0, 10, 20, 30).unwrap();
        let pix: Pix = pix.into();
        assert_eq!(pix.get_rgb(1, 0), Some((10, 20, 30)));
        let gray = Pix::new(1, 1, PixelDepth::Bit8).unwrap();
        assert_eq!(gray.get_rgb(0, 0), None);
    }
}
