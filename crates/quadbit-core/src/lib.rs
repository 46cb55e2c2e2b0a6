//! quadbit core - Basic data structures for mask segmentation
//!
//! This crate provides the data structures shared by every stage of the
//! quadbit pipeline:
//!
//! - [`Pix`] / [`PixMut`] - The image container (immutable / mutable)
//! - [`BandStack`] - Multi-band rasters, one 8 bpp plane per sample
//! - [`Box`] - Rectangle regions
//! - [`Histogram`] - 256-bin intensity histogram
//! - [`binarize`] - Fixed-threshold mask generation

pub mod box_;
pub mod error;
pub mod pix;

pub use box_::Box;
pub use error::{Error, Result};
pub use pix::threshold::binarize;
pub use pix::{BandStack, DEFAULT_THRESHOLD, Histogram, ImageFormat, Pix, PixMut, PixelDepth};

/// Channel helpers for 32-bit RGBA pixels.
///
/// Pixels are stored as `0xRRGGBBAA` (red in MSB, alpha in LSB).
pub mod color {
    pub const RED_SHIFT: u32 = 24;
    pub const GREEN_SHIFT: u32 = 16;
    pub const BLUE_SHIFT: u32 = 8;
    pub const ALPHA_SHIFT: u32 = 0;

    #[inline]
    pub fn red(pixel: u32) -> u8 {
        ((pixel >> RED_SHIFT) & 0xff) as u8
    }

    #[inline]
    pub fn green(pixel: u32) -> u8 {
        ((pixel >> GREEN_SHIFT) & 0xff) as u8
    }

    #[inline]
    pub fn blue(pixel: u32) -> u8 {
        ((pixel >> BLUE_SHIFT) & 0xff) as u8
    }

    #[inline]
    pub fn alpha(pixel: u32) -> u8 {
        ((pixel >> ALPHA_SHIFT) & 0xff) as u8
    }

    /// Compose an opaque pixel from RGB components.
    #[inline]
    pub fn compose_rgb(r: u8, g: u8, b: u8) -> u32 {
        compose_rgba(r, g, b, 255)
    }

    /// Compose a pixel from RGBA components.
    #[inline]
    pub fn compose_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
        (u32::from(r) << RED_SHIFT)
            | (u32::from(g) << GREEN_SHIFT)
            | (u32::from(b) << BLUE_SHIFT)
            | (u32::from(a) << ALPHA_SHIFT)
    }

    #[inline]
    pub fn extract_rgb(pixel: u32) -> (u8, u8, u8) {
        (red(pixel), green(pixel), blue(pixel))
    }

    #[inline]
    pub fn extract_rgba(pixel: u32) -> (u8, u8, u8, u8) {
        (red(pixel), green(pixel), blue(pixel), alpha(pixel))
    }
}

#[cfg(test)]
mod tests {
    use super::color;

    #[test]
    fn test_compose_extract() {
        let p = color::compose_rgba(1, 2, 3, 4);
        assert_eq!(p, 0x0102_0304);
        assert_eq!(color::extract_rgba(p), (1, 2, 3, 4));
        assert_eq!(color::alpha(color::compose_rgb(9, 9, 9)), 255);
    }
}
