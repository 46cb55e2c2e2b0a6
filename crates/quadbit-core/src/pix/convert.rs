//! Depth conversions
//!
//! Conversions between binary masks, grayscale images, color images and
//! display-ready 8 bpp renderings:
//!
//! - [`Pix::convert_1_to_8`]: mask to gray with a value mapping
//! - [`Pix::convert_rgb_to_luminance`]: color to gray
//! - [`Pix::convert_to_gray8`]: any input to an 8 bpp intensity grid
//! - [`Pix::normalize_to_8`]: min-max stretch to [0, 255]
//! - [`Pix::split_bands`]: one 8 bpp image per sample

use super::{Pix, PixMut, PixelDepth};
use crate::color;
use crate::error::{Error, Result};

/// Luminance weight of the red channel (ITU-R 601-2).
pub const L_RED_WEIGHT: u32 = 299;
/// Luminance weight of the green channel (ITU-R 601-2).
pub const L_GREEN_WEIGHT: u32 = 587;
/// Luminance weight of the blue channel (ITU-R 601-2).
pub const L_BLUE_WEIGHT: u32 = 114;

impl Pix {
    /// Convert a 1 bpp mask to 8 bpp with value mapping.
    ///
    /// Each 0 becomes `val0` and each 1 becomes `val1` (both 0-255).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] if the image is not 1 bpp and
    /// [`Error::InvalidParameter`] if a value exceeds 255.
    pub fn convert_1_to_8(&self, val0: u32, val1: u32) -> Result<Pix> {
        if self.depth() != PixelDepth::Bit1 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        if val0 > 255 || val1 > 255 {
            return Err(Error::InvalidParameter(format!(
                "8 bpp values must be <= 255: val0={val0}, val1={val1}"
            )));
        }

        let mut out = PixMut::new(self.width(), self.height(), PixelDepth::Bit8)?;
        for (dst, &src) in out.data_mut().iter_mut().zip(self.data()) {
            *dst = if src != 0 { val1 } else { val0 };
        }
        Ok(out.into())
    }

    /// Convert 32 bpp RGB to 8 bpp grayscale using ITU-R 601-2 luminance.
    ///
    /// `L = (299 R + 587 G + 114 B) / 1000`, truncated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] if the image is not a 32 bpp
    /// color image.
    pub fn convert_rgb_to_luminance(&self) -> Result<Pix> {
        if self.depth() != PixelDepth::Bit32 || self.spp() < 3 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }

        let mut out = PixMut::new(self.width(), self.height(), PixelDepth::Bit8)?;
        for (dst, &pixel) in out.data_mut().iter_mut().zip(self.data()) {
            let (r, g, b) = color::extract_rgb(pixel);
            *dst = (L_RED_WEIGHT * u32::from(r)
                + L_GREEN_WEIGHT * u32::from(g)
                + L_BLUE_WEIGHT * u32::from(b))
                / 1000;
        }
        Ok(out.into())
    }

    /// Convert any supported image to an 8 bpp intensity grid.
    ///
    /// - 8 bpp: returned as-is (shared)
    /// - 1 bpp: 0 -> 0, 1 -> 255
    /// - 32 bpp color: luminance
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] for 32 bpp label maps.
    pub fn convert_to_gray8(&self) -> Result<Pix> {
        match self.depth() {
            PixelDepth::Bit8 => Ok(self.clone()),
            PixelDepth::Bit1 => self.convert_1_to_8(0, 255),
            PixelDepth::Bit32 => self.convert_rgb_to_luminance(),
        }
    }

    /// Stretch pixel values linearly so that min maps to 0 and max to 255.
    ///
    /// Works on 1, 8 and single-sample 32 bpp images (masks, gray images
    /// and label maps). A constant image maps to all zeros.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] for 32 bpp color images.
    pub fn normalize_to_8(&self) -> Result<Pix> {
        if self.depth() == PixelDepth::Bit32 && self.spp() != 1 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }

        let (min, max) = self
            .data()
            .iter()
            .fold((u32::MAX, 0u32), |(lo, hi), &v| (lo.min(v), hi.max(v)));

        let mut out = PixMut::new(self.width(), self.height(), PixelDepth::Bit8)?;
        if max > min {
            let range = u64::from(max - min);
            for (dst, &v) in out.data_mut().iter_mut().zip(self.data()) {
                let scaled = (u64::from(v - min) * 255 + range / 2) / range;
                *dst = scaled as u32;
            }
        }
        Ok(out.into())
    }

    /// Decompose the image into one 8 bpp image per sample.
    ///
    /// Gray images yield a single band, RGB three and RGBA four
    /// (in R, G, B, A order). Binary masks are expanded to 0/255.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] for 32 bpp label maps.
    pub fn split_bands(&self) -> Result<Vec<Pix>> {
        match self.depth() {
            PixelDepth::Bit8 => Ok(vec![self.clone()]),
            PixelDepth::Bit1 => Ok(vec![self.convert_1_to_8(0, 255)?]),
            PixelDepth::Bit32 if self.spp() >= 3 => {
                let shifts: &[u32] = if self.spp() == 4 {
                    &[
                        color::RED_SHIFT,
                        color::GREEN_SHIFT,
                        color::BLUE_SHIFT,
                        color::ALPHA_SHIFT,
                    ]
                } else {
                    &[color::RED_SHIFT, color::GREEN_SHIFT, color::BLUE_SHIFT]
                };
                shifts
                    .iter()
                    .map(|&shift| -> Result<Pix> {
                        let mut band = PixMut::new(self.width(), self.height(), PixelDepth::Bit8)?;
                        for (dst, &pixel) in band.data_mut().iter_mut().zip(self.data()) {
                            *dst = (pixel >> shift) & 0xff;
                        }
                        Ok(band.into())
                    })
                    .collect()
            }
            PixelDepth::Bit32 => Err(Error::UnsupportedDepth(32)),
        }
    }
}
