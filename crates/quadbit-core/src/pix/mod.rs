//! PIX - The main image container
//!
//! The `Pix` structure is the image type shared by every stage of the
//! pipeline: grayscale input, binary masks, label maps and display images
//! are all `Pix` values distinguished by their [`PixelDepth`].
//!
//! # Pixel layout
//!
//! - One `u32` sample slot per pixel, stored row-major
//! - 1 bpp masks hold 0 or 1, 8 bpp images hold 0..=255
//! - 32 bpp images hold either packed RGBA (`spp` 3 or 4) or raw labels (`spp` 1)
//!
//! # Ownership model
//!
//! `Pix` uses `Arc` for cheap cloning (shared ownership) and is read-only.
//! To modify pixel data, convert to `PixMut` via [`Pix::try_into_mut`]
//! or [`Pix::to_mut`], then convert back with `Into<Pix>`.

mod access;
pub mod bands;
mod clip;
pub mod convert;
pub mod histogram;
pub mod threshold;

pub use bands::BandStack;
pub use histogram::Histogram;
pub use threshold::DEFAULT_THRESHOLD;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Pixel depth (bits per pixel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PixelDepth {
    /// 1-bit binary mask
    Bit1 = 1,
    /// 8-bit grayscale
    Bit8 = 8,
    /// 32-bit RGB(A) or label map
    Bit32 = 32,
}

impl PixelDepth {
    /// Get the number of bits per pixel.
    pub fn bits(self) -> u32 {
        self as u32
    }

    /// Get the maximum pixel value representable at this depth.
    pub fn max_value(self) -> u32 {
        match self {
            PixelDepth::Bit32 => u32::MAX,
            _ => (1u32 << self.bits()) - 1,
        }
    }
}

/// Image file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    /// Unknown format
    #[default]
    Unknown,
    /// JFIF JPEG format
    Jpeg,
    /// PNG format
    Png,
    /// TIFF format
    Tiff,
}

impl ImageFormat {
    /// Get the file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Unknown => "dat",
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Tiff => "tif",
        }
    }
}

/// Internal PIX data
#[derive(Debug, Clone)]
struct PixData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Depth in bits per pixel
    depth: PixelDepth,
    /// Samples per pixel (1 for gray/binary/labels, 3 for RGB, 4 for RGBA)
    spp: u32,
    /// Input file format
    informat: ImageFormat,
    /// Pixel values, one slot per pixel, row-major
    data: Vec<u32>,
}

/// PIX - Main image container
///
/// # Examples
///
/// ```
/// use quadbit_core::{Pix, PixelDepth};
///
/// let pix = Pix::new(640, 480, PixelDepth::Bit8).unwrap();
/// assert_eq!(pix.width(), 640);
/// assert_eq!(pix.height(), 480);
/// ```
#[derive(Debug, Clone)]
pub struct Pix {
    inner: Arc<PixData>,
}

impl Pix {
    /// Create a new PIX with the specified dimensions and depth.
    ///
    /// The image data is initialized to zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidImage`] if width or height is 0.
    pub fn new(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidImage(format!(
                "zero-area image: {width}x{height}"
            )));
        }

        let spp = match depth {
            PixelDepth::Bit32 => 3,
            _ => 1,
        };

        let inner = PixData {
            width,
            height,
            depth,
            spp,
            informat: ImageFormat::Unknown,
            data: vec![0u32; width as usize * height as usize],
        };

        Ok(Pix {
            inner: Arc::new(inner),
        })
    }

    /// Build an 8-bit grayscale image from row-major intensity bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidImage`] if the image would have zero area or
    /// `data.len() != width * height`.
    pub fn from_gray_bytes(width: u32, height: u32, data: &[u8]) -> Result<Self> {
        let mut pix_mut = PixMut::new(width, height, PixelDepth::Bit8)?;
        let expected = pix_mut.data().len();
        if data.len() != expected {
            return Err(Error::InvalidImage(format!(
                "expected {expected} intensity values for {width}x{height}, got {}",
                data.len()
            )));
        }
        for (dst, &src) in pix_mut.data_mut().iter_mut().zip(data) {
            *dst = u32::from(src);
        }
        Ok(pix_mut.into())
    }

    /// Build an 8-bit grayscale image from a slice of equally long rows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidImage`] if there are no rows, the rows are
    /// empty, or the rows are ragged.
    pub fn from_gray_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        if rows.iter().any(|r| r.as_ref().len() != width) {
            return Err(Error::InvalidImage("rows have differing lengths".to_string()));
        }
        let flat: Vec<u8> = rows.iter().flat_map(|r| r.as_ref().iter().copied()).collect();
        Self::from_gray_bytes(width as u32, height as u32, &flat)
    }

    /// Get the image width in pixels (number of columns).
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels (number of rows).
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the pixel depth.
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    /// Get the samples per pixel.
    #[inline]
    pub fn spp(&self) -> u32 {
        self.inner.spp
    }

    /// Get the input file format.
    #[inline]
    pub fn informat(&self) -> ImageFormat {
        self.inner.informat
    }

    /// Get the raw pixel slots, row-major.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get the pixel slots of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        let w = self.inner.width as usize;
        let start = y as usize * w;
        &self.inner.data[start..start + w]
    }

    /// Number of pixels (`width * height`).
    #[inline]
    pub fn area(&self) -> usize {
        self.inner.data.len()
    }

    /// Check whether two images share width, height and depth.
    pub fn sizes_equal(&self, other: &Pix) -> bool {
        self.inner.width == other.inner.width
            && self.inner.height == other.inner.height
            && self.inner.depth == other.inner.depth
    }

    /// Count non-zero pixels.
    ///
    /// For a binary mask this is the number of foreground pixels.
    pub fn count_pixels(&self) -> usize {
        self.inner.data.iter().filter(|&&v| v != 0).count()
    }

    /// Try to take unique ownership of the data for mutation.
    ///
    /// Returns the original `Pix` back if the data is shared.
    pub fn try_into_mut(self) -> std::result::Result<PixMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(PixMut { inner: data }),
            Err(arc) => Err(Pix { inner: arc }),
        }
    }

    /// Create a mutable deep copy.
    pub fn to_mut(&self) -> PixMut {
        PixMut {
            inner: (*self.inner).clone(),
        }
    }
}

/// Mutable image, obtained from [`Pix::try_into_mut`] or [`Pix::to_mut`].
#[derive(Debug)]
pub struct PixMut {
    inner: PixData,
}

impl PixMut {
    /// Create a zeroed mutable image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidImage`] if width or height is 0.
    pub fn new(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        let pix = Pix::new(width, height, depth)?;
        Ok(pix.to_mut())
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    #[inline]
    pub fn spp(&self) -> u32 {
        self.inner.spp
    }

    pub fn set_spp(&mut self, spp: u32) {
        self.inner.spp = spp;
    }

    pub fn set_informat(&mut self, format: ImageFormat) {
        self.inner.informat = format;
    }

    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.inner.data
    }
}

impl From<PixMut> for Pix {
    fn from(pix_mut: PixMut) -> Self {
        Pix {
            inner: Arc::new(pix_mut.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_area_is_invalid_image() {
        assert!(matches!(
            Pix::new(0, 5, PixelDepth::Bit8),
            Err(Error::InvalidImage(_))
        ));
        assert!(matches!(
            PixMut::new(3, 0, PixelDepth::Bit1),
            Err(Error::InvalidImage(_))
        ));
        assert!(matches!(
            Pix::from_gray_bytes(0, 4, &[]),
            Err(Error::InvalidImage(_))
        ));
    }

    #[test]
    fn test_from_gray_bytes() {
        let pix = Pix::from_gray_bytes(3, 2, &[0, 1, 2, 3, 4, 255]).unwrap();
        assert_eq!(pix.width(), 3);
        assert_eq!(pix.height(), 2);
        assert_eq!(pix.depth(), PixelDepth::Bit8);
        assert_eq!(pix.row_data(1), &[3, 4, 255]);
    }

    #[test]
    fn test_from_gray_bytes_invalid() {
        assert!(matches!(
            Pix::from_gray_bytes(0, 0, &[]),
            Err(Error::InvalidImage(_))
        ));
        assert!(matches!(
            Pix::from_gray_bytes(2, 2, &[1, 2, 3]),
            Err(Error::InvalidImage(_))
        ));
    }

    #[test]
    fn test_from_gray_rows_ragged() {
        let rows: [&[u8]; 2] = [&[1, 2], &[3]];
        assert!(Pix::from_gray_rows(&rows).is_err());
        let empty: [&[u8]; 0] = [];
        assert!(Pix::from_gray_rows(&empty).is_err());
    }

    #[test]
    fn test_try_into_mut_shared() {
        let pix = Pix::new(2, 2, PixelDepth::Bit1).unwrap();
        let other = pix.clone();
        let pix = pix.try_into_mut().unwrap_err();
        drop(other);
        assert!(pix.try_into_mut().is_ok());
    }

    #[test]
    fn test_count_pixels() {
        let pix = Pix::from_gray_bytes(2, 2, &[0, 7, 0, 1]).unwrap();
        assert_eq!(pix.count_pixels(), 2);
    }
}
